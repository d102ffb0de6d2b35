//! # Delete Confirmation
//!
//! A destructive action behind a confirmation step. When the config names a
//! `confirm_text`, the operator has to retype it exactly before the action can run.

use crate::action::ConfirmAction;
use crate::error::ActionError;
use crate::form::SubmitOutcome;
use std::fmt::{self, Debug};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct DeleteModalConfig {
    pub title: String,
    pub description: String,
    pub item_name: String,
    pub confirm_text: Option<String>,
    pub action: Arc<dyn ConfirmAction>,
}

impl DeleteModalConfig {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        item_name: impl Into<String>,
        action: Arc<dyn ConfirmAction>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            item_name: item_name.into(),
            confirm_text: None,
            action,
        }
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }
}

impl Debug for DeleteModalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeleteModalConfig")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("item_name", &self.item_name)
            .field("confirm_text", &self.confirm_text)
            .finish_non_exhaustive()
    }
}

/// State of an open delete modal.
#[derive(Debug, Clone)]
pub struct DeleteConfirmation {
    pub config: DeleteModalConfig,
    typed: String,
    running: bool,
}

impl DeleteConfirmation {
    pub fn new(config: DeleteModalConfig) -> Self {
        Self {
            config,
            typed: String::new(),
            running: false,
        }
    }

    pub fn type_text(&mut self, text: impl Into<String>) {
        self.typed = text.into();
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True when no confirmation text is required or the typed text matches it exactly.
    pub fn can_confirm(&self) -> bool {
        self.config
            .confirm_text
            .as_ref()
            .map_or(true, |expected| *expected == self.typed)
    }

    pub fn begin_confirm(&mut self) -> Result<(), SubmitOutcome> {
        if self.running {
            return Err(SubmitOutcome::Busy);
        }
        if !self.can_confirm() {
            return Err(SubmitOutcome::Invalid);
        }
        self.running = true;
        Ok(())
    }

    pub fn finish_confirm(&mut self, result: Result<bool, ActionError>) -> SubmitOutcome {
        self.running = false;
        match result {
            Ok(true) => {
                self.typed.clear();
                SubmitOutcome::Accepted
            }
            Ok(false) => SubmitOutcome::Rejected,
            Err(e) => {
                warn!(item = %self.config.item_name, error = %e, "Delete action failed");
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Runs the action when confirmation is allowed and nothing is running.
    pub async fn confirm(&mut self) -> SubmitOutcome {
        if let Err(outcome) = self.begin_confirm() {
            return outcome;
        }
        let action = Arc::clone(&self.config.action);
        let result = action.run().await;
        self.finish_confirm(result)
    }
}
