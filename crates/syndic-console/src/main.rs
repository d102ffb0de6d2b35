//! # Syndic Console
//!
//! Demo entry point: connects to the dashboard API named by `SYNDIC_API_URL`, loads the
//! charges screen, creates a charge through its modal and prints the resulting numbers.
//!
//! ## 📚 Quick Start
//!
//! ```bash
//! SYNDIC_API_URL=http://localhost:8000/api/ SYNDIC_API_TOKEN=... RUST_LOG=info cargo run -p syndic-console
//! ```
//!
//! - **[model]**: records, payloads, filters and statistics
//! - **[clients]**: type-safe wrappers around the generic collection clients
//! - **[charges]** / **[complaints]** / **[buildings]**: entity implementations and modals
//! - **[lifecycle]**: starts and stops the controllers

use action_forms::{render, FieldOption, SubmitOutcome};
use resource_framework::tracing::setup_tracing;
use resource_framework::{ApiConfig, ControllerConfig, HttpTransport, ResourceClient};
use std::sync::Arc;
use syndic_console::charges;
use syndic_console::lifecycle::SyndicConsole;
use syndic_console::model::ChargeFilters;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let controller_config = ControllerConfig::from_env().map_err(|e| e.to_string())?;
    let api_config = ApiConfig::from_env().map_err(|e| e.to_string())?;
    let transport = HttpTransport::new(&api_config).map_err(|e| e.to_string())?;
    info!(base_url = %api_config.base_url, "Starting syndic console");

    let console = SyndicConsole::start(controller_config, Arc::new(transport));

    let span = tracing::info_span!("charges_screen");
    async {
        if let Err(e) = console.charges.fetch(Some(ChargeFilters::default())).await {
            error!(error = %e, "Could not load charges");
            return;
        }
        let state = console.charges.state();
        info!(
            charges = state.records.len(),
            total = %state.stats.total_amount,
            outstanding = %state.stats.unpaid_amount,
            collection_rate = state.stats.collection_rate,
            "Charges loaded"
        );

        let apartments: Vec<FieldOption> = state
            .records
            .iter()
            .map(|charge| {
                FieldOption::new(
                    charge.appartement.to_string(),
                    format!("{} - {}", charge.building_name, charge.apartment_number),
                )
            })
            .collect();
        let Some(first) = apartments.first().cloned() else {
            info!("No apartments to bill yet");
            return;
        };

        let modal = match charges::create_charge_modal(console.charges.clone(), apartments) {
            Ok(modal) => modal,
            Err(e) => {
                error!(error = %e, "Invalid charge form");
                return;
            }
        };
        let mut form = modal.open();
        let filled = [
            ("appartement", first.value.as_str()),
            ("description", "Elevator maintenance"),
            ("amount", "120.00"),
            ("due_date", "2024-12-31"),
        ]
        .into_iter()
        .try_for_each(|(name, value)| form.set_value(&modal.fields, name, value));
        if let Err(e) = filled {
            error!(error = %e, "Could not fill the charge form");
            return;
        }

        match form.submit(&modal).await {
            SubmitOutcome::Accepted => {
                let state = console.charges.state();
                info!(
                    notice = state.success_message().unwrap_or_default(),
                    total = %state.stats.total_amount,
                    "Charge created"
                );
            }
            SubmitOutcome::Invalid => {
                let view = render(&form, &modal);
                for field in view.fields.iter().filter(|f| f.error.is_some()) {
                    error!(field = %field.name, error = field.error.as_deref().unwrap_or_default(), "Invalid value");
                }
            }
            other => error!(outcome = ?other, "Charge not created"),
        }
    }
    .instrument(span)
    .await;

    console.shutdown().await?;
    info!("Console completed");
    Ok(())
}
