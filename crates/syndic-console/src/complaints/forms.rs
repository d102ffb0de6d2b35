//! Modal configurations for the complaints screen.

use crate::clients::ComplaintClient;
use crate::model::{Complaint, ComplaintStatus};
use action_forms::{
    action_fn, ActionError, ActionModalConfig, ButtonVariant, FieldDescriptor, FieldOption,
    FormConfigError, FormValues, Validation,
};

fn status_options() -> Vec<FieldOption> {
    vec![
        FieldOption::new("IN_PROGRESS", "In progress"),
        FieldOption::new("RESOLVED", "Resolved"),
    ]
}

fn parse_status(value: Option<&str>) -> Option<ComplaintStatus> {
    match value? {
        "IN_PROGRESS" => Some(ComplaintStatus::InProgress),
        "RESOLVED" => Some(ComplaintStatus::Resolved),
        _ => None,
    }
}

/// "Respond" modal: a written answer plus the status to move the complaint to.
pub fn respond_modal(client: ComplaintClient, complaint: &Complaint) -> Result<ActionModalConfig, FormConfigError> {
    let id = complaint.id;
    let fields = vec![
        FieldDescriptor::textarea("response", "Response")
            .required()
            .placeholder("Describe what will be done and when")
            .validation(Validation::new().min(10.0).max(2000.0)),
        FieldDescriptor::select("status", "New status", status_options()).default_value("IN_PROGRESS"),
    ];

    let mut config = ActionModalConfig::new(
        "Respond to complaint",
        fields,
        "Send response",
        action_fn(move |values: FormValues| {
            let client = client.clone();
            async move {
                let response = values.text("response").unwrap_or_default().to_string();
                let status = parse_status(values.text("status"));
                client.respond(id, response, status).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )?
    .description(complaint.title.clone());

    if let Some(previous) = complaint.response.as_deref() {
        config = config.initial_data(
            FormValues::new()
                .with("response", previous)
                .with("status", "IN_PROGRESS"),
        );
    }
    Ok(config)
}

/// "Reject" modal; the reason is sent to the resident.
pub fn reject_modal(client: ComplaintClient, complaint: &Complaint) -> Result<ActionModalConfig, FormConfigError> {
    let id = complaint.id;
    let fields = vec![FieldDescriptor::textarea("response", "Reason").required()];
    ActionModalConfig::new(
        "Reject complaint",
        fields,
        "Reject",
        action_fn(move |values: FormValues| {
            let client = client.clone();
            async move {
                let reason = values.text("response").unwrap_or_default().to_string();
                client.reject(id, reason).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )
    .map(|config| {
        config
            .description(format!("\"{}\" will be closed as rejected.", complaint.title))
            .variant(ButtonVariant::Destructive)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_select_maps_to_transitions() {
        assert_eq!(parse_status(Some("RESOLVED")), Some(ComplaintStatus::Resolved));
        assert_eq!(parse_status(Some("PENDING")), None);
        assert_eq!(parse_status(None), None);
    }
}
