//! [`ResourceEntity`] implementation for [`Complaint`].
//!
//! Complaints are partially updated with `PATCH`, have no bulk endpoint and read their
//! statistics from the server.

use crate::model::{
    Complaint, ComplaintAction, ComplaintCreate, ComplaintFilters, ComplaintStats, ComplaintStatus,
    ComplaintUpdate,
};
use resource_framework::{ApiRequest, Method, Operation, ResourceEntity, StatsSource};
use serde_json::json;

impl ResourceEntity for Complaint {
    type Id = u64;
    type Create = ComplaintCreate;
    type Update = ComplaintUpdate;
    type Action = ComplaintAction;
    type BulkCreate = ();
    type Filters = ComplaintFilters;
    type Stats = ComplaintStats;

    const NAME: &'static str = "complaint";
    const PATH: &'static str = "syndic/reclamations/";
    const UPDATE_METHOD: Method = Method::Patch;
    const STATS: StatsSource = StatsSource::Endpoint("syndic/reclamations/statistics/");

    fn id(&self) -> u64 {
        self.id
    }

    fn derive_stats(records: &[Self]) -> ComplaintStats {
        ComplaintStats::from_complaints(records)
    }

    fn action_request(id: &u64, action: &ComplaintAction) -> Result<ApiRequest, serde_json::Error> {
        let path = Self::item_path(id);
        let request = match action {
            ComplaintAction::Respond { response, status } => {
                let status = status.unwrap_or(ComplaintStatus::InProgress);
                ApiRequest::post(format!("{path}respond/"))
                    .with_body(json!({ "response": response, "status": status }))
            }
            ComplaintAction::MarkResolved => ApiRequest::post(format!("{path}mark_resolved/")),
            ComplaintAction::MarkInProgress => ApiRequest::post(format!("{path}mark_in_progress/")),
            ComplaintAction::Reject { response } => ApiRequest::post(format!("{path}reject/"))
                .with_body(json!({ "response": response })),
        };
        Ok(request)
    }

    fn success_message(op: Operation) -> String {
        let text = match op {
            Operation::Create => "Complaint created",
            Operation::MarkStatus => "Complaint status updated",
            Operation::Remove => "Complaint deleted",
            _ => "Complaint updated",
        };
        text.to_string()
    }
}
