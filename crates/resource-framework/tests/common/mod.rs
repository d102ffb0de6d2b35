#![allow(dead_code)]

use resource_framework::mock::MockTransport;
use resource_framework::{
    merge_option, ApiRequest, CollectionClient, CollectionController, ControllerConfig,
    FilterSet, Method, QueryParams, ResourceEntity, StatsSource,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// --- Test Entity: derived statistics, PUT updates, bulk endpoint ---

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Ticket {
    pub id: u32,
    pub title: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct TicketCreate {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct TicketUpdate {
    pub title: String,
}

#[derive(Debug)]
pub enum TicketAction {
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketFilters {
    pub status: Option<String>,
    pub search: Option<String>,
}

impl TicketFilters {
    pub fn status(status: &str) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }
}

impl FilterSet for TicketFilters {
    fn merge(&mut self, patch: Self) {
        merge_option(&mut self.status, patch.status);
        merge_option(&mut self.search, patch.search);
    }

    fn to_query(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .push("status", self.status.as_ref())
            .push("search", self.search.as_ref())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
}

impl ResourceEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Action = TicketAction;
    type BulkCreate = Vec<TicketCreate>;
    type Filters = TicketFilters;
    type Stats = TicketStats;

    const NAME: &'static str = "ticket";
    const PATH: &'static str = "tickets/";
    const BULK_CREATE_PATH: Option<&'static str> = Some("tickets/bulk/");

    fn id(&self) -> u32 {
        self.id
    }

    fn derive_stats(records: &[Self]) -> TicketStats {
        TicketStats {
            total: records.len(),
            open: records.iter().filter(|t| t.status == "open").count(),
        }
    }

    fn action_request(id: &u32, action: &TicketAction) -> Result<ApiRequest, serde_json::Error> {
        match action {
            TicketAction::Close => Ok(ApiRequest::post(format!("tickets/{id}/close/"))),
        }
    }
}

pub fn ticket(id: u32, title: &str, status: &str) -> Value {
    json!({ "id": id, "title": title, "status": status })
}

pub fn list(items: Vec<Value>) -> Value {
    let count = items.len();
    json!({ "success": true, "data": items, "count": count })
}

// --- Test Entity: statistics endpoint, PATCH updates, resource-named list key ---

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Alert {
    pub id: String,
    pub level: String,
}

#[derive(Debug, Serialize)]
pub struct AlertUpdate {
    pub level: String,
}

impl ResourceEntity for Alert {
    type Id = String;
    type Create = AlertUpdate;
    type Update = AlertUpdate;
    type Action = ();
    type BulkCreate = ();
    type Filters = ();
    type Stats = TicketStats;

    const NAME: &'static str = "alert";
    const PATH: &'static str = "alerts/";
    const COLLECTION_KEY: Option<&'static str> = Some("alerts");
    const UPDATE_METHOD: Method = Method::Patch;
    const STATS: StatsSource = StatsSource::Endpoint("alerts/statistics/");

    fn id(&self) -> String {
        self.id.clone()
    }

    fn derive_stats(records: &[Self]) -> TicketStats {
        TicketStats {
            total: records.len(),
            open: records.iter().filter(|a| a.level == "high").count(),
        }
    }

    fn action_request(id: &String, _action: &()) -> Result<ApiRequest, serde_json::Error> {
        Ok(ApiRequest::post(format!("alerts/{id}/ack/")))
    }
}

pub fn test_config() -> ControllerConfig {
    ControllerConfig::default()
}

/// Spawns a controller for `T` against `mock` and returns its client.
pub fn spawn_controller<T: ResourceEntity>(mock: &MockTransport) -> CollectionClient<T> {
    let (controller, client) = CollectionController::<T>::new(test_config());
    tokio::spawn(controller.run(mock.transport()));
    client
}
