//! Building-specific resource logic.

pub mod error;

pub use error::*;

use crate::clients::BuildingClient;
use crate::model::{
    Building, BuildingAction, BuildingCreate, BuildingFilters, BuildingStats, BuildingUpdate,
};
use action_forms::{
    action_fn, confirm_fn, ActionError, ActionModalConfig, DeleteModalConfig, FieldDescriptor,
    FormConfigError, FormValues, Validation,
};
use resource_framework::{
    ApiRequest, CollectionController, ControllerConfig, Method, ResourceClient, ResourceEntity,
};
use serde_json::json;

impl ResourceEntity for Building {
    type Id = u64;
    type Create = BuildingCreate;
    type Update = BuildingUpdate;
    type Action = BuildingAction;
    type BulkCreate = ();
    type Filters = BuildingFilters;
    type Stats = BuildingStats;

    const NAME: &'static str = "building";
    const PATH: &'static str = "syndic/buildings/";

    fn id(&self) -> u64 {
        self.id
    }

    fn derive_stats(records: &[Self]) -> BuildingStats {
        BuildingStats::from_buildings(records)
    }

    fn action_request(id: &u64, action: &BuildingAction) -> Result<ApiRequest, serde_json::Error> {
        match action {
            BuildingAction::SetStatus(status) => Ok(ApiRequest::new(Method::Patch, Self::item_path(id))
                .with_body(json!({ "status": status }))),
        }
    }
}

/// Creates a new building controller and its client.
pub fn new(config: ControllerConfig) -> (CollectionController<Building>, BuildingClient) {
    let (controller, generic_client) = CollectionController::new(config);
    (controller, BuildingClient::new(generic_client))
}

/// "New building" modal.
pub fn create_building_modal(client: BuildingClient) -> Result<ActionModalConfig, FormConfigError> {
    let fields = vec![
        FieldDescriptor::text("name", "Name").required(),
        FieldDescriptor::text("address", "Address").required(),
        FieldDescriptor::number("floors", "Floors")
            .required()
            .validation(Validation::new().min(1.0).max(200.0)),
        FieldDescriptor::number("total_apartments", "Apartments")
            .validation(Validation::new().min(0.0)),
        FieldDescriptor::number("year_built", "Year built")
            .validation(Validation::new().min(1800.0).max(2100.0)),
    ];

    ActionModalConfig::new(
        "New building",
        fields,
        "Create building",
        action_fn(move |values: FormValues| {
            let client = client.clone();
            async move {
                let params = BuildingCreate::from_form(&values)?;
                client.create_building(params).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )
}

/// Deleting a building removes its apartments and charges, so the operator has to type
/// the building's name.
pub fn delete_building_modal(client: BuildingClient, building: &Building) -> DeleteModalConfig {
    let id = building.id;
    DeleteModalConfig::new(
        "Delete building",
        "All apartments, charges and complaints of this building will be removed.",
        building.name.clone(),
        confirm_fn(move || {
            let client = client.clone();
            async move {
                client.remove(id).await?;
                Ok::<bool, ActionError>(true)
            }
        }),
    )
    .confirm_text(building.name.clone())
}

fn whole(values: &FormValues, name: &str) -> Result<Option<u32>, BuildingError> {
    match values.number(name) {
        None => Ok(None),
        Some(n) if n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n) => Ok(Some(n as u32)),
        Some(n) => Err(BuildingError::Validation(format!("{name} must be a whole number, got {n}"))),
    }
}

impl BuildingCreate {
    pub fn from_form(values: &FormValues) -> Result<Self, BuildingError> {
        let text = |name: &str| {
            values
                .text(name)
                .map(str::to_string)
                .ok_or_else(|| BuildingError::Validation(format!("{name} is required")))
        };
        Ok(Self {
            name: text("name")?,
            address: text("address")?,
            floors: whole(values, "floors")?
                .ok_or_else(|| BuildingError::Validation("floors is required".to_string()))?,
            total_apartments: whole(values, "total_apartments")?,
            year_built: whole(values, "year_built")?,
        })
    }
}
