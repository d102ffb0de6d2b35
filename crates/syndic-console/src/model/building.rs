use resource_framework::{merge_option, FilterSet, QueryParams};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingStatus {
    Active,
    Inactive,
    Maintenance,
}

impl Display for BuildingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildingStatus::Active => "active",
            BuildingStatus::Inactive => "inactive",
            BuildingStatus::Maintenance => "maintenance",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Building {
    pub id: u64,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub total_apartments: u32,
    #[serde(default)]
    pub occupied_apartments: u32,
    #[serde(default)]
    pub year_built: Option<u32>,
    #[serde(default)]
    pub floors: u32,
    pub status: BuildingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildingCreate {
    pub name: String,
    pub address: String,
    pub floors: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_apartments: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_built: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupied_apartments: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildingAction {
    SetStatus(BuildingStatus),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildingFilters {
    pub search: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl FilterSet for BuildingFilters {
    fn merge(&mut self, patch: Self) {
        merge_option(&mut self.search, patch.search);
        merge_option(&mut self.status, patch.status);
        merge_option(&mut self.date_from, patch.date_from);
        merge_option(&mut self.date_to, patch.date_to);
    }

    fn to_query(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .push("search", self.search.as_ref())
            .push("status", self.status.as_ref())
            .push("date_from", self.date_from.as_ref())
            .push("date_to", self.date_to.as_ref())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BuildingStats {
    pub total_buildings: usize,
    pub total_apartments: u64,
    pub occupied_apartments: u64,
    /// Occupied share of all apartments, in percent with one decimal.
    pub average_occupancy: f64,
    pub active_buildings: usize,
    pub inactive_buildings: usize,
}

impl BuildingStats {
    pub fn from_buildings(buildings: &[Building]) -> Self {
        let total_apartments: u64 = buildings.iter().map(|b| u64::from(b.total_apartments)).sum();
        let occupied_apartments: u64 = buildings
            .iter()
            .map(|b| u64::from(b.occupied_apartments))
            .sum();
        let average_occupancy = if total_apartments == 0 {
            0.0
        } else {
            ((occupied_apartments * 1000 + total_apartments / 2) / total_apartments) as f64 / 10.0
        };
        BuildingStats {
            total_buildings: buildings.len(),
            total_apartments,
            occupied_apartments,
            average_occupancy,
            active_buildings: buildings
                .iter()
                .filter(|b| b.status == BuildingStatus::Active)
                .count(),
            inactive_buildings: buildings
                .iter()
                .filter(|b| b.status != BuildingStatus::Active)
                .count(),
        }
    }
}
