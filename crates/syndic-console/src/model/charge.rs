//! Charges billed to apartments.
//!
//! # Resource Framework
//! [`Charge`] implements [`ResourceEntity`](resource_framework::ResourceEntity) in
//! [`crate::charges`], which makes it manageable by a
//! [`CollectionController`](resource_framework::CollectionController).

use crate::model::Cents;
use resource_framework::{merge_option, FilterSet, QueryParams, Scope};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeStatus {
    Unpaid,
    Paid,
    Overdue,
    PartiallyPaid,
}

impl ChargeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ChargeStatus::Unpaid => "UNPAID",
            ChargeStatus::Paid => "PAID",
            ChargeStatus::Overdue => "OVERDUE",
            ChargeStatus::PartiallyPaid => "PARTIALLY_PAID",
        }
    }
}

impl Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Charge {
    pub id: u64,
    pub appartement: u64,
    #[serde(default)]
    pub apartment_number: String,
    #[serde(default)]
    pub building_name: String,
    #[serde(default)]
    pub resident_email: Option<String>,
    #[serde(default)]
    pub resident_name: Option<String>,
    pub description: String,
    pub amount: Cents,
    pub due_date: String,
    pub status: ChargeStatus,
    #[serde(default)]
    pub paid_amount: Cents,
    #[serde(default)]
    pub paid_date: Option<String>,
    #[serde(default)]
    pub is_overdue: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Charge {
    /// What has been collected on this charge. A charge marked paid without a recorded
    /// payment counts as paid in full.
    pub fn collected(&self) -> Cents {
        match self.status {
            ChargeStatus::Paid if self.paid_amount.is_zero() => self.amount,
            ChargeStatus::Paid | ChargeStatus::PartiallyPaid => self.paid_amount,
            ChargeStatus::Unpaid | ChargeStatus::Overdue => Cents::ZERO,
        }
    }

    /// What is still owed, never negative.
    pub fn outstanding(&self) -> Cents {
        match self.status {
            ChargeStatus::Paid => Cents::ZERO,
            _ => (self.amount - self.collected()).max(Cents::ZERO),
        }
    }

    pub fn overdue(&self) -> bool {
        self.status == ChargeStatus::Overdue || (self.is_overdue && self.status != ChargeStatus::Paid)
    }
}

/// Payload for creating a charge.
#[derive(Debug, Clone, Serialize)]
pub struct ChargeCreate {
    pub appartement: u64,
    pub description: String,
    pub amount: Cents,
    pub due_date: String,
}

/// Payload for updating a charge. Absent fields are not sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChargeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Cents>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ChargeStatus>,
}

/// Status transitions with their own endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ChargeAction {
    /// Records a payment. The server marks the charge paid or partially paid depending
    /// on the amount.
    MarkPaid {
        paid_amount: Cents,
        paid_date: Option<String>,
    },
}

/// Creates one charge per apartment of a building.
#[derive(Debug, Clone, Serialize)]
pub struct BulkChargeCreate {
    pub building_id: u64,
    pub description: String,
    pub due_date: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeFilters {
    /// A status name or `"all"`.
    pub status: Option<String>,
    pub search: Option<String>,
    /// `Scope::All` drops a building set by an earlier fetch.
    pub building_id: Option<Scope<u64>>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl ChargeFilters {
    pub fn status(status: ChargeStatus) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    pub fn building(building_id: u64) -> Self {
        Self {
            building_id: Some(Scope::Only(building_id)),
            ..Default::default()
        }
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Default::default()
        }
    }
}

impl FilterSet for ChargeFilters {
    fn merge(&mut self, patch: Self) {
        merge_option(&mut self.status, patch.status);
        merge_option(&mut self.search, patch.search);
        merge_option(&mut self.building_id, patch.building_id);
        merge_option(&mut self.date_from, patch.date_from);
        merge_option(&mut self.date_to, patch.date_to);
    }

    fn to_query(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .push("status", self.status.as_ref())
            .push("search", self.search.as_ref())
            .push("building_id", self.building_id.as_ref())
            .push("date_from", self.date_from.as_ref())
            .push("date_to", self.date_to.as_ref())
            .finish()
    }
}

/// Aggregates over the loaded charges. Amounts are summed in cents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChargeStats {
    pub total_charges: usize,
    pub paid: usize,
    pub unpaid: usize,
    pub overdue: usize,
    pub partially_paid: usize,
    pub total_amount: Cents,
    pub paid_amount: Cents,
    pub unpaid_amount: Cents,
    pub overdue_amount: Cents,
    /// Collected share of the total, in percent with one decimal.
    pub collection_rate: f64,
}

impl ChargeStats {
    pub fn from_charges(charges: &[Charge]) -> Self {
        let mut stats = ChargeStats {
            total_charges: charges.len(),
            ..Default::default()
        };
        for charge in charges {
            match charge.status {
                ChargeStatus::Paid => stats.paid += 1,
                ChargeStatus::Unpaid => stats.unpaid += 1,
                ChargeStatus::Overdue => stats.overdue += 1,
                ChargeStatus::PartiallyPaid => stats.partially_paid += 1,
            }
            if charge.overdue() {
                stats.overdue_amount = stats.overdue_amount + charge.outstanding();
            }
        }
        stats.total_amount = charges.iter().map(|c| c.amount).sum();
        stats.paid_amount = charges.iter().map(Charge::collected).sum();
        stats.unpaid_amount = charges.iter().map(Charge::outstanding).sum();
        stats.collection_rate = stats.paid_amount.percent_of(stats.total_amount);
        stats
    }
}
