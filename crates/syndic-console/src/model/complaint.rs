//! Complaints ("réclamations") raised by residents and handled by the syndic.

use resource_framework::{merge_option, FilterSet, QueryParams, Scope};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

impl Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ComplaintStatus::Pending => "PENDING",
            ComplaintStatus::InProgress => "IN_PROGRESS",
            ComplaintStatus::Resolved => "RESOLVED",
            ComplaintStatus::Rejected => "REJECTED",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Person {
    /// "First Last" when known, the email otherwise.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            self.email.clone()
        } else {
            name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BuildingRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApartmentRef {
    pub id: u64,
    pub number: String,
    #[serde(default)]
    pub floor: i32,
    pub immeuble: BuildingRef,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Complaint {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub status: ComplaintStatus,
    pub priority: Priority,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub resident: Option<Person>,
    #[serde(default)]
    pub appartement: Option<ApartmentRef>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplaintCreate {
    pub title: String,
    pub content: String,
    pub priority: Priority,
    pub appartement_id: u64,
    pub resident_email: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComplaintUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComplaintAction {
    /// Answers the resident; the status defaults to in progress.
    Respond {
        response: String,
        status: Option<ComplaintStatus>,
    },
    MarkResolved,
    MarkInProgress,
    Reject { response: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplaintFilters {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub building_id: Option<Scope<u64>>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl FilterSet for ComplaintFilters {
    fn merge(&mut self, patch: Self) {
        merge_option(&mut self.search, patch.search);
        merge_option(&mut self.status, patch.status);
        merge_option(&mut self.priority, patch.priority);
        merge_option(&mut self.building_id, patch.building_id);
        merge_option(&mut self.date_from, patch.date_from);
        merge_option(&mut self.date_to, patch.date_to);
    }

    fn to_query(&self) -> Vec<(String, String)> {
        QueryParams::new()
            .push("search", self.search.as_ref())
            .push("status", self.status.as_ref())
            .push("priority", self.priority.as_ref())
            .push("building_id", self.building_id.as_ref())
            .push("date_from", self.date_from.as_ref())
            .push("date_to", self.date_to.as_ref())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PriorityCounts {
    pub urgent: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComplaintStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub rejected: usize,
    pub by_priority: PriorityCounts,
}

impl ComplaintStats {
    pub fn from_complaints(complaints: &[Complaint]) -> Self {
        let mut stats = ComplaintStats {
            total: complaints.len(),
            ..Default::default()
        };
        for complaint in complaints {
            match complaint.status {
                ComplaintStatus::Pending => stats.pending += 1,
                ComplaintStatus::InProgress => stats.in_progress += 1,
                ComplaintStatus::Resolved => stats.resolved += 1,
                ComplaintStatus::Rejected => stats.rejected += 1,
            }
            match complaint.priority {
                Priority::Urgent => stats.by_priority.urgent += 1,
                Priority::High => stats.by_priority.high += 1,
                Priority::Medium => stats.by_priority.medium += 1,
                Priority::Low => stats.by_priority.low += 1,
            }
        }
        stats
    }

    /// Complaints that still need attention.
    pub fn open(&self) -> usize {
        self.pending + self.in_progress
    }
}
