//! [`ResourceEntity`] implementation for [`Charge`].

use crate::model::{BulkChargeCreate, Cents, Charge, ChargeAction, ChargeCreate, ChargeFilters, ChargeStats, ChargeUpdate};
use resource_framework::{ApiRequest, Operation, ResourceEntity};
use serde::Serialize;

#[derive(Serialize)]
struct MarkPaidBody<'a> {
    paid_amount: Cents,
    #[serde(skip_serializing_if = "Option::is_none")]
    paid_date: Option<&'a str>,
}

impl ResourceEntity for Charge {
    type Id = u64;
    type Create = ChargeCreate;
    type Update = ChargeUpdate;
    type Action = ChargeAction;
    type BulkCreate = BulkChargeCreate;
    type Filters = ChargeFilters;
    type Stats = ChargeStats;

    const NAME: &'static str = "charge";
    const PATH: &'static str = "syndic/charges/";
    const BULK_CREATE_PATH: Option<&'static str> = Some("syndic/charges/bulk_create/");

    fn id(&self) -> u64 {
        self.id
    }

    fn derive_stats(records: &[Self]) -> ChargeStats {
        ChargeStats::from_charges(records)
    }

    fn action_request(id: &u64, action: &ChargeAction) -> Result<ApiRequest, serde_json::Error> {
        match action {
            ChargeAction::MarkPaid {
                paid_amount,
                paid_date,
            } => {
                let body = serde_json::to_value(MarkPaidBody {
                    paid_amount: *paid_amount,
                    paid_date: paid_date.as_deref(),
                })?;
                Ok(ApiRequest::post(format!("{}mark_paid/", Self::item_path(id))).with_body(body))
            }
        }
    }

    fn failure_message(op: Operation) -> String {
        match op {
            Operation::MarkStatus => "Failed to mark charge as paid".to_string(),
            Operation::Fetch => "Failed to fetch charges".to_string(),
            Operation::BulkCreate => "Failed to create charges".to_string(),
            Operation::Create => "Failed to create charge".to_string(),
            Operation::Update => "Failed to update charge".to_string(),
            Operation::Remove => "Failed to delete charge".to_string(),
            Operation::Refresh => "Failed to fetch charge".to_string(),
            Operation::Stats => "Failed to load charge statistics".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChargeStatus;
    use resource_framework::Method;
    use serde_json::json;

    fn charge(id: u64, amount: &str, status: ChargeStatus) -> Charge {
        serde_json::from_value(json!({
            "id": id,
            "appartement": 1,
            "description": "Monthly charge",
            "amount": amount,
            "due_date": "2024-12-31",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn stats_are_order_independent() {
        let mut charges = vec![
            charge(1, "100.00", ChargeStatus::Paid),
            charge(2, "50.00", ChargeStatus::Unpaid),
            charge(3, "75.00", ChargeStatus::Overdue),
        ];
        let forward = Charge::derive_stats(&charges);
        charges.reverse();
        let backward = Charge::derive_stats(&charges);
        charges.swap(0, 1);
        let shuffled = Charge::derive_stats(&charges);

        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
        assert_eq!(forward.total_amount, Cents(22500));
        assert_eq!(forward.paid_amount, Cents(10000));
        assert_eq!(forward.unpaid_amount, Cents(12500));
        assert_eq!(forward.overdue_amount, Cents(7500));
        assert_eq!((forward.paid, forward.unpaid, forward.overdue), (1, 1, 1));
        assert_eq!(forward.collection_rate, 44.4);
    }

    #[test]
    fn cent_sums_do_not_drift() {
        let charges: Vec<Charge> = (0..10)
            .map(|id| charge(id, "0.10", ChargeStatus::Unpaid))
            .collect();
        let stats = Charge::derive_stats(&charges);
        assert_eq!(stats.total_amount, Cents(100));
        assert_eq!(stats.total_amount.to_string(), "1.00");
    }

    #[test]
    fn partial_payment_counts_what_was_paid() {
        let mut partial = charge(1, "80.00", ChargeStatus::PartiallyPaid);
        partial.paid_amount = Cents(3000);
        let stats = Charge::derive_stats(&[partial]);
        assert_eq!(stats.paid_amount, Cents(3000));
        assert_eq!(stats.unpaid_amount, Cents(5000));
        assert_eq!(stats.partially_paid, 1);
    }

    #[test]
    fn mark_paid_request() {
        let request = Charge::action_request(
            &7,
            &ChargeAction::MarkPaid {
                paid_amount: Cents(50000),
                paid_date: Some("2024-12-15".into()),
            },
        )
        .unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "syndic/charges/7/mark_paid/");
        assert_eq!(
            request.body,
            Some(json!({ "paid_amount": 500.0, "paid_date": "2024-12-15" }))
        );
    }
}
