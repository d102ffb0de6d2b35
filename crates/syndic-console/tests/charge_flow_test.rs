use action_forms::{render, FieldOption, SubmitOutcome};
use resource_framework::mock::MockTransport;
use resource_framework::{ApiError, ControllerConfig, Method, ResourceClient};
use serde_json::{json, Value};
use std::time::Duration;
use syndic_console::charges::{self, ChargeError};
use syndic_console::clients::ChargeClient;
use resource_framework::Scope;
use syndic_console::model::{Cents, ChargeFilters, ChargeStatus};

fn charge(id: u64, amount: &str, status: &str) -> Value {
    json!({
        "id": id,
        "appartement": 10 + id,
        "apartment_number": format!("A{id}"),
        "building_name": "Residence Atlas",
        "description": format!("Charge {id}"),
        "amount": amount,
        "due_date": "2024-12-31",
        "status": status,
        "paid_amount": "0.00",
        "is_overdue": status == "OVERDUE",
    })
}

fn listing(items: Vec<Value>) -> Value {
    json!({ "success": true, "data": items, "count": items.len() })
}

fn start(mock: &MockTransport) -> ChargeClient {
    let (controller, client) = charges::new(ControllerConfig::default());
    tokio::spawn(controller.run(mock.transport()));
    client
}

#[tokio::test]
async fn test_stats_follow_the_list() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "syndic/charges/").return_json(listing(vec![
        charge(1, "100.00", "PAID"),
        charge(2, "50.00", "UNPAID"),
        charge(3, "75.00", "OVERDUE"),
    ]));
    mock.expect(Method::Delete, "syndic/charges/3/")
        .return_json(json!({ "success": true, "message": "Charge deleted successfully" }));

    let client = start(&mock);
    client.fetch(None).await.unwrap();

    let stats = client.stats();
    assert_eq!(stats.total_charges, 3);
    assert_eq!(stats.total_amount, Cents(22500));
    assert_eq!(stats.paid_amount, Cents(10000));
    assert_eq!(stats.unpaid_amount, Cents(12500));

    client.remove(3).await.unwrap();
    let state = client.state();
    assert_eq!(state.records.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(state.stats.unpaid_amount, Cents(5000));
    assert_eq!(state.stats.overdue_amount, Cents::ZERO);
    assert_eq!(state.success_message(), Some("Charge deleted successfully"));

    mock.verify();
}

#[tokio::test]
async fn test_status_filter_is_sent_and_all_is_not() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "syndic/charges/")
        .with_query(&[("status", "UNPAID")])
        .return_json(listing(vec![charge(2, "50.00", "UNPAID")]));
    mock.expect(Method::Get, "syndic/charges/")
        .with_query(&[("search", "water")])
        .return_json(listing(vec![]));

    let client = start(&mock);
    client
        .fetch(Some(ChargeFilters::status(ChargeStatus::Unpaid)))
        .await
        .unwrap();
    assert_eq!(client.state().records.len(), 1);

    client
        .fetch(Some(ChargeFilters {
            status: Some("all".into()),
            search: Some("water".into()),
            ..Default::default()
        }))
        .await
        .unwrap();
    assert!(client.state().records.is_empty());

    mock.verify();
}

#[tokio::test]
async fn test_building_filter_can_be_cleared() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "syndic/charges/")
        .with_query(&[("status", "UNPAID"), ("building_id", "3")])
        .return_json(listing(vec![charge(2, "50.00", "UNPAID")]));
    mock.expect(Method::Get, "syndic/charges/")
        .with_query(&[("status", "UNPAID")])
        .return_json(listing(vec![charge(2, "50.00", "UNPAID"), charge(4, "80.00", "UNPAID")]));

    let client = start(&mock);
    client
        .fetch(Some(ChargeFilters {
            status: Some("UNPAID".into()),
            ..ChargeFilters::building(3)
        }))
        .await
        .unwrap();

    client
        .fetch(Some(ChargeFilters {
            building_id: Some(Scope::All),
            ..Default::default()
        }))
        .await
        .unwrap();

    let state = client.state();
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.filters.building_id, Some(Scope::All));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_create_charge_through_modal() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "syndic/charges/")
        .return_json(listing(vec![charge(1, "100.00", "PAID")]));
    mock.expect(Method::Post, "syndic/charges/").return_json(json!({
        "success": true,
        "message": "Charge created successfully",
        "data": charge(2, "120.00", "UNPAID"),
    }));

    let client = start(&mock);
    client.fetch(None).await.unwrap();

    let modal = charges::create_charge_modal(
        client.clone(),
        vec![
            FieldOption::new("11", "Residence Atlas - A1"),
            FieldOption::new("12", "Residence Atlas - A2"),
        ],
    )
    .unwrap();
    let mut form = modal.open();

    // Nothing reaches the server while the form is invalid.
    assert_eq!(form.submit(&modal).await, SubmitOutcome::Invalid);
    assert_eq!(mock.requests().len(), 1);

    form.set_value(&modal.fields, "appartement", "12").unwrap();
    form.set_value(&modal.fields, "description", "Elevator maintenance").unwrap();
    form.set_value(&modal.fields, "amount", "120").unwrap();
    form.set_value(&modal.fields, "due_date", "2024-12-31").unwrap();
    assert_eq!(form.submit(&modal).await, SubmitOutcome::Accepted);

    let sent = &mock.requests()[1];
    assert_eq!(
        sent.body,
        Some(json!({
            "appartement": 12,
            "description": "Elevator maintenance",
            "amount": 120.0,
            "due_date": "2024-12-31",
        }))
    );

    let state = client.state();
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.stats.total_amount, Cents(22000));
    assert_eq!(state.success_message(), Some("Charge created successfully"));
    assert!(render(&form, &modal).fields.iter().all(|f| f.error.is_none()));

    tokio::time::sleep(Duration::from_millis(2_990)).await;
    assert_eq!(
        client.snapshot().await.unwrap().success_message(),
        Some("Charge created successfully")
    );
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(client.snapshot().await.unwrap().notice.is_none());

    mock.verify();
}

#[tokio::test]
async fn test_edit_modal_refuses_to_blank_a_field() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "syndic/charges/")
        .return_json(listing(vec![charge(1, "100.00", "UNPAID")]));
    mock.expect(Method::Put, "syndic/charges/1/").return_json(json!({
        "success": true,
        "data": charge(1, "100.00", "UNPAID"),
    }));

    let client = start(&mock);
    client.fetch(None).await.unwrap();

    let target = client.state().records[0].clone();
    let modal = charges::edit_charge_modal(client.clone(), &target).unwrap();
    let mut form = modal.open();

    form.set_value(&modal.fields, "description", "").unwrap();
    assert_eq!(form.submit(&modal).await, SubmitOutcome::Invalid);
    assert_eq!(form.error("description"), Some("Description is required"));
    assert_eq!(mock.requests().len(), 1);

    form.set_value(&modal.fields, "description", "Elevator repair").unwrap();
    assert_eq!(form.submit(&modal).await, SubmitOutcome::Accepted);
    let body = mock.requests()[1].body.clone().unwrap();
    assert_eq!(body["description"], "Elevator repair");
    assert_eq!(body["due_date"], "2024-12-31");
    mock.verify();
}

#[tokio::test]
async fn test_failed_create_keeps_the_modal_open() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "syndic/charges/").return_err(ApiError::Status {
        status: 400,
        body: Some(json!({ "error": "Apartment does not belong to you" })),
    });

    let client = start(&mock);
    let modal = charges::create_charge_modal(client.clone(), vec![FieldOption::new("99", "Other")]).unwrap();
    let mut form = modal.open();
    form.set_value(&modal.fields, "appartement", "99").unwrap();
    form.set_value(&modal.fields, "description", "Parking").unwrap();
    form.set_value(&modal.fields, "amount", 35.0).unwrap();
    form.set_value(&modal.fields, "due_date", "2024-11-30").unwrap();

    let outcome = form.submit(&modal).await;
    let SubmitOutcome::Failed(error) = outcome else {
        panic!("expected a failed submit, got {outcome:?}");
    };
    assert_eq!(error.message, "Apartment does not belong to you");
    assert_eq!(form.values.text("description"), Some("Parking"));
    assert_eq!(client.state().error(), Some("Apartment does not belong to you"));
}

#[tokio::test]
async fn test_mark_paid_replaces_the_record_in_place() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "syndic/charges/").return_json(listing(vec![
        charge(1, "100.00", "UNPAID"),
        charge(2, "50.00", "UNPAID"),
    ]));
    let mut paid = charge(1, "100.00", "PAID");
    paid["paid_amount"] = json!("100.00");
    mock.expect(Method::Post, "syndic/charges/1/mark_paid/").return_json(json!({
        "success": true,
        "message": "Charge marked as paid",
        "data": paid,
    }));

    let client = start(&mock);
    client.fetch(None).await.unwrap();

    let target = client.state().records[0].clone();
    let modal = charges::mark_paid_modal(client.clone(), &target).unwrap();
    let mut form = modal.open();
    assert_eq!(form.values.number("paid_amount"), Some(100.0));
    assert_eq!(form.submit(&modal).await, SubmitOutcome::Accepted);

    let state = client.state();
    assert_eq!(state.records[0].status, ChargeStatus::Paid);
    assert_eq!(state.records[1].id, 2);
    assert_eq!(state.stats.paid_amount, Cents(10000));
    assert_eq!(state.success_message(), Some("Charge marked as paid"));
    assert_eq!(
        mock.requests()[1].body,
        Some(json!({ "paid_amount": 100.0 }))
    );
}

#[tokio::test]
async fn test_mark_paid_failure_uses_the_charge_fallback() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "syndic/charges/5/mark_paid/").return_err(ApiError::Status {
        status: 500,
        body: None,
    });

    let client = start(&mock);
    let err = client.mark_paid(5, Cents(1000), None).await.unwrap_err();
    assert_eq!(err, ChargeError::Request("Failed to mark charge as paid".into()));
}

#[tokio::test]
async fn test_bulk_create_reloads_with_current_filters() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "syndic/charges/")
        .with_query(&[("building_id", "4")])
        .return_json(listing(vec![]));
    mock.expect(Method::Post, "syndic/charges/bulk_create/")
        .return_json(json!({ "success": true, "message": "2 charges created successfully" }));
    mock.expect(Method::Get, "syndic/charges/")
        .with_query(&[("building_id", "4")])
        .return_json(listing(vec![charge(7, "60.00", "UNPAID"), charge(8, "60.00", "UNPAID")]));

    let client = start(&mock);
    client
        .fetch(Some(ChargeFilters::building(4)))
        .await
        .unwrap();

    let modal = charges::bulk_charge_modal(client.clone(), vec![FieldOption::new("4", "Residence Atlas")]).unwrap();
    let mut form = modal.open();
    form.set_value(&modal.fields, "building_id", "4").unwrap();
    form.set_value(&modal.fields, "description", "Monthly charge - December 2024").unwrap();
    form.set_value(&modal.fields, "due_date", "2024-12-31").unwrap();
    assert_eq!(form.submit(&modal).await, SubmitOutcome::Accepted);

    let state = client.state();
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.stats.unpaid_amount, Cents(12000));
    assert_eq!(state.success_message(), Some("2 charges created successfully"));
    mock.verify();
}
