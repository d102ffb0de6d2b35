mod common;

use common::*;
use resource_framework::mock::MockTransport;
use resource_framework::{ApiError, ControllerError, FetchOutcome, Method, Notice};
use serde_json::json;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_latest_fetch_wins_when_responses_arrive_out_of_order() {
    let mock = MockTransport::new();
    // Slow response for the first filter, fast one for the second.
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "open")])
        .delay(Duration::from_millis(500))
        .return_json(list(vec![ticket(1, "Leak", "open")]));
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "closed")])
        .delay(Duration::from_millis(100))
        .return_json(list(vec![ticket(2, "Lift", "closed")]));

    let client = spawn_controller::<Ticket>(&mock);

    let (first, second) = tokio::join!(
        client.fetch(Some(TicketFilters::status("open"))),
        client.fetch(Some(TicketFilters::status("closed"))),
    );
    assert_eq!(first.unwrap(), FetchOutcome::Superseded);
    assert_eq!(second.unwrap(), FetchOutcome::Applied);

    let state = client.snapshot().await.unwrap();
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.records[0].id, 2);
    assert_eq!(state.filters.status.as_deref(), Some("closed"));
    assert!(!state.loading);
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_stale_failure_is_ignored() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "open")])
        .delay(Duration::from_millis(500))
        .return_err(ApiError::Transport("timeout".into()));
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "closed")])
        .return_json(list(vec![ticket(2, "Lift", "closed")]));

    let client = spawn_controller::<Ticket>(&mock);
    let (first, second) = tokio::join!(
        client.fetch(Some(TicketFilters::status("open"))),
        client.fetch(Some(TicketFilters::status("closed"))),
    );
    assert_eq!(first.unwrap(), FetchOutcome::Superseded);
    assert_eq!(second.unwrap(), FetchOutcome::Applied);
    assert!(client.snapshot().await.unwrap().error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_second_mutation_on_same_record_is_busy() {
    let mock = MockTransport::new();
    mock.expect(Method::Put, "tickets/1/")
        .delay(Duration::from_millis(300))
        .return_json(json!({ "success": true, "data": ticket(1, "Renamed", "open") }));

    let client = spawn_controller::<Ticket>(&mock);
    let (update, remove) = tokio::join!(
        client.update(
            1,
            TicketUpdate {
                title: "Renamed".into()
            }
        ),
        client.remove(1),
    );
    assert!(update.is_ok());
    assert_eq!(remove.unwrap_err(), ControllerError::Busy("1".into()));

    let state = client.snapshot().await.unwrap();
    assert!(!state.is_pending(&1));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_pending_ids_are_published() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "tickets/4/close/")
        .delay(Duration::from_millis(300))
        .return_json(json!({ "success": true, "data": ticket(4, "Gate", "closed") }));

    let client = spawn_controller::<Ticket>(&mock);
    let mut updates = client.subscribe();
    let worker = client.clone();
    let action = tokio::spawn(async move { worker.mark_status(4, TicketAction::Close).await });

    updates.wait_for(|state| state.is_pending(&4)).await.unwrap();
    action.await.unwrap().unwrap();
    assert!(client.current().pending.is_empty());
    // Not in the list before, so the transition adds nothing to it.
    assert!(client.current().records.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_error_notice_expires_after_ttl() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "tickets/").return_err(ApiError::Status {
        status: 422,
        body: Some(json!({ "message": "Title is required" })),
    });

    let client = spawn_controller::<Ticket>(&mock);
    client
        .create(TicketCreate { title: "".into() })
        .await
        .unwrap_err();

    tokio::time::sleep(Duration::from_millis(4_990)).await;
    assert_eq!(client.snapshot().await.unwrap().error(), Some("Title is required"));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(client.snapshot().await.unwrap().notice.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_new_notice_restarts_countdown() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "tickets/")
        .return_json(json!({ "success": true, "data": ticket(1, "Leak", "open") }));
    mock.expect(Method::Post, "tickets/").return_json(json!({
        "success": true,
        "message": "Second ticket",
        "data": ticket(2, "Lift", "open"),
    }));

    let client = spawn_controller::<Ticket>(&mock);
    client
        .create(TicketCreate {
            title: "Leak".into(),
        })
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(2_000)).await;
    client
        .create(TicketCreate {
            title: "Lift".into(),
        })
        .await
        .unwrap();

    // The first countdown would have cleared the slot at 3s.
    tokio::time::sleep(Duration::from_millis(2_000)).await;
    assert_eq!(
        client.snapshot().await.unwrap().notice,
        Some(Notice::Success("Second ticket".into()))
    );

    tokio::time::sleep(Duration::from_millis(1_100)).await;
    assert!(client.snapshot().await.unwrap().notice.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_dismiss_cancels_countdown() {
    let mock = MockTransport::new();
    mock.expect(Method::Post, "tickets/")
        .return_json(json!({ "success": true, "data": ticket(1, "Leak", "open") }));
    mock.expect(Method::Post, "tickets/").return_err(ApiError::Transport("offline".into()));

    let client = spawn_controller::<Ticket>(&mock);
    client
        .create(TicketCreate {
            title: "Leak".into(),
        })
        .await
        .unwrap();
    client.dismiss_notice().await.unwrap();
    assert!(client.current().notice.is_none());

    // A later error must not be cleared by the dismissed notice's timer.
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    client
        .create(TicketCreate {
            title: "Lift".into(),
        })
        .await
        .unwrap_err();
    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(client.current().error(), Some("offline"));
}

#[tokio::test]
async fn test_malformed_list_yields_empty_records() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "tickets/")
        .return_json(list(vec![ticket(1, "Leak", "open")]));
    mock.expect(Method::Get, "tickets/")
        .return_json(json!({ "success": true, "results": "unexpected" }));

    let client = spawn_controller::<Ticket>(&mock);
    client.fetch(None).await.unwrap();
    assert_eq!(client.current().records.len(), 1);

    assert_eq!(client.fetch(None).await.unwrap(), FetchOutcome::Applied);
    let state = client.snapshot().await.unwrap();
    assert!(state.records.is_empty());
    assert_eq!(state.stats, TicketStats::default());
    assert!(state.error().is_none());
    mock.verify();
}

#[tokio::test]
async fn test_reply_without_record_reloads_list() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "open")])
        .return_json(list(vec![ticket(1, "Leak", "open")]));
    mock.expect(Method::Put, "tickets/1/")
        .return_json(json!({ "success": true, "message": "Saved" }));
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "open")])
        .return_json(list(vec![ticket(1, "Roof leak", "open")]));

    let client = spawn_controller::<Ticket>(&mock);
    client.fetch(Some(TicketFilters::status("open"))).await.unwrap();

    let updated = client
        .update(
            1,
            TicketUpdate {
                title: "Roof leak".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.unwrap().title, "Roof leak");

    let state = client.snapshot().await.unwrap();
    assert_eq!(state.records[0].title, "Roof leak");
    assert_eq!(state.success_message(), Some("Saved"));
    mock.verify();
}

#[tokio::test]
async fn test_update_outside_current_list_leaves_list_alone() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "tickets/")
        .return_json(list(vec![ticket(1, "Leak", "open")]));
    mock.expect(Method::Put, "tickets/7/")
        .return_json(json!({ "success": true, "data": ticket(7, "Gate", "open") }));

    let client = spawn_controller::<Ticket>(&mock);
    client.fetch(None).await.unwrap();
    let updated = client
        .update(
            7,
            TicketUpdate {
                title: "Gate".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.unwrap().id, 7);

    let state = client.snapshot().await.unwrap();
    assert_eq!(state.records.len(), 1);
    assert_eq!(state.success_message(), Some("Ticket updated successfully"));
}

#[tokio::test(start_paused = true)]
async fn test_bulk_reload_does_not_overwrite_newer_fetch() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "open")])
        .return_json(list(vec![ticket(1, "Leak", "open")]));
    mock.expect(Method::Post, "tickets/bulk/")
        .return_json(json!({ "success": true, "message": "1 ticket created" }));
    // The reload still uses the filters in place when the bulk create started.
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "open")])
        .delay(Duration::from_millis(500))
        .return_json(list(vec![ticket(1, "Leak", "open"), ticket(3, "Door", "open")]));
    mock.expect(Method::Get, "tickets/")
        .with_query(&[("status", "closed")])
        .delay(Duration::from_millis(100))
        .return_json(list(vec![ticket(2, "Lift", "closed")]));

    let client = spawn_controller::<Ticket>(&mock);
    client.fetch(Some(TicketFilters::status("open"))).await.unwrap();

    let (bulk, fetched) = tokio::join!(
        client.bulk_create(vec![TicketCreate {
            title: "Door".into()
        }]),
        client.fetch(Some(TicketFilters::status("closed"))),
    );
    assert!(bulk.is_ok());
    assert_eq!(fetched.unwrap(), FetchOutcome::Applied);

    let state = client.snapshot().await.unwrap();
    assert_eq!(state.filters.status.as_deref(), Some("closed"));
    assert_eq!(state.records.len(), 1);
    assert!(state.records.iter().all(|t| t.status == "closed"));
    assert_eq!(state.stats.open, 0);
    assert_eq!(state.success_message(), Some("1 ticket created"));
    mock.verify();
}

#[tokio::test(start_paused = true)]
async fn test_bulk_reload_supersedes_older_fetch() {
    let mock = MockTransport::new();
    mock.expect(Method::Get, "tickets/")
        .delay(Duration::from_millis(500))
        .return_json(list(vec![ticket(1, "Leak", "open")]));
    mock.expect(Method::Post, "tickets/bulk/")
        .return_json(json!({ "success": true, "message": "1 ticket created" }));
    mock.expect(Method::Get, "tickets/")
        .return_json(list(vec![ticket(1, "Leak", "open"), ticket(3, "Door", "open")]));

    let client = spawn_controller::<Ticket>(&mock);
    let (fetched, bulk) = tokio::join!(
        client.fetch(None),
        client.bulk_create(vec![TicketCreate {
            title: "Door".into()
        }]),
    );
    assert!(bulk.is_ok());
    assert_eq!(fetched.unwrap(), FetchOutcome::Superseded);

    let state = client.snapshot().await.unwrap();
    assert_eq!(state.records.len(), 2);
    assert!(!state.loading);
    mock.verify();
}
