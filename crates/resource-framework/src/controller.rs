//! # Generic Collection Controller
//!
//! This module defines the `CollectionController`, the task that owns one resource's
//! in-memory collection. It implements the "server" side of the actor pattern: requests
//! arrive over a channel and are processed one at a time, so the records, filters,
//! statistics and notice never need a lock.
//!
//! Network I/O never blocks the loop. Each request to the backend runs in its own task
//! and posts a completion back to the controller, which applies completions in the order
//! they arrive. That gives the ordering rules the dashboard relies on:
//!
//! * **Fetch** is last-write-wins by issue order. Every fetch gets a sequence number and a
//!   response whose number is not the latest issued is dropped.
//! * **Reloads** triggered by a mutation follow the same rule: a reload is applied only if
//!   no fetch was issued after the mutation started.
//! * **Mutations** reconcile their server response into the list as soon as it arrives:
//!   create appends (or replaces a record with the same id), update and status changes
//!   replace in place, delete filters the id out. Statistics are recomputed before the
//!   caller is answered, so a caller never reads a stale list after a mutation returns.
//! * **Notices** live in a single slot with one expiry timer; a new notice cancels the
//!   previous countdown.

use crate::client::CollectionClient;
use crate::config::ControllerConfig;
use crate::entity::{Operation, ResourceEntity, StatsSource};
use crate::envelope::{self, Payload};
use crate::error::{ApiError, ControllerError};
use crate::filters::FilterSet;
use crate::message::{ControllerRequest, FetchOutcome, Response};
use crate::notice::{Notice, NoticeTimer};
use crate::state::CollectionState;
use crate::transport::{ApiRequest, Transport};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

struct Listing<T: ResourceEntity> {
    records: Vec<T>,
    stats: Option<Result<T::Stats, ApiError>>,
}

/// How a successful mutation changes the local list.
enum Effect<T: ResourceEntity> {
    Upsert(T),
    Replace(T),
    Removed(T::Id),
    Reload(Vec<T>),
}

struct MutationOutcome<T: ResourceEntity> {
    effect: Effect<T>,
    message: Option<String>,
    stats: Option<Result<T::Stats, ApiError>>,
}

/// What a mutation's response body is expected to contain.
enum Expect<T: ResourceEntity> {
    Record { insert: bool },
    Removal(T::Id),
    Reload,
}

enum Responder<T: ResourceEntity> {
    Record(Response<Option<T>>),
    Unit(Response<()>),
}

impl<T: ResourceEntity> Responder<T> {
    fn succeed(self, record: Option<T>) {
        match self {
            Responder::Record(respond_to) => {
                let _ = respond_to.send(Ok(record));
            }
            Responder::Unit(respond_to) => {
                let _ = respond_to.send(Ok(()));
            }
        }
    }

    fn fail(self, error: ControllerError) {
        match self {
            Responder::Record(respond_to) => {
                let _ = respond_to.send(Err(error));
            }
            Responder::Unit(respond_to) => {
                let _ = respond_to.send(Err(error));
            }
        }
    }
}

/// Results posted back to the controller by request tasks and the notice timer.
enum Completion<T: ResourceEntity> {
    Fetched {
        seq: u64,
        result: Result<Listing<T>, ApiError>,
        respond_to: Response<FetchOutcome>,
    },
    Mutated {
        op: Operation,
        id: Option<T::Id>,
        reload_seq: u64,
        result: Result<MutationOutcome<T>, ApiError>,
        respond_to: Responder<T>,
    },
    StatsLoaded {
        result: Option<Result<T::Stats, ApiError>>,
        respond_to: Response<T::Stats>,
    },
    NoticeExpired {
        generation: u64,
    },
}

/// The task that owns one resource collection.
///
/// # Usage Pattern
///
/// 1.  **Create**: `CollectionController::new(config)` returns the controller and its client.
/// 2.  **Run**: spawn `controller.run(transport)`; the transport is injected here, not at
///     construction, so clients can be handed out before the backend is wired.
/// 3.  **Use**: call the client from any task. Dropping every client (or calling
///     [`CollectionClient::shutdown`]) stops the controller, aborting in-flight requests
///     and the notice timer.
///
/// ```rust,ignore
/// let (controller, charges) = CollectionController::<Charge>::new(ControllerConfig::default());
/// tokio::spawn(controller.run(transport));
///
/// charges.fetch(Some(ChargeFilters::status(ChargeStatus::Unpaid))).await?;
/// let snapshot = charges.snapshot().await?;
/// ```
pub struct CollectionController<T: ResourceEntity> {
    receiver: mpsc::Receiver<ControllerRequest<T>>,
    completions: mpsc::UnboundedReceiver<Completion<T>>,
    completion_sender: mpsc::UnboundedSender<Completion<T>>,
    publisher: watch::Sender<CollectionState<T>>,
    state: CollectionState<T>,
    config: ControllerConfig,
    latest_fetch: u64,
    timer: NoticeTimer,
    tasks: JoinSet<()>,
}

impl<T: ResourceEntity> CollectionController<T> {
    /// Creates a controller and the client used to talk to it.
    pub fn new(config: ControllerConfig) -> (Self, CollectionClient<T>) {
        let (sender, receiver) = mpsc::channel(config.mailbox_size);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let state = CollectionState::default();
        let (publisher, snapshots) = watch::channel(state.clone());
        let controller = Self {
            receiver,
            completions,
            completion_sender,
            publisher,
            state,
            config,
            latest_fetch: 0,
            timer: NoticeTimer::default(),
            tasks: JoinSet::new(),
        };
        (controller, CollectionClient::new(sender, snapshots))
    }

    /// Runs the controller loop until every client is dropped or shutdown is requested.
    pub async fn run(mut self, transport: Arc<dyn Transport>) {
        info!(resource = T::NAME, "Controller started");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(ControllerRequest::Shutdown) | None => break,
                    Some(request) => self.handle_request(request, &transport),
                },
                Some(completion) = self.completions.recv() => self.handle_completion(completion),
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    if let Err(e) = joined {
                        if e.is_panic() {
                            warn!(resource = T::NAME, error = %e, "Request task panicked");
                        }
                    }
                }
            }
        }

        self.tasks.abort_all();
        self.timer.cancel();
        info!(
            resource = T::NAME,
            size = self.state.records.len(),
            "Shutdown"
        );
    }

    fn handle_request(&mut self, request: ControllerRequest<T>, transport: &Arc<dyn Transport>) {
        match request {
            ControllerRequest::Fetch {
                filters,
                respond_to,
            } => self.start_fetch(transport, filters, respond_to),
            ControllerRequest::Create { input, respond_to } => {
                debug!(resource = T::NAME, ?input, "Create");
                match encode(&input) {
                    Ok(body) => self.start_mutation(
                        transport,
                        Operation::Create,
                        None,
                        ApiRequest::post(T::PATH).with_body(body),
                        Expect::Record { insert: true },
                        Responder::Record(respond_to),
                    ),
                    Err(e) => Responder::Record(respond_to).fail(e),
                }
            }
            ControllerRequest::Update {
                id,
                patch,
                respond_to,
            } => {
                debug!(resource = T::NAME, %id, ?patch, "Update");
                match encode(&patch) {
                    Ok(body) => {
                        let request =
                            ApiRequest::new(T::UPDATE_METHOD, T::item_path(&id)).with_body(body);
                        self.start_mutation(
                            transport,
                            Operation::Update,
                            Some(id),
                            request,
                            Expect::Record { insert: false },
                            Responder::Record(respond_to),
                        )
                    }
                    Err(e) => Responder::Record(respond_to).fail(e),
                }
            }
            ControllerRequest::Remove { id, respond_to } => {
                debug!(resource = T::NAME, %id, "Remove");
                let request = ApiRequest::delete(T::item_path(&id));
                self.start_mutation(
                    transport,
                    Operation::Remove,
                    Some(id.clone()),
                    request,
                    Expect::Removal(id),
                    Responder::Unit(respond_to),
                )
            }
            ControllerRequest::MarkStatus {
                id,
                action,
                respond_to,
            } => {
                debug!(resource = T::NAME, %id, ?action, "MarkStatus");
                match T::action_request(&id, &action) {
                    Ok(request) => self.start_mutation(
                        transport,
                        Operation::MarkStatus,
                        Some(id),
                        request,
                        Expect::Record { insert: false },
                        Responder::Record(respond_to),
                    ),
                    Err(e) => Responder::Record(respond_to).fail(ControllerError::Encode(e.to_string())),
                }
            }
            ControllerRequest::BulkCreate { input, respond_to } => {
                let Some(path) = T::BULK_CREATE_PATH else {
                    warn!(resource = T::NAME, "Bulk create requested but not supported");
                    let _ = respond_to.send(Err(ControllerError::Unsupported(format!(
                        "bulk create for {}",
                        T::plural()
                    ))));
                    return;
                };
                debug!(resource = T::NAME, ?input, "BulkCreate");
                match encode(&input) {
                    Ok(body) => self.start_mutation(
                        transport,
                        Operation::BulkCreate,
                        None,
                        ApiRequest::post(path).with_body(body),
                        Expect::Reload,
                        Responder::Unit(respond_to),
                    ),
                    Err(e) => Responder::<T>::Unit(respond_to).fail(e),
                }
            }
            ControllerRequest::Refresh { id, respond_to } => {
                debug!(resource = T::NAME, %id, "Refresh");
                self.start_mutation(
                    transport,
                    Operation::Refresh,
                    None,
                    ApiRequest::get(T::item_path(&id)),
                    Expect::Record { insert: true },
                    Responder::Record(respond_to),
                )
            }
            ControllerRequest::RefreshStats { respond_to } => {
                let transport = Arc::clone(transport);
                let completions = self.completion_sender.clone();
                self.tasks.spawn(async move {
                    let result = load_server_stats::<T>(transport.as_ref()).await;
                    let _ = completions.send(Completion::StatsLoaded { result, respond_to });
                });
            }
            ControllerRequest::Snapshot { respond_to } => {
                let _ = respond_to.send(Ok(self.state.clone()));
            }
            ControllerRequest::ClearError { respond_to } => {
                if self.state.notice.as_ref().is_some_and(Notice::is_error) {
                    self.clear_notice();
                    self.publish();
                }
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::DismissNotice { respond_to } => {
                self.clear_notice();
                self.publish();
                let _ = respond_to.send(Ok(()));
            }
            // Handled by the run loop.
            ControllerRequest::Shutdown => {}
        }
    }

    fn handle_completion(&mut self, completion: Completion<T>) {
        match completion {
            Completion::Fetched {
                seq,
                result,
                respond_to,
            } => self.finish_fetch(seq, result, respond_to),
            Completion::Mutated {
                op,
                id,
                reload_seq,
                result,
                respond_to,
            } => self.finish_mutation(op, id, reload_seq, result, respond_to),
            Completion::StatsLoaded { result, respond_to } => {
                self.apply_stats(result);
                self.publish();
                let _ = respond_to.send(Ok(self.state.stats.clone()));
            }
            Completion::NoticeExpired { generation } => {
                if self.timer.is_current(generation) {
                    debug!(resource = T::NAME, "Notice expired");
                    self.state.notice = None;
                    self.publish();
                }
            }
        }
    }

    fn start_fetch(
        &mut self,
        transport: &Arc<dyn Transport>,
        patch: Option<T::Filters>,
        respond_to: Response<FetchOutcome>,
    ) {
        if let Some(patch) = patch {
            self.state.filters.merge(patch);
        }
        self.latest_fetch += 1;
        let seq = self.latest_fetch;
        let query = self.state.filters.to_query();
        debug!(resource = T::NAME, seq, ?query, "Fetch");

        self.state.loading = true;
        self.publish();

        let transport = Arc::clone(transport);
        let completions = self.completion_sender.clone();
        self.tasks.spawn(async move {
            let result = load_listing::<T>(transport.as_ref(), query).await;
            let _ = completions.send(Completion::Fetched {
                seq,
                result,
                respond_to,
            });
        });
    }

    fn finish_fetch(
        &mut self,
        seq: u64,
        result: Result<Listing<T>, ApiError>,
        respond_to: Response<FetchOutcome>,
    ) {
        if seq != self.latest_fetch {
            warn!(
                resource = T::NAME,
                seq,
                latest = self.latest_fetch,
                "Dropping stale list response"
            );
            let _ = respond_to.send(Ok(FetchOutcome::Superseded));
            return;
        }

        self.state.loading = false;
        match result {
            Ok(listing) => {
                info!(resource = T::NAME, seq, size = listing.records.len(), "Fetched");
                self.state.records = listing.records;
                self.apply_stats(listing.stats);
                if self.state.notice.as_ref().is_some_and(Notice::is_error) {
                    self.clear_notice();
                }
                self.publish();
                let _ = respond_to.send(Ok(FetchOutcome::Applied));
            }
            Err(e) => {
                let message = e.user_message(&T::failure_message(Operation::Fetch));
                warn!(resource = T::NAME, seq, error = %e, "Fetch failed");
                self.post_notice(Notice::Error(message.clone()));
                self.publish();
                let _ = respond_to.send(Err(ControllerError::Failed { message }));
            }
        }
    }

    fn start_mutation(
        &mut self,
        transport: &Arc<dyn Transport>,
        op: Operation,
        id: Option<T::Id>,
        request: ApiRequest,
        expect: Expect<T>,
        respond_to: Responder<T>,
    ) {
        if let Some(id) = &id {
            if self.state.is_pending(id) {
                warn!(resource = T::NAME, %id, ?op, "Mutation already pending");
                respond_to.fail(ControllerError::Busy(id.to_string()));
                return;
            }
            self.state.pending.push(id.clone());
            self.publish();
        }

        // A reload issued by this mutation only counts while no newer fetch has started.
        let reload_seq = self.latest_fetch;
        let reload_query = self.state.filters.to_query();
        let transport = Arc::clone(transport);
        let completions = self.completion_sender.clone();
        self.tasks.spawn(async move {
            let result = perform::<T>(transport.as_ref(), request, expect, reload_query).await;
            let _ = completions.send(Completion::Mutated {
                op,
                id,
                reload_seq,
                result,
                respond_to,
            });
        });
    }

    fn finish_mutation(
        &mut self,
        op: Operation,
        id: Option<T::Id>,
        reload_seq: u64,
        result: Result<MutationOutcome<T>, ApiError>,
        respond_to: Responder<T>,
    ) {
        if let Some(id) = &id {
            self.state.pending.retain(|pending| pending != id);
        }

        match result {
            Ok(MutationOutcome {
                effect,
                message,
                stats,
            }) => {
                let record = match effect {
                    Effect::Upsert(record) => {
                        self.state.upsert(record.clone());
                        Some(record)
                    }
                    Effect::Replace(record) => {
                        if !self.state.replace(record.clone()) {
                            debug!(resource = T::NAME, id = %record.id(), "Record not in current list");
                        }
                        Some(record)
                    }
                    Effect::Removed(removed) => {
                        if !self.state.remove(&removed) {
                            debug!(resource = T::NAME, id = %removed, "Record not in current list");
                        }
                        None
                    }
                    Effect::Reload(records) => {
                        let record = id
                            .as_ref()
                            .and_then(|id| records.iter().find(|r| &r.id() == id).cloned());
                        if reload_seq == self.latest_fetch {
                            // Fetches issued before the mutation are older than its reload.
                            self.latest_fetch += 1;
                            self.state.loading = false;
                            self.state.records = records;
                        } else {
                            debug!(
                                resource = T::NAME,
                                reload_seq,
                                latest = self.latest_fetch,
                                "Keeping newer list over reload"
                            );
                        }
                        record
                    }
                };
                self.apply_stats(stats);
                if op.announces_success() {
                    let text = message.unwrap_or_else(|| T::success_message(op));
                    self.post_notice(Notice::Success(text));
                } else if self.state.notice.as_ref().is_some_and(Notice::is_error) {
                    self.clear_notice();
                }
                info!(resource = T::NAME, ?op, size = self.state.records.len(), "Applied");
                self.publish();
                respond_to.succeed(record);
            }
            Err(e) => {
                let message = e.user_message(&T::failure_message(op));
                warn!(resource = T::NAME, ?op, error = %e, "Failed");
                self.post_notice(Notice::Error(message.clone()));
                self.publish();
                respond_to.fail(ControllerError::Failed { message });
            }
        }
    }

    fn apply_stats(&mut self, server: Option<Result<T::Stats, ApiError>>) {
        match server {
            Some(Ok(stats)) => self.state.stats = stats,
            Some(Err(e)) => {
                warn!(resource = T::NAME, error = %e, "Statistics endpoint failed, deriving locally");
                self.state.recompute_stats();
            }
            None => self.state.recompute_stats(),
        }
    }

    fn post_notice(&mut self, notice: Notice) {
        let ttl = if notice.is_error() {
            self.config.error_ttl
        } else {
            self.config.success_ttl
        };
        let completions = self.completion_sender.clone();
        self.timer.arm(ttl, move |generation| {
            let _ = completions.send(Completion::NoticeExpired { generation });
        });
        self.state.notice = Some(notice);
    }

    fn clear_notice(&mut self) {
        self.timer.cancel();
        self.state.notice = None;
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

fn encode<P: Serialize>(payload: &P) -> Result<Value, ControllerError> {
    serde_json::to_value(payload).map_err(|e| ControllerError::Encode(e.to_string()))
}

async fn load_records<T: ResourceEntity>(
    transport: &dyn Transport,
    query: Vec<(String, String)>,
) -> Result<Vec<T>, ApiError> {
    let body = transport
        .send(ApiRequest::get(T::PATH).with_query(query))
        .await?;
    match envelope::decode::<Vec<T>>(body, T::COLLECTION_KEY)? {
        Payload::Data(reply) => Ok(reply.data),
        Payload::Malformed(raw) => {
            warn!(
                resource = T::NAME,
                shape = %envelope::shape_of(&raw),
                "Unexpected list response format"
            );
            Ok(Vec::new())
        }
    }
}

async fn load_listing<T: ResourceEntity>(
    transport: &dyn Transport,
    query: Vec<(String, String)>,
) -> Result<Listing<T>, ApiError> {
    let records = load_records::<T>(transport, query).await?;
    let stats = load_server_stats::<T>(transport).await;
    Ok(Listing { records, stats })
}

async fn load_server_stats<T: ResourceEntity>(
    transport: &dyn Transport,
) -> Option<Result<T::Stats, ApiError>> {
    let StatsSource::Endpoint(path) = T::STATS else {
        return None;
    };
    Some(fetch_stats::<T>(transport, path).await)
}

async fn fetch_stats<T: ResourceEntity>(
    transport: &dyn Transport,
    path: &str,
) -> Result<T::Stats, ApiError> {
    let body = transport.send(ApiRequest::get(path)).await?;
    match envelope::decode::<T::Stats>(body, None)? {
        Payload::Data(reply) => Ok(reply.data),
        Payload::Malformed(raw) => Err(ApiError::Decode(format!(
            "unexpected statistics payload: {}",
            envelope::shape_of(&raw)
        ))),
    }
}

async fn perform<T: ResourceEntity>(
    transport: &dyn Transport,
    request: ApiRequest,
    expect: Expect<T>,
    reload_query: Vec<(String, String)>,
) -> Result<MutationOutcome<T>, ApiError> {
    let body = transport.send(request).await?;
    let (effect, message) = match expect {
        Expect::Record { insert } => match envelope::decode::<T>(body, Some(T::NAME))? {
            Payload::Data(reply) => {
                let effect = if insert {
                    Effect::Upsert(reply.data)
                } else {
                    Effect::Replace(reply.data)
                };
                (effect, reply.message)
            }
            Payload::Malformed(raw) => {
                warn!(
                    resource = T::NAME,
                    shape = %envelope::shape_of(&raw),
                    "Response carried no record, reloading list"
                );
                let message = envelope::message_of(&raw);
                let records = load_records::<T>(transport, reload_query).await?;
                (Effect::Reload(records), message)
            }
        },
        Expect::Removal(id) => (Effect::Removed(id), envelope::decode_ack(&body)?),
        Expect::Reload => {
            let message = envelope::decode_ack(&body)?;
            let records = load_records::<T>(transport, reload_query).await?;
            (Effect::Reload(records), message)
        }
    };
    let stats = load_server_stats::<T>(transport).await;
    Ok(MutationOutcome {
        effect,
        message,
        stats,
    })
}
