//! # Console Lifecycle & Orchestration
//!
//! Starts one collection controller per dashboard resource, hands out their clients and
//! stops them again.
//!
//! ## The SyndicConsole Pattern
//!
//! ```rust,ignore
//! let console = SyndicConsole::start(ControllerConfig::from_env()?, transport);
//!
//! console.charges.fetch(None).await?;
//! console.complaints.fetch(None).await?;
//!
//! console.shutdown().await?;
//! ```
//!
//! ## Transport Injection
//!
//! Controllers are created without a backend; the transport is injected when they are
//! spawned. Production passes an [`HttpTransport`](resource_framework::HttpTransport),
//! tests pass [`MockTransport::transport`](resource_framework::mock::MockTransport::transport).
//! Every controller shares the same transport, and nothing else.
//!
//! ## Graceful Shutdown
//!
//! 1. **Send `Shutdown`** to every controller
//! 2. **Controllers abort** in-flight requests and notice timers, then exit
//! 3. **Await completion** of every controller task
//!
//! Dropping every clone of a client has the same effect as step 1 for that controller.

use crate::clients::{BuildingClient, ChargeClient, ComplaintClient};
use crate::{buildings, charges, complaints};
use resource_framework::{ControllerConfig, ResourceClient, Transport};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub struct SyndicConsole {
    pub charges: ChargeClient,
    pub complaints: ComplaintClient,
    pub buildings: BuildingClient,
    handles: Vec<JoinHandle<()>>,
}

impl SyndicConsole {
    /// Spawns every controller against `transport`.
    pub fn start(config: ControllerConfig, transport: Arc<dyn Transport>) -> Self {
        let (charge_controller, charges) = charges::new(config.clone());
        let (complaint_controller, complaints) = complaints::new(config.clone());
        let (building_controller, buildings) = buildings::new(config);

        let handles = vec![
            tokio::spawn(charge_controller.run(Arc::clone(&transport))),
            tokio::spawn(complaint_controller.run(Arc::clone(&transport))),
            tokio::spawn(building_controller.run(transport)),
        ];
        info!(controllers = handles.len(), "Console started");

        Self {
            charges,
            complaints,
            buildings,
            handles,
        }
    }

    /// Stops every controller and waits for them to exit.
    pub async fn shutdown(self) -> Result<(), String> {
        let requests = [
            ("charge", self.charges.inner().shutdown().await),
            ("complaint", self.complaints.inner().shutdown().await),
            ("building", self.buildings.inner().shutdown().await),
        ];
        for (resource, result) in requests {
            // A controller that already stopped has nothing left to shut down.
            if let Err(e) = result {
                warn!(resource, error = %e, "Controller already stopped");
            }
        }

        for handle in self.handles {
            handle.await.map_err(|e| e.to_string())?;
        }
        info!("Console stopped");
        Ok(())
    }
}
