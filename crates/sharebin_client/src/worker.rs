//! Store worker task: performs the HTTP calls off the controller's loop.

use sharebin_core::models::paste::CreatePasteRequest;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::error;

use crate::{
    api::ApiClient,
    error::StoreError,
    protocol::{StoreCmd, StoreEvent},
};

/// Handle for sending commands to, and receiving events from, the store worker.
pub struct StoreHandle {
    pub cmd_tx: UnboundedSender<StoreCmd>,
    pub evt_rx: UnboundedReceiver<StoreEvent>,
}

/// Spawn the worker task that performs store API calls.
///
/// Completions come back as [`StoreEvent`] values stamped with the issuing
/// generation; the driver loop feeds them to
/// [`PasteController::apply`](crate::PasteController::apply).
///
/// # Returns
/// A [`StoreHandle`] containing the command sender and event receiver.
pub fn spawn_store_worker(api: ApiClient) -> StoreHandle {
    let (cmd_tx, mut cmd_rx) = unbounded_channel::<StoreCmd>();
    let (evt_tx, evt_rx) = unbounded_channel::<StoreEvent>();

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            let event = run_cmd(&api, cmd).await;
            if evt_tx.send(event).is_err() {
                break;
            }
        }
    });

    StoreHandle { cmd_tx, evt_rx }
}

async fn run_cmd(api: &ApiClient, cmd: StoreCmd) -> StoreEvent {
    match cmd {
        StoreCmd::Create {
            generation,
            title,
            content,
            language,
        } => {
            let req = CreatePasteRequest {
                title,
                content,
                language,
            };
            match api.create(&req).await {
                Ok(paste) => StoreEvent::Created { generation, paste },
                Err(err) => failure(generation, "create", err),
            }
        }
        StoreCmd::Load { generation, id } => match api.get(&id).await {
            Ok(paste) => StoreEvent::Loaded { generation, paste },
            Err(StoreError::NotFound) => StoreEvent::Missing { generation, id },
            Err(err) => failure(generation, "load", err),
        },
        StoreCmd::Delete { generation, id } => match api.delete(&id).await {
            Ok(()) => StoreEvent::Deleted { generation, id },
            Err(StoreError::NotFound) => StoreEvent::Missing { generation, id },
            Err(err) => failure(generation, "delete", err),
        },
    }
}

fn failure(generation: u64, op: &str, err: StoreError) -> StoreEvent {
    error!("store {} failed: {}", op, err);
    StoreEvent::Failed {
        generation,
        kind: err.kind(),
        message: err.to_string(),
    }
}
