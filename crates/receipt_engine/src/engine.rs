use std::sync::{mpsc, Arc};
use std::thread;

use receipt_logging::{receipt_info, receipt_warn};

use crate::client::{ClientSettings, ExtractionClient, ReqwestClient};
use crate::{ClientError, EngineEvent, ImagePayload, RequestId};

enum EngineCommand {
    Upload {
        request_id: RequestId,
        image: ImagePayload,
    },
    FetchHistory {
        request_id: RequestId,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] ClientError),
    #[error("failed to start tokio runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Sends requests to a background thread that runs them on a tokio runtime.
///
/// Every submitted command produces exactly one completion event on the
/// receiver returned by [`EngineHandle::spawn`]. Requests are never aborted;
/// deciding which completion still matters is the caller's job.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        settings: ClientSettings,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let client = ReqwestClient::new(settings)?;
        Self::spawn_with_client(Arc::new(client))
    }

    pub fn spawn_with_client(
        client: Arc<dyn ExtractionClient>,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn submit_upload(&self, request_id: RequestId, image: ImagePayload) {
        self.send(EngineCommand::Upload { request_id, image });
    }

    pub fn fetch_history(&self, request_id: RequestId) {
        self.send(EngineCommand::FetchHistory { request_id });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            receipt_warn!("Engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(
    client: &dyn ExtractionClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Upload { request_id, image } => {
            let result = client.upload(&image).await;
            if let Err(err) = &result {
                log_failure("upload", request_id, err);
            }
            EngineEvent::UploadCompleted { request_id, result }
        }
        EngineCommand::FetchHistory { request_id } => {
            let result = client.history().await;
            if let Err(err) = &result {
                log_failure("history", request_id, err);
            }
            EngineEvent::HistoryCompleted { request_id, result }
        }
    };
    let _ = event_tx.send(event);
}

fn log_failure(operation: &str, request_id: RequestId, err: &ClientError) {
    if err.kind.is_transport() {
        receipt_warn!("{} request {} failed: {}", operation, request_id, err);
    } else {
        receipt_info!("{} request {} rejected: {}", operation, request_id, err);
    }
}
