use std::sync::mpsc;
use std::thread;

use receipt_core::{
    Effect, ExtractionRecord, HistoryOutcome, ImageUpload, Msg, RequestToken, UploadFailure,
    UploadOutcome,
};
use receipt_engine::{
    ClientError, ClientSettings, Decoded, EngineError, EngineEvent, EngineHandle, FailureKind,
    HistoryReply, ImagePayload, PaymentRecord,
};
use receipt_logging::receipt_info;

use super::app::LoopEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Result<Self, EngineError> {
        let (engine, events) = EngineHandle::spawn(settings)?;
        spawn_event_loop(events, loop_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload { token, image } => {
                    receipt_info!(
                        "SubmitUpload token={} file={} bytes={}",
                        token,
                        image.file_name,
                        image.bytes.len()
                    );
                    self.engine.submit_upload(token.value(), map_image(image));
                }
                Effect::FetchHistory { token } => {
                    receipt_info!("FetchHistory token={}", token);
                    self.engine.fetch_history(token.value());
                }
            }
        }
    }
}

fn spawn_event_loop(events: mpsc::Receiver<EngineEvent>, loop_tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if loop_tx.send(LoopEvent::Msg(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { request_id, result } => Msg::UploadCompleted {
            token: RequestToken::new(request_id),
            outcome: map_upload(result),
        },
        EngineEvent::HistoryCompleted { request_id, result } => Msg::HistoryCompleted {
            token: RequestToken::new(request_id),
            outcome: map_history(result),
        },
    }
}

fn map_image(image: ImageUpload) -> ImagePayload {
    ImagePayload {
        file_name: image.file_name,
        content_type: image.content_type,
        bytes: image.bytes,
    }
}

fn map_record(record: PaymentRecord) -> ExtractionRecord {
    ExtractionRecord {
        amount: record.amount,
        upi_id: record.upi_id,
        date: record.date,
    }
}

fn map_upload(result: Result<PaymentRecord, ClientError>) -> UploadOutcome {
    result.map(map_record).map_err(|err| match err.kind {
        FailureKind::Rejected { message, .. } => UploadFailure::ServerRejected { message },
        FailureKind::RejectedOpaque { status } => UploadFailure::ServerRejectedOpaque { status },
        FailureKind::Malformed => UploadFailure::Undecodable {
            reason: err.message,
        },
        FailureKind::InvalidUrl
        | FailureKind::Timeout
        | FailureKind::TooLarge { .. }
        | FailureKind::Network => UploadFailure::TransportFailure {
            reason: format!("{}: {}", err.kind, err.message),
        },
    })
}

fn map_history(result: Result<HistoryReply, ClientError>) -> HistoryOutcome {
    match result {
        Ok(Decoded::Json(payments)) => {
            HistoryOutcome::Loaded(payments.into_iter().map(map_record).collect())
        }
        Ok(Decoded::NotJson { .. }) => HistoryOutcome::Unavailable,
        Err(err) => HistoryOutcome::Failed {
            reason: err.to_string(),
        },
    }
}
