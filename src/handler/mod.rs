use aws_lambda_events::event::kinesis::KinesisEvent;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::search::{DocumentSink, DocumentUploadRequest};
use crate::source::SourceEvent;

/// Invocation outcome reported back to the hosting runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
}

impl Response {
    pub fn success() -> Self {
        Self { ok: true }
    }

    pub fn failed() -> Self {
        Self { ok: false }
    }
}

/// Per-invocation pipeline: decode every change record in input order,
/// assemble the upload batch, and submit it in at most one sink call.
pub struct BatchHandler<S> {
    sink: S,
}

impl<S: DocumentSink> BatchHandler<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// All-or-nothing: the first record that fails to decode aborts the
    /// invocation before anything is uploaded, and an upload failure
    /// fails the whole batch. The event source redelivers the entire
    /// batch on failure.
    pub async fn handle(&self, event: KinesisEvent) -> Result<Response> {
        let mut batch = Vec::with_capacity(event.records.len());

        for record in &event.records {
            let data = record.kinesis.data.as_slice();
            debug!(
                event_name = record.event_name.as_deref(),
                payload = %String::from_utf8_lossy(data),
                "decoding change record"
            );

            let source_event = SourceEvent::decode(data)?;
            batch.push(DocumentUploadRequest::add(&source_event));
        }

        if batch.is_empty() {
            info!("empty record batch, nothing to upload");
            return Ok(Response::success());
        }

        self.sink.upload(&batch).await?;

        Ok(Response::success())
    }
}
