//! Chunked delivery of `n` newline-delimited JSON objects.
//!
//! # Design Decisions
//! - A producer writes one object at a time into a `ChunkSink`; the sink owns
//!   flush semantics, the producer only sees "accepted" or "transport gone"
//! - The default sink is a bounded channel feeding the response body, so at
//!   most `buffer` objects exist ahead of the transport
//! - A failed send ends the producer; nothing is retried
//! - There is no built-in upper bound on `n` unless
//!   `simulation.max_stream_objects` is configured

use std::future::Future;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::delivery::buffered::APPLICATION_JSON;
use crate::error::ReflectError;
use crate::observability::metrics;
use crate::reflect::Document;

/// The receiving side went away before a chunk could be handed over.
#[derive(Debug, Error)]
#[error("transport closed")]
pub struct TransportError;

/// Why a producer stopped early.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("transport closed after {written} objects")]
    Transport { written: u64 },

    #[error("failed to serialize object {id}: {source}")]
    Serialization {
        id: u64,
        #[source]
        source: serde_json::Error,
    },
}

/// Destination for streamed chunks.
pub trait ChunkSink: Send {
    /// Whether each accepted chunk reaches the transport before the next one
    /// is produced. Streaming refuses to start on a sink that cannot.
    fn supports_flush(&self) -> bool {
        true
    }

    /// Hand one chunk to the transport.
    fn send(&mut self, chunk: Bytes) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Sink backed by a bounded channel whose receiver is the response body.
pub struct ChannelSink {
    tx: mpsc::Sender<Result<Bytes, std::io::Error>>,
}

impl ChannelSink {
    /// Create the sink and the body that drains it.
    pub fn new(buffer: usize) -> (Self, Body) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, Body::from_stream(ReceiverStream::new(rx)))
    }
}

impl ChunkSink for ChannelSink {
    fn send(&mut self, chunk: Bytes) -> impl Future<Output = Result<(), TransportError>> + Send {
        let tx = self.tx.clone();
        async move { tx.send(Ok(chunk)).await.map_err(|_| TransportError) }
    }
}

/// Write `count` copies of `doc` into `sink`, each tagged with `id = 0..count`.
///
/// Returns how many objects the sink accepted.
pub async fn produce<S: ChunkSink>(mut doc: Document, count: u64, sink: &mut S) -> Result<u64, StreamError> {
    for id in 0..count {
        doc.set_id(id);
        let mut line = doc
            .to_compact()
            .map_err(|source| StreamError::Serialization { id, source })?;
        line.push(b'\n');

        if sink.send(Bytes::from(line)).await.is_err() {
            return Err(StreamError::Transport { written: id });
        }
        metrics::record_stream_object();
    }
    Ok(count)
}

/// Start a producer task on `sink`. Fails before anything is sent when the
/// sink cannot flush.
pub fn spawn_producer<S>(doc: Document, count: u64, mut sink: S) -> Result<tokio::task::JoinHandle<()>, ReflectError>
where
    S: ChunkSink + 'static,
{
    if !sink.supports_flush() {
        return Err(ReflectError::FlushUnsupported);
    }

    Ok(tokio::spawn(async move {
        match produce(doc, count, &mut sink).await {
            Ok(written) => {
                tracing::debug!(written, "Stream complete");
            }
            Err(StreamError::Transport { written }) => {
                tracing::debug!(written, requested = count, "Client went away, abandoning stream");
                metrics::record_stream_abandoned();
            }
            Err(e) => {
                tracing::error!(error = %e, "Stream aborted");
                metrics::record_stream_abandoned();
            }
        }
    }))
}

/// Chunked response streaming `count` objects built from `doc`.
pub fn streamed(doc: Document, count: u64, buffer: usize) -> Result<Response, ReflectError> {
    let (sink, body) = ChannelSink::new(buffer);
    spawn_producer(doc, count, sink)?;

    Ok((
        StatusCode::OK,
        [
            (header::TRANSFER_ENCODING, HeaderValue::from_static("chunked")),
            (header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)),
        ],
        body,
    )
        .into_response())
}
