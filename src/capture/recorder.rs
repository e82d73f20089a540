//! Recording middleware
//!
//! Sits in front of the capture server's handlers. Both bodies are buffered
//! so they can be dumped, then handed on untouched: the inner handler sees
//! the original request and the client gets the original response. A body
//! over `max_body_bytes` is streamed through as-is and the exchange is not
//! recorded.

use super::format::{dump_body, dump_headers, raw_dump};
use super::{CaptureError, CaptureState};
use crate::config::ExchangeLogFormat;
use crate::model::{self, Exchange, Message};
use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::StreamExt;

/// Record one exchange around the inner service
///
/// A body that cannot be read is logged and answered with an error. One
/// that is merely too big is passed along without recording anything.
pub async fn record(State(state): State<CaptureState>, req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();
    let request_bytes = match buffer(body, state.max_body_bytes).await {
        Ok(Buffered::Complete(bytes)) => bytes,
        Ok(Buffered::Overflow(body)) => {
            tracing::warn!(
                "Not recording {} {}: request body exceeds {} bytes",
                parts.method,
                parts.uri,
                state.max_body_bytes
            );
            return next.run(Request::from_parts(parts, body)).await;
        }
        Err(e) => {
            tracing::warn!(
                "Not recording {} {}: request body unreadable: {}",
                parts.method,
                parts.uri,
                e
            );
            return CaptureError::BodyRead(e.to_string()).into_response();
        }
    };

    let method = parts.method.to_string();
    let path = path_and_query(&parts.uri);
    let request = Message::new(
        dump_headers(&parts.headers),
        dump_body(&parts.headers, &request_bytes),
    );

    let response = next
        .run(Request::from_parts(parts, Body::from(request_bytes)))
        .await;

    let (parts, body) = response.into_parts();
    let response_bytes = match buffer(body, state.max_body_bytes).await {
        Ok(Buffered::Complete(bytes)) => bytes,
        Ok(Buffered::Overflow(body)) => {
            tracing::warn!(
                "Not recording {} {}: response body exceeds {} bytes",
                method,
                path,
                state.max_body_bytes
            );
            return Response::from_parts(parts, body);
        }
        Err(e) => {
            tracing::warn!(
                "Not recording {} {}: response body unreadable: {}",
                method,
                path,
                e
            );
            return CaptureError::ResponseRead(e.to_string()).into_response();
        }
    };

    let exchange = Exchange {
        status: model::StatusCode::from(parts.status.as_u16()),
        method,
        path,
        request,
        response: Message::new(
            dump_headers(&parts.headers),
            dump_body(&parts.headers, &response_bytes),
        ),
    };

    if state.log_exchanges {
        log_exchange(&exchange, state.log_format);
    }

    tracing::debug!(
        "Recorded {} {} -> {}",
        exchange.method,
        exchange.path,
        exchange.status
    );
    state.store.record(exchange);

    Response::from_parts(parts, Body::from(response_bytes))
}

/// A body read up to the recording limit
enum Buffered {
    Complete(Bytes),
    /// Over the limit: the chunks already read, followed by the unread rest
    Overflow(Body),
}

async fn buffer(body: Body, limit: usize) -> Result<Buffered, axum::Error> {
    let mut stream = body.into_data_stream();
    let mut chunks: Vec<Bytes> = Vec::new();
    let mut total = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        total += chunk.len();
        chunks.push(chunk);
        if total > limit {
            let read = futures::stream::iter(chunks.into_iter().map(Ok::<_, axum::Error>));
            return Ok(Buffered::Overflow(Body::from_stream(read.chain(stream))));
        }
    }
    Ok(Buffered::Complete(Bytes::from(chunks.concat())))
}

/// One `vex::exchange` log line per recorded exchange
fn log_exchange(exchange: &Exchange, format: ExchangeLogFormat) {
    match format {
        ExchangeLogFormat::Json => match serde_json::to_string(exchange) {
            Ok(json) => tracing::info!(target: "vex::exchange", "{}", json),
            Err(e) => tracing::warn!("Failed to serialize exchange for logging: {}", e),
        },
        ExchangeLogFormat::Raw => tracing::info!(target: "vex::exchange", "{}", raw_dump(exchange)),
    }
}

/// Request target as the client sent it, minus scheme and authority
fn path_and_query(uri: &Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}
