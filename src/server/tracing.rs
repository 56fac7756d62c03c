//! Request spans carrying upstream timings.
//!
//! Every request to the API is a round-trip to Notion, so the root span
//! records how much of its duration was spent waiting on Notion and how many
//! rows came back.

use std::future::Future;
use std::time::{Duration, Instant};

use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    HttpMessage,
};
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

/// Notion calls slower than this are logged at warn level.
const SLOW_UPSTREAM: Duration = Duration::from_secs(3);

/// Root span with `duration_ms`, `notion_ms` and `rows` fields.
pub struct SavepointRootSpanBuilder;

/// When the request was received.
#[derive(Clone, Copy)]
struct Received(Instant);

impl RootSpanBuilder for SavepointRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        request.extensions_mut().insert(Received(Instant::now()));
        tracing_actix_web::root_span!(
            request,
            duration_ms = tracing::field::Empty,
            notion_ms = tracing::field::Empty,
            rows = tracing::field::Empty,
        )
    }

    fn on_request_end<B: MessageBody>(
        span: Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        let received = outcome
            .as_ref()
            .ok()
            .and_then(|response| response.request().extensions().get::<Received>().copied());
        if let Some(Received(at)) = received {
            span.record("duration_ms", at.elapsed().as_millis());
        }
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Await a call to Notion and record its latency as `notion_ms` on `span`.
pub async fn upstream<F: Future>(span: &Span, call: F) -> F::Output {
    let started = Instant::now();
    let output = call.await;
    let elapsed = started.elapsed();
    span.record("notion_ms", elapsed.as_millis());
    if elapsed > SLOW_UPSTREAM {
        tracing::warn!(notion_ms = elapsed.as_millis(), "Slow Notion call");
    }
    output
}
