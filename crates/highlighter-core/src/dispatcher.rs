//! Request dispatcher.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, info_span, warn, Instrument};

use highlighter_protocols::{DispatchError, Envelope, ErrorCode, Reply, Request, RequestKind};

use crate::context::InvocationContext;
use crate::handler::{FnHandler, Handler, HandlerResult};
use crate::invocation::{PendingInvocation, PendingReply};
use crate::registry::HandlerRegistry;

/// Routes requests to their handlers.
///
/// Every call to [`dispatch`](Self::dispatch) opens a reply channel before
/// the handler runs and resolves it exactly once. Handlers run as separate
/// tasks, so a slow or failing request never holds up an unrelated one.
pub struct Dispatcher {
    registry: HandlerRegistry,
    in_flight: Arc<AtomicUsize>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Register a handler. Fails if its kind already has one.
    pub fn register_handler(&self, handler: Arc<dyn Handler>) -> Result<(), DispatchError> {
        let kind = handler.kind();
        self.registry.register(handler).inspect_err(|e| {
            error!("Refusing handler registration: {}", e);
        })?;
        debug!("Registered handler for {}", kind);
        Ok(())
    }

    /// Register an async closure as the handler for `kind`.
    pub fn register_fn<F, Fut>(&self, kind: RequestKind, func: F) -> Result<(), DispatchError>
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register_handler(Arc::new(FnHandler::new(kind, func)))
    }

    /// Dispatch a typed request.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, request: Request, ctx: InvocationContext) -> PendingReply {
        let kind = request.kind();
        let (invocation, reply) =
            PendingInvocation::open(ctx.invocation_id.clone(), kind.as_str(), self.in_flight.clone());

        let Some(handler) = self.registry.get(kind) else {
            warn!(invocation = %ctx.invocation_id, "No handler registered for {}", kind);
            invocation.fulfill(Reply::failure(
                ErrorCode::UnknownRequestKind,
                format!("No handler registered for {}", kind),
            ));
            return reply;
        };

        let span = info_span!(
            "invocation",
            id = %ctx.invocation_id,
            kind = %kind,
            surface = ?ctx.surface
        );
        tokio::spawn(run_handler(handler, request, ctx, invocation).instrument(span));
        reply
    }

    /// Decode a wire envelope and dispatch it.
    ///
    /// Decoding failures are answered immediately without touching any handler.
    pub fn dispatch_envelope(&self, envelope: Envelope, ctx: InvocationContext) -> PendingReply {
        match Request::from_envelope(envelope) {
            Ok(request) => self.dispatch(request, ctx),
            Err(e) => {
                warn!(invocation = %ctx.invocation_id, "Rejected request: {}", e);
                let (invocation, reply) = PendingInvocation::open(
                    ctx.invocation_id.clone(),
                    "envelope",
                    self.in_flight.clone(),
                );
                invocation.fulfill(Reply::failure(e.code(), e.to_string()));
                reply
            }
        }
    }

    /// Number of invocations whose reply has not been delivered yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn kinds(&self) -> Vec<RequestKind> {
        self.registry.kinds()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_handler(
    handler: Arc<dyn Handler>,
    request: Request,
    ctx: InvocationContext,
    invocation: PendingInvocation,
) {
    let outcome = AssertUnwindSafe(handler.handle(request, &ctx))
        .catch_unwind()
        .await;

    let reply = match outcome {
        Ok(Ok(Some(reply))) => reply,
        Ok(Ok(None)) => {
            warn!("Handler returned without a reply");
            Reply::failure(
                ErrorCode::HandlerProducedNoReply,
                format!("{} handler produced no reply", handler.kind()),
            )
        }
        Ok(Err(e)) => {
            debug!("Handler failed: {}", e);
            e.into_reply()
        }
        Err(panic) => {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!("Handler panicked: {}", detail);
            Reply::failure(ErrorCode::HandlerFailed, "Unexpected error while handling the request")
        }
    };

    debug!(ok = reply.ok, elapsed_ms = ctx.elapsed_ms(), "Reply ready");
    if !invocation.fulfill(reply) {
        debug!("Surface went away; reply discarded");
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
