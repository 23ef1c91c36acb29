//! Reply channel for a single request.
//!
//! [`PendingInvocation`] is the sending half held by the dispatcher while a
//! handler runs; [`PendingReply`] is the receiving half returned to the
//! surface. Fulfilling consumes the invocation, so a second reply cannot be
//! expressed. Dropping an unfulfilled invocation sends a
//! `HandlerProducedNoReply` failure, so a reply is never lost either.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use highlighter_protocols::{ErrorCode, Reply};

/// Sending half of an open reply channel.
#[derive(Debug)]
pub struct PendingInvocation {
    id: String,
    label: String,
    sender: Option<oneshot::Sender<Reply>>,
    in_flight: Arc<AtomicUsize>,
}

impl PendingInvocation {
    /// Open a reply channel and count it as in flight.
    pub fn open(
        id: impl Into<String>,
        label: impl Into<String>,
        in_flight: Arc<AtomicUsize>,
    ) -> (Self, PendingReply) {
        let id = id.into();
        let (sender, receiver) = oneshot::channel();
        in_flight.fetch_add(1, Ordering::SeqCst);

        let invocation = Self {
            id: id.clone(),
            label: label.into(),
            sender: Some(sender),
            in_flight,
        };
        (invocation, PendingReply { id, receiver })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Deliver the reply and close the channel.
    ///
    /// Returns `false` when the surface has already gone away; the reply is
    /// then discarded.
    pub fn fulfill(mut self, reply: Reply) -> bool {
        match self.sender.take() {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }
}

impl Drop for PendingInvocation {
    fn drop(&mut self) {
        if let Some(sender) = self.sender.take() {
            warn!(invocation = %self.id, kind = %self.label, "invocation closed without a reply");
            let _ = sender.send(Reply::failure(
                ErrorCode::HandlerProducedNoReply,
                format!("{} finished without producing a reply", self.label),
            ));
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Receiving half of a reply channel. Resolves to exactly one [`Reply`].
#[derive(Debug)]
pub struct PendingReply {
    id: String,
    receiver: oneshot::Receiver<Reply>,
}

impl PendingReply {
    pub fn invocation_id(&self) -> &str {
        &self.id
    }
}

impl Future for PendingReply {
    type Output = Reply;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Reply> {
        Pin::new(&mut self.receiver).poll(cx).map(|result| {
            result.unwrap_or_else(|_| {
                debug!("reply channel closed before delivery");
                Reply::failure(
                    ErrorCode::HandlerProducedNoReply,
                    "reply channel closed before delivery",
                )
            })
        })
    }
}
