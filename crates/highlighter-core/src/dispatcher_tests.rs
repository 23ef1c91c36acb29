use super::*;

use std::time::Duration;

use highlighter_protocols::{ReplyPayload, Reply};
use serde_json::json;

use crate::context::Surface;
use crate::handler::HandlerError;
use crate::handlers::register_builtin_handlers;
use crate::test_support::FakeServices;

fn ctx() -> InvocationContext {
    InvocationContext::new(Surface::Popup)
}

fn summary(text: &str) -> Reply {
    Reply::success(ReplyPayload::Summary {
        summary: text.to_string(),
    })
}

#[test]
fn test_dispatcher_new() {
    let dispatcher = Dispatcher::new();
    assert!(dispatcher.kinds().is_empty());
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_dispatch_delivers_handler_reply() {
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_fn(RequestKind::SummarizeText, |_req| async {
            Ok(Some(summary("short")))
        })
        .unwrap();

    let reply = dispatcher
        .dispatch(
            Request::SummarizeText {
                text: "long".to_string(),
            },
            ctx(),
        )
        .await;
    assert_eq!(reply, summary("short"));
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_pending_reply_carries_invocation_id() {
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_fn(RequestKind::CheckAuth, |_req| async { Ok(Some(Reply::ok())) })
        .unwrap();

    let context = ctx();
    let id = context.invocation_id.clone();
    let pending = dispatcher.dispatch(Request::CheckAuth, context);
    assert_eq!(pending.invocation_id(), id);
    pending.await;
}

#[tokio::test]
async fn test_unknown_kind_replies_without_calling_adapters() {
    let fakes = FakeServices::new();
    let log = fakes.log.clone();
    let services = fakes.build();

    let dispatcher = Dispatcher::new();
    dispatcher
        .register_handler(Arc::new(crate::handlers::SummarizeHandler::new(
            services.summarizer.clone(),
        )))
        .unwrap();

    let reply = dispatcher.dispatch(Request::CheckAuth, ctx()).await;
    assert!(!reply.ok);
    assert_eq!(reply.error, Some(ErrorCode::UnknownRequestKind));
    assert!(reply.message.as_deref().unwrap().contains("CheckAuth"));
    assert!(log.entries().is_empty());
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_dispatch_envelope_unknown_kind_string() {
    let dispatcher = Dispatcher::new();
    let reply = dispatcher
        .dispatch_envelope(Envelope::new("TELEPORT", json!({})), ctx())
        .await;
    assert_eq!(reply.error, Some(ErrorCode::UnknownRequestKind));
    assert!(reply.message.as_deref().unwrap().contains("TELEPORT"));
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_dispatch_envelope_bad_payload() {
    let dispatcher = Dispatcher::new();
    register_builtin_handlers(&dispatcher, &FakeServices::new().build()).unwrap();

    let reply = dispatcher
        .dispatch_envelope(Envelope::new("SummarizeText", json!({"text": 42})), ctx())
        .await;
    assert_eq!(reply.error, Some(ErrorCode::InvalidRequest));
}

#[tokio::test]
async fn test_dispatch_envelope_routes_legacy_name() {
    let dispatcher = Dispatcher::new();
    register_builtin_handlers(&dispatcher, &FakeServices::new().build()).unwrap();

    let reply = dispatcher
        .dispatch_envelope(
            Envelope::new("TEXT_SELECTED", json!({"text": "an article"})),
            ctx(),
        )
        .await;
    assert_eq!(reply, summary("summary of an article"));
}

#[tokio::test]
async fn test_handler_without_reply() {
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_fn(RequestKind::CheckAuth, |_req| async { Ok(None) })
        .unwrap();

    let reply = dispatcher.dispatch(Request::CheckAuth, ctx()).await;
    assert!(!reply.ok);
    assert_eq!(reply.error, Some(ErrorCode::HandlerProducedNoReply));
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_handler_error_becomes_failure_reply() {
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_fn(RequestKind::SaveTask, |_req| async {
            Err(HandlerError::InvalidRequest("Task title is empty".to_string()))
        })
        .unwrap();

    let reply = dispatcher
        .dispatch(Request::SaveTask(Default::default()), ctx())
        .await;
    assert_eq!(reply.error, Some(ErrorCode::InvalidRequest));
    assert_eq!(reply.message.as_deref(), Some("Task title is empty"));
}

#[tokio::test]
async fn test_handler_panic_still_replies_once() {
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_fn(RequestKind::OpenPanel, |_req| async {
            if true {
                panic!("boom");
            }
            Ok(None)
        })
        .unwrap();

    let reply = dispatcher
        .dispatch(Request::OpenPanel { tab_id: Some(1) }, ctx())
        .await;
    assert!(!reply.ok);
    assert_eq!(reply.error, Some(ErrorCode::HandlerFailed));
    assert!(!reply.message.as_deref().unwrap().contains("boom"));
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_duplicate_registration_keeps_first() {
    let dispatcher = Dispatcher::new();
    dispatcher
        .register_fn(RequestKind::SummarizeText, |_req| async {
            Ok(Some(summary("first")))
        })
        .unwrap();
    let err = dispatcher
        .register_fn(RequestKind::SummarizeText, |_req| async {
            Ok(Some(summary("second")))
        })
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateHandlerRegistration);

    let reply = dispatcher
        .dispatch(
            Request::SummarizeText {
                text: "x".to_string(),
            },
            ctx(),
        )
        .await;
    assert_eq!(reply, summary("first"));
}

#[tokio::test(start_paused = true)]
async fn test_slow_request_does_not_block_others() {
    let mut fakes = FakeServices::new();
    fakes.summarizer.delay = Some(Duration::from_millis(500));
    let dispatcher = Dispatcher::new();
    register_builtin_handlers(&dispatcher, &fakes.build()).unwrap();

    let start = tokio::time::Instant::now();
    let slow = dispatcher.dispatch(
        Request::SummarizeText {
            text: "a long page".to_string(),
        },
        ctx(),
    );
    let fast = dispatcher.dispatch(
        Request::GetDirections {
            text: "Paris".to_string(),
        },
        ctx(),
    );
    assert_eq!(dispatcher.in_flight(), 2);

    let fast = fast.await;
    assert!(fast.ok);
    assert!(start.elapsed() < Duration::from_millis(500));
    assert_eq!(dispatcher.in_flight(), 1);

    let slow = slow.await;
    assert_eq!(slow, summary("summary of a long page"));
    assert!(start.elapsed() >= Duration::from_millis(500));
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_reply_is_discarded() {
    let mut fakes = FakeServices::new();
    fakes.summarizer.delay = Some(Duration::from_millis(100));
    let log = fakes.log.clone();
    let dispatcher = Dispatcher::new();
    register_builtin_handlers(&dispatcher, &fakes.build()).unwrap();

    let pending = dispatcher.dispatch(
        Request::SummarizeText {
            text: "closed popup".to_string(),
        },
        ctx(),
    );
    drop(pending);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(log.contains("summarize:closed popup"));
    assert_eq!(dispatcher.in_flight(), 0);
}

#[tokio::test]
async fn test_each_request_gets_one_reply() {
    let dispatcher = Dispatcher::new();
    register_builtin_handlers(&dispatcher, &FakeServices::new().build()).unwrap();

    let pending: Vec<_> = (0..20)
        .map(|i| {
            dispatcher.dispatch(
                Request::SummarizeText {
                    text: format!("page {}", i),
                },
                ctx(),
            )
        })
        .collect();
    let replies = futures::future::join_all(pending).await;

    for (i, reply) in replies.into_iter().enumerate() {
        assert_eq!(reply, summary(&format!("summary of page {}", i)));
    }
    assert_eq!(dispatcher.in_flight(), 0);
}
