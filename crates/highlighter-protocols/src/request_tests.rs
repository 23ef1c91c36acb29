use super::*;
use serde_json::json;

#[test]
fn test_kind_roundtrip_names() {
    for kind in RequestKind::ALL {
        let parsed: RequestKind = kind.as_str().parse().unwrap();
        assert_eq!(parsed, kind);
    }
}

#[test]
fn test_kind_legacy_aliases() {
    assert_eq!(
        "TEXT_SELECTED".parse::<RequestKind>().unwrap(),
        RequestKind::SummarizeText
    );
    assert_eq!(
        "OPEN_SUMMARY_SIDEPANEL".parse::<RequestKind>().unwrap(),
        RequestKind::OpenPanel
    );
    assert_eq!(
        "GET_DIRECTIONS".parse::<RequestKind>().unwrap(),
        RequestKind::GetDirections
    );
}

#[test]
fn test_kind_unknown() {
    let err = "Teleport".parse::<RequestKind>().unwrap_err();
    assert_eq!(err, DispatchError::UnknownKind("Teleport".to_string()));
}

#[test]
fn test_from_envelope_summarize() {
    let envelope = Envelope::new("SummarizeText", json!({"text": "hello world"}));
    let request = Request::from_envelope(envelope).unwrap();
    assert_eq!(
        request,
        Request::SummarizeText {
            text: "hello world".to_string()
        }
    );
    assert_eq!(request.kind(), RequestKind::SummarizeText);
}

#[test]
fn test_from_envelope_legacy_flat_message() {
    let envelope: Envelope =
        serde_json::from_value(json!({"type": "GET_DIRECTIONS", "text": "Meet at the Eiffel Tower"}))
            .unwrap();
    let request = Request::from_envelope(envelope).unwrap();
    assert_eq!(
        request,
        Request::GetDirections {
            text: "Meet at the Eiffel Tower".to_string()
        }
    );
}

#[test]
fn test_from_envelope_unit_kinds_ignore_payload() {
    let request = Request::from_envelope(Envelope::new("CheckAuth", Value::Null)).unwrap();
    assert_eq!(request, Request::CheckAuth);
    let request = Request::from_envelope(Envelope::new("AUTHENTICATE", json!({}))).unwrap();
    assert_eq!(request, Request::Authenticate);
}

#[test]
fn test_from_envelope_save_task() {
    let envelope = Envelope::new(
        "SaveTask",
        json!({"task": {"title": "Buy milk", "notes": "2%", "listHint": "Groceries"}}),
    );
    match Request::from_envelope(envelope).unwrap() {
        Request::SaveTask(draft) => {
            assert_eq!(draft.title, "Buy milk");
            assert_eq!(draft.notes.as_deref(), Some("2%"));
            assert_eq!(draft.list_hint.as_deref(), Some("Groceries"));
        }
        other => panic!("unexpected request: {:?}", other),
    }
}

#[test]
fn test_from_envelope_generate_email() {
    let envelope = Envelope::new(
        "GenerateEmail",
        json!({"selectedText": "Quarterly numbers", "purpose": "share results", "tone": "casual"}),
    );
    match Request::from_envelope(envelope).unwrap() {
        Request::GenerateEmail(req) => {
            assert_eq!(req.selected_text, "Quarterly numbers");
            assert_eq!(req.tone, "casual");
        }
        other => panic!("unexpected request: {:?}", other),
    }
}

#[test]
fn test_from_envelope_open_panel_tab() {
    let request =
        Request::from_envelope(Envelope::new("OpenPanel", json!({"tabId": 42}))).unwrap();
    assert_eq!(request, Request::OpenPanel { tab_id: Some(42) });
    let request = Request::from_envelope(Envelope::new("OpenPanel", Value::Null)).unwrap();
    assert_eq!(request, Request::OpenPanel { tab_id: None });
}

#[test]
fn test_from_envelope_missing_field() {
    let err = Request::from_envelope(Envelope::new("SummarizeText", json!({}))).unwrap_err();
    assert!(matches!(
        err,
        DispatchError::InvalidPayload {
            kind: RequestKind::SummarizeText,
            ..
        }
    ));
}

#[test]
fn test_from_envelope_unknown_kind() {
    let err = Request::from_envelope(Envelope::new("Launch", json!({}))).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownKind(_)));
}

#[test]
fn test_envelope_serialization_skips_null_payload() {
    let json = serde_json::to_value(Envelope::new("CheckAuth", Value::Null)).unwrap();
    assert_eq!(json, json!({"kind": "CheckAuth"}));
}

#[test]
fn test_from_envelope_save_task_flat_payload() {
    let envelope = Envelope::new(
        "SaveTask",
        json!({"title": "Buy milk", "due": "2026-10-20T00:00:00Z", "listHint": "Groceries"}),
    );
    match Request::from_envelope(envelope).unwrap() {
        Request::SaveTask(draft) => {
            assert_eq!(draft.title, "Buy milk");
            assert_eq!(draft.due.as_deref(), Some("2026-10-20T00:00:00Z"));
            assert_eq!(draft.list_hint.as_deref(), Some("Groceries"));
        }
        other => panic!("unexpected request: {:?}", other),
    }
}

#[test]
fn test_from_envelope_save_task_flat_missing_title() {
    let err = Request::from_envelope(Envelope::new("SaveTask", json!({"notes": "x"}))).unwrap_err();
    match err {
        DispatchError::InvalidPayload { kind, message } => {
            assert_eq!(kind, RequestKind::SaveTask);
            assert!(message.contains("title"), "{}", message);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_from_envelope_list_events() {
    let request = Request::from_envelope(Envelope::new("ListEvents", Value::Null)).unwrap();
    assert_eq!(request, Request::ListEvents { max_results: 10 });

    let request =
        Request::from_envelope(Envelope::new("ListEvents", json!({"maxResults": 3}))).unwrap();
    assert_eq!(request, Request::ListEvents { max_results: 3 });
}

#[test]
fn test_from_envelope_legacy_action_message() {
    let envelope: Envelope = serde_json::from_value(json!({"action": "get_events"})).unwrap();
    let request = Request::from_envelope(envelope).unwrap();
    assert_eq!(request.kind(), RequestKind::ListEvents);
}
