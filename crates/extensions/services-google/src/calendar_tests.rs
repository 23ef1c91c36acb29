use super::*;
use serde_json::json;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

fn token() -> AccessToken {
    AccessToken::new("ya29.token")
}

fn query(max_results: u32) -> EventQuery {
    EventQuery {
        time_min: "2026-10-16T08:00:00Z".to_string(),
        max_results,
    }
}

#[tokio::test]
async fn test_lists_upcoming_primary_events() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/calendars/primary/events"))
        .and(matchers::header("authorization", "Bearer ya29.token"))
        .and(matchers::query_param("timeMin", "2026-10-16T08:00:00Z"))
        .and(matchers::query_param("singleEvents", "true"))
        .and(matchers::query_param("orderBy", "startTime"))
        .and(matchers::query_param("maxResults", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "id": "evt-1",
                    "summary": "Standup",
                    "start": {"dateTime": "2026-10-16T09:00:00Z"},
                    "end": {"dateTime": "2026-10-16T09:15:00Z"},
                    "htmlLink": "https://calendar.google.com/event?eid=1"
                },
                {
                    "id": "evt-2",
                    "start": {"date": "2026-10-17"},
                    "end": {"date": "2026-10-18"}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let calendar = GoogleCalendar::with_url(server.uri());
    let events = calendar.upcoming_events(&token(), &query(10)).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].summary, "Standup");
    assert_eq!(events[0].start, "2026-10-16T09:00:00Z");
    assert_eq!(events[0].end.as_deref(), Some("2026-10-16T09:15:00Z"));
    assert_eq!(
        events[0].html_link.as_deref(),
        Some("https://calendar.google.com/event?eid=1")
    );
    assert_eq!(events[1].summary, "(no title)");
    assert_eq!(events[1].start, "2026-10-17");
}

#[tokio::test]
async fn test_empty_calendar() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/calendars/primary/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"kind": "calendar#events"})))
        .mount(&server)
        .await;

    let calendar = GoogleCalendar::with_url(server.uri());
    let events = calendar.upcoming_events(&token(), &query(10)).await.unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_expired_token_requires_auth() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("GET"))
        .and(matchers::path("/calendars/primary/events"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"code": 401, "message": "Invalid Credentials"}
        })))
        .mount(&server)
        .await;

    let calendar = GoogleCalendar::with_url(server.uri());
    let err = calendar.upcoming_events(&token(), &query(10)).await.unwrap_err();
    assert!(err.requires_auth());
    assert!(err.to_string().contains("Invalid Credentials"));
}

#[tokio::test]
async fn test_zero_results_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let calendar = GoogleCalendar::with_url(server.uri());
    let err = calendar.upcoming_events(&token(), &query(0)).await.unwrap_err();
    assert!(matches!(err, AdapterError::InvalidInput(_)));
}
