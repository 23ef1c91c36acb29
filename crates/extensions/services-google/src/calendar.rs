//! Google Calendar.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use highlighter_protocols::{
    AccessToken, AdapterError, CalendarEvent, CalendarService, EventQuery,
};

use crate::http::{read_json, transport_error};

const BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Title used for events the owner left untitled.
const UNTITLED: &str = "(no title)";

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<EventItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventItem {
    id: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: Option<EventTime>,
    #[serde(default)]
    end: Option<EventTime>,
    #[serde(default)]
    html_link: Option<String>,
}

/// Either `dateTime` for timed events or `date` for all-day ones.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    #[serde(default)]
    date_time: Option<String>,
    #[serde(default)]
    date: Option<String>,
}

impl EventTime {
    fn value(self) -> Option<String> {
        self.date_time.or(self.date)
    }
}

impl From<EventItem> for CalendarEvent {
    fn from(item: EventItem) -> Self {
        Self {
            id: item.id,
            summary: item
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            start: item.start.and_then(EventTime::value).unwrap_or_default(),
            end: item.end.and_then(EventTime::value),
            html_link: item.html_link,
        }
    }
}

pub struct GoogleCalendar {
    client: Client,
    base_url: String,
}

impl GoogleCalendar {
    pub fn new() -> Self {
        Self::with_url(BASE_URL.to_string())
    }

    pub fn with_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for GoogleCalendar {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CalendarService for GoogleCalendar {
    fn name(&self) -> &str {
        "google-calendar"
    }

    async fn upcoming_events(
        &self,
        token: &AccessToken,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>, AdapterError> {
        if query.max_results == 0 {
            return Err(AdapterError::InvalidInput(
                "max_results must be at least 1".to_string(),
            ));
        }

        let max_results = query.max_results.to_string();
        debug!("Listing up to {} events from {}", max_results, query.time_min);
        let response = self
            .client
            .get(format!("{}/calendars/primary/events", self.base_url))
            .bearer_auth(token.secret())
            .query(&[
                ("timeMin", query.time_min.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
                ("maxResults", max_results.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let list: EventList = read_json(response).await?;
        Ok(list.items.into_iter().map(CalendarEvent::from).collect())
    }
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
