//! Google Tasks.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use highlighter_protocols::{AccessToken, AdapterError, CreatedTask, TaskDraft, TaskService};

use crate::http::{read_json, transport_error};

const BASE_URL: &str = "https://tasks.googleapis.com/tasks/v1";

/// List created when the account has no lists and no hint was given.
pub const DEFAULT_LIST_TITLE: &str = "Tasks";

#[derive(Debug, Deserialize)]
struct TaskLists {
    #[serde(default)]
    items: Vec<TaskList>,
}

#[derive(Debug, Deserialize)]
struct TaskList {
    id: String,
    #[serde(default)]
    title: String,
}

#[derive(Debug, Serialize)]
struct NewTaskList<'a> {
    title: &'a str,
}

#[derive(Debug, Serialize)]
struct NewTask<'a> {
    title: &'a str,
    notes: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    due: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct InsertedTask {
    id: String,
}

pub struct GoogleTasks {
    client: Client,
    base_url: String,
}

impl GoogleTasks {
    pub fn new() -> Self {
        Self::with_url(BASE_URL.to_string())
    }

    pub fn with_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Pick the list for `hint`: a case-insensitive title match, else the
    /// first list when there is no hint, else a newly created list.
    async fn resolve_list(
        &self,
        token: &AccessToken,
        hint: Option<&str>,
    ) -> Result<String, AdapterError> {
        let hint = hint.map(str::trim).filter(|h| !h.is_empty());

        let response = self
            .client
            .get(format!("{}/users/@me/lists", self.base_url))
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(transport_error)?;
        let lists: TaskLists = read_json(response).await?;

        match hint {
            Some(hint) => {
                if let Some(list) = lists
                    .items
                    .iter()
                    .find(|l| l.title.to_lowercase() == hint.to_lowercase())
                {
                    return Ok(list.id.clone());
                }
                self.create_list(token, hint).await
            }
            None => match lists.items.into_iter().next() {
                Some(list) => Ok(list.id),
                None => self.create_list(token, DEFAULT_LIST_TITLE).await,
            },
        }
    }

    async fn create_list(&self, token: &AccessToken, title: &str) -> Result<String, AdapterError> {
        info!("Creating task list '{}'", title);
        let response = self
            .client
            .post(format!("{}/users/@me/lists", self.base_url))
            .bearer_auth(token.secret())
            .json(&NewTaskList { title })
            .send()
            .await
            .map_err(transport_error)?;
        let list: TaskList = read_json(response).await?;
        Ok(list.id)
    }
}

impl Default for GoogleTasks {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskService for GoogleTasks {
    fn name(&self) -> &str {
        "google-tasks"
    }

    async fn create_task(
        &self,
        token: &AccessToken,
        draft: &TaskDraft,
    ) -> Result<CreatedTask, AdapterError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(AdapterError::InvalidInput("Task title is empty".to_string()));
        }

        let list_id = self.resolve_list(token, draft.list_hint.as_deref()).await?;
        debug!("Inserting task into list {}", list_id);

        let mut url = url::Url::parse(&self.base_url)
            .map_err(|e| AdapterError::InvalidInput(format!("bad tasks URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AdapterError::InvalidInput("tasks URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["lists", list_id.as_str(), "tasks"]);

        let response = self
            .client
            .post(url)
            .bearer_auth(token.secret())
            .json(&NewTask {
                title,
                notes: draft.notes.as_deref().unwrap_or(""),
                due: draft.due.as_deref(),
            })
            .send()
            .await
            .map_err(transport_error)?;
        let task: InsertedTask = read_json(response).await?;

        Ok(CreatedTask {
            id: task.id,
            list_id,
        })
    }
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
