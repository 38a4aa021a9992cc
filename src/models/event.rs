use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::validation;

/// An event as returned to callers. `registration_count` is computed at read time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub is_archived: bool,
    pub registration_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// A validated [`NewEventRequest`].
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

impl NewEventRequest {
    pub fn validate(self) -> Result<NewEvent, AppError> {
        Ok(NewEvent {
            title: validation::required(&self.title, "Title")?,
            description: validation::required(&self.description, "Description")?,
            event_date: self
                .event_date
                .ok_or_else(|| AppError::validation("Event date is required"))?,
            location: validation::optional(self.location),
            image_url: validation::optional(self.image_url),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateEventRequest {
    pub fn apply_to(self, event: &mut Event) -> Result<(), AppError> {
        if let Some(title) = self.title {
            event.title = validation::required(&title, "Title")?;
        }
        if let Some(description) = self.description {
            event.description = validation::required(&description, "Description")?;
        }
        if let Some(event_date) = self.event_date {
            event.event_date = event_date;
        }
        if self.location.is_some() {
            event.location = validation::optional(self.location);
        }
        if self.image_url.is_some() {
            event.image_url = validation::optional(self.image_url);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStatistics {
    pub total: i64,
    pub active: i64,
    pub archived: i64,
    pub upcoming: i64,
    pub past: i64,
    pub total_registrations: i64,
}
