use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::statistics::StatusCount;
use crate::models::status::RegistrationStatus;
use crate::models::validation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistration {
    pub id: String,
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub message: Option<String>,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEventRegistrationRequest {
    #[serde(default)]
    pub event_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub organization: Option<String>,
    pub message: Option<String>,
}

impl NewEventRegistrationRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        let event_id = validation::required(&self.event_id, "Event")?;
        let full_name = validation::required(&self.full_name, "Full name")?;
        let email = validation::email(&self.email)?;
        let phone = validation::optional_phone(self.phone.as_deref())?;
        Ok(Self {
            event_id,
            full_name,
            email,
            phone,
            organization: validation::optional(self.organization),
            message: validation::optional(self.message),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationFilter {
    pub status: Option<String>,
    pub event_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationCount {
    pub event_id: String,
    pub event_title: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationStatistics {
    pub total: i64,
    pub by_status: Vec<StatusCount<RegistrationStatus>>,
    pub by_event: Vec<EventRegistrationCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_optional_but_checked_when_given() {
        let base = NewEventRegistrationRequest {
            event_id: "e-1".into(),
            full_name: "Linus".into(),
            email: "linus@example.org".into(),
            ..Default::default()
        };
        assert!(base.clone().validate().unwrap().phone.is_none());

        let bad = NewEventRegistrationRequest {
            phone: Some("12".into()),
            ..base
        };
        assert!(matches!(bad.validate(), Err(AppError::Validation(msg)) if msg == "Invalid phone format"));
    }
}
