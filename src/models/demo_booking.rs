use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::statistics::{DailyCount, StatusCount};
use crate::models::status::LeadStatus;
use crate::models::validation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DemoBooking {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub preferred_date: Option<NaiveDate>,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDemoBookingRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub company: Option<String>,
    pub message: Option<String>,
    pub preferred_date: Option<NaiveDate>,
}

impl NewDemoBookingRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        Ok(Self {
            full_name: validation::required(&self.full_name, "Full name")?,
            email: validation::email(&self.email)?,
            phone: validation::phone(&self.phone)?,
            company: validation::optional(self.company),
            message: validation::optional(self.message),
            preferred_date: self.preferred_date,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoBookingFilter {
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBookingStatistics {
    pub total: i64,
    pub by_status: Vec<StatusCount<LeadStatus>>,
    pub daily: Vec<DailyCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_required_for_bookings() {
        let req = NewDemoBookingRequest {
            full_name: "Grace".into(),
            email: "grace@navy.mil".into(),
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(msg)) if msg == "Phone is required"));
    }
}
