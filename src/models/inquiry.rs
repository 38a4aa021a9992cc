use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::statistics::{DailyCount, StatusCount};
use crate::models::status::LeadStatus;
use crate::models::validation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub course_id: String,
    pub course_title: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiryRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: Option<String>,
    #[serde(default)]
    pub course_id: String,
}

/// A validated inquiry, not yet linked to its course title.
#[derive(Debug, Clone)]
pub struct NewInquiry {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub course_id: String,
}

impl NewInquiryRequest {
    pub fn validate(self) -> Result<NewInquiry, AppError> {
        let full_name = validation::required(&self.full_name, "Full name")?;
        let email = validation::email(&self.email)?;
        let phone = validation::phone(&self.phone)?;
        let course_id = validation::required(&self.course_id, "Course")?;
        Ok(NewInquiry {
            full_name,
            email,
            phone,
            message: validation::optional(self.message),
            course_id,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryFilter {
    pub status: Option<String>,
    pub course_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CourseInquiryCount {
    pub course_id: String,
    pub course_title: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryStatistics {
    pub total: i64,
    pub by_status: Vec<StatusCount<LeadStatus>>,
    pub daily: Vec<DailyCount>,
    pub by_course: Vec<CourseInquiryCount>,
}
