use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;
use crate::models::validation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub program: Option<String>,
    pub instructor: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    pub program: Option<String>,
    pub instructor: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NewCourseRequest {
    pub fn validate(self) -> Result<Self, AppError> {
        check_dates(self.start_date, self.end_date)?;
        Ok(Self {
            title: validation::required(&self.title, "Title")?,
            description: validation::required(&self.description, "Description")?,
            image_url: validation::optional(self.image_url),
            program: validation::optional(self.program),
            instructor: validation::optional(self.instructor),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub program: Option<String>,
    pub instructor: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl UpdateCourseRequest {
    /// Applies the present fields onto `course`, validating each one.
    pub fn apply_to(self, course: &mut Course) -> Result<(), AppError> {
        if let Some(title) = self.title {
            course.title = validation::required(&title, "Title")?;
        }
        if let Some(description) = self.description {
            course.description = validation::required(&description, "Description")?;
        }
        if self.image_url.is_some() {
            course.image_url = validation::optional(self.image_url);
        }
        if self.program.is_some() {
            course.program = validation::optional(self.program);
        }
        if self.instructor.is_some() {
            course.instructor = validation::optional(self.instructor);
        }
        if self.start_date.is_some() {
            course.start_date = self.start_date;
        }
        if self.end_date.is_some() {
            course.end_date = self.end_date;
        }
        check_dates(course.start_date, course.end_date)
    }
}

fn check_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(AppError::validation("End date must not be before start date"))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCount {
    pub program: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStatistics {
    pub total: i64,
    pub active: i64,
    pub archived: i64,
    pub by_program: Vec<ProgramCount>,
}
