//! Train schedule model.

use serde::{Deserialize, Serialize};

/// A train's timetable entry with mutable delay/cancellation/track fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub train_number: String,
    pub departure: String,
    pub arrival: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Delay in minutes; unsigned so a negative delay cannot be stored.
    #[serde(default)]
    pub delay_minutes: u32,
    #[serde(default)]
    pub is_cancelled: bool,
}

/// Request body for creating a new schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub train_number: String,
    pub departure: String,
    pub arrival: String,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub delay_minutes: u32,
    #[serde(default)]
    pub is_cancelled: bool,
}

/// Request body for a partial schedule update. Absent fields are untouched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    #[serde(default)]
    pub train_number: Option<String>,
    #[serde(default)]
    pub departure: Option<String>,
    #[serde(default)]
    pub arrival: Option<String>,
    #[serde(default)]
    pub track: Option<String>,
    #[serde(default)]
    pub delay_minutes: Option<u32>,
    #[serde(default)]
    pub is_cancelled: Option<bool>,
}

/// Response body for schedule listings.
#[derive(Debug, Serialize)]
pub struct ScheduleList {
    pub schedules: Vec<Schedule>,
}
