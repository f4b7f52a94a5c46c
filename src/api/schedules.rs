//! Schedule API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::errors::AppError;
use crate::models::{CreateScheduleRequest, Schedule, ScheduleList, UpdateScheduleRequest};
use crate::AppState;

/// GET /api/schedules - List all schedules in store order.
pub async fn list_schedules(State(state): State<AppState>) -> ApiResult<ScheduleList> {
    let schedules = state.repo.list_schedules().await?;
    Ok(Json(ScheduleList { schedules }))
}

/// POST /api/schedules - Create a new schedule.
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<CreateScheduleRequest>,
) -> ApiResult<Schedule> {
    if request.train_number.trim().is_empty() {
        return Err(AppError::Validation("Train number is required".to_string()));
    }
    if request.departure.trim().is_empty() {
        return Err(AppError::Validation(
            "Departure station is required".to_string(),
        ));
    }
    if request.arrival.trim().is_empty() {
        return Err(AppError::Validation(
            "Arrival station is required".to_string(),
        ));
    }

    let schedule = state.repo.create_schedule(&request).await?;
    Ok(Json(schedule))
}

/// PATCH /api/schedules/:id - Merge the given fields into a schedule.
pub async fn update_schedule(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateScheduleRequest>,
) -> ApiResult<Schedule> {
    let schedule = state.repo.update_schedule(&id, &request).await?;
    Ok(Json(schedule))
}

/// POST /api/schedules/reset - Clear delay and cancellation on every schedule.
pub async fn reset_schedules(State(state): State<AppState>) -> ApiResult<ScheduleList> {
    let schedules = state.repo.reset_schedules().await?;
    Ok(Json(ScheduleList { schedules }))
}
