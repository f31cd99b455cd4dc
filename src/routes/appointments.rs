use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    AppState, db,
    db::models::{
        ApiResponse, AppointmentFilter, CreateAppointmentRequest, UpdateAppointmentRequest,
    },
    error::AppError,
    realtime::{ChangeOp, EntityKind},
    services::{AppointmentsService, RequestContext},
    validation::ValidatedJson,
};

/// 获取预约列表，按日期和时间排序
pub async fn get_appointments(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(filter): Query<AppointmentFilter>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let appointments = AppointmentsService::list(&mut conn, &ctx, &filter)?;

    let response = ApiResponse::success(appointments, "Appointments retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

/// 创建预约。Publishes the appointment and its announcement notification
/// only after the transaction committed.
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let (appointment, notification) = AppointmentsService::create(&mut conn, &ctx, &payload)?;

    state
        .fanout
        .publish_row(
            ctx.team_id,
            EntityKind::Appointment,
            ChangeOp::Created,
            &appointment,
        )
        .await;
    state
        .fanout
        .publish_row(
            ctx.team_id,
            EntityKind::Notification,
            ChangeOp::Created,
            &notification,
        )
        .await;

    let response = ApiResponse::created(appointment, "Appointment created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// 获取单个预约
pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let appointment = AppointmentsService::get(&mut conn, &ctx, appointment_id)?;

    let response = ApiResponse::success(appointment, "Appointment retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

/// 更新预约（部分字段）
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(appointment_id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let appointment = AppointmentsService::update(&mut conn, &ctx, appointment_id, &payload)?;

    state
        .fanout
        .publish_row(
            ctx.team_id,
            EntityKind::Appointment,
            ChangeOp::Updated,
            &appointment,
        )
        .await;

    let response = ApiResponse::success(appointment, "Appointment updated successfully");
    Ok((StatusCode::OK, Json(response)))
}

/// 删除预约。Referencing notifications survive with the link cleared and are
/// fanned out as updates.
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(appointment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let cleared = AppointmentsService::delete(&mut conn, &ctx, appointment_id)?;

    state
        .fanout
        .publish_deleted(ctx.team_id, EntityKind::Appointment, appointment_id)
        .await;
    for notification in &cleared {
        state
            .fanout
            .publish_row(
                ctx.team_id,
                EntityKind::Notification,
                ChangeOp::Updated,
                notification,
            )
            .await;
    }

    let response = ApiResponse::<()>::ok("Appointment deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}
