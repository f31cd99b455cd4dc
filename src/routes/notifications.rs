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
        ApiResponse, CreateNotificationRequest, NotificationFilter, UpdateNotificationRequest,
    },
    error::AppError,
    realtime::{ChangeOp, EntityKind},
    services::{NotificationsService, RequestContext},
    validation::ValidatedJson,
};

/// 获取通知列表，最新的在前
pub async fn get_notifications(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(filter): Query<NotificationFilter>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let notifications = NotificationsService::list(&mut conn, &ctx, &filter)?;

    let response = ApiResponse::success(notifications, "Notifications retrieved successfully");
    Ok((StatusCode::OK, Json(response)))
}

/// 创建通知
pub async fn create_notification(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    ValidatedJson(payload): ValidatedJson<CreateNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    let notification = NotificationsService::create(&mut conn, &ctx, &payload)?;

    state
        .fanout
        .publish_row(
            ctx.team_id,
            EntityKind::Notification,
            ChangeOp::Created,
            &notification,
        )
        .await;

    let response = ApiResponse::created(notification, "Notification created successfully");
    Ok((StatusCode::CREATED, Json(response)))
}

/// 标记通知为已读。Idempotent: repeating the call is a no-op, and a no-op
/// publishes nothing.
pub async fn update_notification(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(notification_id): Path<Uuid>,
    Json(payload): Json<UpdateNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.read != Some(true) {
        return Err(AppError::validation(
            "Only marking a notification as read is supported",
        ));
    }

    let mut conn = db::get_conn(&state.db)?;

    let (notification, changed) =
        NotificationsService::mark_read(&mut conn, &ctx, notification_id)?;

    if changed {
        state
            .fanout
            .publish_row(
                ctx.team_id,
                EntityKind::Notification,
                ChangeOp::Updated,
                &notification,
            )
            .await;
    }

    let response = ApiResponse::success(notification, "Notification updated successfully");
    Ok((StatusCode::OK, Json(response)))
}

/// 删除通知
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut conn = db::get_conn(&state.db)?;

    NotificationsService::delete(&mut conn, &ctx, notification_id)?;

    state
        .fanout
        .publish_deleted(ctx.team_id, EntityKind::Notification, notification_id)
        .await;

    let response = ApiResponse::<()>::ok("Notification deleted successfully");
    Ok((StatusCode::OK, Json(response)))
}
