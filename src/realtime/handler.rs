use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    AppState, db,
    db::models::appointment::AppointmentFilter,
    db::models::notification::NotificationFilter,
    error::AppError,
    middleware::auth::authenticate_token,
    realtime::events::{ChangeEvent, ClientFrame, ServerFrame},
    services::{AppointmentsService, NotificationsService, RequestContext},
};

/// Browsers cannot set headers on websocket upgrades, so the session token
/// travels as a query parameter here.
#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub token: Option<String>,
}

/// Outbound frames funnel through one mpsc writer so the broadcast forwarder
/// and the request reader never contend for the socket.
const OUTBOUND_BUFFER: usize = 64;

pub struct StreamHandler;

impl StreamHandler {
    /// Subscriber lifecycle: Connecting (session must resolve before the
    /// upgrade) → Subscribed (events flow) → Closed.
    pub async fn stream_handler(
        ws: WebSocketUpgrade,
        Query(query): Query<StreamQuery>,
        State(state): State<Arc<AppState>>,
    ) -> Result<Response, AppError> {
        let token = query
            .token
            .ok_or_else(|| AppError::auth("Missing authentication token"))?;
        let token =
            Uuid::parse_str(&token).map_err(|_| AppError::auth("Invalid session token"))?;
        let ctx = authenticate_token(&state, token).await?;

        info!(team_id = %ctx.team_id, "Stream upgrade request");
        Ok(ws.on_upgrade(move |socket| Self::handle_stream(socket, state, ctx)))
    }

    async fn handle_stream(socket: WebSocket, state: Arc<AppState>, ctx: RequestContext) {
        let (events, seq) = state.fanout.subscribe(ctx.team_id).await;
        let (out_tx, out_rx) = mpsc::channel::<ServerFrame>(OUTBOUND_BUFFER);

        if out_tx
            .send(ServerFrame::Subscribed {
                team_id: ctx.team_id,
                seq,
            })
            .await
            .is_err()
        {
            return;
        }

        let (sink, stream) = socket.split();
        let writer = tokio::spawn(Self::write_loop(sink, out_rx));

        tokio::select! {
            _ = Self::forward_events(events, out_tx.clone()) => {}
            _ = Self::read_loop(stream, state.clone(), ctx.clone(), out_tx.clone()) => {}
        }

        // Closed: dropping the senders ends the writer, dropping the
        // broadcast receiver releases this subscriber's buffer.
        drop(out_tx);
        let _ = writer.await;
        debug!(team_id = %ctx.team_id, "Stream closed");
    }

    /// Forwards the team's change events. A lagging receiver is told to
    /// resync and the stream continues; it is never allowed to back-pressure
    /// publishers.
    async fn forward_events(
        mut events: broadcast::Receiver<ChangeEvent>,
        out: mpsc::Sender<ServerFrame>,
    ) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if out.send(ServerFrame::Change { event }).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "Stream subscriber fell behind, requesting resync");
                    if out
                        .send(ServerFrame::ResyncRequired { missed })
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                // Team torn down; the final team event was already delivered.
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    }

    async fn read_loop(
        mut stream: SplitStream<WebSocket>,
        state: Arc<AppState>,
        ctx: RequestContext,
        out: mpsc::Sender<ServerFrame>,
    ) {
        while let Some(msg) = stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    let frame = match serde_json::from_str::<ClientFrame>(&text) {
                        Ok(frame) => frame,
                        Err(e) => {
                            debug!(error = %e, "Ignoring unparseable stream frame");
                            continue;
                        }
                    };

                    match frame {
                        ClientFrame::Ping => {
                            let pong = ServerFrame::Pong {
                                timestamp: chrono::Utc::now(),
                            };
                            if out.send(pong).await.is_err() {
                                return;
                            }
                        }
                        ClientFrame::Resync { since_seq } => {
                            debug!(team_id = %ctx.team_id, ?since_seq, "Resync requested");
                            match Self::build_resync(&state, &ctx).await {
                                Ok(frame) => {
                                    if out.send(frame).await.is_err() {
                                        return;
                                    }
                                }
                                Err(e) => {
                                    // The client falls back to the HTTP list
                                    // endpoints when a snapshot fails.
                                    warn!(error = %e, "Resync snapshot failed");
                                }
                            }
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!(team_id = %ctx.team_id, "Stream closed by client");
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "Stream receive error");
                    break;
                }
                _ => {}
            }
        }
    }

    /// Fresh full snapshots plus the seq they are current as of. The seq is
    /// captured before the reads: anything committed in between shows up
    /// both in the snapshot and on the live stream, and idempotent apply
    /// makes the duplicate harmless.
    async fn build_resync(
        state: &AppState,
        ctx: &RequestContext,
    ) -> Result<ServerFrame, AppError> {
        let seq = state.fanout.last_seq(ctx.team_id).await;

        let mut conn = db::get_conn(&state.db)?;
        let appointments =
            AppointmentsService::list(&mut conn, ctx, &AppointmentFilter::default())?;
        let notifications =
            NotificationsService::list(&mut conn, ctx, &NotificationFilter::default())?;

        Ok(ServerFrame::Resync {
            appointments,
            notifications,
            seq,
        })
    }

    async fn write_loop(
        mut sink: SplitSink<WebSocket, Message>,
        mut out_rx: mpsc::Receiver<ServerFrame>,
    ) {
        while let Some(frame) = out_rx.recv().await {
            let text = match serde_json::to_string(&frame) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize stream frame");
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    }
}
