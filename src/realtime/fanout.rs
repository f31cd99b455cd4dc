use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, error};
use uuid::Uuid;

use crate::realtime::events::{ChangeEvent, ChangeOp, EntityKind};

struct TeamChannel {
    tx: broadcast::Sender<ChangeEvent>,
    seq: u64,
}

/// Per-team change fan-out. Each team gets a lazily created broadcast
/// channel with a bounded buffer and its own monotonically increasing
/// sequence counter. Sequence assignment and send happen under the same
/// write lock, so subscribers of one team observe a strictly ordered stream.
///
/// Publishing never blocks on subscribers: a receiver that falls behind the
/// buffer capacity sees a lag error and is told to resync, and a publish
/// with no live subscribers is simply dropped.
#[derive(Clone)]
pub struct FanoutHub {
    teams: Arc<RwLock<HashMap<Uuid, TeamChannel>>>,
    capacity: usize,
}

impl FanoutHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            teams: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Subscribes to a team's stream. Returns the receiver plus the last
    /// assigned seq so the client knows where its snapshot stands.
    pub async fn subscribe(&self, team_id: Uuid) -> (broadcast::Receiver<ChangeEvent>, u64) {
        let mut teams = self.teams.write().await;
        let capacity = self.capacity;
        let entry = teams.entry(team_id).or_insert_with(|| TeamChannel {
            tx: broadcast::channel(capacity).0,
            seq: 0,
        });
        (entry.tx.subscribe(), entry.seq)
    }

    /// Publishes one committed mutation and returns its seq. Called only
    /// after the transaction committed; failures here are logged and never
    /// reach the writer.
    pub async fn publish(
        &self,
        team_id: Uuid,
        entity: EntityKind,
        op: ChangeOp,
        data: serde_json::Value,
    ) -> u64 {
        let mut teams = self.teams.write().await;
        let capacity = self.capacity;
        let entry = teams.entry(team_id).or_insert_with(|| TeamChannel {
            tx: broadcast::channel(capacity).0,
            seq: 0,
        });

        entry.seq += 1;
        let event = ChangeEvent {
            entity,
            op,
            team_id,
            seq: entry.seq,
            data,
            timestamp: chrono::Utc::now(),
        };

        if entry.tx.send(event).is_err() {
            debug!(%team_id, %entity, %op, "No live subscribers for change event");
        }

        entry.seq
    }

    /// Serializes a row and publishes its post-image.
    pub async fn publish_row<T: Serialize>(
        &self,
        team_id: Uuid,
        entity: EntityKind,
        op: ChangeOp,
        row: &T,
    ) {
        match serde_json::to_value(row) {
            Ok(data) => {
                self.publish(team_id, entity, op, data).await;
            }
            Err(e) => {
                error!(%team_id, %entity, %op, error = %e, "Failed to serialize change event payload");
            }
        }
    }

    /// Deletes carry only the row identifier.
    pub async fn publish_deleted(&self, team_id: Uuid, entity: EntityKind, row_id: Uuid) {
        self.publish(
            team_id,
            entity,
            ChangeOp::Deleted,
            serde_json::json!({ "id": row_id }),
        )
        .await;
    }

    pub async fn last_seq(&self, team_id: Uuid) -> u64 {
        let teams = self.teams.read().await;
        teams.get(&team_id).map(|entry| entry.seq).unwrap_or(0)
    }

    pub async fn subscriber_count(&self, team_id: Uuid) -> usize {
        let teams = self.teams.read().await;
        teams
            .get(&team_id)
            .map(|entry| entry.tx.receiver_count())
            .unwrap_or(0)
    }

    /// Tenant teardown: emits the final team-deleted event, then drops the
    /// channel so every subscriber sees end-of-stream.
    pub async fn close_team(&self, team_id: Uuid) {
        let mut teams = self.teams.write().await;
        if let Some(mut entry) = teams.remove(&team_id) {
            entry.seq += 1;
            let event = ChangeEvent {
                entity: EntityKind::Team,
                op: ChangeOp::Deleted,
                team_id,
                seq: entry.seq,
                data: serde_json::json!({ "id": team_id }),
                timestamp: chrono::Utc::now(),
            };
            let _ = entry.tx.send(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::broadcast::error::RecvError;

    #[tokio::test]
    async fn test_subscriber_only_sees_own_team() {
        let hub = FanoutHub::new(16);
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();

        let (mut rx_a, _) = hub.subscribe(team_a).await;
        let (mut rx_b, _) = hub.subscribe(team_b).await;

        hub.publish(
            team_a,
            EntityKind::Appointment,
            ChangeOp::Created,
            json!({"id": "a1"}),
        )
        .await;

        let event = rx_a.recv().await.unwrap();
        assert_eq!(event.team_id, team_a);
        assert_eq!(event.seq, 1);

        // Team B saw nothing.
        assert!(matches!(
            rx_b.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn test_seq_is_monotonic_per_team() {
        let hub = FanoutHub::new(16);
        let team = Uuid::new_v4();
        let (mut rx, start_seq) = hub.subscribe(team).await;
        assert_eq!(start_seq, 0);

        for _ in 0..5 {
            hub.publish(
                team,
                EntityKind::Notification,
                ChangeOp::Created,
                json!({}),
            )
            .await;
        }

        let mut last = 0;
        for _ in 0..5 {
            let event = rx.recv().await.unwrap();
            assert!(event.seq > last);
            last = event.seq;
        }
        assert_eq!(last, 5);
        assert_eq!(hub.last_seq(team).await, 5);
    }

    #[tokio::test]
    async fn test_seq_survives_subscriber_churn() {
        let hub = FanoutHub::new(16);
        let team = Uuid::new_v4();

        hub.publish(team, EntityKind::Appointment, ChangeOp::Created, json!({}))
            .await;

        let (_rx, seq) = hub.subscribe(team).await;
        assert_eq!(seq, 1);

        drop(_rx);
        let next = hub
            .publish(team, EntityKind::Appointment, ChangeOp::Updated, json!({}))
            .await;
        assert_eq!(next, 2);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_block_or_fail() {
        let hub = FanoutHub::new(4);
        let team = Uuid::new_v4();

        for _ in 0..100 {
            hub.publish(team, EntityKind::Appointment, ChangeOp::Created, json!({}))
                .await;
        }
        assert_eq!(hub.last_seq(team).await, 100);
        assert_eq!(hub.subscriber_count(team).await, 0);
    }

    #[tokio::test]
    async fn test_slow_subscriber_sees_lag_not_backpressure() {
        let hub = FanoutHub::new(4);
        let team = Uuid::new_v4();
        let (mut rx, _) = hub.subscribe(team).await;

        // Overflow the buffer without the subscriber draining it.
        for _ in 0..10 {
            hub.publish(team, EntityKind::Appointment, ChangeOp::Updated, json!({}))
                .await;
        }

        match rx.recv().await {
            Err(RecvError::Lagged(missed)) => assert!(missed > 0),
            other => panic!("Expected lag, got {:?}", other),
        }

        // The stream keeps going after the lag signal.
        let event = rx.recv().await.unwrap();
        assert!(event.seq > 0);
    }

    #[tokio::test]
    async fn test_close_team_emits_final_event_then_closes() {
        let hub = FanoutHub::new(16);
        let team = Uuid::new_v4();
        let (mut rx, _) = hub.subscribe(team).await;

        hub.close_team(team).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.entity, EntityKind::Team);
        assert_eq!(event.op, ChangeOp::Deleted);

        assert!(matches!(rx.recv().await, Err(RecvError::Closed)));
    }
}
