use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::db::models::{Appointment, Notification};

/// Table a change event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Appointment,
    Notification,
    Team,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Appointment => write!(f, "appointment"),
            EntityKind::Notification => write!(f, "notification"),
            EntityKind::Team => write!(f, "team"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOp {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for ChangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeOp::Created => write!(f, "created"),
            ChangeOp::Updated => write!(f, "updated"),
            ChangeOp::Deleted => write!(f, "deleted"),
        }
    }
}

/// One committed mutation. `data` is the full row post-image for
/// created/updated and `{"id": ...}` for deleted. `seq` increases
/// monotonically per team; consumers apply idempotently by row id and
/// `updated_at`, so duplicate delivery after a resync is harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub entity: EntityKind,
    pub op: ChangeOp,
    pub team_id: Uuid,
    pub seq: u64,
    pub data: serde_json::Value,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Server-to-client stream frames.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerFrame {
    Subscribed {
        team_id: Uuid,
        seq: u64,
    },
    Change {
        #[serde(flatten)]
        event: ChangeEvent,
    },
    Pong {
        timestamp: chrono::DateTime<chrono::Utc>,
    },
    /// The subscriber's buffer overflowed; it must resync before trusting
    /// its local state again.
    ResyncRequired {
        missed: u64,
    },
    Resync {
        appointments: Vec<Appointment>,
        notifications: Vec<Notification>,
        seq: u64,
    },
}

/// Client-to-server stream frames.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    Ping,
    /// The server answers with fresh snapshots and the current seq; we keep
    /// no event log, so the reply is a full snapshot regardless of
    /// `since_seq`.
    Resync { since_seq: Option<u64> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_event_serialization() {
        let event = ChangeEvent {
            entity: EntityKind::Appointment,
            op: ChangeOp::Updated,
            team_id: Uuid::new_v4(),
            seq: 42,
            data: json!({"id": "abc", "status": "confirmed"}),
            timestamp: chrono::Utc::now(),
        };

        let serialized = serde_json::to_string(&event).unwrap();
        assert!(serialized.contains("\"appointment\""));
        assert!(serialized.contains("\"updated\""));

        let deserialized: ChangeEvent = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized.entity, EntityKind::Appointment);
        assert_eq!(deserialized.op, ChangeOp::Updated);
        assert_eq!(deserialized.seq, 42);
    }

    #[test]
    fn test_server_frame_tagging() {
        let frame = ServerFrame::ResyncRequired { missed: 7 };
        let serialized = serde_json::to_string(&frame).unwrap();
        assert!(serialized.contains("\"resync_required\""));
        assert!(serialized.contains("\"missed\":7"));
    }

    #[test]
    fn test_client_frame_parsing() {
        let ping: ClientFrame = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(ping, ClientFrame::Ping));

        let resync: ClientFrame =
            serde_json::from_str(r#"{"type":"resync","since_seq":10}"#).unwrap();
        match resync {
            ClientFrame::Resync { since_seq } => assert_eq!(since_seq, Some(10)),
            _ => panic!("Expected resync frame"),
        }

        assert!(serde_json::from_str::<ClientFrame>(r#"{"type":"subscribe"}"#).is_err());
    }
}
