// [libs/domain/models/src/events.rs]
/*!
 * APARATO: APPEND-ONLY EVENT RECORDS (ESTRATO L2)
 * RESPONSABILIDAD: Formas de las tablas `lifecycle_events`,
 * `narrative_events`, `will_entries` y `spawn_queue` de spec.md 3.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub id: i64,
    pub from_phase: Phase,
    pub to_phase: Phase,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEvent {
    pub id: i64,
    pub label: String,
    pub detail: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// One versioned entry in the agent's will. `will_locked` on the
/// lifecycle row gates whether a new version may be appended; a
/// terminal-phase codicil is a distinct record type appended to the
/// locked will (spec.md 3, scenario 4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WillEntry {
    pub version: u32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WillCodicil {
    pub locked_will_version: u32,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
}

impl SpawnStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SpawnStatus::Pending => "pending",
            SpawnStatus::Accepted => "accepted",
            SpawnStatus::Rejected => "rejected",
            SpawnStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for SpawnStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "pending" => Ok(SpawnStatus::Pending),
            "accepted" => Ok(SpawnStatus::Accepted),
            "rejected" => Ok(SpawnStatus::Rejected),
            "completed" => Ok(SpawnStatus::Completed),
            other => Err(format!("unknown spawn_queue status literal: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnQueueEntry {
    pub id: i64,
    pub status: SpawnStatus,
    pub payload: String,
    pub created_at: DateTime<Utc>,
}
