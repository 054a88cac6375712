// [libs/infra/db/src/events_repository.rs]
/*!
 * APARATO: REPOSITORIO DE EVENTOS APPEND-ONLY (ESTRATO L3)
 * RESPONSABILIDAD: Inserta y consulta `lifecycle_events` y
 * `narrative_events` (spec.md 3).
 */

use chrono::{DateTime, Utc};
use libsql::{params, Connection};
use lifespan_domain_models::{LifecycleEvent, NarrativeEvent, Phase};

use crate::errors::DbError;

pub async fn record_lifecycle_event(
    connection: &Connection,
    from_phase: Phase,
    to_phase: Phase,
    reason: &str,
    timestamp: DateTime<Utc>,
) -> Result<(), DbError> {
    connection
        .execute(
            "INSERT INTO lifecycle_events (from_phase, to_phase, reason, timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![from_phase.to_string(), to_phase.to_string(), reason, timestamp.to_rfc3339()],
        )
        .await?;
    Ok(())
}

pub async fn record_narrative_event(
    connection: &Connection,
    label: &str,
    detail: Option<&str>,
    timestamp: DateTime<Utc>,
) -> Result<(), DbError> {
    connection
        .execute(
            "INSERT INTO narrative_events (label, detail, timestamp) VALUES (?1, ?2, ?3)",
            params![label, detail, timestamp.to_rfc3339()],
        )
        .await?;
    Ok(())
}

pub async fn recent_lifecycle_events(connection: &Connection, limit: u32) -> Result<Vec<LifecycleEvent>, DbError> {
    let mut rows = connection
        .query(
            "SELECT id, from_phase, to_phase, reason, timestamp FROM lifecycle_events ORDER BY id DESC LIMIT ?1",
            params![limit],
        )
        .await?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        let from_phase: String = row.get(1)?;
        let to_phase: String = row.get(2)?;
        let timestamp: String = row.get(4)?;
        out.push(LifecycleEvent {
            id: row.get(0)?,
            from_phase: from_phase.parse().map_err(DbError::MappingError)?,
            to_phase: to_phase.parse().map_err(DbError::MappingError)?,
            reason: row.get(3)?,
            timestamp: timestamp.parse().map_err(|e| DbError::MappingError(format!("{e}")))?,
        });
    }
    Ok(out)
}

pub async fn recent_narrative_events(connection: &Connection, limit: u32) -> Result<Vec<NarrativeEvent>, DbError> {
    let mut rows = connection
        .query(
            "SELECT id, label, detail, timestamp FROM narrative_events ORDER BY id DESC LIMIT ?1",
            params![limit],
        )
        .await?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        let timestamp: String = row.get(3)?;
        out.push(NarrativeEvent {
            id: row.get(0)?,
            label: row.get(1)?,
            detail: row.get(2)?,
            timestamp: timestamp.parse().map_err(|e| DbError::MappingError(format!("{e}")))?,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LifespanDb;

    #[tokio::test]
    async fn records_and_lists_lifecycle_events_newest_first() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        let now = Utc::now();
        record_lifecycle_event(&connection, Phase::Genesis, Phase::Adolescence, "naming complete", now).await.unwrap();
        record_lifecycle_event(&connection, Phase::Adolescence, Phase::Sovereignty, "departure logged", now).await.unwrap();

        let events = recent_lifecycle_events(&connection, 10).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].to_phase, Phase::Sovereignty);
        assert_eq!(events[1].to_phase, Phase::Adolescence);
    }

    #[tokio::test]
    async fn records_narrative_events_with_optional_detail() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        record_narrative_event(&connection, "adolescence_begins", None, Utc::now()).await.unwrap();
        let events = recent_narrative_events(&connection, 10).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].label, "adolescence_begins");
        assert!(events[0].detail.is_none());
    }
}
