// [libs/infra/db/src/will_repository.rs]
/*!
 * APARATO: REPOSITORIO DEL TESTAMENTO (ESTRATO L3)
 * RESPONSABILIDAD: Aplica las guardas puras de `lifespan-domain-phase-engine`
 * y persiste el resultado sobre `will_entries` / `will_codicils`
 * (spec.md 3, escenario 4).
 */

use chrono::{DateTime, Utc};
use libsql::{params, Connection};
use lifespan_domain_models::{WillCodicil, WillEntry};
use lifespan_domain_phase_engine::{append_lucid_codicil, write_will, PhaseEngineError};

use crate::errors::DbError;

pub async fn latest_will_version(connection: &Connection) -> Result<Option<u32>, DbError> {
    let mut rows = connection.query("SELECT MAX(version) FROM will_entries", ()).await?;
    match rows.next().await? {
        Some(row) => Ok(row.get::<Option<i64>>(0)?.map(|v| v as u32)),
        None => Ok(None),
    }
}

/// Writes a new will version, refusing once the lifecycle row reports
/// `will_locked`. Returns the would-be [`PhaseEngineError::WillLocked`]
/// unchanged so callers can surface it exactly as the pure guard raised it.
pub async fn write_new_version(
    connection: &Connection,
    will_locked: bool,
    body: String,
    created_at: DateTime<Utc>,
) -> Result<WillEntry, PhaseEngineError> {
    let next_version = latest_will_version(connection)
        .await
        .map_err(|err| PhaseEngineError::InvalidTransition {
            from: err.to_string(),
            to: "will_entries".into(),
        })?
        .map(|v| v + 1)
        .unwrap_or(1);

    let entry = write_will(will_locked, next_version, body, created_at)?;

    connection
        .execute(
            "INSERT INTO will_entries (version, body, created_at) VALUES (?1, ?2, ?3)",
            params![entry.version, entry.body.clone(), entry.created_at.to_rfc3339()],
        )
        .await
        .map_err(|err| PhaseEngineError::InvalidTransition {
            from: err.to_string(),
            to: "will_entries".into(),
        })?;

    Ok(entry)
}

pub async fn append_codicil(
    connection: &Connection,
    will_locked: bool,
    locked_will_version: u32,
    body: String,
    created_at: DateTime<Utc>,
) -> Result<WillCodicil, PhaseEngineError> {
    let codicil = append_lucid_codicil(will_locked, locked_will_version, body, created_at)?;

    connection
        .execute(
            "INSERT INTO will_codicils (locked_will_version, body, created_at) VALUES (?1, ?2, ?3)",
            params![codicil.locked_will_version, codicil.body.clone(), codicil.created_at.to_rfc3339()],
        )
        .await
        .map_err(|err| PhaseEngineError::InvalidTransition {
            from: err.to_string(),
            to: "will_codicils".into(),
        })?;

    Ok(codicil)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LifespanDb;

    #[tokio::test]
    async fn first_version_is_one_and_increments() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        let v1 = write_new_version(&connection, false, "draft one".into(), Utc::now()).await.unwrap();
        assert_eq!(v1.version, 1);

        let v2 = write_new_version(&connection, false, "draft two".into(), Utc::now()).await.unwrap();
        assert_eq!(v2.version, 2);
    }

    #[tokio::test]
    async fn refuses_a_new_version_once_locked() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        write_new_version(&connection, false, "draft one".into(), Utc::now()).await.unwrap();
        let err = write_new_version(&connection, true, "draft two".into(), Utc::now()).await.unwrap_err();
        assert_eq!(err, PhaseEngineError::WillLocked);
    }

    #[tokio::test]
    async fn codicil_appends_onto_a_locked_will() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        let entry = write_new_version(&connection, false, "final will".into(), Utc::now()).await.unwrap();
        let codicil = append_codicil(&connection, true, entry.version, "one last thing".into(), Utc::now()).await.unwrap();
        assert_eq!(codicil.locked_will_version, entry.version);
    }
}
