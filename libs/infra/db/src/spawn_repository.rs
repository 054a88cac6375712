// [libs/infra/db/src/spawn_repository.rs]
/*!
 * APARATO: REPOSITORIO DE LA COLA DE REPLICACION (ESTRATO L3)
 * RESPONSABILIDAD: CRUD sobre `spawn_queue` (spec.md 3, 4.3
 * "replication_decision").
 */

use chrono::Utc;
use libsql::{params, Connection};
use lifespan_domain_models::{SpawnQueueEntry, SpawnStatus};

use crate::errors::DbError;

pub async fn enqueue(connection: &Connection, payload: &str) -> Result<i64, DbError> {
    connection
        .execute(
            "INSERT INTO spawn_queue (status, payload, created_at) VALUES ('pending', ?1, ?2)",
            params![payload, Utc::now().to_rfc3339()],
        )
        .await?;
    Ok(connection.last_insert_rowid())
}

pub async fn set_status(connection: &Connection, id: i64, status: SpawnStatus) -> Result<(), DbError> {
    let changed = connection
        .execute("UPDATE spawn_queue SET status = ?1 WHERE id = ?2", params![status.as_str(), id])
        .await?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("spawn_queue row {id}")));
    }
    Ok(())
}

pub async fn pending(connection: &Connection) -> Result<Vec<SpawnQueueEntry>, DbError> {
    let mut rows = connection
        .query("SELECT id, status, payload, created_at FROM spawn_queue WHERE status = 'pending' ORDER BY id ASC", ())
        .await?;

    let mut out = Vec::new();
    while let Some(row) = rows.next().await? {
        let status: String = row.get(1)?;
        let created_at: String = row.get(3)?;
        out.push(SpawnQueueEntry {
            id: row.get(0)?,
            status: status.parse().map_err(DbError::MappingError)?,
            payload: row.get(2)?,
            created_at: created_at.parse().map_err(|e| DbError::MappingError(format!("{e}")))?,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LifespanDb;

    #[tokio::test]
    async fn enqueues_and_lists_pending_entries() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        let id = enqueue(&connection, "{\"reason\":\"capacity\"}").await.unwrap();
        let entries = pending(&connection).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, id);
        assert_eq!(entries[0].status, SpawnStatus::Pending);
    }

    #[tokio::test]
    async fn accepted_entries_drop_out_of_the_pending_list() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        let id = enqueue(&connection, "{}").await.unwrap();
        set_status(&connection, id, SpawnStatus::Accepted).await.unwrap();
        assert!(pending(&connection).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn setting_status_on_a_missing_row_reports_not_found() {
        let db = LifespanDb::connect(":memory:", None).await.unwrap();
        let connection = db.connection().unwrap();

        let err = set_status(&connection, 999, SpawnStatus::Rejected).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound(_)));
    }
}
