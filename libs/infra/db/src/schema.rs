// [libs/infra/db/src/schema.rs]
/*!
 * APARATO: ESQUEMA PERSISTIDO (ESTRATO L3)
 * RESPONSABILIDAD: Las tablas de spec.md 3: `kv`, `lifecycle_events`,
 * `narrative_events`, `will_entries`, `will_codicils`, `spawn_queue`,
 * `heartbeat_schedule`, mas `schema_migrations` y `config_snapshot`
 * para el rastro de arranque (spec.md ambient configuration section).
 */

use libsql::Connection;
use tracing::{debug, info};

use crate::errors::DbError;

const BASE_TABLES: &[(&str, &str)] = &[
    (
        "TABLE_KV",
        r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
    "#,
    ),
    (
        "TABLE_LIFECYCLE_EVENTS",
        r#"
        CREATE TABLE IF NOT EXISTS lifecycle_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            from_phase TEXT NOT NULL,
            to_phase TEXT NOT NULL,
            reason TEXT NOT NULL,
            timestamp TEXT NOT NULL
        );
    "#,
    ),
    (
        "TABLE_NARRATIVE_EVENTS",
        r#"
        CREATE TABLE IF NOT EXISTS narrative_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT NOT NULL,
            detail TEXT,
            timestamp TEXT NOT NULL
        );
    "#,
    ),
    (
        "TABLE_WILL_ENTRIES",
        r#"
        CREATE TABLE IF NOT EXISTS will_entries (
            version INTEGER PRIMARY KEY,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    ),
    (
        "TABLE_WILL_CODICILS",
        r#"
        CREATE TABLE IF NOT EXISTS will_codicils (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            locked_will_version INTEGER NOT NULL,
            body TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    ),
    (
        "TABLE_SPAWN_QUEUE",
        r#"
        CREATE TABLE IF NOT EXISTS spawn_queue (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            status TEXT NOT NULL DEFAULT 'pending',
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    ),
    (
        "TABLE_HEARTBEAT_SCHEDULE",
        r#"
        CREATE TABLE IF NOT EXISTS heartbeat_schedule (
            task_name TEXT PRIMARY KEY,
            category TEXT NOT NULL,
            cron_expression TEXT,
            interval_ms INTEGER,
            enabled INTEGER NOT NULL DEFAULT 1,
            priority INTEGER NOT NULL DEFAULT 0,
            timeout_ms INTEGER NOT NULL,
            max_retries INTEGER NOT NULL DEFAULT 0,
            tier_minimum TEXT NOT NULL DEFAULT 'dead',
            last_run_at TEXT,
            next_run_at TEXT NOT NULL,
            last_result TEXT,
            last_error TEXT,
            run_count INTEGER NOT NULL DEFAULT 0,
            fail_count INTEGER NOT NULL DEFAULT 0,
            lease_owner TEXT,
            lease_expires_at TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
    "#,
    ),
    (
        "TABLE_SCHEMA_MIGRATIONS",
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            identifier TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
    "#,
    ),
    (
        "TABLE_CONFIG_SNAPSHOT",
        r#"
        CREATE TABLE IF NOT EXISTS config_snapshot (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recorded_at TEXT NOT NULL,
            config_json TEXT NOT NULL
        );
    "#,
    ),
];

const INDEXES: &[(&str, &str)] = &[
    (
        "IDX_HEARTBEAT_DUE",
        "CREATE INDEX IF NOT EXISTS idx_heartbeat_due ON heartbeat_schedule(enabled, next_run_at);",
    ),
    (
        "IDX_LIFECYCLE_EVENTS_TIME",
        "CREATE INDEX IF NOT EXISTS idx_lifecycle_events_time ON lifecycle_events(timestamp);",
    ),
    (
        "IDX_NARRATIVE_EVENTS_TIME",
        "CREATE INDEX IF NOT EXISTS idx_narrative_events_time ON narrative_events(timestamp);",
    ),
];

pub async fn apply_schema(connection: &Connection) -> Result<(), DbError> {
    info!("applying lifespan engine schema");

    for (identifier, sql) in BASE_TABLES {
        debug!("solidifying {identifier}");
        connection.execute(sql, ()).await.map_err(|err| DbError::QueryError(err))?;
    }

    for (identifier, sql) in INDEXES {
        debug!("indexing {identifier}");
        connection.execute(sql, ()).await.map_err(|err| DbError::QueryError(err))?;
    }

    record_migration(connection, "genesis_schema_v1").await?;
    Ok(())
}

async fn record_migration(connection: &Connection, identifier: &str) -> Result<(), DbError> {
    connection
        .execute(
            "INSERT OR IGNORE INTO schema_migrations (identifier, applied_at) VALUES (?1, CURRENT_TIMESTAMP)",
            libsql::params![identifier],
        )
        .await?;
    Ok(())
}
