// [libs/infra/db/src/kv.rs]
/*!
 * APARATO: ALMACEN CLAVE-VALOR (ESTRATO L3)
 * RESPONSABILIDAD: Primitiva compartida sobre la tabla `kv`; todo lo
 * demas en esta caja se construye encima (spec.md 6 "Persisted state
 * layout" namespaces `lifecycle.*`, `session_pnl_cents`, `kill_switch_*`).
 */

use libsql::{params, Connection};

use crate::errors::DbError;

pub async fn get(connection: &Connection, key: &str) -> Result<Option<String>, DbError> {
    let mut rows = connection.query("SELECT value FROM kv WHERE key = ?1", params![key]).await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row.get::<String>(0)?)),
        None => Ok(None),
    }
}

pub async fn set(connection: &Connection, key: &str, value: &str) -> Result<(), DbError> {
    connection
        .execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .await?;
    Ok(())
}

pub async fn delete(connection: &Connection, key: &str) -> Result<(), DbError> {
    connection.execute("DELETE FROM kv WHERE key = ?1", params![key]).await?;
    Ok(())
}
