// [libs/infra/db/src/errors.rs]
/*!
 * APARATO: CATALOGO DE ERRORES DE PERSISTENCIA (ESTRATO L3)
 * RESPONSABILIDAD: Distingue fallos de enlace, de configuracion y de
 * consulta sobre el almacen SQLite/libSQL.
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("[L3_DB_CONNECTION_FAULT]: {0}")]
    ConnectionError(String),

    #[error("[L3_DB_CONFIG_FAULT]: {0}")]
    ConfigurationError(String),

    #[error("[L3_DB_QUERY_FAULT]: {0}")]
    QueryError(#[from] libsql::Error),

    #[error("[L3_DB_MAPPING_FAULT]: {0}")]
    MappingError(String),

    #[error("[L3_DB_NOT_FOUND]: {0}")]
    NotFound(String),
}
