// [libs/infra/db/src/client.rs]
/*!
 * APARATO: CLIENTE DE CONEXION LIBSQL (ESTRATO L3)
 * RESPONSABILIDAD: Abre un archivo local, una base `:memory:`, o un
 * cluster remoto `libsql://`, aplicando el esquema antes de que ningun
 * repositorio reciba una conexion (spec.md 6 "Persisted state layout").
 */

use std::sync::Arc;

use libsql::{Builder, Connection, Database};
use tracing::{info, instrument};

use crate::errors::DbError;
use crate::schema::apply_schema;

#[derive(Clone)]
pub struct LifespanDb {
    driver: Arc<Database>,
    /// Keeps an in-memory database alive for the process lifetime;
    /// libSQL drops `:memory:` data once the last connection closes.
    _memory_anchor: Option<Arc<Connection>>,
}

impl LifespanDb {
    #[instrument(skip(access_token))]
    pub async fn connect(url: &str, access_token: Option<String>) -> Result<Self, DbError> {
        if url.is_empty() {
            return Err(DbError::ConfigurationError("database url is empty".into()));
        }

        let is_remote = url.starts_with("libsql://") || url.starts_with("https://");
        let is_memory = url.contains(":memory:");

        let driver = if is_remote {
            let token = access_token.ok_or_else(|| DbError::ConfigurationError("remote database requires an access token".into()))?;
            Builder::new_remote(url.to_string(), token).build().await
        } else {
            Builder::new_local(url).build().await
        }
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

        let driver = Arc::new(driver);
        let mut anchor = None;

        if is_memory {
            let connection = driver.connect().map_err(|err| DbError::ConnectionError(err.to_string()))?;
            apply_schema(&connection).await?;
            anchor = Some(Arc::new(connection));
        } else {
            let connection = driver.connect().map_err(|err| DbError::ConnectionError(err.to_string()))?;
            apply_schema(&connection).await?;
        }

        info!("lifespan engine database ready at {url}");
        Ok(Self { driver, _memory_anchor: anchor })
    }

    pub fn connection(&self) -> Result<Connection, DbError> {
        self.driver.connect().map_err(|err| DbError::ConnectionError(err.to_string()))
    }
}
