// [apps/lifespan-agent/src/config.rs]
/*!
 * APARATO: CONFIGURACION DEL PROCESO (ESTRATO L4-APP)
 * RESPONSABILIDAD: Una unica lectura de variables de entorno al
 * arranque; nunca un estado de configuracion mutable global (spec.md 6
 * "Configuration").
 */

use std::path::PathBuf;

const DEFAULT_DATABASE_URL: &str = "lifespan.db";
const DEFAULT_TICK_INTERVAL_MS: i64 = 5_000;
/// The sovereignty -> senescence guard waits for an external
/// `degradation_active` clock (spec.md 4.3); this engine realises that
/// clock as "lunar cycle count since birth reaches this threshold while
/// still sovereign", configurable since no fixed cycle is specified.
const DEFAULT_DEGRADATION_ONSET_CYCLE_THRESHOLD: i64 = 12;

/// Plain record with enumerated fields, read once at process startup.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub database_url: String,
    pub turso_auth_token: Option<String>,
    pub base_tick_interval_ms: i64,
    pub heartbeat_config_path: Option<PathBuf>,
    pub degradation_onset_cycle_threshold: i64,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("LIFESPAN_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let turso_auth_token = std::env::var("LIFESPAN_TURSO_AUTH_TOKEN").ok();

        let base_tick_interval_ms = std::env::var("LIFESPAN_TICK_INTERVAL_MS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_TICK_INTERVAL_MS);

        let heartbeat_config_path = std::env::var("LIFESPAN_HEARTBEAT_CONFIG").ok().map(PathBuf::from);

        let degradation_onset_cycle_threshold = std::env::var("LIFESPAN_DEGRADATION_ONSET_CYCLE_THRESHOLD")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_DEGRADATION_ONSET_CYCLE_THRESHOLD);

        Self {
            database_url,
            turso_auth_token,
            base_tick_interval_ms,
            heartbeat_config_path,
            degradation_onset_cycle_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults_when_nothing_is_set() {
        // SAFETY: single-threaded test process, no other test reads these keys.
        std::env::remove_var("LIFESPAN_DATABASE_URL");
        std::env::remove_var("LIFESPAN_TURSO_AUTH_TOKEN");
        std::env::remove_var("LIFESPAN_TICK_INTERVAL_MS");
        std::env::remove_var("LIFESPAN_HEARTBEAT_CONFIG");
        std::env::remove_var("LIFESPAN_DEGRADATION_ONSET_CYCLE_THRESHOLD");

        let config = EngineConfig::from_env();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.base_tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert!(config.turso_auth_token.is_none());
        assert!(config.heartbeat_config_path.is_none());
        assert_eq!(config.degradation_onset_cycle_threshold, DEFAULT_DEGRADATION_ONSET_CYCLE_THRESHOLD);
    }

    #[test]
    fn reads_every_variable_when_present() {
        std::env::set_var("LIFESPAN_DATABASE_URL", "libsql://example.turso.io");
        std::env::set_var("LIFESPAN_TURSO_AUTH_TOKEN", "secret-token");
        std::env::set_var("LIFESPAN_TICK_INTERVAL_MS", "2500");
        std::env::set_var("LIFESPAN_HEARTBEAT_CONFIG", "/etc/lifespan/tasks.json");

        let config = EngineConfig::from_env();
        assert_eq!(config.database_url, "libsql://example.turso.io");
        assert_eq!(config.turso_auth_token.as_deref(), Some("secret-token"));
        assert_eq!(config.base_tick_interval_ms, 2500);
        assert_eq!(config.heartbeat_config_path, Some(PathBuf::from("/etc/lifespan/tasks.json")));

        std::env::remove_var("LIFESPAN_DATABASE_URL");
        std::env::remove_var("LIFESPAN_TURSO_AUTH_TOKEN");
        std::env::remove_var("LIFESPAN_TICK_INTERVAL_MS");
        std::env::remove_var("LIFESPAN_HEARTBEAT_CONFIG");
    }
}
