// [libs/infra/db/src/lib.rs]
/*!
 * =================================================================
 * APARATO: LIFESPAN PERSISTENCE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: El unico crate con conocimiento de SQL; todo lo
 * demas en el workspace razona en terminos de los tipos de
 * `lifespan-domain-models` y de los puertos que este crate implementa
 * (`ScheduleStore`).
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod events_repository;
pub mod heartbeat_repository;
pub mod kv;
pub mod lifecycle_repository;
pub mod risk_repository;
pub mod schema;
pub mod spawn_repository;
pub mod will_repository;

pub use client::LifespanDb;
pub use errors::DbError;
pub use heartbeat_repository::HeartbeatRepository;
