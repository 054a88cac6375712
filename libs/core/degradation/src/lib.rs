// [libs/core/degradation/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DEGRADATION MODEL (ESTRATO L1)
 * RESPONSABILIDAD: Curva de decaimiento exponencial, modulada por
 * animo, que alimenta la probabilidad de fallo de herramienta, el
 * drift del heartbeat y la degradacion del modelo de inferencia
 * (spec.md 4.2).
 * =================================================================
 */

pub mod curve;
pub mod downgrade;
pub mod modulation;
pub mod wrap;

pub use curve::coefficient;
pub use downgrade::downgrade_model;
pub use modulation::{derive_state, modulate};
pub use wrap::{wrap_tool, SyntheticToolFailure, WrappedError};
