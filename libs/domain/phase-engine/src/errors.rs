// [libs/domain/phase-engine/src/errors.rs]
/*!
 * APARATO: CATALOGO DE ERRORES DEL MOTOR DE FASES (ESTRATO L2)
 * RESPONSABILIDAD: Taxonomia de fallos que el motor de fases produce
 * por si mismo (spec.md 7).
 */

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseEngineError {
    /// Raised to the caller of `write_will` once the will is sealed.
    #[error("[L2_PHASE_WILL_SEALED]: will is locked since senescence onset")]
    WillLocked,

    /// Attempted transition not allowed by the guard table; the phase
    /// is left unchanged.
    #[error("[L2_PHASE_INVALID_TRANSITION]: no guard permits {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A codicil was attempted before the will had ever been locked.
    #[error("[L2_PHASE_WILL_UNLOCKED]: cannot append a codicil before the will is locked")]
    WillNotYetLocked,
}
