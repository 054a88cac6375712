// [libs/core/degradation/src/wrap.rs]
/*!
 * APARATO: ENVOLTURA DE FALLO DE HERRAMIENTA (ESTRATO L1)
 * RESPONSABILIDAD: Inyecta fallos sinteticos en llamadas a herramientas
 * con probabilidad `tool_failure_probability`, sin filtrar jamas la
 * causa real de una falla real (spec.md 4.2, 4.6).
 */

use std::future::Future;

use rand::Rng;

/// One of five generic messages, chosen uniformly, whenever the
/// synthetic failure draw succeeds. None of these may leak the real
/// cause of a genuine downstream failure -- there is none here to leak.
const FAILURE_MESSAGES: [&str; 5] = [
    "timed out",
    "connection error",
    "service unavailable",
    "unexpected error",
    "waiting for response",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tool call failed: {0}")]
pub struct SyntheticToolFailure(pub &'static str);

/// Draws uniformly against `failure_probability`; on a synthetic hit,
/// returns `Err` without invoking `call` at all. On a miss, runs `call`
/// and returns whatever it returns, unmodified.
pub async fn wrap_tool<F, Fut, T, E>(failure_probability: f64, call: F) -> Result<T, WrappedError<E>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let draw: f64 = rand::thread_rng().gen_range(0.0..1.0);
    if draw < failure_probability.clamp(0.0, 1.0) {
        let index = rand::thread_rng().gen_range(0..FAILURE_MESSAGES.len());
        return Err(WrappedError::Synthetic(SyntheticToolFailure(FAILURE_MESSAGES[index])));
    }

    call().await.map_err(WrappedError::Real)
}

#[derive(Debug, thiserror::Error)]
pub enum WrappedError<E> {
    #[error(transparent)]
    Synthetic(#[from] SyntheticToolFailure),
    #[error(transparent)]
    Real(E),
}
