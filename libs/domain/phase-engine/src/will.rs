// [libs/domain/phase-engine/src/will.rs]
/*!
 * APARATO: SELLADO DEL TESTAMENTO (ESTRATO L2)
 * RESPONSABILIDAD: Guardas puras de `write_will` y
 * `append_lucid_codicil`; la persistencia real de las filas vive en
 * la capa de infraestructura (spec.md 3, 4.3, escenario 4).
 */

use lifespan_domain_models::WillEntry;

use crate::errors::PhaseEngineError;

/// Rejects the call once `will_locked` is set; the caller never
/// constructs the new `WillEntry` row on the locked path.
pub fn write_will(will_locked: bool, next_version: u32, body: String, created_at: chrono::DateTime<chrono::Utc>) -> Result<WillEntry, PhaseEngineError> {
    if will_locked {
        return Err(PhaseEngineError::WillLocked);
    }

    Ok(WillEntry { version: next_version, body, created_at })
}

/// A codicil may only reference a will that has already been locked
/// (spec.md scenario 4: terminal-phase codicils append to the sealed
/// will, they never unseal it).
pub fn append_lucid_codicil(will_locked: bool, locked_will_version: u32, body: String, created_at: chrono::DateTime<chrono::Utc>) -> Result<lifespan_domain_models::WillCodicil, PhaseEngineError> {
    if !will_locked {
        return Err(PhaseEngineError::WillNotYetLocked);
    }

    Ok(lifespan_domain_models::WillCodicil { locked_will_version, body, created_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn unlocked_will_accepts_new_versions() {
        let entry = write_will(false, 1, "v1 body".into(), Utc::now()).unwrap();
        assert_eq!(entry.version, 1);
    }

    #[test]
    fn locked_will_rejects_new_versions() {
        let err = write_will(true, 2, "v2 body".into(), Utc::now()).unwrap_err();
        assert_eq!(err, PhaseEngineError::WillLocked);
    }

    #[test]
    fn codicil_requires_a_locked_will() {
        assert!(append_lucid_codicil(false, 1, "last words".into(), Utc::now()).is_err());
        let codicil = append_lucid_codicil(true, 1, "last words".into(), Utc::now()).unwrap();
        assert_eq!(codicil.locked_will_version, 1);
    }
}
