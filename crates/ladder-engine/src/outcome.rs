use ladder_core::{AuditEntry, Version};

use crate::error::{EngineError, StepFailure};

/// Why a run stopped short of its target.
#[derive(Debug)]
pub enum HaltReason {
    StepFailed(StepFailure),
    /// No further migration existed in the walking direction.
    BoundaryReached,
}

/// Result of [`Engine::migrate_to_version`](crate::Engine::migrate_to_version).
///
/// `steps` lists the attempts made by this call only; the engine's audit trail
/// keeps the full history.
#[derive(Debug)]
pub enum Outcome {
    /// Current version already matched the resolved target; nothing ran.
    AlreadyAt(Version),
    Reached {
        version: Version,
        steps: Vec<AuditEntry>,
    },
    Halted {
        version: Version,
        target: Version,
        steps: Vec<AuditEntry>,
        reason: HaltReason,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Halted { .. })
    }

    /// The persisted version when the call returned.
    pub fn version(&self) -> &Version {
        match self {
            Outcome::AlreadyAt(version)
            | Outcome::Reached { version, .. }
            | Outcome::Halted { version, .. } => version,
        }
    }

    pub fn steps(&self) -> &[AuditEntry] {
        match self {
            Outcome::AlreadyAt(_) => &[],
            Outcome::Reached { steps, .. } | Outcome::Halted { steps, .. } => steps,
        }
    }

    /// The failed step, when a unit stopped the run.
    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            Outcome::Halted {
                reason: HaltReason::StepFailed(failure),
                ..
            } => Some(failure),
            _ => None,
        }
    }

    /// Convert a halted run into an error, for callers that only care whether
    /// the target was reached.
    pub fn into_result(self) -> Result<Version, EngineError> {
        match self {
            Outcome::AlreadyAt(version) | Outcome::Reached { version, .. } => Ok(version),
            Outcome::Halted {
                reason: HaltReason::StepFailed(failure),
                ..
            } => Err(EngineError::Step(failure)),
            Outcome::Halted {
                version,
                target,
                reason: HaltReason::BoundaryReached,
                ..
            } => Err(EngineError::BoundaryReached { version, target }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_core::{Direction, MigrationId};

    #[test]
    fn boundary_halt_converts_to_error() {
        let outcome = Outcome::Halted {
            version: Version::Zero,
            target: Version::At(MigrationId::new("v2").unwrap()),
            steps: Vec::new(),
            reason: HaltReason::BoundaryReached,
        };
        assert!(!outcome.is_success());
        assert!(outcome.failure().is_none());
        assert!(matches!(
            outcome.into_result(),
            Err(EngineError::BoundaryReached { .. })
        ));
    }

    #[test]
    fn already_at_has_no_steps() {
        let v = Version::At(MigrationId::new("v1").unwrap());
        let outcome = Outcome::AlreadyAt(v.clone());
        assert!(outcome.is_success());
        assert!(outcome.steps().is_empty());
        assert_eq!(outcome.version(), &v);
        assert_eq!(outcome.into_result().unwrap(), v);
    }

    #[test]
    fn reached_reports_its_steps() {
        let v1 = MigrationId::new("v1").unwrap();
        let outcome = Outcome::Reached {
            version: Version::At(v1.clone()),
            steps: vec![AuditEntry::new(v1, Direction::Up)],
        };
        assert_eq!(outcome.steps().len(), 1);
        assert_eq!(outcome.steps()[0].to_string(), "v1:up");
    }
}
