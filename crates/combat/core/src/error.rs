//! Common error infrastructure for combat-core.
//!
//! Nothing in the rules engine panics or aborts a turn: every refused request
//! (insufficient energy, skill on cooldown, wrong turn state) is a *rejection*
//! that leaves state untouched and is reported both as an `Err` to the caller
//! and as a [`crate::CombatEvent::ActionRejected`] notification. Callers use
//! the [`ErrorSeverity`] to decide whether asking again can help.

use crate::engine::CombatState;
use crate::skill::SkillId;

/// Whether a refused request can succeed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed on a later turn.
    ///
    /// Examples: skill on cooldown, not enough energy
    Recoverable,

    /// Invalid input that will never succeed without changes.
    ///
    /// Examples: unknown skill, action submitted outside the player's turn
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Shared classification for combat-core errors.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier of the variant, for logs and UIs.
    fn error_code(&self) -> &'static str;
}

/// Reasons a skill use or turn action is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejection {
    #[error("skill {skill} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { skill: SkillId, remaining: u32 },

    #[error("not enough energy: {cost} required, {available} available")]
    InsufficientEnergy { cost: i32, available: i32 },

    #[error("skill {0} is not known by this combatant")]
    UnknownSkill(SkillId),

    #[error("combatant is defeated and cannot act")]
    Defeated,

    #[error("actions are not accepted while combat is in state {0}")]
    WrongState(CombatState),

    #[error("the turn is still resolving its opening phase")]
    NotAwaitingInput,
}

impl CombatError for Rejection {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OnCooldown { .. } | Self::InsufficientEnergy { .. } | Self::NotAwaitingInput => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownSkill(_) | Self::Defeated | Self::WrongState(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OnCooldown { .. } => "ON_COOLDOWN",
            Self::InsufficientEnergy { .. } => "INSUFFICIENT_ENERGY",
            Self::UnknownSkill(_) => "UNKNOWN_SKILL",
            Self::Defeated => "DEFEATED",
            Self::WrongState(_) => "WRONG_STATE",
            Self::NotAwaitingInput => "NOT_AWAITING_INPUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_rejections_are_recoverable() {
        let rejection = Rejection::InsufficientEnergy {
            cost: 30,
            available: 10,
        };
        assert!(rejection.severity().is_recoverable());
        assert_eq!(rejection.error_code(), "INSUFFICIENT_ENERGY");
    }

    #[test]
    fn state_rejections_are_validation_errors() {
        let rejection = Rejection::WrongState(CombatState::Processing);
        assert_eq!(rejection.severity(), ErrorSeverity::Validation);
        assert_eq!(
            rejection.to_string(),
            "actions are not accepted while combat is in state PROCESSING"
        );
    }
}
