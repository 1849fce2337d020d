use core::time::Duration;

use crate::skill::SkillId;

/// Externally visible combat state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum CombatState {
    Start,
    PlayerTurn,
    EnemyTurn,
    /// An action has been accepted and is resolving; new submissions bounce.
    Processing,
    Won,
    Lost,
}

impl CombatState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub const fn other(self) -> Self {
        match self {
            Self::Player => Self::Enemy,
            Self::Enemy => Self::Player,
        }
    }

    /// State shown while this side is taking its turn.
    pub const fn turn_state(self) -> CombatState {
        match self {
            Self::Player => CombatState::PlayerTurn,
            Self::Enemy => CombatState::EnemyTurn,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Victory,
    Defeat,
}

/// A turn's chosen action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnAction {
    UseSkill(SkillId),
    Pass,
}

/// Suggested pause after a step so a presentation layer can keep up.
///
/// Purely advisory; the rules never wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pacing {
    /// Initial screen after setup.
    Setup,
    /// Between phases of a turn.
    Brief,
    /// After an action or skipped turn has played out.
    Action,
}

impl Pacing {
    pub const fn duration(self) -> Duration {
        match self {
            Self::Setup => Duration::from_millis(1000),
            Self::Brief => Duration::from_millis(500),
            Self::Action => Duration::from_millis(1500),
        }
    }
}

/// What a call to [`super::CombatEngine::advance`] produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// A phase ran; call `advance` again after the suggested pause.
    Continue(Pacing),
    /// The player must submit an action before anything else happens.
    AwaitingInput,
    Finished(Outcome),
}

/// Internal sequencer position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    Setup,
    /// Start-of-turn upkeep for a side.
    Opening(Side),
    AwaitingInput,
    /// An accepted action waiting to resolve.
    Action(Side, TurnAction),
    /// End-of-turn tick, then hand over.
    Closing(Side),
    Finished(Outcome),
}
