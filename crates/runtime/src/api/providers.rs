//! Asynchronous abstraction for sourcing the player's intent.
//!
//! A session asks its [`ActionProvider`] whenever the engine waits for input,
//! so the same fight can be driven by a human, a script or a random policy.
use std::collections::VecDeque;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::{Mutex, mpsc};

use combat_core::{SkillId, TurnAction};

use super::errors::{Result, RuntimeError};
use super::view::TurnView;

/// Trait for providing the player's action for the current turn.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    async fn provide_action(&self, view: TurnView) -> Result<TurnAction>;
}

/// Always passes. Useful for testing or as a fallback.
pub struct PassActionProvider;

#[async_trait]
impl ActionProvider for PassActionProvider {
    async fn provide_action(&self, _view: TurnView) -> Result<TurnAction> {
        Ok(TurnAction::Pass)
    }
}

/// Replays a fixed list of actions, then passes.
pub struct ScriptedProvider {
    script: Mutex<VecDeque<TurnAction>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = TurnAction>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    /// Script made only of skill uses.
    pub fn skills(ids: impl IntoIterator<Item = u32>) -> Self {
        Self::new(ids.into_iter().map(|id| TurnAction::UseSkill(SkillId(id))))
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn provide_action(&self, view: TurnView) -> Result<TurnAction> {
        match self.script.lock().await.pop_front() {
            Some(action) => Ok(action),
            None => {
                tracing::debug!("script exhausted in round {}, passing", view.round);
                Ok(TurnAction::Pass)
            }
        }
    }
}

/// Picks uniformly among usable skills, passing when none is.
///
/// Seeded so auto-played sessions replay exactly.
pub struct RandomProvider {
    rng: Mutex<StdRng>,
}

impl RandomProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait]
impl ActionProvider for RandomProvider {
    async fn provide_action(&self, view: TurnView) -> Result<TurnAction> {
        let usable: Vec<SkillId> = view.usable().collect();
        if usable.is_empty() {
            return Ok(TurnAction::Pass);
        }
        let pick = self.rng.lock().await.gen_range(0..usable.len());
        Ok(TurnAction::UseSkill(usable[pick]))
    }
}

/// Forwards each view to a UI and waits for its answer.
pub struct ChannelProvider {
    views: mpsc::Sender<TurnView>,
    actions: Mutex<mpsc::Receiver<TurnAction>>,
}

/// UI side of a [`ChannelProvider`].
pub struct ChannelHandle {
    pub views: mpsc::Receiver<TurnView>,
    pub actions: mpsc::Sender<TurnAction>,
}

impl ChannelProvider {
    pub fn new(buffer: usize) -> (Self, ChannelHandle) {
        let buffer = buffer.max(1);
        let (view_tx, view_rx) = mpsc::channel(buffer);
        let (action_tx, action_rx) = mpsc::channel(buffer);
        let provider = Self {
            views: view_tx,
            actions: Mutex::new(action_rx),
        };
        let handle = ChannelHandle {
            views: view_rx,
            actions: action_tx,
        };
        (provider, handle)
    }
}

#[async_trait]
impl ActionProvider for ChannelProvider {
    async fn provide_action(&self, view: TurnView) -> Result<TurnAction> {
        self.views
            .send(view)
            .await
            .map_err(|_| RuntimeError::ActionProviderChannelClosed)?;
        self.actions
            .lock()
            .await
            .recv()
            .await
            .ok_or(RuntimeError::ActionProviderChannelClosed)
    }
}
