//! Session configuration.
use std::env;
use std::time::Duration;

use combat_core::Pacing;

use crate::events::EventBus;

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Multiplier applied to every pacing hint. Zero disables pauses.
    pub pace_scale: f32,
    pub bus_capacity: usize,
    /// Fixed game seed; a random one is drawn per session when unset.
    pub seed: Option<u64>,
    /// Consecutive rejected player actions tolerated before giving up.
    pub max_rejections: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            pace_scale: 1.0,
            bus_capacity: EventBus::DEFAULT_CAPACITY,
            seed: None,
            max_rejections: 16,
        }
    }
}

impl RuntimeConfig {
    /// No pauses at all, for tests and headless runs.
    pub fn instant() -> Self {
        Self {
            pace_scale: 0.0,
            ..Self::default()
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_PACE_MS` - Milliseconds per nominal pacing second (default: 1000, 0 disables pauses)
    /// - `COMBAT_BUS_CAPACITY` - Buffered events per topic (default: 256)
    /// - `COMBAT_SEED` - Fixed game seed (default: random)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u32>("COMBAT_PACE_MS") {
            config.pace_scale = ms as f32 / 1000.0;
        }
        if let Some(capacity) = read_env::<usize>("COMBAT_BUS_CAPACITY") {
            config.bus_capacity = capacity.max(1);
        }
        config.seed = read_env::<u64>("COMBAT_SEED");

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured seed, or a fresh random one.
    pub fn session_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    pub fn pause_for(&self, pacing: Pacing) -> Duration {
        if self.pace_scale <= 0.0 {
            return Duration::ZERO;
        }
        pacing.duration().mul_f32(self.pace_scale)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pauses_scale_with_pace() {
        let config = RuntimeConfig {
            pace_scale: 0.5,
            ..RuntimeConfig::default()
        };
        assert_eq!(config.pause_for(Pacing::Action), Duration::from_millis(750));
        assert_eq!(
            RuntimeConfig::instant().pause_for(Pacing::Setup),
            Duration::ZERO
        );
    }

    #[test]
    fn fixed_seed_is_stable() {
        let config = RuntimeConfig::default().with_seed(42);
        assert_eq!(config.session_seed(), 42);
        assert_eq!(config.session_seed(), 42);
    }
}
