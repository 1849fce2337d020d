//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    /// Catalog directory; the bundled data when unset.
    pub content_dir: Option<PathBuf>,
    pub player: String,
    pub enemy: String,
    /// Read the player's choices from stdin instead of auto-playing.
    pub interactive: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: None,
            player: "knight".to_owned(),
            enemy: "ratling".to_owned(),
            interactive: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_CONTENT_DIR` - Directory holding the RON catalogs and balance table
    /// - `COMBAT_PLAYER` - Character id for the player (default: knight)
    /// - `COMBAT_ENEMY` - Character id for the enemy (default: ratling)
    /// - `COMBAT_INTERACTIVE` - Prompt for each player action (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.content_dir = env::var("COMBAT_CONTENT_DIR").ok().map(PathBuf::from);
        if let Ok(player) = env::var("COMBAT_PLAYER") {
            config.player = player;
        }
        if let Ok(enemy) = env::var("COMBAT_ENEMY") {
            config.enemy = enemy;
        }

        if let Some(enable) = read_env::<bool>("COMBAT_INTERACTIVE") {
            config.interactive = enable;
        } else if env::var("COMBAT_INTERACTIVE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.interactive = true;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
