//! Combat client binary.
//!
//! Composition root: reads configuration from the environment, loads the
//! content catalogs, builds both combatants and runs one session to its end.
//!
//! ```bash
//! # Auto-play the default matchup
//! cargo run -p combat-client
//!
//! # Pick the fighters and play by hand, without pauses
//! COMBAT_PLAYER=warlock COMBAT_ENEMY=frost_wraith COMBAT_INTERACTIVE=1 COMBAT_PACE_MS=0 \
//!     cargo run -p combat-client
//! ```

mod config;
mod input;
mod presentation;

use anyhow::Result;
use combat_content::ContentFactory;
use combat_runtime::{ChannelProvider, CombatSession, RandomProvider, RuntimeConfig};

use config::ClientConfig;
use presentation::Names;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();

    run(config, runtime_config).await
}

async fn run(config: ClientConfig, runtime_config: RuntimeConfig) -> Result<()> {
    let factory = match &config.content_dir {
        Some(dir) => ContentFactory::new(dir),
        None => ContentFactory::bundled(),
    };
    tracing::debug!("Loading content from {}", factory.data_dir().display());

    let rules = factory.load_config()?;
    let roster = factory.load_roster()?;
    let player = roster.require(&config.player)?.clone();
    let enemy = roster.require(&config.enemy)?.clone();
    tracing::info!("{} ({}) vs {} ({})", player.name, config.player, enemy.name, config.enemy);

    let seed = runtime_config.session_seed();
    let mut session = CombatSession::from_templates(
        &player,
        &enemy,
        rules,
        runtime_config.with_seed(seed),
    );
    let log = presentation::spawn_log(session.bus(), Names::new(&player, &enemy));

    let outcome = if config.interactive {
        let (provider, handle) = ChannelProvider::new(1);
        let prompt = input::spawn_prompt(handle);
        let outcome = session.run(&provider).await;
        drop(provider);
        prompt.await??;
        outcome?
    } else {
        session.run(&RandomProvider::new(seed)).await?
    };

    log.await?;
    tracing::info!("Combat finished: {} in round {}", outcome, session.engine().round());
    Ok(())
}
