//! Headless game loop: load, play, report.

use anyhow::{Context, Result};
use game_content::{ConfigLoader, LevelLoader};
use game_core::{
    Command, GameConfig, GameError, GameEvent, GameStatus, LevelDefinition, SpellOutcome,
};
use runtime::{ChannelCommandProvider, CommandProvider, GameSession, ScriptedCommandProvider};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};

use crate::config::CliConfig;

/// Runs the configured level to completion and returns its outcome.
pub async fn run(config: &CliConfig) -> Result<GameStatus> {
    let level = load_level(config)?;
    let game_config = match &config.game_config {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };

    match &config.script {
        Some(path) => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script {}", path.display()))?;
            let provider = ScriptedCommandProvider::from_script(&script)?;
            tracing::info!("Playing {} scripted commands", provider.remaining());
            play(GameSession::new(level, game_config, provider)?).await
        }
        None => {
            let (tx, provider) = ChannelCommandProvider::channel(16);
            tokio::spawn(read_stdin(tx));
            play(GameSession::new(level, game_config, provider)?).await
        }
    }
}

fn load_level(config: &CliConfig) -> Result<LevelDefinition> {
    let mut levels = match &config.level {
        Some(path) => LevelLoader::load(path)?,
        None => LevelLoader::builtin()?,
    };
    anyhow::ensure!(
        config.spawn < levels.len(),
        "Spawn {} requested but the level only has {}",
        config.spawn,
        levels.len()
    );
    Ok(levels.swap_remove(config.spawn))
}

async fn play<P: CommandProvider>(mut session: GameSession<P>) -> Result<GameStatus> {
    let mut events = session.subscribe();
    print_map(&session);

    loop {
        let status = session.step().await.inspect_err(|error| {
            tracing::error!(
                "Session aborted ({} {}): {}",
                error.severity().as_str(),
                error.error_code(),
                error
            );
        })?;
        drain_events(&mut events);
        print_map(&session);

        if status.is_terminal() {
            let hero = session.state().hero();
            println!(
                "Game {} after {} rounds ({} / {} hp)",
                status,
                session.state().turn.round,
                hero.health(),
                hero.max_health()
            );
            return Ok(status);
        }
    }
}

fn print_map<P: CommandProvider>(session: &GameSession<P>) {
    let state = session.state();
    let hero = state.hero();
    println!(
        "-- round {} | hp {}/{} | mana {}/{} | {} / {} | {} enemies",
        state.turn.round,
        hero.health(),
        hero.max_health(),
        hero.mana(),
        hero.max_mana(),
        hero.weapon.name,
        hero.spell.name,
        state.living_enemies().count()
    );
    for row in state.render_rows() {
        println!("{row}");
    }
}

fn drain_events(events: &mut broadcast::Receiver<GameEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => println!("{}", describe(&event)),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                tracing::warn!("Dropped {} events", skipped);
            }
            Err(_) => break,
        }
    }
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::MeleeHit { attacker, position } => {
            format!("{attacker} strikes {position}")
        }
        GameEvent::SpellPath {
            caster,
            direction,
            path,
            outcome,
        } => {
            let verdict = match outcome {
                SpellOutcome::ActorHit => "hits",
                SpellOutcome::InanimateHit => "fizzles against",
                SpellOutcome::Evaporate => "evaporates at",
            };
            let end = path
                .last()
                .map_or_else(|| "its source".to_string(), ToString::to_string);
            format!("{caster} casts {direction}: {verdict} {end}")
        }
        GameEvent::TreasureLooted {
            actor, treasure, ..
        } => format!("{actor} finds {}", treasure.label()),
        GameEvent::ActorDied { actor, position } => format!("{actor} dies at {position}"),
        GameEvent::RoundCompleted { round, status } => format!("round {round}: {status}"),
    }
}

/// Forwards commands typed on stdin until EOF or the session goes away.
async fn read_stdin(tx: mpsc::Sender<Command>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(error) => {
                tracing::warn!("Failed to read stdin: {}", error);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                if tx.send(command).await.is_err() {
                    break;
                }
            }
            Err(error) => eprintln!("{error}"),
        }
    }
    tracing::debug!("Stdin closed");
}
