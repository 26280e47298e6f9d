//! Umbra terminal client.
//!
//! Composition root: reads the environment, loads the map and config through
//! `umbra-content`, wires the terminal interface, the ray-cast oracle and the
//! wandering NPC brain into a [`Simulation`], then runs it until the player
//! quits from the menu.
mod config;
mod decision;
mod input;
mod logging;
mod oracle;
mod presentation;

use anyhow::{Context, Result};
use umbra_content::{ConfigLoader, MapLoader, RonGridStore};
use umbra_core::{ActionResolver, GameConfig, GridStore, Simulation, WorldGrid};

use crate::config::ClientConfig;
use crate::decision::DrunkardWalk;
use crate::oracle::RayCastOracle;
use crate::presentation::terminal::TerminalSession;
use crate::presentation::{CrosstermEvents, TerminalInterface};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let log_dir = config.log_dir.clone().unwrap_or_else(config::log_dir);
    let _log_guard = logging::setup_logging(&log_dir, config.session_id.as_deref())?;

    tracing::info!("Starting Umbra client");
    tracing::info!("Map: {}", config.map.display());
    tracing::info!("Save file: {}", config.save.display());

    let game_config = match &config.config {
        Some(path) => ConfigLoader::load(path)?,
        None => GameConfig::default(),
    };
    let map = MapLoader::load(&config.map)?;
    let mut store = RonGridStore::new(&config.save);
    let grid = restore_grid(&mut store, map.grid.clone());

    let mut simulation = Simulation::new(game_config, grid);
    for actor in map.spawns() {
        let id = actor.id;
        simulation
            .spawn(actor)
            .with_context(|| format!("Failed to spawn actor {}", id))?;
    }

    let oracle = RayCastOracle;
    let mut walker = DrunkardWalk::new(config.seed);

    let (_session, tui) = TerminalSession::enter()?;
    let mut interface = TerminalInterface::new(tui, CrosstermEvents);

    simulation.focus(&oracle)?;
    let mut resolver = ActionResolver::new(&mut interface, &mut walker);
    let final_tick = simulation.run(&mut resolver, &oracle, &mut store)?;

    tracing::info!("Client shutdown complete at tick {}", final_tick);
    Ok(())
}

/// Prefers the save file when it holds a grid of the map's shape.
fn restore_grid(store: &mut RonGridStore, authored: WorldGrid) -> WorldGrid {
    if !store.exists() {
        return authored;
    }
    match store.load_grid() {
        Ok(saved) if saved.width() == authored.width() && saved.height() == authored.height() => {
            tracing::info!("Resuming from save {}", store.path().display());
            saved
        }
        Ok(_) => {
            tracing::warn!("Save {} does not match the map, ignoring it", store.path().display());
            authored
        }
        Err(e) => {
            tracing::warn!("Failed to load save {}: {}", store.path().display(), e);
            authored
        }
    }
}
