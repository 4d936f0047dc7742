//! Demo host for arc-windows
//!
//! Opens windows against the headless toolkit, replays a few user actions,
//! and prints where each window ended up. Running it twice shows windows
//! coming back at their saved geometry.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --route /request/latest/0 --route "#/history"
//! cargo run -- --reset-session
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use futures::executor::block_on;
use serde_json::json;
use tracing::info;

use arc_windows::config::load_config;
use arc_windows::geometry::{DisplayBounds, Position};
use arc_windows::logging;
use arc_windows::session::JsonSessionStore;
use arc_windows::toolkit::{HeadlessToolkit, WindowToolkit};
use arc_windows::windows::WindowsManager;

#[derive(Parser, Debug)]
#[command(name = "arc-windows", about = "Open app windows and persist their geometry")]
struct Cli {
    /// Route to open; repeat for more windows
    #[arg(short, long = "route")]
    routes: Vec<String>,

    /// Config file (default: ~/.arc/windows.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Forget saved window geometry before opening
    #[arg(long)]
    reset_session: bool,

    /// Shift every window by this many pixels to simulate the user moving it
    #[arg(long, default_value_t = 0)]
    nudge: i32,

    /// Directory for the JSONL log (default: ~/.arc/logs)
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref());

    let config = load_config(cli.config.as_deref());
    let store = JsonSessionStore::new(config.session_file());
    if cli.reset_session {
        store.reset().context("failed to reset session file")?;
    }

    let (toolkit, events) = HeadlessToolkit::new();
    let toolkit = toolkit.with_displays(vec![DisplayBounds {
        origin_x: 0.0,
        origin_y: 0.0,
        width: 2560.0,
        height: 1440.0,
    }]);
    let mut manager = WindowsManager::new(toolkit.clone(), store, config);

    let routes: Vec<Option<&str>> = if cli.routes.is_empty() {
        vec![None]
    } else {
        cli.routes.iter().map(|r| Some(r.as_str())).collect()
    };
    for route in routes {
        let opened = block_on(manager.open(route))?;
        info!(window = %opened.id, index = opened.index, url = %opened.url, "Opened window");
    }
    manager.pump_pending(&events)?;

    if cli.nudge != 0 {
        for &id in manager.windows() {
            let position = toolkit.position(id)?;
            toolkit.user_move(id, Position::new(position.x + cli.nudge, position.y + cli.nudge))?;
        }
    }
    manager.pump_pending(&events)?;

    let count = manager.window_count();
    let delivered = manager.notify_all("app-ready", &json!([count]));
    info!(delivered, "Broadcast app-ready");

    for &id in manager.windows() {
        if let (Some(entry), Some(window)) = (manager.entry(id), toolkit.window(id)) {
            println!(
                "{} index={} at ({}, {}) {}x{} visible={} url={}",
                id,
                entry.index,
                window.position.x,
                window.position.y,
                window.size.width,
                window.size.height,
                window.visible,
                window.url.as_deref().unwrap_or("-"),
            );
        }
    }

    for id in manager.windows().to_vec() {
        toolkit.user_close(id)?;
    }
    toolkit.shutdown();
    block_on(manager.pump_events(&events))?;
    info!(has_window = manager.has_window(), "All windows closed");
    Ok(())
}
