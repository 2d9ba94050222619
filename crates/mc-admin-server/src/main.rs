mod commands;
mod config;
mod lang;
mod rcon;
mod server;
mod state;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use config::ServerConfig;
use lang::Translations;
use mc_admin_world::{Connections, LevelData, PlayerList};
use rand::rngs::StdRng;
use rand::SeedableRng;
use server::Server;
use state::ServerState;
use tokio::io::AsyncBufReadExt;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(version, about = "Administrative command server")]
struct Cli {
    /// Path to the server configuration file.
    #[arg(short, long, default_value = "server.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = match ServerConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.config.display());
            std::process::exit(1);
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "{} v{} starting",
        config.server.name,
        env!("CARGO_PKG_VERSION")
    );
    info!("Max players: {}", config.server.max_players);
    info!("Difficulty: {}", config.world.difficulty.id());

    let lang = match Translations::embedded() {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to load translations: {e}");
            std::process::exit(1);
        }
    };
    let registry = match commands::register_all() {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to register commands: {e}");
            std::process::exit(1);
        }
    };
    info!("Registered {} commands", registry.len());

    let players = PlayerList::new(config.server.max_players, config.server.op_permission_level)
        .with_data_dir(&config.server.data_dir);
    let level = LevelData::new(config.world.difficulty, config.world.spawn_point());
    let state = ServerState::new(
        Box::new(players),
        Box::new(level),
        Box::new(Connections::new()),
        config.weather,
        StdRng::from_entropy(),
    );
    let mut server = Server::new(state, registry, lang);

    // Console REPL: read lines from stdin
    let (console_tx, mut console_rx) = tokio::sync::mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.send(line).await.is_err() {
                break;
            }
        }
    });

    let (rcon_tx, mut rcon_rx) = tokio::sync::mpsc::channel::<rcon::RconCommand>(32);
    if config.rcon.enabled {
        if config.rcon.password.is_empty() {
            warn!("RCON is enabled but no password is set; not starting it");
        } else if let Err(e) = rcon::start(config.rcon.port, config.rcon.password, rcon_tx).await {
            warn!("Failed to bind RCON server on port {}: {e}", config.rcon.port);
        }
    }

    let mut tick_interval = tokio::time::interval(Duration::from_millis(50));
    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                server.game_tick();
            }
            Some(line) = console_rx.recv() => {
                let reply = server.handle_console_command(&line);
                if !reply.is_empty() {
                    println!("{reply}");
                }
            }
            Some(rcon_cmd) = rcon_rx.recv() => {
                let response = server.handle_rcon_command(&rcon_cmd.command);
                let _ = rcon_cmd.response_tx.send(response);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Saving before shutdown...");
    server.save_all();
    info!("Server shut down after {} ticks.", server.current_tick());
}
