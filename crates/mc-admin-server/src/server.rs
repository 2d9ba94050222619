//! Entry points the main loop drives: console lines, RCON requests, player
//! chat commands, ticks and saving.

use mc_admin_command::{BufferedSink, CommandRegistry, CommandSource, Dispatcher, Invocation};
use mc_admin_world::PlayerId;
use tracing::{debug, info};

use crate::lang::Translations;
use crate::state::ServerState;

pub struct Server {
    pub state: ServerState,
    registry: CommandRegistry<ServerState>,
    lang: Translations,
    current_tick: u64,
}

impl Server {
    pub fn new(
        state: ServerState,
        registry: CommandRegistry<ServerState>,
        lang: Translations,
    ) -> Self {
        Self {
            state,
            registry,
            lang,
            current_tick: 0,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// Run a line typed at the server console. Returns the rendered feedback.
    pub fn handle_console_command(&mut self, line: &str) -> String {
        let source = CommandSource::console(self.state.spawn_origin());
        self.run_server_source(source, line)
    }

    /// Run a line received over RCON. Returns the rendered feedback.
    pub fn handle_rcon_command(&mut self, line: &str) -> String {
        let source = CommandSource::rcon(self.state.spawn_origin());
        self.run_server_source(source, line)
    }

    fn run_server_source(&mut self, source: CommandSource, line: &str) -> String {
        let mut sink = BufferedSink::new();
        Dispatcher::new(&self.registry).execute(
            &mut self.state,
            &mut sink,
            Invocation::new(source, line),
        );
        self.state.deliver(&self.lang, sink.drain()).join("\n")
    }

    /// Run a command a player typed in chat. Feedback goes back as chat packets.
    /// Returns the result code, or 0 if the player is not online.
    ///
    /// Entry point for a player transport; the binary itself only drives the
    /// console and RCON.
    pub fn handle_player_command(&mut self, id: PlayerId, line: &str) -> i32 {
        let Some(source) = self.state.players.player(id).map(CommandSource::for_player) else {
            debug!("Ignoring command from offline player {id}");
            return 0;
        };
        let mut sink = BufferedSink::new();
        let code = Dispatcher::new(&self.registry).execute(
            &mut self.state,
            &mut sink,
            Invocation::new(source, line),
        );
        self.state.deliver(&self.lang, sink.drain());
        code
    }

    /// Advance the world one tick and flush queued packets.
    pub fn game_tick(&mut self) {
        self.current_tick += 1;
        self.state.tick();
        for out in self.state.network.drain_outgoing() {
            debug!("-> {}: {:?}", out.connection, out.packet);
        }
    }

    pub fn save_all(&self) {
        info!("Saving players and bans");
        self.state.persist();
    }
}
