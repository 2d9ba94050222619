//! Shared fixture for command tests: three online players on three play-phase
//! connections, with Alice as the only operator.

use mc_admin_command::{
    BufferedSink, CommandError, CommandRegistry, CommandSource, Dispatcher, Invocation, Message,
};
use mc_admin_world::{
    BlockPos, ConnectionId, Connections, Difficulty, LevelData, Outgoing, Player, PlayerId,
    PlayerList, PlayerRegistry, SpawnPoint, Vec3, WeatherProviders,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::register_all;
use crate::state::ServerState;

pub struct Fixture {
    pub state: ServerState,
    pub registry: CommandRegistry<ServerState>,
    pub sink: BufferedSink,
}

impl Fixture {
    pub fn new() -> Self {
        let mut players = PlayerList::new(20, 4);
        let mut network = Connections::new();
        let positions = [
            ("Alice", Vec3::new(10.5, 64.0, 10.5)),
            ("Bob", Vec3::new(100.5, 70.0, -30.5)),
            ("Charlie", Vec3::new(-50.5, 64.0, 50.5)),
        ];
        for (i, (name, pos)) in positions.into_iter().enumerate() {
            let connection = ConnectionId(i as u64 + 1);
            let mut player = Player::new(
                name,
                format!("10.0.0.{}:5000", i + 1).parse().unwrap(),
                connection,
            );
            player.position = pos;
            players.join(player);
            network.open(connection);
        }
        players.add_op("Alice");

        let level = LevelData::new(
            Difficulty::Normal,
            SpawnPoint {
                pos: BlockPos::new(0, 64, 0),
                angle: 0.0,
            },
        );
        let state = ServerState::new(
            Box::new(players),
            Box::new(level),
            Box::new(network),
            WeatherProviders::default(),
            StdRng::seed_from_u64(7),
        );
        Self {
            state,
            registry: register_all().unwrap(),
            sink: BufferedSink::new(),
        }
    }

    pub fn id(&self, name: &str) -> PlayerId {
        self.state.players.player_by_name(name).unwrap().id
    }

    pub fn source(&self, name: &str) -> CommandSource {
        CommandSource::for_player(self.state.players.player_by_name(name).unwrap())
    }

    pub fn console(&self) -> CommandSource {
        CommandSource::console(self.state.spawn_origin())
    }

    pub fn run(&mut self, source: CommandSource, line: &str) -> Result<i32, CommandError> {
        Dispatcher::new(&self.registry).dispatch(
            &mut self.state,
            &mut self.sink,
            Invocation::new(source, line),
        )
    }

    pub fn run_console(&mut self, line: &str) -> Result<i32, CommandError> {
        let console = self.console();
        self.run(console, line)
    }

    /// Take every queued packet.
    pub fn packets(&mut self) -> Vec<Outgoing> {
        self.state.network.drain_outgoing()
    }

    /// Take every message sent to the sink.
    pub fn messages(&mut self) -> Vec<Message> {
        self.sink.drain().into_iter().map(|(_, m)| m).collect()
    }
}
