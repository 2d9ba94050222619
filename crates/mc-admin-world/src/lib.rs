//! Server-side collaborators for administrative commands.
//!
//! Defines the contracts the command handlers talk to (player registry, level
//! state, network transport) together with in-memory implementations that the
//! server binary and the tests run against.

pub mod bans;
pub mod error;
pub mod gamerules;
pub mod level;
pub mod network;
pub mod players;
pub mod text;
pub mod types;
pub mod weather;

pub use bans::{BanEntry, BanList, BanLists, PlayerKey};
pub use error::WorldError;
pub use gamerules::{GameRule, GameRules, RuleType, RuleValue};
pub use level::{Difficulty, LevelData, LevelState, SpawnPoint};
pub use network::{Connections, ConnectionId, NetworkTransport, Outgoing, Packet, ProtocolPhase};
pub use players::{Player, PlayerList, PlayerRegistry, RespawnPoint};
pub use text::Text;
pub use types::{BlockPos, Dimension, PlayerId, Vec3};
pub use weather::{UniformInt, WeatherProviders, WeatherState};
