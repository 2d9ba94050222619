//! Network transport contract and an in-memory outbox implementation.
//!
//! Commands never write to sockets. They queue [`Packet`]s on the transport and
//! the server loop drains the queue once per tick.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;
use uuid::Uuid;

use crate::gamerules::{GameRule, RuleValue};
use crate::level::Difficulty;
use crate::text::Text;
use crate::types::{BlockPos, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Protocol phase of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolPhase {
    /// In-game.
    Play,
    /// Exchanging registries and resource packs; no world packets.
    Configuration,
}

/// Outgoing packets the commands produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    SystemChat {
        text: Text,
        overlay: bool,
    },
    Disconnect {
        reason: Text,
    },
    Transfer {
        host: String,
        port: u16,
    },
    SetTime {
        game_time: i64,
        day_time: i64,
        tick_day_time: bool,
    },
    ChangeDifficulty {
        difficulty: Difficulty,
    },
    GameRuleChanged {
        rule: GameRule,
        value: RuleValue,
    },
    StartRaining,
    StopRaining,
    RainLevel(f32),
    ThunderLevel(f32),
    SetDefaultSpawn {
        pos: BlockPos,
        angle: f32,
    },
    PlayerCombatKill {
        player: PlayerId,
        message: Text,
    },
    ResourcePackPush {
        id: Uuid,
        url: String,
        hash: String,
        required: bool,
    },
    /// `None` removes every pack.
    ResourcePackPop {
        id: Option<Uuid>,
    },
    StartConfiguration,
    FinishConfiguration,
}

/// A packet queued for one connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub connection: ConnectionId,
    pub packet: Packet,
}

/// The connection set commands can address.
pub trait NetworkTransport: Send {
    /// Open connections, in ascending id order.
    fn connections(&self) -> Vec<ConnectionId>;

    fn phase(&self, connection: ConnectionId) -> Option<ProtocolPhase>;

    /// Queue a packet for one connection. Returns `false` if it is not open.
    fn send(&mut self, connection: ConnectionId, packet: Packet) -> bool;

    /// Queue a packet for every connection in the play phase; returns how many.
    fn broadcast(&mut self, packet: Packet) -> usize;

    /// Returns `false` if the connection is not open.
    fn set_phase(&mut self, connection: ConnectionId, phase: ProtocolPhase) -> bool;

    /// Close a connection after its queued packets. Returns `false` if it was not open.
    fn close(&mut self, connection: ConnectionId) -> bool;

    /// Take every queued packet, oldest first.
    fn drain_outgoing(&mut self) -> Vec<Outgoing>;
}

/// In-memory transport: tracks connection phases and queues packets.
#[derive(Debug, Default)]
pub struct Connections {
    open: BTreeMap<ConnectionId, ProtocolPhase>,
    outgoing: Vec<Outgoing>,
}

impl Connections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection in the play phase.
    pub fn open(&mut self, connection: ConnectionId) {
        self.open.insert(connection, ProtocolPhase::Play);
    }
}

impl NetworkTransport for Connections {
    fn connections(&self) -> Vec<ConnectionId> {
        self.open.keys().copied().collect()
    }

    fn phase(&self, connection: ConnectionId) -> Option<ProtocolPhase> {
        self.open.get(&connection).copied()
    }

    fn send(&mut self, connection: ConnectionId, packet: Packet) -> bool {
        if !self.open.contains_key(&connection) {
            return false;
        }
        self.outgoing.push(Outgoing { connection, packet });
        true
    }

    fn broadcast(&mut self, packet: Packet) -> usize {
        let targets: Vec<ConnectionId> = self
            .open
            .iter()
            .filter(|(_, phase)| **phase == ProtocolPhase::Play)
            .map(|(&c, _)| c)
            .collect();
        for &connection in &targets {
            self.outgoing.push(Outgoing {
                connection,
                packet: packet.clone(),
            });
        }
        targets.len()
    }

    fn set_phase(&mut self, connection: ConnectionId, phase: ProtocolPhase) -> bool {
        match self.open.get_mut(&connection) {
            Some(current) => {
                debug!("Connection {connection} {current:?} -> {phase:?}");
                *current = phase;
                true
            }
            None => false,
        }
    }

    fn close(&mut self, connection: ConnectionId) -> bool {
        self.open.remove(&connection).is_some()
    }

    fn drain_outgoing(&mut self) -> Vec<Outgoing> {
        std::mem::take(&mut self.outgoing)
    }
}
