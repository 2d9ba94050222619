//! Online players, operators and bans.

use std::collections::BTreeMap;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::bans::BanLists;
use crate::error::WorldError;
use crate::network::ConnectionId;
use crate::text::Text;
use crate::types::{BlockPos, Dimension, PlayerId, Vec3};

pub const OPS_FILE: &str = "ops.json";

pub const MAX_HEALTH: f32 = 20.0;

/// A personal respawn location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RespawnPoint {
    pub dimension: Dimension,
    pub pos: BlockPos,
    pub angle: f32,
    /// Respawn here even if the block there no longer allows it.
    pub forced: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub address: SocketAddr,
    pub connection: ConnectionId,
    pub position: Vec3,
    pub yaw: f32,
    pub dimension: Dimension,
    pub permission_level: u8,
    pub health: f32,
    pub respawn: Option<RespawnPoint>,
}

impl Player {
    pub fn new(name: impl Into<String>, address: SocketAddr, connection: ConnectionId) -> Self {
        Self {
            id: PlayerId::random(),
            name: name.into(),
            address,
            connection,
            position: Vec3::ZERO,
            yaw: 0.0,
            dimension: Dimension::Overworld,
            permission_level: 0,
            health: MAX_HEALTH,
            respawn: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// The server's view of who is online, who is an operator and who is banned.
pub trait PlayerRegistry: Send {
    /// Online players in join order.
    fn players(&self) -> Vec<&Player>;
    fn player(&self, id: PlayerId) -> Option<&Player>;
    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player>;
    /// Case-insensitive name lookup.
    fn player_by_name(&self, name: &str) -> Option<&Player>;
    fn players_with_address(&self, ip: IpAddr) -> Vec<&Player>;
    fn max_players(&self) -> usize;

    fn bans(&self) -> &BanLists;
    fn bans_mut(&mut self) -> &mut BanLists;

    fn is_op(&self, name: &str) -> bool;
    /// Returns `false` if the name already is an operator.
    fn add_op(&mut self, name: &str) -> bool;
    /// Returns `false` if the name was not an operator.
    fn remove_op(&mut self, name: &str) -> bool;

    /// Returns `false` if the player is not online.
    fn set_respawn(&mut self, id: PlayerId, point: RespawnPoint) -> bool;

    /// Remove a player from the online list, returning it.
    fn disconnect(&mut self, id: PlayerId, reason: &Text) -> Option<Player>;

    /// Persist operator and ban lists.
    fn save(&self) -> Result<(), WorldError>;
}

/// In-memory player registry, optionally persisted to a data directory.
#[derive(Debug)]
pub struct PlayerList {
    players: Vec<Player>,
    /// Lowercase name → display name.
    ops: BTreeMap<String, String>,
    bans: BanLists,
    max_players: usize,
    op_permission_level: u8,
    data_dir: Option<PathBuf>,
}

impl PlayerList {
    pub fn new(max_players: usize, op_permission_level: u8) -> Self {
        Self {
            players: Vec::new(),
            ops: BTreeMap::new(),
            bans: BanLists::default(),
            max_players,
            op_permission_level,
            data_dir: None,
        }
    }

    /// Load operators and bans from `dir`; [`PlayerRegistry::save`] writes them back there.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        self.bans = BanLists::load(&dir);
        self.ops = load_ops(&dir.join(OPS_FILE));
        self.data_dir = Some(dir);
        self
    }

    /// Add a player to the online list, applying operator permissions.
    pub fn join(&mut self, mut player: Player) -> PlayerId {
        if self.is_op(&player.name) {
            player.permission_level = self.op_permission_level;
        }
        let id = player.id;
        info!("{} joined from {}", player.name, player.address);
        self.players.push(player);
        id
    }

    fn set_permission_by_name(&mut self, name: &str, level: u8) {
        if let Some(p) = self
            .players
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(name))
        {
            p.permission_level = level;
        }
    }
}

impl PlayerRegistry for PlayerList {
    fn players(&self) -> Vec<&Player> {
        self.players.iter().collect()
    }

    fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    fn players_with_address(&self, ip: IpAddr) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| p.address.ip() == ip)
            .collect()
    }

    fn max_players(&self) -> usize {
        self.max_players
    }

    fn bans(&self) -> &BanLists {
        &self.bans
    }

    fn bans_mut(&mut self) -> &mut BanLists {
        &mut self.bans
    }

    fn is_op(&self, name: &str) -> bool {
        self.ops.contains_key(&name.to_lowercase())
    }

    fn add_op(&mut self, name: &str) -> bool {
        let key = name.to_lowercase();
        if self.ops.contains_key(&key) {
            return false;
        }
        self.ops.insert(key, name.to_string());
        self.set_permission_by_name(name, self.op_permission_level);
        true
    }

    fn remove_op(&mut self, name: &str) -> bool {
        if self.ops.remove(&name.to_lowercase()).is_none() {
            return false;
        }
        self.set_permission_by_name(name, 0);
        true
    }

    fn set_respawn(&mut self, id: PlayerId, point: RespawnPoint) -> bool {
        match self.player_mut(id) {
            Some(player) => {
                player.respawn = Some(point);
                true
            }
            None => false,
        }
    }

    fn disconnect(&mut self, id: PlayerId, reason: &Text) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == id)?;
        let player = self.players.remove(index);
        info!("{} lost connection: {reason}", player.name);
        Some(player)
    }

    fn save(&self) -> Result<(), WorldError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        fs::create_dir_all(dir)?;
        self.bans.save(dir)?;
        let names: Vec<&String> = self.ops.values().collect();
        fs::write(dir.join(OPS_FILE), serde_json::to_string_pretty(&names)?)?;
        Ok(())
    }
}

/// Load operator names from a JSON array file.
fn load_ops(path: &Path) -> BTreeMap<String, String> {
    if !path.exists() {
        return BTreeMap::new();
    }
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str::<Vec<String>>(&contents) {
            Ok(names) => {
                info!("Loaded {} entries from {}", names.len(), path.display());
                names
                    .into_iter()
                    .map(|n| (n.to_lowercase(), n))
                    .collect()
            }
            Err(e) => {
                warn!("Failed to parse {}: {e}", path.display());
                BTreeMap::new()
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {e}", path.display());
            BTreeMap::new()
        }
    }
}
