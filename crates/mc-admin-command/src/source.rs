//! Who is running a command, and from where.

use mc_admin_world::{BlockPos, Dimension, Player, PlayerId, Vec3};

/// Permission levels. Higher levels include every lower one.
pub mod permission {
    pub const ALL: u8 = 0;
    pub const MODERATOR: u8 = 1;
    pub const GAMEMASTER: u8 = 2;
    pub const ADMIN: u8 = 3;
    pub const OWNER: u8 = 4;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommandSource {
    pub name: String,
    /// Set when a player issued the command.
    pub player: Option<PlayerId>,
    pub permission_level: u8,
    pub position: Vec3,
    pub yaw: f32,
    pub dimension: Dimension,
}

impl CommandSource {
    /// The server console, positioned at the world spawn.
    pub fn console(spawn: Vec3) -> Self {
        Self::server("Server", spawn)
    }

    /// A remote console client.
    pub fn rcon(spawn: Vec3) -> Self {
        Self::server("Rcon", spawn)
    }

    fn server(name: &str, spawn: Vec3) -> Self {
        Self {
            name: name.to_string(),
            player: None,
            permission_level: permission::OWNER,
            position: spawn,
            yaw: 0.0,
            dimension: Dimension::Overworld,
        }
    }

    pub fn for_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            player: Some(player.id),
            permission_level: player.permission_level,
            position: player.position,
            yaw: player.yaw,
            dimension: player.dimension,
        }
    }

    pub fn is_player(&self) -> bool {
        self.player.is_some()
    }

    pub fn has_permission(&self, level: u8) -> bool {
        self.permission_level >= level
    }

    pub fn block_pos(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }
}
