use std::path::{Path, PathBuf};

use mc_admin_world::{BlockPos, Difficulty, SpawnPoint, WeatherProviders};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSection,
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub weather: WeatherProviders,
    pub logging: LoggingSection,
    #[serde(default)]
    pub rcon: RconSection,
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    pub name: String,
    pub max_players: usize,
    /// Permission level granted to operators.
    #[serde(default = "default_op_permission_level")]
    pub op_permission_level: u8,
    /// Where ops and ban lists are kept.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

fn default_op_permission_level() -> u8 {
    4
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize)]
pub struct WorldSection {
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_spawn")]
    pub spawn: [i32; 3],
    #[serde(default)]
    pub spawn_angle: f32,
}

fn default_spawn() -> [i32; 3] {
    [0, 64, 0]
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            spawn: default_spawn(),
            spawn_angle: 0.0,
        }
    }
}

impl WorldSection {
    pub fn spawn_point(&self) -> SpawnPoint {
        let [x, y, z] = self.spawn;
        SpawnPoint {
            pos: BlockPos::new(x, y, z),
            angle: self.spawn_angle,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct RconSection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_rcon_port")]
    pub port: u16,
    #[serde(default)]
    pub password: String,
}

fn default_rcon_port() -> u16 {
    25575
}

impl Default for RconSection {
    fn default() -> Self {
        Self {
            enabled: false,
            port: default_rcon_port(),
            password: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
