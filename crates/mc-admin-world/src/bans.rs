//! Player and IP ban lists with JSON persistence.

use std::collections::BTreeMap;
use std::fs;
use std::net::IpAddr;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::WorldError;

pub const BANNED_PLAYERS_FILE: &str = "banned-players.json";
pub const BANNED_IPS_FILE: &str = "banned-ips.json";

/// Keys a ban list is indexed by, derived from the entry's target string.
pub trait BanKey: Ord + Clone {
    fn from_target(target: &str) -> Option<Self>;
}

/// Player names compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerKey(String);

impl PlayerKey {
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }
}

impl BanKey for PlayerKey {
    fn from_target(target: &str) -> Option<Self> {
        Some(PlayerKey::new(target))
    }
}

impl BanKey for IpAddr {
    fn from_target(target: &str) -> Option<Self> {
        target.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanEntry {
    /// Player name or IP address, as displayed.
    pub target: String,
    pub created: DateTime<Utc>,
    /// Who issued the ban.
    pub source: String,
    pub reason: String,
}

impl BanEntry {
    pub fn new(
        target: impl Into<String>,
        source: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            created: Utc::now(),
            source: source.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BanList<K> {
    entries: BTreeMap<K, BanEntry>,
}

impl<K: BanKey> BanList<K> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Add an entry. Returns `false` and keeps the old entry if the key is already banned.
    pub fn add(&mut self, key: K, entry: BanEntry) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, entry);
        true
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&BanEntry> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<BanEntry> {
        self.entries.remove(key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &BanEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load from a JSON array of entries. A missing file yields an empty list;
    /// unreadable files and entries with unparseable targets are skipped with a warning.
    pub fn load(path: &Path) -> Self {
        let mut list = Self::new();
        if !path.exists() {
            return list;
        }
        let entries: Vec<BanEntry> = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Failed to parse {}: {e}", path.display());
                    return list;
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                return list;
            }
        };
        for entry in entries {
            match K::from_target(&entry.target) {
                Some(key) => {
                    list.entries.insert(key, entry);
                }
                None => warn!("Skipping invalid ban target {:?} in {}", entry.target, path.display()),
            }
        }
        info!("Loaded {} entries from {}", list.len(), path.display());
        list
    }

    pub fn save(&self, path: &Path) -> Result<(), WorldError> {
        let entries: Vec<&BanEntry> = self.entries.values().collect();
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl<K: BanKey> Default for BanList<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Both ban lists of a server.
#[derive(Debug, Clone, Default)]
pub struct BanLists {
    pub players: BanList<PlayerKey>,
    pub ips: BanList<IpAddr>,
}

impl BanLists {
    pub fn load(dir: &Path) -> Self {
        Self {
            players: BanList::load(&dir.join(BANNED_PLAYERS_FILE)),
            ips: BanList::load(&dir.join(BANNED_IPS_FILE)),
        }
    }

    pub fn save(&self, dir: &Path) -> Result<(), WorldError> {
        self.players.save(&dir.join(BANNED_PLAYERS_FILE))?;
        self.ips.save(&dir.join(BANNED_IPS_FILE))?;
        Ok(())
    }
}
