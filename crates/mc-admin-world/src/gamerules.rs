//! Game rules: a closed set of named, typed level settings.

use std::fmt;

use crate::error::WorldError;

/// Every game rule the level knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameRule {
    DoDaylightCycle,
    DoWeatherCycle,
    DoFireTick,
    DoMobSpawning,
    DoImmediateRespawn,
    KeepInventory,
    MobGriefing,
    NaturalRegeneration,
    ShowDeathMessages,
    SendCommandFeedback,
    LogAdminCommands,
    RandomTickSpeed,
    SpawnRadius,
    SpawnChunkRadius,
    MaxEntityCramming,
    PlayersSleepingPercentage,
}

/// The value type a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    Bool,
    Int { min: i32, max: i32 },
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleType::Bool => f.write_str("boolean"),
            RuleType::Int { .. } => f.write_str("integer"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleValue {
    Bool(bool),
    Int(i32),
}

impl RuleValue {
    /// Numeric form used as a command result: booleans map to 1/0.
    pub fn as_int(self) -> i32 {
        match self {
            RuleValue::Bool(b) => b as i32,
            RuleValue::Int(v) => v,
        }
    }
}

impl fmt::Display for RuleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleValue::Bool(b) => write!(f, "{b}"),
            RuleValue::Int(v) => write!(f, "{v}"),
        }
    }
}

impl GameRule {
    /// All rules in declaration order.
    pub const ALL: [GameRule; 16] = [
        GameRule::DoDaylightCycle,
        GameRule::DoWeatherCycle,
        GameRule::DoFireTick,
        GameRule::DoMobSpawning,
        GameRule::DoImmediateRespawn,
        GameRule::KeepInventory,
        GameRule::MobGriefing,
        GameRule::NaturalRegeneration,
        GameRule::ShowDeathMessages,
        GameRule::SendCommandFeedback,
        GameRule::LogAdminCommands,
        GameRule::RandomTickSpeed,
        GameRule::SpawnRadius,
        GameRule::SpawnChunkRadius,
        GameRule::MaxEntityCramming,
        GameRule::PlayersSleepingPercentage,
    ];

    pub fn id(self) -> &'static str {
        match self {
            GameRule::DoDaylightCycle => "doDaylightCycle",
            GameRule::DoWeatherCycle => "doWeatherCycle",
            GameRule::DoFireTick => "doFireTick",
            GameRule::DoMobSpawning => "doMobSpawning",
            GameRule::DoImmediateRespawn => "doImmediateRespawn",
            GameRule::KeepInventory => "keepInventory",
            GameRule::MobGriefing => "mobGriefing",
            GameRule::NaturalRegeneration => "naturalRegeneration",
            GameRule::ShowDeathMessages => "showDeathMessages",
            GameRule::SendCommandFeedback => "sendCommandFeedback",
            GameRule::LogAdminCommands => "logAdminCommands",
            GameRule::RandomTickSpeed => "randomTickSpeed",
            GameRule::SpawnRadius => "spawnRadius",
            GameRule::SpawnChunkRadius => "spawnChunkRadius",
            GameRule::MaxEntityCramming => "maxEntityCramming",
            GameRule::PlayersSleepingPercentage => "playersSleepingPercentage",
        }
    }

    pub fn from_id(id: &str) -> Option<GameRule> {
        Self::ALL.into_iter().find(|rule| rule.id() == id)
    }

    pub fn rule_type(self) -> RuleType {
        match self {
            GameRule::RandomTickSpeed
            | GameRule::SpawnRadius
            | GameRule::MaxEntityCramming
            | GameRule::PlayersSleepingPercentage => RuleType::Int {
                min: 0,
                max: i32::MAX,
            },
            GameRule::SpawnChunkRadius => RuleType::Int { min: 0, max: 32 },
            _ => RuleType::Bool,
        }
    }

    pub fn default_value(self) -> RuleValue {
        match self {
            GameRule::DoImmediateRespawn | GameRule::KeepInventory => RuleValue::Bool(false),
            GameRule::RandomTickSpeed => RuleValue::Int(3),
            GameRule::SpawnRadius => RuleValue::Int(10),
            GameRule::SpawnChunkRadius => RuleValue::Int(2),
            GameRule::MaxEntityCramming => RuleValue::Int(24),
            GameRule::PlayersSleepingPercentage => RuleValue::Int(100),
            _ => RuleValue::Bool(true),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for GameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Current value of every rule.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    values: Vec<RuleValue>,
}

impl GameRules {
    pub fn get(&self, rule: GameRule) -> RuleValue {
        self.values[rule.index()]
    }

    /// Convenience for boolean rules; integer rules read as `value != 0`.
    pub fn get_bool(&self, rule: GameRule) -> bool {
        match self.get(rule) {
            RuleValue::Bool(b) => b,
            RuleValue::Int(v) => v != 0,
        }
    }

    pub fn get_int(&self, rule: GameRule) -> i32 {
        self.get(rule).as_int()
    }

    /// Set a rule, checking the value against the rule's type and range.
    pub fn set(&mut self, rule: GameRule, value: RuleValue) -> Result<(), WorldError> {
        match (rule.rule_type(), value) {
            (RuleType::Bool, RuleValue::Bool(_)) => {}
            (RuleType::Int { min, max }, RuleValue::Int(v)) => {
                if v < min || v > max {
                    return Err(WorldError::RuleOutOfRange {
                        rule,
                        value: v,
                        min,
                        max,
                    });
                }
            }
            (expected, _) => return Err(WorldError::RuleTypeMismatch { rule, expected }),
        }
        self.values[rule.index()] = value;
        Ok(())
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            values: GameRule::ALL.iter().map(|r| r.default_value()).collect(),
        }
    }
}
