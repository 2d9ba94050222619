//! Level state: difficulty, game rules, clock, weather and world spawn.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::error::WorldError;
use crate::gamerules::{GameRule, GameRules, RuleValue};
use crate::types::BlockPos;
use crate::weather::WeatherState;

/// Ticks in one in-game day.
pub const TICKS_PER_DAY: i64 = 24_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Peaceful,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Difficulty::Peaceful => "peaceful",
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn ordinal(self) -> i32 {
        self as i32
    }
}

impl FromStr for Difficulty {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.id() == s)
            .ok_or_else(|| WorldError::UnknownDifficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Where players without a personal respawn point appear.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpawnPoint {
    pub pos: BlockPos,
    pub angle: f32,
}

/// Level-wide state the commands read and mutate.
pub trait LevelState: Send {
    fn difficulty(&self) -> Difficulty;
    fn set_difficulty(&mut self, difficulty: Difficulty);

    fn game_rules(&self) -> &GameRules;
    fn set_game_rule(&mut self, rule: GameRule, value: RuleValue) -> Result<(), WorldError>;

    /// Time of day; grows past one day, callers take it modulo [`TICKS_PER_DAY`].
    fn day_time(&self) -> i64;
    fn set_day_time(&mut self, time: i64);
    /// Total ticks the level has run.
    fn game_time(&self) -> i64;

    fn weather(&self) -> WeatherState;
    fn set_weather(&mut self, weather: WeatherState);

    /// Set all weather timers at once. Rain and thunder share `weather_time`.
    fn set_weather_parameters(
        &mut self,
        clear_time: i32,
        weather_time: i32,
        raining: bool,
        thundering: bool,
    ) {
        self.set_weather(WeatherState {
            clear_time,
            rain_time: weather_time,
            thunder_time: weather_time,
            raining,
            thundering,
        });
    }

    fn default_spawn(&self) -> SpawnPoint;
    fn set_default_spawn(&mut self, spawn: SpawnPoint);

    /// Advance the level clock by one tick.
    fn tick(&mut self);
}

/// In-memory level.
#[derive(Debug, Clone, Default)]
pub struct LevelData {
    difficulty: Difficulty,
    rules: GameRules,
    day_time: i64,
    game_time: i64,
    weather: WeatherState,
    spawn: SpawnPoint,
}

impl LevelData {
    pub fn new(difficulty: Difficulty, spawn: SpawnPoint) -> Self {
        Self {
            difficulty,
            spawn,
            ..Default::default()
        }
    }
}

impl LevelState for LevelData {
    fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    fn game_rules(&self) -> &GameRules {
        &self.rules
    }

    fn set_game_rule(&mut self, rule: GameRule, value: RuleValue) -> Result<(), WorldError> {
        self.rules.set(rule, value)?;
        debug!("Game rule {rule} = {value}");
        Ok(())
    }

    fn day_time(&self) -> i64 {
        self.day_time
    }

    fn set_day_time(&mut self, time: i64) {
        self.day_time = time;
    }

    fn game_time(&self) -> i64 {
        self.game_time
    }

    fn weather(&self) -> WeatherState {
        self.weather
    }

    fn set_weather(&mut self, weather: WeatherState) {
        self.weather = weather;
    }

    fn default_spawn(&self) -> SpawnPoint {
        self.spawn
    }

    fn set_default_spawn(&mut self, spawn: SpawnPoint) {
        self.spawn = spawn;
    }

    fn tick(&mut self) {
        self.game_time += 1;
        if self.rules.get_bool(GameRule::DoDaylightCycle) {
            self.day_time += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_ids() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(Difficulty::Easy.ordinal(), 1);
        assert!("HARD".parse::<Difficulty>().is_err());
    }

    #[test]
    fn tick_respects_daylight_cycle() {
        let mut level = LevelData::default();
        level.tick();
        assert_eq!(level.game_time(), 1);
        assert_eq!(level.day_time(), 1);

        level
            .set_game_rule(GameRule::DoDaylightCycle, RuleValue::Bool(false))
            .unwrap();
        level.tick();
        assert_eq!(level.game_time(), 2);
        assert_eq!(level.day_time(), 1);
    }

    #[test]
    fn weather_parameters_share_timer() {
        let mut level = LevelData::default();
        level.set_weather_parameters(0, 6000, true, false);
        let weather = level.weather();
        assert_eq!(weather.rain_time, 6000);
        assert_eq!(weather.thunder_time, 6000);
        assert!(weather.raining);
        assert!(!weather.thundering);
    }
}
