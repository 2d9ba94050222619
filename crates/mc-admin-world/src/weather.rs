//! Weather timers and the random duration providers that refill them.

use rand::Rng;
use serde::Deserialize;

/// Uniform integer distribution over `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UniformInt {
    pub min: i32,
    pub max: i32,
}

impl UniformInt {
    pub const fn of(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Duration ranges, in ticks, used when a weather timer needs a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WeatherProviders {
    pub rain_delay: UniformInt,
    pub rain_duration: UniformInt,
    pub thunder_delay: UniformInt,
    pub thunder_duration: UniformInt,
}

impl Default for WeatherProviders {
    fn default() -> Self {
        Self {
            rain_delay: UniformInt::of(12_000, 180_000),
            rain_duration: UniformInt::of(12_000, 24_000),
            thunder_delay: UniformInt::of(12_000, 180_000),
            thunder_duration: UniformInt::of(3_600, 15_600),
        }
    }
}

/// Weather timers of a level.
///
/// While `clear_time` is positive the weather is forced clear and the other
/// timers are held; once it runs out the rain and thunder timers count down
/// independently and flip their flag when they reach zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeatherState {
    pub clear_time: i32,
    pub rain_time: i32,
    pub thunder_time: i32,
    pub raining: bool,
    pub thundering: bool,
}

impl WeatherState {
    /// Advance the weather cycle by one tick.
    pub fn advance<R: Rng + ?Sized>(&mut self, providers: &WeatherProviders, rng: &mut R) {
        if self.clear_time > 0 {
            self.clear_time -= 1;
            self.thunder_time = if self.thundering { 0 } else { 1 };
            self.rain_time = if self.raining { 0 } else { 1 };
            self.thundering = false;
            self.raining = false;
            return;
        }

        if self.thunder_time > 0 {
            self.thunder_time -= 1;
            if self.thunder_time == 0 {
                self.thundering = !self.thundering;
            }
        } else if self.thundering {
            self.thunder_time = providers.thunder_duration.sample(rng);
        } else {
            self.thunder_time = providers.thunder_delay.sample(rng);
        }

        if self.rain_time > 0 {
            self.rain_time -= 1;
            if self.rain_time == 0 {
                self.raining = !self.raining;
            }
        } else if self.raining {
            self.rain_time = providers.rain_duration.sample(rng);
        } else {
            self.rain_time = providers.rain_delay.sample(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sample_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let provider = UniformInt::of(3_600, 15_600);
        for _ in 0..1000 {
            assert!(provider.contains(provider.sample(&mut rng)));
        }
    }

    #[test]
    fn degenerate_range_returns_min() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(UniformInt::of(5, 5).sample(&mut rng), 5);
        assert_eq!(UniformInt::of(9, 2).sample(&mut rng), 9);
    }

    #[test]
    fn clear_time_forces_clear_weather() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = WeatherState {
            clear_time: 2,
            rain_time: 500,
            thunder_time: 500,
            raining: true,
            thundering: true,
        };
        state.advance(&WeatherProviders::default(), &mut rng);
        assert_eq!(state.clear_time, 1);
        assert!(!state.raining);
        assert!(!state.thundering);
        assert_eq!(state.rain_time, 0);
        assert_eq!(state.thunder_time, 0);
    }

    #[test]
    fn rain_flips_when_timer_expires() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut state = WeatherState {
            rain_time: 1,
            thunder_time: 100,
            ..Default::default()
        };
        state.advance(&WeatherProviders::default(), &mut rng);
        assert!(state.raining);
        assert_eq!(state.rain_time, 0);

        // Next tick refills the rain timer from the duration provider.
        state.advance(&WeatherProviders::default(), &mut rng);
        assert!(WeatherProviders::default()
            .rain_duration
            .contains(state.rain_time));
    }

    #[test]
    fn providers_deserialize_with_defaults() {
        let providers: WeatherProviders =
            serde_json::from_str(r#"{"rain_delay": {"min": 10, "max": 20}}"#).unwrap();
        assert_eq!(providers.rain_delay, UniformInt::of(10, 20));
        assert_eq!(
            providers.thunder_duration,
            WeatherProviders::default().thunder_duration
        );
    }
}
