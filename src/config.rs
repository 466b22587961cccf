use crate::event::KEY_COUNT;
use crate::grid::HEIGHT;
use crate::hal::MAX_BRIGHTNESS;
use crate::keys::{DEFAULT_REPEAT_DELAYS, RepeatDelays};

/// Shortest frame interval, in ticks.
pub const MIN_INTERVAL: u32 = 50;
/// Longest frame interval, in ticks.
pub const MAX_INTERVAL: u32 = 1000;
/// Step by which the left and right keys change the interval.
pub const INTERVAL_INCREMENT: u32 = 50;
pub const DEFAULT_INTERVAL: u32 = 150;

/// How the playfield is seeded at power-up and what the middle key does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StartupMode {
    /// Resume from the seed slot (built-in glider if it is empty); the
    /// middle key saves the running grid as the new seed.
    FixedSeed,
    /// Start on the first built-in pattern; the middle key steps through
    /// the others.
    #[default]
    CyclablePatterns,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub startup_mode: StartupMode,
    /// Frame interval at startup, in ticks.
    pub interval: u32,
    pub brightness: u8,
    /// Column of the playfield the first pattern column lands in.
    pub seed_column: usize,
    /// Rows every pattern column is shifted down by.
    pub seed_shift: u8,
    pub repeat_delays: [RepeatDelays; KEY_COUNT],
}

impl Default for Config {
    fn default() -> Self {
        Config {
            startup_mode: StartupMode::default(),
            interval: DEFAULT_INTERVAL,
            brightness: 1,
            seed_column: 11,
            seed_shift: 2,
            repeat_delays: DEFAULT_REPEAT_DELAYS,
        }
    }
}

impl Config {
    /// Bring every field into the range the rest of the crate assumes.
    pub fn validated(mut self) -> Self {
        let interval = self.interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        self.interval = interval - (interval - MIN_INTERVAL) % INTERVAL_INCREMENT;
        self.brightness = self.brightness.min(MAX_BRIGHTNESS);
        self.seed_shift = self.seed_shift.min(HEIGHT as u8 - 1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_already_valid() {
        assert_eq!(Config::default().validated(), Config::default());
    }

    #[test]
    fn interval_is_clamped_and_snapped() {
        let snap = |interval| Config { interval, ..Config::default() }.validated().interval;
        assert_eq!(snap(0), MIN_INTERVAL);
        assert_eq!(snap(5000), MAX_INTERVAL);
        assert_eq!(snap(149), 100);
        assert_eq!(snap(150), 150);
    }

    #[test]
    fn brightness_and_shift_are_capped() {
        let config = Config {
            brightness: 200,
            seed_shift: 12,
            ..Config::default()
        }
        .validated();
        assert_eq!(config.brightness, 15);
        assert_eq!(config.seed_shift, 7);
    }
}
