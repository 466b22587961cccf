//! Collaborators the core talks to: the LED display, the keys and the
//! persistent seed slot. The firmware supplies the real ones; tests supply
//! doubles.

use core::convert::Infallible;

use embedded_hal::digital::InputPin;

use crate::event::Key;
use crate::grid::{Grid, WIDTH};

/// Size of the persistent seed slot: one byte per grid column.
pub const SEED_LEN: usize = WIDTH;

/// Highest brightness level accepted by [`Display::set_brightness`].
pub const MAX_BRIGHTNESS: u8 = 15;

pub trait Display {
    type Error;

    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Push the whole grid to the panel.
    fn send_buffer(&mut self, grid: &Grid) -> Result<(), Self::Error>;

    /// `level` is in `0..=MAX_BRIGHTNESS`.
    fn set_brightness(&mut self, level: u8) -> Result<(), Self::Error>;
}

/// Raw, undebounced key levels.
pub trait Keypad {
    fn is_key_pressed(&mut self, key: Key) -> bool;
}

/// An active-low push button.
pub trait ButtonPress {
    fn pressed(&mut self) -> bool;
}

impl<P: InputPin> ButtonPress for P {
    fn pressed(&mut self) -> bool {
        // a pin that cannot be read counts as released
        self.is_low().unwrap_or(false)
    }
}

/// Three buttons wired as left, middle, right.
impl<L, M, R> Keypad for (L, M, R)
where
    L: ButtonPress,
    M: ButtonPress,
    R: ButtonPress,
{
    fn is_key_pressed(&mut self, key: Key) -> bool {
        match key {
            Key::Left => self.0.pressed(),
            Key::Middle => self.1.pressed(),
            Key::Right => self.2.pressed(),
        }
    }
}

/// The persistent seed slot.
pub trait SeedStore {
    type Error;

    /// Fill `buf` from the slot. Returns `false` if the slot holds no seed,
    /// in which case `buf` is unspecified.
    fn read_seed(&mut self, buf: &mut [u8; SEED_LEN]) -> Result<bool, Self::Error>;

    fn write_seed(&mut self, buf: &[u8; SEED_LEN]) -> Result<(), Self::Error>;
}

/// For boards without persistent storage: always empty, writes vanish.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSeedStore;

impl SeedStore for NoSeedStore {
    type Error = Infallible;

    fn read_seed(&mut self, _buf: &mut [u8; SEED_LEN]) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn write_seed(&mut self, _buf: &[u8; SEED_LEN]) -> Result<(), Self::Error> {
        Ok(())
    }
}
