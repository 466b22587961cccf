//! Game of Life on a 32x8 LED matrix, driven by a 1 kHz tick.
//!
//! The tick context (an interrupt on hardware) runs [`Ticker::tick`], which
//! debounces the three keys and counts down the software timers. Both post
//! [`Event`]s into a single-producer/single-consumer [`MessageQueue`]. The
//! main context drains that queue through a [`Scheduler`], stepping the
//! [`LifeEngine`] on every frame timer event and reacting to key presses.
//!
//! Everything hardware-specific sits behind the traits in [`hal`].
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod log;

pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod hal;
pub mod keys;
pub mod patterns;
pub mod queue;
pub mod scheduler;
pub mod timer;

pub use config::{Config, StartupMode};
pub use error::Error;
pub use event::{Event, EventKind, Key};
pub use grid::{Grid, HEIGHT, LifeEngine, WIDTH};
pub use hal::{ButtonPress, Display, Keypad, NoSeedStore, SEED_LEN, SeedStore};
pub use keys::{DEBOUNCE_TICKS, KeyState, Keys, RepeatDelays};
pub use patterns::{PATTERNS, Pattern};
pub use queue::{
    EventConsumer, EventProducer, EventSink, EventSource, MessageQueue, QUEUE_SLOTS,
};
pub use scheduler::{Scheduler, Ticker};
pub use timer::{FRAME_TIMER, TICK_HZ, TimerService};
