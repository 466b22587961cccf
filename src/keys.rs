//! Per-key debounce and auto-repeat.
//!
//! Each key is sampled once per tick against the raw GPIO level. A level
//! change only restarts the clock; the change is reported once the level
//! has held for more than [`DEBOUNCE_TICKS`]. A key held down then repeats,
//! first after its initial delay and then at its (usually shorter)
//! subsequent delay.

use crate::event::{Event, EventKind, KEY_COUNT, Key};
use crate::hal::Keypad;
use crate::queue::EventSink;

/// Ticks a raw level must hold before it is trusted.
pub const DEBOUNCE_TICKS: u32 = 10;

/// Auto-repeat timing of one key, in ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatDelays {
    /// Hold time before the first repeat.
    pub initial: u32,
    /// Time between later repeats.
    pub subsequent: u32,
}

impl RepeatDelays {
    pub const fn new(initial: u32, subsequent: u32) -> Self {
        RepeatDelays {
            initial,
            subsequent,
        }
    }
}

/// Repeat timing of the left, middle and right keys.
///
/// The middle key's repeats are still posted, but the scheduler only acts on
/// its `KeyDown`, so its subsequent delay has no visible effect.
pub const DEFAULT_REPEAT_DELAYS: [RepeatDelays; KEY_COUNT] = [
    RepeatDelays::new(300, 200),
    RepeatDelays::new(300, 50),
    RepeatDelays::new(300, 200),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct KeyState {
    last_level: Level,
    /// The current level has been reported (or judged not worth reporting).
    steady: bool,
    repeating: bool,
    /// A `KeyDown` went out without its matching `KeyUp` yet.
    held: bool,
    since: u32,
    delays: RepeatDelays,
}

impl KeyState {
    pub const fn new(delays: RepeatDelays) -> Self {
        KeyState {
            last_level: Level::Up,
            steady: true,
            repeating: false,
            held: false,
            since: 0,
            delays,
        }
    }

    pub fn delays(&self) -> RepeatDelays {
        self.delays
    }

    /// Feed one raw sample taken at tick `now`, returning the event it
    /// produces, if any.
    pub fn sample(&mut self, pressed: bool, now: u32) -> Option<EventKind> {
        let level = if pressed { Level::Down } else { Level::Up };
        if level != self.last_level {
            self.last_level = level;
            self.since = now;
            self.steady = false;
            return None;
        }

        let elapsed = now.wrapping_sub(self.since);
        match level {
            Level::Down if !self.steady => {
                if elapsed <= DEBOUNCE_TICKS {
                    return None;
                }
                self.steady = true;
                if self.held {
                    // bounced up and back down again: not a new press
                    return None;
                }
                self.held = true;
                Some(EventKind::KeyDown)
            }
            Level::Down => {
                let delay = if self.repeating {
                    self.delays.subsequent
                } else {
                    self.delays.initial
                };
                if elapsed <= delay {
                    return None;
                }
                self.since = now;
                self.repeating = true;
                Some(EventKind::KeyRepeat)
            }
            Level::Up if !self.steady => {
                if elapsed <= DEBOUNCE_TICKS {
                    return None;
                }
                self.steady = true;
                self.repeating = false;
                if !self.held {
                    return None;
                }
                self.held = false;
                Some(EventKind::KeyUp)
            }
            Level::Up => None,
        }
    }
}

/// The state machines of all keys, indexed by [`Key`].
pub struct Keys {
    states: [KeyState; KEY_COUNT],
}

impl Keys {
    pub const fn new(delays: [RepeatDelays; KEY_COUNT]) -> Self {
        Keys {
            states: [
                KeyState::new(delays[0]),
                KeyState::new(delays[1]),
                KeyState::new(delays[2]),
            ],
        }
    }

    pub fn state(&self, key: Key) -> &KeyState {
        &self.states[key.index()]
    }

    /// Sample every key once and post whatever events come out.
    pub fn poll(&mut self, keypad: &mut impl Keypad, now: u32, sink: &mut impl EventSink) {
        for key in Key::ALL {
            let pressed = keypad.is_key_pressed(key);
            if let Some(kind) = self.states[key.index()].sample(pressed, now) {
                sink.post(Event::key(kind, key));
            }
        }
    }
}

impl Default for Keys {
    fn default() -> Self {
        Keys::new(DEFAULT_REPEAT_DELAYS)
    }
}
