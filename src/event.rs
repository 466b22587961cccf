/// Number of physical keys on the device.
pub const KEY_COUNT: usize = 3;

/// The three front-panel keys, in GPIO order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Shortens the frame interval (faster animation).
    Left = 0,
    /// Selects the next pattern, or snapshots the seed in fixed-seed mode.
    Middle = 1,
    /// Lengthens the frame interval (slower animation).
    Right = 2,
}

impl Key {
    pub const ALL: [Key; KEY_COUNT] = [Key::Left, Key::Middle, Key::Right];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Key> {
        Key::ALL.get(index).copied()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Timer,
    KeyDown,
    KeyUp,
    KeyRepeat,
}

/// A small value record passed from the tick context to the main loop.
///
/// `param` is the key index for key events and the timer slot for
/// [`EventKind::Timer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub param: u8,
}

impl Event {
    pub const fn timer(slot: u8) -> Self {
        Event {
            kind: EventKind::Timer,
            param: slot,
        }
    }

    pub const fn key(kind: EventKind, key: Key) -> Self {
        Event {
            kind,
            param: key as u8,
        }
    }

    /// The key this event refers to, `None` for timer events or an
    /// out-of-range index.
    pub fn key_index(&self) -> Option<Key> {
        match self.kind {
            EventKind::Timer => None,
            _ => Key::from_index(self.param as usize),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_indices_match_gpio_order() {
        for (i, key) in Key::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
            assert_eq!(Key::from_index(i), Some(*key));
        }
        assert_eq!(Key::from_index(KEY_COUNT), None);
    }

    #[test]
    fn timer_events_have_no_key() {
        assert_eq!(Event::timer(0).key_index(), None);
        let ev = Event::key(EventKind::KeyRepeat, Key::Right);
        assert_eq!(ev.param, 2);
        assert_eq!(ev.key_index(), Some(Key::Right));
    }
}
