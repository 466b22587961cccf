//! The two halves of the event loop: [`Ticker`] runs in the tick context and
//! only produces events; [`Scheduler`] runs in the main context and only
//! consumes them.

use core::convert::Infallible;

use crate::config::{Config, INTERVAL_INCREMENT, MAX_INTERVAL, MIN_INTERVAL, StartupMode};
use crate::error::Error;
use crate::event::{Event, EventKind, Key};
use crate::grid::{Grid, LifeEngine};
use crate::hal::{Display, Keypad, SEED_LEN, SeedStore};
use crate::keys::Keys;
use crate::patterns::PATTERNS;
use crate::queue::{EventSink, EventSource};
use crate::timer::{FRAME_TIMER, TimerService};

/// Everything the hardware tick touches. Work per tick is one sample per
/// key plus one count-down per timer.
pub struct Ticker<'a, K, P, const T: usize = 1> {
    timers: &'a TimerService<T>,
    keys: Keys,
    keypad: K,
    events: P,
}

impl<'a, K: Keypad, P: EventSink, const T: usize> Ticker<'a, K, P, T> {
    pub fn new(timers: &'a TimerService<T>, keys: Keys, keypad: K, events: P) -> Self {
        Ticker {
            timers,
            keys,
            keypad,
            events,
        }
    }

    /// Call at [`TICK_HZ`](crate::TICK_HZ). Key events of a tick are posted
    /// before its timer events.
    pub fn tick(&mut self) {
        let now = self.timers.now();
        self.keys.poll(&mut self.keypad, now, &mut self.events);
        self.timers.tick(&mut self.events);
    }

    pub fn keypad_mut(&mut self) -> &mut K {
        &mut self.keypad
    }
}

type Outcome<R, D, S> = Result<R, Error<<D as Display>::Error, <S as SeedStore>::Error>>;

/// The main loop: drains the queue and reacts to each event.
pub struct Scheduler<'a, E, D, S, const T: usize = 1> {
    events: E,
    timers: &'a TimerService<T>,
    engine: LifeEngine,
    display: D,
    store: S,
    config: Config,
    interval: u32,
    pattern: usize,
}

impl<'a, E, D, S, const T: usize> Scheduler<'a, E, D, S, T>
where
    E: EventSource,
    D: Display,
    S: SeedStore,
{
    pub fn new(
        events: E,
        timers: &'a TimerService<T>,
        display: D,
        store: S,
        config: Config,
    ) -> Self {
        let config = config.validated();
        Scheduler {
            events,
            timers,
            engine: LifeEngine::new(),
            display,
            store,
            interval: config.interval,
            config,
            pattern: 0,
        }
    }

    /// Bring up the panel, seed the playfield and start the frame timer.
    pub fn start(&mut self) -> Outcome<(), D, S> {
        info!(
            "starting: {:?}, interval {} ticks, brightness {}",
            self.config.startup_mode, self.interval, self.config.brightness
        );
        self.display.initialize().map_err(Error::Display)?;
        self.display
            .set_brightness(self.config.brightness)
            .map_err(Error::Display)?;

        match self.config.startup_mode {
            StartupMode::CyclablePatterns => self.seed_pattern(),
            StartupMode::FixedSeed => {
                let mut seed = [0u8; SEED_LEN];
                if self.store.read_seed(&mut seed).map_err(Error::Storage)? {
                    info!("restoring stored seed");
                    self.engine.restore(Grid::from_columns(seed));
                } else {
                    self.seed_pattern();
                }
            }
        }
        self.refresh()?;
        self.rearm();
        Ok(())
    }

    /// Handle one queued event, if there is one. Returns whether an event
    /// was handled.
    pub fn poll(&mut self) -> Outcome<bool, D, S> {
        match self.events.try_pop() {
            Some(event) => {
                self.dispatch(event)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Poll forever, calling `idle` whenever the queue is empty. Only
    /// returns on a collaborator error.
    pub fn run(&mut self, mut idle: impl FnMut()) -> Outcome<Infallible, D, S> {
        loop {
            if !self.poll()? {
                idle();
            }
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Outcome<(), D, S> {
        match (event.kind, event.key_index()) {
            (EventKind::Timer, _) if event.param as usize == FRAME_TIMER => {
                self.engine.step();
                self.refresh()
            }
            (EventKind::KeyDown | EventKind::KeyRepeat, Some(Key::Left)) => {
                if self.interval > MIN_INTERVAL {
                    self.set_interval(self.interval - INTERVAL_INCREMENT);
                }
                Ok(())
            }
            (EventKind::KeyDown | EventKind::KeyRepeat, Some(Key::Right)) => {
                if self.interval < MAX_INTERVAL {
                    self.set_interval(self.interval + INTERVAL_INCREMENT);
                }
                Ok(())
            }
            (EventKind::KeyDown, Some(Key::Middle)) => match self.config.startup_mode {
                StartupMode::CyclablePatterns => self.next_pattern(),
                StartupMode::FixedSeed => self.snapshot(),
            },
            _ => Ok(()),
        }
    }

    /// Frame interval in ticks.
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Index into [`PATTERNS`] of the pattern last seeded.
    pub fn pattern_index(&self) -> usize {
        self.pattern
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn set_interval(&mut self, interval: u32) {
        debug!("interval {} -> {} ticks", self.interval, interval);
        self.interval = interval;
        self.rearm();
    }

    fn next_pattern(&mut self) -> Outcome<(), D, S> {
        self.pattern = (self.pattern + 1) % PATTERNS.len();
        self.seed_pattern();
        self.refresh()?;
        // the new seed gets a full interval before its first step
        self.rearm();
        Ok(())
    }

    fn snapshot(&mut self) -> Outcome<(), D, S> {
        info!("saving generation {} as seed", self.engine.generation());
        self.store
            .write_seed(self.engine.grid().columns())
            .map_err(Error::Storage)
    }

    fn seed_pattern(&mut self) {
        let pattern = &PATTERNS[self.pattern];
        info!("seeding {}", pattern.name);
        self.engine.seed(pattern, self.config.seed_column, self.config.seed_shift);
    }

    fn refresh(&mut self) -> Outcome<(), D, S> {
        self.display
            .send_buffer(self.engine.grid())
            .map_err(Error::Display)
    }

    fn rearm(&self) {
        self.timers.set(self.interval, true);
    }
}
