use std::convert::Infallible;
use std::fmt::Debug;

use lattice_life::{
    Config, DEBOUNCE_TICKS, Display, Event, EventKind, EventSink, EventSource, Grid, Key, Keypad,
    Keys, MessageQueue, NoSeedStore, PATTERNS, Scheduler, SeedStore, Ticker, TimerService,
};

#[derive(Default)]
struct Buttons([bool; 3]);

impl Buttons {
    fn hold(&mut self, key: Key, pressed: bool) {
        self.0[key.index()] = pressed;
    }
}

impl Keypad for Buttons {
    fn is_key_pressed(&mut self, key: Key) -> bool {
        self.0[key.index()]
    }
}

#[derive(Default)]
struct Frames(Vec<Grid>);

impl Display for Frames {
    type Error = Infallible;

    fn initialize(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn send_buffer(&mut self, grid: &Grid) -> Result<(), Self::Error> {
        self.0.push(*grid);
        Ok(())
    }

    fn set_brightness(&mut self, _level: u8) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Run `ticks` hardware ticks, letting the main loop drain the queue after
/// each one.
fn drive<K, P, E, D, S>(
    ticker: &mut Ticker<'_, K, P>,
    scheduler: &mut Scheduler<'_, E, D, S>,
    ticks: u32,
)
where
    K: Keypad,
    P: EventSink,
    E: EventSource,
    D: Display,
    S: SeedStore,
    D::Error: Debug,
    S::Error: Debug,
{
    for _ in 0..ticks {
        ticker.tick();
        while scheduler.poll().unwrap() {}
    }
}

#[test]
fn frames_follow_the_interval() {
    let timers: TimerService = TimerService::new();
    let mut queue: MessageQueue = MessageQueue::new();
    let (tx, rx) = queue.split();
    let mut ticker = Ticker::new(&timers, Keys::default(), Buttons::default(), tx);
    let mut scheduler =
        Scheduler::new(rx, &timers, Frames::default(), NoSeedStore, Config::default());
    scheduler.start().unwrap();
    assert_eq!(scheduler.display().0.len(), 1);

    drive(&mut ticker, &mut scheduler, 149);
    assert_eq!(scheduler.display().0.len(), 1);
    drive(&mut ticker, &mut scheduler, 1);
    assert_eq!(scheduler.display().0.len(), 2);
    drive(&mut ticker, &mut scheduler, 300);
    assert_eq!(scheduler.display().0.len(), 4);
    assert_eq!(scheduler.engine().generation(), 3);
}

#[test]
fn holding_left_speeds_up_on_press_and_repeat() {
    let timers: TimerService = TimerService::new();
    let mut queue: MessageQueue = MessageQueue::new();
    let (tx, rx) = queue.split();
    let mut ticker = Ticker::new(&timers, Keys::default(), Buttons::default(), tx);
    let mut scheduler =
        Scheduler::new(rx, &timers, Frames::default(), NoSeedStore, Config::default());
    scheduler.start().unwrap();

    ticker.keypad_mut().hold(Key::Left, true);
    drive(&mut ticker, &mut scheduler, DEBOUNCE_TICKS + 1);
    assert_eq!(scheduler.interval(), 150);
    drive(&mut ticker, &mut scheduler, 1);
    assert_eq!(scheduler.interval(), 100);

    // first repeat 300 ticks after the press began
    drive(&mut ticker, &mut scheduler, 289);
    assert_eq!(scheduler.interval(), 100);
    drive(&mut ticker, &mut scheduler, 1);
    assert_eq!(scheduler.interval(), 50);

    // further repeats are clamped at the minimum
    drive(&mut ticker, &mut scheduler, 1000);
    assert_eq!(scheduler.interval(), 50);
}

#[test]
fn selecting_a_pattern_restarts_the_cadence() {
    let timers: TimerService = TimerService::new();
    let mut queue: MessageQueue = MessageQueue::new();
    let (tx, rx) = queue.split();
    let mut ticker = Ticker::new(&timers, Keys::default(), Buttons::default(), tx);
    let mut scheduler =
        Scheduler::new(rx, &timers, Frames::default(), NoSeedStore, Config::default());
    scheduler.start().unwrap();

    drive(&mut ticker, &mut scheduler, 100);
    ticker.keypad_mut().hold(Key::Middle, true);
    drive(&mut ticker, &mut scheduler, DEBOUNCE_TICKS + 2);
    assert_eq!(scheduler.pattern_index(), 1);
    assert_eq!(scheduler.display().0.len(), 2);
    ticker.keypad_mut().hold(Key::Middle, false);

    // the frame that was due 150 ticks after start never comes
    drive(&mut ticker, &mut scheduler, 100);
    assert_eq!(scheduler.engine().generation(), 0);
    assert_eq!(scheduler.display().0.len(), 2);

    drive(&mut ticker, &mut scheduler, 50);
    assert_eq!(scheduler.engine().generation(), 1);
    assert_eq!(scheduler.display().0.len(), 3);
}

#[test]
fn holding_middle_selects_only_once() {
    let timers: TimerService = TimerService::new();
    let mut queue: MessageQueue = MessageQueue::new();
    let (tx, rx) = queue.split();
    let mut ticker = Ticker::new(&timers, Keys::default(), Buttons::default(), tx);
    let mut scheduler =
        Scheduler::new(rx, &timers, Frames::default(), NoSeedStore, Config::default());
    scheduler.start().unwrap();

    ticker.keypad_mut().hold(Key::Middle, true);
    drive(&mut ticker, &mut scheduler, 2000);
    assert_eq!(scheduler.pattern_index(), 1);

    // release and press again for each remaining pattern, then wrap
    for _ in 0..PATTERNS.len() {
        ticker.keypad_mut().hold(Key::Middle, false);
        drive(&mut ticker, &mut scheduler, 20);
        ticker.keypad_mut().hold(Key::Middle, true);
        drive(&mut ticker, &mut scheduler, 20);
    }
    assert_eq!(scheduler.pattern_index(), 1);
}

#[test]
fn stalled_main_loop_loses_events_without_blocking_the_tick() {
    let timers: TimerService = TimerService::new();
    let mut queue: MessageQueue = MessageQueue::new();
    let capacity = queue.capacity();
    let (tx, rx) = queue.split();
    let mut ticker = Ticker::new(&timers, Keys::default(), Buttons::default(), tx);
    let mut scheduler =
        Scheduler::new(rx, &timers, Frames::default(), NoSeedStore, Config::default());
    scheduler.start().unwrap();

    // twenty frames' worth of ticks with nobody draining
    for _ in 0..150 * 20 {
        ticker.tick();
    }
    assert_eq!(timers.now(), 3000);

    let mut handled = 0;
    while scheduler.poll().unwrap() {
        handled += 1;
    }
    assert_eq!(handled, capacity);
    assert_eq!(scheduler.engine().generation(), capacity as u32);
}

#[test]
fn key_events_precede_the_timer_event_of_the_same_tick() {
    let timers: TimerService = TimerService::new();
    let mut queue: MessageQueue = MessageQueue::new();
    let (tx, mut rx) = queue.split();
    let mut buttons = Buttons::default();
    buttons.hold(Key::Left, true);
    let mut ticker = Ticker::new(&timers, Keys::default(), buttons, tx);

    // the press settles on the 12th tick, the same one the timer expires on
    timers.set(DEBOUNCE_TICKS + 2, false);
    for _ in 0..DEBOUNCE_TICKS + 1 {
        ticker.tick();
        assert_eq!(rx.try_pop(), None);
    }
    ticker.tick();

    assert_eq!(rx.try_pop(), Some(Event::key(EventKind::KeyDown, Key::Left)));
    assert_eq!(rx.try_pop(), Some(Event::timer(0)));
    assert_eq!(rx.try_pop(), None);
}
