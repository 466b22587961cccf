//! Software timers counted down by the hardware tick.
//!
//! The tick context is the only writer of the tick counter and of each slot's
//! live count-down. The main loop never touches those; it hands a new
//! configuration over through one atomic request word per slot, which the
//! next [`TimerService::tick`] picks up before counting.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::event::Event;
use crate::queue::EventSink;

/// Rate at which [`TimerService::tick`] must be called. Every tick-based
/// constant in the crate assumes it.
pub const TICK_HZ: u32 = 1000;

/// Slot that paces the animation.
pub const FRAME_TIMER: usize = 0;

const REQUEST_PENDING: u32 = 1 << 31;
const REQUEST_REPEAT: u32 = 1 << 30;
const REQUEST_PERIOD: u32 = REQUEST_REPEAT - 1;

struct TimerSlot {
    /// Ticks left until expiry; zero when disarmed.
    remaining: AtomicU32,
    period: AtomicU32,
    repeating: AtomicBool,
    /// Reconfiguration posted by the main loop, applied on the next tick.
    request: AtomicU32,
}

impl TimerSlot {
    const fn new() -> Self {
        TimerSlot {
            remaining: AtomicU32::new(0),
            period: AtomicU32::new(0),
            repeating: AtomicBool::new(false),
            request: AtomicU32::new(0),
        }
    }

    fn apply_request(&self) {
        let request = self.request.swap(0, Ordering::Acquire);
        if request & REQUEST_PENDING == 0 {
            return;
        }
        let period = request & REQUEST_PERIOD;
        self.period.store(period, Ordering::Relaxed);
        self.remaining.store(period, Ordering::Relaxed);
        self.repeating.store(request & REQUEST_REPEAT != 0, Ordering::Relaxed);
    }

    /// Count down once; true when the timer expired on this tick.
    fn count_down(&self) -> bool {
        let remaining = self.remaining.load(Ordering::Relaxed);
        if remaining == 0 {
            return false;
        }
        let remaining = remaining - 1;
        if remaining == 0 && self.repeating.load(Ordering::Relaxed) {
            self.remaining.store(self.period.load(Ordering::Relaxed), Ordering::Relaxed);
        } else {
            self.remaining.store(remaining, Ordering::Relaxed);
        }
        remaining == 0
    }
}

/// A monotonically increasing tick counter plus `N` count-down timers.
pub struct TimerService<const N: usize = 1> {
    ticks: AtomicU32,
    slots: [TimerSlot; N],
}

impl<const N: usize> TimerService<N> {
    pub const fn new() -> Self {
        TimerService {
            ticks: AtomicU32::new(0),
            slots: [const { TimerSlot::new() }; N],
        }
    }

    /// Ticks elapsed since startup, wrapping after about 49 days.
    pub fn now(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }

    /// (Re)arm the frame timer. See [`TimerService::set_timer`].
    pub fn set(&self, period_ticks: u32, repeating: bool) {
        self.set_timer(FRAME_TIMER, period_ticks, repeating);
    }

    /// Replace the configuration of `slot`, discarding whatever was left of
    /// its count-down. The timer expires on the `period_ticks`-th tick after
    /// this call; a period of zero disarms it.
    ///
    /// # Panics
    ///
    /// If `slot >= N`.
    pub fn set_timer(&self, slot: usize, period_ticks: u32, repeating: bool) {
        let mut request = REQUEST_PENDING | (period_ticks & REQUEST_PERIOD);
        if repeating {
            request |= REQUEST_REPEAT;
        }
        self.slots[slot].request.store(request, Ordering::Release);
    }

    /// Advance by one hardware tick, posting a timer event for every slot
    /// that expires. Called from the tick context only.
    pub fn tick(&self, sink: &mut impl EventSink) {
        for (id, slot) in self.slots.iter().enumerate() {
            slot.apply_request();
            if slot.count_down() {
                // dropped if the queue is full
                sink.post(Event::timer(id as u8));
            }
        }
        self.ticks.fetch_add(1, Ordering::Release);
    }
}

impl<const N: usize> Default for TimerService<N> {
    fn default() -> Self {
        Self::new()
    }
}
