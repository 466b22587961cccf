//! Fixed-capacity event queue between the tick context and the main loop.
//!
//! Backed by `heapless::spsc`, whose head and tail indices are atomics, so
//! the producer half may run in an interrupt while the consumer half is
//! drained from thread mode without a lock.

use heapless::spsc::{Consumer, Producer, Queue};

use crate::event::Event;

/// Slots in the queue. The ring keeps one free, so 15 events fit; a tick
/// produces at most 4.
pub const QUEUE_SLOTS: usize = 16;

/// Anything events can be posted into.
pub trait EventSink {
    /// Enqueue `event`. Returns `false` and drops the event when full.
    fn post(&mut self, event: Event) -> bool;
}

/// Anything events can be drained from.
pub trait EventSource {
    fn try_pop(&mut self) -> Option<Event>;
}

pub struct MessageQueue<const N: usize = QUEUE_SLOTS> {
    inner: Queue<Event, N>,
}

impl<const N: usize> MessageQueue<N> {
    pub const fn new() -> Self {
        MessageQueue {
            inner: Queue::new(),
        }
    }

    /// Number of events the queue can hold at once.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Split into the tick-side and main-side halves.
    pub fn split(&mut self) -> (EventProducer<'_, N>, EventConsumer<'_, N>) {
        let (producer, consumer) = self.inner.split();
        (EventProducer { inner: producer }, EventConsumer { inner: consumer })
    }
}

impl<const N: usize> Default for MessageQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventSink for MessageQueue<N> {
    fn post(&mut self, event: Event) -> bool {
        self.inner.enqueue(event).is_ok()
    }
}

impl<const N: usize> EventSource for MessageQueue<N> {
    fn try_pop(&mut self) -> Option<Event> {
        self.inner.dequeue()
    }
}

/// Posting half, owned by the tick context.
pub struct EventProducer<'q, const N: usize = QUEUE_SLOTS> {
    inner: Producer<'q, Event, N>,
}

impl<const N: usize> EventSink for EventProducer<'_, N> {
    fn post(&mut self, event: Event) -> bool {
        self.inner.enqueue(event).is_ok()
    }
}

/// Draining half, owned by the main loop.
pub struct EventConsumer<'q, const N: usize = QUEUE_SLOTS> {
    inner: Consumer<'q, Event, N>,
}

impl<const N: usize> EventConsumer<'_, N> {
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.inner.ready()
    }
}

impl<const N: usize> EventSource for EventConsumer<'_, N> {
    fn try_pop(&mut self) -> Option<Event> {
        self.inner.dequeue()
    }
}
