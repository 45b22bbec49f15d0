use std::time::Duration;

/// Handle for cancelling a scheduled delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TimerHandle,
    due: Duration,
    payload: T,
}

/// Fire-once delayed payloads driven by frame time.
///
/// The queue owns its payloads, so dropping it drops every pending timer:
/// nothing can fire into a session that no longer exists.
#[derive(Debug)]
pub struct DelayQueue<T> {
    now: Duration,
    pending: Vec<Pending<T>>,
    next_handle: u64,
}

impl<T> DelayQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            pending: Vec::new(),
            next_handle: 1,
        }
    }

    /// Schedule `payload` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push(Pending {
            handle,
            due: self.now.saturating_add(delay),
            payload,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.handle != handle);
        self.pending.len() != before
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance time by `dt` and return the payloads that came due, earliest
    /// first. Timers due at the same instant fire in scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|p| (p.due, p.handle.0));
        due.into_iter().map(|p| p.payload).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
