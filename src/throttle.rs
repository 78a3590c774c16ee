//! Rate limiting for pointer-driven work.
//!
//! egui has no timer callbacks, so the throttle is driven by explicit
//! timestamps: the caller feeds it calls with [`Throttle::call`] and polls it
//! once per frame with [`Throttle::poll`], requesting a repaint at
//! [`Throttle::next_deadline`] while a window is open.

use std::time::{Duration, Instant};

/// Lets at most one call through per delay window.
///
/// A call arriving while the window is open is parked; only the most recent
/// parked arguments survive. When the window closes the parked call fires and
/// a new window starts from that moment.
pub struct Throttle<A> {
    delay: Duration,
    deadline: Option<Instant>,
    pending: Option<A>,
}

impl<A> Throttle<A> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            pending: None,
        }
    }

    /// Offers a call. Returns the arguments back if the call should run now,
    /// otherwise parks them until the window closes.
    pub fn call(&mut self, now: Instant, args: A) -> Option<A> {
        match self.deadline {
            Some(deadline) if now < deadline => {
                self.pending = Some(args);
                None
            }
            _ => {
                // A window that expired without being polled has nothing left
                // to deliver: the fresh arguments supersede anything parked.
                self.pending = None;
                self.deadline = Some(now + self.delay);
                Some(args)
            }
        }
    }

    /// Closes the window if it has elapsed. Returns the parked call, if any,
    /// which restarts the window.
    pub fn poll(&mut self, now: Instant) -> Option<A> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        match self.pending.take() {
            Some(args) => {
                self.deadline = Some(now + self.delay);
                Some(args)
            }
            None => {
                self.deadline = None;
                None
            }
        }
    }

    /// When the open window closes, if one is open.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn first_call_fires_immediately() {
        let start = Instant::now();
        let mut throttle = Throttle::new(ms(1000));

        assert_eq!(throttle.call(start, 1), Some(1));
        assert_eq!(throttle.next_deadline(), Some(start + ms(1000)));
    }

    #[test]
    fn burst_yields_one_immediate_and_one_trailing_call_with_latest_args() {
        let start = Instant::now();
        let mut throttle = Throttle::new(ms(1000));
        let mut fired = Vec::new();

        for (i, offset) in [0, 100, 200, 300, 400].into_iter().enumerate() {
            if let Some(args) = throttle.call(start + ms(offset), i) {
                fired.push(args);
            }
        }
        assert_eq!(fired, vec![0]);

        // Window still open.
        assert_eq!(throttle.poll(start + ms(999)), None);

        if let Some(args) = throttle.poll(start + ms(1000)) {
            fired.push(args);
        }
        assert_eq!(fired, vec![0, 4]);

        // Trailing call restarted the window; nothing else is parked.
        assert!(throttle.next_deadline().is_some());
        assert_eq!(throttle.poll(start + ms(2000)), None);
        assert!(throttle.next_deadline().is_none());
    }

    #[test]
    fn window_closes_quietly_without_parked_call() {
        let start = Instant::now();
        let mut throttle = Throttle::new(ms(50));

        assert_eq!(throttle.call(start, "a"), Some("a"));
        assert_eq!(throttle.poll(start + ms(60)), None);
        assert!(throttle.next_deadline().is_none());

        assert_eq!(throttle.call(start + ms(70), "b"), Some("b"));
    }

    #[test]
    fn calls_during_restarted_window_are_parked_again() {
        let start = Instant::now();
        let mut throttle = Throttle::new(ms(100));

        throttle.call(start, 1);
        throttle.call(start + ms(10), 2);
        assert_eq!(throttle.poll(start + ms(100)), Some(2));

        assert_eq!(throttle.call(start + ms(150), 3), None);
        assert_eq!(throttle.poll(start + ms(199)), None);
        assert_eq!(throttle.poll(start + ms(200)), Some(3));
    }

    #[test]
    fn expired_unpolled_window_lets_new_call_through() {
        let start = Instant::now();
        let mut throttle = Throttle::new(ms(100));

        throttle.call(start, 1);
        throttle.call(start + ms(10), 2);

        assert_eq!(throttle.call(start + ms(500), 3), Some(3));
        assert_eq!(throttle.poll(start + ms(600)), None);
    }
}
