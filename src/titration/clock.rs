use std::cell::Cell;
use std::rc::Rc;

/// Monotonic time source, in seconds.
pub trait Clock {
    fn now_seconds(&self) -> f64;
}

/// `performance.now()` of the current window.
///
/// Reads 0 outside a browser, which freezes any animation rather than failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceClock;

impl Clock for PerformanceClock {
    fn now_seconds(&self) -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now() / 1000.0)
            .unwrap_or(0.0)
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_s: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_s)),
        }
    }

    pub fn advance(&self, dt_s: f64) {
        self.now.set(self.now.get() + dt_s);
    }

    pub fn set(&self, now_s: f64) {
        self.now.set(now_s);
    }
}

impl Clock for ManualClock {
    fn now_seconds(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new(1.5);
        let handle = clock.clone();
        handle.advance(0.25);
        assert_eq!(clock.now_seconds(), 1.75);
        clock.set(10.0);
        assert_eq!(handle.now_seconds(), 10.0);
    }
}
