//! One-shot countdown used for the prep delay and the answer budget.

/// Counts down once per `tick()` and reports reaching zero exactly once.
///
/// The countdown does not stop itself after firing; the driver decides what
/// firing means and re-arms it with `reset()` for the next activation.
#[derive(Debug, Clone)]
pub struct Countdown {
    start: u32,
    remaining: u32,
    fired: bool,
}

impl Countdown {
    pub fn new(start: u32) -> Self {
        Self {
            start,
            remaining: start,
            fired: false,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Re-arm at the configured start value.
    pub fn reset(&mut self) {
        self.remaining = self.start;
        self.fired = false;
    }

    /// Re-arm with a new start value.
    pub fn reset_to(&mut self, start: u32) {
        self.start = start;
        self.reset();
    }

    /// Advance one second. Returns true exactly once, on the tick that
    /// reaches zero; later ticks return false and do not underflow.
    pub fn tick(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        if self.remaining == 0 && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once_on_reaching_zero() {
        let mut countdown = Countdown::new(3);
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());
        // Further ticks never re-fire and never underflow.
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn reset_re_arms_for_another_activation() {
        let mut countdown = Countdown::new(2);
        assert!(!countdown.tick());
        assert!(countdown.tick());

        countdown.reset();
        assert_eq!(countdown.remaining(), 2);
        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert!(!countdown.tick());
    }

    #[test]
    fn reset_to_changes_the_budget() {
        let mut countdown = Countdown::new(60);
        countdown.reset_to(2);
        assert!(!countdown.tick());
        assert!(countdown.tick());
    }
}
