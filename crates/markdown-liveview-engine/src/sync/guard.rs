use std::time::{Duration, Instant};

use super::surface::ViewRole;

/// Time source for the guard window.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Reentrancy guard: a syncing flag plus one pending release deadline.
///
/// The flag is the view that drove the current sync. Arming again replaces
/// the pending release, so a burst of events keeps the guard up until the
/// burst has been quiet for a full delay.
#[derive(Debug, Default)]
pub struct SyncGuard {
    driver: Option<ViewRole>,
    release_at: Option<Instant>,
}

impl SyncGuard {
    pub fn driver(&self) -> Option<ViewRole> {
        self.driver
    }

    pub fn pending_release(&self) -> Option<Instant> {
        self.release_at
    }

    /// Raises the guard for `driver` and (re)schedules its release.
    pub fn arm(&mut self, driver: ViewRole, now: Instant, delay: Duration) {
        self.driver = Some(driver);
        self.release_at = Some(now + delay);
    }

    /// Fires the pending release if it is due. Returns true when it fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(at) if now >= at => {
                self.cancel();
                true
            }
            _ => false,
        }
    }

    /// Drops the flag and any pending release.
    pub fn cancel(&mut self) {
        self.driver = None;
        self.release_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    #[test]
    fn releases_after_delay() {
        let t0 = Instant::now();
        let mut guard = SyncGuard::default();
        guard.arm(ViewRole::Source, t0, DELAY);

        assert!(!guard.poll(t0 + Duration::from_millis(49)));
        assert_eq!(guard.driver(), Some(ViewRole::Source));
        assert!(guard.poll(t0 + DELAY));
        assert_eq!(guard.driver(), None);
        assert_eq!(guard.pending_release(), None);
    }

    #[test]
    fn rearming_cancels_previous_release() {
        let t0 = Instant::now();
        let mut guard = SyncGuard::default();
        guard.arm(ViewRole::Source, t0, DELAY);
        guard.arm(ViewRole::Source, t0 + Duration::from_millis(40), DELAY);

        // The first deadline has passed but was replaced.
        assert!(!guard.poll(t0 + Duration::from_millis(60)));
        assert_eq!(guard.driver(), Some(ViewRole::Source));
        assert!(guard.poll(t0 + Duration::from_millis(90)));
    }

    #[test]
    fn cancel_clears_everything() {
        let mut guard = SyncGuard::default();
        guard.arm(ViewRole::Rendered, Instant::now(), DELAY);
        assert_eq!(guard.driver(), Some(ViewRole::Rendered));
        guard.cancel();
        assert_eq!(guard.driver(), None);
        assert_eq!(guard.pending_release(), None);
    }
}
