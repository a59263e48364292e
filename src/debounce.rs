//! Save debouncing
//!
//! A [`SaveDebouncer`] coalesces bursts of edits into one commit. Each
//! [`kick`](SaveDebouncer::kick) cancels the pending deadline and schedules a
//! new one `delay` later. The UI loop calls [`poll`](SaveDebouncer::poll) and
//! the commit runs on that thread once the deadline passes, so it can never
//! race with other UI mutations. [`flush_now`](SaveDebouncer::flush_now)
//! cancels and commits synchronously.
//!
//! Time comes from a [`Clock`] so tests can drive it by hand.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::error::Result;

/// Default quiet period before a save.
pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(700);

/// Source of monotonic time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    elapsed: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.elapsed.lock()
    }
}

/// The persistence action a debouncer wraps.
pub type CommitFn = Box<dyn FnMut() -> Result<()>>;

pub struct SaveDebouncer {
    delay: Duration,
    clock: Arc<dyn Clock>,
    commit: CommitFn,
    deadline: Option<Instant>,
    commits: u64,
    failures: u64,
}

impl std::fmt::Debug for SaveDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveDebouncer")
            .field("delay", &self.delay)
            .field("deadline", &self.deadline)
            .field("commits", &self.commits)
            .field("failures", &self.failures)
            .finish()
    }
}

impl SaveDebouncer {
    pub fn new(delay: Duration, clock: Arc<dyn Clock>, commit: CommitFn) -> Self {
        Self {
            delay,
            clock,
            commit,
            deadline: None,
            commits: 0,
            failures: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the quiet period.
    pub fn kick(&mut self) {
        self.deadline = Some(self.clock.now() + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Drop the pending deadline without committing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Commit if the deadline has passed. Returns true when a commit ran.
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now() >= deadline => {
                self.deadline = None;
                self.run_commit();
                true
            }
            _ => false,
        }
    }

    /// Cancel any pending deadline and commit right now.
    pub fn flush_now(&mut self) -> Result<()> {
        self.deadline = None;
        self.run_commit_result()
    }

    /// Successful commits so far.
    pub fn commit_count(&self) -> u64 {
        self.commits
    }

    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    fn run_commit(&mut self) {
        if let Err(e) = self.run_commit_result() {
            // Memory state is kept; the next kick or flush retries.
            warn!(error = %e, failures = self.failures, "Debounced save failed");
        }
    }

    fn run_commit_result(&mut self) -> Result<()> {
        match (self.commit)() {
            Ok(()) => {
                self.commits += 1;
                debug!(commits = self.commits, "Debounced save committed");
                Ok(())
            }
            Err(e) => {
                self.failures += 1;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StickyNotesError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn counting(clock: &Arc<ManualClock>) -> (SaveDebouncer, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let debouncer = SaveDebouncer::new(
            DEFAULT_SAVE_DEBOUNCE,
            clock.clone(),
            Box::new(move || {
                c.set(c.get() + 1);
                Ok(())
            }),
        );
        (debouncer, count)
    }

    #[test]
    fn test_burst_of_kicks_commits_once() {
        let clock = Arc::new(ManualClock::new());
        let (mut d, count) = counting(&clock);

        for _ in 0..10 {
            d.kick();
            clock.advance(Duration::from_millis(100));
            assert!(!d.poll());
        }
        assert_eq!(count.get(), 0);

        clock.advance(Duration::from_millis(600));
        assert!(d.poll());
        assert_eq!(count.get(), 1);

        clock.advance(Duration::from_secs(5));
        assert!(!d.poll());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_commit_sees_state_at_last_kick() {
        let clock = Arc::new(ManualClock::new());
        let value = Rc::new(RefCell::new(String::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (v, s) = (value.clone(), seen.clone());
        let mut d = SaveDebouncer::new(
            DEFAULT_SAVE_DEBOUNCE,
            clock.clone(),
            Box::new(move || {
                s.borrow_mut().push(v.borrow().clone());
                Ok(())
            }),
        );

        for text in ["h", "he", "hel", "hello"] {
            *value.borrow_mut() = text.to_string();
            d.kick();
            clock.advance(Duration::from_millis(50));
            d.poll();
        }
        clock.advance(DEFAULT_SAVE_DEBOUNCE);
        d.poll();
        assert_eq!(*seen.borrow(), vec!["hello".to_string()]);
    }

    #[test]
    fn test_deadline_is_exactly_delay_after_last_kick() {
        let clock = Arc::new(ManualClock::new());
        let (mut d, count) = counting(&clock);
        d.kick();
        clock.advance(Duration::from_millis(699));
        assert!(!d.poll());
        clock.advance(Duration::from_millis(1));
        assert!(d.poll());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_flush_now_cancels_pending() {
        let clock = Arc::new(ManualClock::new());
        let (mut d, count) = counting(&clock);
        d.kick();
        d.flush_now().unwrap();
        assert_eq!(count.get(), 1);
        assert!(!d.is_pending());

        clock.advance(Duration::from_secs(1));
        assert!(!d.poll());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_cancel_drops_without_commit() {
        let clock = Arc::new(ManualClock::new());
        let (mut d, count) = counting(&clock);
        d.kick();
        d.cancel();
        clock.advance(Duration::from_secs(1));
        assert!(!d.poll());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_failed_commit_is_counted_and_retried_on_next_kick() {
        let clock = Arc::new(ManualClock::new());
        let fail = Rc::new(Cell::new(true));
        let f = fail.clone();
        let mut d = SaveDebouncer::new(
            DEFAULT_SAVE_DEBOUNCE,
            clock.clone(),
            Box::new(move || {
                if f.get() {
                    Err(StickyNotesError::Config("disk full".into()))
                } else {
                    Ok(())
                }
            }),
        );

        d.kick();
        clock.advance(DEFAULT_SAVE_DEBOUNCE);
        assert!(d.poll());
        assert_eq!((d.commit_count(), d.failure_count()), (0, 1));

        fail.set(false);
        d.kick();
        clock.advance(DEFAULT_SAVE_DEBOUNCE);
        assert!(d.poll());
        assert_eq!((d.commit_count(), d.failure_count()), (1, 1));
    }
}
