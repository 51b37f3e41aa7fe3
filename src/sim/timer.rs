//! Cancellable scheduled tasks
//!
//! A `ScheduledTask` is a single timer slot. Arming it again replaces the
//! previous deadline, so there is never more than one outstanding instance
//! per slot. Time is caller-supplied milliseconds.

/// One timer slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Nothing scheduled
    #[default]
    Idle,
    /// Fires at `deadline`
    Armed { deadline: u64 },
    /// Frozen while the session is paused
    Suspended { remaining: u64 },
}

impl ScheduledTask {
    /// Schedule for `now + duration`, cancelling any pending instance
    pub fn arm(&mut self, now: u64, duration: u64) {
        *self = ScheduledTask::Armed {
            deadline: now.saturating_add(duration),
        };
    }

    pub fn cancel(&mut self) {
        *self = ScheduledTask::Idle;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ScheduledTask::Idle)
    }

    pub fn deadline(&self) -> Option<u64> {
        match *self {
            ScheduledTask::Armed { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Whether the task should fire at `now`.
    /// `inclusive` also accepts a deadline equal to `now`.
    pub fn is_due(&self, now: u64, inclusive: bool) -> bool {
        match *self {
            ScheduledTask::Armed { deadline } if inclusive => deadline <= now,
            ScheduledTask::Armed { deadline } => deadline < now,
            _ => false,
        }
    }

    /// Freeze an armed task, keeping the time it had left
    pub fn suspend(&mut self, now: u64) {
        if let ScheduledTask::Armed { deadline } = *self {
            *self = ScheduledTask::Suspended {
                remaining: deadline.saturating_sub(now),
            };
        }
    }

    /// Re-arm a suspended task with its remaining time
    pub fn resume(&mut self, now: u64) {
        if let ScheduledTask::Suspended { remaining } = *self {
            self.arm(now, remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rearm_replaces_deadline() {
        let mut task = ScheduledTask::default();
        task.arm(100, 50);
        task.arm(120, 50);
        assert_eq!(task.deadline(), Some(170));
        assert!(!task.is_due(150, true));
    }

    #[test]
    fn test_due_boundary() {
        let mut task = ScheduledTask::default();
        task.arm(0, 1500);
        assert!(!task.is_due(1500, false));
        assert!(task.is_due(1500, true));
        assert!(task.is_due(1501, false));
    }

    #[test]
    fn test_suspend_resume_keeps_remaining() {
        let mut task = ScheduledTask::default();
        task.arm(1000, 2500);
        task.suspend(2000);
        assert_eq!(task, ScheduledTask::Suspended { remaining: 1500 });
        assert!(!task.is_due(u64::MAX, true));

        // Suspending twice doesn't lose time
        task.suspend(9000);
        task.resume(10_000);
        assert_eq!(task.deadline(), Some(11_500));
    }

    #[test]
    fn test_cancel_and_resume_idle_is_noop() {
        let mut task = ScheduledTask::default();
        task.arm(0, 10);
        task.cancel();
        task.resume(5);
        assert!(task.is_idle());
    }
}
