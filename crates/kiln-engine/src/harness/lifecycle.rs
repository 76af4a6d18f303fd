/// Harness phase. Transitions are linear and never go backwards.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Initializing,
    Running,
    Closing,
    Terminated,
}

/// Phase tracking plus the window close flag.
///
/// The close flag is only acted on at the top of an iteration, so a request
/// made mid-frame lets that frame finish.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    close_requested: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Initializing,
            close_requested: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Initialization finished; the frame loop may run.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Initializing {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    /// Sets the close flag.
    pub fn request_close(&mut self) {
        if self.phase != Phase::Terminated {
            self.close_requested = true;
        }
    }

    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Sets the close flag and leaves `Running`. Returns `true` if this call
    /// moved the phase to `Closing`.
    pub fn close(&mut self) -> bool {
        self.request_close();
        if self.phase != Phase::Running {
            return false;
        }
        self.phase = Phase::Closing;
        true
    }

    /// Top-of-iteration check. Returns `false` (and moves to `Closing`) once
    /// the close flag is set.
    pub fn begin_iteration(&mut self) -> bool {
        match self.phase {
            Phase::Running if self.close_requested => {
                self.close();
                false
            }
            Phase::Running => true,
            _ => false,
        }
    }

    /// Moves to `Terminated`. Returns `true` only on the first call, which is
    /// the one that must run teardown.
    pub fn terminate(&mut self) -> bool {
        if self.phase == Phase::Terminated {
            return false;
        }
        self.phase = Phase::Terminated;
        true
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_progression() {
        let mut lc = Lifecycle::new();
        assert_eq!(lc.phase(), Phase::Initializing);
        assert!(!lc.begin_iteration());

        assert!(lc.start());
        assert_eq!(lc.phase(), Phase::Running);
        assert!(lc.begin_iteration());

        lc.request_close();
        assert!(!lc.begin_iteration());
        assert_eq!(lc.phase(), Phase::Closing);

        assert!(lc.terminate());
        assert_eq!(lc.phase(), Phase::Terminated);
    }

    #[test]
    fn close_moves_running_to_closing_once() {
        let mut lc = Lifecycle::new();
        lc.start();
        assert!(lc.close());
        assert_eq!(lc.phase(), Phase::Closing);
        assert!(lc.should_close());
        assert!(!lc.close());
        assert!(lc.terminate());
        assert_eq!(lc.phase(), Phase::Terminated);
    }

    #[test]
    fn close_before_start_stays_initializing() {
        let mut lc = Lifecycle::new();
        assert!(!lc.close());
        assert_eq!(lc.phase(), Phase::Initializing);
        assert!(lc.terminate());
    }

    #[test]
    fn start_only_once() {
        let mut lc = Lifecycle::new();
        assert!(lc.start());
        assert!(!lc.start());
    }

    #[test]
    fn close_request_does_not_interrupt_current_iteration() {
        let mut lc = Lifecycle::new();
        lc.start();
        assert!(lc.begin_iteration());
        lc.request_close();
        assert_eq!(lc.phase(), Phase::Running);
        assert!(!lc.begin_iteration());
    }

    #[test]
    fn terminate_runs_once() {
        let mut lc = Lifecycle::new();
        assert!(lc.terminate());
        assert!(!lc.terminate());
        lc.request_close();
        assert!(!lc.should_close());
    }

    #[test]
    fn closing_never_returns_to_running() {
        let mut lc = Lifecycle::new();
        lc.start();
        lc.request_close();
        lc.begin_iteration();
        assert!(!lc.start());
        assert!(!lc.begin_iteration());
        assert_eq!(lc.phase(), Phase::Closing);
    }
}
