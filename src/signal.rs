use std::sync::{Arc, OnceLock};

/// One-shot completion notification for a text transition.
///
/// A `Completion` is the observer half of a [`Signal`]. It reports `true` from
/// [`Completion::is_complete`] once the paired signal has fired, and never
/// before. A transition that is superseded drops its signal without firing, so
/// the handle stays incomplete forever; callers chaining work off a completion
/// simply never see the superseded transition finish.
#[derive(Clone, Debug)]
pub struct Completion {
    fired: Arc<OnceLock<()>>,
}

impl Completion {
    /// Return `true` once the owning transition has finished.
    pub fn is_complete(&self) -> bool {
        self.fired.get().is_some()
    }
}

/// Producer half of a one-shot completion pair.
#[derive(Debug)]
pub(crate) struct Signal {
    fired: Arc<OnceLock<()>>,
}

impl Signal {
    pub(crate) fn new() -> Self {
        Self {
            fired: Arc::new(OnceLock::new()),
        }
    }

    pub(crate) fn completion(&self) -> Completion {
        Completion {
            fired: self.fired.clone(),
        }
    }

    /// Deliver the notification. Exactly-once: repeat fires are no-ops.
    pub(crate) fn fire(&self) {
        let _ = self.fired.set(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once() {
        let signal = Signal::new();
        let completion = signal.completion();
        assert!(!completion.is_complete());
        signal.fire();
        assert!(completion.is_complete());
        signal.fire();
        assert!(completion.is_complete());
    }

    #[test]
    fn dropped_unfired_signal_never_completes() {
        let signal = Signal::new();
        let completion = signal.completion();
        drop(signal);
        assert!(!completion.is_complete());
    }

    #[test]
    fn clones_observe_the_same_fire() {
        let signal = Signal::new();
        let a = signal.completion();
        let b = a.clone();
        signal.fire();
        assert!(a.is_complete());
        assert!(b.is_complete());
    }
}
