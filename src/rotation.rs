use crate::scramble::TextFrame;
use crate::scrambler::Scrambler;
use crate::signal::Completion;

#[derive(Debug)]
enum RotationState {
    Idle,
    Scrambling { completion: Completion },
    Waiting { remaining: u64 },
}

/// Repeating word-rotation cycle over one [`Scrambler`].
///
/// Each step transitions the scrambler to the next word in the list, waits
/// `interval` frames after the transition completes, then advances. The index
/// is advanced immediately when a transition is initiated, so mid-flight it
/// already points at the word that will animate next.
///
/// `stop()` cancels the pending delayed continuation only: an in-flight
/// transition runs to completion and renders its target text, then the cycle
/// goes idle. It does not cancel the frame-level animation.
#[derive(Debug)]
pub struct WordRotation {
    scrambler: Scrambler,
    words: Vec<String>,
    interval: u64,
    index: usize,
    state: RotationState,
    stop_requested: bool,
    completed: u64,
}

impl WordRotation {
    /// Create a cycle over `words` with an inter-transition delay of
    /// `interval_frames` frames.
    pub fn new(scrambler: Scrambler, words: Vec<String>, interval_frames: u64) -> Self {
        Self {
            scrambler,
            words,
            interval: interval_frames,
            index: 0,
            state: RotationState::Idle,
            stop_requested: false,
            completed: 0,
        }
    }

    /// Begin cycling. A no-op when the word list is empty.
    pub fn start(&mut self) {
        self.stop_requested = false;
        if self.words.is_empty() {
            return;
        }
        self.begin_transition();
    }

    /// Cancel the pending continuation.
    ///
    /// A transition in flight keeps animating to completion; no further word
    /// follows it. Stopping while waiting cancels the delay immediately.
    pub fn stop(&mut self) {
        match self.state {
            RotationState::Waiting { .. } | RotationState::Idle => {
                self.state = RotationState::Idle;
            }
            RotationState::Scrambling { .. } => {
                self.stop_requested = true;
            }
        }
    }

    /// Advance the cycle by one frame.
    ///
    /// Returns the frame to render when the underlying scramble produced one;
    /// `None` during the inter-transition delay and when idle.
    pub fn tick(&mut self) -> Option<TextFrame> {
        if let RotationState::Waiting { remaining } = &mut self.state {
            if *remaining > 0 {
                *remaining -= 1;
                return None;
            }
            // Delay elapsed: the next transition starts and renders its frame 0
            // on this same tick.
            self.begin_transition();
        }

        let completion = match &self.state {
            RotationState::Idle | RotationState::Waiting { .. } => return None,
            RotationState::Scrambling { completion } => completion.clone(),
        };

        let frame = self.scrambler.tick();
        if completion.is_complete() {
            self.completed += 1;
            self.state = if self.stop_requested {
                self.stop_requested = false;
                RotationState::Idle
            } else {
                RotationState::Waiting {
                    remaining: self.interval,
                }
            };
        }
        frame
    }

    fn begin_transition(&mut self) {
        let word = self.words[self.index].clone();
        // Index moves to the next word as soon as this transition starts.
        self.index = (self.index + 1) % self.words.len();
        tracing::debug!(word = %word, next_index = self.index, "rotation transition started");
        let completion = self.scrambler.set_text(&word);
        self.state = RotationState::Scrambling { completion };
    }

    /// Stored word index; points past the word currently animating.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of transitions completed since construction.
    pub fn transitions_completed(&self) -> u64 {
        self.completed
    }

    /// `true` when neither animating nor waiting.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, RotationState::Idle)
    }

    /// Rendered text of the underlying scrambler.
    pub fn text(&self) -> &str {
        self.scrambler.text()
    }

    pub fn scrambler(&self) -> &Scrambler {
        &self.scrambler
    }
}
