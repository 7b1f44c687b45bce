use crate::error::KinetypeResult;
use crate::rng::Rng64;
use crate::scramble::{ScrambleTuning, TextFrame, TransitionSession};
use crate::signal::Completion;

/// Per-element scramble driver.
///
/// A scrambler owns one text surface (the Rust analogue of the DOM element the
/// original effect mutated) and at most one in-flight [`TransitionSession`].
/// The rendered text is exclusively owned by the active session between
/// `set_text` and completion; hosts read it back via [`text`].
///
/// [`text`]: Scrambler::text
#[derive(Debug)]
pub struct Scrambler {
    current: String,
    session: Option<TransitionSession>,
    rng: Rng64,
    tuning: ScrambleTuning,
}

impl Scrambler {
    /// Create a scrambler with empty initial text.
    pub fn new(seed: u64, tuning: ScrambleTuning) -> KinetypeResult<Self> {
        tuning.validate()?;
        Ok(Self {
            current: String::new(),
            session: None,
            rng: Rng64::new(seed),
            tuning,
        })
    }

    /// Create a scrambler whose surface already shows `initial`.
    pub fn with_text(initial: &str, seed: u64, tuning: ScrambleTuning) -> KinetypeResult<Self> {
        let mut s = Self::new(seed, tuning)?;
        s.current = initial.to_owned();
        Ok(s)
    }

    /// Begin a transition from the currently rendered text to `text`.
    ///
    /// Safe to call mid-flight: the old text read here is whatever partially
    /// scrambled content the last tick rendered, which is what keeps chained
    /// transitions visually continuous. Any prior session is superseded and its
    /// completion handle never fires. The new session starts at frame 0 on the
    /// next [`tick`].
    ///
    /// [`tick`]: Scrambler::tick
    #[tracing::instrument(skip(self))]
    pub fn set_text(&mut self, text: &str) -> Completion {
        let (session, completion) =
            TransitionSession::new(&self.current, text, &self.tuning, &mut self.rng);
        self.session = Some(session);
        completion
    }

    /// Overwrite the surface without animating.
    ///
    /// Cancels any in-flight session. This is the degraded path for hosts with
    /// no frame scheduling available.
    pub fn set_immediate(&mut self, text: &str) {
        self.session = None;
        self.current = text.to_owned();
    }

    /// Advance the active session by one frame.
    ///
    /// Returns the frame to render, or `None` when no session is active. The
    /// session is released on the completing tick.
    pub fn tick(&mut self) -> Option<TextFrame> {
        let session = self.session.as_mut()?;
        let tick = session.tick(&mut self.rng, &self.tuning);
        self.current = tick.text.plain();
        if tick.done {
            self.session = None;
        }
        Some(tick.text)
    }

    /// Currently rendered text, scramble glyphs included while mid-flight.
    pub fn text(&self) -> &str {
        &self.current
    }

    /// `true` while a session is in flight.
    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// The in-flight session, when any.
    pub fn session(&self) -> Option<&TransitionSession> {
        self.session.as_ref()
    }

    pub fn tuning(&self) -> &ScrambleTuning {
        &self.tuning
    }
}
