use smallvec::SmallVec;

use crate::core::FrameIndex;
use crate::error::{KinetypeError, KinetypeResult};
use crate::glyphs::GlyphSet;
use crate::rng::Rng64;
use crate::signal::{Completion, Signal};

/// Pacing knobs for a scramble transition.
///
/// Defaults reproduce the reference pacing: with both windows at 40 every
/// position starts resolving within the first 40 frames and freezes before
/// frame 80, which reads as roughly 1-2 seconds at common display rates.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScrambleTuning {
    /// Per-task resolve start is drawn uniformly from `[0, start_max)`.
    pub start_max: u64,
    /// Per-task freeze frame is `start` plus a uniform draw from `[0, spread_max)`.
    pub spread_max: u64,
    /// Probability that a resolving position re-rolls its glyph on a given frame.
    pub churn: f64,
    /// Alphabet shown while a position is resolving.
    pub glyphs: GlyphSet,
}

impl Default for ScrambleTuning {
    fn default() -> Self {
        Self {
            start_max: 40,
            spread_max: 40,
            churn: 0.28,
            glyphs: GlyphSet::default(),
        }
    }
}

impl ScrambleTuning {
    pub fn validate(&self) -> KinetypeResult<()> {
        if self.start_max == 0 {
            return Err(KinetypeError::validation(
                "ScrambleTuning start_max must be > 0",
            ));
        }
        if self.spread_max == 0 {
            return Err(KinetypeError::validation(
                "ScrambleTuning spread_max must be > 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.churn) {
            return Err(KinetypeError::validation(
                "ScrambleTuning churn must be within [0, 1]",
            ));
        }
        if self.glyphs.is_empty() {
            return Err(KinetypeError::validation(
                "ScrambleTuning glyphs must not be empty",
            ));
        }
        Ok(())
    }
}

/// Per-task resolution state, driven by the session frame counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskPhase {
    /// Still showing the source character (`frame < start`).
    Pending,
    /// Showing randomized glyphs (`start <= frame < end`).
    Resolving,
    /// Settled on the target character (`frame >= end`).
    Frozen,
}

/// State for one character position within a transition.
///
/// `None` on `from`/`to` models the empty character: the position had no
/// predecessor (new text is longer) or resolves to nothing (new text is
/// shorter).
#[derive(Clone, Copy, Debug)]
pub struct ScrambleTask {
    pub from: Option<char>,
    pub to: Option<char>,
    /// Frame at which randomized resolution begins.
    pub start: u64,
    /// Frame at which the position freezes to `to`.
    pub end: u64,
    /// Glyph currently shown while resolving, re-rolled stochastically.
    pub glyph: Option<char>,
    pub phase: TaskPhase,
}

/// Whether an emitted glyph is settled text or in-flight scramble noise.
///
/// Renderers use this to style scramble glyphs distinctly (the CLI dims them).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphKind {
    Settled,
    Scrambling,
}

/// One emitted glyph of a rendered frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextGlyph {
    pub ch: char,
    pub kind: GlyphKind,
}

/// The rendered text content of one animation frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextFrame {
    glyphs: SmallVec<[TextGlyph; 32]>,
}

/// A run of consecutive glyphs sharing one [`GlyphKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub kind: GlyphKind,
    pub text: String,
}

impl TextFrame {
    fn with_capacity(cap: usize) -> Self {
        Self {
            glyphs: SmallVec::with_capacity(cap),
        }
    }

    fn push(&mut self, ch: char, kind: GlyphKind) {
        self.glyphs.push(TextGlyph { ch, kind });
    }

    /// Emitted glyphs in position order.
    ///
    /// Positions whose task emits the empty character produce no glyph, so this
    /// can be shorter than the session task count.
    pub fn glyphs(&self) -> &[TextGlyph] {
        &self.glyphs
    }

    /// Plain concatenated text, scramble glyphs included.
    pub fn plain(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }

    /// Glyphs merged into kind-homogeneous runs, for styled rendering.
    pub fn spans(&self) -> Vec<TextSpan> {
        let mut spans = Vec::<TextSpan>::new();
        for g in &self.glyphs {
            match spans.last_mut() {
                Some(span) if span.kind == g.kind => span.text.push(g.ch),
                _ => spans.push(TextSpan {
                    kind: g.kind,
                    text: g.ch.to_string(),
                }),
            }
        }
        spans
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl std::fmt::Display for TextFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for g in &self.glyphs {
            write!(f, "{}", g.ch)?;
        }
        Ok(())
    }
}

/// Result of advancing a session by one frame.
#[derive(Clone, Debug)]
pub struct SessionTick {
    /// Content to render for this frame.
    pub text: TextFrame,
    /// `true` on the tick where every task froze; the completion has fired.
    pub done: bool,
}

/// One character-by-character text transition.
///
/// A session owns an ordered task per character position and a monotonically
/// increasing frame counter starting at 0. It is advanced by [`tick`], which
/// does O(task count) work per frame, and fires its completion signal exactly
/// once, on the tick where every task has frozen. Dropping a session before
/// that tick (supersession) discards the signal unfired.
///
/// [`tick`]: TransitionSession::tick
#[derive(Debug)]
pub struct TransitionSession {
    tasks: Vec<ScrambleTask>,
    frame: u64,
    signal: Signal,
    done: bool,
}

impl TransitionSession {
    /// Build a session transitioning `from` into `to`.
    ///
    /// Task count is `max(from.chars, to.chars)`; per-task windows are drawn
    /// independently from `tuning` using `rng`.
    pub fn new(
        from: &str,
        to: &str,
        tuning: &ScrambleTuning,
        rng: &mut Rng64,
    ) -> (Self, Completion) {
        let from: Vec<char> = from.chars().collect();
        let to: Vec<char> = to.chars().collect();
        let len = from.len().max(to.len());

        let mut tasks = Vec::with_capacity(len);
        for i in 0..len {
            let start = rng.next_below(tuning.start_max);
            let end = start + rng.next_below(tuning.spread_max);
            tasks.push(ScrambleTask {
                from: from.get(i).copied(),
                to: to.get(i).copied(),
                start,
                end,
                glyph: None,
                phase: TaskPhase::Pending,
            });
        }

        let signal = Signal::new();
        let completion = signal.completion();
        tracing::debug!(tasks = tasks.len(), "transition session created");

        (
            Self {
                tasks,
                frame: 0,
                signal,
                done: false,
            },
            completion,
        )
    }

    /// Advance by one frame and emit the content to render.
    ///
    /// Ticking a finished session keeps emitting the settled target text.
    pub fn tick(&mut self, rng: &mut Rng64, tuning: &ScrambleTuning) -> SessionTick {
        let frame = self.frame;
        let mut text = TextFrame::with_capacity(self.tasks.len());
        let mut frozen = 0usize;

        for task in &mut self.tasks {
            if frame >= task.end {
                task.phase = TaskPhase::Frozen;
                frozen += 1;
                if let Some(ch) = task.to {
                    text.push(ch, GlyphKind::Settled);
                }
            } else if frame >= task.start {
                task.phase = TaskPhase::Resolving;
                if task.glyph.is_none() || rng.next_f64_01() < tuning.churn {
                    task.glyph = Some(tuning.glyphs.pick(rng));
                }
                if let Some(ch) = task.glyph {
                    text.push(ch, GlyphKind::Scrambling);
                }
            } else if let Some(ch) = task.from {
                text.push(ch, GlyphKind::Settled);
            }
        }

        let done = frozen == self.tasks.len();
        if done {
            if !self.done {
                self.done = true;
                self.signal.fire();
                tracing::debug!(frame, "transition session completed");
            }
        } else {
            self.frame += 1;
        }

        SessionTick { text, done }
    }

    /// Current frame counter.
    pub fn frame(&self) -> FrameIndex {
        FrameIndex(self.frame)
    }

    /// Per-position task state, in position order.
    pub fn tasks(&self) -> &[ScrambleTask] {
        &self.tasks
    }

    /// `true` once every task has frozen and the completion has fired.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
