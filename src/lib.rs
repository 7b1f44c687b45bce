//! Kinetype is a frame-driven kinetic text engine.
//!
//! Text transitions are "glyph scrambles": each character position resolves from
//! its old character to its new one through a bounded window of randomized
//! glyphs. The engine is pull-based and host-agnostic:
//!
//! - Build a [`Scrambler`] (or a [`WordRotation`] over one)
//! - Call `set_text` / `start`
//! - Drive `tick()` once per display frame and render the returned [`TextFrame`]
//!
//! All randomness flows through a seeded [`Rng64`], so a given seed replays the
//! exact same animation.
#![forbid(unsafe_code)]

pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod glyphs;
pub mod rng;
pub mod rotation;
pub mod scramble;
pub mod scrambler;
pub mod signal;

pub use clock::{FrameClock, ManualClock, WallClock};
pub use config::{RotationDef, WordsDef};
pub use core::{Fps, FrameIndex};
pub use error::{KinetypeError, KinetypeResult};
pub use glyphs::GlyphSet;
pub use rng::Rng64;
pub use rotation::WordRotation;
pub use scramble::{GlyphKind, ScrambleTuning, TextFrame, TransitionSession};
pub use scrambler::Scrambler;
pub use signal::Completion;
