#![forbid(unsafe_code)]

//! Widgets for the hero confirmation dialog.
//!
//! The entry point is [`HeroConfirmationDialog`]. The pieces it is built
//! from live in [`hero`] and can be driven individually, for example with a
//! custom [`MotionDriver`](hero_core::animation::MotionDriver).

pub mod config;
pub mod hero;

pub use config::{ConfigError, HeroDialogConfig};
pub use hero::{
    ClipShape, DismissOutcome, HeroConfirmationDialog, MorphVisuals, TapResult,
    TransitionController, TransitionPhase, TransitionState, TransitionTrack, TriggerElement,
};
