#![forbid(unsafe_code)]

//! Hero-style confirmation transition.
//!
//! Tapping the trigger pill snapshots it, mounts a full-screen overlay, and
//! morphs the snapshot into a bottom-anchored sheet. Dismissing the sheet
//! plays the morph in reverse and reports which button was pressed.

pub mod controller;
pub mod dialog;
pub mod morph;
pub mod sheet;
pub mod state;
pub mod trigger;

pub use controller::{
    DismissOutcome, TransitionController, TransitionPhase, TransitionTiming, TransitionTrack,
};
pub use dialog::{HeroConfirmationDialog, TapResult};
pub use morph::{ClipShape, MorphInputs, MorphVisuals, expanded_frame};
pub use sheet::{ConfirmationSheet, SheetAction, SheetLayout};
pub use state::{TransitionGeometry, TransitionSnapshot, TransitionState};
pub use trigger::TriggerElement;
