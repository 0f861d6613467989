#![forbid(unsafe_code)]

//! Core: geometry and animation for the hero confirmation dialog.
//!
//! # Role
//! `hero-core` holds everything the transition needs that is independent of
//! pixels: logical-point geometry ([`geometry::Rect`] and friends) and the
//! animation stack ([`animation::Tween`], [`animation::Spring`], and the
//! per-track [`animation::MotionDriver`]).
//!
//! # How it fits in the system
//! `hero-render` rasterizes in the same logical coordinates, and
//! `hero-widgets` drives its morph and cross-fade tracks through a
//! `MotionDriver`.

pub mod animation;
pub mod geometry;
