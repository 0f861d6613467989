#![forbid(unsafe_code)]

//! Software rendering surface for the hero confirmation dialog.
//!
//! Everything is drawn in logical points onto a [`Pixmap`] that carries its
//! own scale factor. [`Canvas`] provides shapes, gradients, bitmap text,
//! rounded-rectangle clipping, and blurred offscreen layers; [`rasterize`]
//! snapshots a single [`Paint`] implementor into its own pixmap.

pub mod canvas;
pub mod color;
pub mod font;
pub mod pixmap;
pub mod raster;

pub use canvas::{Canvas, RoundedRect};
pub use color::{Gradient, Rgba};
pub use pixmap::Pixmap;
pub use raster::{Paint, rasterize};
