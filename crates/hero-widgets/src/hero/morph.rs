#![forbid(unsafe_code)]

//! Pure mapping from animation progress to overlay visuals.
//!
//! `morph` is the morph track (0 = collapsed onto the trigger, 1 = expanded
//! sheet) and `cross_fade` the snapshot hand-off track. Geometry follows the
//! raw morph value so a bouncy spring may overshoot; opacities and blur
//! radii are clamped.

use hero_core::geometry::{Rect, Size, lerp};
use hero_render::RoundedRect;

use crate::config::HeroDialogConfig;

/// Clip applied to the stand-in and the sheet content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipShape {
    RoundedRectangle { radius: f64 },
}

impl ClipShape {
    #[inline]
    pub fn radius(&self) -> f64 {
        match *self {
            Self::RoundedRectangle { radius } => radius,
        }
    }

    /// The shape placed over `frame`.
    #[inline]
    pub fn place(&self, frame: Rect) -> RoundedRect {
        match *self {
            Self::RoundedRectangle { radius } => RoundedRect::new(frame, radius),
        }
    }
}

/// Everything the morph depends on for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphInputs {
    pub morph: f64,
    pub cross_fade: f64,
    pub source: Rect,
    pub container: Size,
    pub sheet_height: f64,
}

/// Resolved overlay visuals for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphVisuals {
    pub frame: Rect,
    pub clip: ClipShape,
    pub scrim_opacity: f32,
    pub content_opacity: f32,
    pub content_blur: f64,
    pub stand_in_opacity: f32,
    pub stand_in_blur: f64,
}

impl MorphVisuals {
    /// Visuals at rest on the trigger.
    #[must_use]
    pub fn collapsed(source: Rect, config: &HeroDialogConfig) -> Self {
        Self {
            frame: source,
            clip: ClipShape::RoundedRectangle {
                radius: config.radii.source,
            },
            scrim_opacity: 0.0,
            content_opacity: 0.0,
            content_blur: config.effects.max_blur,
            stand_in_opacity: 1.0,
            stand_in_blur: 0.0,
        }
    }

    #[must_use]
    pub fn compute(inputs: &MorphInputs, config: &HeroDialogConfig) -> Self {
        let p = inputs.morph;
        let pc = clamp_unit(p);
        let qc = clamp_unit(inputs.cross_fade);
        let expanded = expanded_frame(inputs.container, inputs.sheet_height, config);
        let radius = lerp(config.radii.source, config.radii.destination, p).max(0.0);
        let max_blur = config.effects.max_blur;

        Self {
            frame: inputs.source.lerp(&expanded, p),
            clip: ClipShape::RoundedRectangle { radius },
            scrim_opacity: (config.effects.scrim_opacity * pc) as f32,
            content_opacity: pc as f32,
            content_blur: max_blur * (1.0 - pc),
            stand_in_opacity: (1.0 - qc) as f32,
            stand_in_blur: max_blur * qc,
        }
    }
}

/// Frame of the fully expanded sheet: inset horizontally and anchored
/// `bottom_offset` above the container's bottom edge.
#[must_use]
pub fn expanded_frame(container: Size, sheet_height: f64, config: &HeroDialogConfig) -> Rect {
    let inset = config.layout.sheet_inset;
    let width = (container.width - 2.0 * inset).max(0.0);
    let height = sheet_height.max(0.0);
    Rect::new(
        inset,
        container.height - config.layout.bottom_offset - height,
        width,
        height,
    )
}

#[inline]
fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}
