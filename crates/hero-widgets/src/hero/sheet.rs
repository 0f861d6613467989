#![forbid(unsafe_code)]

//! Content of the expanded confirmation sheet.
//!
//! The sheet is laid out top to bottom inside its padding: warning glyph,
//! title, wrapped message, then a row of two capsule buttons pinned to the
//! bottom edge.

use hero_core::geometry::{Point, Rect};
use hero_render::font;
use hero_render::{Canvas, Gradient, Paint, Rgba, RoundedRect};

const ICON_DIAMETER: f64 = 34.0;
const ICON_STROKE: f64 = 3.0;
const TITLE_SIZE: f64 = 24.0;
const MESSAGE_SIZE: f64 = 15.0;
const MESSAGE_LEADING: f64 = 6.0;
const BUTTON_LABEL_SIZE: f64 = 17.0;
const BUTTON_HEIGHT: f64 = 50.0;
/// Vertical gap between stacked content items.
const SPACING: f64 = 8.0;
/// Extra space between the message and the buttons.
const CONTENT_BOTTOM_PADDING: f64 = 10.0;

/// Which sheet button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetAction {
    Cancel,
    Confirm,
}

impl SheetAction {
    /// Outcome reported for this button.
    #[inline]
    pub const fn user_confirmed(self) -> bool {
        matches!(self, Self::Confirm)
    }
}

/// Positions of the sheet's parts for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub icon: Rect,
    pub title: Point,
    pub message: Vec<(Point, String)>,
    pub cancel: Rect,
    pub confirm: Rect,
}

impl SheetLayout {
    /// Button under `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<SheetAction> {
        if RoundedRect::capsule(self.cancel).contains(point) {
            Some(SheetAction::Cancel)
        } else if RoundedRect::capsule(self.confirm).contains(point) {
            Some(SheetAction::Confirm)
        } else {
            None
        }
    }
}

/// The confirmation sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationSheet {
    title: String,
    message: String,
    cancel_label: String,
    confirm_label: String,
    padding: f64,
    button_spacing: f64,
}

impl Default for ConfirmationSheet {
    fn default() -> Self {
        Self {
            title: "Are you sure".into(),
            message: "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam auctor \
                      quam id massa faucibus dignissim. Nullam eget metus id nisl malesuada \
                      condimentum."
                .into(),
            cancel_label: "Cancel".into(),
            confirm_label: "Delete".into(),
            padding: 20.0,
            button_spacing: 8.0,
        }
    }
}

impl ConfirmationSheet {
    /// Set the inner padding and the gap between buttons.
    #[must_use]
    pub fn metrics(mut self, padding: f64, button_spacing: f64) -> Self {
        self.padding = padding;
        self.button_spacing = button_spacing;
        self
    }

    /// Replace the title and message.
    #[must_use]
    pub fn text(mut self, title: impl Into<String>, message: impl Into<String>) -> Self {
        self.title = title.into();
        self.message = message.into();
        self
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    fn message_lines(&self, width: f64) -> Vec<String> {
        let inner = (width - 2.0 * self.padding).max(0.0);
        font::wrap(&self.message, MESSAGE_SIZE, inner)
    }

    fn line_height() -> f64 {
        font::measure("A", MESSAGE_SIZE).1 + MESSAGE_LEADING
    }

    /// Height the sheet needs at `width`.
    #[must_use]
    pub fn intrinsic_height(&self, width: f64) -> f64 {
        let title_height = font::measure(&self.title, TITLE_SIZE).1;
        let lines = self.message_lines(width).len() as f64;
        2.0 * self.padding
            + ICON_DIAMETER
            + SPACING
            + title_height
            + SPACING
            + lines * Self::line_height()
            + CONTENT_BOTTOM_PADDING
            + SPACING
            + BUTTON_HEIGHT
    }

    /// Lay the sheet out inside `frame`.
    #[must_use]
    pub fn layout(&self, frame: Rect) -> SheetLayout {
        let left = frame.x + self.padding;
        let mut y = frame.y + self.padding;

        let icon = Rect::new(left, y, ICON_DIAMETER, ICON_DIAMETER);
        y += ICON_DIAMETER + SPACING;

        let title = Point::new(left, y);
        y += font::measure(&self.title, TITLE_SIZE).1 + SPACING;

        let line_height = Self::line_height();
        let message = self
            .message_lines(frame.width)
            .into_iter()
            .enumerate()
            .map(|(i, line)| (Point::new(left, y + i as f64 * line_height), line))
            .collect();

        let inner_width = (frame.width - 2.0 * self.padding).max(0.0);
        let button_width = ((inner_width - self.button_spacing) / 2.0).max(0.0);
        let button_y = frame.bottom() - self.padding - BUTTON_HEIGHT;
        let cancel = Rect::new(left, button_y, button_width, BUTTON_HEIGHT);
        let confirm = Rect::new(
            left + button_width + self.button_spacing,
            button_y,
            button_width,
            BUTTON_HEIGHT,
        );

        SheetLayout {
            icon,
            title,
            message,
            cancel,
            confirm,
        }
    }
}

impl Paint for ConfirmationSheet {
    fn paint(&self, canvas: &mut Canvas<'_>, bounds: Rect) {
        let layout = self.layout(bounds);
        canvas.fill_rect(bounds, Rgba::WHITE);

        let icon_radius = ICON_DIAMETER / 2.0 - ICON_STROKE / 2.0;
        canvas.stroke_circle(layout.icon.center(), icon_radius, ICON_STROKE, Rgba::RED);
        canvas.fill_text_centered("!", layout.icon, 22.0, Rgba::RED);

        canvas.fill_text(&self.title, layout.title, TITLE_SIZE, Rgba::BLACK);
        for (origin, line) in &layout.message {
            canvas.fill_text(line, *origin, MESSAGE_SIZE, Rgba::GRAY);
        }

        canvas.fill_rounded_rect(
            RoundedRect::capsule(layout.cancel),
            Rgba::GRAY.with_opacity(0.3),
        );
        canvas.fill_text_centered(&self.cancel_label, layout.cancel, BUTTON_LABEL_SIZE, Rgba::BLACK);

        canvas.fill_rounded_gradient(
            RoundedRect::capsule(layout.confirm),
            Gradient::from_color(Rgba::RED),
        );
        canvas.fill_text_centered(
            &self.confirm_label,
            layout.confirm,
            BUTTON_LABEL_SIZE,
            Rgba::WHITE,
        );
    }
}
