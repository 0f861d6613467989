#![forbid(unsafe_code)]

//! Half-block ANSI presenter.
//!
//! Each terminal cell shows two vertically stacked pixels: the upper one as
//! the foreground of `▀`, the lower one as the background. Colors are 24-bit
//! SGR sequences and are only re-emitted when they change within a row.
//!
//! # Design Principles
//!
//! - **Single write**: a frame is assembled in memory and flushed once.
//! - **State tracking**: consecutive cells with the same colors reuse the
//!   previous SGR state.

use std::io::{self, BufWriter, Write};

use hero_render::{Pixmap, Rgba};

/// Size of the internal write buffer (64KB).
const BUFFER_CAPACITY: usize = 64 * 1024;

const UPPER_HALF: &str = "\u{2580}";

/// Writes pixmaps to a terminal.
#[derive(Debug)]
pub struct AnsiPresenter<W: Write> {
    out: BufWriter<W>,
    frame: Vec<u8>,
    backdrop: Rgba,
    started: bool,
}

impl<W: Write> AnsiPresenter<W> {
    /// Presenter compositing translucent pixels over `backdrop`.
    pub fn new(writer: W, backdrop: Rgba) -> Self {
        Self {
            out: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            frame: Vec::with_capacity(BUFFER_CAPACITY),
            backdrop,
            started: false,
        }
    }

    /// Draw one frame at the top-left of the screen.
    pub fn present(&mut self, pixmap: &Pixmap) -> io::Result<()> {
        let _span = tracing::trace_span!("present", width = pixmap.width()).entered();
        self.frame.clear();
        if !self.started {
            // Clear screen, hide cursor.
            self.frame.extend_from_slice(b"\x1b[2J\x1b[?25l");
            self.started = true;
        }
        self.frame.extend_from_slice(b"\x1b[H");

        let (width, height) = (pixmap.width(), pixmap.height());
        for y in (0..height).step_by(2) {
            let mut last: Option<(Rgba, Rgba)> = None;
            for x in 0..width {
                let top = self.resolve(pixmap.get(x, y));
                let bottom = self.resolve(pixmap.get(x, y + 1).or(pixmap.get(x, y)));
                if last != Some((top, bottom)) {
                    write!(
                        self.frame,
                        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m",
                        top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                    )?;
                    last = Some((top, bottom));
                }
                self.frame.extend_from_slice(UPPER_HALF.as_bytes());
            }
            self.frame.extend_from_slice(b"\x1b[0m\r\n");
        }

        self.out.write_all(&self.frame)?;
        self.out.flush()
    }

    /// Restore the terminal's cursor and attributes.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.started {
            self.out.write_all(b"\x1b[0m\x1b[?25h")?;
            self.started = false;
        }
        self.out.flush()
    }

    /// Consume the presenter and return the writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }

    fn resolve(&self, pixel: Option<Rgba>) -> Rgba {
        pixel.map_or(self.backdrop, |c| c.over(self.backdrop))
    }
}
