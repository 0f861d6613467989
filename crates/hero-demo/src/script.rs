#![forbid(unsafe_code)]

//! Scripted open / choose / close lifecycle on a fixed-step clock.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use hero_core::animation::MotionDriver;
use hero_render::{Pixmap, Rgba};
use hero_widgets::hero::{TapResult, TransitionPhase, TransitionTrack};
use hero_widgets::HeroConfirmationDialog;
use web_time::Instant;

use crate::error::{DemoError, Result};
use crate::presenter::AnsiPresenter;

/// Host background behind the dialog.
pub const BACKDROP: Rgba = Rgba::rgb(242, 242, 247);

/// How long the sheet stays up before the button is pressed.
const HOLD: Duration = Duration::from_millis(600);
/// Frames shown after the overlay unmounts.
const TAIL_FRAMES: u32 = 15;
/// Simulated time after which a lifecycle is considered stuck.
const TIME_LIMIT: Duration = Duration::from_secs(10);

/// Playback settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayOptions {
    pub frame: Duration,
    pub user_confirmed: bool,
    pub realtime: bool,
}

/// What happened during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub simulated: Duration,
    pub user_confirmed: bool,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "outcome: {} ({} frames, {} ms simulated)",
            if self.user_confirmed { "confirmed" } else { "cancelled" },
            self.frames,
            self.simulated.as_millis()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Idle,
    Opening,
    Holding { until: Duration },
    Closing,
    Tail { remaining: u32 },
}

/// Output sink for frames.
pub struct Output<'a, W: Write> {
    pub presenter: &'a mut AnsiPresenter<W>,
    pub surface: &'a mut Pixmap,
}

/// Run one lifecycle, presenting every frame to `output` when given.
pub fn play<D, W>(
    dialog: &mut HeroConfirmationDialog<D>,
    options: PlayOptions,
    mut output: Option<Output<'_, W>>,
) -> Result<RunSummary>
where
    D: MotionDriver<TransitionTrack>,
    W: Write,
{
    if options.frame.is_zero() {
        return Err(DemoError::invalid("frame duration must be positive"));
    }

    let started = Instant::now();
    let mut now = Duration::ZERO;
    let mut frames = 0u64;
    let mut stage = Stage::Idle;
    let mut outcome = None;
    let trigger = dialog.trigger_frame().center();

    loop {
        stage = match stage {
            Stage::Idle => match dialog.tap(trigger) {
                TapResult::Activated => Stage::Opening,
                other => {
                    return Err(DemoError::exit(
                        1,
                        format!("trigger tap was not accepted: {other:?}"),
                    ));
                }
            },
            Stage::Opening
                if dialog.phase() == TransitionPhase::Expanded && dialog.state().source_hidden() =>
            {
                tracing::info!(message = "demo.sheet_shown", at_ms = now.as_millis() as u64);
                Stage::Holding { until: now + HOLD }
            }
            Stage::Holding { until } if now >= until => {
                let layout = dialog.sheet_layout();
                let button = if options.user_confirmed {
                    layout.confirm
                } else {
                    layout.cancel
                };
                match dialog.tap(button.center()) {
                    TapResult::Dismissed { .. } => Stage::Closing,
                    other => {
                        return Err(DemoError::exit(
                            1,
                            format!("button tap was not accepted: {other:?}"),
                        ));
                    }
                }
            }
            Stage::Tail { remaining: 0 } => break,
            Stage::Tail { remaining } => Stage::Tail {
                remaining: remaining - 1,
            },
            unchanged => unchanged,
        };

        if let Some(result) = dialog.tick(options.frame) {
            outcome = Some(result.user_confirmed);
            stage = Stage::Tail {
                remaining: TAIL_FRAMES,
            };
        }
        now += options.frame;
        frames += 1;

        if let Some(out) = output.as_mut() {
            out.surface.fill(BACKDROP);
            dialog.render(out.surface);
            out.presenter.present(out.surface)?;
        }

        if options.realtime {
            let deadline = options
                .frame
                .saturating_mul(u32::try_from(frames).unwrap_or(u32::MAX));
            let elapsed = started.elapsed();
            if deadline > elapsed {
                std::thread::sleep(deadline - elapsed);
            }
        }

        if now > TIME_LIMIT {
            return Err(DemoError::exit(
                4,
                format!("lifecycle did not finish within {} s", TIME_LIMIT.as_secs()),
            ));
        }
    }

    if let Some(out) = output.as_mut() {
        out.presenter.finish()?;
    }

    let user_confirmed = outcome.ok_or_else(|| DemoError::exit(4, "no outcome reported"))?;
    Ok(RunSummary {
        frames,
        simulated: now,
        user_confirmed,
    })
}
