#![forbid(unsafe_code)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use hero_core::geometry::Size;
use hero_render::Pixmap;
use hero_widgets::{HeroConfirmationDialog, HeroDialogConfig};

use crate::error::{DemoError, Result};
use crate::logging;
use crate::presenter::AnsiPresenter;
use crate::script::{self, BACKDROP, Output, PlayOptions, RunSummary};

/// Button pressed once the sheet is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Choice {
    /// Press "Delete".
    Confirm,
    /// Press "Cancel".
    Cancel,
}

impl Choice {
    #[must_use]
    pub const fn user_confirmed(self) -> bool {
        matches!(self, Self::Confirm)
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "hero-demo",
    about = "Play the hero confirmation dialog transition in the terminal",
    version
)]
pub struct Cli {
    /// Container width in points.
    #[arg(long, default_value_t = 390.0)]
    pub width: f64,

    /// Container height in points.
    #[arg(long, default_value_t = 844.0)]
    pub height: f64,

    /// Pixels per point for the terminal surface.
    #[arg(long, default_value_t = 0.15)]
    pub scale: f64,

    /// Simulated frames per second.
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    #[arg(long, value_enum, default_value_t = Choice::Confirm)]
    pub choice: Choice,

    /// Skip drawing; only report the outcome.
    #[arg(long)]
    pub headless: bool,

    /// Pace frames against the wall clock.
    #[arg(long)]
    pub realtime: bool,

    /// TOML file overriding the dialog configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long = "log-json")]
    pub log_json: bool,
}

pub fn run_from_env() -> Result<RunSummary> {
    let cli = Cli::parse();
    logging::init(cli.log_json)?;
    run(cli)
}

pub fn run(cli: Cli) -> Result<RunSummary> {
    if cli.fps == 0 {
        return Err(DemoError::invalid("--fps must be at least 1"));
    }
    if !(cli.scale.is_finite() && cli.scale > 0.0) {
        return Err(DemoError::invalid(format!(
            "--scale must be positive, got {}",
            cli.scale
        )));
    }
    if !(cli.width.is_finite() && cli.height.is_finite() && cli.width > 0.0 && cli.height > 0.0) {
        return Err(DemoError::invalid(format!(
            "container must have a positive size, got {}x{}",
            cli.width, cli.height
        )));
    }

    let config = match &cli.config {
        Some(path) => HeroDialogConfig::from_toml_file(path)?,
        None => HeroDialogConfig::default(),
    };
    let container = Size::new(cli.width, cli.height);
    tracing::info!(
        message = "demo.start",
        width = cli.width,
        height = cli.height,
        fps = cli.fps,
        choice = ?cli.choice,
        headless = cli.headless
    );

    let mut dialog = HeroConfirmationDialog::with_config(config).scale(cli.scale);
    dialog.layout(container);

    let options = PlayOptions {
        frame: Duration::from_secs(1) / cli.fps,
        user_confirmed: cli.choice.user_confirmed(),
        realtime: cli.realtime,
    };

    let summary = if cli.headless {
        script::play::<_, io::Stdout>(&mut dialog, options, None)?
    } else {
        let mut surface = Pixmap::for_size(container, cli.scale)
            .ok_or_else(|| DemoError::invalid("surface size is out of range"))?;
        let mut presenter = AnsiPresenter::new(io::stdout(), BACKDROP);
        script::play(
            &mut dialog,
            options,
            Some(Output {
                presenter: &mut presenter,
                surface: &mut surface,
            }),
        )?
    };

    tracing::info!(
        message = "demo.done",
        frames = summary.frames,
        user_confirmed = summary.user_confirmed
    );
    Ok(summary)
}
