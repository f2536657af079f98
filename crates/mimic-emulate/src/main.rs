//! `mimic`: emulate one keyboard or mouse gesture, or read the screen.
//!
//! # Usage
//!
//! ```bash
//! mimic push Enter
//! mimic click double
//! mimic move -40 15 --relative
//! mimic pixel 100 200
//! mimic capture shot.png --region 0,0,640,480
//! ```
//!
//! Every emulated gesture waits out the configured interval before the
//! process exits. `--interval-ms` overrides the value from the config file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use mimic_core::{KeyCode, Point, Rect};
use mimic_emulate::application::{Display, InputDispatcher, Keyboard, Mouse, ScreenReader};
use mimic_emulate::infrastructure::storage::config::{load_config, load_config_from, MimicConfig};

#[derive(Parser)]
#[command(name = "mimic")]
#[command(version)]
#[command(about = "Emulate keyboard and mouse input and read screen pixels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Delay after each emulated gesture, in milliseconds (minimum 100)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Press and release a key, e.g. `A`, `Enter`, `F5`, `LWin`
    Push {
        key: KeyCode,
    },

    /// Click a mouse button at the current pointer position
    Click {
        #[arg(value_enum, default_value = "left")]
        button: ClickKind,
    },

    /// Move the pointer to X,Y (or by X,Y with --relative)
    Move {
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(long)]
        relative: bool,
    },

    /// Print the colour of the pixel at X,Y
    Pixel { x: i32, y: i32 },

    /// Save a PNG of the screen, or of a region given as x,y,w,h
    Capture {
        out: PathBuf,
        #[arg(long, value_parser = parse_region)]
        region: Option<Rect>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClickKind {
    Left,
    Right,
    Middle,
    Double,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .context("loading configuration")?;
    if let Some(interval_ms) = cli.interval_ms {
        config.emulator.interval_ms = interval_ms;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let (dispatcher, screen) = native_backends()?;
    run(cli.command, &config, dispatcher, screen).await
}

async fn run(
    command: Commands,
    config: &MimicConfig,
    dispatcher: Arc<dyn InputDispatcher>,
    screen: Arc<dyn ScreenReader>,
) -> anyhow::Result<()> {
    match command {
        Commands::Push { key } => {
            let keyboard = Keyboard::with_emulator(dispatcher, config.emulator()?);
            keyboard.push(key).await?;
            info!(%key, "key pushed");
        }
        Commands::Click { button } => {
            let mouse = Mouse::with_emulator(dispatcher, config.emulator()?);
            mouse.sync_position();
            match button {
                ClickKind::Left => mouse.left_click().await?,
                ClickKind::Right => mouse.right_click().await?,
                ClickKind::Middle => mouse.middle_click().await?,
                ClickKind::Double => mouse.left_double_click().await?,
            }
            info!(position = %mouse.position(), "clicked");
        }
        Commands::Move { x, y, relative } => {
            let mouse = Mouse::with_emulator(dispatcher, config.emulator()?);
            if relative {
                mouse.sync_position();
                mouse.move_by(x, y).await?;
            } else {
                mouse.set_position(Point::new(x, y)).await?;
            }
            info!(position = %mouse.position(), "pointer moved");
        }
        Commands::Pixel { x, y } => {
            let display = Display::new(screen)?;
            let color = display.get_color(x, y)?;
            println!("{}", color.to_hex());
        }
        Commands::Capture { out, region } => {
            let display = Display::new(screen)?;
            let bitmap = match region {
                Some(region) => display.get_bitmap_region(region)?,
                None => display.get_bitmap()?,
            };
            bitmap
                .save(&out)
                .with_context(|| format!("writing {}", out.display()))?;
            info!(path = %out.display(), width = bitmap.width(), height = bitmap.height(), "capture saved");
        }
    }
    Ok(())
}

fn parse_region(s: &str) -> Result<Rect, String> {
    let parts: Vec<i32> = s
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid region {s:?}: {e}"))?;
    match parts.as_slice() {
        &[x, y, width, height] => Ok(Rect::new(x, y, width, height)),
        _ => Err(format!("region must be x,y,w,h, got {s:?}")),
    }
}

#[cfg(target_os = "windows")]
fn native_backends() -> anyhow::Result<(Arc<dyn InputDispatcher>, Arc<dyn ScreenReader>)> {
    use mimic_emulate::infrastructure::dispatch::windows::WindowsInputDispatcher;
    use mimic_emulate::infrastructure::display::windows::GdiScreenReader;

    Ok((
        Arc::new(WindowsInputDispatcher::new()),
        Arc::new(GdiScreenReader::new()),
    ))
}

#[cfg(not(target_os = "windows"))]
fn native_backends() -> anyhow::Result<(Arc<dyn InputDispatcher>, Arc<dyn ScreenReader>)> {
    anyhow::bail!("mimic injects input through Windows APIs and cannot run on this platform")
}
