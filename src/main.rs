// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use subplayer::app_config::{self, Config};
use subplayer::errors::AppError;
use subplayer::app_controller::{spawn_simulated_clock, Controller};
use subplayer::controls::format_clock;
use subplayer::file_utils::FileManager;
use subplayer::media::SimulatedMedia;
use subplayer::offset::{OffsetController, OffsetStep};
use subplayer::session::PlayerEvent;
use subplayer::subtitle_processor::CaptionSequence;
use subplayer::sync;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a subtitle file and print the captions that survived
    Inspect {
        /// Subtitle file to parse
        #[arg(value_name = "SUBTITLE_PATH")]
        subtitle_path: PathBuf,
    },

    /// Print the caption shown at a given playback time
    At {
        /// Subtitle file to parse
        #[arg(value_name = "SUBTITLE_PATH")]
        subtitle_path: PathBuf,

        /// Playback time in seconds
        #[arg(short, long)]
        time: f64,

        /// Subtitle offset in seconds
        #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
        offset: f64,

        /// Offset button to press after --offset, e.g. "+0.5s" (repeatable)
        #[arg(long = "step", value_name = "STEP", allow_hyphen_values = true)]
        steps: Vec<OffsetStep>,
    },

    /// Play subtitles against a simulated media clock
    Play(PlayArgs),

    /// Generate shell completions for subplayer
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Subtitle file to play
    #[arg(value_name = "SUBTITLE_PATH")]
    subtitle_path: PathBuf,

    /// Video file shown as the playing title
    #[arg(short, long)]
    video: Option<PathBuf>,

    /// Media duration in seconds; defaults to one second past the last caption
    #[arg(short, long)]
    duration: Option<f64>,

    /// Subtitle offset in seconds
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset: f64,

    /// Offset button to press after --offset, e.g. "-1s" (repeatable)
    #[arg(long = "step", value_name = "STEP", allow_hyphen_values = true)]
    steps: Vec<OffsetStep>,

    /// Playback speed relative to wall time
    #[arg(short, long, default_value_t = 1.0)]
    speed: f64,
}

/// subplayer - play captions from an SRT file over a video
#[derive(Parser, Debug)]
#[command(name = "subplayer")]
#[command(version)]
#[command(about = "Subtitle overlay player core")]
#[command(long_about = "subplayer parses SRT subtitles and keeps them in sync with a media clock.

EXAMPLES:
    subplayer inspect movie.srt                    # List parsed captions
    subplayer at movie.srt --time 95.5             # Caption at 1:35.5
    subplayer at movie.srt -t 95.5 -o -1.5         # Same, with subtitles 1.5s earlier
    subplayer at movie.srt -t 95.5 --step -0.5s     # Same as pressing the -0.5s button
    subplayer play movie.srt --speed 10            # Simulated playback at 10x
    subplayer completions bash > subplayer.bash    # Generate bash completions

CONFIGURATION:
    Configuration is stored in subplayer.json by default. You can specify a
    different file with --config-path. If the file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "subplayer.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let _ = writeln!(
                std::io::stderr(),
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the real level is applied once config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subplayer", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;

    match cli.command {
        Commands::Inspect { subtitle_path } => run_inspect(subtitle_path),
        Commands::At { subtitle_path, time, offset, steps } => run_at(subtitle_path, time, offset, &steps),
        Commands::Play(args) => run_play(args, config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

// @loads: Configuration with the CLI log level taking precedence
fn load_config(config_path: &str, cli_log_level: Option<CliLogLevel>) -> Result<Config, AppError> {
    let mut config = Config::load_validated(config_path)?;

    if let Some(log_level) = cli_log_level {
        config.log_level = log_level.into();
    }

    log::set_max_level(config.log_level.to_level_filter());
    debug!("Loaded configuration from {}", config_path);

    Ok(config)
}

fn run_inspect(subtitle_path: PathBuf) -> Result<()> {
    let captions = CaptionSequence::load(&subtitle_path)?;
    info!("{}: {} captions", FileManager::display_name(&subtitle_path), captions.len());

    print!("{}", captions);
    Ok(())
}

fn run_at(subtitle_path: PathBuf, time: f64, offset: f64, steps: &[OffsetStep]) -> Result<()> {
    let captions = CaptionSequence::load(&subtitle_path)?;

    let mut controller = OffsetController::new();
    controller.adjust_by(offset);
    for step in steps {
        controller.apply(*step);
    }
    let offset = controller.value();

    match sync::active_caption(&captions, time, offset) {
        Some(entry) => println!("{}", entry.text),
        None => info!("No caption at {} with offset {:.1}s", format_clock(time), offset),
    }
    Ok(())
}

async fn run_play(args: PlayArgs, config: Config) -> Result<()> {
    if !args.speed.is_finite() || args.speed <= 0.0 {
        return Err(anyhow!("Speed must be a positive number, got {}", args.speed));
    }

    let captions = CaptionSequence::load(&args.subtitle_path)?;
    let duration = args.duration.unwrap_or_else(|| {
        captions.iter().map(|entry| entry.end_time).fold(0.0, f64::max) + 1.0
    });

    let media = SimulatedMedia::new(duration);
    let mut controller = Controller::with_config(config.clone())?;
    controller.attach_simulated(&media);
    let handle = controller.spawn();

    if let Some(video) = args.video {
        handle.send(PlayerEvent::VideoSelected(video)).await?;
    }
    handle.send(PlayerEvent::SubtitleSelected(args.subtitle_path.clone())).await?;
    if args.offset != 0.0 {
        handle.send(PlayerEvent::AdjustOffset(args.offset)).await?;
    }
    for step in &args.steps {
        handle.send(PlayerEvent::ApplyOffsetStep(*step)).await?;
    }
    handle.send(PlayerEvent::TogglePlay).await?;

    let clock = spawn_simulated_clock(
        media.clone(),
        handle.sender(),
        config.player.time_update_interval(),
        args.speed,
    );

    let progress_bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style);

    let mut frames = handle.frames();
    let mut last_caption: Option<String> = None;

    while frames.changed().await.is_ok() {
        let frame = frames.borrow_and_update().clone();

        progress_bar.set_position(frame.state.progress.round().clamp(0.0, 100.0) as u64);
        progress_bar.set_message(frame.clock_label.clone());

        if frame.caption_text != last_caption {
            if let Some(text) = &frame.caption_text {
                progress_bar.println(format!("[{}] {}", format_clock(frame.state.current_time), text));
            }
            last_caption = frame.caption_text;
        }

        if media.is_finished() && frame.state.paused {
            break;
        }
    }

    clock.abort();
    progress_bar.finish_with_message("done");

    let controller = handle.shutdown().await?;
    if controller.session().captions().is_empty() {
        warn!("No captions were shown");
    }
    info!("Finished playing {}", FileManager::display_name(&args.subtitle_path));

    Ok(())
}
