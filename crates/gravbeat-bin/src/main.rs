// gravbeat: headless driver for the gravity-flip rhythm game core.
//
// Runs one session on a manual clock at the configured tick rate, fed by
// autoplay or a scripted key log, and prints the result as JSON.

mod driver;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gravbeat_audio::CueDispatcher;
use gravbeat_config::{GameConfig, PATTERN_SONG_ID, SessionConfig, SongCatalog};
use gravbeat_play::{PlaySession, Track};
use gravbeat_timeline::load_csv;
use gravbeat_types::{Difficulty, ManualClock, PlayMode};
use log::{info, warn};

use driver::{InputSource, LogCuePlayer, run_headless};

#[derive(Parser, Debug)]
#[command(name = "gravbeat", about = "Gravity-flip rhythm game, headless runner")]
struct Args {
    /// Path to the game config JSON file.
    #[arg(long, default_value = "gravbeat.json")]
    config: PathBuf,

    /// Path to the song catalog JSON file.
    #[arg(long, default_value = "songs.json")]
    songs: PathBuf,

    /// Song id from the catalog, or "pattern" for generated play.
    #[arg(long, default_value = PATTERN_SONG_ID)]
    song: String,

    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,

    #[arg(long, default_value = "normal")]
    mode: PlayMode,

    /// Seed for shuffles, pattern draws and flip timing.
    #[arg(long, env = "GRAVBEAT_SEED")]
    seed: Option<u64>,

    /// Quit the session after this many seconds of play time.
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f64,

    /// Key log to replay as presses instead of autoplay.
    #[arg(long)]
    inputs: Option<PathBuf>,

    /// Log every session event.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    info!("gravbeat starting");

    let game = GameConfig::read_or_default(&args.config)?;

    let catalog = if args.songs.exists() {
        let catalog = SongCatalog::load(&args.songs)?;
        info!("Loaded {} songs from {}", catalog.len(), args.songs.display());
        catalog
    } else {
        if args.song != PATTERN_SONG_ID {
            warn!("Song catalog {} not found", args.songs.display());
        }
        SongCatalog::default()
    };

    let mut session_config = SessionConfig::new(args.song.clone(), args.difficulty, args.mode);
    if let Some(seed) = args.seed {
        session_config = session_config.with_seed(seed);
    }

    let input = match &args.inputs {
        Some(path) => InputSource::Scripted(
            load_csv(path).with_context(|| format!("failed to load inputs {}", path.display()))?,
        ),
        None => InputSource::Autoplay,
    };

    let track = Track::resolve(&session_config, &catalog);
    let cues = CueDispatcher::spawn(Box::new(LogCuePlayer))?;
    let mut session = PlaySession::new(
        game,
        session_config,
        track,
        ManualClock::new(),
        Box::new(cues),
    )?;

    let result = run_headless(&mut session, input, args.max_seconds)?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
