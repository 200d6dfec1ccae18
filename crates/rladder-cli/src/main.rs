// rladder game-master console

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rladder_cli::config::Config;
use rladder_cli::console::Console;
use rladder_core::{DirStore, GameSession, MemoryStore, StateStore};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file (default: ./rladder.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for saved teams and star tiles (overrides the config file)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// RNG seed for star tiles and team colors (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Keep state in memory only
    #[arg(long)]
    memory: bool,

    /// Do not ask before `remove` and `reset`
    #[arg(short, long)]
    yes: bool,
}

fn main() {
    let args = Args::parse();

    use std::io::Write;
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::discover(args.config.as_deref())?;
    if args.state_dir.is_some() {
        config.state_dir = args.state_dir;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let topology = config.topology().context("invalid [board] section")?;

    let store: Box<dyn StateStore> = if args.memory {
        Box::new(MemoryStore::new())
    } else {
        let dir = config.state_dir();
        let store = DirStore::open(&dir)
            .with_context(|| format!("failed to open state directory {}", dir.display()))?;
        log::debug!("state directory: {}", store.dir().display());
        Box::new(store)
    };
    let session = GameSession::restore(topology, store.as_ref()).context("failed to load saved state")?;
    let rng = match config.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_os_rng(),
    };

    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut console = Console::new(session, Some(store), rng, config.stars, io::stdout().lock())
        .assume_yes(args.yes)
        .prompt(prompt);
    console.run(stdin.lock())
}
