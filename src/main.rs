mod app;
mod command;
mod config;
mod consts;
mod game;
mod logging;
mod util;
mod view;
use crate::app::{App, AppError};
use crate::config::Config;
use crate::game::GameLoop;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use rand::{rngs::StdRng, SeedableRng};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cmd = match Cli::from_parser(Parser::from_env()) {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("wrapsnake: {e}");
            eprintln!("Run `wrapsnake --help` for usage.");
            return ExitCode::from(2);
        }
    };
    match cmd {
        Cli::Run(args) => match run(args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{e:#}");
                eprintln!("wrapsnake: {e:?}");
                ExitCode::FAILURE
            }
        },
        Cli::Help => {
            print!("{}", usage());
            ExitCode::SUCCESS
        }
        Cli::Version => {
            println!("wrapsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
    }
}

/// Load configuration, set up logging, and play until the user quits
fn run(args: Arguments) -> anyhow::Result<()> {
    let config = args.load_config()?;
    let grid = config.grid().context("invalid configuration")?;
    if let Some(path) = logging::init(&config.log).context("failed to set up logging")? {
        log::debug!("Logging to {}", path.display());
    }
    log::info!(
        "Starting wrapsnake {} on a {}x{} grid with {:?} edges",
        env!("CARGO_PKG_VERSION"),
        grid.width(),
        grid.height(),
        grid.edges()
    );
    let rng = match config.game.seed {
        Some(seed) => {
            log::info!("Seeding food placement with {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    let game = GameLoop::new(grid, rng).context("failed to start game")?;
    let terminal = ratatui::init();
    let r = App::new(game, config.tick_period()).run(terminal);
    ratatui::restore();
    match r {
        Ok(()) => Ok(()),
        Err(AppError::Io(e)) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Cli {
    Run(Arguments),
    Help,
    Version,
}

impl Cli {
    fn from_parser(mut parser: Parser) -> Result<Cli, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("seed") => args.seed = Some(parser.value()?.parse()?),
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Cli::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Cli::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Cli::Run(args))
    }
}

/// Command-line settings that override the configuration file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    seed: Option<u64>,
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path, false),
            None => Config::load(&Config::default_path()?, true),
        }
        .context("failed to load configuration")?;
        if let Some(seed) = self.seed {
            config.game.seed = Some(seed);
        }
        if let Some(ref path) = self.log_file {
            config.log.file = Some(path.clone());
        }
        Ok(config)
    }
}

fn usage() -> String {
    format!(
        concat!(
            "Usage: wrapsnake [<options>]\n",
            "\n",
            "Play snake on a grid whose edges wrap around.\n",
            "\n",
            "Options:\n",
            "  -c, --config <path>   Read configuration from <path>\n",
            "                        [default: {}]\n",
            "      --seed <int>      Seed the random placement of food\n",
            "      --log-file <path> Write log messages to <path>\n",
            "  -h, --help            Show this help and exit\n",
            "  -V, --version         Show the program version and exit\n",
        ),
        Config::default_path().map_or_else(
            |_| String::from("<none>"),
            |p| p.display().to_string()
        )
    )
}
