#![cfg_attr(all(not(use_console), target_os = "windows"), windows_subsystem = "windows")]
#![cfg_attr(all(use_console, target_os = "windows"), windows_subsystem = "console")]

use std::env;

use anyhow::Context;
use platformer::app::App;
use platformer::constants::{DEFAULT_MAP, LOOP_TIME};
use platformer::platform;
use platformer::settings::LevelSettings;
use tracing::info;

/// Command line options.
struct Options {
    force_console: bool,
    map_path: String,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut options = Options {
            force_console: false,
            map_path: DEFAULT_MAP.to_string(),
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--console" | "-c" => options.force_console = true,
                "--map" | "-m" => {
                    options.map_path = args.next().context("--map expects a map resource path")?;
                }
                other => anyhow::bail!("Unknown argument: {other}"),
            }
        }

        Ok(options)
    }
}

/// The main entry point of the application.
///
/// Initializes logging, opens the window on the requested map and runs the
/// frame loop until the player quits.
pub fn main() -> anyhow::Result<()> {
    let options = Options::parse(env::args().skip(1))?;

    platform::init_logging(options.force_console).context("Could not initialize logging")?;

    let mut app = App::new(LevelSettings::with_map(options.map_path)).context("Could not create app")?;

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run()? {}

    info!("Exiting");
    Ok(())
}
