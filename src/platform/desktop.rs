//! Desktop platform implementation.

#[cfg(feature = "sdl")]
use std::time::Duration;

use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

use crate::error::{GameError, GameResult};
use crate::formatter::FrameTimer;

/// Sleeps until the next frame is due.
///
/// Spins for precision while the window has focus; yields to the OS otherwise.
#[cfg(feature = "sdl")]
pub fn sleep(duration: Duration, focused: bool) {
    if focused {
        spin_sleep::sleep(duration);
    } else {
        std::thread::sleep(duration);
    }
}

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `debug`. With `force_console`
/// set, ANSI colors are used even when stderr is not a terminal.
pub fn init_logging(force_console: bool) -> GameResult<()> {
    use std::io::IsTerminal;

    let ansi = force_console || std::io::stderr().is_terminal();
    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_timer(FrameTimer)
                .with_target(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| GameError::Logging(format!("Failed to set tracing subscriber: {e}")))?;

    Ok(())
}
