//! Log output for embedding applications

use std::env;
use std::str::FromStr;
use tracing::Level;

pub const LOG_LEVEL_ENV: &str = "RUST_LOG";
pub const DEFAULT_LOG_LEVEL: Level = Level::INFO;

/// Level named by `RUST_LOG` ("trace", "debug", "info", "warn", "error"),
/// falling back to info when unset or unreadable
pub fn log_level() -> Level {
    parse_level(env::var(LOG_LEVEL_ENV).ok().as_deref())
}

fn parse_level(raw: Option<&str>) -> Level {
    raw.and_then(|s| Level::from_str(s.trim()).ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

/// Install a stderr fmt subscriber at [`log_level`].
///
/// Returns false when a global subscriber was already installed, so it is
/// safe to call more than once.
pub fn init_logging() -> bool {
    let level = log_level();
    let installed = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(%level, "logging initialised");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level(None), Level::INFO);
        assert_eq!(parse_level(Some("debug")), Level::DEBUG);
        assert_eq!(parse_level(Some(" WARN ")), Level::WARN);
        assert_eq!(parse_level(Some("sizhu=trace")), Level::INFO);
    }

    #[test]
    fn test_init_twice() {
        init_logging();
        assert!(!init_logging());
    }
}
