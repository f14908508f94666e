use crate::error::Result;
use std::fs::File;
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

/// Level shown on stderr: `-q` silences it, each `-v` opens one more level above WARN.
fn console_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Level written to `--log-file`. Never below DEBUG, and unaffected by `-q`.
fn file_level(verbosity: u8) -> LevelFilter {
    console_level(verbosity, false).max(LevelFilter::DEBUG)
}

/// Compact stderr output plus an optional plain-text file, each with its own level.
fn build_subscriber(
    verbosity: u8,
    quiet: bool,
    log_file: Option<File>,
) -> impl Subscriber + Send + Sync + 'static {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_filter(console_level(verbosity, quiet));

    let file = log_file.map(|file| {
        fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true)
            .with_filter(file_level(verbosity))
    });

    tracing_subscriber::registry().with(console).with(file)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let file = log_file.map(File::create).transpose()?;
    build_subscriber(verbosity, quiet, file).init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use serial_test::serial;
    use std::path::PathBuf;
    use tracing::{debug, info, trace};

    fn log_with(verbosity: u8, quiet: bool) -> String {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("cosrod.log");
        let file = File::create(&log_path).unwrap();

        tracing::subscriber::with_default(build_subscriber(verbosity, quiet, Some(file)), || {
            info!("Rod loaded.");
            debug!("Window loaded.");
            trace!("Energy term.");
        });

        std::fs::read_to_string(log_path).unwrap()
    }

    #[test]
    fn verbosity_maps_to_console_levels() {
        assert_eq!(console_level(0, false), LevelFilter::WARN);
        assert_eq!(console_level(1, false), LevelFilter::INFO);
        assert_eq!(console_level(2, false), LevelFilter::DEBUG);
        assert_eq!(console_level(7, false), LevelFilter::TRACE);
        assert_eq!(console_level(3, true), LevelFilter::OFF);
    }

    #[test]
    fn file_level_is_at_least_debug() {
        assert_eq!(file_level(0), LevelFilter::DEBUG);
        assert_eq!(file_level(2), LevelFilter::DEBUG);
        assert_eq!(file_level(3), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn quiet_run_still_records_debug_in_the_log_file() {
        let content = log_with(0, true);
        assert!(content.contains("Rod loaded."));
        assert!(content.contains("Window loaded."));
        assert!(!content.contains("Energy term."));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn high_verbosity_records_trace_in_the_log_file() {
        let content = log_with(3, false);
        assert!(content.contains("Energy term."));
        assert!(content.contains("TRACE"));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(&invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
