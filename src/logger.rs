use log::{LevelFilter, Log};
use thiserror::Error;

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        eprintln!(
            "{file}:{line}: {}: {}",
            record.level(),
            record.args(),
            file = record.file().unwrap_or_default(),
            line = record.line().unwrap_or_default()
        );
    }

    fn flush(&self) {}
}

/// Each `-v` on the command line lets one more level of logs through.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[derive(Debug, Error)]
#[error("a logger is already installed")]
pub struct AlreadyInstalled;

pub fn install(verbosity: u8) -> Result<(), AlreadyInstalled> {
    log::set_logger(&LOGGER).map_err(|_| AlreadyInstalled)?;
    log::set_max_level(level_for(verbosity));
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(7), LevelFilter::Trace);
    }

    #[test]
    fn second_install_is_an_error() {
        // The first install may lose to another test; the second never wins.
        let _ = install(0);
        let error = install(1)
            .context("failed to install logger")
            .unwrap_err();

        assert_eq!(error.to_string(), "failed to install logger");
        assert!(error.downcast_ref::<AlreadyInstalled>().is_some());
    }
}
