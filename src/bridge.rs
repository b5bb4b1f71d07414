// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! A bridge to forward logs from the `log` crate to a [`SharedLogger`].

use crate::Level;
use crate::SharedLogger;
use crate::Value;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

#[derive(Debug)]
struct LogCrateLogger(SharedLogger);

impl log::Log for LogCrateLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        let level = Level::from(record.level());
        match record.args().as_str() {
            Some(message) => self.0.log_or_trap(level, message),
            None => self.0.log_or_trap(level, Value::display(record.args())),
        }
    }

    // every record is flushed when written
    fn flush(&self) {}
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] and all logs from the log crate will be
/// forwarded to `logger`. Keep a clone of `logger` around to close it at the end of the program;
/// records logged after that are reported to the logger's trap.
///
/// This function will set the global maximum log level to `Trace`. To override this, call
/// [`log::set_max_level`] after this function.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use logalign::Logger;
/// use logalign::SharedLogger;
///
/// let logger = SharedLogger::new(Logger::stderr().unwrap());
/// if let Err(err) = logalign::bridge::try_setup_log_crate(logger.clone()) {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// log::info!("forwarded");
/// logger.close().unwrap();
/// ```
pub fn try_setup_log_crate(logger: SharedLogger) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(LogCrateLogger(logger)))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(logger: SharedLogger) {
    try_setup_log_crate(logger).expect(
        "logalign::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(Level::from(log::Level::Error), Level::Error);
        assert_eq!(Level::from(log::Level::Warn), Level::Warn);
        assert_eq!(Level::from(log::Level::Info), Level::Info);
        assert_eq!(Level::from(log::Level::Debug), Level::Debug);
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
    }
}
