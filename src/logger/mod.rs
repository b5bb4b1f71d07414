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

use std::path::PathBuf;
use std::sync::Arc;

use crate::Error;
use crate::Level;
use crate::LevelColor;
use crate::LineEnding;
use crate::ToValue;
use crate::Trap;
use crate::format::format_message;
use crate::sink::Sink;
use crate::time::Clock;
use crate::time::Locale;
use crate::time::header_timestamp;

mod builder;
mod shared;

pub use self::builder::LoggerBuilder;
pub use self::shared::SharedLogger;

/// The payload of the last line a logger writes.
pub const FOOTER: &str = "=====end=====";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Closed,
}

/// A logger writing leveled records to a single [`Sink`].
///
/// A logger starts open and writes a header line with the current time. [`close`](Logger::close)
/// writes a footer line, releases the sink, and rejects every later write with
/// [`ErrorKind::Closed`](crate::ErrorKind::Closed). Dropping an open logger closes it.
///
/// Writes take `&mut self`; wrap the logger in a [`SharedLogger`] to log from several threads.
///
/// # Examples
///
/// ```
/// use logalign::Logger;
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut logger = Logger::file(dir.path(), "app").unwrap();
/// logger.info("hello").unwrap();
/// logger.warn("first line\nsecond line").unwrap();
/// logger.close().unwrap();
/// ```
#[derive(Debug)]
pub struct Logger {
    sink: Box<dyn Sink>,
    ansi: bool,
    line_ending: LineEnding,
    locale: Locale,
    colors: LevelColor,
    trap: Arc<dyn Trap>,
    state: State,
}

impl Logger {
    /// Create a new [`LoggerBuilder`] with default settings.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Create a logger printing to stdout with default settings.
    ///
    /// # Errors
    ///
    /// Return an error if the header line cannot be written.
    pub fn stdout() -> Result<Logger, Error> {
        Logger::builder().stdout()
    }

    /// Create a logger printing to stderr with default settings.
    ///
    /// # Errors
    ///
    /// Return an error if the header line cannot be written.
    pub fn stderr() -> Result<Logger, Error> {
        Logger::builder().stderr()
    }

    /// Create a logger appending to `<basedir>/<name>.log` with default settings.
    ///
    /// # Errors
    ///
    /// See [`LoggerBuilder::file`].
    pub fn file(basedir: impl Into<PathBuf>, name: impl Into<String>) -> Result<Logger, Error> {
        Logger::builder().file(basedir, name)
    }

    /// Create a logger appending to `<name>.log` in the current working directory with default
    /// settings.
    ///
    /// # Errors
    ///
    /// See [`LoggerBuilder::file`].
    pub fn named(name: impl Into<String>) -> Result<Logger, Error> {
        Logger::builder().named(name)
    }

    fn open(
        sink: Box<dyn Sink>,
        ansi: bool,
        line_ending: LineEnding,
        locale: Locale,
        colors: LevelColor,
        trap: Box<dyn Trap>,
        clock: &Clock,
    ) -> Result<Logger, Error> {
        let mut logger = Logger {
            sink,
            ansi,
            line_ending,
            locale,
            colors,
            trap: Arc::from(trap),
            state: State::Open,
        };

        let header = header_timestamp(&clock.now(), locale);
        if let Err(err) = logger.write(Level::Generic, &header) {
            logger.state = State::Closed;
            if let Err(err) = logger.sink.close() {
                logger.trap.trap(&err);
            }
            return Err(err);
        }

        Ok(logger)
    }

    /// Write `value` as a record of the given `level`.
    ///
    /// The record is flushed before this returns.
    ///
    /// # Errors
    ///
    /// Return an error of kind [`Closed`](crate::ErrorKind::Closed) if the logger is closed, in
    /// which case nothing is written, or the I/O error of the sink.
    pub fn log(&mut self, level: Level, value: impl ToValue) -> Result<(), Error> {
        if self.state == State::Closed {
            return Err(Error::closed());
        }

        let message = value.to_value().to_string();
        self.write(level, &message)
    }

    /// Write `value` as an [`Level::Info`] record.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn info(&mut self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Info, value)
    }

    /// Write `value` as a [`Level::Debug`] record.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn debug(&mut self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Debug, value)
    }

    /// Write `value` as a [`Level::Warn`] record.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn warn(&mut self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Warn, value)
    }

    /// Write `value` as an [`Level::Error`] record.
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn error(&mut self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Error, value)
    }

    /// Close the logger.
    ///
    /// Writes the [`FOOTER`] line and releases the sink. The logger is closed afterwards even if
    /// either step failed. Closing a closed logger does nothing.
    ///
    /// # Errors
    ///
    /// Return the first error of writing the footer or releasing the sink.
    pub fn close(&mut self) -> Result<(), Error> {
        if self.state == State::Closed {
            return Ok(());
        }

        let footer = self.write(Level::Generic, FOOTER);
        let released = self.sink.close();
        self.state = State::Closed;
        footer.and(released)
    }

    /// Whether the logger has been closed.
    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Whether records are colored with ANSI escapes.
    pub fn ansi(&self) -> bool {
        self.ansi
    }

    /// The line ending terminating every record.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// The locale of the header timestamp.
    pub fn locale(&self) -> Locale {
        self.locale
    }

    #[cfg(feature = "bridge-log")]
    pub(crate) fn trap(&self) -> Arc<dyn Trap> {
        self.trap.clone()
    }

    fn write(&mut self, level: Level, message: &str) -> Result<(), Error> {
        let ansi = self.ansi && level != Level::Generic;
        let prefix = self.colors.prefix(level, ansi);
        let mut bytes = format_message(&prefix, message, ansi, self.line_ending);
        bytes.extend_from_slice(self.line_ending.as_str().as_bytes());
        self.sink.write_record(&bytes)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            self.trap.trap(&err);
        }
    }
}
