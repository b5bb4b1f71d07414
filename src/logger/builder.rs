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

use std::io::Write;
use std::path::PathBuf;

use crate::Error;
use crate::LevelColor;
use crate::LineEnding;
use crate::Logger;
use crate::Trap;
use crate::sink::FileBuilder;
use crate::sink::Sink;
use crate::sink::Stderr;
use crate::sink::Stdout;
use crate::sink::Writer;
use crate::time::Clock;
use crate::time::Locale;
use crate::time::process_locale;
use crate::trap::DefaultTrap;

/// A builder for configuring a [`Logger`].
///
/// The setters configure how records look; one of the terminal methods ([`stdout`], [`stderr`],
/// [`writer`], [`file`] or [`sink`]) picks the destination, opens the logger and writes its
/// header line.
///
/// [`stdout`]: LoggerBuilder::stdout
/// [`stderr`]: LoggerBuilder::stderr
/// [`writer`]: LoggerBuilder::writer
/// [`file`]: LoggerBuilder::file
/// [`sink`]: LoggerBuilder::sink
///
/// # Examples
///
/// ```
/// use logalign::LineEnding;
/// use logalign::Logger;
/// use logalign::Locale;
///
/// let mut logger = Logger::builder()
///     .ansi(true)
///     .locale(Locale::en_US)
///     .line_ending(LineEnding::Lf)
///     .stderr()
///     .unwrap();
/// logger.info("colored and aligned").unwrap();
/// ```
#[must_use = "call a terminal method such as `stdout` or `file` to open the logger"]
#[derive(Debug)]
pub struct LoggerBuilder {
    ansi: bool,
    locale: Option<Locale>,
    line_ending: LineEnding,
    colors: LevelColor,
    trap: Box<dyn Trap>,
    clock: Clock,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            ansi: false,
            locale: None,
            line_ending: LineEnding::default(),
            colors: LevelColor::default(),
            trap: Box::new(DefaultTrap::default()),
            clock: Clock::DefaultClock,
        }
    }
}

impl LoggerBuilder {
    /// Enable or disable ANSI colored records. Default to `false`.
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Set the locale used to format the header timestamp.
    ///
    /// Default to the process locale, see [`process_locale`](crate::time::process_locale).
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Set the line ending. Default to the platform's native one.
    pub fn line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Customize the colors of the levels.
    ///
    /// No effect unless [`ansi`](LoggerBuilder::ansi) is enabled.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Set the trap for errors that cannot be returned to the caller.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Open a logger printing to stdout.
    ///
    /// # Errors
    ///
    /// Return an error if the header line cannot be written.
    pub fn stdout(self) -> Result<Logger, Error> {
        self.sink(Stdout::default())
    }

    /// Open a logger printing to stderr.
    ///
    /// # Errors
    ///
    /// Return an error if the header line cannot be written.
    pub fn stderr(self) -> Result<Logger, Error> {
        self.sink(Stderr::default())
    }

    /// Open a logger writing to `writer`.
    ///
    /// # Errors
    ///
    /// Return an error if the header line cannot be written.
    pub fn writer<W: Write + Send + 'static>(self, writer: W) -> Result<Logger, Error> {
        self.sink(Writer::new(writer))
    }

    /// Open a logger appending to `<basedir>/<name>.log`.
    ///
    /// The file is created if absent; earlier content is kept.
    ///
    /// # Errors
    ///
    /// Return an error of kind [`Config`](crate::ErrorKind::Config) if `basedir` is not a
    /// directory or `name` is unusable, in which case nothing is created. Return an error of kind
    /// [`PermissionDenied`](crate::ErrorKind::PermissionDenied) or
    /// [`Io`](crate::ErrorKind::Io) if the file cannot be opened or the header cannot be written.
    pub fn file(
        self,
        basedir: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Result<Logger, Error> {
        let file = FileBuilder::new(basedir, name).build()?;
        self.sink(file)
    }

    /// Open a logger appending to `<name>.log` in the current working directory.
    ///
    /// # Errors
    ///
    /// See [`LoggerBuilder::file`].
    pub fn named(self, name: impl Into<String>) -> Result<Logger, Error> {
        self.file(".", name)
    }

    /// Open a logger writing to a custom [`Sink`].
    ///
    /// # Errors
    ///
    /// Return an error if the header line cannot be written.
    pub fn sink(self, sink: impl Into<Box<dyn Sink>>) -> Result<Logger, Error> {
        let LoggerBuilder {
            ansi,
            locale,
            line_ending,
            colors,
            trap,
            clock,
        } = self;

        let locale = locale.unwrap_or_else(process_locale);
        Logger::open(
            sink.into(),
            ansi,
            line_ending,
            locale,
            colors,
            trap,
            &clock,
        )
    }
}
