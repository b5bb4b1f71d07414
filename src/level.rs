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

//! Severity levels and their display prefixes.

use std::fmt;

use colored::Color;

/// The severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Framing text such as the header and footer lines. No prefix and no color.
    Generic,
    /// Information.
    Info,
    /// Debugging information.
    Debug,
    /// Warnings.
    Warn,
    /// Errors.
    Error,
}

impl Level {
    /// The uppercase name of the level.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Generic => "GENERIC",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Colors for different log levels.
///
/// Colors are emitted as bold foreground escapes, e.g. `ESC[31;1m` for red.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelColor {
    info: Color,
    debug: Color,
    warn: Color,
    error: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            info: Color::Cyan,
            debug: Color::Green,
            warn: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl LevelColor {
    /// Customize the color of the info log level. Default to cyan.
    #[must_use]
    pub fn info(mut self, color: Color) -> Self {
        self.info = color;
        self
    }

    /// Customize the color of the debug log level. Default to green.
    #[must_use]
    pub fn debug(mut self, color: Color) -> Self {
        self.debug = color;
        self
    }

    /// Customize the color of the warn log level. Default to yellow.
    #[must_use]
    pub fn warn(mut self, color: Color) -> Self {
        self.warn = color;
        self
    }

    /// Customize the color of the error log level. Default to red.
    #[must_use]
    pub fn error(mut self, color: Color) -> Self {
        self.error = color;
        self
    }

    /// The color assigned to `level`, or `None` for [`Level::Generic`].
    pub fn color(&self, level: Level) -> Option<Color> {
        match level {
            Level::Generic => None,
            Level::Info => Some(self.info),
            Level::Debug => Some(self.debug),
            Level::Warn => Some(self.warn),
            Level::Error => Some(self.error),
        }
    }

    /// The ANSI color-start escape for `level`, or `None` for [`Level::Generic`].
    pub fn escape(&self, level: Level) -> Option<String> {
        self.color(level)
            .map(|color| format!("\x1b[{};1m", color.to_fg_str()))
    }

    /// The display prefix for `level`.
    ///
    /// [`Level::Generic`] always yields an empty prefix. Other levels yield `"[NAME]: "`,
    /// preceded by the level's color escape if `ansi` is true.
    pub fn prefix(&self, level: Level, ansi: bool) -> String {
        if level == Level::Generic {
            return String::new();
        }

        let name = level.name();
        match self.escape(level) {
            Some(escape) if ansi => format!("{escape}[{name}]: "),
            _ => format!("[{name}]: "),
        }
    }
}

/// The display prefix for `level` with the default colors.
///
/// See [`LevelColor::prefix`].
pub fn prefix(level: Level, ansi: bool) -> String {
    LevelColor::default().prefix(level, ansi)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [Level; 4] = [Level::Info, Level::Debug, Level::Warn, Level::Error];

    #[test]
    fn test_generic_has_no_prefix() {
        assert_eq!(prefix(Level::Generic, false), "");
        assert_eq!(prefix(Level::Generic, true), "");
        assert_eq!(LevelColor::default().escape(Level::Generic), None);
    }

    #[test]
    fn test_prefix_contains_level_name() {
        for level in LEVELS {
            for ansi in [false, true] {
                let p = prefix(level, ansi);
                assert!(!p.is_empty());
                assert!(p.contains(level.name()), "{p:?} misses {level}");
                assert_eq!(p.contains('\x1b'), ansi);
            }
        }
        assert_eq!(prefix(Level::Warn, false), "[WARN]: ");
    }

    #[test]
    fn test_default_escapes() {
        let colors = LevelColor::default();
        assert_eq!(colors.escape(Level::Info).unwrap(), "\x1b[36;1m");
        assert_eq!(colors.escape(Level::Debug).unwrap(), "\x1b[32;1m");
        assert_eq!(colors.escape(Level::Warn).unwrap(), "\x1b[33;1m");
        assert_eq!(colors.escape(Level::Error).unwrap(), "\x1b[31;1m");
        assert_eq!(prefix(Level::Error, true), "\x1b[31;1m[ERROR]: ");
    }

    #[test]
    fn test_default_escapes_are_distinct() {
        let colors = LevelColor::default();
        let mut escapes = LEVELS
            .iter()
            .map(|&level| colors.escape(level).unwrap())
            .collect::<Vec<_>>();
        escapes.sort();
        escapes.dedup();
        assert_eq!(escapes.len(), LEVELS.len());
    }

    #[test]
    fn test_custom_color() {
        let colors = LevelColor::default().info(Color::Blue);
        assert_eq!(colors.prefix(Level::Info, true), "\x1b[34;1m[INFO]: ");
    }
}
