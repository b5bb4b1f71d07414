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

//! Formatting of record payloads.
//!
//! A record is written as its prefix followed by the message. Line breaks inside the message are
//! replaced with the configured line ending plus as many spaces as the prefix is wide, so that
//! continuation lines start under the first message character:
//!
//! ```text
//! [ERROR]: connection refused
//!          retrying in 5s
//! ```

use std::fmt;

/// The ANSI sequence that resets all colors and styles.
pub const RESET: &str = "\x1b[0m";

/// The line terminator written between and after records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl Default for LineEnding {
    /// The native line ending of the target platform.
    fn default() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

impl LineEnding {
    /// The terminator as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The number of characters of `text` a terminal would display, i.e. excluding ANSI CSI escape
/// sequences (`ESC [ params final`).
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // parameter and intermediate bytes end at the first byte in 0x40..=0x7E
            for c in chars.by_ref() {
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Format `message` behind `prefix`.
///
/// Every line break in `message` (`\r\n`, `\r` or `\n`) is replaced with `line_ending` followed by
/// an indentation run as wide as the prefix. When `ansi` is true, escape sequences embedded in
/// the prefix do not count towards the indentation and a [`RESET`] is appended.
///
/// The result is not terminated; the caller appends the record terminator.
pub fn format_message(prefix: &str, message: &str, ansi: bool, line_ending: LineEnding) -> Vec<u8> {
    let indent = if ansi {
        visible_width(prefix)
    } else {
        prefix.chars().count()
    };

    let mut out = String::with_capacity(prefix.len() + message.len() + RESET.len());
    out.push_str(prefix);

    let mut chars = message.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(line_ending.as_str());
                out.extend(std::iter::repeat_n(' ', indent));
            }
            c => out.push(c),
        }
    }

    if ansi {
        out.push_str(RESET);
    }
    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand::distr::Alphanumeric;

    use super::*;

    fn format(prefix: &str, message: &str, ansi: bool) -> String {
        String::from_utf8(format_message(prefix, message, ansi, LineEnding::Lf)).unwrap()
    }

    #[test]
    fn test_single_line() {
        assert_eq!(format("[INFO]: ", "hello", false), "[INFO]: hello");
        assert_eq!(format("", "hello", false), "hello");
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(format("[INFO]: ", "", false), "[INFO]: ");
        assert_eq!(
            format("\x1b[36;1m[INFO]: ", "", true),
            "\x1b[36;1m[INFO]: \x1b[0m"
        );
    }

    #[test]
    fn test_continuation_lines_are_aligned() {
        assert_eq!(
            format("[WARN]: ", "first\nsecond\r\nthird\rfourth", false),
            "[WARN]: first\n        second\n        third\n        fourth"
        );
    }

    #[test]
    fn test_only_line_breaks() {
        assert_eq!(format("[DEBUG]: ", "\n\n", false), "[DEBUG]: \n         \n         ");
    }

    #[test]
    fn test_ansi_escape_excluded_from_indent() {
        let out = format("\x1b[31;1m[ERROR]: ", "a\nb", true);
        assert_eq!(out, "\x1b[31;1m[ERROR]: a\n         b\x1b[0m");
        assert!(out.starts_with("\x1b[31;1m"));
        assert!(out.ends_with(RESET));
    }

    #[test]
    fn test_crlf_line_ending() {
        let out = format_message("[INFO]: ", "a\nb", false, LineEnding::CrLf);
        assert_eq!(out, b"[INFO]: a\r\n        b");
    }

    #[test]
    fn test_visible_width() {
        assert_eq!(visible_width("[INFO]: "), 8);
        assert_eq!(visible_width("\x1b[36;1m[INFO]: "), 8);
        assert_eq!(visible_width("\x1b[0m"), 0);
        assert_eq!(visible_width("héllo"), 5);
    }

    #[test]
    fn test_indent_runs_match_line_breaks() {
        let mut rng = rand::rng();
        let prefix = "[ERROR]: ";
        let indent = " ".repeat(prefix.len());

        for _ in 0..32 {
            let lines = rng.random_range(1..=8);
            let message = (0..lines)
                .map(|_| generate_random_string(&mut rng))
                .collect::<Vec<_>>()
                .join("\n");

            let out = format(prefix, &message, false);
            let continuations = out.split('\n').skip(1).collect::<Vec<_>>();
            assert_eq!(continuations.len(), lines - 1);
            for line in continuations {
                assert!(line.starts_with(&indent), "{line:?} is not indented");
                assert!(!line[indent.len()..].starts_with(' '));
            }
        }
    }

    fn generate_random_string(rng: &mut impl Rng) -> String {
        let len = rng.random_range(1..=40);
        std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect()
    }
}
