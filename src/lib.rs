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

//! Logalign is a small leveled logger for single-process applications.
//!
//! # Overview
//!
//! A [`Logger`] writes records to exactly one destination: stdout, stderr, any caller-supplied
//! stream, or a `<name>.log` file opened in append mode. Each record is prefixed with its level,
//! optionally colored with ANSI escapes, and multi-line messages are indented so that continuation
//! lines start under the first character of the message:
//!
//! ```text
//! 10.08.2024 17:12:52 +08:00
//! [INFO]: server started
//! [WARN]: config value `port` missing
//!         falling back to 8080
//! =====end=====
//! ```
//!
//! The first line is a locale-formatted timestamp written when the logger opens; the last line is
//! written by [`Logger::close`] (or on drop). Writing to a closed logger fails with
//! [`ErrorKind::Closed`].
//!
//! # Examples
//!
//! Log to stdout:
//!
//! ```
//! let mut logger = logalign::Logger::stdout().unwrap();
//! logger.info("This is an info message.").unwrap();
//! logger.debug(&[1, 2, 3]).unwrap();
//! logger.close().unwrap();
//! ```
//!
//! Log to a file with a fixed locale and line ending:
//!
//! ```
//! use logalign::LineEnding;
//! use logalign::Locale;
//! use logalign::Logger;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut logger = Logger::builder()
//!     .locale(Locale::de_DE)
//!     .line_ending(LineEnding::Lf)
//!     .file(dir.path(), "app")
//!     .unwrap();
//! logger.error("first line\nsecond line").unwrap();
//! logger.close().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(missing_docs)]

pub extern crate colored;

pub mod format;
pub mod level;
pub mod sink;
pub mod time;
pub mod trap;
pub mod value;

#[cfg(feature = "bridge-log")]
pub mod bridge;

mod error;
pub use self::error::Error;
pub use self::error::ErrorKind;

mod logger;
pub use self::logger::FOOTER;
pub use self::logger::Logger;
pub use self::logger::LoggerBuilder;
pub use self::logger::SharedLogger;

pub use self::format::LineEnding;
pub use self::level::Level;
pub use self::level::LevelColor;
pub use self::sink::Sink;
pub use self::time::Locale;
pub use self::trap::Trap;
pub use self::value::ToValue;
pub use self::value::Value;
