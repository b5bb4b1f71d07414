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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::Error;
use crate::Level;
use crate::Logger;
use crate::ToValue;

/// A cloneable handle serializing access to one [`Logger`].
///
/// Every record is formatted, written and flushed while holding the lock, so records from
/// different threads never interleave.
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// use logalign::Logger;
/// use logalign::SharedLogger;
///
/// let logger = SharedLogger::new(Logger::stdout().unwrap());
/// let handles = (0..4)
///     .map(|i| {
///         let logger = logger.clone();
///         thread::spawn(move || logger.info(i).unwrap())
///     })
///     .collect::<Vec<_>>();
/// for handle in handles {
///     handle.join().unwrap();
/// }
/// logger.close().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<Logger>>,
}

impl SharedLogger {
    /// Share `logger`.
    pub fn new(logger: Logger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    /// Lock the logger for a sequence of writes.
    pub fn lock(&self) -> MutexGuard<'_, Logger> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// See [`Logger::log`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn log(&self, level: Level, value: impl ToValue) -> Result<(), Error> {
        // render outside the lock; a value may log while it is formatted
        let message = value.to_value().to_string();
        self.lock().log(level, message)
    }

    /// See [`Logger::info`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn info(&self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Info, value)
    }

    /// See [`Logger::debug`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn debug(&self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Debug, value)
    }

    /// See [`Logger::warn`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn warn(&self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Warn, value)
    }

    /// See [`Logger::error`].
    ///
    /// # Errors
    ///
    /// See [`Logger::log`].
    pub fn error(&self, value: impl ToValue) -> Result<(), Error> {
        self.log(Level::Error, value)
    }

    /// Close the shared logger for every handle.
    ///
    /// # Errors
    ///
    /// See [`Logger::close`].
    pub fn close(&self) -> Result<(), Error> {
        self.lock().close()
    }

    /// Whether the shared logger has been closed.
    pub fn is_closed(&self) -> bool {
        self.lock().is_closed()
    }

    /// Write a record, handing any failure to the logger's trap once the lock is released.
    #[cfg(feature = "bridge-log")]
    pub(crate) fn log_or_trap(&self, level: Level, value: impl ToValue) {
        let message = value.to_value().to_string();
        let result = {
            let mut logger = self.lock();
            logger
                .log(level, message)
                .map_err(|err| (err, logger.trap()))
        };
        if let Err((err, trap)) = result {
            trap.trap(&err);
        }
    }
}

impl From<Logger> for SharedLogger {
    fn from(logger: Logger) -> Self {
        SharedLogger::new(logger)
    }
}
