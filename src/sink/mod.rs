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

//! Destinations that formatted records are written to.

use std::fmt;

use crate::Error;

mod file;
mod stdio;

pub use self::file::File;
pub use self::file::FileBuilder;
pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
pub use self::stdio::Writer;

/// A destination for formatted records.
///
/// A sink does not track whether it has been closed; the owning [`Logger`](crate::Logger)
/// guarantees that nothing is written after [`close`](Sink::close).
pub trait Sink: fmt::Debug + Send + 'static {
    /// Write `bytes` and flush them before returning.
    fn write_record(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Release the destination.
    ///
    /// Default to a no-op.
    fn close(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Sink> From<T> for Box<dyn Sink> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
