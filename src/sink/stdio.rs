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

use std::fmt;
use std::io;
use std::io::Write;

use crate::Error;
use crate::ErrorKind;
use crate::sink::Sink;

/// A sink that prints records to stdout.
///
/// Closing flushes stdout but leaves it open for the rest of the process.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stdout {}

impl Sink for Stdout {
    fn write_record(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes).map_err(Error::from_io_error)?;
        stdout.flush().map_err(Error::from_io_error)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        io::stdout().flush().map_err(Error::from_io_error)
    }
}

/// A sink that prints records to stderr.
///
/// Closing flushes stderr but leaves it open for the rest of the process.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stderr {}

impl Sink for Stderr {
    fn write_record(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(bytes).map_err(Error::from_io_error)?;
        stderr.flush().map_err(Error::from_io_error)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        io::stderr().flush().map_err(Error::from_io_error)
    }
}

/// A sink over a caller-supplied stream.
///
/// Closing flushes the stream and drops it.
///
/// # Examples
///
/// ```
/// use logalign::sink::Writer;
///
/// let sink = Writer::new(Vec::<u8>::new());
/// ```
pub struct Writer<W> {
    inner: Option<W>,
}

impl<W: Write + Send + 'static> Writer<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner: Some(inner) }
    }
}

impl<W> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("released", &self.inner.is_none())
            .finish()
    }
}

impl<W: Write + Send + 'static> Sink for Writer<W> {
    fn write_record(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let Some(inner) = self.inner.as_mut() else {
            return Err(Error::new(ErrorKind::Closed, "the writer is released"));
        };
        inner.write_all(bytes).map_err(Error::from_io_error)?;
        inner.flush().map_err(Error::from_io_error)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        match self.inner.take() {
            Some(mut inner) => inner.flush().map_err(Error::from_io_error),
            None => Ok(()),
        }
    }
}
