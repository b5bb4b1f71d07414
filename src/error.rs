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

/// The kind of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The logger was configured with an unusable destination, e.g. a path that is not a
    /// directory.
    Config,
    /// A record was written to a logger that has already been closed.
    Closed,
    /// The destination could not be opened because of missing permissions.
    PermissionDenied,
    /// Writing, flushing or releasing the destination failed.
    Io,
}

impl ErrorKind {
    fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Config => "Config",
            ErrorKind::Closed => "Closed",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::Io => "Io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error struct of logalign.
pub struct Error {
    kind: ErrorKind,
    message: String,
    sources: Vec<anyhow::Error>,
    context: Vec<(&'static str, String)>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.sources.is_empty() {
            write!(f, ", sources: [")?;
            for (i, source) in self.sources.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{source}")?;
            }
            write!(f, "]")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("sources", &self.sources);
            return de.finish();
        }

        write!(f, "{} ({})", self.message, self.kind)?;
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }
        if !self.sources.is_empty() {
            writeln!(f)?;
            writeln!(f, "Sources:")?;
            for source in self.sources.iter() {
                writeln!(f, "   {source:#}")?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.sources.first().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            sources: vec![],
            context: vec![],
        }
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the message of this error, without context and sources.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether this error should be treated as unrecoverable by the application.
    ///
    /// A logger that cannot open its destination for lack of permission will not work on
    /// retry; callers typically report it and exit.
    pub fn is_fatal(&self) -> bool {
        self.kind == ErrorKind::PermissionDenied
    }

    /// Add one more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Add one more source in error.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.sources.push(src.into());
        self
    }

    /// Return an iterator over all sources of this error.
    pub fn sources(&self) -> impl ExactSizeIterator<Item = &(dyn std::error::Error + 'static)> {
        self.sources.iter().map(|v| v.as_ref())
    }

    /// Default constructor for [`Error`] from [`io::Error`].
    ///
    /// [`io::ErrorKind::PermissionDenied`] maps to [`ErrorKind::PermissionDenied`], everything
    /// else to [`ErrorKind::Io`].
    pub fn from_io_error(err: io::Error) -> Error {
        match err.kind() {
            io::ErrorKind::PermissionDenied => {
                Error::new(ErrorKind::PermissionDenied, "permission denied").with_source(err)
            }
            _ => Error::new(ErrorKind::Io, "failed to perform io").with_source(err),
        }
    }

    pub(crate) fn closed() -> Error {
        Error::new(ErrorKind::Closed, "the logger is closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_context_and_sources() {
        let err = Error::new(ErrorKind::Config, "path is not a directory")
            .with_context("path", "/tmp/nope")
            .with_source(io::Error::other("boom"));

        assert_eq!(
            err.to_string(),
            "path is not a directory (Config), context: { path: /tmp/nope }, sources: [boom]"
        );
        assert_eq!(err.sources().len(), 1);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_kind_mapping() {
        let denied = Error::from_io_error(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.kind(), ErrorKind::PermissionDenied);
        assert!(denied.is_fatal());

        let other = Error::from_io_error(io::Error::from(io::ErrorKind::BrokenPipe));
        assert_eq!(other.kind(), ErrorKind::Io);
        assert!(!other.is_fatal());
    }

    #[test]
    fn test_closed_error() {
        let err = Error::closed();
        assert_eq!(err.kind(), ErrorKind::Closed);
        assert_eq!(err.message(), "the logger is closed");
    }
}
