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

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::Error;
use crate::ErrorKind;
use crate::sink::Sink;

/// A builder to configure and create a [`File`] sink.
#[derive(Debug)]
pub struct FileBuilder {
    // required
    basedir: PathBuf,
    name: String,
}

impl FileBuilder {
    /// Create a new file sink builder for `<basedir>/<name>.log`.
    ///
    /// Pass `"."` as `basedir` for the current working directory.
    #[must_use]
    pub fn new(basedir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            basedir: basedir.into(),
            name: name.into(),
        }
    }

    /// The path of the log file this builder opens.
    pub fn filepath(&self) -> PathBuf {
        self.basedir.join(format!("{}.log", self.name))
    }

    /// Build the [`File`] sink.
    ///
    /// The file is created if absent and opened in append mode, so content from earlier runs is
    /// preserved.
    ///
    /// # Errors
    ///
    /// Return an error if either:
    ///
    /// * The configured name is empty or contains a path separator.
    /// * The base directory does not exist or is not a directory. Nothing is created then.
    /// * The file cannot be opened.
    pub fn build(self) -> Result<File, Error> {
        if self.name.is_empty() {
            return Err(Error::new(ErrorKind::Config, "log name must not be empty"));
        }
        if self.name.contains(['/', '\\']) {
            return Err(
                Error::new(ErrorKind::Config, "log name must not contain a path separator")
                    .with_context("name", &self.name),
            );
        }
        if !self.basedir.is_dir() {
            return Err(
                Error::new(ErrorKind::Config, "the path provided is not a directory")
                    .with_context("path", self.basedir.display()),
            );
        }

        let filepath = self.filepath();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&filepath)
            .map_err(|err| {
                Error::from_io_error(err).with_context("path", filepath.display())
            })?;

        Ok(File {
            filepath,
            file: Some(file),
        })
    }
}

/// A sink that appends records to a single log file.
#[derive(Debug)]
pub struct File {
    filepath: PathBuf,
    file: Option<fs::File>,
}

impl File {
    /// The path of the log file.
    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}

impl Sink for File {
    fn write_record(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let Some(file) = self.file.as_mut() else {
            return Err(Error::new(ErrorKind::Closed, "the log file is released")
                .with_context("path", self.filepath.display()));
        };
        file.write_all(bytes).map_err(Error::from_io_error)?;
        file.flush().map_err(Error::from_io_error)?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Error> {
        let Some(mut file) = self.file.take() else {
            return Ok(());
        };
        file.flush()
            .and_then(|()| file.sync_data())
            .map_err(|err| {
                Error::from_io_error(err).with_context("path", self.filepath.display())
            })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_is_created_and_appended() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        let mut sink = FileBuilder::new(temp_dir.path(), "app").build().unwrap();
        assert_eq!(sink.filepath(), temp_dir.path().join("app.log"));
        sink.write_record(b"first run\n").unwrap();
        sink.close().unwrap();

        let mut sink = FileBuilder::new(temp_dir.path(), "app").build().unwrap();
        sink.write_record(b"second run\n").unwrap();
        sink.close().unwrap();

        let content = fs::read_to_string(temp_dir.path().join("app.log")).unwrap();
        assert_eq!(content, "first run\nsecond run\n");
    }

    #[test]
    fn test_close_twice_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = FileBuilder::new(temp_dir.path(), "app").build().unwrap();
        sink.close().unwrap();
        sink.close().unwrap();

        let err = sink.write_record(b"late\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Closed);
    }

    #[test]
    fn test_path_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let not_dir = temp_dir.path().join("plain");
        fs::write(&not_dir, b"").unwrap();

        let err = FileBuilder::new(&not_dir, "app").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!not_dir.join("app.log").exists());

        let missing = temp_dir.path().join("missing");
        let err = FileBuilder::new(&missing, "app").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(!missing.exists());
    }

    #[test]
    fn test_invalid_names() {
        let temp_dir = TempDir::new().unwrap();

        let err = FileBuilder::new(temp_dir.path(), "").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = FileBuilder::new(temp_dir.path(), "a/b").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }
}
