//! The file sink.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::combinator::concat;
use crate::error::PipeResult;
use crate::unit::{PipeUnit, Pipeable};
use crate::value::Value;

/// File written when no path is given, inside the current directory.
pub const DEFAULT_FILE_NAME: &str = "temptxtfile.txt";

/// Writes the input to a file. See [`to_file`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToFile {
    path: Option<PathBuf>,
    overwrite: bool,
    separator: String,
}

/// Writes the stringified input to a file.
///
/// Sequences are written as their items' `Display` output joined with the
/// separator (empty by default, see [`ToFile::separator`]); any other
/// [`Value`] is written whole.
///
/// Without [`ToFile::path`] the output goes to [`DEFAULT_FILE_NAME`] in the
/// current directory, replacing its content. With a path that already
/// exists, the output is appended unless [`ToFile::overwrite`] is set; a
/// notice is printed to standard error when that happens.
///
/// # Errors
///
/// Returns [`PipeError::Io`](crate::PipeError::Io) when the file cannot be
/// opened or written.
///
/// # Examples
///
/// ```no_run
/// use pipette::prelude::*;
///
/// (1..=3).pipe(to_file().path("numbers.txt").overwrite(true).separator("\n"))?;
/// # Ok::<(), pipette::PipeError>(())
/// ```
#[doc(alias = "dump")]
pub fn to_file() -> ToFile {
    ToFile::default()
}

impl ToFile {
    /// Writes to `path` instead of the default file.
    #[must_use]
    pub fn path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..self
        }
    }

    /// Replaces an existing file instead of appending to it.
    #[must_use]
    pub fn overwrite(self, overwrite: bool) -> Self {
        Self { overwrite, ..self }
    }

    /// Puts `separator` between items.
    #[must_use]
    pub fn separator(self, separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            ..self
        }
    }

    fn open(&self) -> PipeResult<File> {
        let path = self.target()?;
        let append = self.path.is_some() && !self.overwrite && path.exists();

        if append {
            eprintln!("File already exists, add to the end: {}", path.display());
            warn!(path = %path.display(), "output file exists, appending");
        }
        debug!(
            path = %path.display(),
            mode = if append { "append" } else { "write" },
            "opening output file"
        );

        Ok(open_options(append).open(&path)?)
    }

    fn write(&self, text: &str) -> PipeResult<()> {
        let mut file = self.open()?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    /// The file this sink writes to.
    ///
    /// # Errors
    ///
    /// Fails only when no path is set and the current directory is
    /// unavailable.
    pub fn target(&self) -> PipeResult<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => Ok(std::env::current_dir()?.join(DEFAULT_FILE_NAME)),
        }
    }
}

fn open_options(append: bool) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    options
}

impl<I> PipeUnit<I> for ToFile
where
    I: IntoIterator,
    I::Item: Display,
{
    type Output = PipeResult<()>;

    fn apply(&self, input: I) -> Self::Output {
        let text = input.pipe(concat().separator(self.separator.as_str()));
        self.write(&text)
    }
}

impl PipeUnit<Value> for ToFile {
    type Output = PipeResult<()>;

    fn apply(&self, input: Value) -> Self::Output {
        match input {
            Value::Sequence(items) => items.pipe(self),
            other => self.write(&other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value;
    use std::fs;

    #[test]
    fn test_to_file_joins_with_separator() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("out.txt");
        vec![1, 2, 3]
            .pipe(to_file().path(&path).separator(","))
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,2,3");
    }

    #[test]
    fn test_to_file_appends_to_existing_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("out.txt");
        fs::write(&path, "head-").unwrap();
        value!("tail").pipe(to_file().path(&path)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "head-tail");
    }

    #[test]
    fn test_to_file_overwrites_when_asked() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("out.txt");
        fs::write(&path, "old").unwrap();
        value![1, "a"]
            .pipe(to_file().path(&path).overwrite(true))
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1a");
    }

    #[test]
    fn test_to_file_missing_directory_is_io_error() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("missing").join("out.txt");
        let error = vec!["x"].pipe(to_file().path(path)).unwrap_err();
        assert!(matches!(error, crate::PipeError::Io(_)));
    }

    #[test]
    fn test_default_target_is_in_current_directory() {
        let target = to_file().target().unwrap();
        assert!(target.ends_with(DEFAULT_FILE_NAME));
    }
}
