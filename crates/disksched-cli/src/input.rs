//! Workload files and the filenames that name them.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use disksched_core::{SchedError, Workload};
use disksched_orchestration::SessionInput;

/// Why a workload file could not be turned into a workload.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: SchedError,
    },
}

/// Read and parse one workload file.
///
/// The file holds whitespace-separated integers
/// `capacity head previous pending...`, across any number of lines.
pub fn read_workload_file(path: &Path) -> Result<Workload, InputError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => InputError::NotFound(path.to_path_buf()),
        _ => InputError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let workload: Workload = text.parse().map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), pending = workload.pending.len(), "read workload");
    Ok(workload)
}

/// Filenames read one per line, with an optional prompt before each read.
///
/// Blank lines are skipped and surrounding whitespace is trimmed.
pub struct FilenameSource<R> {
    reader: R,
    prompt: Option<String>,
}

impl<R: BufRead> FilenameSource<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            prompt: None,
        }
    }

    /// Print `prompt` to stdout before every read.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }
}

impl<R: BufRead> Iterator for FilenameSource<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.prompt {
                let mut stdout = io::stdout().lock();
                // A prompt that fails to print does not stop the session.
                let _ = write!(stdout, "{prompt}").and_then(|()| stdout.flush());
            }
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let name = line.trim();
                    if !name.is_empty() {
                        return Some(Ok(name.to_string()));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Turn filenames into session inputs, lazily.
///
/// `quit_word` (compared exactly) becomes [`SessionInput::Quit`]. Files that
/// cannot be read or parsed become [`SessionInput::Rejected`].
pub fn session_inputs<I>(names: I, quit_word: impl Into<String>) -> impl Iterator<Item = SessionInput>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let quit_word = quit_word.into();
    names.into_iter().map(move |name| match name {
        Ok(name) if name == quit_word => SessionInput::Quit,
        Ok(name) => match read_workload_file(Path::new(&name)) {
            Ok(workload) => SessionInput::Workload {
                label: name,
                workload,
            },
            Err(e) => SessionInput::Rejected {
                label: name,
                reason: e.to_string(),
            },
        },
        Err(e) => SessionInput::Rejected {
            label: "<stdin>".to_string(),
            reason: format!("cannot read filename: {e}"),
        },
    })
}
