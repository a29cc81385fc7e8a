//! Saving the generated post as a markdown file

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

/// Give up looking for a free `name (n).md` after this many tries
const MAX_SUFFIX: u32 = 999;

/// Errors from writing a post to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free file name for {0} in the target directory")]
    NoFreeName(String),
}

/// The post body plus the file name it should be offered under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDownload {
    pub file_name: String,
    pub content: String,
}

impl PostDownload {
    /// `<sanitized title>.md` with the post as content
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            file_name: format!("{}.md", sanitize_file_stem(title)),
            content: content.to_string(),
        }
    }

    /// Write into `dir`, never overwriting: `Title.md`, `Title (1).md`, ...
    ///
    /// Returns the path actually written.
    pub fn save(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        debug!(?dir, file_name = %self.file_name, "PostDownload::save: called");
        fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let stem = self.file_name.strip_suffix(".md").unwrap_or(&self.file_name);
        for n in 0..=MAX_SUFFIX {
            let name = if n == 0 {
                self.file_name.clone()
            } else {
                format!("{} ({}).md", stem, n)
            };
            let path = dir.join(&name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    write_or_discard(file, &path, &self.content)?;
                    info!(path = %path.display(), bytes = self.content.len(), "Saved post");
                    return Ok(path);
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(ExportError::Write { path, source }),
            }
        }
        Err(ExportError::NoFreeName(self.file_name.clone()))
    }
}

/// Write `content` to a freshly created file, removing it again on failure
///
/// A half-written file would otherwise claim the name and push the next
/// save to a ` (n)` suffix.
fn write_or_discard(mut file: impl Write, path: &Path, content: &str) -> Result<(), ExportError> {
    if let Err(source) = file.write_all(content.as_bytes()).and_then(|_| file.flush()) {
        drop(file);
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "write_or_discard: failed to remove partial file");
        }
        return Err(ExportError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Turn a title into something every common filesystem accepts
///
/// Path separators, the characters Windows reserves (`: * ? " < > |`) and
/// control characters become `-`. Surrounding whitespace and trailing dots are
/// dropped. Everything else, spaces included, is kept as written.
pub fn sanitize_file_stem(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    let stem = replaced.trim().trim_end_matches('.').trim_end();
    if stem.is_empty() { "post".to_string() } else { stem.to_string() }
}
