//! Source file discovery and safe reads.

use std::io::Read;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use memchr::memchr;
use walkdir::{DirEntry, WalkDir};

use omni_ast::Lang;

use crate::error::DocsError;

/// Directory names never descended into.
pub const SKIP_DIRS: [&str; 7] = [
    "node_modules",
    ".git",
    "target",
    "dist",
    "bin",
    "obj",
    "__pycache__",
];

/// Number of leading bytes scanned for NUL when detecting binaries.
const BINARY_SNIFF_LEN: usize = 8192;

/// Expand files and directories into the sorted list of supported sources.
///
/// Explicit files are kept when their extension is supported. Directories
/// are walked, skipping [`SKIP_DIRS`] and hidden directories. With `glob`,
/// only paths matching it (relative to the walked directory, or as given)
/// are kept.
///
/// # Errors
/// Returns `DocsError::Glob` when `glob` does not parse.
pub fn discover_files(inputs: &[PathBuf], glob: Option<&str>) -> Result<Vec<PathBuf>, DocsError> {
    let matcher = glob.map(compile_glob).transpose()?;
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            if Lang::from_path(input).is_none() {
                tracing::warn!(path = %input.display(), "unsupported file type; skipping");
            } else if accepts(matcher.as_ref(), input, input) {
                files.push(input.clone());
            }
            continue;
        }
        if !input.is_dir() {
            tracing::warn!(path = %input.display(), "path does not exist; skipping");
            continue;
        }

        let walker = WalkDir::new(input)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(error) => {
                    tracing::warn!(error = %error, "directory walk error; continuing");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || Lang::from_path(path).is_none() {
                continue;
            }
            let relative = path.strip_prefix(input).unwrap_or(path);
            if accepts(matcher.as_ref(), relative, path) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(count = files.len(), "source files discovered");
    Ok(files)
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher, DocsError> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|error| DocsError::Glob {
            pattern: pattern.to_string(),
            message: error.to_string(),
        })
}

fn accepts(matcher: Option<&GlobMatcher>, relative: &Path, full: &Path) -> bool {
    matcher.is_none_or(|m| m.is_match(relative) || m.is_match(full))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIP_DIRS.contains(&name))
}

/// Quick binary detection: NUL within the first 8 KiB.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = buffer.len().min(BINARY_SNIFF_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Read a source file, refusing oversized, binary and non-UTF-8 files.
///
/// # Errors
/// Returns `DocsError::Io`, `DocsError::TooLarge`, `DocsError::Binary` or
/// `DocsError::NotUtf8`.
pub fn read_source(path: &Path, max_bytes: u64) -> Result<String, DocsError> {
    let io_error = |source| DocsError::Io {
        path: path.display().to_string(),
        source,
    };
    let metadata = std::fs::metadata(path).map_err(io_error)?;
    if metadata.len() > max_bytes {
        return Err(DocsError::TooLarge {
            path: path.display().to_string(),
            size: metadata.len(),
            limit: max_bytes,
        });
    }

    let mut buffer = Vec::new();
    std::fs::File::open(path)
        .and_then(|mut file| file.read_to_end(&mut buffer))
        .map_err(io_error)?;
    if is_binary(&buffer) {
        return Err(DocsError::Binary(path.display().to_string()));
    }

    String::from_utf8(buffer).map_err(|error| DocsError::NotUtf8 {
        path: path.display().to_string(),
        offset: error.utf8_error().valid_up_to(),
    })
}
