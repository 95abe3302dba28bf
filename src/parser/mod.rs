//! Parser module: annotated source files into type metadata.

pub mod annotation;
mod lex;
pub mod merge;
pub mod rust;

use crate::metadata::TypeMetadata;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File extensions recognized as source files.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["rs"];

/// Parse a source file into type metadata based on its extension.
pub fn parse_file(path: &Path, content: &str) -> Result<Vec<TypeMetadata>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("rs") => Ok(rust::parse(content)),
        _ => Err(anyhow!("unsupported file type: {}", path.display())),
    }
}

/// Expand glob patterns into a sorted, de-duplicated list of file paths.
/// Bare directories are scanned (non-recursively) for supported files.
pub fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                let supported = p
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
                if p.is_file() && supported {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}
