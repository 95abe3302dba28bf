//! Registry of type metadata, looked up by type name.

use crate::metadata::TypeMetadata;
use crate::parser::{self, merge, rust};
use crate::specifier::Specifier;
use anyhow::{Context, Result};
use std::fs;
use tracing::{debug, warn};

/// Type metadata collected from hand-written tables or scanned sources.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: Vec<TypeMetadata>,
}

impl Registry {
    /// Build a registry, merging fragments that share a type name.
    pub fn new(types: Vec<TypeMetadata>) -> Self {
        Self {
            types: merge::merge(types),
        }
    }

    /// Scan a single annotated Rust source text.
    pub fn from_source(source: &str) -> Self {
        Self::new(rust::parse(source))
    }

    /// Scan files, directories and glob patterns.
    ///
    /// Files with an unsupported extension are skipped with a warning;
    /// unreadable files are errors.
    pub fn load(patterns: &[String]) -> Result<Self> {
        let files = parser::expand_globs(patterns)?;
        let mut types = Vec::new();
        for path in &files {
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            match parser::parse_file(path, &content) {
                Ok(parsed) => {
                    debug!(file = %path.display(), types = parsed.len(), "scanned source");
                    types.extend(parsed);
                }
                Err(e) => warn!(file = %path.display(), "skipping: {e}"),
            }
        }
        Ok(Self::new(types))
    }

    pub fn get(&self, name: &str) -> Option<&TypeMetadata> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn specifier(&self, name: &str) -> Option<Specifier<'_>> {
        self.get(name).map(Specifier::new)
    }

    /// Type names in first-seen order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
