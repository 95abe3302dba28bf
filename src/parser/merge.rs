//! Merge type metadata that is spread over several declarations.
//!
//! A type's annotations sit on its `struct`/`enum`/`trait` declaration while
//! its methods live in one or more `impl` blocks, possibly in other files.
//! This module folds those fragments into one entry per type name.

use crate::metadata::TypeMetadata;
use std::collections::HashMap;
use tracing::debug;

/// Combine fragments by type name.
///
/// Annotations are concatenated and methods appended in input order; the
/// result keeps the order in which type names were first seen.
pub fn merge(types: Vec<TypeMetadata>) -> Vec<TypeMetadata> {
    let mut by_name: HashMap<String, TypeMetadata> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for ty in types {
        if let Some(existing) = by_name.get_mut(&ty.name) {
            debug!(type_name = %ty.name, methods = ty.methods.len(), "merging type fragment");
            existing.annotations.extend(ty.annotations);
            existing.methods.extend(ty.methods);
        } else {
            order.push(ty.name.clone());
            by_name.insert(ty.name.clone(), ty);
        }
    }

    // Preserve first-seen order
    order
        .into_iter()
        .filter_map(|name| by_name.remove(&name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MethodMetadata;

    #[test]
    fn merge_single_fragment() {
        let types = vec![TypeMetadata::new("A").describe("only")];
        let merged = merge(types);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].annotations.description(), Some("only"));
    }

    #[test]
    fn merge_declaration_and_impls() {
        let types = vec![
            TypeMetadata::new("A").method(MethodMetadata::new("one")),
            TypeMetadata::new("B"),
            TypeMetadata::new("A").describe("Service A"),
            TypeMetadata::new("A").method(MethodMetadata::new("two")),
        ];
        let merged = merge(types);
        let names: Vec<&str> = merged.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);

        let a = &merged[0];
        assert_eq!(a.annotations.description(), Some("Service A"));
        let methods: Vec<&str> = a.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, ["one", "two"]);
    }

    #[test]
    fn merge_empty() {
        assert!(merge(Vec::new()).is_empty());
    }
}
