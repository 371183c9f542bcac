#![deny(missing_docs)]

//! # Null Normalization
//!
//! OpenAPI 3.0 has no `null` type. A `null` candidate in a type list is
//! dropped and turned into `nullable: true` on whatever survives; a single
//! survivor collapses to a scalar schema instead of a composition.

use crate::oas::models::SchemaFragment;
use crate::parser::{Description, NodeKind};

/// Candidates of a type list after `null` entries have been removed.
pub(crate) struct NullSplit<'a> {
    /// Non-null candidates, in their original order.
    pub candidates: Vec<&'a Description>,
    /// Whether at least one `null` candidate was dropped.
    pub nullable: bool,
}

/// Separates `null` candidates from the rest.
pub(crate) fn split_null<'a>(nodes: impl IntoIterator<Item = &'a Description>) -> NullSplit<'a> {
    let mut nullable = false;
    let candidates = nodes
        .into_iter()
        .filter(|node| {
            let is_null = node.kind() == NodeKind::Null;
            nullable |= is_null;
            !is_null
        })
        .collect();
    NullSplit {
        candidates,
        nullable,
    }
}

/// Sets `nullable: true` when `nullable` holds; leaves the flag absent otherwise.
pub(crate) fn mark_nullable(schema: &mut SchemaFragment, nullable: bool) {
    if nullable {
        schema.nullable = Some(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_null_drops_null_candidates() {
        let nodes = vec![
            Description::of_type("string"),
            Description::of_type("null"),
            Description::of_type("number"),
        ];
        let split = split_null(&nodes);
        assert!(split.nullable);
        let kinds: Vec<NodeKind> = split.candidates.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::String, NodeKind::Number]);
    }

    #[test]
    fn test_split_null_without_null() {
        let nodes = vec![Description::of_type("boolean")];
        let split = split_null(&nodes);
        assert!(!split.nullable);
        assert_eq!(split.candidates.len(), 1);
    }

    #[test]
    fn test_mark_nullable_only_when_set() {
        let mut schema = SchemaFragment::typed("string");
        mark_nullable(&mut schema, false);
        assert_eq!(schema.nullable, None);
        mark_nullable(&mut schema, true);
        assert_eq!(schema.nullable, Some(true));
    }
}
