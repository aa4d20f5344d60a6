//! Enumeration anchored at a previously known partial path.
//!
//! Completion callers repeatedly ask "what comes after `a.b.c`". Rather than
//! re-enumerating from the root (and hitting the depth limit long before
//! reaching deep branches), enumeration restarts with a fresh budget at the
//! shape found at the offset's head.

use crate::depth::{DepthBudget, PathConfig, RESOLVE_DEPTH};
use crate::enumerate::{enumerate, paths};
use crate::error::Result;
use crate::path::{PathSet, segments};
use crate::resolve::{ResolveConfig, resolve_segments};
use crate::schema::Schema;
use crate::shape::Shape;

/// Enumerate paths continuing from `offset`.
///
/// The last segment of `offset` is treated as still being typed; the rest
/// (the head) is resolved and enumeration restarts there, with every
/// result prefixed by the head. An empty or single-segment offset
/// enumerates from the root. A head that does not resolve falls back to
/// root enumeration.
///
/// # Examples
///
/// ```
/// use dotpath::v1::{Field, PathConfig, Schema, Shape, paths_from_offset};
///
/// let leaf = Shape::object(vec![Field::new("e", Shape::string())]);
/// let d = Shape::object(vec![Field::new("d", leaf)]);
/// let c = Shape::object(vec![Field::new("c", d)]);
/// let b = Shape::object(vec![Field::new("b", c)]);
/// let schema = Schema::new(Shape::object(vec![Field::new("a", b)]));
///
/// let config = PathConfig::default().with_depth(1);
/// let set = paths_from_offset(&schema, "a.b.c.d.e", &config).unwrap();
/// assert!(set.contains("a.b.c.d.e"));
/// ```
pub fn paths_from_offset(schema: &Schema, offset: &str, config: &PathConfig) -> Result<PathSet> {
    config.validate()?;

    let segs = segments(offset);
    if segs.len() < 2 {
        return paths(schema, config);
    }
    let head = &segs[..segs.len() - 1];

    match resolve_head(schema, head) {
        Some(shape) => {
            tracing::debug!("continuing enumeration at `{}` ({})", offset, shape);
            Ok(enumerate(schema, &shape, DepthBudget::fresh(config), config).prefixed(head))
        }
        None => {
            tracing::warn!(
                "offset `{}` does not resolve, enumerating from the root",
                offset
            );
            paths(schema, config)
        }
    }
}

/// The shape at `head`, or `None` when no branch of the schema defines it.
pub(crate) fn resolve_head(schema: &Schema, head: &[&str]) -> Option<Shape> {
    resolve_segments(
        schema,
        &schema.root,
        head,
        DepthBudget::new(RESOLVE_DEPTH.max(head.len())),
        &ResolveConfig::set(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Field;

    fn chain(names: &[&str], leaf: Shape) -> Shape {
        names.iter().rev().fold(leaf, |inner, name| {
            Shape::object(vec![Field::new(*name, inner)])
        })
    }

    fn node_schema() -> Schema {
        Schema::new(Shape::reference("Node")).with_definition(
            "Node",
            Shape::object(vec![
                Field::new("name", Shape::string()),
                Field::new("parent", Shape::reference("Node")).optional(),
            ]),
        )
    }

    #[test]
    fn test_empty_offset_is_root_enumeration() {
        let schema = Schema::new(chain(&["a", "b"], Shape::string()));
        let config = PathConfig::default();
        assert_eq!(
            paths_from_offset(&schema, "", &config).unwrap(),
            paths(&schema, &config).unwrap()
        );
        assert_eq!(
            paths_from_offset(&schema, "a", &config).unwrap(),
            paths(&schema, &config).unwrap()
        );
    }

    #[test]
    fn test_offset_reanchors_with_fresh_budget() {
        let schema = Schema::new(chain(&["a", "b", "c", "d", "e", "f"], Shape::number()));
        let config = PathConfig::default().with_depth(2);

        let root = paths(&schema, &config).unwrap().to_strings();
        assert!(root.contains("a.b.**"));
        assert!(!root.contains("a.b.c"));

        let set = paths_from_offset(&schema, "a.b.c.d.e", &config).unwrap();
        let strings: Vec<String> = set.to_strings().into_iter().collect();
        assert_eq!(strings, vec!["a.b.c.d.e", "a.b.c.d.e.f"]);
    }

    #[test]
    fn test_offset_through_recursive_shape() {
        let schema = node_schema();
        let config = PathConfig::default().with_depth(1);
        let offset = "parent.parent.parent.parent.na";
        let set = paths_from_offset(&schema, offset, &config).unwrap();
        assert!(set.contains("parent.parent.parent.parent.name"));
        assert!(set.contains("parent.parent.parent.parent.parent"));
        assert!(!set.contains("name"));
    }

    #[test]
    fn test_unresolvable_offset_falls_back_to_root() {
        let schema = Schema::new(chain(&["a", "b"], Shape::string()));
        let config = PathConfig::default();
        assert_eq!(
            paths_from_offset(&schema, "nope.x.y", &config).unwrap(),
            paths(&schema, &config).unwrap()
        );
    }

    #[test]
    fn test_offset_respects_only_writeable() {
        let schema = Schema::new(Shape::object(vec![Field::new(
            "a",
            Shape::object(vec![
                Field::new("id", Shape::number()).readonly(),
                Field::new("label", Shape::string()),
            ]),
        )]));
        let set = paths_from_offset(&schema, "a.x", &PathConfig::default().writable()).unwrap();
        let strings: Vec<String> = set.to_strings().into_iter().collect();
        assert_eq!(strings, vec!["a.label"]);
    }
}
