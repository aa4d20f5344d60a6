//! Path enumeration: every valid path into a shape, up to a depth.

use crate::classify::{ShapeKind, classify};
use crate::depth::{DepthBudget, PathConfig};
use crate::error::Result;
use crate::path::{PathPattern, PathSet, PatternSegment};
use crate::schema::Schema;
use crate::shape::{Field, IndexSignature, KeyKind, Shape};

/// Enumerate every path into the schema's root with a fresh budget.
///
/// # Examples
///
/// ```
/// use dotpath::v1::{Field, PathConfig, Schema, Shape, paths};
///
/// let schema = Schema::new(Shape::object(vec![
///     Field::new("a", Shape::string()),
///     Field::new("b", Shape::object(vec![Field::new("c", Shape::number())])),
/// ]));
///
/// let set = paths(&schema, &PathConfig::default()).unwrap();
/// let strings: Vec<String> = set.to_strings().into_iter().collect();
/// assert_eq!(strings, vec!["a", "b", "b.c"]);
/// ```
pub fn paths(schema: &Schema, config: &PathConfig) -> Result<PathSet> {
    config.validate()?;
    Ok(enumerate(
        schema,
        &schema.root,
        DepthBudget::fresh(config),
        config,
    ))
}

/// Enumerate the paths reachable from `shape` within `budget` levels.
///
/// When the budget runs out at a shape that could still be traversed, the
/// result holds a trailing `**` pattern instead of recursing further.
pub fn enumerate(
    schema: &Schema,
    shape: &Shape,
    budget: DepthBudget,
    config: &PathConfig,
) -> PathSet {
    let kind = classify(schema, shape);

    if kind.is_terminal() {
        return PathSet::new();
    }
    if kind.is_any() {
        return rest();
    }
    if budget.is_exhausted() {
        tracing::trace!("depth exhausted at {}", shape);
        return rest();
    }

    match kind {
        ShapeKind::Nullable(members) | ShapeKind::Union(members) => members
            .iter()
            .flat_map(|m| enumerate(schema, m, budget, config))
            .collect(),
        ShapeKind::Array { element, readonly } => {
            let mut out = PathSet::new();
            if !(config.only_writeable && readonly) {
                out.insert(PathPattern::single(PatternSegment::AnyIndex));
            }
            out.extend(nested(
                schema,
                element,
                PatternSegment::AnyIndex,
                budget,
                config,
            ));
            out
        }
        ShapeKind::Tuple { elements, readonly } => {
            let mut out = PathSet::new();
            for (i, element) in elements.iter().enumerate() {
                if !(config.only_writeable && readonly) {
                    out.insert(PathPattern::single(PatternSegment::Index(i)));
                }
                out.extend(nested(
                    schema,
                    element,
                    PatternSegment::Index(i),
                    budget,
                    config,
                ));
            }
            out
        }
        ShapeKind::Indexed { fields, index } => {
            let mut out = field_paths(schema, fields, budget, config);
            out.extend(index_paths(schema, index, budget, config));
            out
        }
        ShapeKind::Struct { fields } => field_paths(schema, fields, budget, config),
        ShapeKind::Any | ShapeKind::Unknown | ShapeKind::Never | ShapeKind::Primitive => {
            PathSet::new()
        }
    }
}

fn rest() -> PathSet {
    [PathPattern::single(PatternSegment::Rest)]
        .into_iter()
        .collect()
}

/// `head.p` for every `p` below `shape`, one level down.
fn nested(
    schema: &Schema,
    shape: &Shape,
    head: PatternSegment,
    budget: DepthBudget,
    config: &PathConfig,
) -> impl Iterator<Item = PathPattern> {
    enumerate(schema, shape, budget.descend(), config)
        .into_iter()
        .map(move |p| p.prefixed(head.clone()))
}

fn field_paths(
    schema: &Schema,
    fields: &[Field],
    budget: DepthBudget,
    config: &PathConfig,
) -> PathSet {
    let mut out = PathSet::new();
    for field in fields.iter().filter(|f| f.is_addressable()) {
        let key = PatternSegment::Key(field.name.clone());
        if !config.only_writeable || field.is_writable() {
            out.insert(PathPattern::single(key.clone()));
        }
        out.extend(nested(schema, &field.shape, key, budget, config));
    }
    out
}

fn index_paths(
    schema: &Schema,
    index: &IndexSignature,
    budget: DepthBudget,
    config: &PathConfig,
) -> PathSet {
    let key = if index.accepts_strings() {
        PatternSegment::AnyKey
    } else if index.keys.contains(&KeyKind::Number) {
        PatternSegment::AnyIndex
    } else {
        // symbol-only signatures have no textual keys
        return PathSet::new();
    };

    let mut out = PathSet::new();
    if !(config.only_writeable && index.readonly) {
        out.insert(PathPattern::single(key.clone()));
    }
    out.extend(nested(schema, &index.value, key, budget, config));
    out
}
