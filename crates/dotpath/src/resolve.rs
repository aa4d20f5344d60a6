//! Value resolution: the shape found at a concrete path.

use serde::{Deserialize, Serialize};

use crate::classify::{ShapeKind, classify, strip_nullish};
use crate::depth::{DepthBudget, RESOLVE_DEPTH};
use crate::error::{Error, Result};
use crate::path::{parse_index, segments};
use crate::schema::Schema;
use crate::shape::{Field, IndexSignature, Shape};

/// Which kinds of uncertainty add `undefined` to a resolved shape.
///
/// [`ResolveConfig::get`] (the default) is pessimistic: every access that
/// might miss at runtime adds the absence marker. [`ResolveConfig::set`] is
/// optimistic, since a writer asserts the path exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// A segment defined on only some union members.
    pub no_unchecked_union_access: bool,
    /// Array elements and index-signature values.
    pub no_unchecked_index_access: bool,
    /// Continuing through an optional or nullable value.
    pub no_unchecked_optional_access: bool,
}

impl ResolveConfig {
    pub fn get() -> Self {
        Self {
            no_unchecked_union_access: true,
            no_unchecked_index_access: true,
            no_unchecked_optional_access: true,
        }
    }

    pub fn set() -> Self {
        Self {
            no_unchecked_union_access: false,
            no_unchecked_index_access: false,
            no_unchecked_optional_access: false,
        }
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self::get()
    }
}

/// Resolve `path` from the schema root.
///
/// # Examples
///
/// ```
/// use dotpath::v1::{Field, ResolveConfig, Schema, Shape, path_value};
///
/// let schema = Schema::new(Shape::object(vec![Field::new(
///     "array",
///     Shape::array(Shape::object(vec![Field::new("a", Shape::string())])),
/// )]));
///
/// let read = path_value(&schema, "array.0.a", &ResolveConfig::get()).unwrap();
/// assert_eq!(read.to_string(), "string | undefined");
///
/// let write = path_value(&schema, "array.0.a", &ResolveConfig::set()).unwrap();
/// assert_eq!(write.to_string(), "string");
///
/// assert!(path_value(&schema, "array.x", &ResolveConfig::get()).is_err());
/// ```
pub fn path_value(schema: &Schema, path: &str, config: &ResolveConfig) -> Result<Shape> {
    resolve(
        schema,
        &schema.root,
        path,
        DepthBudget::new(RESOLVE_DEPTH),
        config,
    )
}

/// Resolve `path` against `shape` within `budget` levels.
///
/// Returns [`Error::InvalidPath`] when no branch of the shape defines the
/// path. Running out of budget yields `unknown` rather than an error.
pub fn resolve(
    schema: &Schema,
    shape: &Shape,
    path: &str,
    budget: DepthBudget,
    config: &ResolveConfig,
) -> Result<Shape> {
    resolve_segments(schema, shape, &segments(path), budget, config)
        .ok_or_else(|| Error::InvalidPath(path.to_string()))
}

/// `None` means the path does not exist on this branch.
pub(crate) fn resolve_segments(
    schema: &Schema,
    shape: &Shape,
    segs: &[&str],
    budget: DepthBudget,
    config: &ResolveConfig,
) -> Option<Shape> {
    let Some((first, rest)) = segs.split_first() else {
        return Some(shape.clone());
    };
    if budget.is_exhausted() {
        return Some(Shape::Unknown);
    }

    match classify(schema, shape) {
        ShapeKind::Any => Some(Shape::Any),
        ShapeKind::Unknown => Some(Shape::Unknown),
        ShapeKind::Never | ShapeKind::Primitive => None,
        ShapeKind::Nullable(_) => {
            let stripped = strip_nullish(schema, shape);
            let value = resolve_segments(schema, &stripped, segs, budget, config)?;
            Some(mark(value, config.no_unchecked_optional_access))
        }
        ShapeKind::Tuple { elements, .. } => {
            let element = elements.get(parse_index(first)?)?;
            resolve_segments(schema, element, rest, budget.descend(), config)
        }
        ShapeKind::Array { element, .. } => {
            parse_index(first)?;
            let value = resolve_segments(schema, element, rest, budget.descend(), config)?;
            Some(mark(value, config.no_unchecked_index_access))
        }
        ShapeKind::Indexed { fields, index } => match find_field(fields, first) {
            Some(field) => resolve_field(schema, field, rest, budget, config),
            None => resolve_index(schema, index, first, rest, budget, config),
        },
        ShapeKind::Struct { fields } => {
            resolve_field(schema, find_field(fields, first)?, rest, budget, config)
        }
        ShapeKind::Union(members) => resolve_union(schema, members, segs, budget, config),
    }
}

fn mark(value: Shape, uncertain: bool) -> Shape {
    if uncertain { value.or_undefined() } else { value }
}

fn find_field<'a>(fields: &'a [Field], name: &str) -> Option<&'a Field> {
    fields
        .iter()
        .find(|f| f.is_addressable() && f.name == name)
}

fn resolve_field(
    schema: &Schema,
    field: &Field,
    rest: &[&str],
    budget: DepthBudget,
    config: &ResolveConfig,
) -> Option<Shape> {
    if !field.optional {
        return resolve_segments(schema, &field.shape, rest, budget.descend(), config);
    }
    if rest.is_empty() {
        // the declared type of an optional field includes undefined
        return Some(field.shape.clone().or_undefined());
    }
    let present = strip_nullish(schema, &field.shape);
    let value = resolve_segments(schema, &present, rest, budget.descend(), config)?;
    Some(mark(value, config.no_unchecked_optional_access))
}

fn resolve_index(
    schema: &Schema,
    index: &IndexSignature,
    key: &str,
    rest: &[&str],
    budget: DepthBudget,
    config: &ResolveConfig,
) -> Option<Shape> {
    let accepted =
        index.accepts_strings() || (index.accepts_numbers() && parse_index(key).is_some());
    if !accepted {
        return None;
    }
    let value = resolve_segments(schema, &index.value, rest, budget.descend(), config)?;
    Some(mark(value, config.no_unchecked_index_access))
}

/// Per-member resolution. Members lacking the first segment contribute
/// nothing but make the result possibly absent; `never` members hold no
/// value and are skipped.
fn resolve_union(
    schema: &Schema,
    members: &[Shape],
    segs: &[&str],
    budget: DepthBudget,
    config: &ResolveConfig,
) -> Option<Shape> {
    let first = &segs[..1];
    let mut inhabited = 0;
    let mut defined = 0;
    let mut values = Vec::new();

    for member in members {
        if classify(schema, member).is_never() {
            continue;
        }
        inhabited += 1;
        if resolve_segments(schema, member, first, budget, config).is_none() {
            continue;
        }
        defined += 1;
        if let Some(value) = resolve_segments(schema, member, segs, budget, config) {
            values.push(value);
        }
    }

    if values.is_empty() {
        return None;
    }
    Some(mark(
        Shape::union(values),
        defined < inhabited && config.no_unchecked_union_access,
    ))
}
