//! Shape classification.
//!
//! Classification is ordered: `any` before `unknown` before `never` before
//! everything else. `unknown` accepts every value and `never` accepts none,
//! so testing them out of order miscategorizes shapes.

use crate::schema::Schema;
use crate::shape::{Field, IndexSignature, Primitive, Shape};

/// What a shape looks like to the path machinery, with `$ref`s followed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind<'a> {
    Any,
    Unknown,
    Never,
    /// Primitive or literal: no further segments.
    Primitive,
    /// A union that admits `null` or `undefined` alongside other members.
    Nullable(&'a [Shape]),
    Tuple {
        elements: &'a [Shape],
        readonly: bool,
    },
    Array {
        element: &'a Shape,
        readonly: bool,
    },
    /// Record, or struct with an index signature.
    Indexed {
        fields: &'a [Field],
        index: &'a IndexSignature,
    },
    Struct {
        fields: &'a [Field],
    },
    Union(&'a [Shape]),
}

/// Classify `shape`, dereferencing it against `schema` first.
///
/// A dangling or cyclic `$ref` classifies as `never`; [`Schema::validate`]
/// rejects such schemas up front.
pub fn classify<'a>(schema: &'a Schema, shape: &'a Shape) -> ShapeKind<'a> {
    let shape = match schema.deref(shape) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("treating unresolvable shape as never: {}", e);
            return ShapeKind::Never;
        }
    };

    match shape {
        Shape::Any => ShapeKind::Any,
        Shape::Unknown => ShapeKind::Unknown,
        Shape::Never => ShapeKind::Never,
        Shape::Primitive { .. } | Shape::Literal { .. } => ShapeKind::Primitive,
        Shape::Union { members } => classify_union(schema, members),
        Shape::Tuple { elements, readonly } => ShapeKind::Tuple {
            elements,
            readonly: *readonly,
        },
        Shape::Array { element, readonly } => ShapeKind::Array {
            element,
            readonly: *readonly,
        },
        Shape::Record(index) => ShapeKind::Indexed { fields: &[], index },
        Shape::Struct {
            fields,
            index: Some(index),
        } => ShapeKind::Indexed { fields, index },
        Shape::Struct {
            fields,
            index: None,
        } => ShapeKind::Struct { fields },
        // deref never yields a ref
        Shape::Ref { .. } => ShapeKind::Never,
    }
}

fn classify_union<'a>(schema: &'a Schema, members: &'a [Shape]) -> ShapeKind<'a> {
    let kinds: Vec<ShapeKind<'a>> = members.iter().map(|m| classify(schema, m)).collect();

    if kinds.contains(&ShapeKind::Any) {
        return ShapeKind::Any;
    }
    if kinds.contains(&ShapeKind::Unknown) {
        return ShapeKind::Unknown;
    }
    if kinds.iter().all(|k| *k == ShapeKind::Never) {
        return ShapeKind::Never;
    }

    let inhabited = kinds.iter().filter(|k| !k.is_never()).count();
    let nullish = members.iter().filter(|m| is_nullish(schema, m)).count();
    if nullish > 0 && nullish < inhabited {
        ShapeKind::Nullable(members)
    } else if kinds
        .iter()
        .all(|k| matches!(k, ShapeKind::Primitive | ShapeKind::Never))
    {
        ShapeKind::Primitive
    } else {
        ShapeKind::Union(members)
    }
}

/// Whether `shape` is exactly `null` or `undefined`.
pub fn is_nullish(schema: &Schema, shape: &Shape) -> bool {
    matches!(
        schema.deref(shape),
        Ok(Shape::Primitive {
            primitive: Primitive::Null | Primitive::Undefined
        })
    )
}

/// Drop `null` and `undefined` members from a union.
pub fn strip_nullish(schema: &Schema, shape: &Shape) -> Shape {
    match schema.deref(shape) {
        Ok(Shape::Union { members }) => Shape::union(
            members
                .iter()
                .filter(|m| !is_nullish(schema, m))
                .map(|m| strip_nullish(schema, m)),
        ),
        Ok(s) if is_nullish(schema, s) => Shape::Never,
        _ => shape.clone(),
    }
}

/// Whether a value of this shape may be `null` or absent.
pub fn is_nullable_or_optional(schema: &Schema, shape: &Shape) -> bool {
    match schema.deref(shape) {
        Ok(Shape::Union { members }) => members
            .iter()
            .any(|m| is_nullish(schema, m) || is_nullable_or_optional(schema, m)),
        Ok(s) => is_nullish(schema, s),
        Err(_) => false,
    }
}

impl ShapeKind<'_> {
    pub fn is_any(&self) -> bool {
        matches!(self, ShapeKind::Any)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ShapeKind::Unknown)
    }

    pub fn is_never(&self) -> bool {
        matches!(self, ShapeKind::Never)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ShapeKind::Primitive)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ShapeKind::Array { .. })
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, ShapeKind::Tuple { .. })
    }

    pub fn has_index_signature(&self) -> bool {
        matches!(self, ShapeKind::Indexed { .. })
    }

    /// Shapes past which no path can continue.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ShapeKind::Primitive | ShapeKind::Never | ShapeKind::Unknown
        )
    }
}

impl Field {
    /// Field names containing the separator can never be addressed, and
    /// symbol keys have no textual form.
    pub fn is_addressable(&self) -> bool {
        !self.symbol && !self.name.contains(crate::path::SEPARATOR)
    }

    pub fn is_writable(&self) -> bool {
        !self.readonly
    }
}
