use serde::{Deserialize, Serialize};
use std::fmt;

/// A structural description of a value's type.
///
/// `Shape` is internally tagged: every JSON object carries a `"kind"` key
/// naming the variant. Self-referential shapes are written with
/// [`Shape::Ref`], which names an entry in the enclosing
/// [`Schema`](crate::schema::Schema)'s definitions.
///
/// # JSON shape
///
/// ```json
/// {
///   "kind": "struct",
///   "fields": [
///     { "name": "id", "type": { "kind": "primitive", "type": "number" }, "readonly": true },
///     { "name": "tags", "type": { "kind": "array", "element": { "kind": "primitive", "type": "string" } } },
///     { "name": "parent", "type": { "kind": "ref", "$ref": "Node" }, "optional": true }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Primitive {
        #[serde(rename = "type")]
        primitive: Primitive,
    },
    /// A single literal value, e.g. the `'a'` in `['a', 'b']`.
    Literal { value: serde_json::Value },
    Any,
    Unknown,
    Never,
    /// Dynamic-length, homogeneous sequence.
    Array {
        element: Box<Shape>,
        #[serde(default, skip_serializing_if = "is_false")]
        readonly: bool,
    },
    /// Fixed-length sequence with independently typed positions.
    Tuple {
        elements: Vec<Shape>,
        #[serde(default, skip_serializing_if = "is_false")]
        readonly: bool,
    },
    /// A pure index signature (`Record<K, V>`).
    Record(IndexSignature),
    /// Named fields, optionally alongside an index signature.
    Struct {
        #[serde(default)]
        fields: Vec<Field>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<IndexSignature>,
    },
    Union { members: Vec<Shape> },
    /// Reference to a named definition.
    Ref {
        #[serde(rename = "$ref")]
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Undefined,
    Null,
}

/// Key type accepted by an index signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    String,
    Number,
    Symbol,
}

/// Index signature: arbitrary keys of the given kinds mapping to `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexSignature {
    pub keys: Vec<KeyKind>,
    pub value: Box<Shape>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
}

/// A named field of a [`Shape::Struct`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub readonly: bool,
    /// Symbol-keyed field; `name` is only a description.
    #[serde(default, skip_serializing_if = "is_false")]
    pub symbol: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

// ============================================================================
// Constructors
// ============================================================================

impl Shape {
    pub fn primitive(primitive: Primitive) -> Self {
        Shape::Primitive { primitive }
    }

    pub fn string() -> Self {
        Self::primitive(Primitive::String)
    }

    pub fn number() -> Self {
        Self::primitive(Primitive::Number)
    }

    pub fn boolean() -> Self {
        Self::primitive(Primitive::Boolean)
    }

    pub fn bigint() -> Self {
        Self::primitive(Primitive::BigInt)
    }

    pub fn symbol() -> Self {
        Self::primitive(Primitive::Symbol)
    }

    pub fn undefined() -> Self {
        Self::primitive(Primitive::Undefined)
    }

    pub fn null() -> Self {
        Self::primitive(Primitive::Null)
    }

    pub fn literal(value: impl Into<serde_json::Value>) -> Self {
        Shape::Literal {
            value: value.into(),
        }
    }

    pub fn array(element: Shape) -> Self {
        Shape::Array {
            element: Box::new(element),
            readonly: false,
        }
    }

    pub fn readonly_array(element: Shape) -> Self {
        Shape::Array {
            element: Box::new(element),
            readonly: true,
        }
    }

    pub fn tuple(elements: Vec<Shape>) -> Self {
        Shape::Tuple {
            elements,
            readonly: false,
        }
    }

    pub fn readonly_tuple(elements: Vec<Shape>) -> Self {
        Shape::Tuple {
            elements,
            readonly: true,
        }
    }

    pub fn record(keys: Vec<KeyKind>, value: Shape) -> Self {
        Shape::Record(IndexSignature::new(keys, value))
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Shape::Struct {
            fields,
            index: None,
        }
    }

    /// A struct whose named fields sit alongside an index signature.
    pub fn object_with_index(fields: Vec<Field>, index: IndexSignature) -> Self {
        Shape::Struct {
            fields,
            index: Some(index),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Shape::Ref { name: name.into() }
    }

    /// `shape | null`
    pub fn nullable(shape: Shape) -> Self {
        Self::union([shape, Shape::null()])
    }

    /// Build a normalized union.
    ///
    /// Nested unions are flattened, duplicates and `never` members dropped,
    /// and `any`/`unknown` absorb everything else. An empty union is `never`
    /// and a single member is returned as itself.
    pub fn union(members: impl IntoIterator<Item = Shape>) -> Self {
        let mut flat: Vec<Shape> = Vec::new();
        let mut saw_unknown = false;

        for member in members {
            let nested = match member {
                Shape::Union { members } => members,
                other => vec![other],
            };
            for m in nested {
                match m {
                    Shape::Any => return Shape::Any,
                    Shape::Unknown => saw_unknown = true,
                    Shape::Never => {}
                    other => {
                        if !flat.contains(&other) {
                            flat.push(other);
                        }
                    }
                }
            }
        }

        if saw_unknown {
            return Shape::Unknown;
        }
        match flat.len() {
            0 => Shape::Never,
            1 => flat.remove(0),
            _ => Shape::Union { members: flat },
        }
    }

    /// `self | undefined`, the absence marker.
    pub fn or_undefined(self) -> Self {
        Self::union([self, Shape::undefined()])
    }

    /// Whether `undefined` is one of this shape's top-level members.
    pub fn includes_undefined(&self) -> bool {
        match self {
            Shape::Primitive {
                primitive: Primitive::Undefined,
            } => true,
            Shape::Union { members } => members.iter().any(|m| m.includes_undefined()),
            _ => false,
        }
    }

    /// Parse a shape from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl IndexSignature {
    pub fn new(keys: Vec<KeyKind>, value: Shape) -> Self {
        Self {
            keys,
            value: Box::new(value),
            readonly: false,
        }
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    pub fn accepts_strings(&self) -> bool {
        self.keys.contains(&KeyKind::String)
    }

    /// Numeric keys are accepted by both `number` and `string` signatures.
    pub fn accepts_numbers(&self) -> bool {
        self.keys.contains(&KeyKind::Number) || self.accepts_strings()
    }
}

impl Field {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
            optional: false,
            readonly: false,
            symbol: false,
        }
    }

    /// A symbol-keyed field. `description` is for display only.
    pub fn symbol(description: impl Into<String>, shape: Shape) -> Self {
        Self {
            symbol: true,
            ..Self::new(description, shape)
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }
}

// ============================================================================
// Display
// ============================================================================

/// TypeScript-like notation, e.g. `{ a: string; readonly b?: number[] }`.
impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Primitive { primitive } => write!(f, "{}", primitive),
            Shape::Literal { value } => match value {
                serde_json::Value::String(s) => write!(f, "'{}'", s),
                other => write!(f, "{}", other),
            },
            Shape::Any => write!(f, "any"),
            Shape::Unknown => write!(f, "unknown"),
            Shape::Never => write!(f, "never"),
            Shape::Array { element, readonly } => {
                if *readonly {
                    write!(f, "readonly ")?;
                }
                if matches!(**element, Shape::Union { .. }) {
                    write!(f, "({})[]", element)
                } else {
                    write!(f, "{}[]", element)
                }
            }
            Shape::Tuple { elements, readonly } => {
                if *readonly {
                    write!(f, "readonly ")?;
                }
                write!(f, "[")?;
                for (i, e) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, "]")
            }
            Shape::Record(sig) => write!(f, "{{ {} }}", IndexDisplay(sig)),
            Shape::Struct { fields, index } => {
                if fields.is_empty() && index.is_none() {
                    return write!(f, "{{}}");
                }
                let mut parts: Vec<String> = fields.iter().map(|fd| fd.to_string()).collect();
                if let Some(sig) = index {
                    parts.push(IndexDisplay(sig).to_string());
                }
                write!(f, "{{ {} }}", parts.join("; "))
            }
            Shape::Union { members } => {
                let parts: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "{}", parts.join(" | "))
            }
            Shape::Ref { name } => write!(f, "{}", name),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::BigInt => "bigint",
            Primitive::Symbol => "symbol",
            Primitive::Undefined => "undefined",
            Primitive::Null => "null",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::String => write!(f, "string"),
            KeyKind::Number => write!(f, "number"),
            KeyKind::Symbol => write!(f, "symbol"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.readonly {
            write!(f, "readonly ")?;
        }
        if self.symbol {
            write!(f, "[{}]", self.name)?;
        } else {
            write!(f, "{}", self.name)?;
        }
        if self.optional {
            write!(f, "?")?;
        }
        write!(f, ": {}", self.shape)
    }
}

struct IndexDisplay<'a>(&'a IndexSignature);

impl fmt::Display for IndexDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sig = self.0;
        if sig.readonly {
            write!(f, "readonly ")?;
        }
        let keys: Vec<String> = sig.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "[key: {}]: {}", keys.join(" | "), sig.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_flattens_and_dedupes() {
        let u = Shape::union([
            Shape::string(),
            Shape::union([Shape::number(), Shape::string()]),
            Shape::Never,
        ]);
        assert_eq!(
            u,
            Shape::Union {
                members: vec![Shape::string(), Shape::number()]
            }
        );
    }

    #[test]
    fn test_union_edge_cases() {
        assert_eq!(Shape::union([]), Shape::Never);
        assert_eq!(Shape::union([Shape::string()]), Shape::string());
        assert_eq!(Shape::union([Shape::string(), Shape::Any]), Shape::Any);
        assert_eq!(
            Shape::union([Shape::string(), Shape::Unknown]),
            Shape::Unknown
        );
        assert_eq!(Shape::union([Shape::Never, Shape::Never]), Shape::Never);
    }

    #[test]
    fn test_or_undefined_is_idempotent() {
        let once = Shape::string().or_undefined();
        let twice = once.clone().or_undefined();
        assert_eq!(once, twice);
        assert!(once.includes_undefined());
        assert!(!Shape::string().includes_undefined());
    }

    #[test]
    fn test_display() {
        let shape = Shape::object(vec![
            Field::new("a", Shape::string()),
            Field::new("b", Shape::array(Shape::number())).optional().readonly(),
            Field::new("c", Shape::tuple(vec![Shape::literal("x"), Shape::literal(1)])),
            Field::symbol("Symbol.iterator", Shape::Any),
        ]);
        assert_eq!(
            shape.to_string(),
            "{ a: string; readonly b?: number[]; c: ['x', 1]; [Symbol.iterator]: any }"
        );
        assert_eq!(
            Shape::readonly_array(Shape::nullable(Shape::string())).to_string(),
            "readonly (string | null)[]"
        );
        assert_eq!(
            Shape::record(vec![KeyKind::String, KeyKind::Number], Shape::boolean()).to_string(),
            "{ [key: string | number]: boolean }"
        );
        assert_eq!(Shape::object(vec![]).to_string(), "{}");
    }

    #[test]
    fn test_json_roundtrip_of_nested_shape() {
        let json = r#"{
            "kind": "struct",
            "fields": [
                { "name": "id", "type": { "kind": "primitive", "type": "number" }, "readonly": true },
                { "name": "parent", "type": { "kind": "ref", "$ref": "Node" }, "optional": true },
                { "name": "meta", "type": { "kind": "record", "keys": ["string"], "value": { "kind": "unknown" } } }
            ]
        }"#;
        let shape = Shape::from_json(json).unwrap();
        let Shape::Struct { fields, index } = &shape else {
            panic!("expected struct, got {shape:?}");
        };
        assert!(index.is_none());
        assert_eq!(fields.len(), 3);
        assert!(fields[0].readonly);
        assert!(fields[1].optional);
        assert_eq!(fields[1].shape, Shape::reference("Node"));
        assert_eq!(
            fields[2].shape,
            Shape::record(vec![KeyKind::String], Shape::Unknown)
        );

        let back = Shape::from_json(&shape.to_json().unwrap()).unwrap();
        assert_eq!(back, shape);
    }
}
