use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{Error, Result};
use crate::shape::Shape;

/// A root [`Shape`] plus the named definitions its `$ref`s point at.
///
/// Definitions are how self-referential shapes are expressed:
///
/// ```
/// use dotpath::v1::{Field, Schema, Shape};
///
/// let node = Shape::object(vec![
///     Field::new("value", Shape::number()),
///     Field::new("parent", Shape::reference("Node")).optional(),
/// ]);
/// let schema = Schema::new(Shape::reference("Node")).with_definition("Node", node);
/// assert!(schema.validate().is_ok());
/// ```
///
/// # JSON shape
///
/// ```json
/// {
///   "root": { "kind": "ref", "$ref": "Node" },
///   "definitions": {
///     "Node": { "kind": "struct", "fields": [ … ] }
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub root: Shape,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub definitions: BTreeMap<String, Shape>,
}

impl Schema {
    pub fn new(root: Shape) -> Self {
        Self {
            root,
            definitions: BTreeMap::new(),
        }
    }

    pub fn with_definition(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.definitions.insert(name.into(), shape);
        self
    }

    /// Parse and validate a schema from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Follow `$ref` links until a concrete shape is reached.
    pub fn deref<'a>(&'a self, shape: &'a Shape) -> Result<&'a Shape> {
        let mut current = shape;
        let mut seen: HashSet<&str> = HashSet::new();
        while let Shape::Ref { name } = current {
            if !seen.insert(name.as_str()) {
                return Err(Error::RefCycle(name.clone()));
            }
            current = self
                .definitions
                .get(name)
                .ok_or_else(|| Error::UnknownRef(name.clone()))?;
        }
        Ok(current)
    }

    /// Check that every `$ref` names a definition and that no chain of
    /// references loops without passing through a field, element, or index
    /// value. A reference reached again through union members alone (as in
    /// `A = A | string`) is a cycle.
    pub fn validate(&self) -> Result<()> {
        let mut refs = Vec::new();
        collect_refs(&self.root, &mut refs);
        for shape in self.definitions.values() {
            collect_refs(shape, &mut refs);
        }
        for shape in refs {
            self.deref(shape)?;
        }

        self.check_union_cycles(&self.root, &mut Vec::new())?;
        for shape in self.definitions.values() {
            self.check_union_cycles(shape, &mut Vec::new())?;
        }
        Ok(())
    }

    fn check_union_cycles<'a>(&'a self, shape: &'a Shape, visiting: &mut Vec<&'a str>) -> Result<()> {
        match shape {
            Shape::Ref { name } => {
                if visiting.contains(&name.as_str()) {
                    return Err(Error::RefCycle(name.clone()));
                }
                let target = self
                    .definitions
                    .get(name)
                    .ok_or_else(|| Error::UnknownRef(name.clone()))?;
                visiting.push(name);
                let result = self.check_union_cycles(target, visiting);
                visiting.pop();
                result
            }
            Shape::Union { members } => members
                .iter()
                .try_for_each(|m| self.check_union_cycles(m, visiting)),
            _ => Ok(()),
        }
    }
}

fn collect_refs<'a>(shape: &'a Shape, out: &mut Vec<&'a Shape>) {
    match shape {
        Shape::Ref { .. } => out.push(shape),
        Shape::Array { element, .. } => collect_refs(element, out),
        Shape::Tuple { elements, .. } => elements.iter().for_each(|e| collect_refs(e, out)),
        Shape::Record(sig) => collect_refs(&sig.value, out),
        Shape::Struct { fields, index } => {
            for field in fields {
                collect_refs(&field.shape, out);
            }
            if let Some(sig) = index {
                collect_refs(&sig.value, out);
            }
        }
        Shape::Union { members } => members.iter().for_each(|m| collect_refs(m, out)),
        Shape::Primitive { .. }
        | Shape::Literal { .. }
        | Shape::Any
        | Shape::Unknown
        | Shape::Never => {}
    }
}
