#![doc = include_str!("../README.md")]

mod access;
mod classify;
mod depth;
mod enumerate;
mod error;
mod offset;
mod path;
mod resolve;
mod schema;
mod shape;
mod table;

pub mod v1 {
    //! Versioned public API for shapes, paths, and accessors.
    //!
    //! Everything you need is re-exported from this module. It is organized
    //! into four groups:
    //!
    //! # Describing data
    //!
    //! - [`Shape`] — structural description of a value's type
    //! - [`Field`], [`IndexSignature`], [`KeyKind`], [`Primitive`] — its parts
    //! - [`Schema`] — a root shape plus named definitions for `$ref`s
    //!
    //! # Enumerating paths
    //!
    //! - [`paths`] / [`enumerate`] — every valid path, up to a depth
    //! - [`paths_from_offset`] — continue enumeration after a partial path
    //! - [`PathConfig`], [`DepthBudget`] — depth and writability controls
    //! - [`PathSet`], [`PathPattern`], [`PatternSegment`] — the results
    //!
    //! # Resolving value types
    //!
    //! - [`path_value`] / [`resolve`] — the shape found at a path
    //! - [`ResolveConfig`] — when to add the `undefined` absence marker
    //!
    //! # Accessing data
    //!
    //! - [`get`] / [`set`] — unchecked accessors over `serde_json::Value`
    //! - [`PathTable`] — a compiled schema that checks paths before access
    //!
    //! # Example
    //!
    //! ```
    //! use dotpath::v1::*;
    //! use serde_json::json;
    //!
    //! let schema = Schema::new(Shape::object(vec![
    //!     Field::new("a", Shape::string()),
    //!     Field::new("b", Shape::object(vec![Field::new("c", Shape::number())])),
    //!     Field::new(
    //!         "f",
    //!         Shape::tuple(vec![
    //!             Shape::object(vec![Field::new("g", Shape::string())]),
    //!             Shape::object(vec![Field::new("g", Shape::string())]),
    //!         ]),
    //!     ),
    //! ]));
    //!
    //! let set = paths(&schema, &PathConfig::default()).unwrap();
    //! assert_eq!(set.len(), 8);
    //! assert!(set.contains("f.1.g"));
    //!
    //! let ty = path_value(&schema, "f.1.g", &ResolveConfig::get()).unwrap();
    //! assert_eq!(ty, Shape::string());
    //!
    //! let data = json!({ "a": "x", "b": { "c": 1 }, "f": [{ "g": "p" }, { "g": "q" }] });
    //! assert_eq!(get(&data, "f.1.g"), Some(&json!("q")));
    //! ```
    pub use crate::access::{ValueKind, get, set};
    pub use crate::classify::{
        ShapeKind, classify, is_nullable_or_optional, is_nullish, strip_nullish,
    };
    pub use crate::depth::{DEFAULT_DEPTH, DepthBudget, PathConfig, RESOLVE_DEPTH};
    pub use crate::enumerate::{enumerate, paths};
    pub use crate::error::{Error, Result};
    pub use crate::offset::paths_from_offset;
    pub use crate::path::{
        PathPattern, PathSet, PatternSegment, SEPARATOR, join, parse_index, segments,
    };
    pub use crate::resolve::{ResolveConfig, path_value, resolve};
    pub use crate::schema::Schema;
    pub use crate::shape::{Field, IndexSignature, KeyKind, Primitive, Shape};
    pub use crate::table::PathTable;
}
