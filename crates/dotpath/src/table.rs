//! A compiled schema: validated once, then used to check paths at the call
//! site before touching data.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::access;
use crate::depth::PathConfig;
use crate::enumerate::paths;
use crate::error::{Error, Result};
use crate::offset::{paths_from_offset, resolve_head};
use crate::path::{PathSet, segments};
use crate::resolve::{ResolveConfig, path_value};
use crate::schema::Schema;
use crate::shape::Shape;

/// A validated [`Schema`] with cached path sets.
///
/// Checking a path anchors enumeration at the path's own head, so paths
/// deeper than the configured depth are still checked exactly.
///
/// # Examples
///
/// ```
/// use dotpath::v1::{Field, PathConfig, PathTable, Schema, Shape};
/// use serde_json::json;
///
/// let table = PathTable::new(Schema::new(Shape::object(vec![
///     Field::new("id", Shape::number()).readonly(),
///     Field::new("name", Shape::string()),
/// ])))
/// .unwrap();
///
/// let mut data = json!({ "id": 1, "name": "a" });
/// let config = PathConfig::default();
///
/// assert_eq!(table.get(&data, "name", &config).unwrap(), Some(&json!("a")));
/// assert!(table.get(&data, "nickname", &config).is_err());
///
/// table.set(&mut data, "name", json!("b"), &config).unwrap();
/// assert!(table.set(&mut data, "id", json!(2), &config).is_err());
/// ```
#[derive(Debug)]
pub struct PathTable {
    schema: Schema,
    cache: RwLock<HashMap<PathConfig, Arc<PathSet>>>,
}

impl PathTable {
    pub fn new(schema: Schema) -> Result<Self> {
        schema.validate()?;
        Ok(Self {
            schema,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(Schema::from_json(json)?)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// All paths from the root, computed once per configuration.
    pub fn paths(&self, config: &PathConfig) -> Result<Arc<PathSet>> {
        if let Some(set) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(config)
        {
            return Ok(Arc::clone(set));
        }

        let set = Arc::new(paths(&self.schema, config)?);
        tracing::debug!(
            "enumerated {} paths (depth {}, writable only: {})",
            set.len(),
            config.depth,
            config.only_writeable
        );
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(*config, Arc::clone(&set));
        Ok(set)
    }

    /// Paths continuing from `offset`; see [`paths_from_offset`].
    pub fn completions(&self, offset: &str, config: &PathConfig) -> Result<PathSet> {
        if segments(offset).len() < 2 {
            return Ok(self.paths(config)?.as_ref().clone());
        }
        paths_from_offset(&self.schema, offset, config)
    }

    /// Reject `path` unless it is a valid path into the schema. The empty
    /// path (the root) is always valid.
    pub fn check(&self, path: &str, config: &PathConfig) -> Result<()> {
        let segs = segments(path);
        let Some((_, head)) = segs.split_last() else {
            return Ok(());
        };
        // completions fall back to the root when the head is unknown, and a
        // truncated `**` there would accept anything below it
        if !head.is_empty() && resolve_head(&self.schema, head).is_none() {
            return Err(Error::InvalidPath(path.to_string()));
        }
        if self.completions(path, config)?.contains(path) {
            Ok(())
        } else {
            Err(Error::InvalidPath(path.to_string()))
        }
    }

    /// Reject `path` unless its final segment can be assigned to.
    pub fn check_writable(&self, path: &str, config: &PathConfig) -> Result<()> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        self.check(path, config)?;
        if self.completions(path, &config.writable())?.contains(path) {
            Ok(())
        } else {
            Err(Error::ReadonlyPath(path.to_string()))
        }
    }

    /// The shape of the value at `path`.
    pub fn value_type(&self, path: &str, config: &ResolveConfig) -> Result<Shape> {
        path_value(&self.schema, path, config)
    }

    /// Checked [`access::get`].
    pub fn get<'a>(
        &self,
        root: &'a Value,
        path: &str,
        config: &PathConfig,
    ) -> Result<Option<&'a Value>> {
        self.check(path, config)?;
        Ok(access::get(root, path))
    }

    /// Checked [`access::set`]; readonly targets are rejected.
    pub fn set(&self, root: &mut Value, path: &str, value: Value, config: &PathConfig) -> Result<()> {
        self.check_writable(path, config)?;
        access::set(root, path, value)
    }
}
