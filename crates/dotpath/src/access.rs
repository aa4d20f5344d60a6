//! Runtime accessors over `serde_json::Value` trees.
//!
//! Only own entries are visible: object keys actually present in the map and
//! in-bounds array indices. Nothing is looked up through any kind of
//! inheritance, so names like `__proto__` or `constructor` resolve only when
//! the data literally contains them.

use serde_json::Value;
use std::fmt;

use crate::error::{Error, Result};
use crate::path::{join, parse_index, segments};

/// The runtime kind of a value, as reported in write errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// No value at all.
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ValueKind::Array | ValueKind::Object)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Undefined => "undefined",
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// Read the value at `path`, or `None` if any segment is missing.
///
/// The empty path returns `root` itself. Never fails: stepping into a
/// primitive, `null`, or a missing key simply yields `None`.
///
/// # Examples
///
/// ```
/// use dotpath::v1::get;
/// use serde_json::json;
///
/// let data = json!({ "a": "x", "b": { "c": 1 }, "f": [{ "g": "p" }, { "g": "q" }] });
/// assert_eq!(get(&data, "f.1.g"), Some(&json!("q")));
/// assert_eq!(get(&data, "b.c.d"), None);
/// assert_eq!(get(&data, ""), Some(&data));
/// ```
pub fn get<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path)
        .into_iter()
        .try_fold(root, |current, segment| child(current, segment))
}

/// Write `value` at `path`.
///
/// Every container up to the parent of the final segment must already
/// exist; none are created. The final segment is assigned on the parent
/// object, or on the parent array when it is an existing index or the index
/// one past the end. On error, `root` is left untouched.
///
/// # Examples
///
/// ```
/// use dotpath::v1::{get, set};
/// use serde_json::json;
///
/// let mut data = json!({ "first": "test", "list": [{ "g": "a" }] });
/// set(&mut data, "list.0.g", json!("b")).unwrap();
/// assert_eq!(get(&data, "list.0.g"), Some(&json!("b")));
///
/// let err = set(&mut data, "first.foo", json!(true)).unwrap_err();
/// assert!(err.to_string().contains("Cannot create property 'foo' on string"));
/// ```
pub fn set(root: &mut Value, path: &str, value: Value) -> Result<()> {
    let segs = segments(path);
    let Some((last, head)) = segs.split_last() else {
        return Err(Error::EmptyPath);
    };

    let mut current = root;
    for (i, segment) in head.iter().enumerate() {
        let kind = ValueKind::of(current);
        if !kind.is_container() {
            return Err(Error::NotAContainer {
                path: join(&segs[..i]),
                key: segment.to_string(),
                kind,
            });
        }
        current = match child_mut(current, segment) {
            Some(next) => next,
            None => {
                return Err(Error::NotAContainer {
                    path: join(&segs[..=i]),
                    key: segs[i + 1].to_string(),
                    kind: ValueKind::Undefined,
                });
            }
        };
    }

    assign(current, head, last, value)
}

fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => items.get(parse_index(key)?),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(key),
        Value::Array(items) => items.get_mut(parse_index(key)?),
        _ => None,
    }
}

fn assign(parent: &mut Value, head: &[&str], key: &str, value: Value) -> Result<()> {
    match parent {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let Some(index) = parse_index(key) else {
                return Err(Error::NotAContainer {
                    path: join(head),
                    key: key.to_string(),
                    kind: ValueKind::Array,
                });
            };
            let len = items.len();
            if index < len {
                items[index] = value;
            } else if index == len {
                items.push(value);
            } else {
                return Err(Error::IndexOutOfBounds {
                    path: join(head),
                    index,
                    len,
                });
            }
            Ok(())
        }
        other => Err(Error::NotAContainer {
            path: join(head),
            key: key.to_string(),
            kind: ValueKind::of(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn readme_object() -> Value {
        json!({
            "a": "hello",
            "b": { "c": 42, "d": { "e": "world" } },
            "f": [{ "g": "array-item-1" }, { "g": "array-item-2" }]
        })
    }

    #[test]
    fn test_get_simple_members() {
        let data = json!({
            "first": "test",
            "second": ["secondTest"],
            "third": { "id": 2, "date": [] }
        });
        assert_eq!(get(&data, "first"), Some(&json!("test")));
        assert_eq!(get(&data, "second.0"), Some(&json!("secondTest")));
        assert_eq!(get(&data, "third.date"), Some(&json!([])));
    }

    #[test]
    fn test_get_nested() {
        let data = readme_object();
        assert_eq!(get(&data, "a"), Some(&json!("hello")));
        assert_eq!(get(&data, "b.c"), Some(&json!(42)));
        assert_eq!(get(&data, "b.d.e"), Some(&json!("world")));
        assert_eq!(get(&data, "f.0"), Some(&json!({ "g": "array-item-1" })));
        assert_eq!(get(&data, "f.1.g"), Some(&json!("array-item-2")));
    }

    #[test]
    fn test_get_returns_none_on_non_objects() {
        let data = json!({ "first": "test", "null": null });
        assert_eq!(get(&data, "first.foo"), None);
        assert_eq!(get(&data, "null.bar"), None);
        assert_eq!(get(&data, "undef.baz"), None);
        assert_eq!(get(&data, "first.0"), None);
    }

    #[test]
    fn test_get_array_bounds() {
        let data = json!({ "array": [] });
        assert_eq!(get(&data, "array.0.a"), None);
        let data = json!({ "array": [1, 2] });
        assert_eq!(get(&data, "array.01"), None);
        assert_eq!(get(&data, "array.-1"), None);
        assert_eq!(get(&data, "array.1"), Some(&json!(2)));
    }

    #[test]
    fn test_empty_path() {
        let data = json!({ "test": "ok" });
        assert_eq!(get(&data, ""), Some(&data));

        let mut data = data;
        assert!(matches!(
            set(&mut data, "", json!(1)),
            Err(Error::EmptyPath)
        ));
    }

    #[test]
    fn test_set_nested() {
        let mut data = readme_object();
        set(&mut data, "a", json!("new hello")).unwrap();
        set(&mut data, "b.c", json!(100)).unwrap();
        set(&mut data, "b.d.e", json!("new world")).unwrap();
        set(&mut data, "f.0", json!({ "g": "new array-item-1" })).unwrap();
        set(&mut data, "f.1.g", json!("new array-item-2")).unwrap();

        assert_eq!(data["a"], json!("new hello"));
        assert_eq!(data["b"]["c"], json!(100));
        assert_eq!(data["b"]["d"]["e"], json!("new world"));
        assert_eq!(data["f"][0], json!({ "g": "new array-item-1" }));
        assert_eq!(data["f"][1]["g"], json!("new array-item-2"));
    }

    #[test]
    fn test_set_then_get() {
        let mut data = json!([{ "test": "" }]);
        set(&mut data, "0.test", json!("ok")).unwrap();
        assert_eq!(get(&data, "0.test"), Some(&json!("ok")));
    }

    #[test]
    fn test_set_adds_new_key_on_existing_object() {
        let mut data = json!({ "inner": {} });
        set(&mut data, "inner.fresh", json!(1)).unwrap();
        assert_eq!(data, json!({ "inner": { "fresh": 1 } }));
    }

    #[test]
    fn test_set_invalid_paths() {
        let mut data = json!({ "first": "test", "null": null });

        let cases = [
            ("first.foo", "Cannot create property 'foo' on string"),
            ("first.foo.baz", "Cannot create property 'foo' on string"),
            ("null.bar", "Cannot create property 'bar' on null"),
            ("undef.baz", "Cannot create property 'baz' on undefined"),
        ];
        for (path, expected) in cases {
            let err = set(&mut data, path, json!(true)).unwrap_err();
            assert!(
                err.to_string().contains(expected),
                "{path}: got `{err}`"
            );
        }

        let mut null = Value::Null;
        let err = set(&mut null, "first", json!(true)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot create property 'first' on null");
    }

    #[test]
    fn test_set_array_edges() {
        let mut data = json!({ "list": [1] });
        set(&mut data, "list.1", json!(2)).unwrap();
        assert_eq!(data["list"], json!([1, 2]));

        let err = set(&mut data, "list.5", json!(9)).unwrap_err();
        assert!(matches!(
            err,
            Error::IndexOutOfBounds { index: 5, len: 2, .. }
        ));

        let err = set(&mut data, "list.name", json!(9)).unwrap_err();
        assert!(matches!(
            err,
            Error::NotAContainer {
                kind: ValueKind::Array,
                ..
            }
        ));
        assert_eq!(data["list"], json!([1, 2]));
    }

    #[test]
    fn test_failed_set_does_not_mutate() {
        let mut data = json!({ "a": { "b": 1 } });
        let before = data.clone();
        assert!(set(&mut data, "a.b.c.d", json!(0)).is_err());
        assert!(set(&mut data, "a.x.y", json!(0)).is_err());
        assert_eq!(data, before);
    }

    #[test]
    fn test_prototype_pollution() {
        let mut data = json!({});

        let err = set(&mut data, "__proto__.polluted", json!(true)).unwrap_err();
        assert!(err.to_string().contains("__proto__"));
        assert_eq!(get(&data, "__proto__"), None);

        let err = set(&mut data, "constructor.polluted", json!(true)).unwrap_err();
        assert!(err.to_string().contains("constructor"));
        assert_eq!(get(&data, "constructor"), None);
        assert_eq!(get(&data, "polluted"), None);

        let mut own = json!({ "constructor": { "prototype": { "polluted": true } } });
        assert_eq!(
            get(&own, "constructor.prototype.polluted"),
            Some(&json!(true))
        );
        set(&mut own, "constructor.prototype.polluted", json!(false)).unwrap();
        assert_eq!(own["constructor"]["prototype"]["polluted"], json!(false));
    }
}
