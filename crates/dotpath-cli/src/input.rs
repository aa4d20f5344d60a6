use anyhow::{Context, Result};
use dotpath::v1::PathTable;
use serde_json::Value;

/// Read a file, or stdin when `input` is `-`.
pub fn read_source(input: &str) -> Result<String> {
    tracing::debug!("reading {}", input);
    if input == "-" {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))
    }
}

pub fn read_table(input: &str) -> Result<PathTable> {
    let content = read_source(input)?;
    PathTable::from_json(&content).with_context(|| format!("Failed to load schema {:?}", input))
}

pub fn read_value(input: &str) -> Result<Value> {
    let content = read_source(input)?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", input))
}

pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_value_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"a": [1, 2]}}"#).unwrap();
        f.flush().unwrap();
        let value = read_value(f.path().to_str().unwrap()).unwrap();
        assert_eq!(value["a"][1], 2);
    }

    #[test]
    fn test_read_table_rejects_bad_schema() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"root": {{"kind": "ref", "$ref": "Nope"}}}}"#).unwrap();
        f.flush().unwrap();
        assert!(read_table(f.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_read_source_missing_file() {
        assert!(read_source("/nonexistent/file.json").is_err());
    }

    #[test]
    fn test_to_json_pretty() {
        let v = serde_json::json!({"a": 1});
        assert_eq!(to_json(&v, false).unwrap(), r#"{"a":1}"#);
        assert!(to_json(&v, true).unwrap().contains('\n'));
    }
}
