use anyhow::{Context, Result};
use dotpath::v1::Schema;
use std::path::PathBuf;

pub fn run(schema: PathBuf) -> Result<()> {
    let content =
        std::fs::read_to_string(&schema).with_context(|| format!("Failed to read {:?}", schema))?;
    validate_content(&content)
}

fn validate_content(content: &str) -> Result<()> {
    match Schema::from_json(content) {
        Ok(schema) => {
            println!(
                "Valid: {} ({} definitions)",
                schema.root,
                schema.definitions.len()
            );
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Invalid: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_primitive_root() {
        let json = r#"{"root":{"kind":"primitive","type":"string"}}"#;
        assert!(validate_content(json).is_ok());
    }

    #[test]
    fn test_validate_recursive_definition() {
        let json = r#"{
            "root": {"kind": "ref", "$ref": "Node"},
            "definitions": {
                "Node": {"kind": "struct", "fields": [
                    {"name": "value", "type": {"kind": "primitive", "type": "number"}},
                    {"name": "next", "type": {"kind": "ref", "$ref": "Node"}, "optional": true}
                ]}
            }
        }"#;
        assert!(validate_content(json).is_ok());
    }

    #[test]
    fn test_validate_unknown_ref() {
        let json = r#"{"root":{"kind":"ref","$ref":"Missing"}}"#;
        assert!(validate_content(json).is_err());
    }

    #[test]
    fn test_validate_ref_cycle() {
        let json = r#"{
            "root": {"kind": "ref", "$ref": "A"},
            "definitions": {
                "A": {"kind": "ref", "$ref": "B"},
                "B": {"kind": "ref", "$ref": "A"}
            }
        }"#;
        assert!(validate_content(json).is_err());
    }

    #[test]
    fn test_validate_invalid_json() {
        assert!(validate_content("not json").is_err());
    }

    #[test]
    fn test_validate_unknown_kind() {
        assert!(validate_content(r#"{"root":{"kind":"tree"}}"#).is_err());
    }

    #[test]
    fn test_run_with_temp_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"root":{{"kind":"array","element":{{"kind":"any"}}}}}}"#).unwrap();
        f.flush().unwrap();
        assert!(run(f.path().to_path_buf()).is_ok());
    }

    #[test]
    fn test_run_nonexistent_file() {
        assert!(run(PathBuf::from("/nonexistent/file.json")).is_err());
    }
}
