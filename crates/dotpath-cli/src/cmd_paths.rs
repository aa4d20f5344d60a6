use anyhow::Result;
use dotpath::v1::{PathConfig, PathSet, PathTable};

use crate::input::{read_table, to_json};

pub fn run(
    schema: String,
    depth: usize,
    writable: bool,
    offset: Option<String>,
    json: bool,
    pretty: bool,
) -> Result<()> {
    let table = read_table(&schema)?;
    let config = PathConfig {
        depth,
        only_writeable: writable,
    };
    let set = list_paths(&table, &config, offset.as_deref())?;
    println!("{}", render(&set, json, pretty)?);
    Ok(())
}

fn list_paths(table: &PathTable, config: &PathConfig, offset: Option<&str>) -> Result<PathSet> {
    let set = match offset {
        Some(offset) => table.completions(offset, config)?,
        None => table.paths(config)?.as_ref().clone(),
    };
    Ok(set)
}

fn render(set: &PathSet, json: bool, pretty: bool) -> Result<String> {
    if json {
        return to_json(set, pretty);
    }
    let lines: Vec<String> = set.iter().map(|p| p.to_string()).collect();
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotpath::v1::{Field, Schema, Shape};
    use std::io::Write;

    fn make_table() -> PathTable {
        PathTable::new(Schema::new(Shape::object(vec![
            Field::new("a", Shape::string()).readonly(),
            Field::new(
                "b",
                Shape::object(vec![Field::new(
                    "c",
                    Shape::object(vec![Field::new(
                        "d",
                        Shape::object(vec![Field::new("e", Shape::number())]),
                    )]),
                )]),
            ),
        ])))
        .unwrap()
    }

    #[test]
    fn test_list_paths_root() {
        let set = list_paths(&make_table(), &PathConfig::default(), None).unwrap();
        let text = render(&set, false, false).unwrap();
        assert_eq!(text, "a\nb\nb.c\nb.c.d\nb.c.d.**");
    }

    #[test]
    fn test_list_paths_writable() {
        let config = PathConfig::default().writable().with_depth(1);
        let set = list_paths(&make_table(), &config, None).unwrap();
        assert_eq!(render(&set, false, false).unwrap(), "b\nb.**");
    }

    #[test]
    fn test_list_paths_with_offset() {
        let set = list_paths(&make_table(), &PathConfig::default(), Some("b.c.d.e")).unwrap();
        assert_eq!(render(&set, true, false).unwrap(), r#"["b.c.d.e"]"#);
    }

    #[test]
    fn test_run_with_temp_file() {
        let schema = make_table().schema().to_json().unwrap();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{}", schema).unwrap();
        f.flush().unwrap();
        let path = f.path().to_str().unwrap().to_string();
        assert!(run(path.clone(), 3, false, None, false, false).is_ok());
        assert!(run(path, 0, false, None, true, true).is_err());
    }

    #[test]
    fn test_run_nonexistent_file() {
        assert!(run("/nonexistent/schema.json".into(), 3, false, None, false, false).is_err());
    }
}
