use anyhow::{Result, bail};
use dotpath::v1::{PathConfig, PathTable};

use crate::input::read_table;

pub fn run(schema: String, paths: Vec<String>, writable: bool) -> Result<()> {
    let table = read_table(&schema)?;
    let failures = check_all(&table, &paths, writable);

    if failures > 0 {
        bail!("{} of {} paths failed", failures, paths.len());
    }
    Ok(())
}

/// Prints one line per path and returns the number of failures.
fn check_all(table: &PathTable, paths: &[String], writable: bool) -> usize {
    let config = PathConfig::default();
    let mut failures = 0;

    for path in paths {
        let result = if writable {
            table.check_writable(path, &config)
        } else {
            table.check(path, &config)
        };
        match result {
            Ok(()) => println!("Valid: {}", path),
            Err(e) => {
                println!("Invalid: {}", e);
                failures += 1;
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotpath::v1::{Field, Schema, Shape};
    use std::io::Write;

    fn make_table() -> PathTable {
        PathTable::new(Schema::new(Shape::object(vec![
            Field::new("id", Shape::number()).readonly(),
            Field::new(
                "items",
                Shape::array(Shape::object(vec![Field::new("name", Shape::string())])),
            ),
        ])))
        .unwrap()
    }

    fn strings(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_check_all_valid() {
        let table = make_table();
        assert_eq!(check_all(&table, &strings(&["id", "items.4.name"]), false), 0);
    }

    #[test]
    fn test_check_all_counts_failures() {
        let table = make_table();
        let paths = strings(&["id", "items.x", "nope", "items.0.name"]);
        assert_eq!(check_all(&table, &paths, false), 2);
    }

    #[test]
    fn test_check_all_writable() {
        let table = make_table();
        assert_eq!(check_all(&table, &strings(&["id", "items.0.name"]), true), 1);
    }

    #[test]
    fn test_run_reports_failure() {
        let schema = make_table().schema().to_json().unwrap();
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{}", schema).unwrap();
        f.flush().unwrap();
        let path = f.path().to_str().unwrap().to_string();

        assert!(run(path.clone(), strings(&["items.0.name"]), false).is_ok());
        assert!(run(path, strings(&["items.name"]), false).is_err());
    }
}
