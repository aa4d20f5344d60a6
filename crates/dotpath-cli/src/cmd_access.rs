use anyhow::{Context, Result, bail};
use dotpath::v1::{PathConfig, PathTable};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::input::{read_value, to_json};

pub fn run_get(input: String, path: String, schema: Option<PathBuf>, pretty: bool) -> Result<()> {
    let data = read_value(&input)?;
    let table = schema.as_deref().map(load_table).transpose()?;
    match get_value(&data, &path, table.as_ref())? {
        Some(value) => println!("{}", to_json(value, pretty)?),
        None => bail!("No value at `{}`", path),
    }
    Ok(())
}

pub fn run_set(
    input: String,
    path: String,
    value: String,
    schema: Option<PathBuf>,
    in_place: bool,
    pretty: bool,
) -> Result<()> {
    if in_place && input == "-" {
        bail!("--in-place needs an input file, not stdin");
    }
    let mut data = read_value(&input)?;
    let table = schema.as_deref().map(load_table).transpose()?;
    set_value(&mut data, &path, parse_value(&value), table.as_ref())?;

    let json = to_json(&data, pretty)?;
    if in_place {
        std::fs::write(&input, format!("{}\n", json))
            .with_context(|| format!("Failed to write {:?}", input))?;
    } else {
        println!("{}", json);
    }
    Ok(())
}

fn load_table(schema: &Path) -> Result<PathTable> {
    let content =
        std::fs::read_to_string(schema).with_context(|| format!("Failed to read {:?}", schema))?;
    PathTable::from_json(&content).with_context(|| format!("Failed to load schema {:?}", schema))
}

/// JSON if it parses, otherwise the raw text as a string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn get_value<'a>(data: &'a Value, path: &str, table: Option<&PathTable>) -> Result<Option<&'a Value>> {
    let value = match table {
        Some(table) => table.get(data, path, &PathConfig::default())?,
        None => dotpath::v1::get(data, path),
    };
    Ok(value)
}

fn set_value(data: &mut Value, path: &str, value: Value, table: Option<&PathTable>) -> Result<()> {
    match table {
        Some(table) => table.set(data, path, value, &PathConfig::default())?,
        None => dotpath::v1::set(data, path, value)?,
    }
    Ok(())
}
