use anyhow::Result;
use dotpath::v1::{PathTable, ResolveConfig};

use crate::input::{read_table, to_json};

pub fn run(schema: String, path: String, set_mode: bool, json: bool, pretty: bool) -> Result<()> {
    let table = read_table(&schema)?;
    println!("{}", describe(&table, &path, set_mode, json, pretty)?);
    Ok(())
}

fn describe(table: &PathTable, path: &str, set_mode: bool, json: bool, pretty: bool) -> Result<String> {
    let config = if set_mode {
        ResolveConfig::set()
    } else {
        ResolveConfig::get()
    };
    let shape = table.value_type(path, &config)?;
    if json {
        to_json(&shape, pretty)
    } else {
        Ok(shape.to_string())
    }
}
