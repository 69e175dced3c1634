//! CLI command for listing packaged containers

use std::path::Path;

use crate::batch::list_packaged;

pub fn execute(dir: &Path, json: bool) -> anyhow::Result<()> {
    let names = list_packaged(dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    for name in &names {
        println!("{name}");
    }
    println!("\nTotal: {} files", names.len());

    Ok(())
}
