use anyhow::Result;
use brisk_core::configs::build::build_config_schema;

pub fn execute() -> Result<()> {
    let schema = serde_json::to_string_pretty(&build_config_schema())?;
    println!("{}", schema);
    Ok(())
}
