//! Json2env command - encodes a JSON object as an environment file.

use anyhow::Result;
use std::path::Path;

use bootprep::json;

/// Execute the json2env command.
pub fn cmd_json2env(input: &Path, output: &Path) -> Result<()> {
    let env = json::load(input)?;
    let size = env.save(output)?;
    println!(
        "Wrote {} entries ({size} bytes) to {}",
        env.len(),
        output.display()
    );
    Ok(())
}
