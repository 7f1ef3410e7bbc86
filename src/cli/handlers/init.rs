use std::fs;
use std::path::Path;

use crate::cli::commands::InitArgs;
use crate::io::config_io::CONFIG_FILE_NAME;

const CONFIG_TEMPLATE: &str = r##"# orgtree keyword configuration.
#
# Headings may start with one of these words right after the stars:
#   * TODO Buy milk
#   ** DONE Pay rent
# Keywords are matched exactly (case-sensitive) and must be single words.
# The first entry of each list is used when toggling between the two states.

[keywords]
todo = ["TODO"]
done = ["DONE"]

# A longer workflow:
# todo = ["TODO", "NEXT", "WAIT"]
# done = ["DONE", "CANCELLED"]
"##;

/// Write a default `.orgtree.toml` into `dir`.
pub fn cmd_init(args: InitArgs, dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    fs::write(&path, CONFIG_TEMPLATE)?;
    println!("Created {}", path.display());
    Ok(())
}
