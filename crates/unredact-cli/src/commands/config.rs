use std::path::Path;

use anyhow::Result;
use unredact_config::Config;

pub fn handle(explicit_path: Option<&Path>, config: &Config) -> Result<()> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
