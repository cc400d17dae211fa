//! Workflow init-config step.
use crate::cli::InitConfigArgs;
use crate::config::{default_config, user_config_path, write_config};
use anyhow::{anyhow, Result};

/// Write the default config to `--out` or the per-user config location.
pub fn run_init_config(args: &InitConfigArgs) -> Result<()> {
    let path = match &args.out {
        Some(path) => path.clone(),
        None => user_config_path()
            .ok_or_else(|| anyhow!("cannot determine a config directory; pass --out"))?,
    };
    if path.is_file() && !args.force {
        return Err(anyhow!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        ));
    }
    write_config(&path, &default_config())?;
    println!("wrote {}", path.display());
    Ok(())
}
