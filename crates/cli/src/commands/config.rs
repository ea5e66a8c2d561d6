//! Config Commands

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use carprice_common::ClientConfig;

use crate::output::{print_success, print_warning};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub fn execute(cmd: ConfigCommands, effective: &ClientConfig, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("# {}", path.display());
            print!("{}", effective.to_toml()?);
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                print_warning(&format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                ));
                return Ok(());
            }
            ClientConfig::default().save(path)?;
            print_success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}
