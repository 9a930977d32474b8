//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{ConfigRoot, DEFAULT_CONFIG_ROOT};

#[derive(Parser, Debug)]
#[command(name = "pandora-helper")]
#[command(version, about = "API server for Pandora Helper", long_about = None)]
pub struct Cli {
    /// Config path, a TOML file or a directory holding config.toml, eg: --conf ./config/local.toml
    #[arg(long, default_value = DEFAULT_CONFIG_ROOT)]
    pub conf: PathBuf,
}

impl Cli {
    pub fn config_root(&self) -> ConfigRoot {
        ConfigRoot::new(self.conf.clone())
    }
}
