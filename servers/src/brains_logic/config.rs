use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PUBLIC_DATA: &str = "./data/ControlSraRunTable.json";
pub const DEFAULT_STATIC_DIR: &str = "./public";
pub const DEFAULT_LOG_DIR: &str = "./logs";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Deserialize, Serialize, Debug, Clone, Default)]
#[clap(about = "HTTP server for the control-brain sample run table", version)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[clap(long, env = "PORT", help = "Port to listen on for client connections.")]
    pub port: Option<u16>,

    #[clap(long, env = "BRAINS_CONFIG_PATH", help = "Path to the JSON configuration file.")]
    pub config_path: Option<PathBuf>,

    #[clap(long, env = "CONTROL_DATA_PATH", help = "Path to the operator-supplied real run table. Absent in public deployments.")]
    pub control_data_path: Option<PathBuf>,

    #[clap(long, env = "BRAINS_PUBLIC_DATA", help = "Path to the bundled public run table.")]
    pub public_data_path: Option<PathBuf>,

    #[clap(long, env = "BRAINS_STATIC_DIR", help = "Directory of browser-servable front end files.")]
    pub static_dir: Option<PathBuf>,

    #[clap(long, env = "BRAINS_LOG_DIR", help = "Directory for log files.")]
    pub log_dir: Option<PathBuf>,

    #[clap(long, env = "BRAINS_LOG_LEVEL", help = "Logging level (trace, debug, info, warn, error).")]
    pub log_level: Option<String>,
}

impl Config {
    // Merge two Config structs, where 'other' overrides 'self' for Some values
    fn merge(self, other: Config) -> Config {
        Config {
            port: other.port.or(self.port),
            config_path: other.config_path.or(self.config_path),
            control_data_path: other.control_data_path.or(self.control_data_path),
            public_data_path: other.public_data_path.or(self.public_data_path),
            static_dir: other.static_dir.or(self.static_dir),
            log_dir: other.log_dir.or(self.log_dir),
            log_level: other.log_level.or(self.log_level),
        }
    }
}

pub fn load_config() -> Config {
    // 1. Load defaults
    let default_config = Config {
        port: Some(DEFAULT_PORT),
        public_data_path: Some(PathBuf::from(DEFAULT_PUBLIC_DATA)),
        static_dir: Some(PathBuf::from(DEFAULT_STATIC_DIR)),
        log_dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
        log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        ..Default::default()
    };

    // 2. Load from config file (server_brains.conf) if present.
    //    Allow overriding default config file path with CLI arg.
    let cli_args_for_path = Config::parse();

    let config_file_path = cli_args_for_path
        .config_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("server_brains.conf"));

    let mut current_config = default_config;

    if config_file_path.exists() {
        if let Ok(config_str) = fs::read_to_string(&config_file_path) {
            if let Ok(file_config) = serde_json::from_str::<Config>(&config_str) {
                current_config = current_config.merge(file_config);
            } else {
                log::warn!("Failed to parse config file: {}. Falling back to other sources.", config_file_path.display());
            }
        } else {
            log::warn!("Failed to read config file: {}. Falling back to other sources.", config_file_path.display());
        }
    }

    // 3. Override with environment variables and CLI arguments.
    //    clap::Parser handles both, so merging the parsed args over the file
    //    config gives CLI/env the last word.
    let cli_args_final = Config::parse();
    current_config = current_config.merge(cli_args_final);

    current_config
}
