// Configuration management for cg-add-route
// Supports CLI arguments, config file (TOML), and environment variables

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;

const PROGRAM_ABOUT: &str = "\
CloudGenix script
---------------------------------------
This script quickly adds a global route to a site for all elements at that site";

/// Add a global static route to every element at a site
#[derive(Parser, Debug, Clone)]
#[command(name = "cg-add-route")]
#[command(author, version, about = PROGRAM_ABOUT, long_about = None)]
pub struct CliArgs {
    /// Specify an authtoken to use for CloudGenix authentication
    #[arg(short = 't', long, value_name = "MYTOKEN")]
    pub token: Option<String>,

    /// A file containing the authtoken
    #[arg(short = 'f', long, value_name = "MYTOKENFILE.TXT")]
    pub authtokenfile: Option<PathBuf>,

    /// The site to add the static route to
    #[arg(short = 's', long, value_name = "SiteName")]
    pub site_name: String,

    /// The IP Prefix for the destination route
    #[arg(short = 'p', long, value_name = "prefix", default_value = "")]
    pub prefix: String,

    /// The IP Next hop for the route
    #[arg(short = 'n', long, value_name = "nexthop", default_value = "")]
    pub next_hop: String,

    /// The admin distance for the route
    #[arg(short = 'a', long, value_name = "admindistance", default_value = "1")]
    pub admin_distance: String,

    /// Controller base URL
    #[arg(long, env = "CGX_CONTROLLER")]
    pub controller: Option<String>,

    /// Path to configuration file
    #[arg(short, long, env = "CGX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(short, long, env = "CGX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Configuration file structure (TOML format)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Controller connection settings
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Controller base URL
    #[serde(default = "default_controller_url")]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Verify the controller's TLS certificate
    #[serde(default = "default_true")]
    pub verify_tls: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_controller_url() -> String {
    "https://api.elcapitan.cloudgenix.com".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            url: default_controller_url(),
            timeout_seconds: default_timeout(),
            verify_tls: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

/// Where and how to reach the controller
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub url: String,
    pub timeout: Duration,
    pub verify_tls: bool,
}

/// Operator-supplied route inputs, unvalidated
#[derive(Debug, Clone)]
pub struct RouteArgs {
    pub site_name: String,
    pub prefix: String,
    pub next_hop: String,
    pub admin_distance: String,
}

/// Merged configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub controller: ControllerSettings,
    pub log_level: Level,
    pub token: Option<String>,
    pub token_file: Option<PathBuf>,
    pub route: RouteArgs,
}

impl Config {
    /// Load configuration from all sources (CLI args, config file, defaults)
    /// Priority: CLI args > Environment variables > Config file > Defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    pub fn from_args(cli_args: CliArgs) -> anyhow::Result<Self> {
        let config_file = match &cli_args.config {
            Some(config_path) => read_config_file(config_path)?,
            None => {
                let default_paths = [
                    PathBuf::from("cg-add-route.toml"),
                    PathBuf::from("config.toml"),
                ];

                match default_paths.iter().find(|path| path.exists()) {
                    Some(path) => read_config_file(path)?,
                    None => ConfigFile::default(),
                }
            }
        };

        Self::merge(cli_args, config_file)
    }

    /// Merge configuration (CLI args override config file)
    fn merge(cli_args: CliArgs, config_file: ConfigFile) -> anyhow::Result<Self> {
        let log_level = parse_log_level(
            cli_args
                .log_level
                .as_deref()
                .unwrap_or(&config_file.logging.level),
        )?;

        let url = cli_args
            .controller
            .unwrap_or(config_file.controller.url)
            .trim_end_matches('/')
            .to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(anyhow::anyhow!("Invalid controller URL: {}", url));
        }

        let timeout_seconds = cli_args
            .timeout
            .unwrap_or(config_file.controller.timeout_seconds);

        Ok(Config {
            controller: ControllerSettings {
                url,
                timeout: Duration::from_secs(timeout_seconds),
                verify_tls: config_file.controller.verify_tls,
            },
            log_level,
            token: cli_args.token,
            token_file: cli_args.authtokenfile,
            route: RouteArgs {
                site_name: cli_args.site_name,
                prefix: cli_args.prefix,
                next_hop: cli_args.next_hop,
                admin_distance: cli_args.admin_distance,
            },
        })
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<ConfigFile> {
    tracing::info!("Loading configuration from: {}", path.display());
    let config_content = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<ConfigFile>(&config_content)?)
}

fn parse_log_level(level_str: &str) -> anyhow::Result<Level> {
    match level_str.to_lowercase().as_str() {
        "error" => Ok(Level::ERROR),
        "warn" => Ok(Level::WARN),
        "info" => Ok(Level::INFO),
        "debug" => Ok(Level::DEBUG),
        "trace" => Ok(Level::TRACE),
        _ => Err(anyhow::anyhow!("Invalid log level: {}", level_str)),
    }
}
