use crate::config::toml_config::TomlConfig;
use crate::domain::model::ProfileRecord;
use clap::{Parser, Subcommand, ValueEnum};

pub const DEFAULT_CONFIG_PATH: &str = "geo-profile.toml";

#[derive(Debug, Clone, Parser)]
#[command(name = "geo-profile")]
#[command(about = "Edit a local user profile whose address must lie near a reference city")]
pub struct CliConfig {
    /// Path to TOML configuration file [default: geo-profile.toml, if present]
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override geocoder.base_url
    #[arg(long)]
    pub geocoder_url: Option<String>,

    /// Override storage.data_dir
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Start a session with the configured identity
    SignIn,
    /// End the current session
    SignOut,
    /// Print the profile form as JSON
    Show,
    /// Check whether an address is inside the allowed zone
    CheckAddress { address: String },
    /// Validate and save the profile
    Save(ProfileArgs),
}

/// Fields left unset keep the value loaded from the form.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub birth_date: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub country_code: Option<String>,
}

impl ProfileArgs {
    pub fn apply(self, mut form: ProfileRecord) -> ProfileRecord {
        let fields = [
            (self.first_name, &mut form.first_name),
            (self.last_name, &mut form.last_name),
            (self.birth_date, &mut form.birth_date),
            (self.address, &mut form.address),
            (self.phone, &mut form.phone),
            (self.country_code, &mut form.country_code),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        form
    }
}

impl CliConfig {
    /// The config file to read, and whether it must exist.
    pub fn config_path(&self) -> (&str, bool) {
        match &self.config {
            Some(path) => (path.as_str(), true),
            None => (DEFAULT_CONFIG_PATH, false),
        }
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(url) = &self.geocoder_url {
            tracing::debug!("geocoder.base_url overridden to: {}", url);
            config.geocoder.base_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            tracing::debug!("storage.data_dir overridden to: {}", dir);
            config.storage.data_dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_save_command() {
        let cli = CliConfig::try_parse_from([
            "geo-profile",
            "--data-dir",
            "/tmp/x",
            "save",
            "--address",
            "Place de la Bastille, Paris",
            "--phone",
            "0600000000",
        ])
        .unwrap();

        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/x"));
        assert_eq!(cli.config_path(), ("geo-profile.toml", false));
        let Command::Save(args) = cli.command else {
            panic!("expected save");
        };

        let form = ProfileRecord {
            first_name: "Jeanne".to_string(),
            address: "old".to_string(),
            ..ProfileRecord::default()
        };
        let form = args.apply(form);
        assert_eq!(form.first_name, "Jeanne");
        assert_eq!(form.address, "Place de la Bastille, Paris");
        assert_eq!(form.phone, "0600000000");
    }

    #[test]
    fn test_overrides() {
        let cli = CliConfig::try_parse_from([
            "geo-profile",
            "--config",
            "custom.toml",
            "--geocoder-url",
            "http://localhost:1234",
            "check-address",
            "Paris",
        ])
        .unwrap();
        assert_eq!(cli.config_path(), ("custom.toml", true));

        let mut config = TomlConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.geocoder.base_url, "http://localhost:1234");
        assert_eq!(config.storage.data_dir, "./profile-data");
    }
}
