use anyhow::Context;
use clap::Parser;
use geo_profile::config::cli::{Command, LogFormat};
use geo_profile::domain::ports::IdentityProvider;
use geo_profile::utils::error::{ErrorSeverity, ProfileError};
use geo_profile::utils::logger;
use geo_profile::{build_service, CliConfig, LocalProfileService, SubmitOutcome, TomlConfig};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let result = match load_config(&cli) {
        Ok(config) => match build_service(&config) {
            Ok(service) => run(&service, cli.command).await,
            Err(e) => Err(e.into()),
        },
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(0) => Ok(()),
        Ok(code) => std::process::exit(code),
        Err(e) => std::process::exit(report(&e)),
    }
}

fn load_config(cli: &CliConfig) -> geo_profile::Result<TomlConfig> {
    let (path, required) = cli.config_path();

    let mut config = if required || Path::new(path).exists() {
        tracing::info!("📁 Loading configuration from: {}", path);
        TomlConfig::from_file(path)?
    } else {
        tracing::debug!("No {} found, using defaults", path);
        TomlConfig::default()
    };

    cli.apply_overrides(&mut config);
    Ok(config)
}

/// Runs one command and returns the process exit code.
async fn run(service: &LocalProfileService, command: Command) -> anyhow::Result<i32> {
    match command {
        Command::SignIn => {
            let session = service.identity().begin_sign_in().await?;
            println!(
                "✅ Signed in as {} <{}>",
                session.display_name.as_deref().unwrap_or("-"),
                session.email.as_deref().unwrap_or("-")
            );
        }
        Command::SignOut => {
            service.identity().end_sign_in().await?;
            println!("👋 Signed out");
        }
        Command::Show => {
            let form = service.load_form().await?;
            let json = serde_json::to_string_pretty(&form).context("rendering profile")?;
            println!("{}", json);
        }
        Command::CheckAddress { address } => {
            let errors = service.validator().validate_fields(&address).await;
            if !errors.is_empty() {
                for (field, message) in &errors {
                    eprintln!("❌ {}: {}", field, message);
                }
                return Ok(2);
            }
            println!("✅ Address accepted");
        }
        Command::Save(args) => {
            let form = args.apply(service.load_form().await?);
            match service.submit(form).await? {
                SubmitOutcome::Saved(record) => {
                    let json =
                        serde_json::to_string_pretty(&record).context("rendering profile")?;
                    println!("✅ Profile saved");
                    println!("{}", json);
                }
                SubmitOutcome::Rejected(errors) => {
                    for (field, message) in &errors {
                        eprintln!("❌ {}: {}", field, message);
                    }
                    return Ok(2);
                }
            }
        }
    }

    Ok(0)
}

fn report(e: &anyhow::Error) -> i32 {
    let Some(e) = e.downcast_ref::<ProfileError>() else {
        tracing::error!("❌ {:#}", e);
        eprintln!("❌ {:#}", e);
        return 1;
    };

    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
