use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing::info;
use weather_core::Config;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather relay server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Start the HTTP server.
    Serve {
        /// Address to bind, overrides config and environment.
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on, overrides config and environment.
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Serve { bind, port } => {
                let mut config = Config::load()?;
                config.apply_env()?;

                if let Some(bind) = bind {
                    config.server.bind_address = bind;
                }
                if let Some(port) = port {
                    config.server.port = port;
                }

                crate::server::serve(config).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty");
    }

    config.set_api_key(api_key.to_string());
    config.save()?;

    info!(path = %Config::config_file_path()?.display(), "saved configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::try_parse_from(["weather-server", "serve", "--bind", "0.0.0.0", "--port", "9000"])
            .expect("arguments should parse");

        match cli.command {
            Command::Serve { bind, port } => {
                assert_eq!(bind.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_port() {
        assert!(Cli::try_parse_from(["weather-server", "serve", "--port", "eighty"]).is_err());
    }

    #[test]
    fn parses_configure() {
        let cli = Cli::try_parse_from(["weather-server", "configure"]).unwrap();
        assert!(matches!(cli.command, Command::Configure));
    }
}
