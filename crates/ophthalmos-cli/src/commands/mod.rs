pub mod account;
pub mod adapt;
pub mod cone_test;
pub mod play;
pub mod stats;

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use ophthalmos_application::VisionUseCase;
use ophthalmos_core::color::Color;
use ophthalmos_core::config::{LogSettings, RootConfig};
use ophthalmos_core::cone::{ConeChannel, SensitivityProfile};
use ophthalmos_infrastructure::{
    ConfigService, FileAccountStore, HttpVisionBackend, InMemoryVisionBackend, OphthalmosPaths,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Everything a command needs: configuration and a wired use case.
pub struct AppContext {
    pub config: RootConfig,
    pub usecase: VisionUseCase,
    pub offline: bool,
}

impl AppContext {
    /// Loads configuration, installs logging and wires the collaborators.
    pub fn load(config_path: Option<PathBuf>, offline: bool) -> Result<Self> {
        let paths = match &config_path {
            Some(path) => OphthalmosPaths::at(
                path.parent()
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".")),
            ),
            None => OphthalmosPaths::platform().context("Failed to resolve the config directory")?,
        };
        let config_service = match config_path {
            Some(path) => ConfigService::with_file(path),
            None => ConfigService::new(&paths),
        };
        let config = load_config(&config_service, std::io::stderr);

        init_tracing(&config.logging.level);
        tracing::debug!(config = %config_service.path().display(), offline, "configuration loaded");

        let account_store = Arc::new(FileAccountStore::new(&paths));
        let usecase = if offline {
            VisionUseCase::from_backend(Arc::new(InMemoryVisionBackend::new()), account_store)
        } else {
            VisionUseCase::from_backend(
                Arc::new(HttpVisionBackend::from_settings(&config.backend)),
                account_store,
            )
        };

        Ok(Self {
            config,
            usecase,
            offline,
        })
    }

    /// Restores the account, warning when there is none.
    pub async fn require_account(&self) -> bool {
        if self.usecase.restore_account().await.is_some() {
            return true;
        }
        println!(
            "{}",
            "No account yet. Run `ophthalmos account create <NAME>` to save results.".yellow()
        );
        false
    }

    /// Uses `profile` if given, otherwise the latest profile on record.
    pub async fn resolve_profile(&self, profile: Option<SensitivityProfile>) -> Option<SensitivityProfile> {
        match profile {
            Some(profile) => {
                self.usecase.set_profile(profile).await;
                Some(profile)
            }
            None => {
                self.usecase.restore_account().await;
                self.usecase.load_latest_profile().await
            }
        }
    }
}

/// Reads the configuration while logging to `writer` at the default level.
///
/// The configured level is not known until the file is read.
fn load_config<W>(config_service: &ConfigService, writer: W) -> RootConfig
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = log_subscriber(&LogSettings::default().level, writer);
    tracing::subscriber::with_default(subscriber, || config_service.get_config())
}

/// Installs the process-wide subscriber; logs go to stderr.
fn init_tracing(level: &str) {
    let _ = tracing::subscriber::set_global_default(log_subscriber(level, std::io::stderr));
}

/// `RUST_LOG` wins over `level`.
fn log_subscriber<W>(level: &str, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .finish()
}

/// Parses `L,M,S` percentages, e.g. `100,67,33`.
pub fn parse_profile(input: &str) -> std::result::Result<SensitivityProfile, String> {
    let values = input
        .split(',')
        .map(|part| {
            let value: u8 = part
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a percentage", part.trim()))?;
            if value > 100 {
                return Err(format!("{} is above 100", value));
            }
            Ok(value)
        })
        .collect::<std::result::Result<Vec<u8>, String>>()?;

    match values.as_slice() {
        [l, m, s] => Ok(SensitivityProfile::new(*l, *m, *s)),
        _ => Err(format!("expected three values L,M,S, got {}", values.len())),
    }
}

/// Line-oriented reader over stdin.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next trimmed line, or `None` at end of input.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        let line = self
            .lines
            .next_line()
            .await
            .context("Failed to read from stdin")?;
        Ok(line.map(|l| l.trim().to_string()))
    }
}

/// A block of terminal cells painted in `color`.
pub fn swatch(color: Color) -> ColoredString {
    "      ".on_truecolor(color.red, color.green, color.blue)
}

/// One bar per cone channel.
pub fn print_profile(profile: &SensitivityProfile) {
    for channel in ConeChannel::ALL {
        let value = profile.channel(channel);
        let bar = "█".repeat(usize::from(value) / 5);
        let bar = match channel {
            ConeChannel::L => bar.red(),
            ConeChannel::M => bar.green(),
            ConeChannel::S => bar.blue(),
        };
        println!("{:<14} {:>3}% {}", channel.label(), value, bar);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[test]
    fn test_parse_profile() {
        assert_eq!(parse_profile("100, 67,0").unwrap(), SensitivityProfile::new(100, 67, 0));
        assert!(parse_profile("100,67").is_err());
        assert!(parse_profile("101,0,0").is_err());
        assert!(parse_profile("a,b,c").is_err());
    }

    /// Collects formatted log lines in memory.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'w> MakeWriter<'w> for Captured {
        type Writer = Captured;

        fn make_writer(&'w self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_malformed_config_fallback_is_logged() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[backend\nbase_url = ").unwrap();

        let logs = Captured::default();
        let config = load_config(&ConfigService::with_file(&path), logs.clone());

        assert_eq!(config.logging, RootConfig::default().logging);
        assert!(logs.text().contains("falling back to default configuration"));
    }

    #[test]
    fn test_first_run_config_write_is_logged() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");

        let logs = Captured::default();
        load_config(&ConfigService::with_file(&path), logs.clone());

        assert!(path.exists());
        assert!(logs.text().contains("wrote default configuration"));
    }
}
