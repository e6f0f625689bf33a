//! Replay command implementation.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::{info, warn};

use tapstream_integration::{Integration, IntegrationFactory, TapstreamFactory};
use tapstream_types::{Analytics, Application, TapstreamSettings};

use crate::cli::Cli;
use crate::sink::JsonLinesSdk;

/// Outcome of a replay run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Payloads handed to the integration
    pub dispatched: usize,
    /// Lines that could not be decoded
    pub skipped: usize,
}

/// Feed every non-blank line of `reader` to `integration`.
///
/// Lines that are not valid payloads are logged and skipped; read errors
/// abort the replay.
pub fn replay_lines<R: BufRead>(
    reader: R,
    integration: &mut dyn Integration,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", index + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match integration.dispatch_json(line) {
            Ok(()) => stats.dispatched += 1,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping malformed payload");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

/// Resolve settings: config layers first, then CLI overrides.
pub fn resolve_settings(cli: &Cli) -> Result<TapstreamSettings> {
    let mut settings =
        TapstreamSettings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(account_name) = &cli.account_name {
        settings.account_name = account_name.clone();
    }
    if let Some(sdk_secret) = &cli.sdk_secret {
        settings.sdk_secret = sdk_secret.clone();
    }

    Ok(settings)
}

/// Build the integration against `out` and replay `input` through it.
pub fn replay<R, W>(
    cli: &Cli,
    settings: &TapstreamSettings,
    input: R,
    out: W,
) -> Result<(ReplayStats, usize)>
where
    R: BufRead,
    W: Write + 'static,
{
    let sdk = JsonLinesSdk::new(out);
    let factory = TapstreamFactory::new(sdk.clone());
    let analytics = Analytics::new(Application::new(&cli.package_name), cli.host_log_level);

    let mut integration = factory
        .create(&settings.to_value_map(), &analytics)
        .context("Failed to initialize Tapstream integration")?;

    let stats = replay_lines(input, integration.as_mut())?;
    sdk.output().flush().context("Failed to flush output")?;

    Ok((stats, sdk.fired()))
}

/// Entry point for the `tapstream-replay` binary.
pub fn run(cli: Cli) -> Result<()> {
    let settings = resolve_settings(&cli)?;

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Replaying payloads through Tapstream");
    info!("  Account: {}", settings.account_name);
    info!(
        "  Screen gates: all={} categorized={} named={}",
        settings.track_all_pages, settings.track_categorized_pages, settings.track_named_pages
    );

    let (stats, fired) = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            replay(&cli, &settings, BufReader::new(file), io::stdout())?
        }
        None => replay(&cli, &settings, io::stdin().lock(), io::stdout())?,
    };

    info!(
        dispatched = stats.dispatched,
        skipped = stats.skipped,
        fired,
        "Replay complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::Value;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    // Writer handle the test keeps after the SDK takes ownership
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn lines(&self) -> Vec<Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    fn settings() -> TapstreamSettings {
        TapstreamSettings::new("acme", "s3cret")
    }

    #[test]
    fn test_replay_fires_events() {
        let cli = Cli::parse_from(["tapstream-replay"]);
        let input = Cursor::new(
            [
                r#"{"type":"identify","traits":{"plan":"pro"}}"#,
                "",
                r#"{"type":"track","event":"Signed Up"}"#,
                r#"{"type":"screen","name":"Home"}"#,
                r#"{"type":"group","groupId":"acme"}"#,
            ]
            .join("\n"),
        );
        let out = SharedBuf::default();

        let (stats, fired) = replay(&cli, &settings(), input, out.clone()).unwrap();

        assert_eq!(stats, ReplayStats { dispatched: 4, skipped: 0 });
        assert_eq!(fired, 2);
        let lines = out.lines();
        assert_eq!(lines[0]["name"], "Signed Up");
        assert_eq!(lines[0]["params"]["plan"], "pro");
        assert_eq!(lines[1]["name"], "Viewed Home Screen");
    }

    #[test]
    fn test_replay_skips_malformed_lines() {
        let cli = Cli::parse_from(["tapstream-replay"]);
        let input = Cursor::new(
            "not json\n{\"type\":\"page\"}\n{\"type\":\"track\",\"event\":\"ok\"}\n",
        );
        let out = SharedBuf::default();

        let (stats, fired) = replay(&cli, &settings(), input, out).unwrap();

        assert_eq!(stats, ReplayStats { dispatched: 1, skipped: 2 });
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_replay_rejects_missing_credentials() {
        let cli = Cli::parse_from(["tapstream-replay"]);
        let result = replay(
            &cli,
            &TapstreamSettings::default(),
            Cursor::new(""),
            SharedBuf::default(),
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to initialize"));
    }

    #[test]
    fn test_resolve_settings_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tapstream.toml");
        std::fs::write(&path, "account_name = \"from-file\"\nsdk_secret = \"file-secret\"\n")
            .unwrap();
        let path = path.to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "tapstream-replay",
            "--config",
            path.as_str(),
            "--account-name",
            "from-cli",
        ]);
        let settings = resolve_settings(&cli).unwrap();

        assert_eq!(settings.account_name, "from-cli");
        assert_eq!(settings.sdk_secret, "file-secret");
        assert!(settings.track_all_pages);
    }
}
