// SPDX-License-Identifier: GPL-3.0-or-later
mod cli;
mod commands;
mod error;
mod format;

use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mbcli_config::{load as load_config, MusicBrainzConfig, TelemetryConfig};
use mbcli_musicbrainz::MusicBrainzClient;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::error::{CommandError, EXIT_NOT_FOUND};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config().context("invalid configuration") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\nError: {:#}", e);
            return ExitCode::from(EXIT_NOT_FOUND);
        }
    };
    init_tracing(&config.telemetry);

    let client = match build_client(&config.musicbrainz) {
        Ok(client) => client,
        Err(e) => return report(&e),
    };

    let mut stdout = io::stdout();
    match execute(&client, cli.command, &mut stdout, interrupt_signal()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Run `command`, abandoning it as soon as `interrupt` resolves.
///
/// Output is flushed either way; a failed flush is an output error.
async fn execute<W: Write>(
    client: &MusicBrainzClient,
    command: Command,
    out: &mut W,
    interrupt: impl Future<Output = ()>,
) -> Result<(), CommandError> {
    let outcome = tokio::select! {
        result = commands::run(client, command, &mut *out) => result,
        _ = interrupt => Err(CommandError::Interrupted),
    };
    let flushed = out.flush();
    outcome?;
    flushed?;
    Ok(())
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&telemetry.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn build_client(config: &MusicBrainzConfig) -> Result<MusicBrainzClient, CommandError> {
    let mut builder = MusicBrainzClient::builder()
        .timeout(config.timeout())
        .rate_limit_interval(config.rate_limit_interval());
    if let Some(base_url) = &config.base_url {
        builder = builder.base_url(base_url);
    }
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent);
    }
    Ok(builder.build()?)
}

fn report(e: &CommandError) -> ExitCode {
    if let CommandError::Api(api) = e {
        debug!(target: "cli", status = ?api.status(), "request failed");
    }
    eprintln!("\n{}", e.report());
    ExitCode::from(e.exit_code())
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn interrupt_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::interrupt()) {
            Ok(mut interrupt) => {
                interrupt.recv().await;
            }
            Err(e) => {
                warn!(target: "cli", "failed to install SIGINT handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(target: "cli", "failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }

    info!(target: "cli", "interrupt received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RADIOHEAD_MBID: &str = "a74b1b7f-71a5-4011-9441-d0b5e4122711";

    fn client_for(server: &MockServer) -> MusicBrainzClient {
        MusicBrainzClient::builder()
            .base_url(server.uri())
            .rate_limit_interval(Duration::ZERO)
            .build()
            .unwrap()
    }

    async fn mount_artist_lookup(server: &MockServer, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(format!("/artist/{}", RADIOHEAD_MBID)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "id": RADIOHEAD_MBID,
                        "name": "Radiohead"
                    }))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
    }

    fn artist_info() -> Command {
        Command::ArtistInfo {
            query: RADIOHEAD_MBID.to_string(),
        }
    }

    /// Accepts writes but cannot flush, like a closed pipe.
    struct ClosedPipe(Vec<u8>);

    impl Write for ClosedPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_build_client_from_defaults() {
        let config = MusicBrainzConfig::default();
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn test_build_client_uses_configured_interval() {
        let config = MusicBrainzConfig {
            base_url: Some("http://127.0.0.1:9/ws/2".to_string()),
            user_agent: Some("Test/1.0 (tests)".to_string()),
            rate_limit_ms: 250,
            timeout_secs: 5,
        };
        let client = build_client(&config).unwrap();
        assert_eq!(
            client.rate_limiter().min_interval(),
            Duration::from_millis(250)
        );
    }

    #[tokio::test]
    async fn test_execute_completes_without_interrupt() {
        let mock_server = MockServer::start().await;
        mount_artist_lookup(&mock_server, Duration::ZERO).await;
        let client = client_for(&mock_server);

        let mut out = Vec::new();
        execute(&client, artist_info(), &mut out, std::future::pending())
            .await
            .unwrap();

        assert!(String::from_utf8(out).unwrap().contains("Radiohead"));
    }

    #[tokio::test]
    async fn test_interrupt_during_request_exits_130() {
        let mock_server = MockServer::start().await;
        mount_artist_lookup(&mock_server, Duration::from_secs(10)).await;
        let client = client_for(&mock_server);

        let (tx, rx) = oneshot::channel::<()>();
        tx.send(()).unwrap();

        let mut out = Vec::new();
        let err = execute(&client, artist_info(), &mut out, async {
            let _ = rx.await;
        })
        .await
        .unwrap_err();

        assert!(matches!(err, CommandError::Interrupted));
        assert_eq!(err.exit_code(), 130);
        assert!(err.report().ends_with("Interrupted by user."));
    }

    #[tokio::test]
    async fn test_flush_failure_is_an_output_error() {
        let mock_server = MockServer::start().await;
        mount_artist_lookup(&mock_server, Duration::ZERO).await;
        let client = client_for(&mock_server);

        let mut out = ClosedPipe(Vec::new());
        let err = execute(&client, artist_info(), &mut out, std::future::pending())
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Output(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(!out.0.is_empty());
    }
}
