//! msi-relay entry point.

use std::io::Write;
use std::process::ExitCode;

use msi_relay_forge::Client;
use msi_relay_publish::{Console, Credential, PublishConfig, PublishError, Publisher};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the operator report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting msi-relay");

    let mut console = Console::stdout();
    console.banner();

    let config = match PublishConfig::load() {
        Ok(c) => c,
        Err(e) => {
            let err = PublishError::from(e);
            console.failure(&err);
            return ExitCode::from(err.exit_code());
        }
    };

    let code = run(&config, |name| std::env::var(name).ok(), &mut console).await;
    ExitCode::from(code)
}

/// Resolves the token, builds the API client and runs the publish steps.
///
/// `lookup` maps an environment variable name to its value.
async fn run<W, F>(config: &PublishConfig, lookup: F, console: &mut Console<W>) -> u8
where
    W: Write,
    F: FnOnce(&str) -> Option<String>,
{
    let credential = match Credential::from_lookup(&config.credential_var, lookup) {
        Ok(c) => c,
        Err(e) => {
            console.failure(&e);
            return e.exit_code();
        }
    };

    let client = match Client::new(credential.expose()) {
        Ok(c) => c.with_base_urls(&config.api_base_url, &config.upload_base_url),
        Err(e) => {
            let err = PublishError::from_lookup(&config.repo, &config.release_tag, e);
            console.failure(&err);
            return err.exit_code();
        }
    };

    Publisher::new(config, &client).execute(console).await
}
