use anyhow::Context;
use tracing_subscriber::{
    filter::EnvFilter,
    layer::SubscriberExt,
};

/// Try to setup a logger.
///
/// Logs go to the stderr so they never mix with the board on the stdout.
/// `RUST_LOG` takes priority over the configured level.
pub fn setup(level: &str) -> anyhow::Result<()> {
    let env_filter = match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {}", EnvFilter::DEFAULT_ENV))?,
        _ => EnvFilter::try_new(level).context("invalid log level")?,
    };
    let stderr_formatting_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(stderr_formatting_layer);

    tracing::subscriber::set_global_default(subscriber).context("failed to set subscriber")?;

    Ok(())
}
