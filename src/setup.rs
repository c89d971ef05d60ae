use crate::config::{
    Config,
    Severity,
};
use anyhow::{
    ensure,
    Context,
};
use camino::Utf8Path;

/// Load a config.
///
/// This prints to the stderr directly.
/// It is intended to be called BEFORE the loggers are set up.
pub(crate) fn load_config(path: Option<&Utf8Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => {
            eprintln!("loading `{path}`...");
            Config::load_from_path(path).with_context(|| format!("failed to load `{path}`"))?
        }
        None => Config::default(),
    };

    let mut error_count = 0;
    for message in config.validate() {
        let label = match message.severity() {
            Severity::Warn => "warning",
            Severity::Error => {
                error_count += 1;
                "error"
            }
        };
        eprintln!("config {label}: {}", message.error());
    }
    ensure!(error_count == 0, "config has {error_count} error(s)");

    Ok(config)
}
