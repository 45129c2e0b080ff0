use tracing::Level;

/// Installs the global subscriber. Logs go to stderr so they never mix with command output.
pub fn init(level: Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}
