use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tuitiond",
    version,
    about = "Tuition center store sidecar speaking line-delimited JSON over stdio"
)]
pub struct Config {
    /// Start with empty collections instead of the demo dataset.
    #[arg(long, env = "TUITIOND_EMPTY")]
    pub empty: bool,
    /// Start with no open store; clients must call `store.open`.
    #[arg(long, env = "TUITIOND_CLOSED", conflicts_with = "empty")]
    pub closed: bool,
    /// tracing filter directive, e.g. `debug` or `tuitiond=trace`.
    #[arg(long, env = "TUITIOND_LOG", default_value = "info")]
    pub log_filter: String,
}
