mod calc;
mod config;
mod ipc;
mod store;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::store::Store;

fn init_tracing(filter: &str) -> anyhow::Result<()> {
    // stdout carries the protocol; logs go to stderr.
    let filter = EnvFilter::try_new(filter).context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}

fn initial_store(cfg: &Config) -> Option<Store> {
    if cfg.closed {
        None
    } else if cfg.empty {
        Some(Store::empty())
    } else {
        Some(Store::seeded())
    }
}

fn serve(state: &mut ipc::AppState) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed; stopping");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: ipc::Request = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                // Can't reply without id.
                tracing::warn!(error = %e, "unparseable request line");
                let resp = serde_json::json!({
                    "ok": false,
                    "error": { "code": "bad_json", "message": e.to_string() }
                });
                writeln!(stdout, "{}", resp).context("write response")?;
                stdout.flush().context("flush response")?;
                continue;
            }
        };

        let resp = ipc::handle_request(state, req);
        writeln!(stdout, "{}", resp).context("write response")?;
        stdout.flush().context("flush response")?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cfg = Config::parse();
    init_tracing(&cfg.log_filter)?;

    let mut state = ipc::AppState::new(initial_store(&cfg));
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        store_open = state.store.is_some(),
        seeded = !cfg.empty && !cfg.closed,
        "tuitiond ready"
    );

    serve(&mut state)?;

    // Dropping the state ends the session; nothing is persisted.
    state.store = None;
    tracing::info!("stdin closed; session ended");
    Ok(())
}
