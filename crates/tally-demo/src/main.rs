#![forbid(unsafe_code)]

//! Tally demo: the same counter, wired six ways.
//!
//! Each variant connects a stdin gesture loop to the shared observable
//! store through a different layering; run with `--list` to see them and
//! `--help` for keybindings. Logging goes to stderr, filtered by
//! `RUST_LOG` (e.g. `RUST_LOG=tally_store=debug`).

mod cli;
mod variants;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Opts, Variant};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    info!(variant = opts.variant.name(), "starting");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match opts.variant {
        Variant::Simple => variants::simple::run(&mut input, &mut out),
        Variant::Controller => variants::controller::run(&mut input, &mut out),
        Variant::Publisher => variants::publisher::run(&mut input, &mut out),
        Variant::Interfaces => variants::interfaces::run(&mut input, &mut out),
        Variant::Persistent => {
            variants::persistent::run(opts.storage.as_deref(), &mut input, &mut out)
        }
        Variant::Routed => variants::routed::run(&mut input, &mut out),
    }
}
