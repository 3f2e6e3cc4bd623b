#![forbid(unsafe_code)]

//! Command-line argument parsing for the variant demos.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `TALLY_DEMO_*` prefix;
//! explicit flags win over the environment.

use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Tally Demo — one counter, six architectures

USAGE:
    tally-demo [OPTIONS]

OPTIONS:
    --variant=NAME   Which wiring variant to run (default: simple)
    --storage=PATH   JSON snapshot file for the 'persistent' variant
                     (default: fixed-delay stub database)
    --list           List the variants and exit
    --help, -h       Show this help message
    --version, -V    Show version

VARIANTS:
    simple       View mutates the store directly (the naive baseline)
    controller   A store-backed controller between view and store
    publisher    Controller receives only an injected publish callback
    interfaces   View depends on capability traits, not concrete types
    persistent   Load before first render, mirror changes best-effort
    routed       Two screens behind a path router, fresh controller per build

KEYBINDINGS (typed as lines on stdin):
    +            Increment
    -            Decrement
    r            Reset to zero
    g PATH       Navigate (routed variant only)
    q            Quit

ENVIRONMENT VARIABLES:
    TALLY_DEMO_VARIANT   Override --variant
    TALLY_DEMO_STORAGE   Override --storage";

/// The six wiring variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Simple,
    Controller,
    Publisher,
    Interfaces,
    Persistent,
    Routed,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Simple,
        Variant::Controller,
        Variant::Publisher,
        Variant::Interfaces,
        Variant::Persistent,
        Variant::Routed,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Controller => "controller",
            Self::Publisher => "publisher",
            Self::Interfaces => "interfaces",
            Self::Persistent => "persistent",
            Self::Routed => "routed",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name.trim().to_ascii_lowercase())
    }
}

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    pub variant: Variant,
    /// Snapshot file for the persistent variant; `None` means the stub
    /// database.
    pub storage: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            variant: Variant::Simple,
            storage: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    List,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("tally-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::List) => {
                for variant in Variant::ALL {
                    println!("{}", variant.name());
                }
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment defaults first; flags override below.
        if let Some(val) = get_env("TALLY_DEMO_VARIANT")
            && let Some(variant) = Variant::from_name(&val)
        {
            opts.variant = variant;
        }
        if let Some(val) = get_env("TALLY_DEMO_STORAGE")
            && !val.trim().is_empty()
        {
            opts.storage = Some(PathBuf::from(val));
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--list" => return Err(ParseError::List),
                _ if arg.starts_with("--variant=") => {
                    let value = &arg["--variant=".len()..];
                    opts.variant =
                        Variant::from_name(value).ok_or_else(|| ParseError::InvalidValue {
                            flag: "--variant",
                            value: value.to_string(),
                        })?;
                }
                _ if arg.starts_with("--storage=") => {
                    let value = &arg["--storage=".len()..];
                    if value.is_empty() {
                        return Err(ParseError::InvalidValue {
                            flag: "--storage",
                            value: value.to_string(),
                        });
                    }
                    opts.storage = Some(PathBuf::from(value));
                }
                other => return Err(ParseError::UnknownArg(other.to_string())),
            }
        }

        Ok(opts)
    }
}
