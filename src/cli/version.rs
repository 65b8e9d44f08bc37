//! Version and usage text.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line printed for `--version`.
pub fn version_line() -> String {
    format!("debate-feed {}", VERSION)
}

/// Text printed for `--help`.
pub fn usage() -> String {
    format!(
        "{}
Stream a multi-agent debate and print its feed.

USAGE:
    debate-feed [OPTIONS] <PROMPT>...
    debate-feed --health

OPTIONS:
    --confidence <N>   Consensus confidence target, 50-100 (default 80)
    --rounds <N>       Maximum number of rounds, 1-20
    --url <URL>        Backend base URL (default $DEBATE_API_BASE_URL or http://localhost:8000)
    --health           Check that the backend is reachable
    -h, --help         Print this help
    -V, --version      Print the version

Press Ctrl+C to cancel a running debate.",
        version_line()
    )
}
