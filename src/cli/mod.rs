//! Command-line interface for the debate-feed binary.
//!
//! `main` parses the arguments first and only builds a runtime for the
//! commands that talk to the backend:
//!
//! ```ignore
//! use debate_feed::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", debate_feed::cli::version_line()),
//!     CliCommand::Run(args) => { /* submit the debate */ }
//!     _ => {}
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgError, CliCommand, RunArgs};
pub use version::{usage, version_line, VERSION};
