use cliproc::{Cli, ExitCode};
use std::env;
use xbench::commands::xbench::Xbench;

fn main() -> ExitCode {
    Cli::default().parse(env::args()).go::<Xbench>()
}
