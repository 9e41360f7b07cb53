// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use serf::cli::{execute_command, Cli};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute_command(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
