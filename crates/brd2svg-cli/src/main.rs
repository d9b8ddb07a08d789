//! brd2svg - convert Eagle .brd board files to composite breadboard SVGs
//!
//! Usage:
//!   brd2svg <input.brd> [options]

use std::env;

mod cli;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 {
        match args[1].as_str() {
            "help" | "--help" | "-h" => {
                cli::print_usage();
                return;
            }
            _ => {}
        }
    }

    cli::cmd_convert(&args[1..]);
}
