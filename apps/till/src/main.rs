//! # Till Entry Point
//!
//! ```text
//! $ till --capacity 20 BGLE COFB BGLO BGLO BGLO BGLO BGLO BGLO @b6:BGLO
//! ```
//!
//! The actual work is in lib.rs so it can be tested.

use std::process::ExitCode;

use bagels_till::TillArgs;
use clap::Parser;

fn main() -> ExitCode {
    bagels_till::init_tracing();

    let args = TillArgs::parse();
    match bagels_till::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
