//! Applies capacity override lists given on the command line to a simulated set of processors,
//! printing the live capacities after each list and again after teardown.
//!
//! ```text
//! cargo run --example cpu_capacity_cli -- --processors 8 "0-3:1024,4-7:512" "2:0x80"
//! ```
//!
//! Pass `--verbose` to see every unit being written.

use std::num::NonZero;
use std::process::ExitCode;

use argh::FromArgs;
use cpu_capacity::{Session, UnitStore};
use tracing::Level;

/// Apply capacity override lists to a simulated set of processors.
#[derive(FromArgs)]
struct Args {
    /// number of processors to simulate
    #[argh(option, default = "8")]
    processors: usize,

    /// log every unit write
    #[argh(switch)]
    verbose: bool,

    /// capacity override lists to apply in order, e.g. "0-3:1024,4-7:512"
    #[argh(positional)]
    specs: Vec<String>,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let Some(processors) = NonZero::new(args.processors) else {
        eprintln!("at least one processor is required");
        return ExitCode::FAILURE;
    };

    let session = Session::new(UnitStore::new(processors));
    let reader = session.reader();
    let mut exit_code = ExitCode::SUCCESS;

    for spec in &args.specs {
        match session.set(spec) {
            Ok(()) => println!("{spec:?} applied, capacities: {:?}", reader.to_vec()),
            Err(e) => {
                println!("{spec:?} failed: {e}, capacities: {:?}", reader.to_vec());
                exit_code = ExitCode::FAILURE;
            }
        }
    }

    print!("last applied: {}", session.render());

    session.teardown();
    println!("after teardown: {:?}", reader.to_vec());

    exit_code
}
