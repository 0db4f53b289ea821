//! fillbench binary entry point.

fn main() {
    if let Err(err) = fillbench_cli::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
