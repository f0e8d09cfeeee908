//! Matbasis command-line entry point.

fn main() {
    if let Err(error) = matbasis_cli::run() {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
