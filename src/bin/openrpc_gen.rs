use openrpc_gen::cli::run_cli;
use openrpc_gen::logging::init_logging;

fn main() {
    if let Err(err) = init_logging() {
        eprintln!("Warning: {err:#}");
    }

    if let Err(err) = run_cli() {
        eprintln!("❌ {err:#}");
        std::process::exit(1);
    }
}
