use newman_ranking::{interpret, run};

fn main() {
    sensible_env_logger::init!();

    if let Err(e) = run(interpret()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
