//! `wintile` binary entry point.

fn main() {
    if let Err(err) = wintile_lib::cli::run() {
        eprintln!("wintile: {err}");
        std::process::exit(1);
    }
}
