//! docsn - documentation extractor JSON to per-class site documents.

fn main() {
    std::process::exit(docsn_cli::run_cli(std::env::args().collect()));
}
