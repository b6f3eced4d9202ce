//! Entry point for `find-sentence`: loads one language of the corpus and
//! runs a single search, show or stats command against it.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use sentence_corpus::cli::args::FindSentenceArgs;
use sentence_corpus::cli::commands::execute_command;

fn main() {
    let args = FindSentenceArgs::parse();

    // RUST_LOG, when set, refines the level picked by -v/-q.
    Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
