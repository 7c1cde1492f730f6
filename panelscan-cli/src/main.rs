mod query;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "panelscan";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Match short nucleotide reads against a curated reference panel and report nucleotide/protein variants and affected domains.")
        .subcommand_required(true)
        .subcommand(query::cli::create_query_cli())
}

fn main() -> Result<()> {
    env_logger::init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // QUERY
        //
        Some((query::cli::QUERY_CMD, matches)) => {
            query::handlers::run_query(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
