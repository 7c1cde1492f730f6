use clap::{Command, arg};

pub const QUERY_CMD: &str = "query";

pub fn create_query_cli() -> Command {
    Command::new(QUERY_CMD)
        .author("Databio")
        .about("Match a read against the panel and report its variants as JSON")
        .arg_required_else_help(true)
        .arg(arg!(-p --panel <panel> "The reference panel JSON file").required(true))
        .arg(arg!(-m --"min-identity" <fraction> "Minimum identity fraction a match must clear (default 0.7)"))
        .arg(arg!(-i --input <file> "Read the query sequence from a file instead of the command line"))
        .arg(arg!([sequence] "The nucleotide read to query"))
}
