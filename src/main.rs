use std::io::{self, Read};
use std::path::PathBuf;

use clap::{ArgAction, Parser as ClapParser, Subcommand};
use log::LevelFilter;
use rjson::cli::{self, CliError, QueryOptions, QueryOutcome};

#[derive(ClapParser)]
#[command(name = "rjson")]
#[command(about = "rjson - Extract values from JSON documents with compact paths")]
#[command(version)]
struct Cli {
    /// Log more (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a path against a JSON document
    Query {
        /// The path to extract, e.g. `items[].name`
        path: String,

        /// JSON file to read
        #[arg(short, long, conflicts_with = "input")]
        file: Option<PathBuf>,

        /// JSON input (reads from stdin if neither this nor --file is given)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a path without running it
    Check {
        /// The path to validate
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Query {
            path,
            file,
            input,
            pretty,
        } => run_query(path, file, input, pretty),
        Commands::Check { path } => run_check(path),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run_query(
    path: String,
    file: Option<PathBuf>,
    input: Option<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let input = match (file, input) {
        (Some(file), _) => Some(cli::load_json_file(file)?),
        (None, Some(s)) => Some(s),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, None) => None,
    };

    let options = QueryOptions {
        path,
        input,
        syntax_only: false,
    };

    if let QueryOutcome::Success(value) = cli::execute_query(&options)? {
        let json = if pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }?;
        println!("{}", json);
    }
    Ok(())
}

fn run_check(path: String) -> Result<(), CliError> {
    let options = QueryOptions {
        path,
        input: None,
        syntax_only: true,
    };

    if let QueryOutcome::SyntaxValid(parsed) = cli::execute_query(&options)? {
        println!(
            "Syntax is valid: {} ({} steps)",
            parsed,
            parsed.tokens().len()
        );
    }
    Ok(())
}
