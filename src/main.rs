use clap::{Parser as ClapParser, Subcommand};
use facets_sql::Options;
use facets_sql::cli::{self, CliError, CompileOptions, CompileOutput, OutputMode};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "facets")]
#[command(about = "Facets - compile filter queries into policy-checked SQL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query to SQL
    Compile {
        /// The facets query (reads from stdin if not provided)
        query: Option<String>,

        /// JSON file mapping field names to policies
        #[arg(short, long)]
        policies: Option<PathBuf>,

        /// Enable a field with a named policy, e.g. `age=number`
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Maximum number of filters (0 disables the limit)
        #[arg(long, env = "FACETS_MAX_FILTERS", default_value_t = 100)]
        max_filters: usize,

        /// Inline values without escaping (trusted input only)
        #[arg(long, conflicts_with = "inline")]
        literal: bool,

        /// Substitute escaped values into the placeholders
        #[arg(long)]
        inline: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Only validate query syntax
    Check {
        /// The facets query (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Print the built-in named policies
    Policies,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("facets_sql=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            query,
            policies,
            fields,
            max_filters,
            literal,
            inline,
            pretty,
        } => {
            let mode = if literal {
                OutputMode::Literal
            } else if inline {
                OutputMode::Inline
            } else {
                OutputMode::Escaped
            };
            run_compile(query, policies, fields, max_filters, mode, pretty)
        }
        Commands::Check { query } => read_query(query).and_then(|q| {
            cli::execute_check(&q)?;
            println!("Syntax is valid");
            Ok(())
        }),
        Commands::Policies => cli::policies_json().map(|json| {
            println!("{:#}", json);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer.trim_end().to_string())
        }
        None => Err(CliError::NoInput),
    }
}

fn run_compile(
    query: Option<String>,
    policies: Option<PathBuf>,
    fields: Vec<String>,
    max_filters: usize,
    mode: OutputMode,
    pretty: bool,
) -> Result<(), CliError> {
    let policies = policies.map(std::fs::read_to_string).transpose()?;

    let options = CompileOptions {
        query: read_query(query)?,
        policies,
        fields,
        options: Options { max_filters },
        mode,
    };

    match cli::execute_compile(&options)? {
        CompileOutput::Sql(sql) => println!("{}", sql),
        CompileOutput::Escaped(json) => {
            if pretty {
                println!("{:#}", json);
            } else {
                println!("{}", json);
            }
        }
    }
    Ok(())
}
