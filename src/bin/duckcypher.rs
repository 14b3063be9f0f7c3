use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use duckcypher::config::{CliConfig, CompilerConfig};
use duckcypher::executor::DuckDbAdapter;
use duckcypher::schema::SchemaFile;

/// duckcypher - compiles a Cypher subset into SQL and runs it against DuckDB
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Schema file (YAML, spec.md §6 schema file format)
    #[arg(short, long)]
    schema: PathBuf,

    /// File containing the Cypher query to run
    #[arg(long = "cypher-file")]
    cypher_file: PathBuf,

    /// Upper bound on the number of MATCH stages a single query may have
    #[arg(long, default_value_t = 32)]
    max_stages: u32,

    /// Fail on SKIP instead of honouring it as LIMIT ... OFFSET ...
    #[arg(long)]
    disable_skip: bool,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        CliConfig {
            max_stages: cli.max_stages,
            disable_skip: cli.disable_skip,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("schema {}", cli.schema.display());
    log::info!("cypher {}", cli.cypher_file.display());

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let schema_path = cli.schema.clone();
    let cypher_path = cli.cypher_file.clone();
    let config = CompilerConfig::from_cli(cli.into())?;

    let schema_file = SchemaFile::from_yaml_file(&schema_path)?;
    let registry = schema_file.load()?;

    let cypher_query = std::fs::read_to_string(&cypher_path)?;

    let mut adapter = DuckDbAdapter::open_in_memory()?;
    adapter.register_tables(&registry)?;

    let result = duckcypher::run_cypher(&registry, &mut adapter, &cypher_query, &config)?;

    println!("{}", result.columns().join(" | "));
    for row in result.rows() {
        let rendered: Vec<String> = row.iter().map(|cell| format!("{cell:?}")).collect();
        println!("{}", rendered.join(" | "));
    }
    println!("({} rows)", result.row_count());

    Ok(())
}
