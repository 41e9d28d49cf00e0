use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use powerops_cli::{
    Command, GenerateCommand, GraphQlCommand, QuerySource, ValidateCommand, init_logging,
};
use powerops_sdk::dm::DataModelId;
use powerops_sdk::entity::codegen::GenerationOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cargo-powerops", bin_name = "cargo")]
enum CargoCli {
    Powerops(Cli),
}

#[derive(Args)]
#[command(about = "Generate and query PowerOps data-modeling clients")]
struct Cli {
    /// Verbose logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate view modules from a GraphQL data-model schema
    Generate {
        /// Schema file or directory of .graphql files
        #[arg(short, long, default_value = "schema")]
        schema: PathBuf,
        /// Output directory for the generated modules
        #[arg(short, long, default_value = "src/generated")]
        out: PathBuf,
        /// Crate path the generated code imports the SDK from
        #[arg(long, default_value = "powerops_sdk")]
        sdk_path: String,
        /// Space for views without @view(space: ...)
        #[arg(long, default_value = "power_ops_core")]
        space: String,
        #[arg(long, default_value = "1")]
        version: String,
        /// Keep an existing output directory untouched
        #[arg(long)]
        no_overwrite: bool,
    },
    /// Check a schema without generating code
    Validate {
        #[arg(short, long, default_value = "schema")]
        schema: PathBuf,
        #[arg(long, default_value = "power_ops_core")]
        space: String,
        #[arg(long, default_value = "1")]
        version: String,
    },
    /// Run a GraphQL query against a data model
    Graphql {
        /// Data model external id, e.g. DayAheadBid
        #[arg(short, long)]
        model: String,
        #[arg(long, default_value = "power_ops_core")]
        space: String,
        #[arg(long, default_value = "1")]
        version: String,
        /// Query text
        #[arg(short, long, conflicts_with = "query_file")]
        query: Option<String>,
        #[arg(long)]
        query_file: Option<PathBuf>,
        /// Variables as a JSON object
        #[arg(long)]
        variables: Option<String>,
        /// Connection config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// TOML section holding the connection, defaults to `cognite`
        #[arg(long)]
        section: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let CargoCli::Powerops(cli) = CargoCli::parse();
    init_logging(cli.debug);

    let command: Box<dyn Command> = match cli.command {
        Commands::Generate {
            schema,
            out,
            sdk_path,
            space,
            version,
            no_overwrite,
        } => Box::new(GenerateCommand {
            schema,
            options: GenerationOptions {
                output_dir: out,
                sdk_path,
                default_space: space,
                default_version: version,
                overwrite: !no_overwrite,
            },
        }),
        Commands::Validate {
            schema,
            space,
            version,
        } => Box::new(ValidateCommand {
            schema,
            default_space: space,
            default_version: version,
        }),
        Commands::Graphql {
            model,
            space,
            version,
            query,
            query_file,
            variables,
            config,
            section,
        } => {
            let query = match (query, query_file) {
                (Some(query), _) => QuerySource::Inline(query),
                (None, Some(path)) => QuerySource::File(path),
                (None, None) => anyhow::bail!("Pass --query or --query-file"),
            };
            Box::new(GraphQlCommand {
                data_model: DataModelId::new(space, model, version),
                query,
                variables,
                config,
                section,
            })
        }
    };

    command.execute().await
}
