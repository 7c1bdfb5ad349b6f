use clap::{Parser, Subcommand};
use roadindex::Config;
use std::path::PathBuf;

mod commands;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (JSON, or TOML by extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split a road collection into one collection per category
    Split {
        /// Source GeoJSON FeatureCollection
        input: PathBuf,

        /// Directory the per-category files are written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Build the search index from per-category collections
    Index {
        /// Directory holding the per-category files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Index file to write (default: public/<index_file> under --dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Query a search index
    Search {
        /// Index file to read
        index: PathBuf,

        /// Substring of the road name
        #[arg(long, default_value = "")]
        name: String,

        /// Exact road class
        #[arg(long, default_value = "")]
        fclass: String,

        /// Reference code
        #[arg(long = "ref", default_value = "")]
        reference: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadindex=info,roadindex_cli=info,info".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match args.command {
        Command::Split { input, out_dir } => commands::split(&config, &input, &out_dir),
        Command::Index { dir, output } => {
            let output = output.unwrap_or_else(|| dir.join("public").join(&config.index_file));
            commands::index(&config, &dir, &output)
        }
        Command::Search {
            index,
            name,
            fclass,
            reference,
        } => {
            let query = roadindex::SearchQuery {
                name,
                fclass,
                reference,
            };
            commands::search(&index, &query, &mut std::io::stdout().lock())
        }
    }
}
