use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use cueshot_core::TargetGroup;
use cueshot_core::presenter::Feedback;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "cueshot=info,feedback=info";

#[derive(Parser)]
#[command(name = "cueshot")]
#[command(about = "CUESHOT - AI shot recommendations for pool table photos", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend the next shot for a table photo
    Analyze {
        /// Photo of the table
        image: PathBuf,

        /// Ball group you are playing (solids or stripes)
        #[arg(short, long)]
        target: TargetGroup,

        /// API key; overrides secret.json and the environment
        #[arg(long)]
        api_key: Option<String>,

        /// Write the image with the shot overlay to this SVG file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Leave the overlay out of the SVG
        #[arg(long)]
        no_overlay: bool,

        /// Print the raw analysis as JSON instead of the summary
        #[arg(long)]
        json: bool,

        /// Rate the recommendation
        #[arg(long, value_enum)]
        rate: Option<Rating>,
    },
    /// Print the response schema sent to the model
    Schema {
        /// Also print the instructions for this target group
        #[arg(long)]
        prompt: Option<TargetGroup>,
    },
    /// Show where configuration and the API key are read from
    Config {
        /// API key to consider, as `analyze --api-key` would
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Rating {
    Up,
    Down,
}

impl From<Rating> for Feedback {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Up => Feedback::Up,
            Rating::Down => Feedback::Down,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "cueshot=debug,feedback=info"
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            image,
            target,
            api_key,
            out,
            no_overlay,
            json,
            rate,
        } => {
            let options = commands::analyze::AnalyzeOptions {
                image,
                target,
                api_key,
                out,
                overlay: !no_overlay,
                json,
                feedback: rate.map(Feedback::from),
            };
            commands::analyze::run(options).await?
        }
        Commands::Schema { prompt } => commands::schema::print(prompt)?,
        Commands::Config { api_key } => commands::config::show(api_key)?,
    }

    Ok(())
}
