use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_agent::logging::init_logging;
use job_agent::outreach::{draft_messages, ProfileSearch};
use job_agent::utils::write_file_content;
use job_agent::web::AppState;
use job_agent::{start_web_server, ConfigManager, JobParser};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "job-agent", about = "Parse job postings and find people to reach out to")]
struct Cli {
    /// Config file (defaults to $JOB_AGENT_CONFIG or ./config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Also log to the console
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the structured job record from a posting URL
    Parse {
        #[arg(long)]
        url: String,
        /// Write the record here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a posting, search for matching profiles and save them
    Run {
        #[arg(long)]
        url: String,
        #[arg(short, long, default_value = "profiles.json")]
        output: PathBuf,
        /// Attach a drafted outreach message to every profile
        #[arg(long)]
        draft: bool,
    },
    /// Start the HTTP API
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ConfigManager::load_from(path)?,
        None => ConfigManager::load()?,
    };
    if cli.verbose {
        config.logging.console = true;
    }
    init_logging(&config.logging)?;

    let parser = JobParser::from_config(&config)?;

    match cli.command {
        Commands::Parse { url, output } => {
            let job = parser.extract_job(&url).await?;
            let json = serde_json::to_string_pretty(&job).context("Failed to serialize job")?;
            match output {
                Some(path) => {
                    write_file_content(&path, &json).await?;
                    info!("Job record saved to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Run { url, output, draft } => {
            info!("Starting job parsing: {}", url);
            let job = parser.extract_job(&url).await.map_err(|e| {
                error!("Failed to parse job {}: {:#}", url, e);
                e
            })?;

            let search = ProfileSearch::new(&config.search.base_url, config.search.api_key.clone())?;
            let profiles = search
                .search_profiles(&job.title, &job.company, &job.location)
                .await?;

            let json = if draft {
                serde_json::to_string_pretty(&draft_messages(&profiles, &config.outreach))
            } else {
                serde_json::to_string_pretty(&profiles)
            }
            .context("Failed to serialize profiles")?;

            write_file_content(&output, &json).await?;
            info!("{} profiles saved to {}", profiles.len(), output.display());
            println!("{} profiles saved to {}", profiles.len(), output.display());
        }
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let state = AppState {
                parser,
                search: ProfileSearch::new(&config.search.base_url, config.search.api_key.clone())?,
                outreach: config.outreach.clone(),
            };
            start_web_server(state, port).await?;
        }
    }

    Ok(())
}
