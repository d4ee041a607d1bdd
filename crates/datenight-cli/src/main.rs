mod config;
mod generate_cmd;
mod ideas_cmd;
mod plan_cmds;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use datenight_core::idea::options::{DEFAULT_BUDGET, DEFAULT_MOOD};
use datenight_core::{HuggingFaceGenerator, IdeaClient, IdeaService};
use datenight_store::{FileBlobStore, PlanStore};

use config::DatenightConfig;
use generate_cmd::GenerateOptions;

#[derive(Parser)]
#[command(name = "datenight", about = "Plan date nights: curated and generated ideas, and a local plan list")]
struct Cli {
    /// Base URL of the idea API (overrides DATENIGHT_API_URL env var)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding saved plans (overrides DATENIGHT_DATA_DIR env var)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a datenight config file
    Init {
        /// Hugging Face access token to store in the config file
        #[arg(long)]
        api_key: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Run the idea HTTP endpoint
    Serve {
        /// Address to bind (default 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (default 3000)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate a date idea through the idea API
    Generate {
        /// Mood, e.g. romantic, adventurous, casual, fun, intimate, exciting
        #[arg(long, default_value = DEFAULT_MOOD)]
        mood: String,
        /// Budget: low, medium or high
        #[arg(long, default_value = DEFAULT_BUDGET)]
        budget: String,
        /// Location preference, e.g. a city or neighbourhood
        #[arg(long)]
        location: Option<String>,
        /// Time of day: morning, afternoon, evening or night
        #[arg(long)]
        time_of_day: Option<String>,
        /// Occasion, e.g. "first date", anniversary, birthday
        #[arg(long)]
        occasion: Option<String>,
        /// Save the generated idea as a plan (requires --date)
        #[arg(long, requires = "date")]
        save: bool,
        /// Plan date when saving (YYYY-MM-DD)
        #[arg(long, requires = "save")]
        date: Option<String>,
        /// Plan time when saving (HH:MM, 24-hour)
        #[arg(long, requires = "save")]
        time: Option<String>,
        /// Plan location when saving
        #[arg(long, requires = "save")]
        plan_location: Option<String>,
    },
    /// List curated date ideas
    Ideas {
        /// Also list the known moods, budgets, times of day and occasions
        #[arg(long)]
        options: bool,
    },
    /// Saved plan management
    Plan {
        #[command(subcommand)]
        command: PlanCommands,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Save a new plan
    Add {
        /// Plan title
        title: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Time (HH:MM, 24-hour)
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Notes (Markdown). Defaults to the description of a curated idea
        /// with the same title, if any.
        #[arg(long)]
        notes: Option<String>,
    },
    /// List saved plans, most recent date first
    List,
    /// Show one plan
    Show {
        /// Plan ID
        id: i64,
        /// Print the notes rendered as HTML
        #[arg(long)]
        html: bool,
    },
    /// Change fields of a saved plan (pass "" to clear time, location or notes)
    Edit {
        /// Plan ID
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a saved plan
    Delete {
        /// Plan ID
        id: i64,
    },
}

/// Execute the `datenight init` command: write config file.
fn cmd_init(api_key: Option<String>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let has_key = api_key.is_some();
    let cfg = config::starter_config(api_key);
    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    if let Some(model) = &cfg.provider.model {
        println!("  provider.model = {model}");
    }
    if let Some(url) = &cfg.client.api_url {
        println!("  client.api_url = {url}");
    }
    if has_key {
        println!("  provider.api_key = (set)");
    } else {
        println!();
        println!("No API key stored. Set HUGGINGFACE_API_KEY or add provider.api_key before `datenight serve`.");
    }

    Ok(())
}

fn open_store(resolved: &DatenightConfig) -> PlanStore<FileBlobStore> {
    PlanStore::new(FileBlobStore::new(resolved.store.data_dir.clone()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { api_key, force } => {
            cmd_init(api_key, force)?;
        }
        Commands::Serve { bind, port } => {
            let resolved = DatenightConfig::resolve(cli.api_url.as_deref(), cli.data_dir.as_deref());
            let generator = Arc::new(HuggingFaceGenerator::new(resolved.provider.base_url.clone()));
            let service = Arc::new(IdeaService::new(resolved.provider, generator));
            let bind = bind.unwrap_or(resolved.bind);
            let port = port.unwrap_or(resolved.port);
            serve_cmd::run_serve(service, &bind, port).await?;
        }
        Commands::Generate {
            mood,
            budget,
            location,
            time_of_day,
            occasion,
            save,
            date,
            time,
            plan_location,
        } => {
            let resolved = DatenightConfig::resolve(cli.api_url.as_deref(), cli.data_dir.as_deref());
            let client = IdeaClient::new(resolved.api_url.clone());
            let store = open_store(&resolved);
            let options = GenerateOptions {
                mood,
                budget,
                location,
                time_of_day,
                occasion,
                save_date: if save { date } else { None },
                save_time: time,
                save_location: plan_location,
            };
            generate_cmd::run_generate(&client, &store, options).await?;
        }
        Commands::Ideas { options } => {
            ideas_cmd::run_ideas(options);
        }
        Commands::Plan { command } => {
            let resolved = DatenightConfig::resolve(cli.api_url.as_deref(), cli.data_dir.as_deref());
            let store = open_store(&resolved);
            plan_cmds::run_plan_command(command, &store)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "datenight", &mut std::io::stdout());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_save_requires_date() {
        let result = Cli::try_parse_from(["datenight", "generate", "--save"]);
        assert!(result.is_err());
        let cli = Cli::try_parse_from(["datenight", "generate", "--save", "--date", "2024-06-01"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Generate { save: true, .. }));
    }

    #[test]
    fn generate_defaults_mood_and_budget() {
        let cli = Cli::try_parse_from(["datenight", "generate"]).unwrap();
        match cli.command {
            Commands::Generate { mood, budget, .. } => {
                assert_eq!(mood, "romantic");
                assert_eq!(budget, "medium");
            }
            _ => panic!("expected generate"),
        }
    }
}
