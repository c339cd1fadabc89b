use anyhow::Context;
use clap::{Parser, Subcommand};
use kgraph::render::GraphRenderer;
use kgraph::shell::{championship, summary_table, Shell};
use kgraph::config::CONFIG_ENV;
use kgraph::AppConfig;
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kgraph", version, about = "Championship knowledge graph")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console (default)
    Shell,
    /// Build a sample championship and print it
    Demo {
        /// Also render the graph with Graphviz
        #[arg(long)]
        render: bool,

        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref())
        .context("could not load configuration")?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => run_shell(config),
        Commands::Demo { render, format } => run_demo(config, render, format),
    }
}

fn run_shell(config: AppConfig) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config);
    shell.run().context("console session failed")?;
    Ok(())
}

fn run_demo(config: AppConfig, render: bool, format: OutputFormat) -> anyhow::Result<()> {
    let (store, teams) = championship::sample_championship()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&store.snapshot())?);
        }
        OutputFormat::Table => {
            let summary = store.summarize();
            println!("KGraph v{}", kgraph::version());
            println!("Nodes: {}", summary.node_count);
            println!("Edges: {}", summary.edge_count);
            println!("{}", summary_table(&summary));

            for (name, &id) in &teams {
                let players = championship::players_of_team(&store, id);
                let wins = championship::games_won_by(&store, id);
                println!(
                    "{} ({}): players {:?}, wins {}",
                    name,
                    id,
                    players,
                    wins.len()
                );
            }
        }
    }

    if render {
        match GraphRenderer::new(config.render).render(&store) {
            Ok(path) => eprintln!("Rendered graph to {}", path.display()),
            Err(e) => warn!(error = %e, "graph rendering failed"),
        }
    }
    Ok(())
}
