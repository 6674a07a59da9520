use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nearclass-cli", version, about = "Classes happening soon, near you")]
struct Cli {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch raw class sessions from the catalog API
    Fetch(commands::fetch::FetchArgs),
    /// List department codes known to the catalog API
    Depts(commands::depts::DeptsArgs),
    /// Normalize raw sessions into the meeting table
    Build(commands::build::BuildArgs),
    /// Rank meetings by time and distance
    Rank(commands::rank::RankArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Depts(args) => commands::depts::run(args),
        Commands::Build(args) => commands::build::run(args),
        Commands::Rank(args) => commands::rank::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
