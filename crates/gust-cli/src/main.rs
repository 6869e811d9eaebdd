use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gust-cli", version, about = "Gust breathing workouts CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Workout catalogue management
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// Run a breathing session in the terminal
    Start(commands::start::StartArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Start(args) => commands::start::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
