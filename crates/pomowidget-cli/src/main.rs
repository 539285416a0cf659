use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod keymap;
mod render;

#[derive(Parser)]
#[command(name = "pomowidget", version, about = "Pomodoro countdown widget")]
struct Cli {
    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Run the widget in the foreground
    Run {
        /// Redraw interval in milliseconds
        #[arg(long, default_value_t = 250)]
        cadence_ms: u64,
        /// Ring the bell on every second, not just on completion
        #[arg(long)]
        audible_ticks: bool,
    },
    /// Set a mode's length in minutes
    Duration(commands::settings::DurationArgs),
    /// Show or change auto-chain flags
    AutoChain(commands::settings::AutoChainArgs),
    /// Show or change sound toggles
    Sounds(commands::settings::SoundsArgs),
    /// Number of focus periods before a long break (0 disables long breaks)
    LongBreakEvery {
        focus_periods: u32,
    },
    /// Reset all timer settings and the current session to defaults
    RestoreDefaults,
    /// Font and background
    Appearance {
        #[command(subcommand)]
        action: commands::appearance::AppearanceAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pomowidget={level},pomowidget_core={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Run {
            cadence_ms,
            audible_ticks,
        } => commands::run::run(cadence_ms, audible_ticks),
        Commands::Duration(args) => commands::settings::duration(args),
        Commands::AutoChain(args) => commands::settings::auto_chain(args),
        Commands::Sounds(args) => commands::settings::sounds(args),
        Commands::LongBreakEvery { focus_periods } => {
            commands::settings::long_break_every(focus_periods)
        }
        Commands::RestoreDefaults => commands::settings::restore_defaults(),
        Commands::Appearance { action } => commands::appearance::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pomowidget", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
