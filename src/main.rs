use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use version_hook::hook::input::HookInput;
use version_hook::hook::runner::Pipeline;

#[derive(Parser)]
#[command(name = "version-hook")]
#[command(
    version,
    about = "PostToolUse hook that flags major version diffs on package installs"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the research cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Print the cache file location
    Path,
    /// Delete the cache file
    Clear,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Cache { action }) => run_cache_command(action),
        None => run_hook(),
    }
}

fn run_cache_command(action: CacheAction) -> ExitCode {
    let path = version_hook::config::cache_file();

    match action {
        CacheAction::Path => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        CacheAction::Clear => match version_hook::research::cache::clear(&path) {
            Ok(true) => {
                eprintln!("Removed {}", path.display());
                ExitCode::SUCCESS
            }
            Ok(false) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Failed to remove {}: {}", path.display(), e);
                ExitCode::FAILURE
            }
        },
    }
}

/// Reads one hook event from stdin and runs the pipeline.
///
/// Exit status 2 tells the host to surface the context to the user and the
/// agent; every no-op and failure path exits 0 so a broken hook never blocks
/// the tool call it observes.
fn run_hook() -> ExitCode {
    init_tracing();

    let Ok(raw) = std::io::read_to_string(std::io::stdin()) else {
        return ExitCode::SUCCESS;
    };
    let Ok(input) = serde_json::from_str::<HookInput>(&raw) else {
        return ExitCode::SUCCESS;
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let Ok(runtime) = tokio::runtime::Builder::new_multi_thread().enable_all().build() else {
        return ExitCode::SUCCESS;
    };

    let pipeline = Pipeline::new(cwd);
    match runtime.block_on(pipeline.run(&input)) {
        Some(output) => match serde_json::to_string(&output) {
            Ok(json) => {
                println!("{json}");
                ExitCode::from(2)
            }
            Err(_) => ExitCode::SUCCESS,
        },
        None => ExitCode::SUCCESS,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
