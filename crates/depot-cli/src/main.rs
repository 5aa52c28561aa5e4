mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "depot")]
#[command(about = "Fetch and update Carthage, SwiftPM, and CocoaPods dependencies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install dependencies declared in Depot/Dependencies.toml
    Fetch {
        /// Project root
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Update dependencies to the newest allowed versions
    Update {
        /// Project root
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Manage CocoaPods dependencies
    Pods {
        #[command(subcommand)]
        action: PodsAction,
    },

    /// Print where dependencies are materialized
    Where {
        /// Project root
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum PodsAction {
    /// Install pods, honoring Podfile.lock
    Fetch {
        /// Project root
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Update pods to the newest allowed versions
    Update {
        /// Project root
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Fetch { path } => commands::dependencies::fetch(&path),
        Command::Update { path } => commands::dependencies::update(&path),
        Command::Pods { action } => match action {
            PodsAction::Fetch { path } => commands::pods::fetch(&path),
            PodsAction::Update { path } => commands::pods::update(&path),
        },
        Command::Where { path } => commands::dependencies::locate(&path),
    }
}
