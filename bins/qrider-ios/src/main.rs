//! QRiderRD iOS CLI
//!
//! Xcode project tools for the QRiderRD mobile app.

use anyhow::Result;
use clap::{Parser, Subcommand};
use qrider_cli::output::Status;
use qrider_core::config::Config;
use qrider_core::error::exit_codes;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qrider-ios")]
#[command(about = "Xcode project tools for the QRiderRD mobile app")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Xcode project management
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// Register the ride-tracking module and Firebase config in the project
    #[command(name = "setup-tracking")]
    SetupTracking {
        /// Path to .xcodeproj (defaults to the configured project)
        #[arg(long)]
        project: Option<PathBuf>,

        /// Bundle identifier to write into the app configurations
        #[arg(long)]
        bundle_id: Option<String>,

        /// Patch in memory only, don't write the descriptor
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("qrider_ios=debug,qrider_core=debug")
            .init();
    }

    let config = Config::load(cli.config.as_deref().map(|p| p.to_str().unwrap()))?;

    let exit_code = match cli.command {
        Commands::Project { action } => run_project(action, &config),
    };

    std::process::exit(exit_code);
}

fn run_project(action: ProjectAction, config: &Config) -> i32 {
    use owo_colors::OwoColorize;
    use qrider_ios::pbxproj::ProjectPatcher;

    match action {
        ProjectAction::SetupTracking { project, bundle_id, dry_run } => {
            let project =
                project.unwrap_or_else(|| PathBuf::from(&config.schema.xcode.project));
            let bundle_id =
                bundle_id.unwrap_or_else(|| config.schema.xcode.bundle_id.clone());

            Status::info(&format!("Patching {}...", project.display()));
            if dry_run {
                println!("{}", "  (Dry run - no files will be modified)".yellow());
            }

            let mut patcher = match ProjectPatcher::open(&project) {
                Ok(p) => p,
                Err(e) => {
                    Status::error(&format!("Failed to open project: {}", e));
                    return exit_codes::FAILURE;
                }
            };

            let summary = patcher.install_tracking(&bundle_id);

            if !dry_run {
                if let Err(e) = patcher.save() {
                    Status::error(&format!("Failed to write project descriptor: {}", e));
                    return exit_codes::FAILURE;
                }
            }

            println!();
            summary.print();

            if !summary.resources_patched {
                Status::warning(
                    "Resources build phase not found; GoogleService-Info.plist was not attached",
                );
            }

            if dry_run {
                println!();
                println!(
                    "{}",
                    "✅ Dry run complete! Run without --dry-run to apply changes.".green().bold()
                );
            }

            exit_codes::SUCCESS
        }
    }
}
