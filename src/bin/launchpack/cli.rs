//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use launchpack::util::shell::ColorChoice;

/// launchpack - assemble installable launcher packages
#[derive(Parser)]
#[command(name = "launchpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Project directory the launcher tree and config live in (defaults to
    /// the current directory)
    #[arg(short = 'C', long, global = true, env = "LAUNCHPACK_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the platform profile selected for a host
    Profile(ProfileArgs),

    /// Build the manifest and write it as a package document
    Manifest(ManifestArgs),

    /// Lay the package payload out in a staging directory
    Stage(StageArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Host selection shared by every command that picks a profile.
#[derive(Args, Clone, Default)]
pub struct PlatformArgs {
    /// Operating system to select a profile for (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Processor architecture to select a profile for (defaults to the host)
    #[arg(long)]
    pub arch: Option<String>,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Print the profile as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ManifestArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Write the document to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail when the host has no platform profile
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct StageArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Staging directory (defaults to `stage` in the project directory)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Show what would be staged without copying anything
    #[arg(long)]
    pub dry_run: bool,

    /// Fail when the host has no platform profile
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
