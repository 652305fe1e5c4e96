//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// logicmap - compile business-logic manifests into diagrams
#[derive(Parser)]
#[command(name = "logicmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the manifest (defaults to the nearest logic-manifest.json)
    #[arg(short, long, global = true, env = "LOGICMAP_MANIFEST")]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Emit the module dependency graph
    Deps(OutputArgs),

    /// Emit the flowchart of one flow
    Flow(FlowArgs),

    /// Emit the state diagram of one state machine
    States(StatesArgs),

    /// Emit the mind-map outline of the whole manifest
    Mindmap(OutputArgs),

    /// Emit every diagram of the manifest into a directory
    Render(RenderArgs),

    /// Check the manifest for dangling references and id collisions
    Lint(LintArgs),

    /// List modules, flows and state machines
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct OutputArgs {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct FlowArgs {
    /// Module id
    pub module: String,

    /// Flow id
    pub flow: String,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Args)]
pub struct StatesArgs {
    /// Module id
    pub module: String,

    /// State machine id
    pub machine: String,

    #[command(flatten)]
    pub out: OutputArgs,
}

#[derive(Args)]
pub struct RenderArgs {
    /// Output directory (defaults to `render.out_dir` or ./diagrams)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct LintArgs {
    /// Exit with an error if any warning is reported
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// List projects from a published index file instead
    #[arg(long, conflicts_with = "scan")]
    pub index: Option<PathBuf>,

    /// List every manifest found below a directory instead
    #[arg(long)]
    pub scan: Option<PathBuf>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,

    /// Write the completion script into this directory instead of stdout
    #[arg(long)]
    pub dir: Option<PathBuf>,
}
