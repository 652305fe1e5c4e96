//! logicmap CLI - compile business-logic manifests into diagrams

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use logicmap::core::ManifestError;
use logicmap::ops::SelectError;
use logicmap::util::diagnostic::{emit, suggestions};
use logicmap::GlobalContext;

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("logicmap=debug")
    } else {
        EnvFilter::new("logicmap=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_color(!cli.no_color);

    let manifest = cli.manifest.as_deref();

    // Execute command
    match cli.command {
        Commands::Deps(args) => commands::deps::execute(&ctx, manifest, args),
        Commands::Flow(args) => commands::flow::execute(&ctx, manifest, args),
        Commands::States(args) => commands::states::execute(&ctx, manifest, args),
        Commands::Mindmap(args) => commands::mindmap::execute(&ctx, manifest, args),
        Commands::Render(args) => commands::render::execute(&ctx, manifest, args),
        Commands::Lint(args) => commands::lint::execute(&ctx, manifest, args),
        Commands::List(args) => commands::list::execute(&ctx, manifest, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print an error, using the structured diagnostic where one exists.
fn report(err: &anyhow::Error, color: bool) {
    if let Some(select) = err.downcast_ref::<SelectError>() {
        emit(&select.to_diagnostic(), color);
        return;
    }

    eprintln!("error: {:#}", err);
    if matches!(
        err.downcast_ref::<ManifestError>(),
        Some(ManifestError::NotFound { .. })
    ) {
        eprintln!("{}", suggestions::NO_MANIFEST);
    }
}
