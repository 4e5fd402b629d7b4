//! create-koa - Project scaffolding for Koa.js servers

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use koa_scaffold_core::config::{CreateOptions, FeatureName, PackageManager, Template};
use koa_scaffold_core::runtime;
use koa_scaffold_core::templates::{version, TemplateStore};
use std::path::PathBuf;

/// CLI version - used for template compatibility checking
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command shown in update advisories
const UPGRADE_COMMAND: &str = "cargo install create-koa --force";

#[derive(Parser, Debug)]
#[command(name = "create-koa")]
#[command(about = "CLI for scaffolding Koa.js server projects")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Koa project
    Create(CreateArgs),
    /// Check whether the bundled templates expect a newer CLI
    Update(UpdateArgs),
    /// Print CLI and template version strings
    Version,
    /// Show bundled templates and detected local tooling
    Info,
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Name of the project to create
    pub project_name: String,

    /// Template to use
    #[arg(short, long, value_enum)]
    pub template: Option<Template>,

    /// Path to a JSON or YAML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Features to enable (comma-separated: logging,cors,helmet,rate-limit,swagger,redis)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub features: Option<Vec<FeatureName>>,

    /// Package manager to install dependencies with
    #[arg(short, long, value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Generate TypeScript sources
    #[arg(long, overrides_with = "no_typescript")]
    pub typescript: bool,

    /// Generate JavaScript sources
    #[arg(long = "no-typescript", overrides_with = "typescript")]
    pub no_typescript: bool,

    /// Skip dependency installation
    #[arg(long)]
    pub skip_install: bool,

    /// Skip git repository initialization
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Overwrite the target directory if it already exists
    #[arg(long)]
    pub force: bool,

    /// Accept defaults for everything not given on the command line
    /// (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl CreateArgs {
    fn to_options(&self) -> CreateOptions {
        // Neither flag given means "let the other sources decide"
        let typescript = match (self.typescript, self.no_typescript) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        CreateOptions {
            template: self.template,
            config: self.config.clone(),
            features: self.features.clone(),
            package_manager: self.package_manager,
            typescript,
            skip_install: self.skip_install,
            no_git: self.no_git,
            force: self.force,
            yes: self.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Only report status, never modify anything
    #[arg(long)]
    pub check_only: bool,

    /// Reserved for when remote template updates land
    #[arg(long)]
    pub force: bool,
}

fn print_version(store: &TemplateStore) {
    println!("create-koa {CLI_VERSION}");
    for name in store.names() {
        if let Some(manifest) = store.manifest_by_name(name) {
            println!("template {name} {}", manifest.version);
        }
    }
}

fn print_info(store: &TemplateStore) {
    println!("{}", "create-koa".cyan().bold());
    println!("  version: {CLI_VERSION}");
    println!();

    println!("{}", "Templates".cyan().bold());
    for name in store.names() {
        if let Some(manifest) = store.manifest_by_name(name) {
            println!(
                "  {} ({}) - {}",
                manifest.name.bold(),
                manifest.version,
                manifest.description
            );
        }
    }
    println!();

    println!("{}", "Local tooling".cyan().bold());
    for info in runtime::detect_all() {
        match &info.version {
            Some(v) => println!("  {} {}", info.name, v.green()),
            None => println!("  {} {}", info.name, "not installed".dimmed()),
        }
    }
}

fn run_update(store: &TemplateStore, args: &UpdateArgs) {
    // Templates ship inside the binary, so there is nothing to fetch; this
    // reports whether any bundled template expects a newer CLI.
    let mut advisories = 0;
    for name in store.names() {
        let Some(manifest) = store.manifest_by_name(name) else {
            continue;
        };
        match version::check_update(CLI_VERSION, &manifest.version, UPGRADE_COMMAND) {
            Some(warning) => {
                advisories += 1;
                println!(
                    "{} template '{}': {}",
                    "!".yellow().bold(),
                    name,
                    warning.lines().next().unwrap_or(&warning)
                );
            }
            None => {
                println!("{} template '{}' is compatible", "ok".green(), name);
            }
        }
    }

    if advisories > 0 {
        println!();
        println!("Update the CLI to pick up newer templates: {UPGRADE_COMMAND}");
    } else if !args.check_only {
        println!();
        println!("Templates are bundled with the CLI; nothing to update.");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Command::Create(create_args) => {
            let options = create_args.to_options();
            let result =
                koa_scaffold_core::run(&create_args.project_name, options, CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Command::Update(update_args) => {
            let store = TemplateStore::bundled()?;
            run_update(&store, &update_args);
            Ok(())
        }
        Command::Version => {
            let store = TemplateStore::bundled()?;
            print_version(&store);
            Ok(())
        }
        Command::Info => {
            let store = TemplateStore::bundled()?;
            print_info(&store);
            Ok(())
        }
    }
}
