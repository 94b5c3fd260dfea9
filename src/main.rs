use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use vitrine::env::BuildEnv;
use vitrine::paths::{FsProbe, ProjectPaths};
use vitrine::{config, generate, output, scaffold, scan};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Static site generator for multi-client vitrine sites")]
#[command(long_about = "\
Static site generator for multi-client vitrine sites

Every client directory holds a sparse site.json; anything it leaves out comes
from the stock defaults. Pages are rendered from the shared template.

Project structure:

  template/                 # Shared templates (index.html, page.html, <page>.html)
  ├── partials/             # Included templates
  ├── assets/               # Copied into every client
  └── styles/               # Shared stylesheets (built-in fallback if absent)
  clients/
  ├── _starter/             # Copied by add-client, never built
  └── ink-co/
      ├── site.json         # { \"title\": \"Ink & Co\", \"theme\": { \"brand\": \"#0ea5e9\" } }
      ├── assets/           # Client assets, override shared ones
      └── pages/            # Per-client template overrides
  public/                   # Copied to the output root

Environment:
  PUBLIC_URL          Base path or absolute URL of the published output
  GITHUB_ACTIONS, CI  CI detection (base path becomes /<repository name>/)
  GITHUB_REPOSITORY   owner/name
  VITRINE_LOG         Log filter (error, warn, info, debug)

Run 'vitrine defaults <name>' to see the complete site.json a client gets.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Output directory (default: <root>/dist)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new client directory with a complete site.json
    AddClient {
        /// Client name; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Display title (defaults to the name)
        #[arg(long)]
        title: Option<String>,
    },
    /// Build every client into the output directory
    Build,
    /// Validate client configurations without building
    Check,
    /// Print the stock site.json for a client name
    Defaults {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("VITRINE_LOG", "info"))
        .format_timestamp(None)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let paths = ProjectPaths::resolve(&cli.root, cli.output.as_deref(), &FsProbe);

    match cli.command {
        Command::AddClient { name, title } => {
            let added = scaffold::add_client(&paths.clients, &name.join(" "), title.as_deref())?;
            output::print_add_client_output(&added, &cli.root);
        }
        Command::Build => {
            let env = BuildEnv::from_env();
            let report = generate::build(&paths, &env)?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let clients = scan::scan_clients(&paths.clients)?;
            output::print_check_output(&clients, &paths.clients);
        }
        Command::Defaults { name } => {
            println!("{}", config::stock_site_json(&name.join(" "))?);
        }
    }

    Ok(())
}
