#![forbid(unsafe_code)]

mod cmd;
mod output;
mod project;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "kin",
    author,
    version,
    about = "kin: an entry graph with family-style relations",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Overrides --json, KIN_FORMAT, and the user config.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        let user_output = match kin_core::config::load_user_config() {
            Ok(config) => config.output,
            Err(err) => {
                warn!("ignoring user config: {err:#}");
                None
            }
        };
        output::resolve_output_mode(self.format, self.json, user_output.as_deref())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Project",
        about = "Initialize a kin project",
        long_about = "Create .kin/ with a default config.toml in the current directory.",
        after_help = "EXAMPLES:\n    # Initialize a project in the current directory\n    kin init\n\n    # Rewrite the config, keeping stored entries\n    kin init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Add entries",
        long_about = "Get or create entries by title. Existing titles are left untouched.",
        after_help = "EXAMPLES:\n    # Add one entry\n    kin add \"Ada\"\n\n    # Add several\n    kin add Ada Byron Clara"
    )]
    Add(cmd::add::AddArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Link two entries as parent and child",
        long_about = "Link two entries as parent and child, creating either if needed. \
                      A link in the opposite direction is replaced.",
        after_help = "EXAMPLES:\n    # Byron becomes a child of Ada\n    kin give Ada --child Byron\n\n    # Clara becomes a parent of Ada\n    kin give Ada --parent Clara\n\n    # Refuse links that make an entry its own ancestor\n    kin give Ada --child Clara --reject-cycles"
    )]
    Give(cmd::give::GiveArgs),

    #[command(
        next_help_heading = "Edit",
        about = "Remove the link between two entries",
        after_help = "EXAMPLES:\n    # Unlink Ada and Byron, whichever direction the link runs\n    kin detach Ada Byron"
    )]
    Detach(cmd::detach::DetachArgs),

    #[command(
        next_help_heading = "Read",
        about = "List entries",
        long_about = "List every entry with its parents and children, in creation order.",
        after_help = "EXAMPLES:\n    # List all entries\n    kin list\n\n    # Emit machine-readable output\n    kin list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the relations around one entry",
        long_about = "Classify every entry near the focus into the twelve relation codes \
                      and lay them out in generation columns.",
        after_help = "EXAMPLES:\n    # Column view\n    kin show Ada\n\n    # Only the siblings\n    kin show Ada --code ud\n\n    # Report a subset of titles\n    kin show Ada --only Byron,Clara\n\n    # Emit machine-readable output\n    kin show Ada --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Export all entries as JSON",
        after_help = "EXAMPLES:\n    # Print the snapshot\n    kin export\n\n    # Write it to a file\n    kin export --output entries.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Replace all entries from a JSON export",
        after_help = "EXAMPLES:\n    # Restore a snapshot\n    kin import entries.json"
    )]
    Import(cmd::import::ImportArgs),

    #[command(
        next_help_heading = "Project",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    kin completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("KIN_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "kin=debug,info"
        } else {
            "kin=info,warn"
        })
    });

    let format = env::var("KIN_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, &project_root),
        Commands::Add(ref args) => cmd::add::run_add(args, output, &project_root),
        Commands::Give(ref args) => cmd::give::run_give(args, output, &project_root),
        Commands::Detach(ref args) => cmd::detach::run_detach(args, output, &project_root),
        Commands::List(ref args) => cmd::list::run_list(args, output, &project_root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &project_root),
        Commands::Export(ref args) => cmd::export::run_export(args, output, &project_root),
        Commands::Import(ref args) => cmd::import::run_import(args, output, &project_root),
        Commands::Completions(ref args) => cmd::completions::run_completions(args, Cli::command()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = cli.output_mode();

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::report_failure(output, &err);
            ExitCode::FAILURE
        }
    }
}
