mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    backlog::BacklogSubcommand, inventory::InventorySubcommand, phase::PhaseSubcommand,
    review::ReviewSubcommand, tree::TreeSubcommand, Secrets,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "architect",
    about = "Lovable architect: roadmap tree, backlog, builder prompts and code review",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .architect/ or .git/)
    #[arg(long, global = true, env = "ARCHITECT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create .architect/ with a default config and tracking document
    Init {
        /// Project name shown on the dashboard
        #[arg(long)]
        project: Option<String>,
    },

    /// Run the dashboard and API server
    Serve {
        /// Port to listen on (0 = OS-assigned)
        #[arg(long, default_value = "3000", env = "PORT")]
        port: u16,

        /// Open the dashboard in a browser
        #[arg(long)]
        open: bool,

        /// Dashboard user added on top of config.yaml
        #[arg(long, env = "ARCHITECT_ADMIN_USER", requires = "admin_password")]
        admin_user: Option<String>,

        #[arg(long, env = "ARCHITECT_ADMIN_PASS", hide_env_values = true)]
        admin_password: Option<String>,

        #[command(flatten)]
        secrets: Secrets,
    },

    /// Edit the roadmap task tree
    Tree {
        #[command(subcommand)]
        subcommand: TreeSubcommand,
    },

    /// Manage the feature backlog
    Backlog {
        #[command(subcommand)]
        subcommand: BacklogSubcommand,
    },

    /// Phase progress and the per-phase item log
    Phase {
        #[command(subcommand)]
        subcommand: PhaseSubcommand,
    },

    /// Cached GitHub repository inventory
    Inventory {
        #[command(subcommand)]
        subcommand: InventorySubcommand,

        #[command(flatten)]
        secrets: Secrets,
    },

    /// Generate a builder prompt for a feature
    Prompt {
        /// Feature description
        #[arg(required = true)]
        feature: Vec<String>,

        /// Phase key, e.g. 1.2
        #[arg(long, default_value = "1.1")]
        phase: String,

        /// Extra context appended to the request
        #[arg(long)]
        context: Option<String>,

        /// Output shape: command or blueprint
        #[arg(long, default_value = "command")]
        mode: architect_core::prompt::PromptMode,

        #[command(flatten)]
        secrets: Secrets,
    },

    /// Review a pull request or commit and post the result to GitHub
    Review {
        #[command(subcommand)]
        subcommand: ReviewSubcommand,

        #[command(flatten)]
        secrets: Secrets,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init { project } => cmd::init::run(&root, project.as_deref(), cli.json),
        Commands::Serve {
            port,
            open,
            admin_user,
            admin_password,
            secrets,
        } => {
            let admin = admin_user.zip(admin_password);
            cmd::serve::run(&root, port, open, admin, secrets)
        }
        Commands::Tree { subcommand } => cmd::tree::run(&root, subcommand, cli.json),
        Commands::Backlog { subcommand } => cmd::backlog::run(&root, subcommand, cli.json),
        Commands::Phase { subcommand } => cmd::phase::run(&root, subcommand, cli.json),
        Commands::Inventory {
            subcommand,
            secrets,
        } => cmd::inventory::run(&root, subcommand, secrets, cli.json),
        Commands::Prompt {
            feature,
            phase,
            context,
            mode,
            secrets,
        } => cmd::prompt::run(
            &root,
            cmd::prompt::PromptArgs {
                feature: feature.join(" "),
                phase,
                context,
                mode,
            },
            secrets,
            cli.json,
        ),
        Commands::Review {
            subcommand,
            secrets,
        } => cmd::review::run(&root, subcommand, secrets, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
