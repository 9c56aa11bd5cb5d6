//! Nebula CLI binary: serve the HTTP API, manage projects, and run the prompt node locally.
//!
//! Subcommands: `serve`, `list`, `show`, `save`, `node describe`, `node run`.

use clap::{Parser, Subcommand};
use cli::{
    build_vars, describe_node, list_projects, read_json_object, run_node, save_project,
    show_project, write_json, CliError, NodeFormat,
};
use config::Settings;
use nebula::{FsProjectStore, ProjectStore};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "nebula")]
#[command(about = "Nebula — named prompt projects with typed variables")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Base directory holding the Nebula-Image-Manager folder (default: NEBULA_BASE_PATH or current dir)
    #[arg(long, global = true, value_name = "DIR")]
    base_path: Option<PathBuf>,

    /// Verbose: debug-level logs
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pretty-print JSON output (multi-line). Default: compact, one line
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP server (GET list, GET load, POST save under /nebula_image_manager)
    Serve(ServeArgs),
    /// List stored project files
    List,
    /// Show one project as the load endpoint returns it
    Show {
        /// Project name (".json" optional)
        name: String,
    },
    /// Create or overwrite a project
    Save(SaveArgs),
    /// Describe or run the prompt manager node
    Node(NodeArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address (default: NEBULA_ADDR or 127.0.0.1:8188)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct SaveArgs {
    /// Project name (".json" optional)
    name: String,
    #[arg(long, default_value = "")]
    positive: String,
    #[arg(long, default_value = "")]
    negative: String,
    /// Variable slot as KEY:TYPE:VALUE (repeat up to 5 times; slots fill in order)
    #[arg(long = "var", value_name = "KEY:TYPE:VALUE")]
    vars: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct NodeArgs {
    #[command(subcommand)]
    sub: NodeCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum NodeCommand {
    /// Print the node descriptor (inputs, outputs, category)
    Describe {
        /// Print YAML instead of JSON
        #[arg(long)]
        yaml: bool,
    },
    /// Run the node on a JSON object of inputs and print the seven outputs
    Run {
        /// Input file (default: stdin)
        #[arg(long, value_name = "PATH")]
        input: Option<PathBuf>,
    },
}

async fn run_command(args: Args, settings: Settings) -> Result<(), CliError> {
    let base_path = args.base_path.clone().unwrap_or_else(|| settings.base_path.clone());
    let store = Arc::new(FsProjectStore::new(&base_path));
    let mut stdout = std::io::stdout();

    match args.cmd {
        Command::Serve(sa) => {
            let addr = sa.addr.unwrap_or(settings.addr);
            info!(root = %store.root().display(), "serving projects");
            let (tx, rx) = oneshot::channel();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    let _ = tx.send(());
                }
            });
            serve::run_serve(&addr, store as Arc<dyn ProjectStore>, Some(rx))
                .await
                .map_err(|e| CliError::Serve(e.to_string()))?;
        }
        Command::List => {
            let value = list_projects(store.as_ref()).await?;
            write_json(&mut stdout, &value, args.pretty)?;
        }
        Command::Show { name } => {
            let value = show_project(store.as_ref(), &name).await?;
            write_json(&mut stdout, &value, args.pretty)?;
        }
        Command::Save(sa) => {
            let vars = build_vars(&sa.vars)?;
            let value =
                save_project(store.as_ref(), &sa.name, &sa.positive, &sa.negative, &vars).await?;
            write_json(&mut stdout, &value, args.pretty)?;
        }
        Command::Node(na) => match na.sub {
            NodeCommand::Describe { yaml } => {
                let format = if yaml { NodeFormat::Yaml } else { NodeFormat::Json };
                println!("{}", describe_node(format)?.trim_end());
            }
            NodeCommand::Run { input } => {
                let params = read_json_object(input.as_deref())?;
                write_json(&mut stdout, &run_node(&params), args.pretty)?;
            }
        },
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_result = config::load_and_apply("nebula", None::<&std::path::Path>);
    let args = Args::parse();
    let settings = Settings::from_env();

    let level = if args.verbose { "debug" } else { "info" };
    let log_guard = config::logging::init("nebula", settings.log_dir.as_deref(), level)?;
    if let Err(e) = config_result {
        warn!("config not applied: {}", e);
    }

    if let Err(e) = run_command(args, settings).await {
        eprintln!("nebula: {}", e);
        drop(log_guard);
        std::process::exit(1);
    }
    Ok(())
}
