use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use hyprdash_app::config::Config;
use hyprdash_app::gallery;
use hyprdash_app::menu::Menu;
use hyprdash_app::summary::SystemSummary;
use hyprdash_core::EnvContext;
use hyprdash_executor::{Dispatcher, Launcher};
use hyprdash_interfaces::TerminalInterface;
use tracing_subscriber::EnvFilter;

enum Command {
    Menu,
    Run {
        action: String,
        argument: Option<String>,
    },
    List {
        json: bool,
    },
    Images,
    Summary,
    Help,
}

struct Args {
    config: Option<PathBuf>,
    command: Command,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut config = None;
    let mut positional = Vec::new();
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--json" => json = true,
            "--help" | "-h" => positional.insert(0, "help".to_string()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None | Some("menu") => Command::Menu,
        Some("run") => {
            let action = positional.next().context("usage: hyprdash run <action> [argument]")?;
            Command::Run {
                action,
                argument: positional.next(),
            }
        }
        Some("list") => Command::List { json },
        Some("images") => Command::Images,
        Some("summary") => Command::Summary,
        Some("help") => Command::Help,
        Some(other) => bail!("Unknown command '{}'. Try 'hyprdash help'.", other),
    };

    if let Some(extra) = positional.next() {
        bail!("Unexpected argument '{}'", extra);
    }

    Ok(Args { config, command })
}

fn print_help() {
    println!("hyprdash - Hyprland dashboard launcher");
    println!();
    println!("Usage: hyprdash [--config PATH] [COMMAND]");
    println!();
    println!("Commands:");
    println!("  menu                      Interactive menu (default)");
    println!("  run <action> [argument]   Launch one action and exit");
    println!("  list [--json]             List registered actions");
    println!("  images                    List images in the picture directory");
    println!("  summary                   Print a short system summary");
    println!("  help                      Show this help message");
    println!();
    println!("Logging is controlled with HYPRDASH_LOG (default: warn).");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HYPRDASH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = parse_args(std::env::args().skip(1))?;
    if matches!(args.command, Command::Help) {
        print_help();
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;
    let env = config.apply_env(EnvContext::from_process_env());
    let table = Arc::new(config.build_table()?);
    let dispatcher = Arc::new(Dispatcher::new(table, Arc::new(Launcher::system()), env));

    match args.command {
        Command::Menu => {
            let ui = Arc::new(TerminalInterface::new());
            Menu::new(ui, dispatcher).run().await;
        }
        Command::Run { action, argument } => {
            let started = dispatcher.dispatch_with(&action, argument.as_deref())?;
            match started.pid {
                Some(pid) => println!("Started {} (pid {})", started.program, pid),
                None => println!("Started {}", started.program),
            }
        }
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(dispatcher.actions())?);
            } else {
                for entry in dispatcher.actions() {
                    let programs: Vec<&str> =
                        entry.candidates.iter().map(|c| c.program.as_str()).collect();
                    println!(
                        "{:<26} {:<22} {}",
                        entry.id.as_str(),
                        entry.label,
                        programs.join(", ")
                    );
                }
            }
        }
        Command::Images => {
            let dir = dispatcher.env().image_dir()?;
            let images = gallery::list_images(dir)
                .with_context(|| format!("Could not open {}", dir.display()))?;
            if images.is_empty() {
                println!("No images found in {}.", dir.display());
            }
            for name in images {
                println!("{}", name);
            }
        }
        Command::Summary => {
            let summary = tokio::task::spawn_blocking(SystemSummary::capture).await?;
            for line in summary.to_lines() {
                println!("{}", line);
            }
        }
        Command::Help => print_help(),
    }

    Ok(())
}
