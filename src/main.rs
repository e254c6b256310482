use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, bail};
use stackclip::platform::clipboard;
use stackclip::{Clipboard, ClipboardPrograms, stack};

// stackclip version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// stackclip - stack traces and clipboard access from the shell
#[derive(Parser)]
#[command(version = VERSION, about, long_about = None)]
struct Cli {
    /// JSON file overriding the clipboard programs
    #[arg(long, global = true, value_name = "FILE")]
    programs: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy text (or stdin when no text is given) to the clipboard
    Copy {
        /// Text to copy
        text: Option<String>,
        /// Copy the contents of a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Print the clipboard contents
    Paste {
        /// Write the contents to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Empty the clipboard
    Clean,
    /// Print the stack trace of this process
    Trace {
        /// Start from the larger "all threads" buffer and add a thread header
        #[arg(short, long)]
        all: bool,
    },
    /// Print caller frames of the command handler
    Callers {
        /// Frames to skip
        #[arg(short, long, default_value_t = 0)]
        skip: usize,
        /// Frames to describe
        #[arg(short, long, default_value_t = 5)]
        num: usize,
    },
    /// Print the clipboard program table as JSON
    Programs,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let programs = match &cli.programs {
        Some(path) => ClipboardPrograms::load(path)?,
        None => ClipboardPrograms::for_host(),
    };
    if clipboard::init_std_clipboard(programs).is_err() {
        bail!("default clipboard was already initialized");
    }

    run(&cli.command, &mut clipboard::std_clipboard().lock())
}

/// Executes one subcommand against the given clipboard.
fn run(command: &Commands, clipboard: &mut Clipboard) -> Result<()> {
    match command {
        Commands::Copy { text, file } => {
            if let Some(path) = file {
                clipboard.write_from_file(path)?;
                return Ok(());
            }
            let text = match text {
                Some(text) => text.clone(),
                None => {
                    let mut input = String::new();
                    io::stdin()
                        .read_to_string(&mut input)
                        .wrap_err("Failed to read stdin")?;
                    input
                }
            };
            clipboard.write_string(&text)?;
            clipboard.flush()?;
        }
        Commands::Paste { output } => match output {
            Some(path) => clipboard.read_to_file(path)?,
            None => {
                let data = clipboard.read_bytes()?;
                io::stdout().write_all(&data)?;
            }
        },
        Commands::Clean => clipboard.clean()?,
        Commands::Trace { all } => {
            io::stdout().write_all(&stack::call_stacks(*all))?;
        }
        Commands::Callers { skip, num } => {
            for caller in stack::simple_callers_info(*skip, *num) {
                println!("{caller}");
            }
        }
        Commands::Programs => {
            println!("{}", clipboard.programs().to_json()?);
        }
    }
    Ok(())
}
