use std::process;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::*;

use jlfmt::config::{CompileMode, FormatOptions, ToolConfig};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show detailed output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the language server (stdio, or TCP with --port)
    Server {
        /// Listen on 127.0.0.1:<port> instead of stdio (for debugging)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Format a Julia file on disk with JuliaFormatter
    Fmt {
        /// File to format
        path: String,

        /// Print the unified diff instead of rewriting the file
        #[arg(long)]
        diff: bool,

        /// Path to the Julia executable (overrides auto-detection)
        #[arg(long)]
        executable: Option<String>,

        /// Julia --compile level: min or all
        #[arg(long, default_value = "min")]
        compile: String,

        /// Maximum line width
        #[arg(long)]
        margin: Option<u32>,

        /// Spaces per indent level
        #[arg(long)]
        indent: Option<u32>,
    },

    /// Print the path of the Julia executable that would be used
    Which {
        /// Path to the Julia executable (overrides auto-detection)
        #[arg(long)]
        executable: Option<String>,
    },
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn parse_compile_mode(text: &str) -> Result<CompileMode> {
    match text {
        "min" => Ok(CompileMode::Min),
        "all" => Ok(CompileMode::All),
        other => bail!("invalid compile mode {other:?} (expected \"min\" or \"all\")"),
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Server { port } => match port {
            Some(port) => jlfmt::lsp::start_tcp_server(port).await,
            None => jlfmt::lsp::start_server().await,
        },
        Commands::Fmt {
            path,
            diff,
            executable,
            compile,
            margin,
            indent,
        } => {
            let config = ToolConfig {
                executable_path: executable,
                compile_mode: parse_compile_mode(&compile)?,
            };
            let mut options = FormatOptions::default();
            if let Some(margin) = margin {
                options.margin = margin;
            }
            if let Some(indent) = indent {
                options.indent = indent;
            }
            options.overwrite = !diff;

            let output = jlfmt::format_raw(&path, &config, &options).await?;
            if diff {
                print!("{output}");
            } else if !cli.quiet {
                println!("Formatted {path}");
            }
            Ok(())
        }
        Commands::Which { executable } => {
            let config = ToolConfig {
                executable_path: executable,
                ..Default::default()
            };
            let tool = jlfmt::resolver::resolve(&config).await?;
            println!("{tool}");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(error) = run(cli).await {
        eprintln!("{}: {error}", "Error".red().bold());
        process::exit(1);
    }
}
