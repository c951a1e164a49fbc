//! Polykit Binary
//!
//! Run with: `polykit [OPTIONS] <COMMAND>`

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use polykit::{classify_args, to_source_string, Value};
use polykit_cli::{describe_engine, parse_values, read_input, Config};
use polykit_util::{
    base64_to_bytes, bytes_to_base64, bytes_to_chunked_base64, chunked_base64_to_bytes, gunzip,
    gzip_with_level, parse_git_url,
};

#[derive(Parser)]
#[command(name = "polykit")]
#[command(about = "Runtime multiple dispatch and data helpers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON value in literal notation
    Inspect {
        /// JSON input (reads from stdin if omitted or `-`)
        input: Option<String>,

        /// Put each object entry on its own line
        #[arg(long)]
        wrap: bool,

        /// Indent characters per level when wrapping
        #[arg(long)]
        indent: Option<usize>,

        /// Quote strings with single quotes
        #[arg(long)]
        single_quotes: bool,
    },
    /// Print the type tag of each value
    Classify {
        /// Values as JSON, or plain strings
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Call the demo overload set with the given values
    Dispatch {
        /// Values as JSON, or plain strings
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Compress text to base64 gzip data
    Gzip {
        /// Text to compress (reads from stdin if omitted or `-`)
        input: Option<String>,

        /// Compression level, 0 to 9
        #[arg(short, long)]
        level: Option<u32>,
    },
    /// Decompress base64 gzip data to text
    Gunzip {
        /// Base64 data (reads from stdin if omitted or `-`)
        input: Option<String>,
    },
    /// Base64 conversions
    Base64 {
        #[command(subcommand)]
        action: Base64Action,
    },
    /// Parse a GitHub URL and print its parts as JSON
    GitUrl { url: String },
    /// Print the default configuration
    Config,
}

#[derive(Subcommand)]
enum Base64Action {
    /// Encode text
    Encode {
        input: Option<String>,

        /// Emit the `|`-terminated chunked form with this many bytes per chunk
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// Decode to raw bytes on stdout
    Decode {
        input: Option<String>,

        /// Input is in the chunked form
        #[arg(long)]
        chunked: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        debug!("Loaded config from {}", path.display());
    }

    match cli.command {
        Commands::Inspect {
            input,
            wrap,
            indent,
            single_quotes,
        } => {
            config.format.wrap |= wrap;
            config.format.single_quotes |= single_quotes;
            if let Some(indent) = indent {
                config.format.indent = indent;
            }
            let text = read_input(input)?;
            let json: serde_json::Value =
                serde_json::from_str(&text).context("Input is not valid JSON")?;
            println!("{}", to_source_string(&Value::from(json), &config.format));
        }
        Commands::Classify { values } => {
            for tag in classify_args(&parse_values(&values)) {
                println!("{tag}");
            }
        }
        Commands::Dispatch { values } => {
            let engine = describe_engine()?;
            let args = parse_values(&values);
            let result = engine.invoke(&args).map_err(|e| anyhow!("{e}"))?;
            println!("{}", to_source_string(&result, &config.format));
        }
        Commands::Gzip { input, level } => {
            let level = level.unwrap_or(config.gzip.level);
            let text = read_input(input)?;
            println!("{}", gzip_with_level(&text, level)?);
        }
        Commands::Gunzip { input } => {
            let data = read_input(input)?;
            print!("{}", gunzip(&data)?);
        }
        Commands::Base64 { action } => run_base64(action)?,
        Commands::GitUrl { url } => {
            let info = parse_git_url(&url)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&Config::default())?);
        }
    }

    Ok(())
}

fn run_base64(action: Base64Action) -> Result<()> {
    match action {
        Base64Action::Encode { input, chunk_size } => {
            let text = read_input(input)?;
            let encoded = match chunk_size {
                Some(size) => bytes_to_chunked_base64(text.as_bytes(), size),
                None => bytes_to_base64(text.as_bytes()),
            };
            println!("{encoded}");
        }
        Base64Action::Decode { input, chunked } => {
            let text = read_input(input)?;
            let bytes = if chunked {
                chunked_base64_to_bytes(&text)?
            } else {
                base64_to_bytes(&text)?
            };
            io::stdout()
                .write_all(&bytes)
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
