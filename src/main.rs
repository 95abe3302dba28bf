//! apispec: query API documentation from annotated Rust sources.
//!
//! Scans the given sources for `#[api_*]` attributes and answers one
//! documentation query per invocation:
//!
//! `apispec -s src/ -t Calculator method add`
//!
//! A query with no answer prints nothing and exits with status 1.

use anyhow::{Context, Result};
use apispec::{ApiMethodDescription, ApiParamDescription, Registry, Specifier};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apispec",
    about = "Extract API documentation from annotated Rust source files"
)]
struct Cli {
    /// Source files, directories or glob patterns to scan (repeatable)
    #[arg(short = 's', long = "source", required = true)]
    sources: Vec<String>,

    /// Type to query (required by every command except `types`)
    #[arg(short = 't', long = "type")]
    type_name: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every type found in the sources
    Types,
    /// Type-level description
    Description,
    /// Names of the type's API methods
    Methods,
    /// Description of an API method
    MethodDescription { method: String },
    /// Parameter names of an API method
    Params { method: String },
    /// Description of one parameter of an API method
    ParamDescription { method: String, param: String },
    /// Full description of one parameter (always printed)
    Param { method: String, param: String },
    /// Full description of an API method
    Method { method: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let registry = Registry::load(&cli.sources)?;
    if !run(&cli, &registry)? {
        std::process::exit(1);
    }
    Ok(())
}

/// Log to stderr, filtered by RUST_LOG (default: warn).
fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))
}

/// Execute the command. Returns false when the query has no answer.
fn run(cli: &Cli, registry: &Registry) -> Result<bool> {
    if let Command::Types = cli.command {
        for name in registry.type_names() {
            println!("{name}");
        }
        return Ok(true);
    }

    let type_name = cli
        .type_name
        .as_deref()
        .context("--type is required for this command")?;
    let spec = registry
        .specifier(type_name)
        .with_context(|| format!("type not found: {type_name}"))?;

    Ok(query(&spec, &cli.command))
}

fn query(spec: &Specifier<'_>, command: &Command) -> bool {
    match command {
        Command::Types => true,
        Command::Description => print_value(spec.api_description()),
        Command::Methods => {
            for name in spec.api_method_names() {
                println!("{name}");
            }
            true
        }
        Command::MethodDescription { method } => print_value(spec.api_method_description(method)),
        Command::Params { method } => match spec.api_method_param_names(method) {
            Some(names) => {
                for name in names {
                    println!("{name}");
                }
                true
            }
            None => false,
        },
        Command::ParamDescription { method, param } => {
            print_value(spec.api_method_param_description(method, param))
        }
        Command::Param { method, param } => {
            print_param(&spec.api_method_param_full_description(method, param), "");
            true
        }
        Command::Method { method } => match spec.api_method_full_description(method) {
            Some(desc) => {
                print_method(&desc);
                true
            }
            None => false,
        },
    }
}

fn print_value(value: Option<&str>) -> bool {
    match value {
        Some(text) => {
            println!("{text}");
            true
        }
        None => false,
    }
}

fn print_method(desc: &ApiMethodDescription) {
    println!("method: {}", desc.method_description.name());
    if let Some(text) = desc.method_description.description() {
        println!("description: {text}");
    }
    if let Some(ret) = &desc.return_description {
        println!("returns:");
        print_param(ret, "  ");
    }
    for param in &desc.param_descriptions {
        print_param(param, "");
    }
}

/// Present fields only, one `key: value` line each.
fn print_param(desc: &ApiParamDescription, indent: &str) {
    if let Some(common) = &desc.param_description {
        println!("{indent}param: {}", common.name());
        if let Some(text) = common.description() {
            println!("{indent}  description: {text}");
        }
    }
    let field_indent = if desc.param_description.is_some() {
        format!("{indent}  ")
    } else {
        indent.to_string()
    };
    if let Some(min) = desc.min_value {
        println!("{field_indent}min: {min}");
    }
    if let Some(max) = desc.max_value {
        println!("{field_indent}max: {max}");
    }
    if let Some(required) = desc.required {
        println!("{field_indent}required: {required}");
    }
}
