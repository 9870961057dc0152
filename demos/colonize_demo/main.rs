//! # colonize demo application
//!
//! A small CLI that exercises the colonize library against a real project
//! tree. It is **not** the colonize tool: it never runs Terraform or writes
//! combined files. It only shows what the resolver would hand to them.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example colonize_demo -- init --dir /tmp/proj
//! mkdir -p /tmp/proj/network/vpc && touch /tmp/proj/network/build_order.txt
//! cargo run --example colonize_demo -- tree -e dev -p /tmp/proj/network/vpc
//! cargo run --example colonize_demo -- kind -e dev -p /tmp/proj/network
//! RUST_LOG=colonize=debug cargo run --example colonize_demo -- tree -e dev -p /tmp/proj
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use colonize::{Colonize, MARKER_FILE, NodeKind, Schema, TreeArgs, TreeConfig};

/// colonize demo: inspect how a template's configuration tree resolves.
#[derive(Parser, Debug)]
#[command(name = "colonize-demo")]
struct Cli {
    /// Reject unknown keys in the marker file.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ancestor chain and every derived path.
    Tree(TreeArgs),
    /// Report whether the template is a branch or a leaf.
    Kind(TreeArgs),
    /// Scaffold a marker file with every convention at its default.
    Init {
        /// Project root to initialize.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the documented convention template.
    Schema,
}

fn load(args: TreeArgs, strict: bool) -> TreeConfig {
    let loader = Colonize::loader().strict(strict);
    match args.load_with(&loader) {
        Ok(config) => config,
        Err(failure) => {
            eprintln!("Failed to load configuration:\n{failure}");
            if let Some(fallback) = failure.fallback {
                eprintln!("(defaults would resolve {} nodes)", fallback.ancestors().len());
            }
            std::process::exit(1);
        }
    }
}

fn print_tree(config: &TreeConfig) {
    println!("environment  {}", config.environment());
    println!("template     {} ({})", config.template_name(), config.template_path().display());
    println!("root         {}", config.root_path().display());
    println!();

    for (depth, layer) in config.layers().enumerate() {
        println!("[{depth}] {}", layer.dir.display());
        println!("    values   {}", layer.values.display());
        println!("    tf       {}", layer.tf_dir.display());
        println!("    derived  {}", layer.derived.display());
    }
    println!();

    let combined = config.combined();
    let entries = [
        ("vals", &combined.vals),
        ("vars", &combined.vars),
        ("tf", &combined.tf),
        ("derived_vals", &combined.derived_vals),
        ("derived_vars", &combined.derived_vars),
        ("remote", &combined.remote),
    ];
    let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, path) in entries {
        println!("{key:<width$}  {}", path.display());
    }
    println!("{:<width$}  {}", "bootstrap", config.remote_file().display());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tree(args) => print_tree(&load(args, cli.strict)),
        Commands::Kind(args) => {
            let config = load(args, cli.strict);
            match config.branch_status() {
                Ok(NodeKind::Branch) => println!("branch"),
                Ok(NodeKind::Leaf) => println!("leaf"),
                Err(e) => {
                    eprintln!("Cannot classify {}:\n{e}", config.origin_path().display());
                    std::process::exit(1);
                }
            }
        }
        Commands::Init { dir } => {
            let path = dir.join(MARKER_FILE);
            let written = Schema::defaults().and_then(|schema| schema.write_to_file(&path));
            match written {
                Ok(()) => println!("Wrote {}", path.display()),
                Err(e) => {
                    eprintln!("Init failed:\n{e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Schema => print!("{}", Schema::template()),
    }
}
