use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mini-callback")]
#[command(about = "Callback DSL parser and code generator")]
pub struct Cli {
    /// Project configuration with [limits] and [protocol] tables
    #[arg(long, global = true, default_value = "project.toml")]
    pub config: String,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a callback file and print the AST
    Parse(FileArgs),
    /// Print the construction expression for a callback file
    Emit(FileArgs),
    /// List the function calls (name/arity) made by a callback file
    Calls(FileArgs),
}

#[derive(clap::Args)]
pub struct FileArgs {
    /// Input file path
    pub file: String,
}
