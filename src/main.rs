mod cli;

use std::fs;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use cli::{Cli, Commands};
use mini_callback::{Config, Error, SchemaRegistry, compile, parse};

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::from_project_toml(&cli.config)?;

    match cli.command {
        Commands::Parse(args) => {
            let source = read_source(&args.file)?;
            let output = parse(&source, &config.limits)?;
            print!("{}", output.root);
        }
        Commands::Emit(args) => {
            let source = read_source(&args.file)?;
            let compiled = compile(&source, &config, &SchemaRegistry::builtin())?;
            println!("{}", compiled.code);
        }
        Commands::Calls(args) => {
            let source = read_source(&args.file)?;
            let output = parse(&source, &config.limits)?;
            for site in &output.call_sites {
                println!("{}/{}", site.name, site.arity);
            }
            for (name, arities) in output.call_sites.arity_conflicts() {
                tracing::warn!(name, ?arities, "function called with differing arities");
            }
        }
    }

    Ok(())
}

fn read_source(path: &str) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_string(),
        source,
    })
}
