use clap::Parser;
use k8s_driver_metadata::{
    build_metadata,
    cli::Cli,
    config::{self, types::Config},
    metadata, run_command,
};
use std::process;

fn main() {
    if let Err(e) = run() {
        if e.is_fatal() {
            eprintln!("Fatal: inconsistent Kubernetes metadata: {}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

fn run() -> k8s_driver_metadata::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration, then let flags override it
    let mut config = load_config(&cli)?;
    if let Some(driver_version) = &cli.driver_version {
        config.driver_version = driver_version.clone();
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog.path = Some(catalog.clone());
    }

    let metadata = metadata::init_global(build_metadata(&config)?)?;

    run_command(cli.command, metadata, &config)
}

fn load_config(cli: &Cli) -> k8s_driver_metadata::Result<Config> {
    match cli.config.as_deref() {
        Some(path) => config::load_config_file(path),
        None => {
            let cwd = std::env::current_dir().ok();
            config::load_config(cwd.as_deref())
        }
    }
}
