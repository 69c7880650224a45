use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kdm-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve Kubernetes metadata for a cluster driver version")]
#[command(long_about = "Filters the Kubernetes metadata catalog down to the versions supported by a cluster driver, reports the current version of every minor release, and selects and renders the versioned add-on templates.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Driver version to resolve metadata for
    #[arg(short = 'd', long, global = true, env = "KDM_DRIVER_VERSION", value_name = "VERSION")]
    pub driver_version: Option<String>,

    /// Catalog file to load instead of the embedded catalog (JSON or YAML)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the Kubernetes versions compatible with the driver
    Resolve {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the current Kubernetes version of every minor release
    Current {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the images and service options of a Kubernetes version
    Images {
        /// Kubernetes version, e.g. v1.15.5-rancher1-1
        #[arg(value_name = "K8S_VERSION")]
        k8s_version: String,

        /// Output in JSON format instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Select an add-on template and render it for a Kubernetes version
    Template {
        /// Template family, e.g. calico, canal or flannel
        #[arg(value_name = "FAMILY")]
        family: String,

        /// Kubernetes version, e.g. v1.15.5-rancher1-1
        #[arg(value_name = "K8S_VERSION")]
        k8s_version: String,

        /// YAML or JSON file with values overriding the defaults
        #[arg(long, value_name = "FILE")]
        values: Option<PathBuf>,

        /// Print the selected template without rendering it
        #[arg(long)]
        raw: bool,
    },

    /// Write the resolved metadata snapshot as JSON
    Export {
        /// Output file (defaults to the configured data file)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
