pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::discovery::{discover, DiscoveryResult, ScanResult};
use crate::error::Result;

/// rsrc - game resource description compiler
#[derive(Parser, Debug)]
#[command(name = "rsrc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile projects into resource containers and mapping headers
    Build(build::BuildArgs),

    /// Initialize a resource tree (generates rsrc.yaml)
    Init(init::InitArgs),

    /// Check description files and media without writing output
    Validate(validate::ValidateArgs),

    /// List the description files of each project
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Project selection shared by build, validate and list.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Projects to process (defaults to the manifest, then engine and displaymodule)
    pub projects: Vec<String>,

    /// Resource root containing the project folders
    #[arg(long, default_value = ".")]
    pub root: PathBuf,
}

impl ProjectArgs {
    /// Discover the root and enumerate the selected projects.
    pub fn scan(&self) -> Result<(DiscoveryResult, Vec<ScanResult>)> {
        let discovery = discover(&self.root)?;
        let scans = discovery.scan(&self.projects)?;
        Ok((discovery, scans))
    }
}
