use clap::Parser;
use stackparams::Commands;
use stackparams_config::{ConfigLoader, Layout};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stackparams")]
#[command(about = "Manage encrypted, hierarchical stack parameter files", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Parameter directory (overrides stackparams.toml and STACKPARAMS_DIRECTORY)
    #[arg(short, long, global = true)]
    directory: Option<PathBuf>,

    /// Shared secret used to lock and unlock documents (prefer STACKPARAMS_KEY)
    #[arg(short, long, global = true)]
    key: Option<String>,

    /// Destination whose parameters are merged in the infrastructure layout
    #[arg(long, global = true)]
    destination: Option<String>,

    /// Parameter file layout (infrastructure or stacks)
    #[arg(long, global = true)]
    layout: Option<Layout>,

    /// Settings file to read instead of ./stackparams.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    stackparams_utils::tracing::init(cli.verbose)
        .map_err(|e| eyre::eyre!("failed to initialise logging: {e}"))?;

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.settings_file(path);
    }
    if let Some(directory) = cli.directory {
        loader = loader.directory(directory);
    }
    if let Some(key) = cli.key {
        loader = loader.key(key);
    }
    if let Some(destination) = cli.destination {
        loader = loader.destination(destination);
    }
    if let Some(layout) = cli.layout {
        loader = loader.layout(layout);
    }
    let settings = loader.load()?;

    cli.command.execute(&settings)?;
    Ok(())
}
