use clap::Parser;
use procfixtures::{logging, mixed_output, Config, MixedOutputCli, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init();

    let cli = MixedOutputCli::parse();
    let config = Config::from_mixed_output_cli(cli)?;

    mixed_output::run(&config).await
}
