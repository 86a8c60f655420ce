use clap::Parser;
use procfixtures::{logging, signal_catcher, CatcherCli, Config, ExitPolicy, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init();

    let cli = CatcherCli::parse();
    let config = Config::from_catcher_cli(cli)?;

    let code = signal_catcher::run(ExitPolicy::Success, &config).await?;
    std::process::exit(code)
}
