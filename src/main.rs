use clap::Parser;
use jusho_dl::utils::{logger, validation::Validate};
use jusho_dl::{CliConfig, Engine, JushoPipeline, Phases};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting jusho-dl");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    println!("Output destination directory: {}", config.outdir);

    let phases = Phases::from(&config);
    let pipeline = JushoPipeline::new(&config)?;
    let engine = Engine::new(pipeline, phases);

    match engine.run().await {
        Ok(Some(path)) => {
            tracing::info!("Run completed");
            println!("✅ Concat CSV written to: {}", path.display());
        }
        Ok(None) => {
            tracing::info!("Run completed, no concat output requested");
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
