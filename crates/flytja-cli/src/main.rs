use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use flytja::{ExportOptions, ExportPipeline, HubCheckpointLoader, HubGraphExporter};
use flytja_cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(log_level).init();

    let options = ExportOptions {
        model: cli.model,
        out_dir: cli.out,
        opset: cli.opset,
        max_len: cli.max_len,
    };

    let pipeline = ExportPipeline::new(HubCheckpointLoader::new(), HubGraphExporter);
    let report = pipeline.run(&options).await?;

    if !cli.quiet {
        if report.degraded {
            eprintln!("Warning: bundle is incomplete (no tokenizer.json was produced)");
        }
        println!("Exported: {}", report.graph_path.display());
        println!("Manifest: {}", report.manifest_path.display());
    }

    Ok(())
}
