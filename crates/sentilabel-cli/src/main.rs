mod cli;
mod display;
mod pipeline;
mod upload;

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use futures::StreamExt;
use sentilabel_ai::{Classifier, GroqClient};
use sentilabel_core::FileOutcome;

use crate::cli::{Cli, OutputFormat};
use crate::pipeline::Pipeline;
use crate::upload::collect_uploads;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(cli.log_level())
        .init();
    tracing::info!("sentilabel v{}", env!("CARGO_PKG_VERSION"));

    let oracle = GroqClient::new(cli.groq_config()?).context("configuring oracle client")?;
    let model = oracle.model().to_string();
    let classifier = Classifier::new(Arc::new(oracle))
        .with_timeout(cli.timeout()?)
        .with_retry(cli.retry_policy());
    let pipeline = Pipeline::new(classifier, cli.pipeline_config()?);
    let uploads = collect_uploads(&cli.files);

    let outcomes = match cli.format {
        OutputFormat::Table => {
            let mut outcomes = Vec::with_capacity(uploads.len());
            let mut stream = std::pin::pin!(pipeline.outcomes(&uploads));
            while let Some(outcome) = stream.next().await {
                let mut stdout = std::io::stdout().lock();
                display::write_outcome(&mut stdout, &outcome)?;
                stdout.flush()?;
                outcomes.push(outcome);
            }
            display::write_summary(&mut std::io::stdout().lock(), &outcomes)?;
            outcomes
        }
        OutputFormat::Json => {
            let outcomes = pipeline.run(&uploads).await;
            display::write_json(&mut std::io::stdout().lock(), &model, &outcomes)?;
            outcomes
        }
    };

    if outcomes.iter().all(FileOutcome::is_error) {
        anyhow::bail!("no file could be processed");
    }
    Ok(())
}
