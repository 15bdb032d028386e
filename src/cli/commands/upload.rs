use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{connect_store, embedding_provider, ingest_service};
use crate::models::Config;

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[arg(required = true, help = "Path to the PDF file")]
    pub file: PathBuf,

    #[arg(long, short = 'c', help = "Attach to an existing conversation id")]
    pub conversation: Option<i64>,
}

pub async fn handle_upload(args: UploadArgs, config: Config) -> Result<()> {
    let is_pdf = args
        .file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        anyhow::bail!("only PDF files are supported: {}", args.file.display());
    }

    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document.pdf")
        .to_string();
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let store = connect_store(&config).await?;
    let embeddings = embedding_provider(&config)?;
    let ingest = ingest_service(&config, store, embeddings);

    let receipt = ingest.upload(&filename, &bytes, args.conversation).await?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
