use anyhow::{Context, Result};

use super::connect_store;
use crate::models::Config;

pub async fn handle_init_db(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;
    store
        .init_schema()
        .await
        .context("failed to initialize schema")?;
    println!("Database schema ready (conversations, messages, document_chunks).");
    Ok(())
}
