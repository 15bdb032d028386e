use std::sync::Arc;

use anyhow::Result;

use super::{chat_service, completion_provider, connect_store, embedding_provider, ingest_service};
use crate::models::Config;
use crate::server::{self, AppState};
use crate::store::ConversationStore;

pub async fn handle_serve(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;
    let store: Arc<dyn ConversationStore> = store;
    let embeddings = embedding_provider(&config)?;
    let completions = completion_provider(&config)?;

    let state = AppState {
        chat: Arc::new(chat_service(
            &config,
            Arc::clone(&store),
            Arc::clone(&embeddings),
            completions,
        )),
        ingest: Arc::new(ingest_service(&config, Arc::clone(&store), embeddings)),
        store,
    };

    server::serve(&config.server, state).await?;
    Ok(())
}
