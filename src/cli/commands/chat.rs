use anyhow::Result;
use clap::Args;

use super::{chat_service, completion_provider, connect_store, embedding_provider};
use crate::models::Config;

#[derive(Debug, Args)]
pub struct ChatArgs {
    #[arg(required = true, help = "Message to send")]
    pub message: String,

    #[arg(long, short = 'c', help = "Continue an existing conversation id")]
    pub conversation: Option<i64>,
}

pub async fn handle_chat(args: ChatArgs, config: Config) -> Result<()> {
    let message = args.message.trim();
    if message.is_empty() {
        anyhow::bail!("chat message cannot be empty");
    }

    let store = connect_store(&config).await?;
    let embeddings = embedding_provider(&config)?;
    let completions = completion_provider(&config)?;
    let chat = chat_service(&config, store, embeddings, completions);

    let reply = chat.chat(args.conversation, message).await?;
    println!("[conversation {}]", reply.conversation_id);
    println!("{}", reply.answer);
    Ok(())
}
