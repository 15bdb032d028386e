use anyhow::Result;
use clap::Args;

use super::connect_store;
use crate::models::Config;
use crate::store::ConversationStore;

#[derive(Debug, Args)]
pub struct MessagesArgs {
    #[arg(required = true, help = "Conversation id")]
    pub conversation_id: i64,
}

pub async fn handle_conversations(config: Config) -> Result<()> {
    let store = connect_store(&config).await?;
    let conversations = store.list_conversations().await?;

    if conversations.is_empty() {
        println!("No conversations.");
        return Ok(());
    }
    for convo in conversations {
        println!("{}\t{}", convo.id, convo.title.as_deref().unwrap_or("-"));
    }
    Ok(())
}

pub async fn handle_messages(args: MessagesArgs, config: Config) -> Result<()> {
    let store = connect_store(&config).await?;
    if store.get_conversation(args.conversation_id).await?.is_none() {
        anyhow::bail!("conversation {} not found", args.conversation_id);
    }

    for msg in store.list_messages(args.conversation_id).await? {
        println!(
            "[{}] {}: {}",
            msg.created_at.format("%Y-%m-%d %H:%M:%S"),
            msg.role.label(),
            msg.content
        );
    }
    Ok(())
}
