//! Chat turn orchestration.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::ChatError;
use crate::models::{ChatReply, MessageRole};
use crate::services::completion::CompletionProvider;
use crate::services::prompt;
use crate::services::retriever::Retriever;
use crate::store::ConversationStore;

/// Title given to conversations created by a first chat message.
pub const DEFAULT_CHAT_TITLE: &str = "New Conversation";

/// Runs one chat turn end to end.
///
/// The user message is committed before any remote call, so a question is
/// never lost to a provider failure; the assistant message is only committed
/// after a successful completion. Each step runs exactly once per turn and a
/// failure aborts the remainder.
pub struct ChatService {
    store: Arc<dyn ConversationStore>,
    retriever: Retriever,
    completions: Arc<dyn CompletionProvider>,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        retriever: Retriever,
        completions: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            store,
            retriever,
            completions,
        }
    }

    pub async fn chat(
        &self,
        conversation_id: Option<i64>,
        message: &str,
    ) -> Result<ChatReply, ChatError> {
        let conversation = self
            .store
            .resolve_or_create(conversation_id, DEFAULT_CHAT_TITLE)
            .await?;

        self.store
            .append_message(conversation.id, MessageRole::User, message)
            .await?;

        // Loaded after the user message commit, so the new message is part
        // of the recency window.
        let history = self.store.list_messages(conversation.id).await?;
        let context = self.retriever.retrieve(conversation.id, message).await?;
        debug!(
            conversation_id = conversation.id,
            history_len = history.len(),
            context_chunks = context.len(),
            "composing prompt"
        );

        let prompt = prompt::compose(&history, &context, message);
        let answer = self.completions.complete(&prompt).await?;

        self.store
            .append_message(conversation.id, MessageRole::Assistant, &answer)
            .await?;
        info!(conversation_id = conversation.id, "chat turn completed");

        Ok(ChatReply {
            conversation_id: conversation.id,
            answer,
        })
    }
}
