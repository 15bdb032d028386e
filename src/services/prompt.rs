//! Prompt assembly for grounded chat completions.

use crate::models::Message;

/// Number of trailing history messages visible to the model.
pub const HISTORY_WINDOW: usize = 10;

/// Ethiopic script block, the deployment's primary non-English target.
const ETHIOPIC_START: char = '\u{1200}';
const ETHIOPIC_END: char = '\u{137F}';

/// True when the text contains any character from the Ethiopic block.
pub fn contains_ethiopic(text: &str) -> bool {
    text.chars().any(|c| (ETHIOPIC_START..=ETHIOPIC_END).contains(&c))
}

/// Assemble the completion prompt from retrieved context, the recent
/// history window, and the new user message.
///
/// The prompt always carries four ordered sections: the instruction with a
/// language directive, a CONTEXT block, a CONVERSATION HISTORY block, and
/// the new USER turn. History beyond [`HISTORY_WINDOW`] is invisible to the
/// model.
pub fn compose(history: &[Message], context_chunks: &[String], user_message: &str) -> String {
    let recent = if history.len() > HISTORY_WINDOW {
        &history[history.len() - HISTORY_WINDOW..]
    } else {
        history
    };

    let context = context_chunks.join("\n\n");

    let language_directive = if contains_ethiopic(user_message) {
        "Respond in Amharic. "
    } else {
        "Respond in the user's language. "
    };

    let conversation_lines: Vec<String> = recent
        .iter()
        .map(|msg| format!("{}: {}", msg.role.label(), msg.content))
        .collect();

    let prompt = format!(
        "\nYou are a helpful assistant that answers based on the provided document context. \
         {}If the answer is not present in the context, say you are not sure.\n\n\
         CONTEXT:\n{}\n\n\
         CONVERSATION HISTORY:\n{}\n\n\
         USER: {}\n",
        language_directive,
        context,
        conversation_lines.join("\n"),
        user_message,
    );

    prompt.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageRole;
    use chrono::{TimeZone, Utc};

    fn message(id: i64, role: MessageRole, content: &str) -> Message {
        Message {
            id,
            conversation_id: 1,
            role,
            content: content.to_string(),
            created_at: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
        }
    }

    fn history_of(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| {
                let role = if i % 2 == 0 {
                    MessageRole::User
                } else {
                    MessageRole::Assistant
                };
                message(i as i64, role, &format!("turn {}", i))
            })
            .collect()
    }

    #[test]
    fn test_contains_ethiopic() {
        assert!(contains_ethiopic("ሰላም"));
        assert!(contains_ethiopic("hello ሰላም"));
        assert!(!contains_ethiopic("hello"));
        assert!(!contains_ethiopic(""));
    }

    #[test]
    fn test_amharic_directive() {
        let prompt = compose(&[], &[], "ሰላም እንዴት ነህ?");
        assert!(prompt.contains("Respond in Amharic."));
        assert!(!prompt.contains("Respond in the user's language."));
    }

    #[test]
    fn test_generic_directive() {
        let prompt = compose(&[], &[], "Bonjour, comment ça va?");
        assert!(prompt.contains("Respond in the user's language."));
        assert!(!prompt.contains("Respond in Amharic."));
    }

    #[test]
    fn test_recency_window_caps_history() {
        let history = history_of(25);
        let prompt = compose(&history, &[], "question");

        assert!(prompt.contains("turn 24"));
        assert!(prompt.contains("turn 15"));
        assert!(!prompt.contains("turn 14"));
    }

    #[test]
    fn test_short_history_fully_included() {
        let history = history_of(3);
        let prompt = compose(&history, &[], "question");

        for i in 0..3 {
            assert!(prompt.contains(&format!("turn {}", i)));
        }
    }

    #[test]
    fn test_section_order() {
        let history = vec![message(1, MessageRole::User, "earlier question")];
        let chunks = vec!["chunk alpha".to_string(), "chunk beta".to_string()];
        let prompt = compose(&history, &chunks, "new question");

        let context_at = prompt.find("CONTEXT:").unwrap();
        let history_at = prompt.find("CONVERSATION HISTORY:").unwrap();
        let user_at = prompt.find("USER: new question").unwrap();
        assert!(context_at < history_at);
        assert!(history_at < user_at);

        assert!(prompt.contains("chunk alpha\n\nchunk beta"));
        assert!(prompt.contains("User: earlier question"));
        assert!(prompt.contains("say you are not sure"));
    }

    #[test]
    fn test_role_labels_rendered() {
        let history = vec![
            message(1, MessageRole::User, "hi"),
            message(2, MessageRole::Assistant, "hello"),
        ];
        let prompt = compose(&history, &[], "next");
        assert!(prompt.contains("User: hi"));
        assert!(prompt.contains("Assistant: hello"));
    }

    #[test]
    fn test_empty_context_and_trim() {
        let prompt = compose(&[], &[], "question");
        assert!(prompt.contains("CONTEXT:"));
        assert_eq!(prompt, prompt.trim());
        assert!(prompt.ends_with("USER: question"));
    }
}
