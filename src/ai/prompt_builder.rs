use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};

/// System instruction sent with every document. `{max_words}` is substituted.
pub const DEFAULT_INSTRUCTION_TEMPLATE: &str = "You are a helpful AI assistant specialized in document summarization. \
Read the document you are given, whatever its language, and summarize it in English \
in approximately {max_words} words. Cover the main points, key ideas and important details. \
Write clear, professional English and output only the summary.";

const MAX_WORDS_PLACEHOLDER: &str = "{max_words}";
const REASONING_END_TAG: &str = "</think>";

#[must_use]
pub fn render_instruction(template: &str, max_words: usize) -> String {
    template.replace(MAX_WORDS_PLACEHOLDER, &max_words.to_string())
}

/// Remove control characters (newlines and tabs survive) and hard-truncate
/// to `max_chars` characters. Returns the text and whether it was cut.
#[must_use]
pub fn prepare_document(raw: &str, max_chars: usize) -> (String, bool) {
    let mut kept = 0_usize;
    let mut truncated = false;
    let mut out = String::with_capacity(raw.len().min(max_chars * 4));

    for c in raw.chars() {
        if c.is_control() && c != '\n' && c != '\t' {
            continue;
        }
        if kept == max_chars {
            truncated = true;
            break;
        }
        out.push(c);
        kept += 1;
    }

    (out, truncated)
}

#[must_use]
pub fn build_user_prompt(document: &str, max_words: usize) -> String {
    format!(
        "Please read the following document carefully and provide a summary in English \
         of approximately {max_words} words.\n\nDOCUMENT:\n{document}\n\nSummary in English:"
    )
}

/// Chat prompt: fixed system instruction followed by the document.
#[must_use]
pub fn build_messages(instruction: &str, user_prompt: String) -> Vec<ChatCompletionMessage> {
    vec![
        ChatCompletionMessage {
            role: MessageRole::system,
            content: Content::Text(instruction.to_string()),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
        ChatCompletionMessage {
            role: MessageRole::user,
            content: Content::Text(user_prompt),
            name: None,
            tool_calls: None,
            tool_call_id: None,
        },
    ]
}

/// Drop a reasoning block that ends in `</think>`; anything else is returned as is.
#[must_use]
pub fn strip_reasoning(response: &str) -> &str {
    match response.find(REASONING_END_TAG) {
        Some(pos) => response[pos + REASONING_END_TAG.len()..].trim(),
        None => response,
    }
}

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}
