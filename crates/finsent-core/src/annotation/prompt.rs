//! Prompt templates

/// Label substituted when an article could not be annotated
pub const SENTINEL_LABEL: &str = "Error";

/// Task prompt asking for a `"<score>. <explanation>"` answer about one bank
pub fn task_prompt(bank_name: &str) -> String {
    format!(
        "Analyze the sentiment of this article towards {bank_name}. Score the sentiment as \
         either 1 for positive, -1 for negative, or 0 for neutral. Provide the sentiment score, \
         followed by a brief explanation in less than 20 words, separating them with a period. \
         Example: '[insert sentiment score]. [insert explanation]'."
    )
}
