//! Fixed instruction template sent to chat-style backends
//!
//! The template is never altered per request; only the user text is
//! substituted into the user message.

/// System instruction mandating strict JSON output
pub const ANALYSIS_INSTRUCTIONS: &str = "You are a precise analyst. \
Return ONLY a strict JSON object with keys: \
title (string or null), \
topics (array of exactly 3 short nouns), \
sentiment (one of: positive, neutral, negative), \
summary (1-2 sentences). \
Output only the JSON with no extra text.";

/// Build the user message for `text`, forwarding it verbatim
pub fn user_message(text: &str) -> String {
    format!("TEXT:\n{}", text)
}
