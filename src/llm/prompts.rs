// Prompt assembly for document question answering

pub const ANSWER_INSTRUCTIONS: &str = "Please answer the question based on the financial document context provided above. \
Be specific and use numbers when available. \
If you cannot find the information in the context, say so clearly.";

/// Cuts `context` to at most `max_chars` characters. Anything past the
/// budget is dropped, not summarized.
pub fn truncate_context(context: &str, max_chars: usize) -> &str {
    match context.char_indices().nth(max_chars) {
        Some((idx, _)) => &context[..idx],
        None => context,
    }
}

pub fn build_prompt(question: &str, context: &str, max_context_chars: usize) -> String {
    format!(
        "Context from financial document:\n\
         {}\n\n\
         User Question: {}\n\n\
         {}",
        truncate_context(context, max_context_chars),
        question,
        ANSWER_INSTRUCTIONS
    )
}
