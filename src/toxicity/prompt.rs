// Prompt sent to the model for a single analysis.

use super::score::Category;

/// Build the instruction asking the model for a six-key JSON score.
pub fn build_prompt(text: &str) -> String {
    let labels = Category::ALL.map(|c| c.as_str()).join(", ");
    format!(
        "Analyze the following text for toxicity across these {count} categories:\n\
         {labels}.\n\
         Respond ONLY with a JSON object where keys are these labels\n\
         and values are numbers between 0 and 1 (e.g., 0.67).\n\
         Text: ```{text}```",
        count = Category::ALL.len(),
    )
}
