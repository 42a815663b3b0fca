//! Prompt templates for each content mode.

use super::request::{ContentMode, Depth, GenerationRequest};

/// Build the instruction sent to the completion provider.
///
/// Audio mode reuses the text template: the spoken track is the text
/// explanation read aloud.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let topic = request.topic.as_str();
    let depth = request.depth;
    match request.mode {
        ContentMode::Text | ContentMode::Audio => text_prompt(topic, depth),
        ContentMode::Code => code_prompt(topic, depth),
        ContentMode::Visual => visual_prompt(topic, depth),
    }
}

fn text_prompt(topic: &str, depth: Depth) -> String {
    format!(
        "Please provide a comprehensive {depth} level explanation about: {topic}

Structure your response exactly as follows:
1. Definition/Overview - Clear, simple introduction
2. Key Concepts - 3-4 main concepts with brief explanations
3. Practical Examples - Real-world applications or code examples
4. Conclusion - Summary and next steps for learning

Use clear, simple language suitable for a {depth} level learner.
Be concise and focus on the most important concepts."
    )
}

fn code_prompt(topic: &str, depth: Depth) -> String {
    format!(
        "Generate {depth} level Python code to demonstrate: {topic}

Requirements:
1. Add detailed comments explaining EVERY section
2. Use popular ML libraries (scikit-learn, pandas, numpy)
3. Include a simple example that can be run immediately
4. Adjust code complexity for {depth} level learners
5. Use clear variable names and follow Python best practices
6. Include explanatory comments before each major section

Format: Pure Python code that learners can understand and run."
    )
}

fn visual_prompt(topic: &str, depth: Depth) -> String {
    format!(
        "Generate a detailed visualization prompt for: {topic}

The prompt should describe:
1. Overall architecture or workflow
2. Key components and their relationships
3. Data flow between components
4. Suggested visual elements (shapes, arrows, colors)
5. Be suitable for {depth} level learners
6. Be compatible with Mermaid or draw.io tools

Format as clear, step-by-step visualization instructions."
    )
}
