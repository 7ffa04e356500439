use crate::tags::title_hashtags;

/// Prompt asking the model to turn terse main ideas into structured notes.
pub fn expansion_prompt(title: &str, main_ideas: &str) -> String {
    let tags = title_hashtags(title).join(" ");
    format!(
        "I want you to expand these brief notes into a detailed document.

Title: {title}
Tags: {tags}
Main ideas:
{main_ideas}

Create detailed notes that:
1. Expand on each main idea with supporting details and examples
2. Use markdown formatting with headers for organization
3. Connect related concepts where appropriate
4. Include actionable items or key takeaways as bullet points
5. Keep the writing style professional but conversational
"
    )
}
