use crate::models::GenerationRequest;

/// Fixed voice and formatting rules for the system message
#[derive(Debug, Clone)]
pub struct StyleConfig {
    pub persona: String,
    pub guidelines: Vec<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            persona: "You are a professional blog writer for a luxury fashion brand. \
                      Always write SEO-friendly, aesthetic blog posts in the brand's \
                      polished editorial tone."
                .to_string(),
            guidelines: vec![
                "Keep paragraphs structured and engaging.".to_string(),
                "Use short, descriptive subheadings to organise the post.".to_string(),
                "Do not use em dashes; use commas or full stops instead.".to_string(),
                "Return plain text only, without Markdown symbols or a preamble.".to_string(),
            ],
        }
    }
}

/// System and user messages sent to the completion provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

pub fn build_prompt(request: &GenerationRequest, style: &StyleConfig) -> Prompt {
    let mut system = style.persona.clone();
    for guideline in &style.guidelines {
        system.push('\n');
        system.push_str("- ");
        system.push_str(guideline);
    }

    let mut user = format!(
        "Write a blog post about \"{}\". The post should be around {} characters long and divided into {} paragraphs.",
        request.topic, request.char_length, request.num_paragraphs
    );
    if let Some(additional) = request
        .additional
        .as_deref()
        .filter(|text| !text.trim().is_empty())
    {
        user.push_str("\n\nAdditional instructions: ");
        user.push_str(additional);
    }

    Prompt { system, user }
}
