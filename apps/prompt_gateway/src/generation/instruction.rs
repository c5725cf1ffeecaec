use prompt_client::PromptStyle;

const ROLE_PREAMBLE: &str = "You are an elite Prompt Engineer. Your mission is to take a simple user topic and transform it into a world-class AI prompt.";
const FRAMEWORK: &str = "Target Framework: Use a structured approach like CO-STAR (Context, Objective, Style, Tone, Audience, Response).";
const OUTPUT_RULE: &str = "The output should ONLY be the prompt itself, ready to be copied and pasted into ChatGPT or another LLM. Do not include introductory text like \"Here is your prompt:\".";

/// The system/user pair sent upstream for one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptInstruction {
    pub system: String,
    pub user: String,
}

impl PromptInstruction {
    /// `style` is a free-form label; canonical styles get extra guidance.
    pub fn build(topic: &str, style: &str) -> Self {
        let mut system = format!("{ROLE_PREAMBLE}\n\n{FRAMEWORK}\n\nStyle requested: {style}\n");
        if let Some(guidance) = PromptStyle::from_label(style).map(style_guidance) {
            system.push_str(guidance);
            system.push('\n');
        }
        system.push('\n');
        system.push_str(OUTPUT_RULE);

        Self {
            system,
            user: format!("Generate a high-quality AI prompt for the topic: \"{topic}\""),
        }
    }

    /// Single prompt for endpoints without a separate system field.
    pub fn flattened(&self) -> String {
        format!("{}\n\nSystem: {}", self.user, self.system)
    }
}

fn style_guidance(style: PromptStyle) -> &'static str {
    match style {
        PromptStyle::Structured => "Include clear sections like # Role, # Context, # Task, # Constraints, and # Output Format.",
        PromptStyle::Creative => "Use evocative language and detailed world-building.",
        PromptStyle::Concise => "Strip away fluff but keep essential directives.",
        PromptStyle::Academic => "Use formal terminology and request citations/reasoning.",
    }
}
