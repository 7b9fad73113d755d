/// System instruction sent with every analysis request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that analyzes market positioning and target audiences.";

const POSITIONING_PROMPT: &str = r#"Analyze {{COMPETITOR_NAME}}'s loyalty program market positioning and target audience.
Consider:
- Primary target demographic
- Market positioning (premium, value, etc.)
- Unique value proposition
- How the loyalty program supports their market position

Provide this as a single, well-formatted paragraph focusing on who they target and how they position themselves."#;

/// Build the analysis prompt for one competitor.
pub fn build_positioning_prompt(competitor_name: &str) -> String {
    POSITIONING_PROMPT.replace("{{COMPETITOR_NAME}}", competitor_name)
}
