//! Prompt construction for lesson-plan generation

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::template::PromptTemplate;
use super::GenerationRequest;
use crate::domain::llm::ChatMessage;

// Continuation lines carry a two-space indent, blank separators included.
const SYSTEM_TEMPLATE: &str = concat!(
    "You are an expert educational content creator. Generate a detailed lesson plan for a ${var:grade} ${var:subject} class about \"${var:topic}\".\n",
    "  \n",
    "  The lesson plan should include:\n",
    "  1. A clear, engaging title\n",
    "  2. 3-5 specific learning objectives\n",
    "  3. 4-6 engaging activities with time allocations\n",
    "  4. 3-5 relevant resources\n",
    "  \n",
    r#"  Format the response as a JSON object with these exact keys: {"title": string, "objectives": string[], "activities": string[], "resources": string[]}"#,
);

const USER_TEMPLATE: &str =
    "Create a ${var:duration}-minute lesson plan about ${var:topic} for ${var:grade} ${var:subject} class.";

static SYSTEM_PROMPT: Lazy<PromptTemplate> = Lazy::new(|| PromptTemplate::parse(SYSTEM_TEMPLATE));
static USER_PROMPT: Lazy<PromptTemplate> = Lazy::new(|| PromptTemplate::parse(USER_TEMPLATE));

fn template_values(request: &GenerationRequest) -> HashMap<&'static str, String> {
    HashMap::from([
        ("topic", request.topic().to_string()),
        ("grade", request.grade().to_string()),
        ("subject", request.subject().to_string()),
        ("duration", request.duration_minutes().to_string()),
    ])
}

fn render(template: &PromptTemplate, request: &GenerationRequest) -> String {
    // Every template variable is in template_values, so rendering cannot fail.
    template
        .render(&template_values(request))
        .unwrap_or_else(|_| template.content().to_string())
}

/// Instruction describing the expected four-key JSON reply
pub fn system_prompt(request: &GenerationRequest) -> String {
    render(&SYSTEM_PROMPT, request)
}

/// Instruction stating duration, topic, grade and subject
pub fn user_prompt(request: &GenerationRequest) -> String {
    render(&USER_PROMPT, request)
}

/// The `[system, user]` conversation sent upstream
pub fn build_messages(request: &GenerationRequest) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt(request)),
        ChatMessage::user(user_prompt(request)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MessageRole;

    fn request(topic: &str, grade: &str, subject: &str) -> GenerationRequest {
        GenerationRequest::builder()
            .topic(topic)
            .grade(grade)
            .subject(subject)
            .build()
            .unwrap()
    }

    #[test]
    fn test_system_prompt_embeds_inputs_verbatim() {
        let req = request("The Water Cycle  ", "Grade 4", "Earth Science");
        let prompt = system_prompt(&req);

        assert!(prompt.contains("for a Grade 4 Earth Science class about \"The Water Cycle  \"."));
        assert!(prompt.contains("3-5 specific learning objectives"));
        assert!(prompt.contains("4-6 engaging activities with time allocations"));
        assert!(prompt.contains(
            r#"{"title": string, "objectives": string[], "activities": string[], "resources": string[]}"#
        ));
    }

    #[test]
    fn test_system_prompt_layout() {
        let prompt = system_prompt(&request("Fractions", "5th", "Math"));
        let lines: Vec<&str> = prompt.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[1], "  ");
        assert_eq!(lines[2], "  The lesson plan should include:");
        assert_eq!(lines[6], "  4. 3-5 relevant resources");
        assert_eq!(lines[7], "  ");
        assert!(lines[8].starts_with("  Format the response as a JSON object"));
        assert!(!prompt.ends_with('\n'));
    }

    #[test]
    fn test_placeholder_like_inputs_survive() {
        let req = request("${var:grade}", "${var:subject}", "Art");
        let prompt = system_prompt(&req);

        assert!(prompt.contains("${var:grade}"));
        assert!(prompt.contains("${var:subject}"));
    }

    #[test]
    fn test_user_prompt() {
        let req = GenerationRequest::builder()
            .topic("Fractions")
            .grade("5th")
            .subject("Math")
            .duration_minutes(30)
            .build()
            .unwrap();

        assert_eq!(
            user_prompt(&req),
            "Create a 30-minute lesson plan about Fractions for 5th Math class."
        );
    }

    #[test]
    fn test_messages_are_system_then_user() {
        let messages = build_messages(&request("Fractions", "5th", "Math"));

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1].role, MessageRole::User);
        assert!(messages[1].content.starts_with("Create a 45-minute lesson plan"));
    }
}
