//! Generate command - one lesson plan from the command line

use clap::Args;
use serde::Serialize;

use crate::domain::lesson_plan::{
    GenerationRequest, LessonPlanDraft, LessonPlanSuggestion, DEFAULT_LEARNING_STYLE,
};
use crate::infrastructure::lesson_plan::LessonPlanGeneratorTrait;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Lesson topic, e.g. "Fractions"
    #[arg(long)]
    pub topic: String,

    /// Grade level, e.g. "5th Grade"
    #[arg(long)]
    pub grade: String,

    /// Subject, e.g. "Mathematics"
    #[arg(long)]
    pub subject: String,

    #[arg(long, default_value = DEFAULT_LEARNING_STYLE)]
    pub learning_style: String,

    /// Lesson length in minutes; 0 uses the default of 45
    #[arg(long, allow_negative_numbers = true)]
    pub duration: Option<i64>,

    /// Print the form-ready draft (newline-joined lists) instead of the raw suggestion
    #[arg(long)]
    pub draft: bool,
}

impl GenerateArgs {
    fn to_request(&self) -> anyhow::Result<GenerationRequest> {
        Ok(GenerationRequest::builder()
            .topic(&self.topic)
            .grade(&self.grade)
            .subject(&self.subject)
            .learning_style(&self.learning_style)
            .maybe_duration_minutes(self.duration)
            .build()?)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Output {
    Suggestion(LessonPlanSuggestion),
    Draft(LessonPlanDraft),
}

/// Run one generation and print the result on stdout
pub async fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let request = args.to_request()?;
    let generator = crate::create_generator(&config.ai)?;

    let output = render(&generator, &request, args.draft).await?;
    println!("{}", output);

    Ok(())
}

async fn render(
    generator: &dyn LessonPlanGeneratorTrait,
    request: &GenerationRequest,
    draft: bool,
) -> anyhow::Result<String> {
    let suggestion = generator.generate(request).await?;

    let output = if draft {
        Output::Draft(LessonPlanDraft::from_suggestion(&suggestion))
    } else {
        Output::Suggestion(suggestion)
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::lesson_plan::MockLessonPlanGenerator;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn suggestion() -> LessonPlanSuggestion {
        LessonPlanSuggestion {
            title: "Fractions 101".to_string(),
            objectives: vec!["Understand numerators".to_string(), "Compare fractions".to_string()],
            activities: vec!["Warm-up quiz".to_string()],
            resources: vec!["Whiteboard".to_string()],
        }
    }

    #[test]
    fn test_args_defaults() {
        let cli = TestCli::parse_from([
            "test", "--topic", "Fractions", "--grade", "5th", "--subject", "Math",
        ]);
        let request = cli.args.to_request().unwrap();

        assert_eq!(request.learning_style(), "mixed");
        assert_eq!(request.duration_minutes(), 45);
        assert!(!cli.args.draft);
    }

    #[test]
    fn test_negative_duration_rejected() {
        let cli = TestCli::parse_from([
            "test", "--topic", "Fractions", "--grade", "5th", "--subject", "Math", "--duration",
            "-5",
        ]);

        assert!(cli.args.to_request().is_err());
    }

    #[test]
    fn test_blank_topic_rejected() {
        let cli = TestCli::parse_from(["test", "--topic", " ", "--grade", "5th", "--subject", "Math"]);

        let err = cli.args.to_request().unwrap_err();
        assert!(err.to_string().contains("topic"));
    }

    #[tokio::test]
    async fn test_render_suggestion_and_draft() {
        let generator = MockLessonPlanGenerator::returning(suggestion());
        let request = GenerationRequest::builder()
            .topic("Fractions")
            .grade("5th")
            .subject("Math")
            .build()
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&render(&generator, &request, false).await.unwrap()).unwrap();
        assert_eq!(raw["objectives"][1], "Compare fractions");

        let draft: serde_json::Value =
            serde_json::from_str(&render(&generator, &request, true).await.unwrap()).unwrap();
        assert_eq!(draft["objectives"], "Understand numerators\nCompare fractions");
        assert_eq!(generator.calls(), 2);
    }
}
