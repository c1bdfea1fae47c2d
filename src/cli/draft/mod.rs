//! Draft command - turn a saved suggestion into form-ready text

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use crate::domain::lesson_plan::LessonPlanDraft;

#[derive(Args, Debug)]
pub struct DraftArgs {
    /// Suggestion JSON to convert; read from stdin when omitted
    #[arg(long)]
    pub file: Option<PathBuf>,
}

pub fn run(args: DraftArgs) -> anyhow::Result<()> {
    let input = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    println!("{}", render(&input)?);

    Ok(())
}

/// Missing or non-list fields become empty text, as the form expects
fn render(input: &str) -> anyhow::Result<String> {
    let value: Value = serde_json::from_str(input).context("Suggestion is not valid JSON")?;
    let draft = LessonPlanDraft::from_value(&value);

    Ok(serde_json::to_string_pretty(&draft)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: DraftArgs,
    }

    #[test]
    fn test_partial_suggestion_is_defaulted() {
        let output = render(
            r#"{"title": "Volcanoes", "objectives": ["Name three volcano types", "Draw a cross-section"]}"#,
        )
        .unwrap();
        let draft: LessonPlanDraft = serde_json::from_str(&output).unwrap();

        assert_eq!(draft.title, "Volcanoes");
        assert_eq!(draft.objectives, "Name three volcano types\nDraw a cross-section");
        assert_eq!(draft.activities, "");
        assert_eq!(draft.resources, "");
    }

    #[test]
    fn test_reply_without_fields_gives_empty_draft() {
        let output = render(r#"{"content": "Here is your plan"}"#).unwrap();
        let draft: LessonPlanDraft = serde_json::from_str(&output).unwrap();

        assert_eq!(draft, LessonPlanDraft::default());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = render("title: Volcanoes").unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_file_is_optional() {
        let cli = TestCli::parse_from(["test"]);
        assert!(cli.args.file.is_none());

        let cli = TestCli::parse_from(["test", "--file", "plan.json"]);
        assert_eq!(cli.args.file, Some(PathBuf::from("plan.json")));
    }
}
