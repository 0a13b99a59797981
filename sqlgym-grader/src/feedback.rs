use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::FeedbackError;
use crate::sandbox::ResultSet;

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const PREVIEW_ROWS: usize = 10;
const RAW_REPLY_LIMIT: usize = 400;

const SYSTEM_PROMPT: &str = "You are a patient SQL tutor. Reply with a single JSON object \
with the keys \"feedback\" (string), \"hints\" (array of strings), \"suggestions\" (array of \
strings) and \"explanation\" (string). Do not reveal the reference solution verbatim.";

/// Structured feedback shown to the student. Generation is best-effort text:
/// it never fails and never influences the correctness verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub feedback: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub explanation: String,
}

pub struct FeedbackContext<'a> {
    pub exercise_title: &'a str,
    pub exercise_description: &'a str,
    pub solution_query: &'a str,
    pub submitted_query: &'a str,
    pub is_correct: bool,
    pub error_message: Option<&'a str>,
    pub student_result: Option<&'a ResultSet>,
    pub expected_result: Option<&'a ResultSet>,
}

#[derive(Clone)]
pub struct FeedbackGenerator {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl FeedbackGenerator {
    pub fn from_env() -> Self {
        FeedbackGenerator {
            client: reqwest::Client::new(),
            api_url: std::env::var("FEEDBACK_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key: std::env::var("FEEDBACK_API_KEY").ok(),
            model: std::env::var("FEEDBACK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    /// Produces feedback for a graded submission. Without a credential, or on
    /// any remote failure, falls back to the rule-based text. Retry never,
    /// fall back once.
    pub async fn generate(&self, ctx: &FeedbackContext<'_>) -> Feedback {
        let Some(key) = self.api_key.as_deref() else {
            return fallback_feedback(ctx);
        };
        match self.request_remote(key, ctx).await {
            Ok(feedback) => feedback,
            Err(err) => {
                log::warn!("feedback service unavailable, using local feedback: {}", err);
                fallback_feedback(ctx)
            }
        }
    }

    async fn request_remote(
        &self,
        key: &str,
        ctx: &FeedbackContext<'_>,
    ) -> Result<Feedback, FeedbackError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(ctx) },
            ],
        });

        let response: Value = self
            .client
            .post(&self.api_url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(FeedbackError::MalformedResponse)?;

        feedback_from_reply(content)
    }
}

/// Interprets the model's free-text reply. The reply is expected to contain a
/// JSON object somewhere; a reply without one is still usable as plain text.
fn feedback_from_reply(reply: &str) -> Result<Feedback, FeedbackError> {
    match extract_json_object(reply) {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Feedback {
            feedback: truncate(reply, RAW_REPLY_LIMIT).trim().to_string(),
            hints: Vec::new(),
            suggestions: Vec::new(),
            explanation: String::new(),
        }),
    }
}

/// Finds the first balanced brace-delimited object in `text`, skipping braces
/// inside string literals.
fn extract_json_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + offset + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn build_prompt(ctx: &FeedbackContext<'_>) -> String {
    let mut prompt = format!(
        "Exercise: {}\n{}\n\nReference solution:\n{}\n\nStudent query:\n{}\n\nVerdict: {}\n",
        ctx.exercise_title,
        ctx.exercise_description,
        ctx.solution_query,
        ctx.submitted_query,
        if ctx.is_correct { "correct" } else { "incorrect" },
    );
    if let Some(msg) = ctx.error_message {
        prompt.push_str(&format!("\nThe query failed with this error:\n{}\n", msg));
    }
    if let Some(expected) = ctx.expected_result {
        prompt.push_str(&format!(
            "\nExpected result ({} rows):\n{}\n",
            expected.row_count(),
            expected.preview(PREVIEW_ROWS)
        ));
    }
    if let Some(actual) = ctx.student_result {
        prompt.push_str(&format!(
            "\nStudent result ({} rows):\n{}\n",
            actual.row_count(),
            actual.preview(PREVIEW_ROWS)
        ));
    }
    prompt.push_str("\nGive the student constructive feedback on this attempt.");
    prompt
}

/// Deterministic feedback keyed on the engine error text and the verdict.
pub fn fallback_feedback(ctx: &FeedbackContext<'_>) -> Feedback {
    if let Some(msg) = ctx.error_message {
        return error_feedback(msg);
    }

    if ctx.is_correct {
        return Feedback {
            feedback: "Correct! Your query returned the expected result.".to_string(),
            hints: Vec::new(),
            suggestions: Vec::new(),
            explanation: "The rows your query produced match the reference solution.".to_string(),
        };
    }

    let mut hints = Vec::new();
    if let (Some(actual), Some(expected)) = (ctx.student_result, ctx.expected_result) {
        if actual.column_count() != expected.column_count() {
            hints.push(format!(
                "Your query returned {} columns but {} were expected. Check your SELECT list.",
                actual.column_count(),
                expected.column_count()
            ));
        } else if actual.row_count() != expected.row_count() {
            hints.push(format!(
                "Your query returned {} rows but {} were expected. Check your WHERE clause.",
                actual.row_count(),
                expected.row_count()
            ));
        } else {
            hints.push(
                "The row and column counts match, but some values differ. Compare your output \
                 against the exercise description."
                    .to_string(),
            );
        }
    }
    Feedback {
        feedback: "Not quite - your query ran, but the result does not match the expected output."
            .to_string(),
        hints,
        suggestions: vec![
            "Re-read the exercise description and check which columns and rows are asked for."
                .to_string(),
        ],
        explanation: String::new(),
    }
}

fn error_feedback(msg: &str) -> Feedback {
    let lower = msg.to_lowercase();
    let (feedback, hints) = if lower.contains("syntax error") {
        (
            "Your query has a syntax error.".to_string(),
            vec![
                format!("The database reported: {}", msg),
                "Check for missing keywords, commas, or unbalanced quotes.".to_string(),
            ],
        )
    } else if lower.contains("no such table") || lower.contains("does not exist") {
        (
            "Your query references a table that does not exist in this database.".to_string(),
            vec![
                format!("The database reported: {}", msg),
                "Check the table name against the exercise schema. Table names are case-sensitive \
                 on some engines."
                    .to_string(),
            ],
        )
    } else if lower.contains("no such column") {
        (
            "Your query references a column that does not exist.".to_string(),
            vec![
                format!("The database reported: {}", msg),
                "Check the column names in the exercise schema.".to_string(),
            ],
        )
    } else if lower.contains("ambiguous") {
        (
            "A column reference in your query is ambiguous.".to_string(),
            vec![
                format!("The database reported: {}", msg),
                "Qualify the column with its table name, e.g. orders.id.".to_string(),
            ],
        )
    } else {
        (
            "Your query failed to execute.".to_string(),
            vec![format!("The database reported: {}", msg)],
        )
    };

    Feedback {
        feedback,
        hints,
        suggestions: vec!["Fix the error and submit again.".to_string()],
        explanation: String::new(),
    }
}
