//! services/api/src/adapters/analysis_llm.rs
//!
//! This module contains the adapter for the essay-analysis LLM.
//! It implements the `EssayAnalysisService` port from the `core` crate.

const SYSTEM_INSTRUCTIONS: &str = "You are an expert essay analyst and writing coach. \
Provide detailed, constructive feedback that helps improve the essay while maintaining \
the author's voice and intent.";

const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Please analyze this essay based on the following criteria:

Essay Prompt: {prompt}
Guidelines/Rubric: {guidelines}
Essay: {essay}

Please provide:
1. A list of specific suggestions for improvement
2. A list of thought-provoking questions that could help expand or enhance the essay
3. Analysis of potential biases or gaps in the argument
4. Evaluation of how well the essay meets the prompt and guidelines

Format the response as a JSON object with these keys:
- suggestions: array of improvement suggestions
- questions: array of thought-provoking questions"#;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;
use essay_checker_core::{
    domain::{AnalysisOutcome, AnalysisResult},
    ports::{EssayAnalysisService, PortError, PortResult},
};

//=========================================================================================
// Prompt Construction and Response Parsing
//=========================================================================================

/// Assembles the single user instruction sent to the model.
///
/// All three inputs are embedded verbatim; nothing is escaped or truncated
/// here. Length limits are left to the upstream service.
pub fn build_analysis_prompt(essay: &str, prompt: &str, guidelines: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{prompt}", prompt)
        .replace("{guidelines}", guidelines)
        .replace("{essay}", essay)
}

/// Interprets the raw model output.
///
/// Output that is not valid JSON becomes `Degraded` with the empty result
/// rather than an error, so one garbled completion cannot fail the request.
/// Valid JSON with a missing key still yields that key as an empty list.
pub fn parse_analysis(raw: &str) -> AnalysisOutcome {
    match serde_json::from_str::<AnalysisResult>(raw) {
        Ok(result) => AnalysisOutcome::Parsed(result),
        Err(_) => AnalysisOutcome::Degraded(AnalysisResult::default()),
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `EssayAnalysisService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiAnalysisAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiAnalysisAdapter {
    /// Creates a new `OpenAiAnalysisAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }
}

//=========================================================================================
// `EssayAnalysisService` Trait Implementation
//=========================================================================================

#[async_trait]
impl EssayAnalysisService for OpenAiAnalysisAdapter {
    /// Performs one chat completion asking for a JSON-shaped analysis.
    async fn analyze_essay(
        &self,
        essay: &str,
        prompt: &str,
        guidelines: &str,
    ) -> PortResult<AnalysisOutcome> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(build_analysis_prompt(essay, prompt, guidelines))
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(parse_analysis(&content))
            } else {
                Err(PortError::Unexpected(
                    "Analysis LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Unexpected(
                "Analysis LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_all_three_inputs_verbatim() {
        let essay = "Cats are great.";
        let prompt = "Describe cats.";
        let guidelines = "Be concise.";

        let instruction = build_analysis_prompt(essay, prompt, guidelines);

        assert!(instruction.contains(essay));
        assert!(instruction.contains(prompt));
        assert!(instruction.contains(guidelines));
        // The placeholders themselves must be gone.
        assert!(!instruction.contains("{essay}"));
        assert!(!instruction.contains("{prompt}"));
        assert!(!instruction.contains("{guidelines}"));
    }

    #[test]
    fn prompt_requests_exactly_the_two_result_keys() {
        let instruction = build_analysis_prompt("e", "p", "g");
        assert!(instruction.contains("- suggestions: array of improvement suggestions"));
        assert!(instruction.contains("- questions: array of thought-provoking questions"));
    }

    #[test]
    fn prompt_tolerates_empty_inputs() {
        let instruction = build_analysis_prompt("", "", "");
        assert!(instruction.contains("Essay Prompt: \n"));
        assert!(instruction.contains("Guidelines/Rubric: \n"));
        assert!(instruction.contains("Essay: \n"));
    }

    #[test]
    fn valid_model_output_parses_into_the_result() {
        let outcome = parse_analysis(
            r#"{"suggestions":["Add examples"],"questions":["Why cats specifically?"]}"#,
        );
        assert_eq!(
            outcome,
            AnalysisOutcome::Parsed(AnalysisResult {
                suggestions: vec!["Add examples".to_string()],
                questions: vec!["Why cats specifically?".to_string()],
            })
        );
    }

    #[test]
    fn missing_keys_default_to_empty_lists() {
        let outcome = parse_analysis("{}");
        assert_eq!(outcome, AnalysisOutcome::Parsed(AnalysisResult::default()));
    }

    #[test]
    fn non_json_output_degrades_to_the_empty_result() {
        let outcome = parse_analysis("I'm sorry, I can't produce JSON today.");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_result(), AnalysisResult::default());
    }

    #[test]
    fn json_of_the_wrong_shape_also_degrades() {
        let outcome = parse_analysis(r#"["suggestions","questions"]"#);
        assert!(outcome.is_degraded());
    }
}
