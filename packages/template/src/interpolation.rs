use crate::error::{TemplateError, TemplateResult};
use crate::instruction::{Instruction, InterpolationInstruction};
use crate::registry::Recognizer;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use wordtemplate_document::{Document, RunId};
use wordtemplate_evaluator::{EvalError, Model, TemplateEngine};

/// A whole marker, not just text that contains one
///
/// Anchored so a directive that embeds `${...}`, such as
/// `<#assign x = "${y}">`, is left to a directive recognizer instead of
/// being rendered as an interpolation.
static INTERPOLATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$\{.*\}$").expect("invalid interpolation regex"));

/// Turns marker text into the text that replaces it
pub trait ExpressionEvaluator {
    /// Evaluate the raw marker (`${...}` included) against `model`
    fn evaluate(&self, expression: &str, model: &Model) -> Result<String, EvalError>;
}

impl ExpressionEvaluator for TemplateEngine {
    fn evaluate(&self, expression: &str, model: &Model) -> Result<String, EvalError> {
        self.render(expression, model)
    }
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str, &Model) -> Result<String, EvalError>,
{
    fn evaluate(&self, expression: &str, model: &Model) -> Result<String, EvalError> {
        self(expression, model)
    }
}

/// Recognizes `${...}` markers and replaces them with their evaluated text
///
/// Only the bound run's text changes; its formatting stays as it was.
pub struct InterpolationRecognizer<E> {
    evaluator: E,
}

impl<E: ExpressionEvaluator> InterpolationRecognizer<E> {
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }
}

impl Default for InterpolationRecognizer<TemplateEngine> {
    fn default() -> Self {
        Self::new(TemplateEngine::new())
    }
}

impl<E: ExpressionEvaluator> Recognizer for InterpolationRecognizer<E> {
    fn name(&self) -> &str {
        "interpolation"
    }

    fn is_of_type(&self, text: &str) -> bool {
        INTERPOLATION.is_match(text)
    }

    fn create_instruction(&self, text: &str, run: RunId) -> Instruction {
        Instruction::Interpolation(InterpolationInstruction {
            expression: text.to_string(),
            run,
        })
    }

    fn process_instruction(
        &self,
        instruction: &Instruction,
        document: &mut Document,
        model: &Model,
    ) -> TemplateResult<()> {
        let Instruction::Interpolation(interpolation) = instruction else {
            return Ok(());
        };

        let text = self
            .evaluator
            .evaluate(&interpolation.expression, model)
            .map_err(|source| TemplateError::Evaluation {
                expression: interpolation.expression.clone(),
                source,
            })?;

        let run = document
            .find_run_mut(interpolation.run)
            .ok_or(TemplateError::RunNotFound(interpolation.run))?;
        debug!(run = %interpolation.run, expression = %interpolation.expression, "Interpolated");
        run.set_text(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wordtemplate_document::{Body, Paragraph};

    fn model() -> Model {
        json!({"name": "Paris"}).as_object().cloned().unwrap()
    }

    #[test]
    fn test_is_of_type() {
        let recognizer = InterpolationRecognizer::default();
        assert!(recognizer.is_of_type("${name}"));
        assert!(!recognizer.is_of_type("<#list items as item>"));
        assert!(!recognizer.is_of_type("${unterminated"));
        assert!(!recognizer.is_of_type("<#assign x = \"${y}\">"));
    }

    #[test]
    fn test_process_replaces_text_only() {
        let mut paragraph = Paragraph::with_runs(["${name}"]);
        paragraph.runs[0].properties.set("bold", true);
        let run = paragraph.runs[0].id();
        let mut document = Document::from_body(Body::with_elements([paragraph]));

        let recognizer = InterpolationRecognizer::default();
        let instruction = recognizer.create_instruction("${name}", run);
        recognizer
            .process_instruction(&instruction, &mut document, &model())
            .unwrap();

        let run = document.find_run(run).unwrap();
        assert_eq!(run.text(), "Paris");
        assert_eq!(run.properties.get("bold"), Some(&json!(true)));
    }

    #[test]
    fn test_custom_evaluator_and_missing_run() {
        let recognizer = InterpolationRecognizer::new(|expr: &str, _: &Model| {
            Ok::<_, EvalError>(expr.len().to_string())
        });
        let orphan = RunId::next();
        let instruction = recognizer.create_instruction("${x}", orphan);

        let err = recognizer
            .process_instruction(&instruction, &mut Document::new(), &model())
            .unwrap_err();
        assert_eq!(err, TemplateError::RunNotFound(orphan));
    }
}
