use thiserror::Error;
use wordtemplate_document::{DocumentError, RunId};
use wordtemplate_evaluator::EvalError;

pub type TemplateResult<T> = Result<T, TemplateError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Failed to evaluate '{expression}': {source}")]
    Evaluation {
        expression: String,
        #[source]
        source: EvalError,
    },

    #[error("No run with id {0} in the document")]
    RunNotFound(RunId),

    #[error(transparent)]
    Document(#[from] DocumentError),
}
