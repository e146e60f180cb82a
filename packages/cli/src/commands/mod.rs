mod inspect;
mod render;
mod text;

pub use inspect::{inspect, InspectArgs};
pub use render::{render, RenderArgs};
pub use text::{text, TextArgs};

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use wordtemplate::Model;
use wordtemplate_document::Document;

pub(crate) fn read_document(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("Invalid document JSON in {}", path.display()))
}

/// Models must be JSON objects; their keys become top-level variables
pub(crate) fn read_model(path: &Path) -> Result<Model> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&source)
        .with_context(|| format!("Invalid model JSON in {}", path.display()))?;

    match value {
        serde_json::Value::Object(model) => Ok(model),
        other => Err(anyhow!(
            "Model in {} must be a JSON object, found {}",
            path.display(),
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_model_requires_object() {
        let path = write_temp("wordtemplate-model-array.json", "[1, 2]");
        let err = read_model(&path).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object, found an array"));

        let path = write_temp("wordtemplate-model-object.json", r#"{"name": "Ada"}"#);
        let model = read_model(&path).unwrap();
        assert_eq!(model.get("name"), Some(&serde_json::json!("Ada")));
    }

    #[test]
    fn test_read_document_round_trips_serialized_tree() {
        use wordtemplate_document::{Body, Paragraph};

        let document = Document::from_body(Body::with_elements([Paragraph::with_runs([
            "Hello ", "${name}",
        ])]));
        let path = write_temp(
            "wordtemplate-document.json",
            &serde_json::to_string(&document).unwrap(),
        );

        let loaded = read_document(&path).unwrap();
        assert_eq!(
            loaded.body.elements[0].as_paragraph().unwrap().text(),
            "Hello ${name}"
        );
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let err = read_document(Path::new("/nonexistent/doc.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/doc.json"));
    }
}
