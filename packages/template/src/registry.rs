use crate::error::{TemplateError, TemplateResult};
use crate::instruction::{Instruction, WordTemplate};
use crate::interpolation::InterpolationRecognizer;
use tracing::{debug, info, instrument, warn};
use wordtemplate_document::{Document, RunId};
use wordtemplate_evaluator::{Model, TemplateEngine};

/// Plug-in that claims one kind of marker and knows how to apply it
pub trait Recognizer {
    fn name(&self) -> &str;

    /// Whether this recognizer claims the marker text
    fn is_of_type(&self, text: &str) -> bool;

    fn create_instruction(&self, text: &str, run: RunId) -> Instruction;

    /// Apply `instruction` to the document
    ///
    /// Every registered recognizer sees every instruction; implementations
    /// return `Ok(())` for kinds they did not create.
    fn process_instruction(
        &self,
        instruction: &Instruction,
        document: &mut Document,
        model: &Model,
    ) -> TemplateResult<()>;
}

/// Ordered set of recognizers
///
/// Classification asks recognizers in registration order and the first
/// match wins.
#[derive(Default)]
pub struct InstructionRegistry {
    recognizers: Vec<Box<dyn Recognizer>>,
}

impl InstructionRegistry {
    /// Registry without any recognizer; every marker stays unclaimed
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with `${...}` interpolation backed by `engine`
    pub fn with_engine(engine: TemplateEngine) -> Self {
        let mut registry = Self::new();
        registry.register(InterpolationRecognizer::new(engine));
        registry
    }

    pub fn register<R: Recognizer + 'static>(&mut self, recognizer: R) -> &mut Self {
        debug!(recognizer = recognizer.name(), "Registered recognizer");
        self.recognizers.push(Box::new(recognizer));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recognizers.iter().map(|r| r.name())
    }

    pub fn create_instruction(&self, text: &str, run: RunId) -> Option<Instruction> {
        self.recognizers
            .iter()
            .find(|r| r.is_of_type(text))
            .map(|r| r.create_instruction(text, run))
    }

    /// Hand `instruction` to every recognizer in order
    pub fn process_instruction(
        &self,
        instruction: &Instruction,
        document: &mut Document,
        model: &Model,
    ) -> TemplateResult<()> {
        for recognizer in &self.recognizers {
            recognizer.process_instruction(instruction, document, model)?;
        }
        Ok(())
    }

    /// Apply every instruction in order; the first failure aborts the pass
    ///
    /// Instructions applied before the failure stay applied.
    #[instrument(skip_all, fields(instructions = template.len()))]
    pub fn process_all(
        &self,
        template: &WordTemplate,
        document: &mut Document,
        model: &Model,
    ) -> TemplateResult<()> {
        for instruction in template {
            self.process_instruction(instruction, document, model)?;
        }
        info!("Applied all instructions");
        Ok(())
    }

    /// Apply every instruction, collecting failures instead of stopping
    ///
    /// A failed instruction leaves its marker text in place.
    #[instrument(skip_all, fields(instructions = template.len()))]
    pub fn process_all_lenient(
        &self,
        template: &WordTemplate,
        document: &mut Document,
        model: &Model,
    ) -> Vec<TemplateError> {
        let errors: Vec<TemplateError> = template
            .iter()
            .filter_map(|instruction| {
                self.process_instruction(instruction, document, model)
                    .err()
            })
            .collect();

        for error in &errors {
            warn!(%error, "Instruction failed");
        }
        info!(failed = errors.len(), "Applied instructions");
        errors
    }
}

impl std::fmt::Debug for InstructionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::CustomInstruction;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records which instructions it was shown
    struct Spy {
        name: &'static str,
        prefix: &'static str,
        seen: Rc<RefCell<Vec<String>>>,
    }

    impl Recognizer for Spy {
        fn name(&self) -> &str {
            self.name
        }

        fn is_of_type(&self, text: &str) -> bool {
            text.starts_with(self.prefix)
        }

        fn create_instruction(&self, text: &str, run: RunId) -> Instruction {
            Instruction::Custom(CustomInstruction {
                recognizer: self.name.to_string(),
                text: text.to_string(),
                run,
            })
        }

        fn process_instruction(
            &self,
            instruction: &Instruction,
            _document: &mut Document,
            _model: &Model,
        ) -> TemplateResult<()> {
            if instruction.kind() == self.name {
                self.seen.borrow_mut().push(instruction.expression().to_string());
            }
            Ok(())
        }
    }

    fn spy(name: &'static str, prefix: &'static str, seen: &Rc<RefCell<Vec<String>>>) -> Spy {
        Spy {
            name,
            prefix,
            seen: Rc::clone(seen),
        }
    }

    #[test]
    fn test_first_matching_recognizer_wins() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = InstructionRegistry::new();
        registry
            .register(spy("list", "<#list", &seen))
            .register(spy("any-directive", "<#", &seen));

        let run = RunId::next();
        let list = registry.create_instruction("<#list xs as x>", run).unwrap();
        let other = registry.create_instruction("<#if x>", run).unwrap();

        assert_eq!(list.kind(), "list");
        assert_eq!(other.kind(), "any-directive");
        assert!(registry.create_instruction("plain", run).is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "any-directive"]);
    }

    #[test]
    fn test_broadcast_reaches_only_the_owning_kind() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = InstructionRegistry::with_engine(TemplateEngine::new());
        registry.register(spy("directive", "<#", &seen));

        let instruction = registry
            .create_instruction("<#else>", RunId::next())
            .unwrap();
        registry
            .process_instruction(&instruction, &mut Document::new(), &Model::new())
            .unwrap();

        assert_eq!(*seen.borrow(), vec!["<#else>".to_string()]);
    }

    #[test]
    fn test_empty_registry_claims_nothing() {
        let registry = InstructionRegistry::new();
        assert!(registry.create_instruction("${x}", RunId::next()).is_none());
        assert_eq!(format!("{:?}", registry), "[]");
    }
}
