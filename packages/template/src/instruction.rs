use crate::error::TemplateResult;
use crate::registry::InstructionRegistry;
use wordtemplate_document::{Document, RunId};
use wordtemplate_evaluator::Model;

/// A marker found in a document, bound to the run that now holds it alone
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// `${expression}`: the run text is replaced by the evaluated value
    Interpolation(InterpolationInstruction),

    /// Claimed by a recognizer registered outside this crate
    Custom(CustomInstruction),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterpolationInstruction {
    /// Full marker text, `${` and `}` included
    pub expression: String,
    pub run: RunId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomInstruction {
    /// Name of the recognizer that created it
    pub recognizer: String,
    pub text: String,
    pub run: RunId,
}

impl Instruction {
    pub fn kind(&self) -> &str {
        match self {
            Instruction::Interpolation(_) => "interpolation",
            Instruction::Custom(custom) => &custom.recognizer,
        }
    }

    /// Marker text the instruction was created from
    pub fn expression(&self) -> &str {
        match self {
            Instruction::Interpolation(interpolation) => &interpolation.expression,
            Instruction::Custom(custom) => &custom.text,
        }
    }

    pub fn run(&self) -> RunId {
        match self {
            Instruction::Interpolation(interpolation) => interpolation.run,
            Instruction::Custom(custom) => custom.run,
        }
    }
}

/// Ordered instructions of a parsed document
///
/// Order is headers, footers, then the main body; within a body it is
/// document order, table cells included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordTemplate {
    instructions: Vec<Instruction>,
}

impl WordTemplate {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Apply every instruction to `document`, stopping at the first failure
    pub fn apply(
        &self,
        document: &mut Document,
        registry: &InstructionRegistry,
        model: &Model,
    ) -> TemplateResult<()> {
        registry.process_all(self, document, model)
    }
}

impl<'a> IntoIterator for &'a WordTemplate {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
