use super::read_document;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use wordtemplate::{parse_with, InstructionRegistry};
use wordtemplate_evaluator::TemplateEngine;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Document JSON file
    pub document: PathBuf,
}

pub fn inspect(args: InspectArgs, config: &Config) -> Result<()> {
    let mut document = read_document(&args.document)?;
    let registry = InstructionRegistry::with_engine(TemplateEngine::new());
    let template = parse_with(&mut document, &registry, &config.parse_options());

    if template.is_empty() {
        println!("{}", "No instructions found".yellow());
        return Ok(());
    }

    println!(
        "{} {} instruction(s) in {}",
        "🔍".bright_blue(),
        template.len(),
        args.document.display()
    );
    for (index, instruction) in template.iter().enumerate() {
        println!(
            "  {:>3}  {:<14} {}",
            index.to_string().dimmed(),
            instruction.kind().cyan(),
            instruction.expression()
        );
    }

    Ok(())
}
