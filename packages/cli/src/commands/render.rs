use super::{read_document, read_model};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use wordtemplate::{parse_with, InstructionRegistry, TemplateError};
use wordtemplate_evaluator::{format_error, TemplateEngine};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document JSON file
    pub document: PathBuf,

    /// Model JSON file (an object)
    #[arg(short, long)]
    pub model: PathBuf,

    /// Write the rendered document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn render(args: RenderArgs, config: &Config) -> Result<()> {
    let mut document = read_document(&args.document)?;
    let model = read_model(&args.model)?;

    let registry = InstructionRegistry::with_engine(TemplateEngine::new());
    let template = parse_with(&mut document, &registry, &config.parse_options());
    eprintln!(
        "{} {} instruction(s) in {}",
        "🔨".bright_blue(),
        template.len(),
        args.document.display()
    );

    if config.strict {
        if let Err(err) = template.apply(&mut document, &registry, &model) {
            report(&err);
            return Err(anyhow!("Render aborted; no output written"));
        }
    } else {
        let errors = registry.process_all_lenient(&template, &mut document, &model);
        for err in &errors {
            report(err);
        }
        if !errors.is_empty() {
            eprintln!(
                "{} {} marker(s) left unrendered",
                "⚠️ ".yellow(),
                errors.len()
            );
        }
    }

    let json = if config.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("{} Rendered → {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn report(err: &TemplateError) {
    match err {
        TemplateError::Evaluation { expression, source } => {
            eprint!("{}", format_error(expression, "marker", source));
        }
        other => eprintln!("{} {}", "✗".red(), other),
    }
}
