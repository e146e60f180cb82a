use super::read_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use wordtemplate_document::Container;

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Document JSON file
    pub document: PathBuf,
}

pub fn text(args: TextArgs) -> Result<()> {
    let document = read_document(&args.document)?;

    for (kind, body) in document.bodies() {
        println!("{}", format!("── {} ──", kind).dimmed());
        println!("{}", body.content());
    }

    Ok(())
}
