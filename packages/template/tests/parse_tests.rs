//! Locating markers across runs, bodies and tables

use wordtemplate::{parse, parse_with, InstructionRegistry, ParseOptions};
use wordtemplate_document::{Body, BodyElement, Container, Document, Paragraph, Run, Table};
use wordtemplate_evaluator::TemplateEngine;

fn registry() -> InstructionRegistry {
    InstructionRegistry::with_engine(TemplateEngine::new())
}

fn body(paragraphs: &[&[&str]]) -> Body {
    Body::with_elements(paragraphs.iter().map(|runs| Paragraph::with_runs(runs.iter().copied())))
}

fn first_paragraph(body: &Body) -> &Paragraph {
    body.elements[0].as_paragraph().unwrap()
}

fn texts(paragraph: &Paragraph) -> Vec<&str> {
    paragraph.runs.iter().map(Run::text).collect()
}

#[test]
fn test_marker_split_over_runs_collapses_into_one() {
    let mut document = Document::from_body(body(&[&["Hello ", "${", "name", "}", "!"]]));

    let template = parse(&mut document, &registry());

    assert_eq!(template.len(), 1);
    let paragraph = first_paragraph(&document.body);
    assert_eq!(texts(paragraph), vec!["Hello ", "${name}", "!"]);
    assert_eq!(template.instructions()[0].run(), paragraph.runs[1].id());
    assert_eq!(template.instructions()[0].expression(), "${name}");
}

#[test]
fn test_every_marker_gets_exactly_one_run() {
    let mut document = Document::from_body(body(&[
        &["Dear ${first} ${last", "}, your order ${order.id} ", "shipped."],
        &["No markers here"],
    ]));

    let template = parse(&mut document, &registry());

    let paragraph = first_paragraph(&document.body);
    let bound: Vec<&str> = template
        .iter()
        .map(|instruction| {
            let index = paragraph.position_of(instruction.run()).unwrap();
            paragraph.runs[index].text()
        })
        .collect();
    assert_eq!(bound, vec!["${first}", "${last}", "${order.id}"]);
    assert_eq!(
        paragraph.text(),
        "Dear ${first} ${last}, your order ${order.id} shipped."
    );
}

#[test]
fn test_duplicate_markers_bind_distinct_runs() {
    let mut document = Document::from_body(body(&[&["${x} and ${x}"]]));

    let template = parse(&mut document, &registry());

    assert_eq!(template.len(), 2);
    let runs: Vec<_> = template.iter().map(|i| i.run()).collect();
    assert_ne!(runs[0], runs[1]);
    assert_eq!(texts(first_paragraph(&document.body)), vec!["${x}", " and ", "${x}"]);
}

#[test]
fn test_directives_are_isolated_but_unclaimed() {
    let mut document = Document::from_body(body(&[&["<#list", " items as item>", "${item}</#list>"]]));

    let template = parse(&mut document, &registry());

    assert_eq!(template.len(), 1);
    assert_eq!(template.instructions()[0].kind(), "interpolation");
    assert_eq!(
        texts(first_paragraph(&document.body)),
        vec!["<#list items as item>", "${item}", "</#list>"]
    );
}

#[test]
fn test_nested_table_markers_are_included_in_order() {
    let mut inner = Table::new();
    inner.rows[0].cells[0].elements = vec![Paragraph::with_runs(["${inner}"]).into()];

    let mut outer = Table::new();
    outer.rows[0].cells[0].elements = vec![
        Paragraph::with_runs(["${cell}"]).into(),
        BodyElement::Table(inner),
    ];

    let mut document = Document::from_body(Body::with_elements([
        BodyElement::Paragraph(Paragraph::with_runs(["${before}"])),
        BodyElement::Table(outer),
        BodyElement::Paragraph(Paragraph::with_runs(["${after}"])),
    ]));

    let template = parse(&mut document, &registry());

    let expressions: Vec<_> = template.iter().map(|i| i.expression()).collect();
    assert_eq!(expressions, vec!["${before}", "${cell}", "${inner}", "${after}"]);
}

#[test]
fn test_headers_and_footers_come_before_the_body() {
    let mut document = Document::from_body(body(&[&["${body}"]]));
    document.headers.push(body(&[&["${header}"]]));
    document.footers.push(body(&[&["${footer}"]]));

    let template = parse(&mut document.clone(), &registry());
    let expressions: Vec<_> = template.iter().map(|i| i.expression()).collect();
    assert_eq!(expressions, vec!["${header}", "${footer}", "${body}"]);

    let options = ParseOptions {
        headers: false,
        footers: true,
    };
    let template = parse_with(&mut document, &registry(), &options);
    let expressions: Vec<_> = template.iter().map(|i| i.expression()).collect();
    assert_eq!(expressions, vec!["${footer}", "${body}"]);
}

#[test]
fn test_empty_registry_changes_runs_but_returns_nothing() {
    let mut document = Document::from_body(body(&[&["a${", "b}c"]]));

    let template = parse(&mut document, &InstructionRegistry::new());

    assert!(template.is_empty());
    assert_eq!(texts(first_paragraph(&document.body)), vec!["a", "${b}", "c"]);
}

#[test]
fn test_multibyte_text_around_markers() {
    let mut document = Document::from_body(body(&[&["Prénom : ${pré", "nom} — fin"]]));

    let template = parse(&mut document, &registry());

    assert_eq!(template.len(), 1);
    assert_eq!(
        texts(first_paragraph(&document.body)),
        vec!["Prénom : ", "${prénom}", " — fin"]
    );
}

#[test]
fn test_cloned_paragraphs_bind_distinct_runs() {
    let paragraph = Paragraph::with_runs(["${name}"]);
    let mut document = Document::from_body(Body::with_elements([paragraph.clone(), paragraph]));

    let registry = registry();
    let template = parse(&mut document, &registry);
    assert_eq!(template.len(), 2);
    assert_ne!(template.instructions()[0].run(), template.instructions()[1].run());

    let model = serde_json::json!({"name": "Paris"})
        .as_object()
        .cloned()
        .unwrap();
    template.apply(&mut document, &registry, &model).unwrap();

    let rendered: Vec<String> = document.body.paragraphs().map(Paragraph::text).collect();
    assert_eq!(rendered, vec!["Paris", "Paris"]);
}

#[test]
fn test_edited_clone_does_not_shadow_the_marker_run() {
    let source = Paragraph::with_runs(["Hi ${name}"]);
    let mut copy = source.clone();
    copy.runs[0].set_text("plain text");
    let mut document = Document::from_body(Body::with_elements([copy, source]));

    let registry = registry();
    let template = parse(&mut document, &registry);
    let model = serde_json::json!({"name": "Ada"})
        .as_object()
        .cloned()
        .unwrap();
    template.apply(&mut document, &registry, &model).unwrap();

    let rendered: Vec<String> = document.body.paragraphs().map(Paragraph::text).collect();
    assert_eq!(rendered, vec!["plain text", "Hi Ada"]);
}
