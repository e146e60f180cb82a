use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use serde_json::json;
use wordtemplate::{parse, InstructionRegistry};
use wordtemplate_document::{Body, BodyElement, Document, Paragraph, Table};
use wordtemplate_evaluator::TemplateEngine;

/// Letter-like document whose markers are fragmented the way editors store them
fn fragmented_document(paragraphs: usize) -> Document {
    let mut elements = Vec::with_capacity(paragraphs + 1);
    for i in 0..paragraphs {
        elements.push(BodyElement::Paragraph(Paragraph::with_runs([
            format!("Line {} for ", i),
            "${".to_string(),
            "customer.name".to_string(),
            "} ordered ${order.lines[0].".to_string(),
            "sku} at ${order.total} €.".to_string(),
        ])));
    }

    let mut table = Table::new();
    table.rows[0].cells[0].elements = vec![Paragraph::with_runs(["${order.total?c}"]).into()];
    elements.push(BodyElement::Table(table));

    Document::from_body(Body::with_elements(elements))
}

fn locate_small(c: &mut Criterion) {
    let registry = InstructionRegistry::with_engine(TemplateEngine::new());
    let document = fragmented_document(10);

    c.bench_function("locate_10_paragraphs", |b| {
        b.iter_batched(
            || document.clone(),
            |mut doc| parse(black_box(&mut doc), &registry),
            BatchSize::SmallInput,
        )
    });
}

fn locate_large(c: &mut Criterion) {
    let registry = InstructionRegistry::with_engine(TemplateEngine::new());
    let document = fragmented_document(500);

    c.bench_function("locate_500_paragraphs", |b| {
        b.iter_batched(
            || document.clone(),
            |mut doc| parse(black_box(&mut doc), &registry),
            BatchSize::LargeInput,
        )
    });
}

fn locate_and_apply(c: &mut Criterion) {
    let registry = InstructionRegistry::with_engine(TemplateEngine::new());
    let document = fragmented_document(100);
    let model = json!({
        "customer": {"name": "Ada"},
        "order": {"total": 42.5, "lines": [{"sku": "A-1"}]},
    })
    .as_object()
    .cloned()
    .unwrap_or_default();

    c.bench_function("locate_and_apply_100_paragraphs", |b| {
        b.iter_batched(
            || document.clone(),
            |mut doc| {
                let template = parse(&mut doc, &registry);
                template.apply(&mut doc, &registry, black_box(&model))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, locate_small, locate_large, locate_and_apply);
criterion_main!(benches);
