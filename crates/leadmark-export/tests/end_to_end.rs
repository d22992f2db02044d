//! Text file in, exported document out, with the built-in metrics

use std::sync::Arc;

use leadmark_core::{LayoutConfig, Pipeline, TextSource};
use leadmark_export::{json::JsonPage, JsonExporter, PdfExporter, PdfOpsExporter};
use leadmark_input::{PdfTextSource, PlainTextSource};
use leadmark_metrics_base14::Base14Metrics;

fn pipeline() -> Pipeline {
    Pipeline::builder()
        .metrics(Arc::new(Base14Metrics::new()))
        .exporter(Arc::new(JsonExporter::new()))
        .enable_metrics_cache(true)
        .build()
        .expect("pipeline build")
}

#[test]
fn helvetica_widths_drive_positions() {
    let layout = pipeline()
        .layout(&["Hello, World!"], 2, &LayoutConfig::default())
        .unwrap();
    let runs = &layout.pages[0].placements;

    assert_eq!(runs[0].run.text, "He");
    // Helvetica-Bold H 722 + e 556 at 12pt
    assert!((runs[0].run.width - 15.336).abs() < 1e-3);
    assert!((runs[1].x - 65.336).abs() < 1e-3);
    assert_eq!(runs[1].run.text, "llo,");
}

#[test]
fn letter_page_holds_47_lines() {
    let text = vec!["word"; 48].join("\n");
    let layout = pipeline()
        .layout(&[text], 2, &LayoutConfig::default())
        .unwrap();

    assert_eq!(layout.page_count(), 2);
    assert_eq!(layout.pages[0].line_count(), 47);
    assert_eq!(layout.pages[1].line_count(), 1);
    let last_on_first = layout.pages[0].placements.last().unwrap();
    assert_eq!(last_on_first.y, 60.0);
}

#[test]
fn lines_stay_inside_margins() {
    let sentence = "The quick brown fox jumps over the lazy dog, again and again. ";
    let text = sentence.repeat(40);
    let config = LayoutConfig::default();
    let layout = pipeline().layout(&[text], 3, &config).unwrap();

    let right_edge = config.page_width - config.right_margin;
    for page in &layout.pages {
        for p in &page.placements {
            assert!(p.x >= config.left_margin);
            assert!(p.x + p.run.width <= right_edge + 1e-3);
            assert!(p.y >= config.bottom_margin);
        }
    }
}

#[test]
fn source_to_json_document() {
    let source = PlainTextSource::from_text("first page\x0Csecond page\x0C");
    let pages = pipeline()
        .process_source(&source, 2, &LayoutConfig::default())
        .unwrap();
    assert_eq!(pages.len(), 2);

    let second: JsonPage = serde_json_from(&pages[1]);
    assert_eq!(second.page, 1);
    assert_eq!(second.runs[0].text, "se");
    assert!(second.runs[0].emphasized);
    assert_eq!(second.runs[0].y, 750.0);
}

#[test]
fn pdf_ops_document() {
    let pipeline = Pipeline::builder()
        .metrics(Arc::new(Base14Metrics::new()))
        .exporter(Arc::new(PdfOpsExporter::new()))
        .build()
        .unwrap();
    let ops = pipeline
        .export_document(&["one\ntwo"], 1, &LayoutConfig::default())
        .unwrap();
    let ops = String::from_utf8(ops).unwrap();

    assert!(ops.starts_with("% page 1\n"));
    assert!(ops.contains("BT /F2 12 Tf 50 750 Td (o) Tj ET"));
    assert!(ops.contains("BT /F2 12 Tf 50 735 Td (t) Tj ET"));
}

#[test]
fn pdf_document_reads_back_page_for_page() {
    let pipeline = Pipeline::builder()
        .metrics(Arc::new(Base14Metrics::new()))
        .exporter(Arc::new(PdfExporter::new()))
        .build()
        .unwrap();
    let pdf = pipeline
        .export_document(&["Hello, World!", "", "Third page"], 2, &LayoutConfig::default())
        .unwrap();

    let source = PdfTextSource::from_bytes(&pdf).unwrap();
    assert_eq!(source.page_count(), 3);
    assert!(source.extract_page_text(1).unwrap().trim().is_empty());
    assert!(source.extract_page_text(2).unwrap().contains("Th"));

    let again = pipeline
        .layout(source.pages(), 2, &LayoutConfig::default())
        .unwrap();
    assert_eq!(again.page_count(), 3);
}

fn serde_json_from(bytes: &[u8]) -> JsonPage {
    serde_json::from_slice(bytes).expect("valid page JSON")
}
