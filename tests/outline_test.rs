//! Integration tests for the outline inference pipeline.

use pdfsift::decode::{DecodedDocument, DecodedPage, Line, NativeOutlineEntry, RawBlock, Span};
use pdfsift::{BoundingBox, HeadingLevel, OutlineExtractor};

/// One single-line, single-span layout block.
fn block(text: &str, size: f32, bold: bool, y0: f32) -> RawBlock {
    let bounds = BoundingBox::new(50.0, y0, 450.0, y0 + size);
    let font_name = if bold { "Helvetica-Bold" } else { "Helvetica" };
    RawBlock {
        lines: vec![Line {
            spans: vec![Span {
                text: text.to_string(),
                font_size: size,
                font_name: font_name.to_string(),
                bounds,
            }],
            bounds,
        }],
        bounds,
    }
}

fn one_page(title: Option<&str>, blocks: Vec<RawBlock>) -> DecodedDocument {
    DecodedDocument {
        title: title.map(str::to_string),
        pages: vec![DecodedPage {
            number: 1,
            width: 612.0,
            height: 792.0,
            blocks,
        }],
        native_outline: Vec::new(),
    }
}

const BODY_PARA: &str = "This paragraph is ordinary body text, long enough that the \
    word count comfortably exceeds the substantial-block threshold and anchors the \
    body style election for the whole synthetic document fixture.";

#[test]
fn heuristic_outline_end_to_end() {
    // One page: "Introduction" at size 18 bold, three body paragraphs at
    // size 12, then "1.1 Background" at size 14 bold.
    let doc = one_page(
        Some("Sample Specification Document"),
        vec![
            block("Introduction", 18.0, true, 60.0),
            block(BODY_PARA, 12.0, false, 120.0),
            block(BODY_PARA, 12.0, false, 220.0),
            block(BODY_PARA, 12.0, false, 320.0),
            block("1.1 Background", 14.0, true, 430.0),
        ],
    );

    let outline = OutlineExtractor::new().extract(&doc);

    assert_eq!(outline.title, "Sample Specification Document");
    assert_eq!(outline.headings.len(), 2);
    assert_eq!(outline.headings[0].level, HeadingLevel::H1);
    assert_eq!(outline.headings[0].text, "Introduction");
    assert_eq!(outline.headings[1].level, HeadingLevel::H2);
    assert_eq!(outline.headings[1].text, "1.1 Background");
    assert!(outline.headings.iter().all(|h| h.bounds.is_some()));
}

#[test]
fn resolved_title_never_carries_a_file_extension() {
    let doc = one_page(
        Some("quarterly_report.pdf"),
        vec![
            block("Quarterly Report", 24.0, true, 60.0),
            block(BODY_PARA, 12.0, false, 200.0),
        ],
    );

    let outline = OutlineExtractor::new().extract(&doc);
    assert_eq!(outline.title, "Quarterly Report");
    assert!(!outline.title.to_lowercase().ends_with(".pdf"));
}

#[test]
fn levels_are_monotone_in_size_rank() {
    let doc = one_page(
        Some("Monotone Hierarchy Fixture"),
        vec![
            block(BODY_PARA, 10.0, false, 60.0),
            block("Tiny Heading", 12.0, false, 150.0),
            block("Huge Heading", 20.0, false, 200.0),
            block("Large Heading", 16.0, false, 260.0),
            block("Medium Heading", 14.0, false, 320.0),
            block("Small Heading", 13.0, false, 380.0),
        ],
    );

    let outline = OutlineExtractor::new().extract(&doc);

    // Five distinct candidate sizes: the smallest is dropped, the rest map
    // to H1..H4 in descending size order.
    let mut by_size: Vec<(i32, HeadingLevel)> = outline
        .headings
        .iter()
        .map(|h| {
            let size = match h.text.as_str() {
                "Huge Heading" => 20,
                "Large Heading" => 16,
                "Medium Heading" => 14,
                "Small Heading" => 13,
                other => panic!("unexpected heading {other}"),
            };
            (size, h.level)
        })
        .collect();
    by_size.sort_by(|a, b| b.0.cmp(&a.0));

    let levels: Vec<HeadingLevel> = by_size.iter().map(|(_, level)| *level).collect();
    assert_eq!(
        levels,
        vec![
            HeadingLevel::H1,
            HeadingLevel::H2,
            HeadingLevel::H3,
            HeadingLevel::H4
        ]
    );
    assert!(!outline.headings.iter().any(|h| h.text == "Tiny Heading"));
}

#[test]
fn numeric_prefix_override_is_idempotent_across_styles() {
    for (size, bold) in [(20.0, true), (16.0, false), (13.5, true)] {
        let doc = one_page(
            Some("Numbering Override Fixture"),
            vec![
                block(BODY_PARA, 12.0, false, 60.0),
                block("3.2.1 Setup", size, bold, 200.0),
            ],
        );
        let outline = OutlineExtractor::new().extract(&doc);
        assert_eq!(outline.headings.len(), 1);
        assert_eq!(
            outline.headings[0].level,
            HeadingLevel::H3,
            "style ({size}, {bold}) must not affect the forced level"
        );
    }
}

#[test]
fn native_outline_skips_the_heuristics() {
    let mut doc = one_page(
        Some("Native Outline Fixture"),
        vec![
            block(BODY_PARA, 12.0, false, 60.0),
            block("Visual Heading", 18.0, true, 200.0),
        ],
    );
    doc.native_outline = vec![
        NativeOutlineEntry {
            level: 1,
            title: "Embedded Chapter".to_string(),
            page: 1,
        },
        NativeOutlineEntry {
            level: 2,
            title: "Embedded Section".to_string(),
            page: 1,
        },
    ];

    let outline = OutlineExtractor::new().extract(&doc);
    let texts: Vec<&str> = outline.headings.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["Embedded Chapter", "Embedded Section"]);
    assert!(outline.headings.iter().all(|h| h.bounds.is_none()));
}

#[test]
fn headingless_document_degrades_to_empty_outline() {
    let doc = one_page(Some("Plain Prose Fixture"), vec![
        block(BODY_PARA, 12.0, false, 60.0),
        block(BODY_PARA, 12.0, false, 200.0),
    ]);
    let outline = OutlineExtractor::new().extract(&doc);
    assert!(outline.is_empty());
    assert_eq!(outline.title, "Plain Prose Fixture");
}
