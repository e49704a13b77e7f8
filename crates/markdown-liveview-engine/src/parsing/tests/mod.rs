//! Block structuring tests over small literal documents.


use pretty_assertions::assert_eq;
use xi_rope::Rope;

use crate::parsing::{
    blocks::{BlockKind, BlockNode, ContainerFrame, kinds::ListMarker},
    parse_document,
    rope::slice_to_string,
};

fn parse(md: &str) -> (Rope, Vec<BlockNode>) {
    let rope = Rope::from(md);
    let doc = parse_document(&rope);
    invariants::check(&rope, &doc.blocks);
    (rope, doc.blocks)
}

fn lines(blocks: &[BlockNode]) -> Vec<(usize, usize)> {
    blocks.iter().map(|b| (b.start_line, b.end_line)).collect()
}

#[test]
fn empty_document() {
    let (_, blocks) = parse("");
    assert!(blocks.is_empty());
}

#[test]
fn blank_lines_only() {
    let (_, blocks) = parse("\n\n\n");
    assert!(blocks.is_empty());
}

#[test]
fn paragraph_lines_join_into_one_block() {
    let (rope, blocks) = parse("one\ntwo\n\nthree\n");
    assert_eq!(lines(&blocks), vec![(0, 1), (3, 3)]);
    assert_eq!(slice_to_string(&rope, blocks[0].content_span), "one\ntwo");
}

#[test]
fn heading_is_single_line_block() {
    let (rope, blocks) = parse("# Title\nbody\n");
    assert_eq!(blocks[0].kind, BlockKind::Heading { level: 1 });
    assert_eq!(slice_to_string(&rope, blocks[0].content_span), "Title");
    assert_eq!(blocks[1].kind, BlockKind::Paragraph);
    assert_eq!(lines(&blocks), vec![(0, 0), (1, 1)]);
}

#[test]
fn list_items_are_separate_blocks() {
    let (rope, blocks) = parse("- a\n- b\n  wrapped\n1. c\n");
    assert_eq!(lines(&blocks), vec![(0, 0), (1, 2), (3, 3)]);
    assert_eq!(
        blocks[0].kind,
        BlockKind::ListItem {
            marker: ListMarker::Bullet,
            indent: 0
        }
    );
    assert_eq!(
        slice_to_string(&rope, blocks[1].content_span),
        "b\n  wrapped"
    );
    assert!(matches!(
        blocks[2].kind,
        BlockKind::ListItem {
            marker: ListMarker::Ordered,
            ..
        }
    ));
}

#[test]
fn fence_spans_until_closer() {
    let (rope, blocks) = parse("```rust\nlet x = 1;\n\n# not a heading\n```\nafter\n");
    assert_eq!(lines(&blocks), vec![(0, 4), (5, 5)]);
    assert_eq!(
        blocks[0].kind,
        BlockKind::FencedCode {
            kind: crate::parsing::blocks::kinds::FenceKind::Backticks,
            info: Some("rust".to_string()),
        }
    );
    assert_eq!(
        slice_to_string(&rope, blocks[0].content_span),
        "let x = 1;\n\n# not a heading\n"
    );
}

#[test]
fn unterminated_fence_runs_to_eof() {
    let (_, blocks) = parse("text\n~~~\ncode\nmore");
    assert_eq!(lines(&blocks), vec![(0, 0), (1, 3)]);
}

#[test]
fn blockquote_depth_change_splits_blocks() {
    let (_, blocks) = parse("> quoted\n> > deeper\nplain\n");
    assert_eq!(lines(&blocks), vec![(0, 0), (1, 1), (2, 2)]);
    assert_eq!(
        blocks[0].containers,
        vec![ContainerFrame::BlockQuote { depth: 1 }]
    );
    assert_eq!(blocks[1].quote_depth(), 2);
    assert!(blocks[2].containers.is_empty());
}

#[test]
fn thematic_break_between_paragraphs() {
    let (_, blocks) = parse("a\n---\nb\n");
    assert_eq!(blocks[1].kind, BlockKind::ThematicBreak);
    assert_eq!(lines(&blocks), vec![(0, 0), (1, 1), (2, 2)]);
}
