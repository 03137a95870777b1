//! Snapshot tests for spanmark output.
//!
//! These tests capture the tree dump and the serializers for representative
//! inputs. Run with `cargo insta review` to update snapshots.

use spanmark_markdown::{parse_markdown, InlineOptions, Node};

/// Helper to parse markdown with every construct enabled.
fn document(input: &str) -> Node {
    parse_markdown(input, InlineOptions::default()).root
}

fn tree(input: &str) -> String {
    document(input).dump()
}

// =============================================================================
// Emphasis Snapshots
// =============================================================================

#[test]
fn test_snapshot_emphasis_levels() {
    insta::assert_snapshot!(tree("*a* **b** ***c***"), @r#"
    Document
      Emphasis
        Text "a"
      Text " "
      Strong
        Text "b"
      Text " "
      Emphasis
        Strong
          Text "c"
    "#);
}

#[test]
fn test_snapshot_mixed_markers() {
    insta::assert_snapshot!(tree("_a *b* c_"), @r#"
    Document
      Emphasis
        Text "a "
        Emphasis
          Text "b"
        Text " c"
    "#);
}

#[test]
fn test_snapshot_unbalanced_run() {
    insta::assert_snapshot!(tree("**a*"), @r#"
    Document
      Text "*"
      Emphasis
        Text "a"
    "#);
}

#[test]
fn test_snapshot_strikethrough() {
    insta::assert_snapshot!(tree("~~a **b**~~ ~c~"), @r#"
    Document
      Strike
        Text "a "
        Strong
          Text "b"
      Text " ~c~"
    "#);
}

// =============================================================================
// Link Snapshots
// =============================================================================

#[test]
fn test_snapshot_links() {
    insta::assert_snapshot!(tree("[*a*](u 'T') [b][] <https://c.d>"), @r#"
    Document
      Link url="u" title="T"
        Emphasis
          Text "a"
      Text " "
      Reference identifier="b" url="" title=""
        Text "b"
      Text " "
      Link url="https://c.d" title="https://c.d"
        Text "https://c.d"
    "#);
}

#[test]
fn test_snapshot_nested_brackets() {
    insta::assert_snapshot!(tree("[![i](p)](u) [^n] [@k]"), @r#"
    Document
      Link url="u" title=""
        Image url="p" alt="i" title=""
      Text " "
      Footnote identifier="n"
      Text " "
      CitationReference identifier="k"
    "#);
}

#[test]
fn test_snapshot_broken_brackets() {
    insta::assert_snapshot!(tree("[a] [^b c] [@] ![x]"), @r#"
    Document
      Text "[a] [^b c] [@] ![x]"
    "#);
}

// =============================================================================
// Code, Formula and HTML Snapshots
// =============================================================================

#[test]
fn test_snapshot_code_formula_html() {
    insta::assert_snapshot!(tree("`*a*` $x^2$ <b>c</b> &amp;"), @r#"
    Document
      InlineCode "*a*"
      Text " "
      Formula "x^2"
      Text " "
      Html "<b>"
      Text "c"
      Html "</b>"
      Text " "
      Html "&amp;"
    "#);
}

// =============================================================================
// Serializer Snapshots
// =============================================================================

#[test]
fn test_snapshot_spans() {
    insta::assert_snapshot!(document("*a*\nb").dump_with_spans(), @r#"
    Document @1:1-1:1
      Emphasis @1:1-1:4
        Text "a" @1:2-1:3
      SoftBreak @1:4-2:1
      Text "b" @2:1-2:2
    "#);
}

#[test]
fn test_snapshot_to_markdown() {
    insta::assert_snapshot!(
        document("_a_ __b__ ***c*** [d](<e> \"f\") 2 * 3").to_markdown(),
        @r#"*a* **b** *__c__* [d](e "f") 2 \* 3"#
    );
}

#[test]
fn test_snapshot_plain_text() {
    insta::assert_snapshot!(
        document("**Note:** see [the docs](u) &mdash; or <em>not</em>.\n![logo](l.png)").plain_text(),
        @r#"
    Note: see the docs — or not.
    logo
    "#
    );
}
