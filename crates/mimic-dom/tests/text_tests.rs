//! Tests for character data editing, text splitting and `wholeText`.

use mimic_dom::{DocumentKind, DomError, DomTree, NodeId, NodeKind, utf16_len};
use quickcheck_macros::quickcheck;

/// A paragraph holding one text node with `data`.
fn paragraph_with_text(tree: &mut DomTree, data: &str) -> (NodeId, NodeId) {
    let p = tree.create_element("p");
    tree.append_child(NodeId::ROOT, p);
    let text = tree.create_text(data);
    tree.append_child(p, text);
    (p, text)
}

#[test]
fn test_split_hello_world() {
    let mut tree = DomTree::new();
    let (p, text) = paragraph_with_text(&mut tree, "Hello World");

    let tail = tree.split_text(text, 5).unwrap();

    assert_eq!(tree.character_data(text), Some("Hello"));
    assert_eq!(tree.character_data(tail), Some(" World"));
    assert_eq!(tree.length(text), 5);
    assert_eq!(tree.length(tail), 6);
    assert_eq!(tree.children(p), &[text, tail]);
    assert_eq!(tree.next_sibling(text), Some(tail));
}

#[test]
fn test_split_detached_node_stays_detached() {
    let mut tree = DomTree::new();
    let text = tree.create_text("Hello World");

    let tail = tree.split_text(text, 5).unwrap();

    assert_ne!(text, tail);
    assert_eq!(tree.parent(tail), None);
    assert_eq!(tree.whole_text(text).unwrap(), "Hello");
    assert_eq!(tree.whole_text(tail).unwrap(), " World");
}

#[test]
fn test_split_at_bounds() {
    let mut tree = DomTree::new();
    let (_, text) = paragraph_with_text(&mut tree, "abc");

    let empty_tail = tree.split_text(text, 3).unwrap();
    assert_eq!(tree.character_data(empty_tail), Some(""));

    let everything = tree.split_text(text, 0).unwrap();
    assert_eq!(tree.character_data(text), Some(""));
    assert_eq!(tree.character_data(everything), Some("abc"));
}

#[test]
fn test_split_past_length_is_index_size_without_mutation() {
    let mut tree = DomTree::new();
    let (p, text) = paragraph_with_text(&mut tree, "Hello");
    let before = tree.len();

    assert_eq!(
        tree.split_text(text, 6),
        Err(DomError::IndexSize {
            offset: 6,
            length: 5
        })
    );
    assert_eq!(tree.character_data(text), Some("Hello"));
    assert_eq!(tree.children(p), &[text]);
    assert_eq!(tree.len(), before);
}

#[test]
fn test_split_counts_utf16_units() {
    let mut tree = DomTree::new();
    // U+1F600 is two UTF-16 code units.
    let text = tree.create_text("a\u{1F600}b");
    assert_eq!(tree.length(text), 4);

    assert!(matches!(
        tree.split_text(text, 2),
        Err(DomError::IndexSize { .. })
    ));
    let tail = tree.split_text(text, 3).unwrap();
    assert_eq!(tree.character_data(text), Some("a\u{1F600}"));
    assert_eq!(tree.character_data(tail), Some("b"));
}

#[test]
fn test_split_cdata_keeps_kind() {
    let mut tree = DomTree::with_kind(DocumentKind::Xml);
    let cdata = tree.create_cdata_section("<raw>");
    let tail = tree.split_text(cdata, 1).unwrap();
    assert_eq!(tree.kind(tail), Some(NodeKind::CdataSection));
}

#[test]
fn test_split_comment_is_invalid() {
    let mut tree = DomTree::new();
    let comment = tree.create_comment("note");
    assert_eq!(
        tree.split_text(comment, 1),
        Err(DomError::InvalidNodeType {
            expected: "text",
            found: NodeKind::Comment
        })
    );
}

#[test]
fn test_whole_text_spans_text_and_cdata_siblings() {
    let mut tree = DomTree::with_kind(DocumentKind::Xml);
    let root = tree.create_element("root");
    tree.append_child(NodeId::ROOT, root);
    let before = tree.create_text("skipped");
    let comment = tree.create_comment("barrier");
    let a = tree.create_text("Immor");
    let b = tree.create_cdata_section("tal");
    let c = tree.create_text("ity");
    for id in [before, comment, a, b, c] {
        tree.append_child(root, id);
    }

    assert_eq!(tree.whole_text(b).unwrap(), "Immortality");
    assert_eq!(tree.whole_text(a).unwrap(), "Immortality");
    assert_eq!(tree.whole_text(before).unwrap(), "skipped");
    assert_eq!(tree.contiguous_text_nodes(c), vec![a, b, c]);
}

#[test]
fn test_replace_whole_text() {
    let mut tree = DomTree::new();
    let (p, a) = paragraph_with_text(&mut tree, "one");
    let b = tree.create_text("two");
    tree.append_child(p, b);

    assert_eq!(tree.replace_whole_text(b, "three").unwrap(), Some(b));
    assert_eq!(tree.children(p), &[b]);
    assert_eq!(tree.parent(a), None);
    assert_eq!(tree.whole_text(b).unwrap(), "three");

    assert_eq!(tree.replace_whole_text(b, "").unwrap(), None);
    assert!(tree.children(p).is_empty());
}

#[test]
fn test_character_data_editing() {
    let mut tree = DomTree::new();
    let text = tree.create_text("Hello");

    tree.replace_data(text, 5, 0, " World").unwrap();
    assert_eq!(tree.character_data(text), Some("Hello World"));

    tree.replace_data(text, 0, 5, "Howdy").unwrap();
    assert_eq!(tree.substring_data(text, 0, 5).unwrap(), "Howdy");

    // Count is clamped to the end of the data.
    tree.replace_data(text, 5, 100, "").unwrap();
    assert_eq!(tree.character_data(text), Some("Howdy"));

    assert!(matches!(
        tree.substring_data(text, 6, 1),
        Err(DomError::IndexSize { .. })
    ));
}

#[test]
fn test_span_ending_inside_surrogate_pair_is_index_size() {
    let mut tree = DomTree::new();
    let text = tree.create_text("\u{1F600}x");

    assert_eq!(
        tree.delete_data(text, 0, 1),
        Err(DomError::IndexSize { offset: 1, length: 3 })
    );
    assert_eq!(
        tree.substring_data(text, 0, 1),
        Err(DomError::IndexSize { offset: 1, length: 3 })
    );
    assert_eq!(tree.character_data(text), Some("\u{1F600}x"));

    tree.delete_data(text, 0, 2).unwrap();
    assert_eq!(tree.character_data(text), Some("x"));
}

#[quickcheck]
fn prop_split_conserves_content(data: String, offset: usize) -> bool {
    let mut tree = DomTree::new();
    let text = tree.create_text(&data);
    let length = utf16_len(&data);
    let offset = offset % (length + 1);

    match tree.split_text(text, offset) {
        Ok(tail) => {
            let head = tree.character_data(text).unwrap_or_default().to_string();
            let tail = tree.character_data(tail).unwrap_or_default();
            tree.length(text) + utf16_len(tail) == length && head + tail == data
        }
        // Only offsets inside a surrogate pair may fail.
        Err(DomError::IndexSize { .. }) => tree.character_data(text) == Some(data.as_str()),
        Err(_) => false,
    }
}
