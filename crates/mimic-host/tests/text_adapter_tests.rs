//! Script-level behavior of the `Text` family through a [`Page`].

use std::rc::Rc;

use mimic_host::{
    BrowserIdentity, BrowserVendor, DocumentKind, DomError, HostError, HostObject, HostValue, Lookup, NodeId, Page, PageConfig,
};
use quickcheck_macros::quickcheck;

/// A page whose document element holds one text node with `data`.
fn page_with_text(browser: BrowserIdentity, kind: DocumentKind, data: &str) -> (Page, Rc<HostObject>) {
    let mut page = Page::new(PageConfig::default().browser(browser).document_kind(kind));
    let tree = page.tree_mut();
    let root = tree.create_element("root");
    tree.append_child(NodeId::ROOT, root);
    let text = tree.create_text(data);
    tree.append_child(root, text);
    let object = page.wrap(text).unwrap();
    (page, object)
}

fn get(page: &mut Page, object: &HostObject, name: &str) -> HostValue {
    page.get_member(object, name).unwrap().found().unwrap()
}

fn call(page: &mut Page, object: &HostObject, name: &str, args: &[HostValue]) -> Result<HostValue, HostError> {
    page.call_method(object, name, args).map(|lookup| lookup.found().unwrap())
}

#[test]
fn test_split_hello_world() {
    let (mut page, text) = page_with_text(BrowserIdentity::CHROME_120, DocumentKind::Html, "Hello World");

    let tail = call(&mut page, &text, "splitText", &[HostValue::Number(5.0)]).unwrap();
    let tail = tail.as_object().unwrap();

    assert_eq!(get(&mut page, &text, "data"), HostValue::from("Hello"));
    assert_eq!(get(&mut page, tail, "data"), HostValue::from(" World"));
    assert_eq!(get(&mut page, &text, "length"), HostValue::Number(5.0));
    assert_eq!(get(&mut page, tail, "length"), HostValue::Number(6.0));
    assert_eq!(get(&mut page, &text, "wholeText"), HostValue::from("Hello World"));

    let next = get(&mut page, &text, "nextSibling");
    assert!(Rc::ptr_eq(next.as_object().unwrap(), tail));
    assert_ne!(tail.node(), text.node());
}

#[test]
fn test_split_detached_text_whole_text() {
    let mut page = Page::new(PageConfig::default());
    let node = page.tree_mut().create_text("Hello World");
    let text = page.wrap(node).unwrap();

    let tail = call(&mut page, &text, "splitText", &[HostValue::Number(5.0)]).unwrap();

    assert_eq!(get(&mut page, &text, "wholeText"), HostValue::from("Hello"));
    assert_eq!(get(&mut page, tail.as_object().unwrap(), "parentNode"), HostValue::Null);
}

#[test]
fn test_split_out_of_bounds_leaves_node_untouched() {
    let (mut page, text) = page_with_text(BrowserIdentity::FIREFOX_115, DocumentKind::Html, "Hello");
    let nodes = page.tree().len();

    for offset in [-1.0, 6.0] {
        let err = call(&mut page, &text, "splitText", &[HostValue::Number(offset)]).unwrap_err();
        assert!(
            matches!(err, HostError::Dom(DomError::IndexSize { length: 5, .. })),
            "{offset}: {err}"
        );
    }
    assert_eq!(get(&mut page, &text, "data"), HostValue::from("Hello"));
    assert_eq!(page.tree().len(), nodes);
}

#[test]
fn test_split_at_bounds() {
    let (mut page, text) = page_with_text(BrowserIdentity::CHROME_120, DocumentKind::Html, "abc");

    let empty_tail = call(&mut page, &text, "splitText", &[HostValue::Number(3.0)]).unwrap();
    assert_eq!(get(&mut page, empty_tail.as_object().unwrap(), "data"), HostValue::from(""));

    let all = call(&mut page, &text, "splitText", &[HostValue::Number(0.0)]).unwrap();
    assert_eq!(get(&mut page, all.as_object().unwrap(), "data"), HostValue::from("abc"));
    assert_eq!(get(&mut page, &text, "data"), HostValue::from(""));
}

#[test]
fn test_split_requires_offset() {
    let (mut page, text) = page_with_text(BrowserIdentity::CHROME_120, DocumentKind::Html, "abc");
    assert!(matches!(
        call(&mut page, &text, "splitText", &[]),
        Err(HostError::Type(_))
    ));
}

#[test]
fn test_immortality_on_ie_11_xml() {
    let mut page = Page::new(PageConfig::default().browser(BrowserIdentity::IE_11).document_kind(DocumentKind::Xml));
    let tree = page.tree_mut();
    let root = tree.create_element("poem");
    tree.append_child(NodeId::ROOT, root);
    let cdata = tree.create_cdata_section("Immor");
    tree.append_child(root, cdata);
    let text = tree.create_text("tality");
    tree.append_child(root, text);

    let cdata = page.wrap(cdata).unwrap();
    let text = page.wrap(text).unwrap();
    assert_eq!(cdata.class(), "CDATASection");
    assert_eq!(get(&mut page, &cdata, "text"), HostValue::from("Immortality"));
    assert_eq!(get(&mut page, &text, "text"), HostValue::from("Immortality"));
    assert_eq!(get(&mut page, &text, "wholeText"), HostValue::from("Immortality"));
}

/// An XML page holding `Im`, `<![CDATA[mort]]>`, `ality`, a comment and
/// `end` under one element. Returns the page and the first three nodes.
fn page_with_mixed_run(browser: BrowserIdentity) -> (Page, [Rc<HostObject>; 3]) {
    let mut page = Page::new(PageConfig::default().browser(browser).document_kind(DocumentKind::Xml));
    let tree = page.tree_mut();
    let root = tree.create_element("poem");
    tree.append_child(NodeId::ROOT, root);
    let first = tree.create_text("Im");
    let cdata = tree.create_cdata_section("mort");
    let last = tree.create_text("ality");
    let comment = tree.create_comment("break");
    let after = tree.create_text("end");
    for node in [first, cdata, last, comment, after] {
        tree.append_child(root, node);
    }
    let run = [first, cdata, last].map(|node| page.wrap(node).unwrap());
    (page, run)
}

#[test]
fn test_whole_text_is_the_same_on_every_browser_that_has_it() {
    let browsers = [
        BrowserIdentity::new(BrowserVendor::InternetExplorer, 9),
        BrowserIdentity::new(BrowserVendor::InternetExplorer, 10),
        BrowserIdentity::IE_11,
        BrowserIdentity::EDGE_120,
        BrowserIdentity::FIREFOX_115,
        BrowserIdentity::CHROME_120,
    ];
    for browser in browsers {
        let (mut page, run) = page_with_mixed_run(browser);
        for object in &run {
            assert_eq!(
                get(&mut page, object, "wholeText"),
                HostValue::from("Immortality"),
                "{browser} {}",
                object.class()
            );
        }
    }

    let (mut page, run) = page_with_mixed_run(BrowserIdentity::IE_8);
    for object in &run {
        assert_eq!(page.get_member(object, "wholeText").unwrap(), Lookup::NotFound);
    }
}

#[test]
fn test_split_offset_wraps_like_unsigned_long() {
    let (mut page, text) = page_with_text(BrowserIdentity::CHROME_120, DocumentKind::Html, "abc");

    let tail = call(&mut page, &text, "splitText", &[HostValue::Number(4_294_967_297.0)]).unwrap();

    assert_eq!(get(&mut page, &text, "data"), HostValue::from("a"));
    assert_eq!(get(&mut page, tail.as_object().unwrap(), "data"), HostValue::from("bc"));
}

#[test]
fn test_legacy_text_is_undefined_in_html() {
    let (mut page, text) = page_with_text(BrowserIdentity::IE_11, DocumentKind::Html, "Hello");
    assert_eq!(page.get_member(&text, "text").unwrap(), Lookup::Found(HostValue::Undefined));
    assert!(page.has_member(&text, "text"));
}

#[test]
fn test_legacy_text_is_absent_elsewhere() {
    for browser in [
        BrowserIdentity::IE_8,
        BrowserIdentity::EDGE_120,
        BrowserIdentity::FIREFOX_115,
        BrowserIdentity::CHROME_120,
    ] {
        let (mut page, text) = page_with_text(browser, DocumentKind::Xml, "Hello");
        assert_eq!(page.get_member(&text, "text").unwrap(), Lookup::NotFound, "{browser}");
        assert!(!page.member_names(&text).contains(&"text"));
    }
}

#[test]
fn test_whole_text_absent_on_ie_8() {
    let (mut page, text) = page_with_text(BrowserIdentity::IE_8, DocumentKind::Html, "Hello");
    assert_eq!(page.get_member(&text, "wholeText").unwrap(), Lookup::NotFound);
    assert!(page.get_member(&text, "splitText").unwrap().is_found());
}

#[test]
fn test_cdata_falls_back_to_text_on_ie_8() {
    let mut page = Page::new(PageConfig::default().browser(BrowserIdentity::IE_8).document_kind(DocumentKind::Xml));
    let cdata = page.tree_mut().create_cdata_section("raw");
    let object = page.wrap(cdata).unwrap();
    assert_eq!(object.class(), "Text");
    assert_eq!(get(&mut page, &object, "nodeType"), HostValue::Number(4.0));
}

#[test]
fn test_replace_whole_text_on_ie_10() {
    let browser = "ie-10".parse().unwrap();
    let (mut page, first) = page_with_text(browser, DocumentKind::Html, "one ");
    let parent = page.tree().parent(first.node()).unwrap();
    let second = page.tree_mut().create_text("two");
    page.tree_mut().append_child(parent, second);

    let kept = call(&mut page, &first, "replaceWholeText", &[HostValue::from("three")]).unwrap();

    assert!(Rc::ptr_eq(kept.as_object().unwrap(), &first));
    assert_eq!(page.tree().children(parent), &[first.node()]);
    assert_eq!(get(&mut page, &first, "wholeText"), HostValue::from("three"));

    let removed = call(&mut page, &first, "replaceWholeText", &[HostValue::from("")]).unwrap();
    assert_eq!(removed, HostValue::Null);
    assert!(page.tree().children(parent).is_empty());
}

#[test]
fn test_text_constructor_per_browser() {
    let mut chrome = Page::new(PageConfig::default());
    let created = chrome.construct("Text", &[HostValue::from("new")]).unwrap().found().unwrap();
    let created = created.as_object().unwrap();
    assert_eq!(created.class(), "Text");
    assert_eq!(get(&mut chrome, created, "data"), HostValue::from("new"));

    let mut ie = Page::new(PageConfig::default().browser(BrowserIdentity::IE_11));
    assert_eq!(ie.construct("Text", &[]).unwrap(), Lookup::NotFound);
}

#[quickcheck]
fn prop_split_keeps_whole_text(data: String, offset: u8) -> bool {
    let length = data.encode_utf16().count();
    let offset = usize::from(offset) % (length + 1);
    let (mut page, text) = page_with_text(BrowserIdentity::CHROME_120, DocumentKind::Html, &data);
    #[allow(clippy::cast_precision_loss)]
    let result = call(&mut page, &text, "splitText", &[HostValue::Number(offset as f64)]);
    match result {
        Ok(_) => get(&mut page, &text, "wholeText") == HostValue::String(data),
        // Offsets inside a surrogate pair are rejected without mutation.
        Err(HostError::Dom(DomError::IndexSize { .. })) => get(&mut page, &text, "data") == HostValue::String(data),
        Err(_) => false,
    }
}
