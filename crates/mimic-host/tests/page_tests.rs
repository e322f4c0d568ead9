//! Tests for node bindings and member dispatch through a [`Page`].

use std::rc::Rc;
use std::sync::Arc;

use mimic_host::{
    BrowserIdentity, ConfigError, DocumentKind, FunctionRef, HostError, HostValue, Lookup, ModelBuilder, NodeId,
    Page, PageConfig,
};

fn chrome_page() -> Page {
    Page::new(PageConfig::default())
}

#[test]
fn test_wrap_returns_the_same_object() {
    let mut page = chrome_page();
    let text = page.tree_mut().create_text("x");

    let first = page.wrap(text).unwrap();
    let second = page.wrap(text).unwrap();

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(page.bindings().len(), 1);
    assert!(Rc::ptr_eq(page.bindings().get(text).unwrap(), &first));
}

#[test]
fn test_wrap_unknown_node_fails() {
    let mut page = chrome_page();
    assert!(matches!(page.wrap(NodeId(99)), Err(HostError::Dom(_))));
    assert!(page.bindings().is_empty());
}

#[test]
fn test_pages_share_models_per_browser() {
    let first = Page::new(PageConfig::default().browser(BrowserIdentity::IE_11));
    let second = Page::new(PageConfig::default().browser(BrowserIdentity::IE_11));
    assert!(Arc::ptr_eq(first.model(), second.model()));
    assert!(Arc::ptr_eq(
        first.model(),
        &ModelBuilder::global().build(BrowserIdentity::IE_11)
    ));
}

#[test]
fn test_document_members() {
    let mut page = chrome_page();
    let document = page.document().unwrap();
    assert_eq!(document.class(), "Document");

    let get = |page: &mut Page, name| page.get_member(&document, name).unwrap().found().unwrap();
    assert_eq!(get(&mut page, "nodeType"), HostValue::Number(9.0));
    assert_eq!(get(&mut page, "nodeName"), HostValue::from("#document"));
    assert_eq!(get(&mut page, "documentElement"), HostValue::Null);
    assert_eq!(get(&mut page, "ownerDocument"), HostValue::Null);
    assert_eq!(get(&mut page, "TEXT_NODE"), HostValue::Number(3.0));
    assert_eq!(
        get(&mut page, "createTextNode"),
        HostValue::Function(FunctionRef {
            class: "Document",
            name: "createTextNode",
        })
    );
}

#[test]
fn test_create_and_append_nodes() {
    let mut page = chrome_page();
    let document = page.document().unwrap();

    let element = page.tree_mut().create_element("p");
    page.tree_mut().append_child(NodeId::ROOT, element);
    let element = page.wrap(element).unwrap();
    assert_eq!(element.class(), "Element");

    let text = page
        .call_method(&document, "createTextNode", &[HostValue::from("hi")])
        .unwrap()
        .found()
        .unwrap();
    let appended = page
        .call_method(&element, "appendChild", &[text.clone()])
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(appended, text);

    let first_child = page.get_member(&element, "firstChild").unwrap().found().unwrap();
    assert_eq!(first_child, text);
    let owner = page
        .get_member(text.as_object().unwrap(), "ownerDocument")
        .unwrap()
        .found()
        .unwrap();
    assert!(Rc::ptr_eq(owner.as_object().unwrap(), &document));
    assert_eq!(
        page.get_member(&element, "textContent").unwrap(),
        Lookup::Found(HostValue::from("hi"))
    );
    assert_eq!(
        page.get_member(&element, "tagName").unwrap(),
        Lookup::Found(HostValue::from("P"))
    );
}

/// An IE 8 XML page with two CDATA sections, both wrapped.
fn ie_8_page_with_cdata() -> Page {
    let mut page = Page::new(PageConfig::default().browser(BrowserIdentity::IE_8).document_kind(DocumentKind::Xml));
    let tree = page.tree_mut();
    let first = tree.create_cdata_section("a");
    let second = tree.create_cdata_section("b");
    let _ = page.wrap(first).unwrap();
    let _ = page.wrap(second).unwrap();
    page
}

#[test]
fn test_fallback_warnings_are_kept_per_page() {
    let first = ie_8_page_with_cdata();
    assert_eq!(first.bindings().warnings().len(), 1);

    // A later page reports its own fallback without resetting the first.
    let second = ie_8_page_with_cdata();
    assert_eq!(second.bindings().warnings().len(), 1);
    assert_eq!(first.bindings().warnings().len(), 1);

    let mut chrome = Page::new(PageConfig::default().document_kind(DocumentKind::Xml));
    let node = chrome.tree_mut().create_cdata_section("c");
    let _ = chrome.wrap(node).unwrap();
    assert!(chrome.bindings().warnings().is_empty());
}

#[test]
fn test_cdata_sections_need_xml_documents() {
    let mut html = chrome_page();
    let document = html.document().unwrap();
    assert!(matches!(
        html.call_method(&document, "createCDATASection", &[HostValue::from("x")]),
        Err(HostError::NotSupported(_))
    ));

    let mut xml = Page::new(PageConfig::default().document_kind(DocumentKind::Xml));
    let document = xml.document().unwrap();
    let cdata = xml
        .call_method(&document, "createCDATASection", &[HostValue::from("x")])
        .unwrap()
        .found()
        .unwrap();
    assert_eq!(cdata.as_object().unwrap().class(), "CDATASection");
    assert!(matches!(
        xml.call_method(&document, "createCDATASection", &[HostValue::from("]]>")]),
        Err(HostError::InvalidCharacter(_))
    ));
}

#[test]
fn test_set_member() {
    let mut page = chrome_page();
    let node = page.tree_mut().create_comment("old");
    let comment = page.wrap(node).unwrap();

    assert_eq!(
        page.set_member(&comment, "data", HostValue::from("new")).unwrap(),
        Lookup::Found(())
    );
    assert_eq!(page.tree().character_data(node), Some("new"));

    page.set_member(&comment, "nodeValue", HostValue::Null).unwrap().found().unwrap();
    assert_eq!(page.tree().character_data(node), Some(""));

    // Read-only properties swallow assignments.
    assert!(page.set_member(&comment, "length", HostValue::Number(1.0)).unwrap().is_found());
    assert_eq!(
        page.set_member(&comment, "bogus", HostValue::Null).unwrap(),
        Lookup::NotFound
    );
}

#[test]
fn test_calling_a_property_is_a_type_error() {
    let mut page = chrome_page();
    let node = page.tree_mut().create_text("x");
    let text = page.wrap(node).unwrap();
    assert!(matches!(
        page.call_method(&text, "data", &[]),
        Err(HostError::Type(_))
    ));
    assert_eq!(page.call_method(&text, "missing", &[]).unwrap(), Lookup::NotFound);
}

#[test]
fn test_character_data_editing() {
    let mut page = chrome_page();
    let node = page.tree_mut().create_text("Hello");
    let text = page.wrap(node).unwrap();

    let call = |page: &mut Page, name, args: &[HostValue]| page.call_method(&text, name, args).unwrap();
    let _ = call(&mut page, "appendData", &[HostValue::from(" World")]);
    let _ = call(&mut page, "insertData", &[HostValue::Number(5.0), HostValue::from(",")]);
    assert_eq!(page.tree().character_data(node), Some("Hello, World"));

    let _ = call(&mut page, "deleteData", &[HostValue::Number(5.0), HostValue::Number(-1.0)]);
    assert_eq!(page.tree().character_data(node), Some("Hello"));

    let _ = call(
        &mut page,
        "replaceData",
        &[HostValue::Number(0.0), HostValue::Number(1.0), HostValue::from("J")],
    );
    assert_eq!(
        call(&mut page, "substringData", &[HostValue::Number(0.0), HostValue::Number(2.0)]),
        Lookup::Found(HostValue::from("Je"))
    );
}

#[test]
fn test_remove_child_errors_propagate() {
    let mut page = chrome_page();
    let document = page.document().unwrap();
    let node = page.tree_mut().create_text("stray");
    let stray = page.wrap(node).unwrap();
    assert!(matches!(
        page.call_method(&document, "removeChild", &[HostValue::Object(stray)]),
        Err(HostError::Dom(_))
    ));
}

#[test]
fn test_text_content_hidden_on_ie_8() {
    let mut page = Page::new(PageConfig::default().browser(BrowserIdentity::IE_8));
    let node = page.tree_mut().create_text("x");
    let text = page.wrap(node).unwrap();
    assert_eq!(page.get_member(&text, "textContent").unwrap(), Lookup::NotFound);
    assert!(page.get_member(&text, "nodeValue").unwrap().is_found());
}

#[test]
fn test_page_config_from_vars() {
    let config = PageConfig::from_vars(Some("ie-11"), Some("XML")).unwrap();
    assert_eq!(config.browser, BrowserIdentity::IE_11);
    assert_eq!(config.document_kind, DocumentKind::Xml);

    assert_eq!(PageConfig::from_vars(None, None).unwrap(), PageConfig::default());
    assert!(matches!(
        PageConfig::from_vars(Some("mosaic-1"), None),
        Err(ConfigError::Browser(_))
    ));
    assert!(matches!(
        PageConfig::from_vars(None, Some("svg")),
        Err(ConfigError::DocumentKind(_))
    ));
}
