//! Tests for the standard catalog and per-browser object models.

use std::sync::Arc;
use std::thread;

use mimic_host::{
    BrowserIdentity, BrowserVendor, Catalog, MemberKind, ModelBuilder, NodeKind, ObjectModel,
};

fn model(browser: BrowserIdentity) -> ObjectModel {
    ObjectModel::resolve(&Catalog::standard(), browser)
}

fn members(model: &ObjectModel, class: &str) -> Vec<(&'static str, MemberKind)> {
    model
        .class(class)
        .unwrap()
        .members
        .iter()
        .map(|member| (member.name, member.kind))
        .collect()
}

#[test]
fn test_build_is_cached_per_identity() {
    let builder = ModelBuilder::new(Catalog::standard());
    let first = builder.build(BrowserIdentity::IE_11);
    let second = builder.build(BrowserIdentity::IE_11);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(builder.cached(), 1);

    let other = builder.build(BrowserIdentity::CHROME_120);
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(builder.cached(), 2);
}

#[test]
fn test_resolution_is_deterministic() {
    for browser in BrowserIdentity::PRESETS {
        assert_eq!(model(browser), model(browser), "{browser}");
    }
}

#[test]
fn test_classes_keep_registration_order() {
    let names: Vec<_> = model(BrowserIdentity::CHROME_120)
        .classes
        .iter()
        .map(|class| class.name)
        .collect();
    assert_eq!(
        names,
        ["Node", "Element", "Document", "CharacterData", "Text", "CDATASection", "Comment"]
    );
}

#[test]
fn test_text_members_per_browser() {
    assert_eq!(
        members(&model(BrowserIdentity::IE_11), "Text"),
        [
            ("splitText", MemberKind::Method),
            ("wholeText", MemberKind::Getter),
            ("text", MemberKind::Getter),
            ("replaceWholeText", MemberKind::Method),
        ]
    );
    assert_eq!(
        members(&model(BrowserIdentity::CHROME_120), "Text"),
        [
            ("constructor", MemberKind::Constructor),
            ("splitText", MemberKind::Method),
            ("wholeText", MemberKind::Getter),
        ]
    );
    assert_eq!(
        members(&model(BrowserIdentity::IE_8), "Text"),
        [("splitText", MemberKind::Method)]
    );
}

#[test]
fn test_legacy_text_only_on_ie_11() {
    let ie = |major| BrowserIdentity::new(BrowserVendor::InternetExplorer, major);
    for browser in [ie(8), ie(9), ie(10), ie(12)]
        .into_iter()
        .chain([BrowserIdentity::EDGE_120, BrowserIdentity::FIREFOX_115, BrowserIdentity::CHROME_120])
    {
        let model = model(browser);
        assert!(model.class("Text").unwrap().own_member("text", MemberKind::Getter).is_none(), "{browser}");
    }
    assert!(model(BrowserIdentity::IE_11).class("Text").unwrap().declares("text"));
}

#[test]
fn test_hidden_class_is_absent_and_skipped_in_chain() {
    let ie8 = model(BrowserIdentity::IE_8);
    assert!(!ie8.has_class("CDATASection"));
    assert!(ie8.class("CDATASection").is_none());

    let ie11 = model(BrowserIdentity::IE_11);
    let chain: Vec<_> = ie11.chain("CDATASection").map(|class| class.name).collect();
    assert_eq!(chain, ["CDATASection", "Text", "CharacterData", "Node"]);
}

#[test]
fn test_text_content_hidden_before_ie_9() {
    assert!(model(BrowserIdentity::IE_8).find("Text", "textContent").is_none());
    assert_eq!(
        model(BrowserIdentity::IE_11).find("Text", "textContent").map(|class| class.name),
        Some("Node")
    );
}

#[test]
fn test_member_names_walk_the_chain_once() {
    let chrome = model(BrowserIdentity::CHROME_120);
    let names = chrome.member_names("Text");
    assert_eq!(&names[..3], ["splitText", "wholeText", "data"]);
    assert!(!names.contains(&"constructor"));
    assert_eq!(names.iter().filter(|&&name| name == "textContent").count(), 1);
    assert!(names.contains(&"ELEMENT_NODE"));
}

#[test]
fn test_abstract_classes_wrap_no_node_kind() {
    let chrome = model(BrowserIdentity::CHROME_120);
    assert_eq!(chrome.class("Node").unwrap().node_kind, None);
    assert_eq!(chrome.class("Text").unwrap().node_kind, Some(NodeKind::Text));
}

#[test]
fn test_concurrent_builds_share_one_model() {
    let builder = Arc::new(ModelBuilder::new(Catalog::standard()));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let builder = Arc::clone(&builder);
            thread::spawn(move || builder.build(BrowserIdentity::IE_11))
        })
        .collect();
    let models: Vec<_> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
    assert!(models.iter().all(|model| Arc::ptr_eq(model, &models[0])));
    assert_eq!(builder.cached(), 1);
}

#[test]
fn test_model_serializes_without_behaviors() {
    let json = serde_json::to_value(model(BrowserIdentity::IE_11)).unwrap();
    assert_eq!(json["browser"], "ie-11");
    let text = json["classes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|class| class["name"] == "Text")
        .unwrap();
    assert_eq!(text["parent"], "CharacterData");
    assert_eq!(text["node_kind"], "text");
    assert_eq!(text["members"][2], serde_json::json!({ "name": "text", "kind": "getter" }));
}
