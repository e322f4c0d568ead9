//! [§ 4.12 Interface CDATASection](https://dom.spec.whatwg.org/#interface-cdatasection)
//!
//! No members of its own. IE 8 and older have no `CDATASection` interface
//! and expose CDATA nodes as plain `Text`.

use mimic_dom::NodeKind;

use crate::browser::BrowserVendor::{Chrome, Edge, Firefox, InternetExplorer};
use crate::descriptor::HostObjectDescriptor;
use crate::rules::RuleClause;

pub(super) fn descriptor() -> HostObjectDescriptor {
    HostObjectDescriptor::new("CDATASection", NodeKind::CdataSection)
        .extends("Text")
        .visible_in([
            RuleClause::since(InternetExplorer, 9),
            RuleClause::any(Edge),
            RuleClause::any(Firefox),
            RuleClause::any(Chrome),
        ])
}
