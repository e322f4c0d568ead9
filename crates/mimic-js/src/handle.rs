//! Data attached to Boa objects.
//!
//! The GC derives expand to `unsafe impl`s, so they live in this module
//! alone. None of these types hold GC pointers: host objects and the bridge
//! are owned on the Rust side.
#![allow(unsafe_code)]

use std::rc::{Rc, Weak};

use boa_engine::JsData;
use boa_gc::{Finalize, Trace};
use mimic_host::HostObject;

use crate::bridge::Bridge;

/// Internal slot of a JS wrapper: the host object it stands for.
#[derive(Debug, Trace, Finalize, JsData)]
pub(crate) struct HostHandle {
    #[unsafe_ignore_trace]
    pub(crate) object: Rc<HostObject>,
}

/// What a native member function needs to find its way back to the page.
#[derive(Debug, Clone, Trace, Finalize)]
pub(crate) struct MemberCapture {
    #[unsafe_ignore_trace]
    pub(crate) bridge: Weak<Bridge>,
    #[unsafe_ignore_trace]
    pub(crate) class: &'static str,
    #[unsafe_ignore_trace]
    pub(crate) name: &'static str,
}
