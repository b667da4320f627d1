//! Integration tests
//!
//! Drive the full router through `tower::ServiceExt::oneshot`.

mod realtime;
