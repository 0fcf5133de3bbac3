//! Tests for the `quill_server` crate.

pub(crate) mod support;
