//! Serializers for generated sock patterns.
//!
//! - **JSON** ([`json`]): the full pattern as a `serde_json::Value`, for the
//!   CLI's `--json` output and for tooling.

pub mod json;
