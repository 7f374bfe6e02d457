//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the
//! individual workspace crates (`provider-drive-docs`, `bridge-reqwest`).
//! Host applications can depend on `drive-docs-workspace` and enable the
//! documented features without needing to wire each crate individually.
