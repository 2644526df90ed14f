//! Core decision tree types and the resolver.
//!
//! This module contains the pure functional core of the crate:
//! - The tree data model via `DecisionTree`, `Branch` and `TestPoint`
//! - Offset sources via the `OffsetProvider` trait
//! - The resolver that walks a tree against a provider
//!
//! Nothing in here reads ambient state except `HostZone`, which is only
//! consulted when a caller passes it in.

mod offset;
mod resolve;
mod tree;

pub use offset::{offset_minutes, HostZone, OffsetFn, OffsetProvider, Schedule};
pub use resolve::{resolve, resolve_host, resolve_with_path, Probe, Resolution};
pub use tree::{Branch, DecisionTree, TestPoint, TestPointError};
