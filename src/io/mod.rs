//! Nodes and helpers for persisting keystreams.

pub mod bit_text;
