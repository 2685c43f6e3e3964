//! This module provides an easy single import for those using this crate.

pub use crate::node::{run_node, Node, NodeError};
pub use crossbeam::channel::{self, Receiver, Sender};
pub use std::thread;

pub type NodeReceiver<T> = Option<Receiver<T>>;
pub type NodeSender<T> = Vec<Sender<T>>;
