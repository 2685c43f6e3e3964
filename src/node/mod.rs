//! Provides an infrastructure to create processing nodes, connect nodes
//! together via crossbeam channels, and start nodes running in their own
//! independent threads.
//!
//! A node is a structure holding any number of `NodeReceiver` inputs and
//! `NodeSender` outputs. Each `call()` receives one value from every input,
//! runs the node once and fans the result out to every connected output.
//!
//! # Example
//!
//! ```
//! #[macro_use] extern crate keystream_rs;
//! use keystream_rs::io::bit_text::BitTextOutput;
//! use keystream_rs::lfsr::{GeneratorConfig, KeystreamNode};
//! use keystream_rs::prelude::*;
//!
//! # fn main() {
//! let config = GeneratorConfig::default();
//! let mut source = KeystreamNode::with_limit(&config, 64).unwrap();
//! let mut sink = BitTextOutput::new(Vec::new());
//!
//! connect_nodes!(source, output, sink, input);
//! start_nodes!(source);
//!
//! let err = run_node(&mut sink);
//! assert_eq!(err, NodeError::DataEnd);
//! assert_eq!(sink.into_inner().len(), 64);
//! # }
//! ```

use crate::prelude::*;
use log::{info, warn};
use thiserror::Error;

/// Reasons a node stops producing.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    /// The node got an input it could not handle.
    #[error("node was unable to process its input")]
    DataError,
    /// The node has no more data to produce or consume.
    #[error("node reached the end of its data")]
    DataEnd,
    /// A channel to or from the node was disconnected.
    #[error("node lost a channel to a connected node")]
    CommError,
    /// The node can never run again.
    #[error("node failed permanently")]
    PermanentError,
}

/// The trait that all nodes in the library implement.
pub trait Node: Send {
    /// Executes the node once: receive, run, send.
    fn call(&mut self) -> Result<(), NodeError>;

    /// Whether every input of the node has been connected.
    fn is_connected(&self) -> bool;
}

/// Calls `node` until it reports an error and hands that error back.
///
/// `DataEnd` is the normal way for a finite pipeline to wind down and is
/// logged as such, anything else is a warning.
pub fn run_node<N: Node + ?Sized>(node: &mut N) -> NodeError {
    loop {
        if let Err(e) = node.call() {
            match e {
                NodeError::DataEnd => info!("node finished: {}", e),
                _ => warn!("node stopped: {}", e),
            }
            return e;
        }
    }
}

/// Sends `value` to every connected output.
pub fn send_all<T: Clone>(
    senders: &NodeSender<T>,
    value: T,
) -> Result<(), NodeError> {
    for send in senders {
        send.send(value.clone())
            .map_err(|_| NodeError::CommError)?;
    }
    Ok(())
}

/// Receives one value from `recv`, or reports why no value will come.
pub fn recv_one<T>(recv: &NodeReceiver<T>) -> Result<T, NodeError> {
    match recv {
        Some(r) => r.recv().map_err(|_| NodeError::DataEnd),
        None => Err(NodeError::PermanentError),
    }
}

/// Connects two nodes together with a rendezvous crossbeam channel.
///
/// ```
/// # #[macro_use] extern crate keystream_rs;
/// # use keystream_rs::io::bit_text::BitTextOutput;
/// # use keystream_rs::lfsr::{GeneratorConfig, KeystreamNode};
/// # use keystream_rs::prelude::*;
/// # fn main() {
/// let mut source = KeystreamNode::new(&GeneratorConfig::default()).unwrap();
/// let mut sink = BitTextOutput::new(Vec::new());
///
/// // source will now send its bits to sink, which receives them on its
/// // receiver named `input`.
/// connect_nodes!(source, output, sink, input);
/// assert!(sink.is_connected());
/// # }
/// ```
#[macro_export]
macro_rules! connect_nodes {
    ($n1:ident, $send:ident, $n2:ident, $recv:ident) => {{
        let (send, recv) = $crate::prelude::channel::bounded(0);
        $n1.$send.push(send);
        $n2.$recv = Some(recv);
    }};
}

/// Spawns a thread for each node in order and runs it until it reports an
/// error.
#[macro_export]
macro_rules! start_nodes {
    ($($node:ident),+ $(,)*) => {
        $(
            $crate::prelude::thread::spawn(move || {
                $crate::node::run_node(&mut $node);
            });
        )*
    };
}
