//! A source node producing a keystream one bit per call.

use super::{ConfigError, Generator, GeneratorConfig};
use crate::prelude::*;
use log::trace;

/// A node that emits the bits of a `Generator`.
///
/// Without a limit the node runs forever. With a limit it reports
/// `NodeError::DataEnd` once that many bits have been sent, which drops its
/// senders and lets downstream nodes wind down.
///
/// # Examples
///
/// ```
/// use keystream_rs::lfsr::{GeneratorConfig, KeystreamNode};
///
/// let config = GeneratorConfig::default();
/// let node = KeystreamNode::with_limit(&config, 1_000_000).unwrap();
/// ```
pub struct KeystreamNode {
    generator: Generator,
    limit: Option<u64>,
    sent: u64,
    pub output: NodeSender<u8>,
}

impl KeystreamNode {
    /// Constructs an unbounded `KeystreamNode`.
    pub fn new(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        Ok(KeystreamNode::from_generator(Generator::from_config(config)?))
    }

    /// Constructs a `KeystreamNode` that stops after `limit` bits.
    pub fn with_limit(
        config: &GeneratorConfig,
        limit: u64,
    ) -> Result<Self, ConfigError> {
        let mut node = KeystreamNode::new(config)?;
        node.limit = Some(limit);
        Ok(node)
    }

    pub fn from_generator(generator: Generator) -> Self {
        KeystreamNode {
            generator,
            limit: None,
            sent: 0,
            output: Default::default(),
        }
    }

    /// Number of bits produced so far.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    pub fn run(&mut self) -> Result<u8, NodeError> {
        if self.limit.map_or(false, |limit| self.sent >= limit) {
            return Err(NodeError::DataEnd);
        }
        let bit = self.generator.generate();
        self.sent += 1;
        trace!("keystream bit {}: {}", self.sent, bit);
        Ok(bit)
    }
}

impl Node for KeystreamNode {
    fn call(&mut self) -> Result<(), NodeError> {
        let bit = self.run()?;
        crate::node::send_all(&self.output, bit)
    }

    fn is_connected(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use crate::lfsr::keystream_node::*;
    use crate::lfsr::RegisterConfig;
    use crate::node::recv_one;
    use std::time::Instant;

    #[test]
    fn test_run_matches_generator() {
        let config = GeneratorConfig::default();
        let mut node = KeystreamNode::new(&config).unwrap();
        let expected: Vec<u8> =
            Generator::from_config(&config).unwrap().take(256).collect();
        let got: Vec<u8> = (0..256).map(|_| node.run().unwrap()).collect();
        assert_eq!(got, expected);
        assert_eq!(node.sent(), 256);
    }

    #[test]
    fn test_limit() {
        let mut node =
            KeystreamNode::with_limit(&GeneratorConfig::default(), 3).unwrap();
        for _ in 0..3 {
            assert!(node.run().is_ok());
        }
        assert_eq!(node.run(), Err(NodeError::DataEnd));
        assert_eq!(node.run(), Err(NodeError::DataEnd));
        assert_eq!(node.sent(), 3);
    }

    #[test]
    // A test to verify the KeystreamNode streams the hand-traced sequence.
    fn test_keystream_node() {
        let config = GeneratorConfig::new(
            RegisterConfig::new(vec![0, 1], vec![1, 2]),
            RegisterConfig::new(vec![1, 0], vec![1, 2]),
            RegisterConfig::new(vec![0, 1], vec![1, 2]),
        );
        let mut mynode = KeystreamNode::with_limit(&config, 9).unwrap();

        struct CheckNode {
            input: NodeReceiver<u8>,
            state: Vec<u8>,
        }

        impl Node for CheckNode {
            fn call(&mut self) -> Result<(), NodeError> {
                let x = recv_one(&self.input)?;
                self.state.push(x);
                Ok(())
            }

            fn is_connected(&self) -> bool {
                self.input.is_some()
            }
        }

        let mut check_node = CheckNode {
            input: None,
            state: vec![],
        };

        connect_nodes!(mynode, output, check_node, input);
        start_nodes!(mynode);
        let check = thread::spawn(move || {
            let now = Instant::now();
            while check_node.call().is_ok() {
                assert!(now.elapsed().as_secs() < 5);
            }
            check_node.state
        });
        assert_eq!(check.join().unwrap(), vec![0, 1, 1, 0, 1, 1, 0, 1, 1]);
    }
}
