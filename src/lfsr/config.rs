//! Serializable generator configurations.
//!
//! A configuration is the full key material of a generator: the initial fill
//! and tap positions of each of its three registers. Configurations can be
//! persisted as CBOR so a keystream can be reproduced later.

use serde::{Deserialize, Serialize};

/// Initial fill and tap positions for one register.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// Initial content, front (oldest) first.
    pub fill: Vec<u8>,
    /// Tap positions, 1-indexed from the newest cell.
    pub taps: Vec<usize>,
}

impl RegisterConfig {
    pub fn new(fill: Vec<u8>, taps: Vec<usize>) -> Self {
        RegisterConfig { fill, taps }
    }
}

/// Configuration of all three registers of a `Generator`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub decider: RegisterConfig,
    pub first: RegisterConfig,
    pub second: RegisterConfig,
}

impl GeneratorConfig {
    pub fn new(
        decider: RegisterConfig,
        first: RegisterConfig,
        second: RegisterConfig,
    ) -> Self {
        GeneratorConfig {
            decider,
            first,
            second,
        }
    }

    /// Encodes the configuration as CBOR.
    ///
    /// # Examples
    /// ```
    /// use keystream_rs::lfsr::GeneratorConfig;
    ///
    /// let config = GeneratorConfig::default();
    /// let bytes = config.to_cbor().unwrap();
    /// assert_eq!(GeneratorConfig::from_cbor(&bytes).unwrap(), config);
    /// ```
    pub fn to_cbor(&self) -> Result<Vec<u8>, serde_cbor::Error> {
        serde_cbor::to_vec(self)
    }

    /// Decodes a configuration from CBOR. The result is not validated until a
    /// `Generator` is built from it.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, serde_cbor::Error> {
        serde_cbor::from_slice(bytes)
    }
}

impl Default for GeneratorConfig {
    /// Three 20-bit registers: decider taps `[20, 1]`, first `[20, 19]` and
    /// second `[20, 1]`. First and second share a fill.
    fn default() -> Self {
        let data_fill = vec![
            1, 1, 0, 0, 0, 0, 1, 0, 1, 1, 0, 0, 1, 1, 1, 0, 1, 1, 0, 1,
        ];
        GeneratorConfig {
            decider: RegisterConfig::new(
                vec![
                    0, 0, 1, 1, 1, 1, 0, 1, 0, 1, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0,
                ],
                vec![20, 1],
            ),
            first: RegisterConfig::new(data_fill.clone(), vec![20, 19]),
            second: RegisterConfig::new(data_fill, vec![20, 1]),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::lfsr::config::*;

    #[test]
    fn test_default_is_twenty_bits() {
        let config = GeneratorConfig::default();
        for reg in &[&config.decider, &config.first, &config.second] {
            assert_eq!(reg.fill.len(), 20);
            assert!(reg.taps.iter().all(|&t| t >= 1 && t <= 20));
        }
        assert_eq!(config.first.fill, config.second.fill);
    }

    #[test]
    fn test_cbor_keeps_invalid_config() {
        let config = GeneratorConfig::new(
            RegisterConfig::new(vec![1, 0], vec![3]),
            RegisterConfig::new(vec![], vec![]),
            RegisterConfig::new(vec![7], vec![1]),
        );
        let bytes = config.to_cbor().unwrap();
        assert_eq!(GeneratorConfig::from_cbor(&bytes).unwrap(), config);
    }

    #[test]
    fn test_cbor_rejects_garbage() {
        assert!(GeneratorConfig::from_cbor(&[0xff, 0x00, 0x13]).is_err());
    }
}
