use super::{ConfigError, GeneratorConfig, RegisterRole, ShiftRegister};
use log::debug;
use rayon::prelude::*;
use std::fmt;

/// Clock-controlled keystream generator over three shift registers.
///
/// Every call to `generate` clocks the decider, first and second registers
/// once each, then:
///
/// * if first and second agree, outputs the decider's bit;
/// * otherwise, if the decider's bit is 1, outputs first's bit and clocks
///   second once more;
/// * otherwise outputs second's bit and clocks first once more.
#[derive(Clone, Debug)]
pub struct Generator {
    decider: ShiftRegister,
    first: ShiftRegister,
    second: ShiftRegister,
}

/// Content of one register before a diagnostic clock, and the bit it gave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterSnapshot {
    pub role: RegisterRole,
    pub content: Vec<u8>,
    pub output: u8,
}

impl fmt::Display for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LFSR {}: ", self.role.index())?;
        for bit in &self.content {
            write!(f, "{}", bit)?;
        }
        write!(f, ", Output = {}", self.output)
    }
}

fn build(
    role: RegisterRole,
    fill: &[u8],
    taps: &[usize],
) -> Result<ShiftRegister, ConfigError> {
    ShiftRegister::new(fill, taps).map_err(|e| ConfigError::new(role, e))
}

impl Generator {
    /// Creates a new `Generator` from the initial fill and tap positions of
    /// each register.
    ///
    /// # Arguments
    /// * `fill_decider`, `fill_first`, `fill_second` - Initial register
    /// content, front (oldest) first.
    /// * `taps_decider`, `taps_first`, `taps_second` - Tap positions, each in
    /// `[1, fill length]` of its register.
    pub fn new(
        fill_decider: &[u8],
        fill_first: &[u8],
        fill_second: &[u8],
        taps_decider: &[usize],
        taps_first: &[usize],
        taps_second: &[usize],
    ) -> Result<Self, ConfigError> {
        Ok(Generator {
            decider: build(RegisterRole::Decider, fill_decider, taps_decider)?,
            first: build(RegisterRole::First, fill_first, taps_first)?,
            second: build(RegisterRole::Second, fill_second, taps_second)?,
        })
    }

    /// Creates a new `Generator` from a `GeneratorConfig`.
    ///
    /// # Examples
    /// ```
    /// use keystream_rs::lfsr::{Generator, GeneratorConfig};
    ///
    /// let config = GeneratorConfig::default();
    /// let mut gen = Generator::from_config(&config).unwrap();
    /// let bit = gen.generate();
    /// assert!(bit == 0 || bit == 1);
    /// ```
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        Generator::new(
            &config.decider.fill,
            &config.first.fill,
            &config.second.fill,
            &config.decider.taps,
            &config.first.taps,
            &config.second.taps,
        )
    }

    /// Produces the next keystream bit.
    pub fn generate(&mut self) -> u8 {
        let d = self.decider.clock();
        let f = self.first.clock();
        let s = self.second.clock();

        if f == s {
            return d;
        }

        if d == 1 {
            self.second.clock();
            f
        } else {
            self.first.clock();
            s
        }
    }

    /// Clocks each register once outside of the combiner and reports what it
    /// held and what it output. This advances the registers, so the keystream
    /// produced afterwards differs from an undiagnosed generator's.
    pub fn diagnose(&mut self) -> [RegisterSnapshot; 3] {
        let snap = |role: RegisterRole, reg: &mut ShiftRegister| {
            let content = reg.contents();
            let output = reg.clock();
            let snapshot = RegisterSnapshot {
                role,
                content,
                output,
            };
            debug!("{}", snapshot);
            snapshot
        };
        [
            snap(RegisterRole::Decider, &mut self.decider),
            snap(RegisterRole::First, &mut self.first),
            snap(RegisterRole::Second, &mut self.second),
        ]
    }

    pub fn register(&self, role: RegisterRole) -> &ShiftRegister {
        match role {
            RegisterRole::Decider => &self.decider,
            RegisterRole::First => &self.first,
            RegisterRole::Second => &self.second,
        }
    }
}

/// The keystream never ends; use `take` to bound it.
impl Iterator for Generator {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.generate())
    }
}

/// Runs one independent generator per configuration on the rayon thread pool
/// and collects `count` bits from each, in configuration order.
///
/// Fails with the first configuration error found; no bits are returned in
/// that case.
pub fn generate_parallel(
    configs: &[GeneratorConfig],
    count: usize,
) -> Result<Vec<Vec<u8>>, ConfigError> {
    configs
        .par_iter()
        .map(|config| -> Result<Vec<u8>, ConfigError> {
            let generator = Generator::from_config(config)?;
            Ok(generator.take(count).collect())
        })
        .collect()
}

#[cfg(test)]
mod test {
    use crate::lfsr::generator::*;
    use crate::lfsr::{RegisterConfig, RegisterError};
    use rand::{thread_rng, Rng};

    const ROLES: [RegisterRole; 3] =
        [RegisterRole::Decider, RegisterRole::First, RegisterRole::Second];

    fn constant(bit: u8) -> RegisterConfig {
        RegisterConfig::new(vec![bit], vec![1])
    }

    fn clocks(gen: &Generator) -> [u64; 3] {
        [
            gen.register(ROLES[0]).clocks(),
            gen.register(ROLES[1]).clocks(),
            gen.register(ROLES[2]).clocks(),
        ]
    }

    #[test]
    // Two-bit registers tapped on every cell, traced by hand:
    //   call 1: d=0 f=1 s=0 -> output s=0, first clocked again
    //   call 2: d=1 f=1 s=1 -> output d=1
    //   call 3: d=1 f=1 s=1 -> output d=1
    // after which the outputs cycle through 0, 1, 1.
    fn test_hand_trace() {
        let mut gen = Generator::new(
            &[0, 1],
            &[1, 0],
            &[0, 1],
            &[1, 2],
            &[1, 2],
            &[1, 2],
        )
        .unwrap();

        assert_eq!(gen.generate(), 0);
        assert_eq!(clocks(&gen), [1, 2, 1]);
        for role in &ROLES {
            assert_eq!(gen.register(*role).contents(), vec![1, 1]);
        }

        assert_eq!(gen.generate(), 1);
        assert_eq!(gen.generate(), 1);
        assert_eq!(clocks(&gen), [3, 4, 3]);

        let rest: Vec<u8> = gen.take(6).collect();
        assert_eq!(rest, vec![0, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn test_data_registers_agree() {
        let config = GeneratorConfig::new(
            constant(1),
            constant(0),
            constant(0),
        );
        let mut gen = Generator::from_config(&config).unwrap();
        assert_eq!(gen.generate(), 1);
        assert_eq!(clocks(&gen), [1, 1, 1]);

        let config = GeneratorConfig::new(
            constant(0),
            constant(1),
            constant(1),
        );
        let mut gen = Generator::from_config(&config).unwrap();
        assert_eq!(gen.generate(), 0);
        assert_eq!(clocks(&gen), [1, 1, 1]);
    }

    #[test]
    fn test_decider_one_selects_first() {
        let config = GeneratorConfig::new(
            constant(1),
            constant(1),
            constant(0),
        );
        let mut gen = Generator::from_config(&config).unwrap();
        assert_eq!(gen.generate(), 1);
        assert_eq!(clocks(&gen), [1, 1, 2]);

        let config = GeneratorConfig::new(
            constant(1),
            constant(0),
            constant(1),
        );
        let mut gen = Generator::from_config(&config).unwrap();
        assert_eq!(gen.generate(), 0);
        assert_eq!(clocks(&gen), [1, 1, 2]);
    }

    #[test]
    fn test_decider_zero_selects_second() {
        let config = GeneratorConfig::new(
            constant(0),
            constant(1),
            constant(0),
        );
        let mut gen = Generator::from_config(&config).unwrap();
        assert_eq!(gen.generate(), 0);
        assert_eq!(clocks(&gen), [1, 2, 1]);

        let config = GeneratorConfig::new(
            constant(0),
            constant(0),
            constant(1),
        );
        let mut gen = Generator::from_config(&config).unwrap();
        assert_eq!(gen.generate(), 1);
        assert_eq!(clocks(&gen), [1, 2, 1]);
    }

    #[test]
    fn test_determinism() {
        let mut rng = thread_rng();
        let mut random_reg = || {
            let len = rng.gen_range(2..32);
            let fill: Vec<u8> =
                (0..len).map(|_| rng.gen_range(0..2)).collect();
            RegisterConfig::new(fill, vec![len, 1])
        };
        let config =
            GeneratorConfig::new(random_reg(), random_reg(), random_reg());

        let a: Vec<u8> =
            Generator::from_config(&config).unwrap().take(5000).collect();
        let b: Vec<u8> =
            Generator::from_config(&config).unwrap().take(5000).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_output_alphabet() {
        let mut gen =
            Generator::from_config(&GeneratorConfig::default()).unwrap();
        let mut ones = 0;
        for _ in 0..10_000 {
            let bit = gen.generate();
            assert!(bit == 0 || bit == 1);
            ones += bit as u32;
        }
        assert!(ones > 0 && ones < 10_000);
        for role in &ROLES {
            assert_eq!(gen.register(*role).len(), 20);
        }
    }

    #[test]
    fn test_rejects_each_register() {
        let good = || RegisterConfig::new(vec![1, 0, 1], vec![3, 1]);
        for &tap in &[0, 4] {
            let bad = || RegisterConfig::new(vec![1, 0, 1], vec![3, tap]);
            let cases = vec![
                (ROLES[0], GeneratorConfig::new(bad(), good(), good())),
                (ROLES[1], GeneratorConfig::new(good(), bad(), good())),
                (ROLES[2], GeneratorConfig::new(good(), good(), bad())),
            ];
            for (role, config) in cases {
                let err = Generator::from_config(&config).unwrap_err();
                assert_eq!(
                    err,
                    ConfigError::new(
                        role,
                        RegisterError::TapOutOfRange { tap, len: 3 }
                    )
                );
            }
        }

        let err =
            Generator::new(&[1], &[], &[1], &[1], &[], &[1]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::new(RegisterRole::First, RegisterError::EmptyFill)
        );
    }

    #[test]
    fn test_diagnose() {
        let mut gen = Generator::new(
            &[0, 1],
            &[1, 0],
            &[0, 1],
            &[1, 2],
            &[1, 2],
            &[1, 2],
        )
        .unwrap();
        let snaps = gen.diagnose();
        assert_eq!(snaps[0].content, vec![0, 1]);
        assert_eq!(snaps[0].output, 0);
        assert_eq!(snaps[1].content, vec![1, 0]);
        assert_eq!(snaps[1].output, 1);
        assert_eq!(snaps[2].role, RegisterRole::Second);
        assert_eq!(snaps[2].to_string(), "LFSR 2: 01, Output = 0");
        assert_eq!(clocks(&gen), [1, 1, 1]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut other = GeneratorConfig::default();
        other.decider.fill.reverse();
        let configs = vec![GeneratorConfig::default(), other];

        let out = generate_parallel(&configs, 1000).unwrap();
        assert_eq!(out.len(), 2);
        for (config, bits) in configs.iter().zip(out.iter()) {
            let expected: Vec<u8> =
                Generator::from_config(config).unwrap().take(1000).collect();
            assert_eq!(*bits, expected);
        }
        assert_ne!(out[0], out[1]);
    }

    #[test]
    fn test_parallel_reports_bad_config() {
        let mut bad = GeneratorConfig::default();
        bad.second.taps.push(21);
        let res = generate_parallel(&[GeneratorConfig::default(), bad], 10);
        assert_eq!(res.unwrap_err().role, RegisterRole::Second);
    }
}
