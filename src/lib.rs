//! A keystream generator built from three linear-feedback shift registers.
//!
//! One register (the decider) steers a clock-controlled combiner over the
//! other two, producing one pseudorandom bit per call. The crate also carries
//! the plumbing to drive a generator: a small processing-node framework over
//! crossbeam channels and writers that persist the keystream as ASCII bits.
//!
//! # Example
//!
//! ```
//! use keystream_rs::lfsr::Generator;
//!
//! let mut gen = Generator::new(
//!     &[0, 1],
//!     &[1, 0],
//!     &[0, 1],
//!     &[1, 2],
//!     &[1, 2],
//!     &[1, 2],
//! )
//! .unwrap();
//!
//! let bits: Vec<u8> = (0..3).map(|_| gen.generate()).collect();
//! assert_eq!(bits, vec![0, 1, 1]);
//! ```

#[macro_use]
pub mod node;
pub mod io;
pub mod lfsr;
pub mod prelude;
