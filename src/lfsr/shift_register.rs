use super::RegisterError;
use log::debug;
use std::fmt;

/// A Fibonacci linear-feedback shift register over a fixed ring of bits.
///
/// The register never resizes. Clocking overwrites the front cell with the
/// feedback bit and advances `head`, so the cell that was the front becomes
/// the back. Tap indices are stored in front-to-back order and resolved
/// against `head` on every clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftRegister {
    reg: Vec<u8>,
    head: usize,
    taps: Vec<usize>,
    clocks: u64,
}

impl ShiftRegister {
    /// Creates a new register from an initial fill and its tap positions.
    ///
    /// # Arguments
    /// * `fill` - Initial content, front (oldest) first. Every value must be
    /// 0 or 1.
    /// * `taps` - Tap positions, 1-indexed from the newest cell: position
    /// `fill.len()` is the front cell and position `1` the back cell.
    ///
    /// # Examples
    /// ```
    /// use keystream_rs::lfsr::ShiftRegister;
    ///
    /// let mut reg = ShiftRegister::new(&[1, 0, 0], &[3, 1]).unwrap();
    /// assert_eq!(reg.clock(), 1);
    /// assert_eq!(reg.contents(), vec![0, 0, 1]);
    /// ```
    pub fn new(fill: &[u8], taps: &[usize]) -> Result<Self, RegisterError> {
        if fill.is_empty() {
            return Err(RegisterError::EmptyFill);
        }
        if let Some((index, &value)) =
            fill.iter().enumerate().find(|&(_, &b)| b > 1)
        {
            return Err(RegisterError::InvalidBit { index, value });
        }

        let len = fill.len();
        let taps = taps
            .iter()
            .map(|&tap| {
                if tap < 1 || tap > len {
                    Err(RegisterError::TapOutOfRange { tap, len })
                } else {
                    Ok(len - tap)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("built {}-bit register with tap indices {:?}", len, taps);
        Ok(ShiftRegister {
            reg: fill.to_vec(),
            head: 0,
            taps,
            clocks: 0,
        })
    }

    /// Clocks the register once and returns the bit that was at the front.
    pub fn clock(&mut self) -> u8 {
        let len = self.reg.len();
        let fb_bit = self
            .taps
            .iter()
            .fold(0, |acc, &tap| acc ^ self.reg[(self.head + tap) % len]);
        let output = self.reg[self.head];
        self.reg[self.head] = fb_bit;
        self.head = (self.head + 1) % len;
        self.clocks += 1;
        output
    }

    /// The bit the next clock will output.
    pub fn front(&self) -> u8 {
        self.reg[self.head]
    }

    pub fn len(&self) -> usize {
        self.reg.len()
    }

    /// Always false: construction rejects empty fills.
    pub fn is_empty(&self) -> bool {
        self.reg.is_empty()
    }

    /// Copy of the content, front first.
    pub fn contents(&self) -> Vec<u8> {
        self.reg[self.head..]
            .iter()
            .chain(self.reg[..self.head].iter())
            .copied()
            .collect()
    }

    /// Tap indices into `contents()`, as converted at construction.
    pub fn taps(&self) -> &[usize] {
        &self.taps
    }

    /// Number of clocks applied since construction.
    pub fn clocks(&self) -> u64 {
        self.clocks
    }
}

impl fmt::Display for ShiftRegister {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for bit in self.contents() {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}
