//! Writes keystream bits as ASCII text.
//!
//! Each bit becomes a single `'0'` or `'1'` character. There are no
//! delimiters, headers or trailing newline: a run of `n` bits is exactly `n`
//! bytes of output.

use crate::lfsr::Generator;
use crate::prelude::*;

use log::{debug, error};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn bit_char(bit: u8) -> Option<u8> {
    match bit {
        0 => Some(b'0'),
        1 => Some(b'1'),
        _ => None,
    }
}

/// Writes `count` bits of `generator` to `writer` and flushes it.
///
/// # Example
///
/// ```
/// use keystream_rs::io::bit_text::write_bits;
/// use keystream_rs::lfsr::Generator;
///
/// let mut gen =
///     Generator::new(&[0, 1], &[1, 0], &[0, 1], &[1, 2], &[1, 2], &[1, 2])
///         .unwrap();
/// let mut out: Vec<u8> = Vec::new();
/// write_bits(&mut gen, 6, &mut out).unwrap();
/// assert_eq!(out, b"011011");
/// ```
pub fn write_bits<W: Write>(
    generator: &mut Generator,
    count: usize,
    mut writer: W,
) -> io::Result<()> {
    let mut buf = Vec::with_capacity(count.min(1 << 16));
    let mut remaining = count;
    while remaining > 0 {
        let chunk = remaining.min(1 << 16);
        buf.clear();
        for _ in 0..chunk {
            let bit = generator.generate();
            let c = bit_char(bit).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("generator produced non-bit value {}", bit),
                )
            })?;
            buf.push(c);
        }
        writer.write_all(&buf)?;
        remaining -= chunk;
    }
    writer.flush()?;
    debug!("wrote {} keystream bits", count);
    Ok(())
}

/// Will write each received bit as a `'0'` or `'1'` character to writer.
pub struct BitTextOutput<W>
where
    W: Write + Send,
{
    pub input: NodeReceiver<u8>,
    writer: W,
    written: u64,
}

impl<W: Write + Send> BitTextOutput<W> {
    /// Make a BitTextOutput node sending text to the given writer.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use std::io::BufWriter;
    /// use keystream_rs::io::bit_text::BitTextOutput;
    ///
    /// let writer = BufWriter::new(File::create("/tmp/out.txt").unwrap());
    /// let outnode = BitTextOutput::new(writer);
    /// ```
    pub fn new(writer: W) -> Self {
        BitTextOutput {
            input: Default::default(),
            writer,
            written: 0,
        }
    }

    pub fn run(&mut self, bit: u8) -> Result<(), NodeError> {
        let c = bit_char(bit).ok_or(NodeError::DataError)?;
        self.writer.write_all(&[c]).map_err(|e| {
            error!("failed to write bit to writer: {}", e);
            NodeError::PermanentError
        })?;
        self.written += 1;
        Ok(())
    }

    /// Number of bits written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Consumes the node, handing back its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn finish(&mut self) -> Result<(), NodeError> {
        self.writer.flush().map_err(|e| {
            error!("failed to flush writer: {}", e);
            NodeError::PermanentError
        })?;
        debug!("bit text output finished after {} bits", self.written);
        Ok(())
    }
}

impl<W: Write + Send> Node for BitTextOutput<W> {
    fn call(&mut self) -> Result<(), NodeError> {
        match crate::node::recv_one(&self.input) {
            Ok(bit) => self.run(bit),
            Err(NodeError::DataEnd) => {
                self.finish()?;
                Err(NodeError::DataEnd)
            }
            Err(e) => Err(e),
        }
    }

    fn is_connected(&self) -> bool {
        self.input.is_some()
    }
}

/// Creates a `BitTextOutput` writing to a freshly created file at `path`.
pub fn bit_text_file_out<P: AsRef<Path>>(
    path: P,
) -> io::Result<BitTextOutput<BufWriter<File>>> {
    Ok(BitTextOutput::new(BufWriter::new(File::create(path)?)))
}
