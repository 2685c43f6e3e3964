//! Writes a keystream to a text file as ASCII `0`/`1` characters.
//!
//! ```text
//! cargo run --release --example keystream_file -- \
//!     --count 1000000 --output out.txt
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use keystream_rs::io::bit_text::write_bits;
use keystream_rs::lfsr::{Generator, GeneratorConfig};
use log::info;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of bits to generate
    #[arg(short, long, default_value_t = 1_000_000)]
    count: usize,

    /// File to write the bits to
    #[arg(short, long, default_value = "out.txt")]
    output: PathBuf,

    /// CBOR generator configuration; the built-in one is used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print each register and its output after one diagnostic clock, then
    /// exit without writing any bits
    #[arg(long)]
    inspect: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let bytes = fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            GeneratorConfig::from_cbor(&bytes).with_context(|| {
                format!("failed to decode {}", path.display())
            })?
        }
        None => GeneratorConfig::default(),
    };
    let mut generator =
        Generator::from_config(&config).context("failed to build generator")?;

    if args.inspect {
        for snapshot in generator.diagnose().iter() {
            println!("{}", snapshot);
        }
        return Ok(());
    }

    let output = args.output.display();
    let file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", output))?;
    write_bits(&mut generator, args.count, BufWriter::new(file))
        .with_context(|| format!("failed to write {}", output))?;
    info!("wrote {} bits", args.count);

    println!("Bits released to {}.", output);
    Ok(())
}
