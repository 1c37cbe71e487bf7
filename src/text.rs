//! Text implementations of [`Conceal`][crate::Conceal] and [`Reveal`][crate::Reveal] traits.
//!
//! The [`Carrier`] and [`Package`] structures can be used to conceal and reveal hidden text
//! messages within plain-text pixel streams.
//!
//! ## Pixel Streams
//!
//! A pixel stream is a sequence of decimal samples in `0..=255` separated by whitespace.
//! There is no header and no fixed dimensions. Newlines carry no meaning other than layout,
//! which the [`Carrier`] mirrors in its output so that the package looks like its cover.
//! Any other token, including out-of-range numbers, makes the whole stream malformed.
//!
//! ## Capacity
//!
//! Every sample holds one message bit in its least significant bit, so a stream of `n`
//! samples can hold `n / 8` message bytes. There is no length prefix: samples following
//! the message have their least significant bit cleared, which reveals as NUL characters
//! that terminate the message.
//!
//! ## Examples
//!
//! Concealing a secret message in a cover file:
//!
//! ```no_run
//! use lsb_text::text;
//!
//! text::encode_file("cover.txt", b"a very secret message", "package.txt")?;
//! # Ok::<(), lsb_text::Error>(())
//! ```
//!
//! Revealing it again:
//!
//! ```no_run
//! use lsb_text::text;
//!
//! let mut message = Vec::new();
//! text::decode_file("package.txt", text::DEFAULT_OUTPUT_LIMIT, &mut message)?;
//! # Ok::<(), lsb_text::Error>(())
//! ```

mod bits;
mod carrier;
mod package;
mod stream;

pub use bits::{bits_to_byte, byte_to_bits};
pub use carrier::Carrier;
pub use package::{is_printable, Package, DEFAULT_OUTPUT_LIMIT};

use crate::{Conceal, Error, Result, Reveal};
use std::{fs::File, io::Write, path::Path};

/// Conceals `message` in the cover at `input`, writing the package to `output`.
///
/// The input is opened before the output is created, so a missing cover leaves no output
/// file behind. Returns how many samples were written.
///
/// # Errors
///
/// Fails with [`Error::SourceUnreadable`] if the input cannot be opened and with
/// [`Error::DestinationUnwritable`] if the output cannot be created, besides any error
/// of [`Carrier`].
pub fn encode_file(
    input: impl AsRef<Path>,
    message: &[u8],
    output: impl AsRef<Path>,
) -> Result<usize> {
    let cover = File::open(input).map_err(Error::SourceUnreadable)?;
    let package = File::create(output).map_err(Error::DestinationUnwritable)?;

    Carrier::new(package).conceal(message, cover)
}

/// Reveals the message hidden in the package at `input` into `output`.
///
/// At most `limit - 1` characters are reconstructed. Returns how many bytes were written.
///
/// # Errors
///
/// Fails with [`Error::SourceUnreadable`] if the input cannot be opened, besides any error
/// of [`Package`].
pub fn decode_file<W: Write>(input: impl AsRef<Path>, limit: usize, output: W) -> Result<usize> {
    if limit == 0 {
        return Err(Error::NullArgument("output limit must be positive"));
    }

    let package = File::open(input).map_err(Error::SourceUnreadable)?;

    Package::with_limit(limit, package).reveal(output)
}
