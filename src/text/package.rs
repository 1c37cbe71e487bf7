use crate::{
    text::{
        bits,
        stream::{is_c_space, PixelStream},
    },
    Error, Result, Reveal,
};
use log::{debug, warn};
use std::io::{BufReader, BufWriter, Read, Write};

/// Output limit used by [`Package::new`].
pub const DEFAULT_OUTPUT_LIMIT: usize = 100_000;

/// A text package that contains a steganographic message.
///
/// In the [`reveal`][crate::Reveal::reveal] method the least significant bit of every
/// sample is collected, the trailing bits that do not form a full byte are discarded, and
/// the rest is regrouped into characters, most significant bit first. At most `limit - 1`
/// characters are reconstructed.
///
/// The message written to the output ends at the first NUL character. Every reconstructed
/// character must be an ASCII letter, digit, punctuation or whitespace character, or NUL;
/// otherwise [`Error::CorruptPayload`] is returned *after* the message has been written.
///
/// # Examples
///
/// Revealing a secret message hidden within the package:
///
/// ```
/// use lsb_text::{text, Reveal};
///
/// let package = "10 21 30 40\n50 60 70 81\n";
///
/// let mut message = Vec::new();
///
/// text::Package::new(package.as_bytes()).reveal(&mut message)?;
///
/// assert_eq!(message, b"A");
/// # Ok::<(), lsb_text::Error>(())
/// ```
#[derive(Debug)]
pub struct Package<R: Read> {
    reader: BufReader<R>,
    limit: usize,
}

impl<R: Read> Package<R> {
    /// Creates a new [`Package<R>`] reading from the supplied reader, with the
    /// [default output limit][DEFAULT_OUTPUT_LIMIT].
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_limit(DEFAULT_OUTPUT_LIMIT, reader)
    }

    /// Creates a new [`Package<R>`] that reconstructs at most `limit - 1` characters.
    ///
    /// A `limit` of zero makes [`reveal`][crate::Reveal::reveal] fail with
    /// [`Error::NullArgument`].
    #[must_use]
    pub fn with_limit(limit: usize, reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            limit,
        }
    }
}

impl<R: Read> Reveal for &mut Package<R> {
    fn reveal<W: Write>(self, output: W) -> Result<usize> {
        if self.limit == 0 {
            return Err(Error::NullArgument("output limit must be positive"));
        }

        let stream = PixelStream::read_from(&mut self.reader)?;

        let mut text = Vec::with_capacity(stream.capacity().min(self.limit - 1));
        let mut corrupt = None;

        for (offset, chunk) in stream
            .samples()
            .chunks_exact(8)
            .take(self.limit - 1)
            .enumerate()
        {
            let mut lsbs = [0u8; 8];
            for (lsb, sample) in lsbs.iter_mut().zip(chunk) {
                *lsb = sample.value & 1;
            }

            let byte = bits::bits_to_byte(lsbs);
            if corrupt.is_none() && !is_printable(byte) {
                corrupt = Some((offset, byte));
            }
            text.push(byte);
        }

        let len = text.iter().position(|&byte| byte == 0).unwrap_or(text.len());
        debug!(
            "revealed {} characters from {} samples, message length {len}",
            text.len(),
            stream.len()
        );

        let mut output = BufWriter::new(output);
        output
            .write_all(&text[..len])
            .and_then(|()| output.flush())
            .map_err(Error::DestinationUnwritable)?;

        if let Some((offset, byte)) = corrupt {
            warn!("payload corrupted: byte {byte:#04x} at offset {offset}");
            return Err(Error::CorruptPayload { offset, byte });
        }

        Ok(len)
    }
}

impl<R: Read> Reveal for Package<R> {
    fn reveal<W: Write>(mut self, output: W) -> Result<usize> {
        (&mut self).reveal(output)
    }
}

/// Whether a revealed character can be part of a hidden message.
///
/// Whitespace includes the vertical tab, as in the C locale.
pub fn is_printable(byte: u8) -> bool {
    byte == 0
        || byte.is_ascii_alphanumeric()
        || byte.is_ascii_punctuation()
        || is_c_space(&byte)
}
