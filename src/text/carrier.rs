use crate::{
    text::{bits::Bits, stream::PixelStream},
    Conceal, Error, Result,
};
use log::{debug, trace};
use std::io::{self, BufWriter, Read, Write};

/// A text carrier that can conceal a steganographic message.
///
/// The cover is read and validated in full before anything is written. Then, in the
/// [`conceal`][crate::Conceal::conceal] method, every sample is written to the carrier
/// writer with its least significant bit replaced by the next message bit, or cleared
/// once the message is exhausted. Samples keep the line layout of the cover, and the
/// last sample written always ends its line.
///
/// The loop is bounded by the bit budget of the cover, `8 * capacity` bits. A message
/// that uses the whole capacity stops the loop right after its last bit, so the trailing
/// samples that do not form a full byte are not written at all.
///
/// # Examples
///
/// Concealing a secret message in the supplied cover:
///
/// ```
/// use lsb_text::{text, Conceal};
///
/// let cover = "10 21 30 41\n50 61 70 81\n";
///
/// let mut package = Vec::new();
///
/// text::Carrier::new(&mut package).conceal(b"A", cover.as_bytes())?;
///
/// assert_eq!(package, b"10 21 30 40\n50 60 70 81\n");
/// # Ok::<(), lsb_text::Error>(())
/// ```
#[derive(Debug)]
pub struct Carrier<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> Carrier<W> {
    /// Creates a new [`Carrier<W>`] writing the package into the supplied writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    fn write_sample(&mut self, value: u8, end_of_line: bool) -> io::Result<()> {
        let separator = if end_of_line { '\n' } else { ' ' };
        write!(self.writer, "{value}{separator}")
    }
}

impl<W: Write> Conceal for &mut Carrier<W> {
    fn conceal<C: Read>(self, message: &[u8], cover: C) -> Result<usize> {
        let stream = PixelStream::read_from(cover)?;

        let capacity = stream.capacity();
        if message.len() > capacity {
            return Err(Error::MessageTooLong {
                len: message.len(),
                capacity,
            });
        }

        let budget = capacity * 8;
        debug!(
            "concealing {} bytes in {} samples, bit budget {budget}",
            message.len(),
            stream.len()
        );

        let mut bits = Bits::from(message);
        let mut embedded = 0usize;
        let mut samples_written = 0usize;

        let samples = stream.samples();
        for (index, sample) in samples.iter().enumerate() {
            let value = match bits.next() {
                Some(bit) => {
                    embedded += 1;
                    (sample.value & !1) | bit
                }
                None => sample.value & !1,
            };
            trace!("sample {index}: {} -> {value}", sample.value);

            let budget_spent = budget > 0 && embedded == budget;
            let last = budget_spent || index + 1 == samples.len();

            self.write_sample(value, last || sample.line_break)
                .map_err(Error::DestinationUnwritable)?;
            samples_written += 1;

            if last {
                break;
            }
        }

        if samples_written < samples.len() {
            debug!(
                "bit budget spent, dropping {} trailing samples",
                samples.len() - samples_written
            );
        }

        self.writer.flush().map_err(Error::DestinationUnwritable)?;

        Ok(samples_written)
    }
}

impl<W: Write> Conceal for Carrier<W> {
    fn conceal<C: Read>(mut self, message: &[u8], cover: C) -> Result<usize> {
        (&mut self).conceal(message, cover)
    }
}
