/// Splits a byte into its bits, most significant bit first.
pub fn byte_to_bits(byte: u8) -> [u8; 8] {
    let mut bits = [0u8; 8];
    for (offset, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> (7 - offset)) & 1;
    }
    bits
}

/// Joins bits, most significant bit first, into a byte.
///
/// Only the lowest bit of every element is taken into account.
pub fn bits_to_byte(bits: [u8; 8]) -> u8 {
    bits.iter().fold(0, |byte, bit| (byte << 1) | (bit & 1))
}

/// Iterates over the bits of a message, most significant bit of every byte first.
pub(super) struct Bits<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> From<&'a [u8]> for Bits<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl Iterator for Bits<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = *self.bytes.get(self.offset / 8)?;
        let bit = (byte >> (7 - self.offset % 8)) & 1;
        self.offset += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len() * 8 - self.offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits<'_> {}
