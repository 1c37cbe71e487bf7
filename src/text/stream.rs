use crate::{Error, Result};
use std::io::Read;

/// A single pixel sample together with its layout in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Sample {
    pub value: u8,
    /// Whether the source had a newline between this sample and the next one.
    pub line_break: bool,
}

/// A validated sequence of samples read from a whitespace-delimited text stream.
#[derive(Debug, Default)]
pub(super) struct PixelStream {
    samples: Vec<Sample>,
}

impl PixelStream {
    /// Reads the whole stream, validating every token.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut source = Vec::new();
        reader
            .read_to_end(&mut source)
            .map_err(Error::SourceUnreadable)?;

        Self::parse(&source)
    }

    pub fn parse(source: &[u8]) -> Result<Self> {
        let samples = Tokens::from(source)
            .enumerate()
            .map(|(position, (token, line_break))| {
                Ok(Sample {
                    value: parse_sample(position, token)?,
                    line_break,
                })
            })
            .collect::<Result<_>>()?;

        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// How many message bytes fit into the stream at one bit per sample.
    pub fn capacity(&self) -> usize {
        self.samples.len() / 8
    }
}

fn parse_sample(position: usize, token: &[u8]) -> Result<u8> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|token| token.parse::<i64>().ok())
        .and_then(|value| u8::try_from(value).ok())
        .ok_or_else(|| Error::MalformedSample {
            position,
            token: String::from_utf8_lossy(token).into_owned(),
        })
}

/// Whitespace as classified by the C locale, which unlike ASCII also includes vertical tab.
pub(super) fn is_c_space(byte: &u8) -> bool {
    byte.is_ascii_whitespace() || *byte == 0x0b
}

/// Splits text into whitespace-delimited tokens, flagging those followed by a newline.
struct Tokens<'a> {
    source: &'a [u8],
    offset: usize,
}

impl<'a> From<&'a [u8]> for Tokens<'a> {
    fn from(source: &'a [u8]) -> Self {
        Self { source, offset: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = (&'a [u8], bool);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.source[self.offset..];
        let start = rest.iter().position(|b| !is_c_space(b))?;
        let len = rest[start..]
            .iter()
            .position(is_c_space)
            .unwrap_or(rest.len() - start);
        let token = &rest[start..start + len];

        let gap = rest[start + len..]
            .iter()
            .take_while(|b| is_c_space(b))
            .count();
        let line_break = rest[start + len..start + len + gap].contains(&b'\n');

        self.offset += start + len + gap;
        Some((token, line_break))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        text::{Carrier, Package},
        Conceal, Reveal,
    };
    use std::io::Write;

    fn values(stream: &PixelStream) -> Vec<u8> {
        stream.samples().iter().map(|sample| sample.value).collect()
    }

    fn line_breaks(stream: &PixelStream) -> Vec<bool> {
        stream.samples().iter().map(|sample| sample.line_break).collect()
    }

    #[test]
    fn parses_samples_with_line_breaks() -> Result<()> {
        let stream = PixelStream::parse(b"10 20\n30 40\n")?;

        assert_eq!(values(&stream), [10, 20, 30, 40]);
        assert_eq!(line_breaks(&stream), [false, true, false, true]);

        Ok(())
    }

    #[test]
    fn finds_line_breaks_behind_other_whitespace() -> Result<()> {
        let stream = PixelStream::parse(b"  1\t2 \r\n3  \n\n 4")?;

        assert_eq!(values(&stream), [1, 2, 3, 4]);
        assert_eq!(line_breaks(&stream), [false, true, true, false]);

        Ok(())
    }

    #[test]
    fn splits_on_vertical_tab_and_form_feed() -> Result<()> {
        let stream = PixelStream::parse(b"1\x0b2\x0c3")?;

        assert_eq!(values(&stream), [1, 2, 3]);
        assert_eq!(line_breaks(&stream), [false, false, false]);

        Ok(())
    }

    #[test]
    fn accepts_signed_zero_and_bounds() -> Result<()> {
        let stream = PixelStream::parse(b"+0 -0 255 007")?;

        assert_eq!(values(&stream), [0, 0, 255, 7]);

        Ok(())
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        let err = PixelStream::parse(b"12 abc 34").unwrap_err();

        assert!(matches!(
            err,
            Error::MalformedSample { position: 1, ref token } if token == "abc"
        ));
    }

    #[test]
    fn rejects_out_of_range_tokens() {
        for source in [b"1 2 256".as_slice(), b"1 2 -1", b"1 2 99999999999999999999"] {
            assert!(matches!(
                PixelStream::parse(source),
                Err(Error::MalformedSample { position: 2, .. })
            ));
        }
    }

    #[test]
    fn computes_capacity() -> Result<()> {
        assert_eq!(PixelStream::parse(b"")?.capacity(), 0);
        assert_eq!(PixelStream::parse(b"1 2 3 4 5 6 7")?.capacity(), 0);
        assert_eq!(PixelStream::parse(b"1 2 3 4 5 6 7 8")?.capacity(), 1);
        assert_eq!(PixelStream::parse(&b"9 ".repeat(17))?.capacity(), 2);

        Ok(())
    }

    #[test]
    fn reports_unreadable_source() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken pipe"))
            }
        }

        assert!(matches!(
            PixelStream::read_from(Broken),
            Err(Error::SourceUnreadable(_))
        ));
    }

    struct Full;

    impl Write for Full {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
    }

    #[test]
    fn reports_unwritable_destination() {
        assert!(matches!(
            Carrier::new(Full).conceal(b"A", "1 2 3 4 5 6 7 8".as_bytes()),
            Err(Error::DestinationUnwritable(_))
        ));

        let package = "0 1 1 0 1 1 1 1\n0 1 1 0 1 0 1 1\n";
        assert!(matches!(
            Package::new(package.as_bytes()).reveal(Full),
            Err(Error::DestinationUnwritable(_))
        ));
    }
}
