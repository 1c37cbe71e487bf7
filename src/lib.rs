//! # LSB Text
//!
//! The **LSB Text** library hides short text messages in plain-text pixel streams by
//! overwriting the least significant bit of every sample, and recovers them again.
//!
//! ## Text implementation
//!
//! The [`text`] module works on whitespace-delimited decimal samples in `0..=255`, keeping
//! the line layout of the cover intact. See its [documentation][`text`] for details.

use std::io;

mod error;
pub mod text;

pub use error::{Error, Result};

/// A trait for objects able to conceal steganographic messages, or carriers.
///
/// Carriers are defined by a single required method, [`conceal`][Conceal::conceal],
/// which hides the message in the given cover data.
///
/// # Examples
///
/// [`text::Carrier`] can be used to conceal secret messages in text pixel streams.
pub trait Conceal {
    /// Conceals the message in the given cover and returns how many samples were written.
    ///
    /// # Errors
    ///
    /// This function fails if the cover cannot be read or parsed, if the message does not
    /// fit into the cover, or if the output cannot be written. If an error is returned
    /// after writing started, the output is left incomplete.
    fn conceal<C: io::Read>(self, message: &[u8], cover: C) -> Result<usize>;
}

/// A trait for objects able to reveal steganographic messages, or packages.
///
/// Packages are defined by a single required method, [`reveal`][Reveal::reveal],
/// which writes the hidden message to the output.
///
/// # Examples
///
/// [`text::Package`] can be used to reveal secret messages hidden in text pixel streams.
pub trait Reveal {
    /// Writes the hidden message into `output`, returning how many bytes were written.
    ///
    /// # Errors
    ///
    /// This function fails if the package cannot be read or parsed, or if the output cannot
    /// be written. An implementation may still write a best-effort message before reporting
    /// that it is corrupt.
    fn reveal<W: io::Write>(self, output: W) -> Result<usize>;
}
