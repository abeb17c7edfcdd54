//! POSIX shell quoting for suggested commands

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// Wrap `input` in single quotes so a POSIX shell reads it back verbatim.
///
/// Single quotes cannot appear inside a single-quoted word, so each one
/// closes the quote, emits an escaped quote and reopens: `'\''`. Works on
/// raw bytes; file names need not be UTF-8.
pub fn shell_escape_single(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + 2);
    out.push(b'\'');
    for &byte in input {
        if byte == b'\'' {
            out.extend_from_slice(b"'\\''");
        } else {
            out.push(byte);
        }
    }
    out.push(b'\'');
    out
}

/// A command line made of literal words and single-quoted arguments
///
/// Held as bytes so an argument taken from a file name is emitted exactly
/// as the filesystem stores it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ShellCommand(Vec<u8>);

impl ShellCommand {
    pub fn new(program: &str) -> Self {
        Self(program.as_bytes().to_vec())
    }

    /// Append a word that needs no quoting
    pub fn word(&mut self, word: &str) -> &mut Self {
        self.0.push(b' ');
        self.0.extend_from_slice(word.as_bytes());
        self
    }

    /// Append an argument, single-quoted
    pub fn quoted(&mut self, arg: &[u8]) -> &mut Self {
        self.0.push(b' ');
        self.0.extend_from_slice(&shell_escape_single(arg));
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for ShellCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl PartialEq<&str> for ShellCommand {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl Serialize for ShellCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
