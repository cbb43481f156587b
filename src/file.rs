//! Path-based source and sink collaborators.
//!
//! The engine itself only operates on in-memory text; these helpers cover
//! the single read or write around a parse or serialize call.

use std::fs;
use std::path::Path;

use crate::document::Document;
use crate::error::Error;
use crate::parse::Parser;

impl Parser {
    /// Reads the file at `path` and parses its contents.
    ///
    /// The file is read exactly once and its text handed to
    /// [`parse`](Self::parse).
    ///
    /// ## Errors
    ///
    /// Returns [`Error::SourceNotFound`] if the file does not exist,
    /// [`Error::Read`] for any other I/O failure, and the usual
    /// [`Error::MalformedInput`] when the contents do not parse.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Document, Error> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => self.parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::SourceNotFound(path.to_path_buf()))
            }
            Err(e) => Err(Error::Read {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

impl Document {
    /// Serializes the document and writes the text to `path`, replacing any
    /// existing contents.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Write`] if the file cannot be written.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|e| Error::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
