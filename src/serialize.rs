//! Rendering a [`Document`] back to INI text.

use std::fmt;

use crate::document::Document;

impl fmt::Display for Document {
    /// Renders the document as INI text.
    ///
    /// Each section is emitted as a `[name]` line followed by one
    /// `key = value` line per entry, every line terminated by `\n`, with a
    /// blank line between sections. Section and key order is unspecified
    /// but consistent within one call.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, section)) in self.sections().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{name}]")?;
            for (key, value) in section.iter() {
                writeln!(f, "{key} = {value}")?;
            }
        }
        Ok(())
    }
}
