//! Line-oriented parsing of INI text into a [`Document`].

use std::str::FromStr;

use crate::document::Document;
use crate::error::{Error, MalformedKind};

/// Characters that strict mode bans from section names, keys, and values.
const RESERVED: [char; 4] = [';', '=', '[', ']'];

/// Validation policy applied while parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Reject malformed or ambiguous lines as [`Error::MalformedInput`].
    ///
    /// A section header must be exactly `[name]` after trimming, an entry
    /// must contain exactly one `=`, and names and values must be non-empty
    /// and free of the reserved characters `;`, `=`, `[`, `]`.
    #[default]
    Strict,

    /// Tolerate the legacy dialect: reserved characters are allowed
    /// anywhere, entries split on the first `=`, values may be empty, and a
    /// header is recognized by the first `[name]` pattern found on the
    /// line, even with text around it.
    ///
    /// Entries with no `=` at all, empty keys, empty section names, and
    /// entries before the first header are still rejected.
    Lenient,
}

/// Parse position within the line stream.
#[derive(Debug)]
enum State {
    Start,
    InSection(String),
}

/// The parse engine.
///
/// The parser holds only its [`Mode`]; it keeps no state across calls and
/// never retains the documents it returns.
///
/// ## Example
///
/// ```
/// use inikit::Parser;
///
/// let doc = Parser::new().parse("[owner]\nname = John Doe\n")?;
/// assert_eq!(doc.get("owner", "name")?, "John Doe");
/// # Ok::<(), inikit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    mode: Mode,
}

impl Parser {
    /// Creates a parser in [`Mode::Strict`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the validation mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Parses INI text into a [`Document`].
    ///
    /// Input is processed line by line. Blank lines and lines whose first
    /// non-whitespace character is `;` are skipped; everything else must be
    /// a section header or a `key = value` entry under the current section.
    /// A key repeated within one section keeps the last value; a repeated
    /// section header switches back to the existing section.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::MalformedInput`] on the first line that violates
    /// the active [`Mode`], carrying the 1-based line number and the
    /// offending text. No partial document is returned.
    pub fn parse(&self, text: &str) -> Result<Document, Error> {
        let mut doc = Document::new();
        let mut state = State::Start;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            match self.classify(line).map_err(|kind| malformed(index, line, kind))? {
                LineKind::Header(name) => {
                    doc.add_section(name.clone());
                    state = State::InSection(name);
                }
                LineKind::Entry(key, value) => match state {
                    State::Start => {
                        return Err(malformed(index, line, MalformedKind::EntryOutsideSection));
                    }
                    State::InSection(ref name) => doc.set(name.as_str(), key, value),
                },
            }
        }

        Ok(doc)
    }

    fn classify(&self, line: &str) -> Result<LineKind, MalformedKind> {
        if let Some(name) = self.header(line)? {
            return Ok(LineKind::Header(name.to_owned()));
        }
        let (key, value) = self.entry(line)?;
        Ok(LineKind::Entry(key, value))
    }

    /// Recognizes a section header, returning `Ok(None)` for lines that
    /// are not header candidates at all.
    fn header<'a>(&self, line: &'a str) -> Result<Option<&'a str>, MalformedKind> {
        let interior = match self.mode {
            Mode::Strict => {
                if !line.starts_with('[') {
                    return Ok(None);
                }
                line.strip_prefix('[')
                    .and_then(|rest| rest.strip_suffix(']'))
                    .ok_or(MalformedKind::UnterminatedHeader)?
            }
            Mode::Lenient => {
                // Legacy recognition: the first [...] pattern anywhere on
                // the line names the section.
                let Some(open) = line.find('[') else {
                    return Ok(None);
                };
                let Some(offset) = line[open + 1..].find(']') else {
                    return Ok(None);
                };
                &line[open + 1..open + 1 + offset]
            }
        };

        let name = interior.trim();
        if name.is_empty() {
            return Err(MalformedKind::EmptySectionName);
        }
        if self.mode == Mode::Strict && name.chars().any(|c| RESERVED.contains(&c)) {
            return Err(MalformedKind::ReservedCharacter);
        }
        Ok(Some(name))
    }

    /// Splits an entry line into its key and value.
    fn entry(&self, line: &str) -> Result<(String, String), MalformedKind> {
        let (key, value) = line
            .split_once('=')
            .ok_or(MalformedKind::MissingAssignment)?;

        if self.mode == Mode::Strict && value.contains('=') {
            return Err(MalformedKind::RepeatedAssignment);
        }

        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(MalformedKind::EmptyKey);
        }

        if self.mode == Mode::Strict {
            if value.is_empty() {
                return Err(MalformedKind::EmptyValue);
            }
            if key
                .chars()
                .chain(value.chars())
                .any(|c| RESERVED.contains(&c))
            {
                return Err(MalformedKind::ReservedCharacter);
            }
        }

        Ok((key.to_owned(), value.to_owned()))
    }
}

#[derive(Debug)]
enum LineKind {
    Header(String),
    Entry(String, String),
}

fn malformed(index: usize, line: &str, kind: MalformedKind) -> Error {
    Error::MalformedInput {
        line: index + 1,
        text: line.to_owned(),
        kind,
    }
}

impl FromStr for Document {
    type Err = Error;

    /// Parses INI text in [`Mode::Strict`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::new().parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "; last modified 1 April 2001 by John Doe\n\
                             [owner]\n\
                             name = John Doe\n\
                             organization = Acme Widgets Inc.\n\
                             \n\
                             [database]\n\
                             ; use IP address in case network name resolution is not working\n\
                             server = 192.0.2.62     \n\
                             port = 143\n\
                             file = \"payroll.dat\"\n";

    fn strict() -> Parser {
        Parser::new()
    }

    fn lenient() -> Parser {
        Parser::new().with_mode(Mode::Lenient)
    }

    fn kind_of(err: Error) -> MalformedKind {
        match err {
            Error::MalformedInput { kind, .. } => kind,
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn parses_reference_document() {
        let doc = strict().parse(REFERENCE).unwrap();

        let mut names = doc.section_names();
        names.sort_unstable();
        assert_eq!(names, vec!["database", "owner"]);

        assert_eq!(doc.get("owner", "name").unwrap(), "John Doe");
        assert_eq!(
            doc.get("owner", "organization").unwrap(),
            "Acme Widgets Inc."
        );
        assert_eq!(doc.get("database", "server").unwrap(), "192.0.2.62");
        assert_eq!(doc.get("database", "port").unwrap(), "143");
        assert_eq!(doc.get("database", "file").unwrap(), "\"payroll.dat\"");
    }

    #[test]
    fn empty_input_yields_empty_document() {
        assert!(strict().parse("").unwrap().is_empty());
    }

    #[test]
    fn comments_and_blank_lines_yield_empty_document() {
        let text = "; a comment\n\n   \n;[not] = a section\n";
        assert!(strict().parse(text).unwrap().is_empty());
    }

    #[test]
    fn whitespace_around_tokens_is_insignificant() {
        let doc = strict().parse("  [ owner ]  \n   name   =   John Doe  \n").unwrap();
        assert_eq!(doc.get("owner", "name").unwrap(), "John Doe");
    }

    #[test]
    fn crlf_line_endings_parse() {
        let doc = strict().parse("[s]\r\nk = v\r\n").unwrap();
        assert_eq!(doc.get("s", "k").unwrap(), "v");
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let doc = strict().parse("[s]\nk = a\nk = b\n").unwrap();
        assert_eq!(doc.get("s", "k").unwrap(), "b");
    }

    #[test]
    fn repeated_section_header_merges_entries() {
        let doc = strict().parse("[s]\na = 1\n[t]\nb = 2\n[s]\nc = 3\n").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.get("s", "a").unwrap(), "1");
        assert_eq!(doc.get("s", "c").unwrap(), "3");
    }

    #[test]
    fn header_alone_creates_empty_section() {
        let doc = strict().parse("[empty]\n").unwrap();
        assert!(doc.section("empty").is_some_and(|s| s.is_empty()));
    }

    #[test]
    fn rejects_reserved_character_in_header() {
        let err = strict().parse("[1234.9;890]\n").unwrap_err();
        assert_eq!(kind_of(err), MalformedKind::ReservedCharacter);
    }

    #[test]
    fn rejects_repeated_assignment() {
        let err = strict().parse("[s]\nserv==er = value\n").unwrap_err();
        assert_eq!(kind_of(err), MalformedKind::RepeatedAssignment);
    }

    #[test]
    fn rejects_empty_value() {
        let err = strict().parse("[s]\nport =\n").unwrap_err();
        assert_eq!(kind_of(err), MalformedKind::EmptyValue);
    }

    #[test]
    fn rejects_empty_section_name_in_both_modes() {
        for parser in [strict(), lenient()] {
            let err = parser.parse("[]\n").unwrap_err();
            assert_eq!(kind_of(err), MalformedKind::EmptySectionName);
        }
    }

    #[test]
    fn rejects_entry_with_no_assignment_in_both_modes() {
        for parser in [strict(), lenient()] {
            let err = parser.parse("[s]\nname  John Doe\n").unwrap_err();
            assert_eq!(kind_of(err), MalformedKind::MissingAssignment);
        }
    }

    #[test]
    fn rejects_empty_key_in_both_modes() {
        for parser in [strict(), lenient()] {
            let err = parser.parse("[s]\n= value\n").unwrap_err();
            assert_eq!(kind_of(err), MalformedKind::EmptyKey);
        }
    }

    #[test]
    fn rejects_entry_before_any_section_in_both_modes() {
        for parser in [strict(), lenient()] {
            let err = parser.parse("key = value\n[s]\n").unwrap_err();
            assert_eq!(kind_of(err), MalformedKind::EntryOutsideSection);
        }
    }

    #[test]
    fn rejects_reserved_character_in_value() {
        let err = strict().parse("[s]\nkey = a;b\n").unwrap_err();
        assert_eq!(kind_of(err), MalformedKind::ReservedCharacter);
    }

    #[test]
    fn rejects_header_with_trailing_text() {
        let err = strict().parse("[s] junk\n").unwrap_err();
        assert_eq!(kind_of(err), MalformedKind::UnterminatedHeader);

        let err = strict().parse("[s\n").unwrap_err();
        assert_eq!(kind_of(err), MalformedKind::UnterminatedHeader);
    }

    #[test]
    fn error_reports_offending_line() {
        let err = strict().parse("[s]\nk = v\nbroken\n").unwrap_err();
        match err {
            Error::MalformedInput { line, text, kind } => {
                assert_eq!(line, 3);
                assert_eq!(text, "broken");
                assert_eq!(kind, MalformedKind::MissingAssignment);
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn lenient_allows_reserved_characters_in_values() {
        let doc = lenient().parse("[s]\nkey = a;b=c\n").unwrap();
        assert_eq!(doc.get("s", "key").unwrap(), "a;b=c");
    }

    #[test]
    fn lenient_allows_empty_values() {
        let doc = lenient().parse("[s]\nport =\n").unwrap();
        assert_eq!(doc.get("s", "port").unwrap(), "");
    }

    #[test]
    fn lenient_recognizes_header_by_pattern() {
        let doc = lenient().parse("[s] trailing text\nk = v\n").unwrap();
        assert_eq!(doc.get("s", "k").unwrap(), "v");
    }

    #[test]
    fn from_str_parses_strictly() {
        let doc: Document = "[owner]\nname = John Doe\n".parse().unwrap();
        assert_eq!(doc.get("owner", "name").unwrap(), "John Doe");

        assert!("[s]\nport =\n".parse::<Document>().is_err());
    }
}
