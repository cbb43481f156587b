//! In-memory model for parsed INI data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A named group of `key = value` entries.
///
/// Sections are read through shared references; all mutation goes through
/// the owning [`Document`] so the name and key uniqueness invariants hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Section {
    entries: HashMap<String, String>,
}

impl Section {
    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Iterates over the key names in this section, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(key, value)` pairs, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of entries in this section.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this section holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.entries.insert(key, value);
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        self.entries.get_mut(key)
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

/// The full in-memory representation of an INI file's sections and entries.
///
/// A document maps unique section names to [`Section`]s, each of which maps
/// unique key names to string values. Iteration order is unspecified.
/// Section names, keys, and values are opaque strings; nothing is coerced
/// or unquoted. A value such as `"payroll.dat"` keeps its literal quotes.
///
/// Cloning a document yields a fully independent snapshot.
///
/// ## Example
///
/// ```
/// use inikit::Document;
///
/// let mut doc = Document::new();
/// doc.set("database", "port", "143");
/// doc.set("database", "server", "192.0.2.62");
///
/// assert_eq!(doc.get("database", "port")?, "143");
/// assert!(doc.get("database", "missing").is_err());
/// # Ok::<(), inikit::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sections: HashMap<String, Section>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all section names, in unspecified order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }

    /// Iterates over `(name, section)` pairs, in unspecified order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Returns the section named `name`, if present.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Returns the number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the document holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the value stored under `key` in `section`.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::NotFound`] if the section or the key is absent.
    pub fn get(&self, section: &str, key: &str) -> Result<&str, Error> {
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .ok_or_else(|| Error::NotFound {
                section: section.to_owned(),
                key: key.to_owned(),
            })
    }

    /// Stores `value` under `key` in `section`, creating the section and
    /// the key as needed and overwriting any previous value.
    ///
    /// Names and values are stored verbatim. Text serialized from names
    /// containing the reserved characters `;`, `=`, `[`, or `]` will not
    /// re-parse in strict mode.
    pub fn set(
        &mut self,
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Overwrites the value of an existing entry.
    ///
    /// Unlike [`set`](Self::set), this never creates sections or keys.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::NotFound`] if the section or the key is absent.
    pub fn update(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        let slot = self
            .sections
            .get_mut(section)
            .and_then(|s| s.get_mut(key))
            .ok_or_else(|| Error::NotFound {
                section: section.to_owned(),
                key: key.to_owned(),
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Adds an empty section named `name` if it does not already exist.
    pub fn add_section(&mut self, name: impl Into<String>) {
        self.sections.entry(name.into()).or_default();
    }

    /// Removes the entry under `key` in `section`, returning its value.
    ///
    /// The section itself is kept, even when this removes its last entry.
    pub fn remove(&mut self, section: &str, key: &str) -> Option<String> {
        self.sections.get_mut(section)?.remove(key)
    }

    /// Removes the section named `name` and all of its entries.
    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.remove(name)
    }
}
