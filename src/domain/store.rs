//! In-memory configuration store: load, typed queries and section cursor.
//!
//! A store is filled from a [`LineSource`] and answers lookups by
//! `(variable, section)`. Names are matched case-insensitively. Variables
//! declared before any `[section]` header live in the default section
//! ([`DEFAULT_SECTION`] unless configured otherwise).
//!
//! ```
//! use confdata::domain::store::ConfigStore;
//!
//! let store: ConfigStore = "\
//! baseline, baseline between receivers = 13.434510, kilometers
//! [ONSA]
//! staX, X station coordinate = 3370658.5419, meters
//! "
//! .parse()
//! .unwrap();
//!
//! assert_eq!(store.get_value("baseline").unwrap(), "13.434510");
//! assert_eq!(store.get_value_description("baseline").unwrap(), "kilometers");
//! assert_eq!(store.get_value_as_double(("staX", "ONSA")).unwrap(), 3370658.5419);
//! assert_eq!(&store[("stax", "onsa")], "3370658.5419");
//! ```

use std::collections::HashMap;
use std::io::Read;
use std::ops::Index;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info, trace, warn};

use crate::adapters::reader_line_source::ReaderLineSource;
use crate::adapters::str_line_source::StrLineSource;
use crate::domain::error::ConfigFileError;
use crate::domain::line::{self, Line};
use crate::domain::name::{self, DEFAULT_SECTION};
use crate::domain::section::{Section, VariableEntry};
use crate::domain::value;
use crate::ports::config_port::ConfigPort;
use crate::ports::line_source::LineSource;

/// A variable reference: a bare name (default section) or a
/// `(variable, section)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarRef<'a> {
    pub variable: &'a str,
    pub section: Option<&'a str>,
}

impl<'a> From<&'a str> for VarRef<'a> {
    fn from(variable: &'a str) -> Self {
        Self {
            variable,
            section: None,
        }
    }
}

impl<'a> From<&'a String> for VarRef<'a> {
    fn from(variable: &'a String) -> Self {
        Self::from(variable.as_str())
    }
}

impl<'a> From<(&'a str, &'a str)> for VarRef<'a> {
    fn from((variable, section): (&'a str, &'a str)) -> Self {
        Self {
            variable,
            section: Some(section),
        }
    }
}

/// Normalized lookup key.
struct Key {
    section: String,
    variable: String,
}

impl Key {
    fn not_found(self) -> ConfigFileError {
        ConfigFileError::NotFound {
            section: self.section,
            variable: self.variable,
        }
    }
}

/// Sections in first-seen order with a name index.
#[derive(Debug, Clone, Default)]
struct SectionTable {
    sections: Vec<Section>,
    index: HashMap<String, usize>,
}

impl SectionTable {
    fn get(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&i| &self.sections[i])
    }

    /// Position of `name`, appending an empty section if it is new.
    fn position_or_insert(&mut self, name: String) -> (usize, bool) {
        if let Some(&i) = self.index.get(&name) {
            return (i, false);
        }
        let i = self.sections.len();
        self.index.insert(name.clone(), i);
        self.sections.push(Section::new(name));
        (i, true)
    }

    fn merge(&mut self, other: SectionTable) {
        for section in other.sections {
            let (i, _) = self.position_or_insert(section.name().to_string());
            self.sections[i].merge(section);
        }
    }

    fn variable_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    fn clear(&mut self) {
        self.sections.clear();
        self.index.clear();
    }
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    table: SectionTable,
    default_section: String,
    exception_on_missing: bool,
    cursor: usize,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// An empty store using `DEFAULT` as default section, failing on missing
    /// variables.
    pub fn new() -> Self {
        Self {
            table: SectionTable::default(),
            default_section: DEFAULT_SECTION.to_string(),
            exception_on_missing: true,
            cursor: 0,
        }
    }

    /// An empty store whose default section is `name` instead of `DEFAULT`.
    pub fn with_default_section(name: &str) -> Result<Self, ConfigFileError> {
        let default_section =
            name::normalize_valid(name).ok_or_else(|| ConfigFileError::InvalidSectionName {
                line: 0,
                name: name.to_string(),
            })?;
        Ok(Self {
            default_section,
            ..Self::new()
        })
    }

    /// Open `path` and load it into a new store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ConfigFileError> {
        let mut store = Self::new();
        store.load_path(path)?;
        Ok(store)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigFileError> {
        let mut store = Self::new();
        store.load(ReaderLineSource::from_reader("<reader>", reader))?;
        Ok(store)
    }

    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigFileError> {
        let path = path.as_ref();
        let source =
            ReaderLineSource::open(path).map_err(|e| ConfigFileError::SourceUnreadable {
                origin: path.display().to_string(),
                source: e,
            })?;
        self.load(source)
    }

    pub fn load_str(&mut self, text: &str) -> Result<(), ConfigFileError> {
        self.load(StrLineSource::new(text))
    }

    /// Consume `source` and merge its definitions into the store.
    ///
    /// Loading is all-or-nothing: the first malformed line or read error
    /// aborts the load and leaves the store untouched. On success, sections
    /// already present are extended and variables defined again are
    /// overwritten.
    pub fn load<S: LineSource>(&mut self, mut source: S) -> Result<(), ConfigFileError> {
        let mut staged = SectionTable::default();
        let mut current: Option<usize> = None;
        let mut line_no = 0;

        while let Some(next) = source.next_line() {
            line_no += 1;
            let text = next.map_err(|e| ConfigFileError::SourceUnreadable {
                origin: source.origin().to_string(),
                source: e,
            })?;

            match line::parse_line(&text, line_no)? {
                Line::Blank => {}
                Line::Section(name) => {
                    let (i, created) = staged.position_or_insert(name);
                    if created {
                        debug!(section = %staged.sections[i].name(), line = line_no, "section opened");
                    } else {
                        debug!(section = %staged.sections[i].name(), line = line_no, "section reopened");
                    }
                    current = Some(i);
                }
                Line::Variable { name, entry } => {
                    let i = match current {
                        Some(i) => i,
                        None => {
                            let (i, _) = staged.position_or_insert(self.default_section.clone());
                            current = Some(i);
                            i
                        }
                    };
                    let section = &mut staged.sections[i];
                    trace!(section = %section.name(), variable = %name, value = %entry.value, "variable");
                    if let Some(previous) = section.insert(name.clone(), entry) {
                        warn!(
                            origin = %source.origin(),
                            section = %section.name(),
                            variable = %name,
                            previous = %previous.value,
                            line = line_no,
                            "variable redefined, keeping last value"
                        );
                    }
                }
            }
        }

        info!(
            origin = %source.origin(),
            sections = staged.sections.len(),
            variables = staged.variable_count(),
            lines = line_no,
            "configuration loaded"
        );
        self.table.merge(staged);
        Ok(())
    }

    fn key(&self, var: VarRef<'_>) -> Key {
        Key {
            section: var
                .section
                .map_or_else(|| self.default_section.clone(), name::normalize),
            variable: name::normalize(var.variable),
        }
    }

    fn find(&self, key: &Key) -> Option<&VariableEntry> {
        self.table.get(&key.section)?.get(&key.variable)
    }

    /// `Ok(None)` means the variable is missing and missing variables are
    /// not errors on this store.
    fn lookup(&self, key: Key) -> Result<Option<&VariableEntry>, ConfigFileError> {
        match self.find(&key) {
            Some(entry) => Ok(Some(entry)),
            None if self.exception_on_missing => Err(key.not_found()),
            None => Ok(None),
        }
    }

    fn lookup_field<'a>(
        &self,
        var: impl Into<VarRef<'a>>,
        field: impl Fn(&VariableEntry) -> &String,
    ) -> Result<String, ConfigFileError> {
        let entry = self.lookup(self.key(var.into()))?;
        Ok(entry.map(|e| field(e).clone()).unwrap_or_default())
    }

    fn lookup_number<'a, T: Default>(
        &self,
        var: impl Into<VarRef<'a>>,
        target: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, ConfigFileError> {
        let key = self.key(var.into());
        let entry = match self.find(&key) {
            Some(entry) => entry,
            None if self.exception_on_missing => return Err(key.not_found()),
            None => return Ok(T::default()),
        };
        parse(&entry.value).ok_or_else(|| ConfigFileError::NumberFormat {
            section: key.section,
            variable: key.variable,
            value: entry.value.clone(),
            target,
        })
    }

    /// Raw value text of a variable.
    pub fn get_value<'a>(&self, var: impl Into<VarRef<'a>>) -> Result<String, ConfigFileError> {
        self.lookup_field(var, |e| &e.value)
    }

    pub fn get_value_as_int<'a>(&self, var: impl Into<VarRef<'a>>) -> Result<i64, ConfigFileError> {
        self.lookup_number(var, "integer", value::parse_int)
    }

    pub fn get_value_as_double<'a>(
        &self,
        var: impl Into<VarRef<'a>>,
    ) -> Result<f64, ConfigFileError> {
        self.lookup_number(var, "double", value::parse_double)
    }

    /// True when the value is one of `true`, `t`, `yes`, `y` or `1` (any case).
    pub fn get_value_as_bool<'a>(&self, var: impl Into<VarRef<'a>>) -> Result<bool, ConfigFileError> {
        let entry = self.lookup(self.key(var.into()))?;
        Ok(entry.is_some_and(|e| value::as_bool(&e.value)))
    }

    pub fn get_variable_description<'a>(
        &self,
        var: impl Into<VarRef<'a>>,
    ) -> Result<String, ConfigFileError> {
        self.lookup_field(var, |e| &e.variable_comment)
    }

    pub fn get_value_description<'a>(
        &self,
        var: impl Into<VarRef<'a>>,
    ) -> Result<String, ConfigFileError> {
        self.lookup_field(var, |e| &e.value_comment)
    }

    /// Whether missing sections or variables are reported as
    /// [`ConfigFileError::NotFound`] (the default) or answered with an empty
    /// string, zero or `false`. Number format errors are always reported.
    pub fn set_exception_on_missing(&mut self, enabled: bool) -> &mut Self {
        self.exception_on_missing = enabled;
        self
    }

    #[must_use]
    pub fn exception_on_missing(&self) -> bool {
        self.exception_on_missing
    }

    #[must_use]
    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// Drop every section and rewind the section cursor.
    pub fn clear(&mut self) -> &mut Self {
        self.table.clear();
        self.cursor = 0;
        self
    }

    /// Next section name in first-seen order, or `None` once all have been
    /// produced. Call [`reset_section_cursor`](Self::reset_section_cursor) to
    /// start over.
    pub fn next_section_name(&mut self) -> Option<String> {
        let section = self.table.sections.get(self.cursor)?;
        self.cursor += 1;
        Some(section.name().to_string())
    }

    pub fn reset_section_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Section names in first-seen order. Independent of the section cursor.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.table.sections.iter().map(Section::name)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.table.get(&name::normalize(name))
    }

    pub fn contains<'a>(&self, var: impl Into<VarRef<'a>>) -> bool {
        self.find(&self.key(var.into())).is_some()
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.sections.is_empty()
    }

    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.table.variable_count()
    }

    fn index_value(&self, var: VarRef<'_>) -> &str {
        match self.lookup(self.key(var)) {
            Ok(Some(entry)) => &entry.value,
            Ok(None) => "",
            Err(e) => panic!("{e}"),
        }
    }
}

impl FromStr for ConfigStore {
    type Err = ConfigFileError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut store = Self::new();
        store.load_str(text)?;
        Ok(store)
    }
}

/// `store["var"]` is shorthand for `get_value("var")`.
///
/// # Panics
///
/// Panics if the variable is missing and the store reports missing variables.
impl Index<&str> for ConfigStore {
    type Output = str;

    fn index(&self, variable: &str) -> &str {
        self.index_value(variable.into())
    }
}

/// `store[("var", "SECTION")]` is shorthand for `get_value(("var", "SECTION"))`.
///
/// # Panics
///
/// Panics if the variable is missing and the store reports missing variables.
impl Index<(&str, &str)> for ConfigStore {
    type Output = str;

    fn index(&self, (variable, section): (&str, &str)) -> &str {
        self.index_value(VarRef {
            variable,
            section: Some(section),
        })
    }
}

impl ConfigPort for ConfigStore {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        let var = VarRef {
            variable: key,
            section: Some(section),
        };
        self.find(&self.key(var)).map(|e| e.value.clone())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.get_string(section, key)
            .and_then(|v| value::parse_int(&v))
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.get_string(section, key)
            .and_then(|v| value::parse_double(&v))
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.get_string(section, key)
            .and_then(|v| value::parse_bool(&v))
            .unwrap_or(default)
    }
}
