use std::collections::BTreeMap;

/// One variable definition: `name, variable_comment = value, value_comment`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableEntry {
    pub variable_comment: String,
    pub value: String,
    pub value_comment: String,
}

impl VariableEntry {
    pub fn new(
        variable_comment: impl Into<String>,
        value: impl Into<String>,
        value_comment: impl Into<String>,
    ) -> Self {
        Self {
            variable_comment: variable_comment.into(),
            value: value.into(),
            value_comment: value_comment.into(),
        }
    }
}

/// A named group of variables, keyed by upper-cased variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    variables: BTreeMap<String, VariableEntry>,
}

impl Section {
    #[must_use]
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            variables: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a variable by its normalized (upper-case) name.
    #[must_use]
    pub fn get(&self, variable: &str) -> Option<&VariableEntry> {
        self.variables.get(variable)
    }

    /// Variables sorted by name.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &VariableEntry)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Insert or overwrite; returns the replaced entry, if any.
    pub(crate) fn insert(&mut self, variable: String, entry: VariableEntry) -> Option<VariableEntry> {
        self.variables.insert(variable, entry)
    }

    /// Move every variable of `other` into `self`, later definitions winning.
    pub(crate) fn merge(&mut self, other: Section) {
        self.variables.extend(other.variables);
    }
}
