//! Record store: named, typed, inheritance-resolved definitions
//!
//! This is the shared representation between the frontend and the backends.
//! The resolver fully populates a [`RecordKeeper`] before any backend runs;
//! backends only read from it.
//!
//! Every field always holds a value. "Not provided" is expressed through a
//! per-type unset sentinel (`-1` for integers, `""` for strings, `[]` for
//! string lists), and backends decide what unset means for their output.

use std::collections::HashMap;
use std::fmt;

/// Unset sentinel for integer fields
pub const UNSET_INT: i64 = -1;

/// Static type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Int,
    Str,
    StrList,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => write!(f, "int"),
            FieldType::Str => write!(f, "string"),
            FieldType::StrList => write!(f, "list<string>"),
        }
    }
}

/// A typed field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Str(String),
    StrList(Vec<String>),
}

impl FieldValue {
    /// The unset sentinel for `ty`
    pub fn unset(ty: FieldType) -> Self {
        match ty {
            FieldType::Int => FieldValue::Int(UNSET_INT),
            FieldType::Str => FieldValue::Str(String::new()),
            FieldType::StrList => FieldValue::StrList(Vec::new()),
        }
    }

    pub fn ty(&self) -> FieldType {
        match self {
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Str(_) => FieldType::Str,
            FieldValue::StrList(_) => FieldType::StrList,
        }
    }

    pub fn is_unset(&self) -> bool {
        match self {
            FieldValue::Int(v) => *v == UNSET_INT,
            FieldValue::Str(s) => s.is_empty(),
            FieldValue::StrList(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for FieldValue {
    /// Source-form rendering (strings re-quoted), used by the record dump
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Str(s) => write_quoted(f, s),
            FieldValue::StrList(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, item)?;
                }
                write!(f, "]")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

/// A named, typed record with inheritance-resolved fields
///
/// Fields are kept in declaration order (parent fields first), which is the
/// order the record dump prints them in.
#[derive(Debug, Clone)]
pub struct Record {
    name: String,
    superclasses: Vec<String>,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            superclasses: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transitive superclass names, nearest parent first
    pub fn superclasses(&self) -> &[String] {
        &self.superclasses
    }

    pub fn is_subclass_of(&self, class: &str) -> bool {
        self.superclasses.iter().any(|c| c == class)
    }

    /// Record a superclass tag; duplicates (diamond inheritance) are kept once
    pub fn add_superclass(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.is_subclass_of(&name) {
            self.superclasses.push(name);
        }
    }

    /// Append a field. The caller is responsible for name uniqueness.
    pub fn add_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    /// Overwrite an existing field, keeping its position
    pub fn set_value(&mut self, field: &str, value: FieldValue) -> Result<(), String> {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => {
                *slot = value;
                Ok(())
            }
            None => Err(format!("no field '{}' in '{}'", field, self.name)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Integer value of `field`, or [`UNSET_INT`] if absent or not an int
    pub fn value_as_int(&self, field: &str) -> i64 {
        match self.get(field) {
            Some(FieldValue::Int(v)) => *v,
            _ => UNSET_INT,
        }
    }

    /// String value of `field`, or `""` if absent or not a string
    pub fn value_as_str(&self, field: &str) -> &str {
        match self.get(field) {
            Some(FieldValue::Str(s)) => s,
            _ => "",
        }
    }

    /// String-list value of `field`, or `[]` if absent or not a list
    pub fn value_as_str_list(&self, field: &str) -> &[String] {
        match self.get(field) {
            Some(FieldValue::StrList(items)) => items,
            _ => &[],
        }
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// The record store: every class and def, in definition order
#[derive(Debug, Default)]
pub struct RecordKeeper {
    classes: Vec<Record>,
    class_index: HashMap<String, usize>,
    defs: Vec<Record>,
    def_index: HashMap<String, usize>,
}

impl RecordKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, record: Record) -> Result<(), String> {
        if self.class_index.contains_key(record.name()) {
            return Err(format!("redefinition of class '{}'", record.name()));
        }
        self.class_index
            .insert(record.name().to_string(), self.classes.len());
        self.classes.push(record);
        Ok(())
    }

    pub fn add_def(&mut self, record: Record) -> Result<(), String> {
        if self.def_index.contains_key(record.name()) {
            return Err(format!("redefinition of def '{}'", record.name()));
        }
        self.def_index
            .insert(record.name().to_string(), self.defs.len());
        self.defs.push(record);
        Ok(())
    }

    pub fn class(&self, name: &str) -> Option<&Record> {
        self.class_index.get(name).map(|&i| &self.classes[i])
    }

    pub fn def(&self, name: &str) -> Option<&Record> {
        self.def_index.get(name).map(|&i| &self.defs[i])
    }

    /// All classes in definition order
    pub fn classes(&self) -> &[Record] {
        &self.classes
    }

    /// All defs in definition order
    pub fn defs(&self) -> &[Record] {
        &self.defs
    }

    /// Every def whose superclass set contains `class`, in definition order.
    ///
    /// The order is part of the output contract of the backends; no sorting.
    pub fn all_derived_definitions(&self, class: &str) -> Vec<&Record> {
        self.defs
            .iter()
            .filter(|def| def.is_subclass_of(class))
            .collect()
    }
}
