//! Record dump backend
//!
//! Prints every class and def in the keeper in source-like form. This is the
//! default action; it exists for inspecting what the resolver actually built.

use std::io::Write;

use super::Backend;
use crate::common::CompileResult;
use crate::records::{Record, RecordKeeper};

/// Backend dumping the whole record keeper
#[derive(Default)]
pub struct PrintRecordsBackend;

impl PrintRecordsBackend {
    pub fn new() -> Self {
        Self
    }

    fn print_record(
        &self,
        keyword: &str,
        record: &Record,
        out: &mut dyn Write,
    ) -> CompileResult<()> {
        write!(out, "{} {} {{", keyword, record.name())?;
        if !record.superclasses().is_empty() {
            write!(out, "\t// {}", record.superclasses().join(" "))?;
        }
        writeln!(out)?;

        for (field, value) in record.fields() {
            writeln!(out, "  {} {} = {};", value.ty(), field, value)?;
        }
        writeln!(out, "}}")?;
        Ok(())
    }
}

impl Backend for PrintRecordsBackend {
    fn name(&self) -> &'static str {
        "print-records"
    }

    fn description(&self) -> &'static str {
        "Print all records to stdout (default)"
    }

    fn run(&self, records: &RecordKeeper, out: &mut dyn Write) -> CompileResult<()> {
        writeln!(out, "------------- Classes -----------------")?;
        for class in records.classes() {
            self.print_record("class", class, out)?;
        }

        writeln!(out, "------------- Defs -----------------")?;
        for def in records.defs() {
            self.print_record("def", def, out)?;
        }
        Ok(())
    }
}
