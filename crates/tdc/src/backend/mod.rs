//! Backend trait and implementations
//!
//! A backend walks the populated record keeper and writes one textual
//! artifact to the output sink. Backends never mutate the keeper.

pub mod print;
pub mod ssh;

use std::io::Write;

use crate::common::CompileResult;
use crate::records::RecordKeeper;

pub use print::PrintRecordsBackend;
pub use ssh::SshConfigBackend;

/// Trait for record-emission backends
pub trait Backend: Send + Sync {
    /// Action name used to select this backend (e.g. "ssh-config")
    fn name(&self) -> &'static str;

    /// One-line description of what this backend produces
    fn description(&self) -> &'static str;

    /// Walk the records and write the artifact to `out`
    fn run(&self, records: &RecordKeeper, out: &mut dyn Write) -> CompileResult<()>;
}

/// Registry of available backends, looked up by action name
pub struct BackendRegistry {
    backends: Vec<Box<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self { backends: Vec::new() }
    }

    pub fn register(&mut self, backend: Box<dyn Backend>) {
        self.backends.push(backend);
    }

    pub fn find_by_name(&self, name: &str) -> Option<&dyn Backend> {
        self.backends.iter()
            .find(|b| b.name() == name)
            .map(|b| b.as_ref())
    }

    /// The first registered backend
    pub fn default_backend(&self) -> Option<&dyn Backend> {
        self.backends.first().map(|b| b.as_ref())
    }

    pub fn list(&self) -> impl Iterator<Item = &dyn Backend> {
        self.backends.iter().map(|b| b.as_ref())
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let mut registry = BackendRegistry::new();
        registry.register(Box::new(PrintRecordsBackend::new()));
        registry.register(Box::new(SshConfigBackend::new()));

        assert_eq!(registry.default_backend().unwrap().name(), "print-records");
        assert_eq!(
            registry.find_by_name("ssh-config").unwrap().name(),
            "ssh-config"
        );
        assert!(registry.find_by_name("missing").is_none());
        assert_eq!(registry.list().count(), 2);
    }
}
