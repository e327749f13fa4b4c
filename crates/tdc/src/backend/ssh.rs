//! SSH config backend
//!
//! Walks every def deriving from the `SSH` class and renders a global
//! ssh_config: a fixed banner, a `Host *` block taken from the `Common` def,
//! then one block per host in definition order. A field line is only written
//! when the field holds something other than its unset sentinel, and values
//! pass through verbatim.

use std::io::Write;

use super::Backend;
use crate::common::CompileResult;
use crate::records::{FieldType, Record, RecordKeeper, UNSET_INT};

/// Class tag selecting the defs this backend renders
const SSH_CLASS: &str = "SSH";

/// The distinguished def applied to every host via `Host *`
const COMMON_DEF: &str = "Common";

/// Recognized config fields, in the order they appear in each emitted block.
/// Lists never go through this table; `Aliases` is rendered on the Host line.
const FIELD_ORDER: &[(&str, FieldType)] = &[
    ("User", FieldType::Str),
    ("HostName", FieldType::Str),
    ("Port", FieldType::Int),
    ("IdentityFile", FieldType::Str),
    ("ProxyCommand", FieldType::Str),
    ("PreferredAuthentications", FieldType::Str),
    ("Compression", FieldType::Str),
    ("ServerAliveInterval", FieldType::Int),
];

const HEADER: &str = "\
######################################
#         mmmm   mmmm  m    m        #
#        #\"   \" #\"   \" #    #        #
#        \"#mmm  \"#mmm  #mmmm#        #
#            \"#     \"# #    #        #
#        \"mmm#\" \"mmm#\" #    #        #
#                                    #
#          Global SSH Config         #
# (tdc-generated file, do not edit!) #
#        (Edit ssh.td instead)       #
######################################
";

const COMMON_BANNER: &str = "\
######################################
##              Common              ##
######################################
";

const HOST_BANNER: &str = "\
######################################
##           Host Configs           ##
######################################
";

/// Backend emitting a global ssh_config
#[derive(Default)]
pub struct SshConfigBackend;

impl SshConfigBackend {
    pub fn new() -> Self {
        Self
    }

    /// Emit one config block. `print_host` selects the `Host <name> <aliases>`
    /// line; the Common block gets its `Host *` line from the caller instead.
    fn emit_config(
        &self,
        cfg: &Record,
        out: &mut dyn Write,
        print_host: bool,
    ) -> CompileResult<()> {
        if print_host {
            write!(out, "Host {}", cfg.name())?;
            for alias in cfg.value_as_str_list("Aliases") {
                write!(out, " {}", alias)?;
            }
            writeln!(out)?;
        }

        for &(field, ty) in FIELD_ORDER {
            match ty {
                FieldType::Int => {
                    let value = cfg.value_as_int(field);
                    if value != UNSET_INT {
                        writeln!(out, "  {} {}", field, value)?;
                    }
                }
                FieldType::Str => {
                    let value = cfg.value_as_str(field);
                    if !value.is_empty() {
                        writeln!(out, "  {} {}", field, value)?;
                    }
                }
                FieldType::StrList => {}
            }
        }

        Ok(())
    }
}

impl Backend for SshConfigBackend {
    fn name(&self) -> &'static str {
        "ssh-config"
    }

    fn description(&self) -> &'static str {
        "Generate SSH Config"
    }

    fn run(&self, records: &RecordKeeper, out: &mut dyn Write) -> CompileResult<()> {
        // Required-configuration invariant, checked before any byte is
        // written so a broken record set leaves no partial output behind.
        let common = records
            .def(COMMON_DEF)
            .unwrap_or_else(|| panic!("missing required def '{}'", COMMON_DEF));

        out.write_all(HEADER.as_bytes())?;
        writeln!(out)?;

        out.write_all(COMMON_BANNER.as_bytes())?;
        writeln!(out)?;
        writeln!(out, "Host *")?;
        self.emit_config(common, out, false)?;
        writeln!(out)?;

        out.write_all(HOST_BANNER.as_bytes())?;
        writeln!(out)?;
        for cfg in records.all_derived_definitions(SSH_CLASS) {
            // Common also derives from SSH; skipped by exact name match
            if cfg.name() == COMMON_DEF {
                continue;
            }
            self.emit_config(cfg, out, true)?;
            writeln!(out)?;
        }

        Ok(())
    }
}
