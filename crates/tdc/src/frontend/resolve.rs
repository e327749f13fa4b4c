//! Inheritance resolution
//!
//! Walks AST items in definition order and produces populated records:
//! classes become field templates, defs instantiate their parent classes and
//! apply `let` overrides. All type checking happens here, so backends can
//! rely on every field holding a value of its declared type.

use crate::common::{CompileError, CompileResult, Span};
use crate::frontend::ast::*;
use crate::records::{FieldType, FieldValue, Record, RecordKeeper};

/// Resolves AST items into a populated [`RecordKeeper`]
#[derive(Default)]
pub struct Resolver {
    records: RecordKeeper,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve all items, in definition order
    pub fn resolve(mut self, items: &[Item]) -> CompileResult<RecordKeeper> {
        for item in items {
            match &item.kind {
                ItemKind::Class(class) => self.resolve_class(class, item.span)?,
                ItemKind::Def(def) => self.resolve_def(def, item.span)?,
            }
        }
        Ok(self.records)
    }

    fn resolve_class(&mut self, decl: &ClassDecl, span: Span) -> CompileResult<()> {
        let mut record = self.instantiate_parents(&decl.name, &decl.parents)?;

        for field in &decl.fields {
            if record.get(&field.name).is_some() {
                return Err(CompileError::semantic(
                    format!(
                        "duplicate field '{}' in class '{}'",
                        field.name, decl.name
                    ),
                    field.span,
                ));
            }
            let value = match &field.init {
                Some(expr) => self.eval_value(expr, field.ty)?,
                None => FieldValue::unset(field.ty),
            };
            record.add_field(&field.name, value);
        }

        self.records
            .add_class(record)
            .map_err(|msg| CompileError::semantic(msg, span))
    }

    fn resolve_def(&mut self, decl: &DefDecl, span: Span) -> CompileResult<()> {
        let mut record = self.instantiate_parents(&decl.name, &decl.parents)?;

        for binding in &decl.lets {
            let Some(current) = record.get(&binding.field) else {
                return Err(CompileError::semantic(
                    format!("no field '{}' in def '{}'", binding.field, decl.name),
                    binding.span,
                ));
            };
            let ty = current.ty();
            let value = self.eval_value(&binding.value, ty)?;
            record
                .set_value(&binding.field, value)
                .map_err(|msg| CompileError::semantic(msg, binding.span))?;
        }

        self.records
            .add_def(record)
            .map_err(|msg| CompileError::semantic(msg, span))
    }

    /// Build a record carrying the merged fields and transitive superclass
    /// tags of `parents`, parent order first.
    fn instantiate_parents(
        &self,
        name: &str,
        parents: &[ParentRef],
    ) -> CompileResult<Record> {
        let mut record = Record::new(name);

        for parent in parents {
            let Some(class) = self.records.class(&parent.name) else {
                return Err(CompileError::semantic(
                    format!("unknown class '{}'", parent.name),
                    parent.span,
                ));
            };

            record.add_superclass(&parent.name);
            for superclass in class.superclasses() {
                record.add_superclass(superclass.clone());
            }

            for (field, value) in class.fields() {
                if record.get(field).is_some() {
                    return Err(CompileError::semantic(
                        format!(
                            "field '{}' inherited more than once by '{}'",
                            field, name
                        ),
                        parent.span,
                    ));
                }
                record.add_field(field, value.clone());
            }
        }

        Ok(record)
    }

    fn eval_value(&self, expr: &ValueExpr, expected: FieldType) -> CompileResult<FieldValue> {
        let value = match (&expr.kind, expected) {
            (ValueKind::Int(v), FieldType::Int) => FieldValue::Int(*v),
            (ValueKind::Str(s), FieldType::Str) => FieldValue::Str(s.clone()),
            (ValueKind::List(items), FieldType::StrList) => {
                let mut elems = Vec::with_capacity(items.len());
                for item in items {
                    match &item.kind {
                        ValueKind::Str(s) => elems.push(s.clone()),
                        other => {
                            return Err(CompileError::type_error(
                                format!("expected string list element, found {}", other.type_name()),
                                item.span,
                            ));
                        }
                    }
                }
                FieldValue::StrList(elems)
            }
            (kind, expected) => {
                return Err(CompileError::type_error(
                    format!("expected {}, found {}", expected, kind.type_name()),
                    expr.span,
                ));
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::Parser;
    use crate::records::UNSET_INT;

    fn resolve(source: &str) -> CompileResult<RecordKeeper> {
        let items = Parser::new(source)?.parse()?;
        Resolver::new().resolve(&items)
    }

    #[test]
    fn test_def_inherits_defaults() {
        let records = resolve(
            r#"
            class SSH {
              string User = "";
              int Port = -1;
              int KeepAlive = 30;
            }
            def Plain : SSH;
            "#,
        )
        .unwrap();

        let plain = records.def("Plain").unwrap();
        assert!(plain.is_subclass_of("SSH"));
        assert_eq!(plain.value_as_str("User"), "");
        assert_eq!(plain.value_as_int("Port"), UNSET_INT);
        assert_eq!(plain.value_as_int("KeepAlive"), 30);
    }

    #[test]
    fn test_let_overrides_default() {
        let records = resolve(
            r#"
            class SSH { string User = "nobody"; int Port = -1; }
            def Web : SSH { let User = "git"; let Port = 22; }
            "#,
        )
        .unwrap();

        let web = records.def("Web").unwrap();
        assert_eq!(web.value_as_str("User"), "git");
        assert_eq!(web.value_as_int("Port"), 22);
    }

    #[test]
    fn test_field_order_is_declaration_order() {
        let records = resolve(
            r#"
            class Base { int A; }
            class SSH : Base { string B = ""; int C; }
            def D : SSH { let C = 1; let A = 2; }
            "#,
        )
        .unwrap();

        let names: Vec<_> = records
            .def("D")
            .unwrap()
            .fields()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_transitive_superclasses() {
        let records = resolve(
            r#"
            class Base {}
            class SSH : Base {}
            def D : SSH;
            "#,
        )
        .unwrap();

        let d = records.def("D").unwrap();
        assert!(d.is_subclass_of("SSH"));
        assert!(d.is_subclass_of("Base"));
    }

    #[test]
    fn test_unknown_class() {
        let err = resolve("def D : Nope;").unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn test_unknown_field_in_let() {
        let err = resolve(
            r#"
            class SSH { int Port; }
            def D : SSH { let User = "git"; }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn test_let_type_mismatch() {
        let err = resolve(
            r#"
            class SSH { int Port; }
            def D : SSH { let Port = "22"; }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn test_non_string_list_element() {
        let err = resolve(
            r#"
            class SSH { list<string> Aliases; }
            def D : SSH { let Aliases = ["ok", 5]; }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }

    #[test]
    fn test_duplicate_def() {
        let err = resolve(
            r#"
            class SSH {}
            def D : SSH;
            def D : SSH;
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn test_duplicate_field_across_parents() {
        let err = resolve(
            r#"
            class A { int X; }
            class B { int X; }
            def D : A, B;
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CompileError::Semantic { .. }));
    }

    #[test]
    fn test_class_default_type_checked() {
        let err = resolve(r#"class SSH { int Port = "oops"; }"#).unwrap_err();
        assert!(matches!(err, CompileError::Type { .. }));
    }
}
