//! Type readers: one decoder per serialized type.
//!
//! Every value in an XNB payload is decoded by a [`TypeReader`]. Concrete readers are registered
//! once at startup; generic readers (lists, dictionaries, nullables, enums, arrays) are built on
//! demand by a [`GenericReaderFactory`] when the manifest names a specialization such as
//! `` ListReader`1[[System.Int32]] ``. A specialized reader carries its argument names and
//! resolves them to element readers during the initialize pass, after the whole manifest has been
//! registered — the data graph may be circular (a list of a type that itself contains lists), the
//! resolution order is not.
//!
//! # Key Components
//!
//! - [`TypeReader`] - Per-type decode capability, dispatched through the per-file reader table
//! - [`GenericReaderFactory`] - Open-generic template that mints specialized readers
//! - [`registry::TypeReaderRegistry`] - Owns all readers and factories, interns specializations

pub mod registry;

pub(crate) mod graphics;
pub(crate) mod math;
pub(crate) mod media;
pub(crate) mod primitive;
pub(crate) mod system;

use std::rc::Rc;

use crate::{content::ContentReader, reader::registry::TypeReaderRegistry, Result};

/// A decoder for one serialized type.
///
/// Implementations are registered in a [`TypeReaderRegistry`] and selected either by reader name
/// (while loading the manifest) or by target type name (while a generic reader resolves its
/// arguments). `read` writes the decoded value to the engine's logger; nothing is materialized.
pub trait TypeReader {
    /// Qualified name of the type this reader decodes
    fn target_type(&self) -> &str;

    /// Qualified name of the reader itself, as it appears in manifests
    fn reader_name(&self) -> &str;

    /// Whether the target is a value type.
    ///
    /// A value type occurrence inside a polymorphic slot is stored bare; a reference type is
    /// preceded by a type-id tag (or 0 for null).
    fn is_value_type(&self) -> bool {
        false
    }

    /// Resolve late dependencies against the registry.
    ///
    /// Called once per manifest after every entry has been registered, so a reader may reference
    /// types that only became resolvable later in the same manifest. Must be idempotent.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownTargetType`] if a required type has no reader
    fn initialize(&self, _registry: &TypeReaderRegistry) -> Result<()> {
        Ok(())
    }

    /// Decode one value from the engine's stream, writing it to the engine's logger
    ///
    /// # Errors
    /// Propagates stream, dispatch, and output failures
    fn read(&self, input: &mut ContentReader<'_>) -> Result<()>;
}

/// An open-generic reader template.
///
/// Knows its open reader name and arity, and mints a specialized [`TypeReader`] bound to a
/// concrete argument tuple. Specialization is purely name-level; no runtime type metadata is
/// involved.
pub trait GenericReaderFactory {
    /// Open reader name, without the arity marker
    fn open_reader_name(&self) -> &str;

    /// Number of generic arguments the template takes
    fn arity(&self) -> usize;

    /// Build the reader specialized for `args`.
    ///
    /// The caller guarantees `args.len() == self.arity()`.
    fn create(&self, args: &[String]) -> Rc<dyn TypeReader>;
}

/// Assemble the qualified name of a specialization: `` open`N[[arg0],[arg1]...] ``.
///
/// Used for both reader names and target type names; the result round-trips through
/// [`crate::split_generic_name`].
pub(crate) fn specialized_name(open: &str, args: &[String]) -> String {
    let mut name = format!("{}`{}[", open, args.len());
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            name.push(',');
        }
        name.push('[');
        name.push_str(arg);
        name.push(']');
    }
    name.push(']');
    name
}

/// Expands to the `target_type`/`reader_name` pair of a concrete reader implementation.
macro_rules! reader_names {
    ($target:literal, $reader:literal) => {
        fn target_type(&self) -> &str {
            $target
        }

        fn reader_name(&self) -> &str {
            $reader
        }
    };
}

pub(crate) use reader_names;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typename::split_generic_name;

    #[test]
    fn specialized_name_single() {
        let name = specialized_name("Foo.ListReader", &["System.Int32".to_string()]);
        assert_eq!(name, "Foo.ListReader`1[[System.Int32]]");
    }

    #[test]
    fn specialized_name_pair() {
        let name = specialized_name(
            "Foo.DictionaryReader",
            &["System.Int32".to_string(), "System.String".to_string()],
        );
        assert_eq!(
            name,
            "Foo.DictionaryReader`2[[System.Int32],[System.String]]"
        );
    }

    #[test]
    fn specialized_name_round_trips() {
        let args = vec![
            "System.Collections.Generic.List`1[[System.Int32]]".to_string(),
            "System.String".to_string(),
        ];
        let name = specialized_name("Foo.DictionaryReader", &args);

        let (open, parsed) = split_generic_name(&name).unwrap();
        assert_eq!(open, "Foo.DictionaryReader");
        assert_eq!(parsed, args);
    }
}
