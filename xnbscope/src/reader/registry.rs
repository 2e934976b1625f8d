//! Reader registry: resolution by name and interning of generic specializations.
//!
//! The registry owns every concrete reader and every generic factory. Resolution is keyed by the
//! string names the format itself carries, normalized through
//! [`strip_assembly_version`](crate::typename::strip_assembly_version). Manifests and registries
//! hold tens of entries, so lookup is a linear scan.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    reader::{graphics, math, media, primitive, system, GenericReaderFactory, TypeReader},
    typename::{split_generic_name, strip_assembly_version},
    Error, Result,
};

/// Owns all concrete and specialized type readers plus the generic reader factories.
///
/// A registry outlives the [`ContentReader`](crate::ContentReader)s that borrow it; the same
/// registry can serve any number of sequential parses, and specializations created for one file
/// are reused by the next. Specialization appends through interior mutability, so resolution
/// works from a shared borrow — the engine is single-threaded, and a registry must not be shared
/// across threads.
pub struct TypeReaderRegistry {
    readers: RefCell<Vec<Rc<dyn TypeReader>>>,
    factories: Vec<Box<dyn GenericReaderFactory>>,
}

impl TypeReaderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        TypeReaderRegistry {
            readers: RefCell::new(Vec::new()),
            factories: Vec::new(),
        }
    }

    /// Create a registry seeded with every built-in reader and factory.
    ///
    /// This covers the primitive, system, math, graphics, and media types of the original
    /// content pipeline, and is what the CLI uses.
    #[must_use]
    pub fn with_standard_types() -> Self {
        let mut registry = TypeReaderRegistry::new();

        // Primitive types.
        registry.register(Rc::new(primitive::ByteReader));
        registry.register(Rc::new(primitive::SByteReader));
        registry.register(Rc::new(primitive::Int16Reader));
        registry.register(Rc::new(primitive::UInt16Reader));
        registry.register(Rc::new(primitive::Int32Reader));
        registry.register(Rc::new(primitive::UInt32Reader));
        registry.register(Rc::new(primitive::Int64Reader));
        registry.register(Rc::new(primitive::UInt64Reader));
        registry.register(Rc::new(primitive::SingleReader));
        registry.register(Rc::new(primitive::DoubleReader));
        registry.register(Rc::new(primitive::BooleanReader));
        registry.register(Rc::new(primitive::CharReader));
        registry.register(Rc::new(primitive::StringReader));
        registry.register(Rc::new(primitive::ObjectReader));

        // System types.
        registry.register_generic(Box::new(system::EnumReaderFactory));
        registry.register_generic(Box::new(system::NullableReaderFactory));
        registry.register_generic(Box::new(system::ArrayReaderFactory));
        registry.register_generic(Box::new(system::ListReaderFactory));
        registry.register_generic(Box::new(system::DictionaryReaderFactory));
        registry.register(Rc::new(system::TimeSpanReader));
        registry.register(Rc::new(system::DateTimeReader));
        registry.register(Rc::new(system::DecimalReader));
        registry.register(Rc::new(system::ExternalReferenceReader));
        registry.register_generic(Box::new(system::ReflectiveReaderFactory));

        // Math types.
        registry.register(Rc::new(math::Vector2Reader));
        registry.register(Rc::new(math::Vector3Reader));
        registry.register(Rc::new(math::Vector4Reader));
        registry.register(Rc::new(math::MatrixReader));
        registry.register(Rc::new(math::QuaternionReader));
        registry.register(Rc::new(math::ColorReader));
        registry.register(Rc::new(math::PlaneReader));
        registry.register(Rc::new(math::PointReader));
        registry.register(Rc::new(math::RectangleReader));
        registry.register(Rc::new(math::BoundingBoxReader));
        registry.register(Rc::new(math::BoundingSphereReader));
        registry.register(Rc::new(math::BoundingFrustumReader));
        registry.register(Rc::new(math::RayReader));
        registry.register(Rc::new(math::CurveReader));

        // Graphics types.
        registry.register(Rc::new(graphics::TextureReader));
        registry.register(Rc::new(graphics::Texture2DReader));
        registry.register(Rc::new(graphics::Texture3DReader));
        registry.register(Rc::new(graphics::TextureCubeReader));
        registry.register(Rc::new(graphics::IndexBufferReader));
        registry.register(Rc::new(graphics::VertexBufferReader));
        registry.register(Rc::new(graphics::VertexDeclarationReader));
        registry.register(Rc::new(graphics::EffectReader));
        registry.register(Rc::new(graphics::EffectMaterialReader));
        registry.register(Rc::new(graphics::BasicEffectReader));
        registry.register(Rc::new(graphics::AlphaTestEffectReader));
        registry.register(Rc::new(graphics::DualTextureEffectReader));
        registry.register(Rc::new(graphics::EnvironmentMapEffectReader));
        registry.register(Rc::new(graphics::SkinnedEffectReader));
        registry.register(Rc::new(graphics::SpriteFontReader));
        registry.register(Rc::new(graphics::ModelReader));

        // Media types.
        registry.register(Rc::new(media::SoundEffectReader));
        registry.register(Rc::new(media::SongReader));
        registry.register(Rc::new(media::VideoReader));

        registry
    }

    /// Register a concrete type reader
    ///
    /// ## Arguments
    /// * 'reader' - The reader to append
    pub fn register(&mut self, reader: Rc<dyn TypeReader>) {
        debug_assert!(
            self.find_by_reader_name(reader.reader_name()).is_none(),
            "duplicate reader name {}",
            reader.reader_name()
        );
        self.readers.borrow_mut().push(reader);
    }

    /// Register an open-generic reader factory
    ///
    /// ## Arguments
    /// * 'factory' - The factory to append
    pub fn register_generic(&mut self, factory: Box<dyn GenericReaderFactory>) {
        self.factories.push(factory);
    }

    /// Resolve a reader by its qualified reader name.
    ///
    /// The name is normalized first. If no registered reader matches, the name is split into an
    /// open generic plus arguments and matched against the factories; a successful specialization
    /// is interned, so a second request for the same name returns the same instance.
    ///
    /// # Errors
    /// Returns [`Error::UnknownReader`] if the name matches neither a reader nor a factory
    pub fn get_by_reader_name(&self, reader_name: &str) -> Result<Rc<dyn TypeReader>> {
        let wanted = strip_assembly_version(reader_name);

        if let Some(reader) = self.find_by_reader_name(&wanted) {
            return Ok(reader);
        }

        // Could this be a specialization of a generic reader?
        if let Some((open_name, arguments)) = split_generic_name(&wanted) {
            for factory in &self.factories {
                if factory.open_reader_name() == open_name && factory.arity() == arguments.len() {
                    let reader = factory.create(&arguments);

                    debug_assert_eq!(reader.reader_name(), wanted);

                    self.readers.borrow_mut().push(reader.clone());

                    return Ok(reader);
                }
            }
        }

        Err(Error::UnknownReader(wanted))
    }

    /// Resolve a reader by the qualified name of the type it decodes.
    ///
    /// Used by generic readers to resolve their element, key, and value types. Never creates a
    /// specialization: every reader a file needs is interned while its manifest loads.
    ///
    /// # Errors
    /// Returns [`Error::UnknownTargetType`] if no reader decodes the type
    pub fn get_by_target_type(&self, target_type: &str) -> Result<Rc<dyn TypeReader>> {
        let wanted = strip_assembly_version(target_type);

        self.readers
            .borrow()
            .iter()
            .find(|reader| reader.target_type() == wanted)
            .cloned()
            .ok_or(Error::UnknownTargetType(wanted))
    }

    fn find_by_reader_name(&self, wanted: &str) -> Option<Rc<dyn TypeReader>> {
        self.readers
            .borrow()
            .iter()
            .find(|reader| reader.reader_name() == wanted)
            .cloned()
    }
}

impl Default for TypeReaderRegistry {
    fn default() -> Self {
        TypeReaderRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INT32_READER: &str = "Microsoft.Xna.Framework.Content.Int32Reader";
    const LIST_INT32: &str = "Microsoft.Xna.Framework.Content.ListReader`1[[System.Int32]]";

    #[test]
    fn lookup_ignores_assembly_metadata() {
        let registry = TypeReaderRegistry::with_standard_types();

        let plain = registry.get_by_reader_name(INT32_READER).unwrap();
        let qualified = registry
            .get_by_reader_name(&format!(
                "{INT32_READER}, Microsoft.Xna.Framework, Version=4.0.0.0, Culture=neutral"
            ))
            .unwrap();

        assert!(Rc::ptr_eq(&plain, &qualified));
    }

    #[test]
    fn specializations_are_interned() {
        let registry = TypeReaderRegistry::with_standard_types();

        let first = registry.get_by_reader_name(LIST_INT32).unwrap();
        let second = registry.get_by_reader_name(LIST_INT32).unwrap();

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first.reader_name(), LIST_INT32);
        assert_eq!(
            first.target_type(),
            "System.Collections.Generic.List`1[[System.Int32]]"
        );
    }

    #[test]
    fn specialization_strips_argument_metadata() {
        let registry = TypeReaderRegistry::with_standard_types();

        let qualified = registry
            .get_by_reader_name(
                "Microsoft.Xna.Framework.Content.ListReader`1[[System.Int32, mscorlib, \
                 Version=4.0.0.0]], Microsoft.Xna.Framework",
            )
            .unwrap();
        let plain = registry.get_by_reader_name(LIST_INT32).unwrap();

        assert!(Rc::ptr_eq(&qualified, &plain));
    }

    #[test]
    fn unknown_reader() {
        let registry = TypeReaderRegistry::with_standard_types();

        let result = registry.get_by_reader_name("Custom.Game.WidgetReader");
        assert!(matches!(result, Err(Error::UnknownReader(_))));
    }

    #[test]
    fn arity_mismatch_is_unknown() {
        let registry = TypeReaderRegistry::with_standard_types();

        // DictionaryReader takes two arguments; one argument matches no factory.
        let result = registry
            .get_by_reader_name("Microsoft.Xna.Framework.Content.DictionaryReader`2[[System.Int32]]");
        assert!(matches!(result, Err(Error::UnknownReader(_))));
    }

    #[test]
    fn target_type_lookup() {
        let registry = TypeReaderRegistry::with_standard_types();

        let reader = registry.get_by_target_type("System.String").unwrap();
        assert_eq!(
            reader.reader_name(),
            "Microsoft.Xna.Framework.Content.StringReader"
        );

        let result = registry.get_by_target_type("Custom.Game.Widget");
        assert!(matches!(result, Err(Error::UnknownTargetType(_))));
    }

    #[test]
    fn target_type_lookup_sees_interned_specializations() {
        let registry = TypeReaderRegistry::with_standard_types();

        assert!(registry
            .get_by_target_type("System.Collections.Generic.List`1[[System.Int32]]")
            .is_err());

        registry.get_by_reader_name(LIST_INT32).unwrap();

        assert!(registry
            .get_by_target_type("System.Collections.Generic.List`1[[System.Int32]]")
            .is_ok());
    }

    #[test]
    fn array_specialization_target_is_suffixed() {
        let registry = TypeReaderRegistry::with_standard_types();

        let reader = registry
            .get_by_reader_name("Microsoft.Xna.Framework.Content.ArrayReader`1[[System.Single]]")
            .unwrap();
        assert_eq!(reader.target_type(), "System.Single[]");
    }

    #[test]
    fn enum_specialization_target_is_the_argument() {
        let registry = TypeReaderRegistry::with_standard_types();

        let reader = registry
            .get_by_reader_name(
                "Microsoft.Xna.Framework.Content.EnumReader`1[[Microsoft.Xna.Framework.Graphics.SpriteEffects]]",
            )
            .unwrap();
        assert_eq!(
            reader.target_type(),
            "Microsoft.Xna.Framework.Graphics.SpriteEffects"
        );
        assert!(reader.is_value_type());
    }
}
