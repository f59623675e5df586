// ============================================================================
// Property Types
// ============================================================================

/// The primitive kinds a scalar property (or a collection of primitives)
/// can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Int,
    Float,
    Bool,
}

/// The closed set of property kinds a schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Primitive(PrimitiveKind),
    Object,
    List,
    Set,
}

/// A named schema node describing one property of a resource.
///
/// For `Object`, `List` and `Set` kinds exactly one of `item_kind`
/// (primitive elements) and `element_schema` (object elements) is set;
/// a property violating that surfaces as `MergeError::UnsupportedType`
/// at merge time.
#[derive(Debug, Clone)]
pub struct Property {
    /// The key this property uses in the remote payload.
    pub name: String,
    /// Optional renamed key used when reading from and writing to local
    /// state. Children are mapped by declared identity, so an upstream
    /// renaming layer is respected through nested merges.
    pub state_name: Option<String>,
    pub kind: PropertyKind,
    /// The remote value of a write-only property is never trusted; the
    /// local value is always retained.
    pub write_only: bool,
    /// Meaningful only for `List`: the remote order carries no meaning and
    /// the reorder policy may restore the prior local order.
    pub ignore_order: bool,
    /// Designates this property as the resource identifier.
    pub identifier: bool,
    /// Nested schema, present iff kind is Object / List-of-object /
    /// Set-of-object.
    pub element_schema: Option<Schema>,
    /// Primitive kind of collection elements, when the collection holds
    /// primitives.
    pub item_kind: Option<PrimitiveKind>,
    /// Wrapper encoding policy: represent this nested object as a
    /// single-element array on write (and accept that encoding on read).
    pub wrap_nested_object: bool,
}

impl Property {
    /// The key under which this property lives in local state.
    pub fn state_name(&self) -> &str {
        self.state_name.as_deref().unwrap_or(&self.name)
    }

    pub fn write_only(mut self) -> Self {
        self.write_only = true;
        self
    }

    pub fn ignore_order(mut self) -> Self {
        self.ignore_order = true;
        self
    }

    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    /// Enable the single-element-array wrapper encoding for this nested
    /// object property.
    pub fn wrapped(mut self) -> Self {
        self.wrap_nested_object = true;
        self
    }

    pub fn state_name_as(mut self, state_name: impl Into<String>) -> Self {
        self.state_name = Some(state_name.into());
        self
    }

    fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            state_name: None,
            kind,
            write_only: false,
            ignore_order: false,
            identifier: false,
            element_schema: None,
            item_kind: None,
            wrap_nested_object: false,
        }
    }
}

// ============================================================================
// Schema
// ============================================================================

/// An ordered collection of properties, keyed by name.
///
/// Immutable once constructed and shared by reference across all merges of
/// the same resource type; the engine never mutates it.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    properties: Vec<Property>,
}

impl Schema {
    /// Build a schema from properties in declaration order.
    /// Panics if two properties share a name — schemas are constructed once
    /// at resource-type registration time, so this is a programming error.
    pub fn new(properties: Vec<Property>) -> Self {
        for (i, a) in properties.iter().enumerate() {
            for b in &properties[i + 1..] {
                assert!(
                    a.name != b.name,
                    "duplicate property name \"{}\" in schema",
                    a.name
                );
            }
        }
        Self { properties }
    }

    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// The property designated as the resource identifier, if any.
    pub fn identifier(&self) -> Option<&Property> {
        self.properties.iter().find(|property| property.identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

// ============================================================================
// Property Builder API (`p` module)
// ============================================================================

/// Property builder helpers. Usage: `p::string("label")`,
/// `p::int("port").write_only()`, `p::set_of_objects("listeners", schema)`.
pub mod p {
    use super::{PrimitiveKind, Property, PropertyKind, Schema};

    pub fn string(name: impl Into<String>) -> Property {
        Property::new(name, PropertyKind::Primitive(PrimitiveKind::String))
    }

    pub fn int(name: impl Into<String>) -> Property {
        Property::new(name, PropertyKind::Primitive(PrimitiveKind::Int))
    }

    pub fn float(name: impl Into<String>) -> Property {
        Property::new(name, PropertyKind::Primitive(PrimitiveKind::Float))
    }

    pub fn boolean(name: impl Into<String>) -> Property {
        Property::new(name, PropertyKind::Primitive(PrimitiveKind::Bool))
    }

    pub fn object(name: impl Into<String>, element_schema: Schema) -> Property {
        let mut property = Property::new(name, PropertyKind::Object);
        property.element_schema = Some(element_schema);
        property
    }

    pub fn list_of(name: impl Into<String>, item_kind: PrimitiveKind) -> Property {
        let mut property = Property::new(name, PropertyKind::List);
        property.item_kind = Some(item_kind);
        property
    }

    pub fn list_of_objects(name: impl Into<String>, element_schema: Schema) -> Property {
        let mut property = Property::new(name, PropertyKind::List);
        property.element_schema = Some(element_schema);
        property
    }

    pub fn set_of(name: impl Into<String>, item_kind: PrimitiveKind) -> Property {
        let mut property = Property::new(name, PropertyKind::Set);
        property.item_kind = Some(item_kind);
        property
    }

    pub fn set_of_objects(name: impl Into<String>, element_schema: Schema) -> Property {
        let mut property = Property::new(name, PropertyKind::Set);
        property.element_schema = Some(element_schema);
        property
    }
}

// ============================================================================
// Tests
// ============================================================================
