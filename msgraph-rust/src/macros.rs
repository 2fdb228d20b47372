//! Declarative generators for models and enums.
//!
//! Every model is the same shape: a struct around a backing store, an
//! `*able` trait with one getter/setter pair per property, a table of field
//! deserializers and a serializer writing the properties in declaration
//! order. The macros below emit that shape from a property list.

/// Implements [Property](msgraph_rust_abstractions::property::Property) for
/// a type implementing
/// [GraphEnum](msgraph_rust_abstractions::enums::GraphEnum).
macro_rules! enum_property {
    ($name:ident) => {
        impl $crate::abstractions::property::Property for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn into_value(self) -> $crate::abstractions::store::Value {
                $crate::abstractions::store::Value::Enum(self.to_string())
            }

            fn from_value(value: &$crate::abstractions::store::Value) -> Option<Self> {
                $crate::abstractions::property::enum_from_value(value)
            }

            fn read(
                node: &dyn $crate::abstractions::serialization::ParseNode,
            ) -> Result<Option<Self>, $crate::Error> {
                $crate::abstractions::property::read_enum(node)
            }

            fn write(
                writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                key: Option<&str>,
                value: &Self,
            ) -> Result<(), $crate::Error> {
                $crate::abstractions::property::write_enum(writer, key, value)
            }

            fn read_collection(
                node: &dyn $crate::abstractions::serialization::ParseNode,
            ) -> Result<Option<Vec<Self>>, $crate::Error> {
                $crate::abstractions::property::read_enums(node)
            }

            fn write_collection(
                writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                key: Option<&str>,
                values: &[Self],
            ) -> Result<(), $crate::Error> {
                $crate::abstractions::property::write_enums(writer, key, values)
            }
        }
    };
}

/// Defines a closed enum with one wire name per member.
///
/// ```ignore
/// graph_enum! {
///     pub enum CallType {
///         Unknown = "unknown",
///         GroupCall = "groupCall",
///     }
/// }
/// ```
macro_rules! graph_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $wire:literal
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::strum::EnumIter)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Wire name of the member
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::abstractions::enums::GraphEnum for $name {
            fn parse(value: &str) -> Option<Self> {
                match value {
                    $($wire => Some($name::$variant),)*
                    _ => None,
                }
            }
        }

        enum_property!($name);
    };
}

/// Defines a bitmask enum. Members are single bits, the wire form joins the
/// names of the set members with commas.
macro_rules! graph_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident: $repr:ty {
            $(
                $(#[$flag_meta:meta])*
                const $flag:ident = $value:expr => $wire:literal;
            )*
        }
    ) => {
        ::bitflags::bitflags! {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name: $repr {
                $(
                    $(#[$flag_meta])*
                    const $flag = $value;
                )*
            }
        }

        impl $crate::abstractions::enums::FlagNames for $name {
            const WIRE_NAMES: &'static [(&'static str, Self)] = &[$(($wire, $name::$flag),)*];
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::abstractions::enums::format_flags(self, f)
            }
        }

        impl $crate::abstractions::enums::GraphEnum for $name {
            fn parse(value: &str) -> Option<Self> {
                $crate::abstractions::enums::parse_flags(value)
            }
        }

        enum_property!($name);
    };
}

/// Defines a model backed by a
/// [BackingStore](msgraph_rust_abstractions::store::BackingStore).
///
/// A derived model names its base type followed by the remaining ancestors,
/// nearest first. `discriminator` is stamped into `@odata.type` by `new()`,
/// `subtypes` lists every transitive subtype the factory dispatches to and
/// names the enum holding this type or any of those subtypes.
///
/// Reading the struct itself never changes the type: fields of a subtype
/// payload that the struct does not declare land in its additional data.
/// Reading the enum picks the type from the discriminator.
///
/// ```ignore
/// graph_model! {
///     pub struct ResellerDelegatedAdminRelationship: DelegatedAdminRelationship, Entity {
///         discriminator = "#microsoft.graph.resellerDelegatedAdminRelationship";
///         properties {
///             is_partner_consent_pending: bool = "isPartnerConsentPending",
///         }
///     }
/// }
/// ```
macro_rules! graph_model {
    (
        $(#[$meta:meta])*
        pub struct $name:ident $(: $parent:ident $(, $ancestor:ident)*)? {
            $(discriminator = $discriminator:literal;)?
            $(subtypes $any:ident {
                $($subtype_discriminator:literal => $subtype:ident),* $(,)?
            })?
            properties {
                $(
                    $(#[$field_meta:meta])*
                    $field:ident: $ty:ty = $wire:literal
                ),* $(,)?
            }
        }
    ) => {
        ::paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name {
                backing_store: Box<dyn $crate::abstractions::store::BackingStore>,
            }

            #[doc = concat!("Accessors of [", stringify!($name), "]")]
            pub trait [<$name able>]:
                $crate::abstractions::serialization::Parsable
                + $crate::abstractions::store::BackedModel
                $(+ [<$parent able>])?
            {
                $(
                    $(#[$field_meta])*
                    fn $field(&self) -> Result<Option<$ty>, $crate::Error> {
                        use $crate::abstractions::store::BackingStoreExt;
                        self.backing_store().get_value($wire)
                    }

                    #[doc = concat!("Sets `", $wire, "`, `None` stores null")]
                    fn [<set_ $field>](&mut self, value: Option<$ty>) -> Result<(), $crate::Error> {
                        use $crate::abstractions::store::BackingStoreExt;
                        self.backing_store_mut().set_value($wire, value)
                    }
                )*
            }

            impl [<$name able>] for $name {}

            $(
                impl [<$parent able>] for $name {}
                $(impl [<$ancestor able>] for $name {})*
            )?

            impl $name {
                #[doc = concat!("Creates an empty [", stringify!($name), "]")]
                pub fn new() -> Self {
                    #[allow(unused_mut)]
                    let mut store = $crate::abstractions::store::InMemoryBackingStore::new();
                    $(store.put(
                        "@odata.type",
                        $crate::abstractions::store::Value::String($discriminator.to_owned()),
                    );)?
                    Self::with_backing_store(Box::new(store))
                }

                /// Creates a model on top of an existing store
                pub fn with_backing_store(
                    backing_store: Box<dyn $crate::abstractions::store::BackingStore>,
                ) -> Self {
                    $name { backing_store }
                }

                /// Creates the model matching the `@odata.type` of `node`,
                /// falling back to this type
                pub fn create_from_discriminator_value(
                    node: &dyn $crate::abstractions::serialization::ParseNode,
                ) -> Result<Box<dyn $crate::abstractions::serialization::Parsable>, $crate::Error> {
                    let discriminator = match node.get_child_node("@odata.type")? {
                        Some(child) => child.get_string_value()?,
                        None => None,
                    };
                    match discriminator.as_deref() {
                        $($(Some($subtype_discriminator) => return Ok(Box::new($subtype::new())),)*)?
                        $(Some($discriminator) => (),)?
                        Some(other) => ::tracing::trace!(
                            discriminator = other,
                            model = stringify!($name),
                            "unrecognized discriminator, using base type"
                        ),
                        None => (),
                    }
                    Ok(Box::new($name::new()))
                }

                /// Creates this type whatever the `@odata.type` of the node
                pub fn create_ignoring_discriminator(
                    _node: &dyn $crate::abstractions::serialization::ParseNode,
                ) -> Result<Box<dyn $crate::abstractions::serialization::Parsable>, $crate::Error> {
                    Ok(Box::new($name::new()))
                }

                /// Wire name to deserializer of every property, inherited ones
                /// included
                pub fn field_deserializers() -> $crate::abstractions::serialization::FieldDeserializers<Self> {
                    let mut fields = $crate::abstractions::serialization::FieldDeserializers::new();
                    Self::add_field_deserializers(&mut fields);
                    fields
                }

                /// Adds the deserializers of this type's properties for any
                /// model implementing its accessors
                pub fn add_field_deserializers<M: [<$name able>]>(
                    fields: &mut $crate::abstractions::serialization::FieldDeserializers<M>,
                ) {
                    $($parent::add_field_deserializers(fields);)?
                    $(
                        fields.insert($wire, |model, node| {
                            if let Some(value) =
                                <$ty as $crate::abstractions::property::Property>::read(node)?
                            {
                                model.[<set_ $field>](Some(value))?;
                            }
                            Ok(())
                        });
                    )*
                }

                /// Writes the properties of this type, inherited ones first
                pub fn serialize_properties<M: [<$name able>] + ?Sized>(
                    model: &M,
                    writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                ) -> Result<(), $crate::Error> {
                    $($parent::serialize_properties(model, writer)?;)?
                    $(
                        if let Some(value) = model.$field()? {
                            <$ty as $crate::abstractions::property::Property>::write(
                                writer,
                                Some($wire),
                                &value,
                            )?;
                        }
                    )*
                    Ok(())
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl $crate::abstractions::store::BackedModel for $name {
                fn backing_store(&self) -> &dyn $crate::abstractions::store::BackingStore {
                    &*self.backing_store
                }

                fn backing_store_mut(
                    &mut self,
                ) -> &mut dyn $crate::abstractions::store::BackingStore {
                    &mut *self.backing_store
                }
            }

            impl $crate::abstractions::serialization::Parsable for $name {
                fn deserialize_field(
                    &mut self,
                    key: &str,
                    node: &dyn $crate::abstractions::serialization::ParseNode,
                ) -> Result<(), $crate::Error> {
                    static FIELDS: ::std::sync::OnceLock<
                        $crate::abstractions::serialization::FieldDeserializers<$name>,
                    > = ::std::sync::OnceLock::new();
                    match FIELDS.get_or_init($name::field_deserializers).get(key) {
                        Some(deserializer) => deserializer(self, node),
                        None => $crate::abstractions::serialization::assign_additional_field(
                            self, key, node,
                        ),
                    }
                }

                fn serialize(
                    &self,
                    writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                ) -> Result<(), $crate::Error> {
                    use $crate::abstractions::store::AdditionalDataHolder;
                    $name::serialize_properties(self, writer)?;
                    writer.write_additional_data(&self.additional_data()?)
                }

                fn as_any(&self) -> &dyn ::std::any::Any {
                    self
                }

                fn into_any(self: Box<Self>) -> Box<dyn ::std::any::Any> {
                    self
                }

                fn clone_box(&self) -> Box<dyn $crate::abstractions::serialization::Parsable> {
                    Box::new(self.clone())
                }

                fn as_backed_model(&self) -> Option<&dyn $crate::abstractions::store::BackedModel> {
                    Some(self)
                }
            }

            impl $crate::abstractions::property::Property for $name {
                const TYPE_NAME: &'static str = stringify!($name);

                fn into_value(self) -> $crate::abstractions::store::Value {
                    $crate::abstractions::store::Value::Object(Box::new(self))
                }

                fn from_value(value: &$crate::abstractions::store::Value) -> Option<Self> {
                    $crate::abstractions::property::object_from_value(value)
                }

                fn read(
                    node: &dyn $crate::abstractions::serialization::ParseNode,
                ) -> Result<Option<Self>, $crate::Error> {
                    $crate::abstractions::property::read_object(
                        node,
                        $name::create_ignoring_discriminator,
                    )
                }

                fn write(
                    writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                    key: Option<&str>,
                    value: &Self,
                ) -> Result<(), $crate::Error> {
                    writer.write_object_value(key, Some(value))
                }

                fn read_collection(
                    node: &dyn $crate::abstractions::serialization::ParseNode,
                ) -> Result<Option<Vec<Self>>, $crate::Error> {
                    $crate::abstractions::property::read_objects(
                        node,
                        $name::create_ignoring_discriminator,
                    )
                }

                fn write_collection(
                    writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                    key: Option<&str>,
                    values: &[Self],
                ) -> Result<(), $crate::Error> {
                    $crate::abstractions::property::write_objects(writer, key, values)
                }
            }

            $(
                #[doc = concat!("[", stringify!($name), "] or one of its subtypes, chosen by `@odata.type`")]
                #[derive(Debug, Clone)]
                pub enum $any {
                    $name($name),
                    $($subtype($subtype),)*
                }

                impl $any {
                    /// The model through the accessors of the base type
                    pub fn as_base(&self) -> &dyn [<$name able>] {
                        match self {
                            $any::$name(model) => model,
                            $($any::$subtype(model) => model,)*
                        }
                    }

                    pub fn as_base_mut(&mut self) -> &mut dyn [<$name able>] {
                        match self {
                            $any::$name(model) => model,
                            $($any::$subtype(model) => model,)*
                        }
                    }

                    pub fn as_parsable(&self) -> &dyn $crate::abstractions::serialization::Parsable {
                        match self {
                            $any::$name(model) => model,
                            $($any::$subtype(model) => model,)*
                        }
                    }

                    /// Narrows a model built by
                    #[doc = concat!("[", stringify!($name), "::create_from_discriminator_value]")]
                    pub fn from_parsable(
                        model: Box<dyn $crate::abstractions::serialization::Parsable>,
                    ) -> Result<Self, $crate::Error> {
                        let model = match model.into_any().downcast::<$name>() {
                            Ok(model) => return Ok($any::$name(*model)),
                            Err(model) => model,
                        };
                        $(
                            let model = match model.downcast::<$subtype>() {
                                Ok(model) => return Ok($any::$subtype(*model)),
                                Err(model) => model,
                            };
                        )*
                        drop(model);
                        Err($crate::Error::Type(
                            "object".to_owned(),
                            stringify!($any).to_owned(),
                        ))
                    }
                }

                impl From<$name> for $any {
                    fn from(model: $name) -> Self {
                        $any::$name(model)
                    }
                }

                $(
                    impl From<$subtype> for $any {
                        fn from(model: $subtype) -> Self {
                            $any::$subtype(model)
                        }
                    }
                )*

                impl $crate::abstractions::property::Property for $any {
                    const TYPE_NAME: &'static str = stringify!($any);

                    fn into_value(self) -> $crate::abstractions::store::Value {
                        let model: Box<dyn $crate::abstractions::serialization::Parsable> = match self {
                            $any::$name(model) => Box::new(model),
                            $($any::$subtype(model) => Box::new(model),)*
                        };
                        $crate::abstractions::store::Value::Object(model)
                    }

                    fn from_value(value: &$crate::abstractions::store::Value) -> Option<Self> {
                        let model = match value {
                            $crate::abstractions::store::Value::Object(model) => model.as_any(),
                            _ => return None,
                        };
                        if let Some(model) = model.downcast_ref::<$name>() {
                            return Some($any::$name(model.clone()));
                        }
                        $(
                            if let Some(model) = model.downcast_ref::<$subtype>() {
                                return Some($any::$subtype(model.clone()));
                            }
                        )*
                        None
                    }

                    fn read(
                        node: &dyn $crate::abstractions::serialization::ParseNode,
                    ) -> Result<Option<Self>, $crate::Error> {
                        node.get_object_value($name::create_from_discriminator_value)?
                            .map($any::from_parsable)
                            .transpose()
                    }

                    fn write(
                        writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                        key: Option<&str>,
                        value: &Self,
                    ) -> Result<(), $crate::Error> {
                        writer.write_object_value(key, Some(value.as_parsable()))
                    }

                    fn read_collection(
                        node: &dyn $crate::abstractions::serialization::ParseNode,
                    ) -> Result<Option<Vec<Self>>, $crate::Error> {
                        node.get_collection_of_object_values($name::create_from_discriminator_value)?
                            .map(|models| models.into_iter().map($any::from_parsable).collect())
                            .transpose()
                    }

                    fn write_collection(
                        writer: &mut dyn $crate::abstractions::serialization::SerializationWriter,
                        key: Option<&str>,
                        values: &[Self],
                    ) -> Result<(), $crate::Error> {
                        let models: Vec<&dyn $crate::abstractions::serialization::Parsable> =
                            values.iter().map($any::as_parsable).collect();
                        writer.write_collection_of_object_values(key, &models)
                    }
                }
            )?
        }
    };
}
