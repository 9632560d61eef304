//! The `Reflect` trait implemented by reflectable types
//!
//! Usually derived:
//!
//! ```ignore
//! use fastprop_core::{DataMember, Reflect};
//!
//! #[derive(Reflect, Default)]
//! pub struct SnakeData {
//!     #[reflect(rename = "OverTheTop", attr = DataMember::named("over_the_top"))]
//!     pub over_the_top: i32,
//! }
//!
//! let registry = ModelRegistry::new();
//! registry.register_type::<SnakeData>();
//! ```

use std::any::Any;

use crate::model::{ModelBuilder, TypeModel};

/// A type whose properties can be described by a [`TypeModel`]
pub trait Reflect: Any + Send + Sync + Sized {
    /// Declare the properties of `Self` in order, base properties first
    ///
    /// Must not touch a [`ModelRegistry`](crate::registry::ModelRegistry):
    /// `get_or_register` calls this while holding the registry entry lock
    /// for `Self`, and re-entering the registry can deadlock.
    fn declare(builder: &mut ModelBuilder<Self>);

    /// Build a fresh model of `Self`
    fn model() -> TypeModel {
        let mut builder = ModelBuilder::new();
        Self::declare(&mut builder);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::attribute::{DataMember, Description};
    use crate::error::{Operation, ReflectError};
    use crate::property::Access;
    use crate::registry::ModelRegistry;
    use crate::Reflect;

    #[derive(Reflect, Debug, Default)]
    pub struct SnakeData {
        #[reflect(rename = "OverTheTop", attr = DataMember::named("over_the_top"))]
        pub over_the_top: i32,

        #[reflect(rename = "Name")]
        pub name: String,

        #[reflect(skip)]
        pub scratch: Vec<u8>,

        hidden: bool,
    }

    #[derive(Reflect, Debug, Default)]
    pub struct Entity {
        #[reflect(readonly)]
        pub id: u64,

        #[reflect(attr = Description::new("display label"), attr = DataMember::new())]
        pub label: String,
    }

    #[derive(Reflect, Debug, Default)]
    pub struct Player {
        #[reflect(base)]
        entity: Entity,

        pub label: String,

        #[reflect(writeonly)]
        pub password: String,

        #[reflect(include, rename = "Secret")]
        secret: u32,

        pub r#type: u8,
    }

    #[test]
    fn test_over_the_top_scenario() {
        let registry = ModelRegistry::new();
        registry.register_type::<SnakeData>();

        let mut data = SnakeData::default();
        let model = registry.get_type::<SnakeData>().unwrap();

        model
            .get_property("overthetop", true)
            .unwrap()
            .set_as(&mut data, 3i32)
            .unwrap();
        assert_eq!(data.over_the_top, 3);
        assert_eq!(
            model
                .get_property("OverTheTop", false)
                .unwrap()
                .get_as::<i32>(&data)
                .unwrap(),
            3
        );
    }

    #[test]
    fn test_attributes_reflected() {
        let model = SnakeData::model();
        let property = model.get_property("overthetop", true).unwrap();

        assert_eq!(property.attributes().len(), 1);
        let member = property.attributes()[0].downcast_ref::<DataMember>().unwrap();
        assert_eq!(member.name.as_deref(), Some("over_the_top"));
    }

    #[test]
    fn test_attribute_order_preserved() {
        let model = Entity::model();
        let label = model.get_property("label", false).unwrap();

        let attrs = label.attributes();
        assert_eq!(attrs.len(), 2);
        assert!(attrs[0].is::<Description>());
        assert!(attrs[1].is::<DataMember>());
    }

    #[test]
    fn test_field_selection() {
        assert_eq!(SnakeData::DECLARED_PROPERTIES, ["OverTheTop", "Name"]);

        let model = SnakeData::model();
        assert!(model.get_property("scratch", true).is_err());
        assert!(model.get_property("hidden", true).is_err());
        assert!(model.get_property("Name", false).is_ok());
        assert!(!SnakeData::default().hidden);
    }

    #[test]
    fn test_raw_identifier_and_include() {
        assert_eq!(
            Player::DECLARED_PROPERTIES,
            ["label", "password", "Secret", "type"]
        );

        let model = Player::model();
        let mut player = Player::default();
        model
            .get_property("type", false)
            .unwrap()
            .set_as(&mut player, 4u8)
            .unwrap();
        model
            .get_property("secret", true)
            .unwrap()
            .set_as(&mut player, 11u32)
            .unwrap();
        assert_eq!(player.r#type, 4);
        assert_eq!(player.secret, 11);
    }

    #[test]
    fn test_access_modes() {
        let entity = Entity::model();
        let id = entity.get_property("id", false).unwrap();
        assert_eq!(id.access(), Access::READ);
        assert!(matches!(
            id.set_as(&mut Entity::default(), 1u64),
            Err(ReflectError::UnsupportedOperation {
                operation: Operation::Set,
                ..
            })
        ));

        let player = Player::model();
        let password = player.get_property("password", false).unwrap();
        assert_eq!(password.access(), Access::WRITE);
        assert!(matches!(
            password.get_value(&Player::default()),
            Err(ReflectError::UnsupportedOperation {
                operation: Operation::Get,
                ..
            })
        ));
    }

    #[test]
    fn test_override_resolution() {
        let model = Player::model();
        let names: Vec<_> = model.property_names().collect();
        assert_eq!(
            names,
            ["id", "label", "label", "password", "Secret", "type"]
        );

        let mut player = Player::default();
        let label = model.get_property("label", false).unwrap();
        assert!(Arc::ptr_eq(&label, &model.properties()[2]));

        label.set_as(&mut player, "derived".to_string()).unwrap();
        assert_eq!(player.label, "derived");
        assert!(player.entity.label.is_empty());

        // Inherited, not overridden
        player.entity.id = 77;
        assert_eq!(
            model
                .get_property("ID", true)
                .unwrap()
                .get_as::<u64>(&player)
                .unwrap(),
            77
        );
    }

    #[test]
    fn test_round_trip_all_read_write() {
        let model = SnakeData::model();
        let mut data = SnakeData::default();

        let name = model.get_property("Name", false).unwrap();
        name.set_as(&mut data, "viper".to_string()).unwrap();
        assert_eq!(name.get_as::<String>(&data).unwrap(), "viper");
        assert!(name.value_type().is::<String>());
    }

    #[derive(Reflect, Debug, Default)]
    pub struct Wrapper<T: Clone + Send + Sync + 'static> {
        pub inner: T,
    }

    #[test]
    fn test_generic_struct() {
        let model = Wrapper::<i16>::model();
        let mut wrapper = Wrapper { inner: 1i16 };
        let inner = model.get_property("inner", false).unwrap();
        inner.set_as(&mut wrapper, -5i16).unwrap();
        assert_eq!(wrapper.inner, -5);
        assert!(model.subject().is::<Wrapper<i16>>());
    }
}
