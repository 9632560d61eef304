//! Model registry - type identity to model
//!
//! Bootstrap code registers one [`TypeModel`] per reflectable type; consumers
//! then look models up by type. A registry is an ordinary value so tests and
//! hosts can create their own and pass it around; [`global()`] provides a
//! shared process-wide instance for hosts that want one.
//!
//! # Bootstrap ordering
//!
//! A model must be registered before the first lookup for its type. Either
//! run an explicit bootstrap phase up front:
//!
//! ```ignore
//! let registry = ModelRegistry::new();
//! registry.register_type::<SnakeData>();
//! registry.register_type::<Player>();
//! // ... serve requests
//! ```
//!
//! or let each type register itself on first use:
//!
//! ```ignore
//! let model = registry.get_or_register::<SnakeData>();
//! ```

use std::any::{Any, TypeId};
use std::sync::{Arc, LazyLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::config::ReflectConfig;
use crate::error::{ReflectError, ReflectResult};
use crate::model::TypeModel;
use crate::reflect::Reflect;
use crate::types::TypeInfo;

/// Shared process-wide registry
static GLOBAL: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::new);

/// Get the process-wide registry
pub fn global() -> &'static ModelRegistry {
    &GLOBAL
}

/// Map from type identity to its model
#[derive(Default)]
pub struct ModelRegistry {
    models: DashMap<TypeId, Arc<TypeModel>>,
    config: ReflectConfig,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry applying `config` to the models it builds
    pub fn with_config(config: ReflectConfig) -> Self {
        Self {
            models: DashMap::new(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ReflectConfig {
        &self.config
    }

    /// Store `model` under its subject type, replacing any previous model
    pub fn register(&self, model: TypeModel) -> Arc<TypeModel> {
        let subject = model.subject();
        let model = Arc::new(model);

        match self.models.insert(subject.id(), model.clone()) {
            Some(previous) if self.config.warn_on_replace && previous.len() != model.len() => {
                warn!(
                    "Replaced model for {} ({} -> {} properties)",
                    subject,
                    previous.len(),
                    model.len()
                );
            }
            Some(_) => debug!("Re-registered model for {}", subject),
            None => debug!(
                "Registered model for {} ({} properties)",
                subject,
                model.len()
            ),
        }

        model
    }

    /// Register several models
    pub fn register_all(&self, models: impl IntoIterator<Item = TypeModel>) {
        for model in models {
            self.register(model);
        }
    }

    /// Build and register the model of `T`, replacing any previous one
    pub fn register_type<T: Reflect>(&self) -> Arc<TypeModel> {
        self.register(self.build_model::<T>())
    }

    /// Get the model of `T`, building and registering it on first use
    ///
    /// The model is built at most once per registry even when many threads
    /// ask for it at the same time. `T::declare` runs while the registry
    /// entry for `T` is locked, so it must not call back into this registry.
    pub fn get_or_register<T: Reflect>(&self) -> Arc<TypeModel> {
        if let Some(model) = self.models.get(&TypeId::of::<T>()) {
            return model.value().clone();
        }

        match self.models.entry(TypeId::of::<T>()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let model = Arc::new(self.build_model::<T>());
                debug!(
                    "Registered model for {} on first use ({} properties)",
                    model.subject(),
                    model.len()
                );
                entry.insert(model.clone());
                model
            }
        }
    }

    /// Get the model registered for `type_id`
    ///
    /// A bare [`TypeId`] carries no name, so the error only shows the id.
    /// Prefer [`get_info`](Self::get_info) or [`get_type`](Self::get_type)
    /// when the type name is at hand.
    ///
    /// # Errors
    /// `ModelNotRegistered` if no model was registered for that type.
    pub fn get(&self, type_id: TypeId) -> ReflectResult<Arc<TypeModel>> {
        self.models
            .get(&type_id)
            .map(|model| model.value().clone())
            .ok_or_else(|| ReflectError::ModelNotRegistered {
                type_name: format!("{:?}", type_id),
            })
    }

    /// Get the model registered for `info`, naming the type on failure
    pub fn get_info(&self, info: TypeInfo) -> ReflectResult<Arc<TypeModel>> {
        self.get(info.id())
            .map_err(|_| ReflectError::ModelNotRegistered {
                type_name: info.name().to_string(),
            })
    }

    /// Get the model registered for `T`
    pub fn get_type<T: Any>(&self) -> ReflectResult<Arc<TypeModel>> {
        self.get_info(TypeInfo::of::<T>())
    }

    /// Get the model for the runtime type of `instance`
    ///
    /// Like [`get`](Self::get), the error can only show the [`TypeId`].
    pub fn get_for(&self, instance: &dyn Any) -> ReflectResult<Arc<TypeModel>> {
        self.get(instance.type_id())
    }

    /// Check whether a model is registered for `type_id`
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.models.contains_key(&type_id)
    }

    /// Number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Identities of all registered types, in no particular order
    pub fn registered_types(&self) -> Vec<TypeInfo> {
        self.models.iter().map(|entry| entry.value().subject()).collect()
    }

    fn build_model<T: Reflect>(&self) -> TypeModel {
        T::model().with_lookup_cache(self.config.lookup_cache)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::model::ModelBuilder;
    use crate::property::Property;

    #[derive(Debug, Default)]
    struct SnakeData {
        over_the_top: i32,
    }

    impl Reflect for SnakeData {
        fn declare(builder: &mut ModelBuilder<Self>) {
            builder.read_write(
                "OverTheTop",
                |s: &SnakeData| s.over_the_top,
                |s: &mut SnakeData, v| s.over_the_top = v,
            );
        }
    }

    struct Unregistered;

    #[test]
    fn test_register_and_get() {
        let registry = ModelRegistry::new();
        assert!(registry.is_empty());

        registry.register_type::<SnakeData>();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(TypeId::of::<SnakeData>()));

        let by_id = registry.get(TypeId::of::<SnakeData>()).unwrap();
        let by_type = registry.get_type::<SnakeData>().unwrap();
        assert!(Arc::ptr_eq(&by_id, &by_type));
        assert!(by_id.subject().is::<SnakeData>());
    }

    #[test]
    fn test_get_for_runtime_type() {
        let registry = ModelRegistry::new();
        registry.register_type::<SnakeData>();

        let mut data = SnakeData::default();
        let model = registry.get_for(&data).unwrap();
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
    fn test_unregistered_type() {
        let registry = ModelRegistry::new();
        registry.register_type::<SnakeData>();

        let err = registry.get_type::<Unregistered>().unwrap_err();
        assert_eq!(
            err,
            ReflectError::ModelNotRegistered {
                type_name: std::any::type_name::<Unregistered>().to_string(),
            }
        );
        assert!(matches!(
            registry.get(TypeId::of::<Unregistered>()),
            Err(ReflectError::ModelNotRegistered { .. })
        ));
        assert!(matches!(
            registry.get_for(&Unregistered),
            Err(ReflectError::ModelNotRegistered { .. })
        ));
    }

    #[test]
    fn test_get_info_names_missing_type() {
        let registry = ModelRegistry::new();
        registry.register_type::<SnakeData>();

        let err = registry
            .get_info(TypeInfo::of::<Unregistered>())
            .unwrap_err();
        assert!(err.to_string().contains("Unregistered"));

        // Without a name only the id is available
        let err = registry.get(TypeId::of::<Unregistered>()).unwrap_err();
        assert!(err.to_string().contains("TypeId"));

        let model = registry.get_info(TypeInfo::of::<SnakeData>()).unwrap();
        assert!(model.subject().is::<SnakeData>());
    }

    #[test]
    fn test_register_overwrites() {
        let registry = ModelRegistry::new();
        let first = registry.register_type::<SnakeData>();

        let replacement = TypeModel::new(
            TypeInfo::of::<SnakeData>(),
            vec![Property::<SnakeData, i32>::new("Other")
                .with_getter(|s: &SnakeData| s.over_the_top)
                .into_handle()],
        );
        let second = registry.register(replacement);

        assert_eq!(registry.len(), 1);
        let current = registry.get_type::<SnakeData>().unwrap();
        assert!(Arc::ptr_eq(&current, &second));
        assert!(!Arc::ptr_eq(&current, &first));
        assert!(current.get_property("Other", false).is_ok());
        assert!(current.get_property("OverTheTop", false).is_err());
    }

    #[test]
    fn test_get_or_register_builds_once() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);

        struct Counted;

        impl Reflect for Counted {
            fn declare(_builder: &mut ModelBuilder<Self>) {
                BUILDS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let registry = ModelRegistry::new();
        let models: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.get_or_register::<Counted>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
        assert!(models.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_config_disables_lookup_cache() {
        let registry = ModelRegistry::with_config(ReflectConfig {
            lookup_cache: false,
            ..Default::default()
        });
        let model = registry.register_type::<SnakeData>();
        model.get_property("OverTheTop", false).unwrap();
        assert_eq!(model.cache_len(), 0);
        assert!(!registry.config().lookup_cache);
    }

    #[test]
    fn test_registered_types() {
        let registry = ModelRegistry::new();
        registry.register_all([
            SnakeData::model(),
            TypeModel::new(TypeInfo::of::<Unregistered>(), Vec::new()),
        ]);

        let mut names: Vec<_> = registry
            .registered_types()
            .into_iter()
            .map(|t| t.name())
            .collect();
        names.sort_unstable();
        assert_eq!(names.len(), 2);
        assert!(names.iter().any(|n| n.ends_with("SnakeData")));
    }

    #[test]
    fn test_global_registry() {
        struct GlobalOnly;

        impl Reflect for GlobalOnly {
            fn declare(_builder: &mut ModelBuilder<Self>) {}
        }

        let model = global().get_or_register::<GlobalOnly>();
        assert!(Arc::ptr_eq(&model, &global().get_type::<GlobalOnly>().unwrap()));
        assert!(model.is_empty());
    }
}
