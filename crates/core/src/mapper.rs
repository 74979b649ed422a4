//! Object-to-object mapping
//!
//! Maps are registered per `(source, destination)` type pair on a
//! [`MapperConfiguration`] and frozen into a [`Mapper`].

use crate::errors::{CoreError, CoreResult};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

type MapFn = Arc<dyn Fn(&dyn Any) -> Option<Box<dyn Any + Send>> + Send + Sync>;

/// Collects type maps before the mapper is built
#[derive(Default)]
pub struct MapperConfiguration {
    maps: HashMap<(TypeId, TypeId), MapFn>,
}

impl MapperConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a map from `S` to `D` using a function
    pub fn create_map<S, D, F>(&mut self, map: F) -> &mut Self
    where
        S: 'static,
        D: Send + 'static,
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        let erased: MapFn = Arc::new(move |source: &dyn Any| {
            source
                .downcast_ref::<S>()
                .map(|source| Box::new(map(source)) as Box<dyn Any + Send>)
        });
        self.maps.insert((TypeId::of::<S>(), TypeId::of::<D>()), erased);
        self
    }

    /// Register a map from `S` to `D` through `D: From<S>`
    pub fn create_map_from<S, D>(&mut self) -> &mut Self
    where
        S: Clone + 'static,
        D: From<S> + Send + 'static,
    {
        self.create_map::<S, D, _>(|source: &S| D::from(source.clone()))
    }

    pub fn map_count(&self) -> usize {
        self.maps.len()
    }

    pub fn build(self) -> Mapper {
        Mapper { maps: Arc::new(self.maps) }
    }
}

impl std::fmt::Debug for MapperConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapperConfiguration")
            .field("maps", &self.maps.len())
            .finish()
    }
}

/// Immutable set of type maps
#[derive(Clone, Default)]
pub struct Mapper {
    maps: Arc<HashMap<(TypeId, TypeId), MapFn>>,
}

impl Mapper {
    /// Map `source` into a new `D`
    ///
    /// Mapping a type onto itself needs no registration when it is `Clone`;
    /// use [`Mapper::map_or_clone`] for that case.
    pub fn map<S, D>(&self, source: &S) -> CoreResult<D>
    where
        S: 'static,
        D: 'static,
    {
        let map = self
            .maps
            .get(&(TypeId::of::<S>(), TypeId::of::<D>()))
            .ok_or_else(CoreError::mapping::<S, D>)?;

        map(source as &dyn Any)
            .and_then(|mapped| mapped.downcast::<D>().ok())
            .map(|mapped| *mapped)
            .ok_or_else(CoreError::mapping::<S, D>)
    }

    /// Map with a registered map, or clone when `S` and `D` are the same type
    pub fn map_or_clone<S, D>(&self, source: &S) -> CoreResult<D>
    where
        S: Clone + 'static,
        D: 'static,
    {
        if TypeId::of::<S>() == TypeId::of::<D>() && !self.has_map::<S, D>() {
            let cloned: Box<dyn Any> = Box::new(source.clone());
            if let Ok(value) = cloned.downcast::<D>() {
                return Ok(*value);
            }
        }
        self.map(source)
    }

    pub fn has_map<S: 'static, D: 'static>(&self) -> bool {
        self.maps.contains_key(&(TypeId::of::<S>(), TypeId::of::<D>()))
    }

    pub fn map_count(&self) -> usize {
        self.maps.len()
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper").field("maps", &self.maps.len()).finish()
    }
}
