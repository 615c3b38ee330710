//! Map instance lifecycle: which instance is current, how far it has
//! loaded, and the generation tag that lets late async results detect that
//! the instance they were started for is gone.

use crate::core::geo::Point;
use crate::core::map::MapOptions;
use crate::traits::{MapEngine, MapInstance};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic tag of a map instance. Every new instance, and every unmount,
/// advances it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Generation(self.0 + 1)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// `Uninitialized -> Loading -> Ready`; back to `Uninitialized` on unmount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Uninitialized,
    /// Instance exists, style not loaded yet.
    Loading,
    Ready,
}

impl fmt::Display for ReadyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadyState::Uninitialized => write!(f, "uninitialized"),
            ReadyState::Loading => write!(f, "loading"),
            ReadyState::Ready => write!(f, "ready"),
        }
    }
}

/// The display element an instance renders into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Container id handed to the engine
    pub id: String,
    /// Size in CSS pixels
    pub size: Point,
}

impl Surface {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            size: Point::new(width, height),
        }
    }
}

/// Owns the surface reference and the single current instance.
pub struct ViewSlot<I> {
    surface: Option<Surface>,
    instance: Option<I>,
    generation: Generation,
    state: ReadyState,
}

impl<I: MapInstance> ViewSlot<I> {
    pub fn new() -> Self {
        Self {
            surface: None,
            instance: None,
            generation: Generation::default(),
            state: ReadyState::Uninitialized,
        }
    }

    /// Binds a surface. An instance bound to a previous surface is dropped.
    pub fn mount(&mut self, surface: Surface) {
        if self.instance.is_some() {
            self.discard();
        }
        log::debug!("surface '{}' mounted", surface.id);
        self.surface = Some(surface);
    }

    /// Drops the instance and forgets the surface.
    pub fn unmount(&mut self) -> Option<Surface> {
        self.discard();
        let surface = self.surface.take();
        if let Some(surface) = &surface {
            log::debug!("surface '{}' unmounted", surface.id);
        }
        surface
    }

    /// Builds a new instance over the mounted surface, replacing the current
    /// one. Returns `Ok(None)` when no surface is mounted.
    pub fn create<E>(&mut self, engine: &mut E, options: &MapOptions) -> Result<Option<Generation>>
    where
        E: MapEngine<Instance = I>,
    {
        let Some(surface) = self.surface.as_ref() else {
            log::debug!("no surface mounted, skipping map creation");
            return Ok(None);
        };

        let instance = engine.create(surface, options)?;
        let surface_id = surface.id.clone();
        if self.instance.is_some() {
            self.discard();
        }
        self.instance = Some(instance);
        self.generation = self.generation.next();
        self.state = ReadyState::Loading;
        log::debug!("map instance {} created on '{}'", self.generation, surface_id);
        Ok(Some(self.generation))
    }

    /// Loading -> Ready. Ignored in any other state.
    pub fn mark_ready(&mut self) -> bool {
        if self.state == ReadyState::Loading {
            self.state = ReadyState::Ready;
            log::debug!("map instance {} ready", self.generation);
            true
        } else {
            false
        }
    }

    fn discard(&mut self) {
        if self.instance.take().is_some() {
            log::debug!("map instance {} discarded", self.generation);
        }
        self.generation = self.generation.next();
        self.state = ReadyState::Uninitialized;
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.instance.is_some() && self.generation == generation
    }

    pub fn instance(&self) -> Option<&I> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut I> {
        self.instance.as_mut()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> ReadyState {
        self.state
    }
}

impl<I: MapInstance> Default for ViewSlot<I> {
    fn default() -> Self {
        Self::new()
    }
}
