//! Layer infrastructure for the compositor.
//!
//! Each drawing stage of an exported image is a [`LayerEffect`]: it draws
//! into the shared [`RenderContext`] and may emit typed properties (such as
//! the computed [`TextLayout`](crate::text::TextLayout) or the final
//! [`LogoPlacement`]) for callers and downstream layers to read.
//!
//! # Pipeline
//!
//! ```text
//! background fill
//!     │
//!     ▼
//! background image (optional, 30% + 60% black)
//!     │
//!     ▼
//! pattern tile (repeat)
//!     │
//!     ▼
//! title + subtitle
//!     │
//!     ▼
//! logo (optional)
//! ```
//!
//! [`Layer`] is the cache half of the same idea: a configuration plus a
//! version counter and a cached value that is dropped whenever the
//! configuration meaningfully changes.

pub mod backdrop;
pub mod background;
pub mod logo;
pub mod pattern;
pub mod text;

pub use backdrop::{BackdropLayer, cover_rect};
pub use background::BackgroundLayer;
pub use logo::{LogoLayer, fit_logo};
pub use pattern::{PatternConfig, PatternLayer};
pub use text::TextLayer;

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::error::LoadError;
use crate::surface::{PixelSurface, RectF, SizePx};

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the rendering pipeline.
///
/// Layers draw into `surface` and can publish properties for later layers
/// and for the caller.
///
/// # Example
///
/// ```ignore
/// ctx.set(LogoPlacement(rect));
///
/// if let Some(LogoPlacement(rect)) = ctx.get::<LogoPlacement>() {
///     // ...
/// }
/// ```
pub struct RenderContext {
    /// The surface every layer draws into.
    pub surface: PixelSurface,

    /// Typed property bag for inter-layer communication.
    properties: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl RenderContext {
    pub fn new(surface: PixelSurface) -> Self {
        Self {
            surface,
            properties: HashMap::new(),
        }
    }

    pub fn size(&self) -> SizePx {
        self.surface.size()
    }

    /// Sets a typed property that downstream layers can read.
    pub fn set<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Gets a typed property set by an upstream layer.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|b| b.downcast_ref())
    }

    /// Checks if a property has been set.
    pub fn has<T: Any + Send + Sync>(&self) -> bool {
        self.properties.contains_key(&TypeId::of::<T>())
    }

    /// Consumes the context, keeping only the drawn surface.
    pub fn into_surface(self) -> PixelSurface {
        self.surface
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("surface", &self.surface)
            .field("properties", &self.properties.len())
            .finish()
    }
}

// ============================================================================
// Common Properties
// ============================================================================

/// Where the logo ended up on the surface.
///
/// Emitted by [`LogoLayer`] only when a logo was actually drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoPlacement(pub RectF);

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer configuration types.
///
/// Implementations must detect when a configuration meaningfully differs
/// from another, which drives cache invalidation.
pub trait LayerConfig: Clone {
    /// Returns true if this config differs from another in a way that
    /// would produce different output.
    fn differs_from(&self, other: &Self) -> bool;
}

/// A drawing stage of the compositor.
///
/// The separation of [`transform`](Self::transform) and [`emit`](Self::emit)
/// keeps drawing and property publication apart: `emit` only runs after a
/// successful `transform`.
pub trait LayerEffect {
    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Draws into `ctx.surface`.
    fn transform(&self, ctx: &mut RenderContext) -> Result<(), LoadError>;

    /// Publishes properties for downstream layers. Emits nothing by default.
    fn emit(&self, _ctx: &mut RenderContext) {}
}

/// Runs one layer: transform, then emit.
///
/// A failing layer is skipped with a warning and leaves the rest of the
/// pipeline running. Returns whether the layer was applied.
pub fn apply(layer: &dyn LayerEffect, ctx: &mut RenderContext) -> bool {
    match layer.transform(ctx) {
        Ok(()) => {
            layer.emit(ctx);
            tracing::debug!(layer = layer.name(), "layer applied");
            true
        }
        Err(err) => {
            tracing::warn!(layer = layer.name(), error = %err, "skipping layer");
            false
        }
    }
}

// ============================================================================
// Generic Layer
// ============================================================================

/// A configuration with a version counter and a lazily computed value.
///
/// The version increments on every meaningful configuration change, and the
/// cached value is dropped with it.
#[derive(Debug, Clone)]
pub struct Layer<C: LayerConfig, V> {
    config: C,
    version: u64,
    cache: Option<V>,
}

impl<C: LayerConfig, V> Layer<C, V> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            version: 0,
            cache: None,
        }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Returns the current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the configuration. Returns true if it changed.
    ///
    /// Clears the cache and increments version if the config differs.
    pub fn set_config(&mut self, config: C) -> bool {
        if self.config.differs_from(&config) {
            self.config = config;
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Drops the cached value and increments version.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache = None;
    }

    /// Returns the cached value, if one is stored.
    pub fn get_cached(&self) -> Option<&V> {
        self.cache.as_ref()
    }

    /// Returns the cached value, computing it from the config on a miss.
    pub fn get_or_render(&mut self, render: impl FnOnce(&C) -> V) -> &V {
        let config = &self.config;
        self.cache.get_or_insert_with(|| render(config))
    }
}
