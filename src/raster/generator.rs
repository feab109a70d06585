//! Name-keyed layer registry and operator dispatch
//!
//! The generator owns every layer. Operators borrow their targets for the
//! length of one call; names are resolved before anything is touched, so an
//! unknown target or mask name never mutates the registry.

use std::collections::HashMap;

use log::{debug, warn};

use crate::io::error::{GeneratorError, Result, layer_not_found};
use crate::math::random::NoiseSource;
use crate::operators::{BinaryOperator, UnaryOperator};
use crate::raster::Layer;

/// Registry of named layers
#[derive(Debug, Clone, Default)]
pub struct Generator {
    layers: HashMap<String, Layer>,
}

impl Generator {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a zero-initialised layer under `name`
    ///
    /// Re-creating an existing name keeps the existing layer untouched and
    /// returns `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn create_layer(
        &mut self,
        name: &str,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<bool> {
        if self.layers.contains_key(name) {
            warn!("Layer '{name}' already exists, keeping the original");
            return Ok(false);
        }

        let layer = Layer::new(width, height, channels)?;
        debug!("Created layer '{name}' ({width}x{height}x{channels})");
        self.layers.insert(name.to_owned(), layer);
        Ok(true)
    }

    /// Look up a layer by name
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Whether a layer with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Number of registered layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the registry holds no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Registered names, sorted
    pub fn layer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.layers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Apply a unary operator to a named layer, optionally masked
    ///
    /// A mask naming the target itself reads a snapshot taken before the call.
    ///
    /// # Errors
    ///
    /// Returns `LayerNotFound` if the target or mask is absent, or whatever
    /// the operator reports; a name failure leaves every layer untouched
    pub fn apply_unary(
        &mut self,
        layer: &str,
        operator: &UnaryOperator,
        mask: Option<&str>,
        rng: &mut NoiseSource,
    ) -> Result<()> {
        self.require(layer)?;
        if let Some(mask) = mask {
            self.require(mask)?;
        }

        let snapshot = mask
            .filter(|&name| name == layer)
            .and_then(|name| self.layers.get(name).cloned());
        let mut target = self.layers.remove(layer).ok_or_else(|| layer_not_found(layer))?;

        let outcome = match resolve_mask(&self.layers, snapshot.as_ref(), mask) {
            Some(mask_layer) => operator.apply_masked(&mut target, mask_layer, rng),
            None => operator.apply(&mut target, rng),
        };

        self.layers.insert(layer.to_owned(), target);
        outcome
    }

    /// Apply a binary operator to two named layers, optionally masked
    ///
    /// Naming the same layer twice runs the operator against a copy of it as
    /// the second operand. A mask naming either operand reads a snapshot.
    ///
    /// # Errors
    ///
    /// Returns `LayerNotFound` if any name is absent, or whatever the
    /// operator reports; a name failure leaves every layer untouched
    pub fn apply_binary(
        &mut self,
        layer0: &str,
        layer1: &str,
        operator: &BinaryOperator,
        mask: Option<&str>,
    ) -> Result<()> {
        self.require(layer0)?;
        self.require(layer1)?;
        if let Some(mask) = mask {
            self.require(mask)?;
        }

        let snapshot = mask
            .filter(|&name| name == layer0 || name == layer1)
            .and_then(|name| self.layers.get(name).cloned());
        let aliased = layer0 == layer1;

        let mut first = self.layers.remove(layer0).ok_or_else(|| layer_not_found(layer0))?;
        let second = if aliased {
            Some(first.clone())
        } else {
            self.layers.remove(layer1)
        };
        let Some(mut second) = second else {
            self.layers.insert(layer0.to_owned(), first);
            return Err(layer_not_found(layer1));
        };

        let outcome = match resolve_mask(&self.layers, snapshot.as_ref(), mask) {
            Some(mask_layer) => operator.apply_masked(&mut first, &mut second, mask_layer),
            None => operator.apply(&mut first, &mut second),
        };

        self.layers.insert(layer0.to_owned(), first);
        if !aliased {
            self.layers.insert(layer1.to_owned(), second);
        }
        outcome
    }

    /// Read one element of a named layer
    ///
    /// # Errors
    ///
    /// Returns `LayerNotFound` for an unknown name and `OutOfBounds` for a
    /// position or channel outside the layer
    pub fn sample(&self, layer: &str, x: usize, y: usize, channel: usize) -> Result<f64> {
        let found = self.layers.get(layer).ok_or_else(|| layer_not_found(layer))?;
        found
            .get(x, y, channel)
            .ok_or_else(|| GeneratorError::OutOfBounds {
                layer: layer.to_owned(),
                position: (x, y),
                channel,
            })
    }

    fn require(&self, name: &str) -> Result<()> {
        if self.layers.contains_key(name) {
            Ok(())
        } else {
            Err(layer_not_found(name))
        }
    }
}

// A snapshot wins over the registry so aliased masks see pre-call values
fn resolve_mask<'a>(
    layers: &'a HashMap<String, Layer>,
    snapshot: Option<&'a Layer>,
    mask: Option<&str>,
) -> Option<&'a Layer> {
    snapshot.or_else(|| mask.and_then(|name| layers.get(name)))
}
