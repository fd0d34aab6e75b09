use std::fmt;
use std::sync::Arc;

use crate::error::PropertyError;
use crate::registry::PropertyRegistry;

/// Maximum property name length in bytes.
pub const PROP_NAME_MAX: usize = 31;

/// One value of an enum property's domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub value: u32,
    pub name: String,
}

impl EnumVariant {
    pub fn new(value: u32, name: impl Into<String>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }
}

/// The domain of a property: a bounded integer range or a closed enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    Range { value: u32, min: u32, max: u32 },
    Enum {
        value: u32,
        /// Variants in registration order.
        variants: Vec<EnumVariant>,
    },
}

/// Derivation hook recomputing a property from the current registry state.
///
/// Must be pure: it reads a snapshot and returns the new value. It is run
/// only by [`PropertyRegistry::refresh`].
pub type UpdateFn = Arc<dyn Fn(&PropertyRegistry) -> u32 + Send + Sync>;

/// A named, domain-checked scalar owned by a [`PropertyRegistry`].
#[derive(Clone)]
pub struct Property {
    name: String,
    kind: PropertyKind,
    update: Option<UpdateFn>,
}

impl Property {
    pub(crate) fn new(name: String, kind: PropertyKind, update: Option<UpdateFn>) -> Self {
        Self { name, kind, update }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self.kind, PropertyKind::Range { .. })
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        matches!(self.kind, PropertyKind::Enum { .. })
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> u32 {
        match &self.kind {
            PropertyKind::Range { value, .. } => *value,
            PropertyKind::Enum { value, .. } => *value,
        }
    }

    pub(crate) fn update_fn(&self) -> Option<UpdateFn> {
        self.update.clone()
    }

    /// Name of the variant matching the current value, for enum properties.
    pub fn variant_name(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Enum { value, variants } => variants
                .iter()
                .find(|v| v.value == *value)
                .map(|v| v.name.as_str()),
            PropertyKind::Range { .. } => None,
        }
    }

    /// Validate `value` against this property's domain and store it.
    ///
    /// Never clamps: a value outside a range's bounds or absent from an
    /// enum's variant set is rejected and the stored value is untouched.
    pub(crate) fn set_value(&mut self, new: u32) -> Result<(), PropertyError> {
        match &mut self.kind {
            PropertyKind::Range { value, min, max } => {
                if new < *min || new > *max {
                    return Err(PropertyError::OutOfRange {
                        name: self.name.clone(),
                        value: new,
                        min: *min,
                        max: *max,
                    });
                }
                *value = new;
                Ok(())
            }
            PropertyKind::Enum { value, variants } => {
                if !variants.iter().any(|v| v.value == new) {
                    return Err(PropertyError::InvalidEnumValue {
                        name: self.name.clone(),
                        value: new,
                    });
                }
                *value = new;
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("update", &self.update.as_ref().map(|_| "..."))
            .finish()
    }
}
