#![forbid(unsafe_code)]

//! Typed property store for panel state.
//!
//! A [`PropertyRegistry`] is the single source of truth for a panel's scalar
//! state: refresh rate, display mode, chip revision bytes and the like. Each
//! [`Property`] is either a range-bounded integer or an enumeration, and every
//! write is validated against that domain; out-of-domain values are rejected,
//! never clamped.
//!
//! # Invariants
//!
//! 1. A range property's value is always within `[min, max]`.
//! 2. An enum property's value always equals one of its registered variants.
//! 3. A failed operation leaves the registry untouched.
//! 4. Update hooks run only when [`PropertyRegistry::refresh`] is called,
//!    never implicitly from a get or set.
//!
//! # Example
//!
//! ```
//! use panelkit_props::PropertyRegistry;
//!
//! let mut props = PropertyRegistry::new();
//! props.add_range("panel_refresh_rate", 60, 0, 120).unwrap();
//! props.set_value("panel_refresh_rate", 120).unwrap();
//! assert_eq!(props.get_value("panel_refresh_rate").unwrap(), 120);
//! assert!(props.set_value("panel_refresh_rate", 144).is_err());
//! ```
//!
//! # Thread safety
//!
//! The registry is `Send` but deliberately not shared-mutable: a panel owns
//! exactly one registry, and callers that touch it from multiple contexts must
//! serialize access externally (a set followed by a dependent read has to be
//! atomic from the caller's point of view).

mod error;
mod property;
mod registry;

pub use error::PropertyError;
pub use property::{EnumVariant, PROP_NAME_MAX, Property, PropertyKind, UpdateFn};
pub use registry::PropertyRegistry;
