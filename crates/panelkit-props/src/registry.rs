use rustc_hash::FxHashMap;
use tracing::warn;

use crate::error::PropertyError;
use crate::property::{EnumVariant, PROP_NAME_MAX, Property, PropertyKind, UpdateFn};

/// Name-keyed store of a panel's [`Property`] objects.
///
/// One registry per panel. Names are unique; duplicate registration fails and
/// leaves the existing entry untouched.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    props: FxHashMap<String, Property>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a range property. `init` must lie within `[min, max]`.
    pub fn add_range(
        &mut self,
        name: &str,
        init: u32,
        min: u32,
        max: u32,
    ) -> Result<(), PropertyError> {
        self.add_range_with(name, init, min, max, None)
    }

    /// Register a range property with an update hook.
    pub fn add_range_with(
        &mut self,
        name: &str,
        init: u32,
        min: u32,
        max: u32,
        update: Option<UpdateFn>,
    ) -> Result<(), PropertyError> {
        self.check_new_name(name)?;
        if min > max {
            return Err(PropertyError::InvalidArgument {
                reason: format!("inverted bounds [{min}, {max}] for property {name:?}"),
            });
        }
        if init < min || init > max {
            return Err(PropertyError::OutOfRange {
                name: name.to_string(),
                value: init,
                min,
                max,
            });
        }
        self.props.insert(
            name.to_string(),
            Property::new(
                name.to_string(),
                PropertyKind::Range {
                    value: init,
                    min,
                    max,
                },
                update,
            ),
        );
        Ok(())
    }

    /// Register an enum property. `init` must be one of `variants`.
    pub fn add_enum(
        &mut self,
        name: &str,
        init: u32,
        variants: Vec<EnumVariant>,
    ) -> Result<(), PropertyError> {
        self.add_enum_with(name, init, variants, None)
    }

    /// Register an enum property with an update hook.
    pub fn add_enum_with(
        &mut self,
        name: &str,
        init: u32,
        variants: Vec<EnumVariant>,
        update: Option<UpdateFn>,
    ) -> Result<(), PropertyError> {
        self.check_new_name(name)?;
        if variants.is_empty() {
            return Err(PropertyError::InvalidArgument {
                reason: format!("empty variant list for enum property {name:?}"),
            });
        }
        for (i, v) in variants.iter().enumerate() {
            if variants[..i].iter().any(|prev| prev.value == v.value) {
                return Err(PropertyError::InvalidArgument {
                    reason: format!(
                        "duplicate variant value {} in enum property {name:?}",
                        v.value
                    ),
                });
            }
        }
        if !variants.iter().any(|v| v.value == init) {
            return Err(PropertyError::InvalidEnumValue {
                name: name.to_string(),
                value: init,
            });
        }
        self.props.insert(
            name.to_string(),
            Property::new(
                name.to_string(),
                PropertyKind::Enum {
                    value: init,
                    variants,
                },
                update,
            ),
        );
        Ok(())
    }

    /// Look up a property by name.
    #[inline]
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.props.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.props.contains_key(name)
    }

    /// Current value of a property.
    pub fn get_value(&self, name: &str) -> Result<u32, PropertyError> {
        self.props
            .get(name)
            .map(Property::value)
            .ok_or_else(|| PropertyError::NotFound {
                name: name.to_string(),
            })
    }

    /// Set a property's value, validating it against the property's domain.
    ///
    /// A rejected value leaves the stored value unchanged.
    pub fn set_value(&mut self, name: &str, value: u32) -> Result<(), PropertyError> {
        let prop = self.props.get_mut(name).ok_or_else(|| PropertyError::NotFound {
            name: name.to_string(),
        })?;
        prop.set_value(value).inspect_err(|err| {
            warn!(name, value, %err, "property write rejected");
        })
    }

    /// Run a property's update hook, if any, and store the result.
    ///
    /// Properties without a hook are left as-is. Returns the value the
    /// property holds afterwards. This is the only path that invokes hooks.
    pub fn refresh(&mut self, name: &str) -> Result<u32, PropertyError> {
        let update = self
            .props
            .get(name)
            .ok_or_else(|| PropertyError::NotFound {
                name: name.to_string(),
            })?
            .update_fn();
        if let Some(update) = update {
            let value = update(self);
            self.set_value(name, value)?;
        }
        self.get_value(name)
    }

    /// Value of the named variant of an enum property.
    pub fn enum_value_of(&self, name: &str, variant: &str) -> Result<u32, PropertyError> {
        let prop = self.props.get(name).ok_or_else(|| PropertyError::NotFound {
            name: name.to_string(),
        })?;
        match prop.kind() {
            PropertyKind::Enum { variants, .. } => variants
                .iter()
                .find(|v| v.name == variant)
                .map(|v| v.value)
                .ok_or_else(|| PropertyError::InvalidArgument {
                    reason: format!("no variant {variant:?} in enum property {name:?}"),
                }),
            PropertyKind::Range { .. } => Err(PropertyError::InvalidArgument {
                reason: format!("property {name:?} is not an enum"),
            }),
        }
    }

    /// Remove one property.
    pub fn remove(&mut self, name: &str) -> Result<(), PropertyError> {
        self.props
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| PropertyError::NotFound {
                name: name.to_string(),
            })
    }

    /// Remove every property. Idempotent.
    pub fn clear(&mut self) {
        self.props.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    fn check_new_name(&self, name: &str) -> Result<(), PropertyError> {
        if name.is_empty() || name.len() > PROP_NAME_MAX {
            return Err(PropertyError::InvalidName {
                name: name.to_string(),
            });
        }
        if self.props.contains_key(name) {
            return Err(PropertyError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn mode_variants() -> Vec<EnumVariant> {
        vec![EnumVariant::new(0, "ns"), EnumVariant::new(1, "hs")]
    }

    #[test]
    fn range_round_trip_across_domain() {
        let mut props = PropertyRegistry::new();
        props.add_range("rate", 60, 48, 120).unwrap();
        for v in 48..=120 {
            props.set_value("rate", v).unwrap();
            assert_eq!(props.get_value("rate").unwrap(), v);
        }
    }

    #[test]
    fn range_rejects_outside_bounds_without_side_effect() {
        let mut props = PropertyRegistry::new();
        props.add_range("rate", 60, 48, 120).unwrap();
        for v in [0, 47, 121, u32::MAX] {
            assert!(props.set_value("rate", v).is_err());
            assert_eq!(props.get_value("rate").unwrap(), 60);
        }
    }

    #[test]
    fn enum_domain_closure() {
        let mut props = PropertyRegistry::new();
        props.add_enum("mode", 0, mode_variants()).unwrap();

        props.set_value("mode", 1).unwrap();
        assert_eq!(props.get_value("mode").unwrap(), 1);

        assert_eq!(
            props.set_value("mode", 7),
            Err(PropertyError::InvalidEnumValue {
                name: "mode".into(),
                value: 7,
            })
        );
        assert_eq!(props.get_value("mode").unwrap(), 1);
    }

    #[test]
    fn enum_init_must_be_a_variant() {
        let mut props = PropertyRegistry::new();
        assert!(matches!(
            props.add_enum("mode", 9, mode_variants()),
            Err(PropertyError::InvalidEnumValue { .. })
        ));
        assert!(!props.contains("mode"));
    }

    #[test]
    fn duplicate_name_rejected_and_prior_entry_untouched() {
        let mut props = PropertyRegistry::new();
        props.add_range("rate", 60, 0, 120).unwrap();
        assert_eq!(
            props.add_range("rate", 0, 0, 10),
            Err(PropertyError::DuplicateName {
                name: "rate".into()
            })
        );
        assert_eq!(props.get_value("rate").unwrap(), 60);
    }

    #[test]
    fn name_length_bound() {
        let mut props = PropertyRegistry::new();
        let long = "x".repeat(PROP_NAME_MAX + 1);
        assert!(matches!(
            props.add_range(&long, 0, 0, 1),
            Err(PropertyError::InvalidName { .. })
        ));
        assert!(matches!(
            props.add_range("", 0, 0, 1),
            Err(PropertyError::InvalidName { .. })
        ));
        let exact = "x".repeat(PROP_NAME_MAX);
        props.add_range(&exact, 0, 0, 1).unwrap();
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut props = PropertyRegistry::new();
        assert!(matches!(
            props.add_range("rate", 5, 10, 0),
            Err(PropertyError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn refresh_runs_hook_and_validates_result() {
        let mut props = PropertyRegistry::new();
        props.add_range("base", 10, 0, 100).unwrap();
        props
            .add_range_with(
                "derived",
                0,
                0,
                100,
                Some(Arc::new(|reg: &PropertyRegistry| {
                    reg.get_value("base").unwrap_or(0) * 2
                })),
            )
            .unwrap();

        // Not recomputed by set/get.
        props.set_value("base", 30).unwrap();
        assert_eq!(props.get_value("derived").unwrap(), 0);

        assert_eq!(props.refresh("derived").unwrap(), 60);
        assert_eq!(props.get_value("derived").unwrap(), 60);

        // Hook result outside the domain is rejected like any other write.
        props.set_value("base", 80).unwrap();
        assert!(props.refresh("derived").is_err());
        assert_eq!(props.get_value("derived").unwrap(), 60);
    }

    #[test]
    fn refresh_without_hook_is_a_read() {
        let mut props = PropertyRegistry::new();
        props.add_range("rate", 60, 0, 120).unwrap();
        assert_eq!(props.refresh("rate").unwrap(), 60);
    }

    #[test]
    fn enum_value_of_reverse_lookup() {
        let mut props = PropertyRegistry::new();
        props.add_enum("mode", 0, mode_variants()).unwrap();
        assert_eq!(props.enum_value_of("mode", "hs").unwrap(), 1);
        assert!(props.enum_value_of("mode", "turbo").is_err());
    }

    #[test]
    fn remove_and_clear() {
        let mut props = PropertyRegistry::new();
        props.add_range("a", 0, 0, 1).unwrap();
        props.add_range("b", 0, 0, 1).unwrap();
        props.remove("a").unwrap();
        assert!(matches!(
            props.remove("a"),
            Err(PropertyError::NotFound { .. })
        ));
        props.clear();
        props.clear();
        assert!(props.is_empty());
    }
}
