//! The extensible attribute bag attached to cohorts at creation.
//!
//! Extensions hang arbitrary per-cohort data (establishment modifiers,
//! provenance tags, nested parameter groups) off a cohort without the
//! core knowing the schema. The bag is an order-preserving string map
//! over a small closed set of value kinds, and is always deep-copied
//! before storage so a stored bag never aliases the caller's.

use indexmap::IndexMap;

/// An order-preserving map of attribute names to values.
///
/// Insertion order is preserved on iteration, matching the order the
/// caller built the bag in.
pub type AttrMap = IndexMap<String, AttrValue>;

/// A single attribute value.
///
/// The set of kinds is closed: numbers, text, and nested maps. This is
/// all the dynamic surface cohort extensions need, and keeping it closed
/// lets [`deep_clone`](AttrValue::deep_clone) be total.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    /// A numeric attribute.
    Number(f64),
    /// A textual attribute.
    Text(String),
    /// A nested attribute group.
    Map(AttrMap),
}

impl AttrValue {
    /// Recursively clone this value, including nested maps.
    ///
    /// The result shares no storage with `self`.
    pub fn deep_clone(&self) -> AttrValue {
        match self {
            Self::Number(n) => Self::Number(*n),
            Self::Text(s) => Self::Text(s.clone()),
            Self::Map(m) => Self::Map(deep_clone_attrs(m)),
        }
    }

    /// The numeric value, if this is a [`AttrValue::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text value, if this is a [`AttrValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The nested map, if this is a [`AttrValue::Map`].
    pub fn as_map(&self) -> Option<&AttrMap> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Deep-copy an attribute map, recursing into nested maps.
///
/// Mutating the original afterwards never affects the copy, at any
/// nesting depth.
pub fn deep_clone_attrs(attrs: &AttrMap) -> AttrMap {
    attrs
        .iter()
        .map(|(k, v)| (k.clone(), v.deep_clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_bag() -> AttrMap {
        let mut inner = AttrMap::new();
        inner.insert("rate".into(), AttrValue::Number(0.25));
        let mut bag = AttrMap::new();
        bag.insert("origin".into(), AttrValue::Text("planted".into()));
        bag.insert("params".into(), AttrValue::Map(inner));
        bag
    }

    #[test]
    fn deep_clone_is_isolated_at_top_level() {
        let mut original = nested_bag();
        let copy = deep_clone_attrs(&original);

        original.insert("origin".into(), AttrValue::Text("seeded".into()));
        assert_eq!(copy["origin"].as_text(), Some("planted"));
    }

    #[test]
    fn deep_clone_is_isolated_in_nested_maps() {
        let mut original = nested_bag();
        let copy = deep_clone_attrs(&original);

        let AttrValue::Map(inner) = original.get_mut("params").unwrap() else {
            panic!("params is a map");
        };
        inner.insert("rate".into(), AttrValue::Number(0.99));

        let copied_inner = copy["params"].as_map().unwrap();
        assert_eq!(copied_inner["rate"].as_number(), Some(0.25));
    }

    #[test]
    fn deep_clone_preserves_insertion_order() {
        let bag = nested_bag();
        let copy = deep_clone_attrs(&bag);
        let keys: Vec<&str> = copy.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["origin", "params"]);
    }

    #[test]
    fn accessors_reject_wrong_kind() {
        let v = AttrValue::Number(1.0);
        assert!(v.as_text().is_none());
        assert!(v.as_map().is_none());
        assert_eq!(v.as_number(), Some(1.0));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_attr_value() -> impl Strategy<Value = AttrValue> {
            let leaf = prop_oneof![
                (-1e9f64..1e9).prop_map(AttrValue::Number),
                "[a-z]{0,8}".prop_map(AttrValue::Text),
            ];
            leaf.prop_recursive(3, 16, 4, |inner| {
                prop::collection::vec(("[a-z]{1,6}", inner), 0..4).prop_map(|entries| {
                    AttrValue::Map(entries.into_iter().collect())
                })
            })
        }

        proptest! {
            #[test]
            fn deep_clone_preserves_structure(value in arb_attr_value()) {
                prop_assert_eq!(&value.deep_clone(), &value);
            }

            #[test]
            fn deep_clone_survives_clearing_the_original(
                entries in prop::collection::vec(("[a-z]{1,6}", arb_attr_value()), 0..6),
            ) {
                let mut original: AttrMap = entries.into_iter().collect();
                let expected = deep_clone_attrs(&original);
                let copy = deep_clone_attrs(&original);
                original.clear();
                prop_assert_eq!(copy, expected);
            }
        }
    }
}
