// File: src/record.rs
// Purpose: Static description of a record's fields, consumed by the traversal engine
//
// `#[derive(Record)]` generates these tables. They can also be written by hand
// with the `Field` builder.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// A value with named, ordered fields that can be validated.
///
/// Automatically implemented by `#[derive(Record)]`
///
/// # Example
///
/// ```rust
/// use rusty_validate::{Field, Inspect, Record};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Record for Point {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("x", &self.x).with_tags(&[("validate", "nonzero")]),
///             Field::new("y", &self.y),
///         ]
///     }
/// }
///
/// impl Inspect for Point {
///     fn as_record(&self) -> Option<&dyn Record> {
///         Some(self)
///     }
/// }
/// ```
pub trait Record {
    /// Fields in declaration order
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Any value handed to the engine: either a record or something with no fields.
///
/// Non-record values validate trivially. References and smart pointers are
/// looked through, and `Option` is looked through when it holds a value.
pub trait Inspect {
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }
}

/// Tag table attached to a field: `(key, value)` pairs such as `("validate", "long")`
pub type Tags = &'static [(&'static str, &'static str)];

/// Whether the engine may look at a field's value
#[derive(Clone, Copy)]
pub enum Access<'a> {
    /// Not inspectable; skipped even when tagged
    Opaque,
    Visible {
        value: &'a dyn Any,
        /// Record view used by the `struct` directive
        nested: Option<&'a dyn Inspect>,
    },
}

/// One row of a record's field table
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    tags: Tags,
    access: Access<'a>,
}

impl<'a> Field<'a> {
    pub fn new<T: Any>(name: &'static str, value: &'a T) -> Self {
        Self {
            name,
            tags: &[],
            access: Access::Visible {
                value,
                nested: None,
            },
        }
    }

    /// A field whose value cannot be inspected
    pub fn opaque(name: &'static str) -> Self {
        Self {
            name,
            tags: &[],
            access: Access::Opaque,
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    /// Expose the value to the `struct` directive
    pub fn nested<T: Inspect + 'a>(mut self, value: &'a T) -> Self {
        if let Access::Visible { nested, .. } = &mut self.access {
            *nested = Some(value);
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tags(&self) -> Tags {
        self.tags
    }

    /// First value stored under `key`
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn access(&self) -> Access<'a> {
        self.access
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self.access, Access::Opaque)
    }

    pub fn value(&self) -> Option<&'a dyn Any> {
        match self.access {
            Access::Visible { value, .. } => Some(value),
            Access::Opaque => None,
        }
    }

    pub fn nested_record(&self) -> Option<&'a dyn Record> {
        match self.access {
            Access::Visible {
                nested: Some(nested),
                ..
            } => nested.as_record(),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("opaque", &self.is_opaque())
            .finish()
    }
}

impl<'r> Inspect for dyn Record + 'r {
    fn as_record(&self) -> Option<&dyn Record> {
        Some(self)
    }
}

macro_rules! impl_non_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Inspect for $ty {})*
    };
}

impl_non_record!(
    (), bool, char, str, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T> Inspect for [T] {}
impl<T, const N: usize> Inspect for [T; N] {}
impl<T> Inspect for Vec<T> {}
impl<T> Inspect for VecDeque<T> {}
impl<T, S> Inspect for HashSet<T, S> {}
impl<T> Inspect for BTreeSet<T> {}
impl<K, V, S> Inspect for HashMap<K, V, S> {}
impl<K, V> Inspect for BTreeMap<K, V> {}

impl<T: Inspect + ?Sized> Inspect for &T {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: Inspect + ?Sized> Inspect for &mut T {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: Inspect + ?Sized> Inspect for Box<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: Inspect + ?Sized> Inspect for Rc<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: Inspect + ?Sized> Inspect for Arc<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: Inspect> Inspect for Option<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(Inspect::as_record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Pair {
        left: u32,
        right: String,
    }

    impl Record for Pair {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("left", &self.left).with_tags(&[("validate", "nonzero"), ("json", "l")]),
                Field::new("right", &self.right),
                Field::opaque("hidden").with_tags(&[("validate", "nonzero")]),
            ]
        }
    }

    impl Inspect for Pair {
        fn as_record(&self) -> Option<&dyn Record> {
            Some(self)
        }
    }

    fn pair() -> Pair {
        Pair {
            left: 7,
            right: "r".to_string(),
        }
    }

    #[test]
    fn test_field_tags_lookup() {
        let p = pair();
        let fields = p.fields();
        assert_eq!(fields[0].tag("validate"), Some("nonzero"));
        assert_eq!(fields[0].tag("json"), Some("l"));
        assert_eq!(fields[0].tag("db"), None);
        assert_eq!(fields[1].tag("validate"), None);
    }

    #[test]
    fn test_field_values_downcast() {
        let p = pair();
        let fields = p.fields();
        assert_eq!(fields[0].value().and_then(|v| v.downcast_ref::<u32>()), Some(&7));
        assert_eq!(
            fields[1].value().and_then(|v| v.downcast_ref::<String>()).map(String::as_str),
            Some("r")
        );
        assert!(fields[2].is_opaque());
        assert!(fields[2].value().is_none());
    }

    #[test]
    fn test_non_records_have_no_fields() {
        assert!(42i32.as_record().is_none());
        assert!("text".as_record().is_none());
        assert!(vec![pair()].as_record().is_none());
        assert!(None::<Pair>.as_record().is_none());
    }

    #[test]
    fn test_pointers_are_looked_through() {
        let p = pair();
        assert!((&p).as_record().is_some());
        assert!(Box::new(pair()).as_record().is_some());
        assert!(Arc::new(pair()).as_record().is_some());
        assert!(Some(pair()).as_record().is_some());
    }

    #[test]
    fn test_nested_view() {
        let p = pair();
        let inner = pair();
        let field = Field::new("inner", &inner).nested(&inner);
        assert!(field.nested_record().is_some());

        let plain = Field::new("left", &p.left).nested(&p.left);
        assert!(plain.nested_record().is_none());

        let opaque = Field::opaque("x").nested(&p);
        assert!(opaque.nested_record().is_none());
    }
}
