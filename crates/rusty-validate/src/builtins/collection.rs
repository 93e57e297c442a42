//! Length validation for strings and collections

use anyhow::{bail, Result};
use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::as_str;

/// How long a field value is, and what it is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    /// Characters of a string
    Chars(usize),
    /// Elements of a collection
    Items(usize),
}

impl Size {
    pub fn len(self) -> usize {
        match self {
            Size::Chars(n) | Size::Items(n) => n,
        }
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Measure a string or a collection of primitives or strings.
///
/// Strings count characters, not bytes.
pub fn measure(value: &dyn Any) -> Option<Size> {
    if let Some(s) = as_str(value) {
        return Some(Size::Chars(s.chars().count()));
    }

    macro_rules! try_items {
        ($($ty:ty),*) => {
            $(
                if let Some(v) = value.downcast_ref::<Vec<$ty>>() {
                    return Some(Size::Items(v.len()));
                }
                if let Some(v) = value.downcast_ref::<Box<[$ty]>>() {
                    return Some(Size::Items(v.len()));
                }
                if let Some(v) = value.downcast_ref::<&'static [$ty]>() {
                    return Some(Size::Items(v.len()));
                }
            )*
        };
    }

    try_items!(
        String, &'static str, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64,
        u128, usize, f32, f64
    );

    if let Some(set) = value.downcast_ref::<HashSet<String>>() {
        return Some(Size::Items(set.len()));
    }
    if let Some(set) = value.downcast_ref::<BTreeSet<String>>() {
        return Some(Size::Items(set.len()));
    }
    if let Some(map) = value.downcast_ref::<HashMap<String, String>>() {
        return Some(Size::Items(map.len()));
    }
    value
        .downcast_ref::<BTreeMap<String, String>>()
        .map(|map| Size::Items(map.len()))
}

pub fn validate_min_size(size: Size, min: usize) -> Result<()> {
    if size.len() >= min {
        return Ok(());
    }
    match size {
        Size::Chars(_) => bail!("must be at least {} characters", min),
        Size::Items(_) => bail!("must have at least {} items", min),
    }
}

pub fn validate_max_size(size: Size, max: usize) -> Result<()> {
    if size.len() <= max {
        return Ok(());
    }
    match size {
        Size::Chars(_) => bail!("must be at most {} characters", max),
        Size::Items(_) => bail!("must have at most {} items", max),
    }
}

pub fn validate_size_range(size: Size, min: usize, max: usize) -> Result<()> {
    if (min..=max).contains(&size.len()) {
        return Ok(());
    }
    match size {
        Size::Chars(_) => bail!("must be between {} and {} characters", min, max),
        Size::Items(_) => bail!("must have between {} and {} items", min, max),
    }
}
