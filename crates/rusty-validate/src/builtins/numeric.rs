//! Numeric validation functions
//!
//! Field values and directive bounds are compared as [`Number`], which keeps
//! integers exact instead of routing them through `f64`.

use anyhow::{bail, Result};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::measure;

/// A primitive number read from a field or parsed from a directive parameter
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i128),
    UInt(u128),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::UInt(n) => n as f64,
            Number::Float(n) => n,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::UInt(n) => n == 0,
            Number::Float(n) => n == 0.0,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use Number::*;

        match (*self, *other) {
            (Int(a), Int(b)) => Some(a.cmp(&b)),
            (UInt(a), UInt(b)) => Some(a.cmp(&b)),
            (Int(a), UInt(_)) if a < 0 => Some(Ordering::Less),
            (Int(a), UInt(b)) => Some((a as u128).cmp(&b)),
            (UInt(_), Int(b)) if b < 0 => Some(Ordering::Greater),
            (UInt(a), Int(b)) => Some(a.cmp(&(b as u128))),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::UInt(n) => write!(f, "{}", n),
            Number::Float(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Error)]
#[error("{0:?} is not a number")]
pub struct ParseNumberError(String);

impl FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i128>() {
            return Ok(Number::Int(n));
        }
        if let Ok(n) = s.parse::<u128>() {
            return Ok(Number::UInt(n));
        }
        match s.parse::<f64>() {
            Ok(n) if !n.is_nan() => Ok(Number::Float(n)),
            _ => Err(ParseNumberError(s.to_string())),
        }
    }
}

/// View a field value as a number
pub fn as_number(value: &dyn Any) -> Option<Number> {
    macro_rules! try_num {
        ($variant:ident as $wide:ty: $($ty:ty),*) => {
            $(
                if let Some(n) = value.downcast_ref::<$ty>() {
                    return Some(Number::$variant(*n as $wide));
                }
            )*
        };
    }

    try_num!(Int as i128: i8, i16, i32, i64, i128, isize);
    try_num!(UInt as u128: u8, u16, u32, u64, u128, usize);
    try_num!(Float as f64: f32, f64);
    None
}

pub fn validate_min(value: Number, min: Number) -> Result<()> {
    match value.partial_cmp(&min) {
        Some(Ordering::Less) | None => bail!("must be at least {}", min),
        _ => Ok(()),
    }
}

pub fn validate_max(value: Number, max: Number) -> Result<()> {
    match value.partial_cmp(&max) {
        Some(Ordering::Greater) | None => bail!("must be at most {}", max),
        _ => Ok(()),
    }
}

pub fn validate_range(value: Number, min: Number, max: Number) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        bail!("must be between {} and {}", min, max)
    }
}

/// Rejects zero numbers, empty strings and collections, and `false`
pub fn validate_nonzero(value: &dyn Any) -> Result<()> {
    if let Some(n) = as_number(value) {
        if n.is_zero() {
            bail!("must not be zero");
        }
        return Ok(());
    }
    if let Some(size) = measure(value) {
        if size.is_empty() {
            bail!("must not be empty");
        }
        return Ok(());
    }
    match value.downcast_ref::<bool>() {
        Some(true) => Ok(()),
        Some(false) => bail!("must be true"),
        None => bail!("`nonzero` does not support this value type"),
    }
}
