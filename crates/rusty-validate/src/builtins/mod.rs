//! Stock validators
//!
//! Registered by [`Validators::with_builtins`] or [`register_builtins`]:
//!
//! | directive        | accepts                            | rule                                  |
//! |------------------|------------------------------------|---------------------------------------|
//! | `nonzero`        | numbers, strings, collections, `bool` | not zero / not empty / `true`      |
//! | `min_len[n]`     | strings, collections               | at least `n` characters or items      |
//! | `max_len[n]`     | strings, collections               | at most `n` characters or items       |
//! | `len[min,max]`   | strings, collections               | between `min` and `max` characters or items |
//! | `min[n]`         | numbers                            | `>= n`                                |
//! | `max[n]`         | numbers                            | `<= n`                                |
//! | `between[lo,hi]` | numbers                            | `lo <= value <= hi`                   |
//! | `regex[pattern]` | strings                            | matches `pattern`                     |
//! | `email`          | strings                            | looks like an email address           |
//!
//! Collections are `Vec`, boxed and static slices of primitives or strings,
//! and string sets and maps. Integers are compared exactly, without a detour
//! through `f64`. A value of the wrong type or a malformed parameter list is
//! reported as a validation failure.

use anyhow::{anyhow, Context, Result};
use std::any::Any;
use std::str::FromStr;

use crate::registry::Validators;

pub mod collection;
pub mod numeric;
pub mod string;

pub use collection::*;
pub use numeric::*;
pub use string::*;

impl Validators {
    /// Registry preloaded with the stock validators
    pub fn with_builtins() -> Self {
        let mut vd = Self::new();
        register_builtins(&mut vd);
        vd
    }
}

/// Add the stock validators to `vd`, replacing any with the same names
pub fn register_builtins(vd: &mut Validators) {
    vd.insert("nonzero", validate_nonzero);
    vd.insert("email", |value| validate_email(expect_str(value, "email")?));

    vd.insert_with_params("min_len", |value, params| {
        let size = expect_size(value, "min_len")?;
        validate_min_size(size, param(params, 0, "min_len")?)
    });
    vd.insert_with_params("max_len", |value, params| {
        let size = expect_size(value, "max_len")?;
        validate_max_size(size, param(params, 0, "max_len")?)
    });
    vd.insert_with_params("len", |value, params| {
        let size = expect_size(value, "len")?;
        validate_size_range(size, param(params, 0, "len")?, param(params, 1, "len")?)
    });
    vd.insert_with_params("regex", |value, params| {
        let s = expect_str(value, "regex")?;
        // Patterns may themselves contain commas
        validate_pattern(s, &params.join(","))
    });

    vd.insert_with_params("min", |value, params| {
        let n = expect_number(value, "min")?;
        validate_min(n, param(params, 0, "min")?)
    });
    vd.insert_with_params("max", |value, params| {
        let n = expect_number(value, "max")?;
        validate_max(n, param(params, 0, "max")?)
    });
    vd.insert_with_params("between", |value, params| {
        let n = expect_number(value, "between")?;
        validate_range(n, param(params, 0, "between")?, param(params, 1, "between")?)
    });
}

/// View a field value as a string slice
pub fn as_str(value: &dyn Any) -> Option<&str> {
    if let Some(s) = value.downcast_ref::<String>() {
        Some(s.as_str())
    } else if let Some(s) = value.downcast_ref::<&'static str>() {
        Some(*s)
    } else {
        value.downcast_ref::<Box<str>>().map(|s| &**s)
    }
}

fn expect_str<'v>(value: &'v dyn Any, validator: &str) -> Result<&'v str> {
    as_str(value).ok_or_else(|| anyhow!("`{}` expects a string value", validator))
}

fn expect_size(value: &dyn Any, validator: &str) -> Result<Size> {
    measure(value).ok_or_else(|| anyhow!("`{}` expects a string or collection value", validator))
}

fn expect_number(value: &dyn Any, validator: &str) -> Result<Number> {
    as_number(value).ok_or_else(|| anyhow!("`{}` expects a numeric value", validator))
}

// Surrounding whitespace is ignored, so `between[1, 5]` works.
fn param<T>(params: &[String], idx: usize, validator: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = params
        .get(idx)
        .ok_or_else(|| anyhow!("`{}` is missing parameter {}", validator, idx + 1))?;
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("`{}` has an invalid parameter {:?}", validator, raw.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[derive(Record)]
    struct Account {
        #[validate("nonzero,len[3,12]")]
        username: String,

        #[validate("email")]
        email: String,

        #[validate("between[18,120]")]
        age: u8,

        #[validate("regex[^[A-Z]{2}[0-9]{3}$]")]
        code: &'static str,
    }

    fn account() -> Account {
        Account {
            username: "ferris".to_string(),
            email: "ferris@example.com".to_string(),
            age: 30,
            code: "AB123",
        }
    }

    #[test]
    fn test_valid_account_passes() {
        assert!(Validators::with_builtins().validate(&account()).is_empty());
    }

    #[test]
    fn test_every_rule_reports() {
        let bad = Account {
            username: String::new(),
            email: "not-an-email".to_string(),
            age: 7,
            code: "ab123",
        };
        let messages: Vec<String> = Validators::with_builtins()
            .validate(&bad)
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            messages,
            vec![
                "field username is invalid: must not be empty",
                "field username is invalid: must be between 3 and 12 characters",
                "field email is invalid: \"not-an-email\" is not a valid email address",
                "field age is invalid: must be between 18 and 120",
                "field code is invalid: must match pattern \"^[A-Z]{2}[0-9]{3}$\"",
            ]
        );
    }

    #[rstest]
    #[case(&"text", Some("text"))]
    #[case(&String::from("owned"), Some("owned"))]
    #[case(&5i32, None)]
    fn test_as_str(#[case] value: &dyn Any, #[case] expected: Option<&str>) {
        assert_eq!(as_str(value), expected);
    }

    #[test]
    fn test_as_number_keeps_integer_kind() {
        assert!(matches!(as_number(&3u8), Some(Number::UInt(3))));
        assert!(matches!(as_number(&-2i64), Some(Number::Int(-2))));
        assert!(matches!(as_number(&1.5f32), Some(Number::Float(n)) if n == 1.5));
        assert!(as_number(&"3").is_none());
    }

    #[test]
    fn test_regex_params_keep_spaces_after_commas() {
        #[derive(Record)]
        struct Pair {
            #[validate("regex[^a, b$]")]
            s: String,
        }

        let vd = Validators::with_builtins();
        assert!(vd.validate(&Pair { s: "a, b".to_string() }).is_empty());

        let errors = vd.validate(&Pair { s: "a,b".to_string() });
        assert_eq!(
            errors[0].to_string(),
            "field s is invalid: must match pattern \"^a, b$\""
        );
    }

    #[test]
    fn test_numeric_params_tolerate_spaces() {
        #[derive(Record)]
        struct Review {
            #[validate("between[ 1, 5 ]")]
            stars: u8,
            #[validate("len[ 1 , 3 ]")]
            tag: String,
        }

        let vd = Validators::with_builtins();
        assert!(vd
            .validate(&Review {
                stars: 3,
                tag: "ok".to_string()
            })
            .is_empty());

        let errors = vd.validate(&Review {
            stars: 6,
            tag: String::new(),
        });
        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "field stars is invalid: must be between 1 and 5",
                "field tag is invalid: must be between 1 and 3 characters",
            ]
        );
    }

    #[test]
    fn test_wrong_type_and_bad_params_fail_softly() {
        let vd = Validators::with_builtins();

        let err = vd.get("min_len").unwrap().call(&42i32, &["3".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "`min_len` expects a string or collection value");

        let err = vd.get("regex").unwrap().call(&vec![1u8], &["x".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "`regex` expects a string value");

        let err = vd.get("between").unwrap().call(&42i32, &["1".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "`between` is missing parameter 2");

        let err = vd.get("max").unwrap().call(&42i32, &["ten".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "`max` has an invalid parameter \"ten\"");
    }

    #[test]
    fn test_builtins_can_be_overridden() {
        let mut vd = Validators::with_builtins();
        vd.insert("email", |_| Ok(()));
        assert!(vd.get("email").unwrap().call(&"nope", &[]).is_ok());
    }
}
