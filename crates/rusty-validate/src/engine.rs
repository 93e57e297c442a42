// File: src/engine.rs
// Purpose: Recursive field walk that resolves directives and collects path-tagged errors

use tracing::{debug, trace};

use crate::directive::parse_directive;
use crate::error::{BadField, ValidationErrors};
use crate::options::ValidateOptions;
use crate::record::{Inspect, Record};
use crate::registry::Validators;

impl Validators {
    /// Validate every tagged field of `value`, reporting declared field names.
    ///
    /// Records are walked field by field; anything that is not a record
    /// (numbers, strings, collections, `None`) has no fields and yields an
    /// empty list. Untagged and opaque fields contribute nothing.
    pub fn validate<T: Inspect + ?Sized>(&self, value: &T) -> Vec<BadField> {
        self.validate_with(value, &ValidateOptions::default())
    }

    /// Like [`validate`](Self::validate), but reports each field under the
    /// value of its `name_key` metadata instead of its declared name.
    ///
    /// ```rust
    /// use rusty_validate::{bail, Record, Validators};
    ///
    /// #[derive(Record)]
    /// struct X {
    ///     #[tag(json = "height")]
    ///     #[validate("nonzero")]
    ///     y: i32,
    /// }
    ///
    /// let mut vd = Validators::new();
    /// vd.insert("nonzero", |v| match v.downcast_ref::<i32>() {
    ///     Some(0) => bail!("is zero"),
    ///     _ => Ok(()),
    /// });
    ///
    /// let errors = vd.validate_and_tag(&X { y: 0 }, "json");
    /// assert_eq!(errors[0].field, "height");
    /// ```
    ///
    /// A field without the key is reported under an empty name. An empty
    /// `name_key` behaves exactly like `validate`.
    pub fn validate_and_tag<T: Inspect + ?Sized>(&self, value: &T, name_key: &str) -> Vec<BadField> {
        self.validate_with(value, &ValidateOptions::with_name_key(name_key))
    }

    pub fn validate_with<T: Inspect + ?Sized>(
        &self,
        value: &T,
        options: &ValidateOptions,
    ) -> Vec<BadField> {
        let mut errors = Vec::new();

        match value.as_record() {
            Some(record) => self.walk(record, options, "", &mut errors),
            None => trace!("value is not a record, nothing to validate"),
        }

        debug!(errors = errors.len(), "validation finished");
        errors
    }

    /// `Ok(())` if every field passes, otherwise all collected failures
    pub fn check<T: Inspect + ?Sized>(&self, value: &T) -> Result<(), ValidationErrors> {
        ValidationErrors::from(self.validate(value)).into_result()
    }

    pub fn check_with<T: Inspect + ?Sized>(
        &self,
        value: &T,
        options: &ValidateOptions,
    ) -> Result<(), ValidationErrors> {
        ValidationErrors::from(self.validate_with(value, options)).into_result()
    }

    fn walk(
        &self,
        record: &dyn Record,
        options: &ValidateOptions,
        prefix: &str,
        errors: &mut Vec<BadField>,
    ) {
        for field in record.fields() {
            let Some(value) = field.value() else {
                trace!(field = field.name(), "skipping opaque field");
                continue;
            };

            let directive = match field.tag(&options.directive_key) {
                Some(directive) if !directive.is_empty() => directive,
                _ => continue,
            };

            let name = match options.naming_key() {
                Some(key) => field.tag(key).unwrap_or_default(),
                None => field.name(),
            };
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", prefix, name)
            };

            trace!(field = %path, directive, "validating field");

            for entry in parse_directive(directive) {
                if entry.is_struct() {
                    match field.nested_record() {
                        Some(nested) => {
                            trace!(prefix = %path, "descending into nested record");
                            self.walk(nested, options, &path, errors);
                        }
                        None => trace!(field = %path, "struct directive on a non-record value"),
                    }
                    continue;
                }

                let Some(validator) = self.get(&entry.name) else {
                    debug!(field = %path, validator = %entry.name, "undefined validator");
                    errors.push(BadField::undefined(path.clone(), entry.name));
                    continue;
                };

                if let Err(err) = validator.call(value, &entry.params) {
                    errors.push(BadField::invalid(path.clone(), err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;
    use anyhow::bail;
    use pretty_assertions::assert_eq;
    use std::any::Any;

    struct Inner {
        x: i32,
    }

    impl Record for Inner {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![Field::new("X", &self.x).with_tags(&[("validate", "nonzero"), ("json", "x")])]
        }
    }

    impl Inspect for Inner {
        fn as_record(&self) -> Option<&dyn Record> {
            Some(self)
        }
    }

    struct Outer {
        inner: Inner,
        count: i32,
        #[allow(dead_code)]
        secret: i32,
    }

    impl Record for Outer {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Inner", &self.inner)
                    .with_tags(&[("validate", "struct,marker"), ("json", "inner")])
                    .nested(&self.inner),
                Field::new("Count", &self.count).with_tags(&[("validate", "nonzero")]),
                Field::opaque("secret").with_tags(&[("validate", "nonzero")]),
            ]
        }
    }

    impl Inspect for Outer {
        fn as_record(&self) -> Option<&dyn Record> {
            Some(self)
        }
    }

    fn nonzero(value: &dyn Any) -> anyhow::Result<()> {
        match value.downcast_ref::<i32>() {
            Some(0) => bail!("must not be zero"),
            _ => Ok(()),
        }
    }

    fn registry() -> Validators {
        let mut vd = Validators::new();
        vd.insert("nonzero", nonzero);
        vd.insert("marker", |_| bail!("marked"));
        vd
    }

    fn fields(errors: &[BadField]) -> Vec<String> {
        errors.iter().map(|e| e.field.clone()).collect()
    }

    #[test]
    fn test_nested_paths_are_prefixed() {
        let outer = Outer {
            inner: Inner { x: 0 },
            count: 0,
            secret: 0,
        };
        let errors = registry().validate(&outer);

        assert_eq!(fields(&errors), vec!["Inner.X", "Inner", "Count"]);
        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec![
                "field Inner.X is invalid: must not be zero",
                "field Inner is invalid: marked",
                "field Count is invalid: must not be zero",
            ]
        );
    }

    #[test]
    fn test_name_key_applies_at_every_level() {
        let outer = Outer {
            inner: Inner { x: 0 },
            count: 0,
            secret: 1,
        };
        let errors = registry().validate_and_tag(&outer, "json");

        // Count has no json tag and is reported under an empty name
        assert_eq!(fields(&errors), vec!["inner.x", "inner", ""]);
    }

    #[test]
    fn test_non_record_values_are_valid() {
        let vd = registry();
        assert!(vd.validate(&0i32).is_empty());
        assert!(vd.validate("text").is_empty());
        assert!(vd.validate(&vec![Inner { x: 0 }]).is_empty());
        assert!(vd.validate(&None::<Inner>).is_empty());
    }

    #[test]
    fn test_references_are_dereferenced() {
        let vd = registry();
        let inner = Inner { x: 0 };
        assert_eq!(vd.validate(&&inner).len(), 1);
        assert_eq!(vd.validate(&Box::new(Inner { x: 0 })).len(), 1);
        assert_eq!(vd.validate(&Some(Inner { x: 0 })).len(), 1);
    }

    #[test]
    fn test_check_wraps_errors() {
        let vd = registry();
        assert!(vd.check(&Inner { x: 3 }).is_ok());

        let err = vd.check(&Inner { x: 0 }).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.to_string(), "field X is invalid: must not be zero");
    }

    #[test]
    fn test_custom_directive_key() {
        let options = ValidateOptions {
            directive_key: "json".to_string(),
            ..ValidateOptions::default()
        };
        // "x" is not a registered validator
        let errors = registry().validate_with(&Inner { x: 5 }, &options);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_undefined());
        assert_eq!(errors[0].to_string(), r#"field X is invalid: undefined validator: "x""#);
    }
}
