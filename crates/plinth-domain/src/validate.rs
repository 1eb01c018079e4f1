//! Field-level validation helpers.
//!
//! Each helper takes the field name first (for error messages) and the value
//! second, and either returns normally or fails with an [`InvalidArgument`]
//! whose message embeds the field name and the value's string form. The
//! `require_*` variants additionally hand back the narrowed value. None of
//! the helpers perform I/O or mutate anything.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::InvalidArgument;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Look-behind-free equivalent of `[a-zA-Z0-9.-]+(?<!\.)`: the domain
        // character immediately before the top-level label must not be a dot.
        let pattern = "^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]*[a-zA-Z0-9-]\\.[a-zA-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn fail(field: &str, value: &dyn fmt::Display, constraint: &str) -> InvalidArgument {
    InvalidArgument::new(format!("field [{field}='{value}'] {constraint}"))
}

/// Fail when the value is absent.
///
/// # Errors
/// Returns [`InvalidArgument`] when `value` is `None`.
///
/// # Examples
/// ```
/// use plinth_domain::validate::not_null;
///
/// assert!(not_null("id", Some(&7)).is_ok());
/// assert!(not_null::<i32>("id", None).is_err());
/// ```
pub fn not_null<T>(field: &str, value: Option<&T>) -> Result<(), InvalidArgument> {
    if value.is_some() {
        Ok(())
    } else {
        Err(fail(field, &"null", "must not be null"))
    }
}

/// Fail when the value is absent, otherwise return it.
///
/// # Errors
/// Returns [`InvalidArgument`] when `value` is `None`.
///
/// # Examples
/// ```
/// use plinth_domain::validate::require_not_null;
///
/// let id = require_not_null("id", Some(7))?;
/// assert_eq!(id, 7);
/// # Ok::<(), plinth_domain::InvalidArgument>(())
/// ```
pub fn require_not_null<T>(field: &str, value: Option<T>) -> Result<T, InvalidArgument> {
    value.ok_or_else(|| fail(field, &"null", "must not be null"))
}

/// Fail when the string is absent or blank after trimming.
///
/// # Errors
/// Returns [`InvalidArgument`] when `value` is `None` or trims to the empty
/// string.
///
/// # Examples
/// ```
/// use plinth_domain::validate::not_blank;
///
/// assert!(not_blank("name", Some("Ada")).is_ok());
/// assert!(not_blank("name", Some("   ")).is_err());
/// assert!(not_blank("name", None).is_err());
/// ```
pub fn not_blank(field: &str, value: Option<&str>) -> Result<(), InvalidArgument> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(fail(
            field,
            &value.unwrap_or("null"),
            "must not be null or blank",
        )),
    }
}

/// Fail when the string is absent or blank, otherwise return it unchanged.
///
/// # Errors
/// Returns [`InvalidArgument`] when `value` is `None` or trims to the empty
/// string.
///
/// # Examples
/// ```
/// use plinth_domain::validate::require_not_blank;
///
/// let name = require_not_blank("name", Some("Ada".to_owned()))?;
/// assert_eq!(name, "Ada");
/// # Ok::<(), plinth_domain::InvalidArgument>(())
/// ```
pub fn require_not_blank<S: AsRef<str>>(
    field: &str,
    value: Option<S>,
) -> Result<S, InvalidArgument> {
    not_blank(field, value.as_ref().map(AsRef::as_ref))?;
    value.ok_or_else(|| fail(field, &"null", "must not be null or blank"))
}

/// Fail when the collection is absent or has no elements.
///
/// # Errors
/// Returns [`InvalidArgument`] when `value` is `None` or empty.
///
/// # Examples
/// ```
/// use plinth_domain::validate::not_empty;
///
/// assert!(not_empty("tags", Some(&["a"][..])).is_ok());
/// assert!(not_empty::<&str>("tags", Some(&[])).is_err());
/// ```
pub fn not_empty<T>(field: &str, value: Option<&[T]>) -> Result<(), InvalidArgument> {
    match value {
        Some(items) if !items.is_empty() => Ok(()),
        Some(_) => Err(fail(field, &"[]", "must not be null or an empty list")),
        None => Err(fail(field, &"null", "must not be null or an empty list")),
    }
}

/// Fail when the collection is absent or empty, otherwise return it unchanged.
///
/// # Errors
/// Returns [`InvalidArgument`] when `value` is `None` or empty.
///
/// # Examples
/// ```
/// use plinth_domain::validate::require_not_empty;
///
/// let tags = require_not_empty("tags", Some(vec!["a", "b"]))?;
/// assert_eq!(tags.len(), 2);
/// # Ok::<(), plinth_domain::InvalidArgument>(())
/// ```
pub fn require_not_empty<T>(field: &str, value: Option<Vec<T>>) -> Result<Vec<T>, InvalidArgument> {
    not_empty(field, value.as_deref())?;
    value.ok_or_else(|| fail(field, &"null", "must not be null or an empty list"))
}

/// Fail when the value is blank or not a well-formed email address.
///
/// The address must have a `local-part@domain.tld` shape where the character
/// immediately before the top-level label is not a dot and the top-level
/// label is at least two alphabetic characters.
///
/// # Errors
/// Returns [`InvalidArgument`] when `value` is blank or does not match.
///
/// # Examples
/// ```
/// use plinth_domain::validate::valid_email;
///
/// assert!(valid_email("email", "local.part+tag@sub.example.com").is_ok());
/// assert!(valid_email("email", "bad@domain.").is_err());
/// ```
pub fn valid_email(field: &str, value: &str) -> Result<(), InvalidArgument> {
    if !value.trim().is_empty() && email_regex().is_match(value) {
        Ok(())
    } else {
        Err(fail(field, &value, "is not a valid email address"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::absent(None)]
    #[case::empty(Some(""))]
    #[case::whitespace_only(Some("   \t"))]
    fn not_blank_rejects_blank_or_absent(#[case] value: Option<&str>) {
        assert!(not_blank("name", value).is_err());
    }

    #[rstest]
    #[case("Ada")]
    #[case(" padded ")]
    fn require_not_blank_returns_value_unchanged(#[case] value: &str) {
        let returned = require_not_blank("name", Some(value)).expect("non-blank value accepted");
        assert_eq!(returned, value);
    }

    #[rstest]
    fn not_null_embeds_field_name_in_message() {
        let err = not_null::<i32>("age", None).expect_err("absent value rejected");
        assert_eq!(err.message(), "field [age='null'] must not be null");
    }

    #[rstest]
    fn not_blank_embeds_the_offending_value() {
        let err = not_blank("name", Some("  ")).expect_err("blank value rejected");
        assert_eq!(err.message(), "field [name='  '] must not be null or blank");
    }

    #[rstest]
    fn not_empty_accepts_non_empty_slices() {
        assert!(not_empty("tags", Some(&[1, 2][..])).is_ok());
    }

    #[rstest]
    #[case::absent(None, "field [tags='null'] must not be null or an empty list")]
    #[case::empty(Some(vec![]), "field [tags='[]'] must not be null or an empty list")]
    fn not_empty_rejects_absent_or_empty(
        #[case] value: Option<Vec<i32>>,
        #[case] expected: &str,
    ) {
        let err = not_empty("tags", value.as_deref()).expect_err("rejected");
        assert_eq!(err.message(), expected);
    }

    #[rstest]
    fn require_not_empty_returns_collection_unchanged() {
        let returned =
            require_not_empty("tags", Some(vec!["a", "b"])).expect("non-empty value accepted");
        assert_eq!(returned, ["a", "b"]);
    }

    #[rstest]
    #[case("local.part+tag@sub.example.com")]
    #[case("user@example.co")]
    #[case("USER_99%x@host-1.example.ORG")]
    fn valid_email_accepts_well_formed_addresses(#[case] value: &str) {
        assert!(valid_email("email", value).is_ok());
    }

    #[rstest]
    #[case::blank("")]
    #[case::whitespace("   ")]
    #[case::no_at("plain-string")]
    #[case::trailing_dot_before_tld("bad@domain.")]
    #[case::dot_before_tld("bad@domain..com")]
    #[case::single_letter_tld("bad@domain.c")]
    #[case::numeric_tld("bad@domain.12")]
    #[case::missing_local_part("@example.com")]
    fn valid_email_rejects_malformed_addresses(#[case] value: &str) {
        assert!(valid_email("email", value).is_err());
    }

    #[rstest]
    fn valid_email_message_embeds_field_and_value() {
        let err = valid_email("contact", "nope").expect_err("malformed address rejected");
        assert_eq!(
            err.message(),
            "field [contact='nope'] is not a valid email address"
        );
    }
}
