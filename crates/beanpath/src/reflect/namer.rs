//! Accessor naming rules: `getName` / `isActive` / `setName` → property name.

use crate::error::Error;

pub fn is_getter(name: &str) -> bool {
    (name.starts_with("get") && name.len() > 3) || (name.starts_with("is") && name.len() > 2)
}

pub fn is_setter(name: &str) -> bool {
    name.starts_with("set") && name.len() > 3
}

pub fn is_property(name: &str) -> bool {
    is_getter(name) || is_setter(name)
}

/// `getName` → `name`, `isActive` → `active`, `getURL` → `URL`.
///
/// The first character is lower-cased unless the second one is already
/// upper-case, so acronyms survive.
pub fn method_to_property(name: &str) -> Result<String, Error> {
    let rest = if let Some(rest) = name.strip_prefix("is") {
        rest
    } else if let Some(rest) = name.strip_prefix("get").or_else(|| name.strip_prefix("set")) {
        rest
    } else {
        return Err(Error::invalid_accessor_name(name));
    };

    let mut chars = rest.chars();
    let Some(first) = chars.next() else { return Ok(String::new()) };
    let keep_case = chars.next().is_some_and(char::is_uppercase);
    if keep_case {
        return Ok(rest.to_string());
    }
    Ok(first.to_lowercase().chain(rest[first.len_utf8()..].chars()).collect())
}
