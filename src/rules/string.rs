//! Content rules: `numeric`, `email`, `oneof`.

use std::sync::LazyLock;

use crate::error::Error;
use crate::value::Value;

static NUMERIC_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[-+]?[0-9]+(?:\.[0-9]+)?$").unwrap());

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

/// `numeric` — numbers pass; strings must be decimal (optional sign and
/// fraction); everything else fails.
pub(crate) fn numeric(value: &Value, _param: Option<&str>) -> Result<bool, Error> {
    Ok(match value {
        Value::Int(_) | Value::Uint(_) | Value::Float(_) => true,
        Value::Str(s) => NUMERIC_REGEX.is_match(s),
        _ => false,
    })
}

/// `email` — string in email format.
pub(crate) fn email(value: &Value, _param: Option<&str>) -> Result<bool, Error> {
    Ok(value.as_str().is_some_and(|s| EMAIL_REGEX.is_match(s)))
}

/// `oneof=a b c` — value is a member of the space-separated literal set.
///
/// Numbers compare via their decimal rendering.
pub(crate) fn oneof(value: &Value, param: Option<&str>) -> Result<bool, Error> {
    let set = param.ok_or_else(|| Error::rule("oneof", "missing parameter"))?;
    let candidate = match value {
        Value::Str(s) => s.clone(),
        Value::Int(i) => i.to_string(),
        Value::Uint(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        _ => return Ok(false),
    };
    Ok(set.split_whitespace().any(|literal| literal == candidate))
}
