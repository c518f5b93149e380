//! Request field parsing and validation helpers.
//!
//! Each validator returns a `ValidationError` naming the offending field so the
//! error response can point the client at it.

use chrono::NaiveDate;

use crate::server::error::validation::ValidationError;

const PASSWORD_SPECIAL_CHARACTERS: &str = "@$!%*#?&";

/// Lower-cases the domain part of an email address.
///
/// # Arguments
/// - `email` - Address as entered by the user
///
/// # Returns
/// - `String` - Trimmed address with its domain lower-cased
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Checks that `email` looks like `local@domain.tld` and is 3-255 characters long.
pub fn validate_email(field: &str, email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new(field, "Enter a valid email address.");

    validate_length(field, email, 3, 255)?;
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(invalid());
    };
    if local.is_empty() || local.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Checks the character count of `value` is within `min..=max`.
pub fn validate_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let count = value.chars().count();
    if count < min {
        return Err(ValidationError::new(
            field,
            format!("Ensure this field has at least {} characters.", min),
        ));
    }
    if count > max {
        return Err(ValidationError::new(
            field,
            format!("Ensure this field has no more than {} characters.", max),
        ));
    }
    Ok(())
}

/// Checks that `value` is non-empty and made of alphabetic characters only.
pub fn validate_alphabetic(field: &str, value: &str, message: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(char::is_alphabetic) {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// Checks that `value` is non-empty and made of ASCII digits only.
pub fn validate_digits(field: &str, value: &str, message: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// Applies the password strength rules shared by signup and password reset.
///
/// The password must be 8-68 characters and contain an uppercase letter, a lowercase
/// letter, a digit and one of `@$!%*#?&`.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    validate_length("password", password, 8, 68)?;

    let rules: [(fn(char) -> bool, &str); 4] = [
        (
            |c| c.is_ascii_uppercase(),
            "Password must contain One Uppercase Alphabet",
        ),
        (
            |c| c.is_ascii_lowercase(),
            "Password must contain One Lowercase Alphabet",
        ),
        (
            |c| c.is_ascii_digit(),
            "Password must contain One Numeric Character",
        ),
        (
            |c| PASSWORD_SPECIAL_CHARACTERS.contains(c),
            "Password must contain One Special Character",
        ),
    ];

    for (rule, message) in rules {
        if !password.chars().any(rule) {
            return Err(ValidationError::new("password", message));
        }
    }

    Ok(())
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::new(field, format!("{} must contain valid date string", field))
    })
}

/// Parses an integer field and checks it lies within `min..=max`.
pub fn parse_bounded_int(field: &str, value: &str, min: i64, max: i64) -> Result<i64, ValidationError> {
    let parsed = value
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::new(field, "A valid integer is required."))?;

    if parsed < min {
        return Err(ValidationError::new(
            field,
            format!("Ensure this value is greater than or equal to {}.", min),
        ));
    }
    if parsed > max {
        return Err(ValidationError::new(
            field,
            format!("Ensure this value is less than or equal to {}.", max),
        ));
    }

    Ok(parsed)
}

/// Splits a comma separated string into trimmed, non-empty items.
///
/// `" a, b ,, c "` becomes `["a", "b", "c"]`.
pub fn parse_comma_list(value: &str) -> Vec<String> {
    value
        .trim()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses scheduled stay periods from their string form.
///
/// Periods are separated by `,,` and the two dates of a period by `,`, so
/// `"2026-01-01,2026-01-05,,2026-02-01,2026-02-03"` holds two periods. Every period
/// must contain exactly two valid dates with the start not after the end.
pub fn parse_stay_periods(field: &str, value: &str) -> Result<Vec<[NaiveDate; 2]>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(",,")
        .map(|period| {
            let dates: Vec<&str> = period.split(',').map(str::trim).collect();
            validate_stay_period(field, &dates)
        })
        .collect()
}

/// Validates one `[start, end]` stay period.
pub fn validate_stay_period(field: &str, dates: &[&str]) -> Result<[NaiveDate; 2], ValidationError> {
    if dates.len() != 2 {
        return Err(ValidationError::new(
            field,
            "Each stay period must contain exactly 2 dates",
        ));
    }

    let start = parse_date(field, dates[0])?;
    let end = parse_date(field, dates[1])?;
    if start > end {
        return Err(ValidationError::new(
            field,
            "The start of a stay period cannot be after its end",
        ));
    }

    Ok([start, end])
}
