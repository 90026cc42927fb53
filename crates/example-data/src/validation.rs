//! Contact-field validation mirroring the console's customer form.
//!
//! Generated customers must pass the same checks the customer form applies
//! before submission, otherwise editing a seeded record and saving it
//! unchanged would fail.
//!
//! # Validation Rules
//!
//! - Person names: 2 to 40 characters of letters, spaces, apostrophes, or
//!   hyphens, starting with a letter
//! - Email: one `@`, a non-empty local part, and a dotted domain
//! - Mobile: exactly ten ASCII digits, the first in `6..=9`

/// Minimum allowed length for a first or last name.
pub const PERSON_NAME_MIN: usize = 2;

/// Maximum allowed length for a first or last name.
pub const PERSON_NAME_MAX: usize = 40;

/// Validates a first or last name.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_person_name;
///
/// assert!(is_valid_person_name("D'Souza"));
/// assert!(!is_valid_person_name("A"));
/// assert!(!is_valid_person_name("R2-D2"));
/// ```
#[must_use]
pub fn is_valid_person_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(PERSON_NAME_MIN..=PERSON_NAME_MAX).contains(&length) {
        return false;
    }
    let starts_with_letter = name.chars().next().is_some_and(char::is_alphabetic);
    starts_with_letter
        && name
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '\'' || c == '-')
}

/// Validates an email address loosely.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_email;
///
/// assert!(is_valid_email("admin@example.com"));
/// assert!(!is_valid_email("admin@localhost"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut labels = domain.split('.');
    let has_two_labels = labels.clone().count() >= 2;
    has_two_labels && labels.all(|label| !label.is_empty())
}

/// Validates a ten-digit mobile number.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_mobile;
///
/// assert!(is_valid_mobile("9876543210"));
/// assert!(!is_valid_mobile("1234567890"));
/// ```
#[must_use]
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10
        && mobile.chars().all(|c| c.is_ascii_digit())
        && mobile.starts_with(['6', '7', '8', '9'])
}

/// Reduce a generated name to characters the name rule accepts.
pub(crate) fn sanitize_person_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphabetic() || *c == ' ' || *c == '\'' || *c == '-')
        .take(PERSON_NAME_MAX)
        .collect::<String>()
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Asha")]
    #[case("Mary-Jane")]
    #[case("O'Brien")]
    #[case("De Souza")]
    fn accepts_valid_names(#[case] name: &str) {
        assert!(is_valid_person_name(name));
    }

    #[rstest]
    #[case("")]
    #[case("A")]
    #[case("-Asha")]
    #[case("Asha3")]
    fn rejects_invalid_names(#[case] name: &str) {
        assert!(!is_valid_person_name(name));
    }

    #[rstest]
    #[case("a@b.co", true)]
    #[case("first.last12@example.com", true)]
    #[case("no-at-sign.com", false)]
    #[case("two@@example.com", false)]
    #[case("@example.com", false)]
    #[case("a@example.", false)]
    #[case("a b@example.com", false)]
    fn validates_emails(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }

    #[rstest]
    #[case("6000000000", true)]
    #[case("987654321", false)]
    #[case("98765432101", false)]
    #[case("98765x3210", false)]
    fn validates_mobiles(#[case] mobile: &str, #[case] expected: bool) {
        assert_eq!(is_valid_mobile(mobile), expected);
    }

    #[test]
    fn sanitize_strips_digits_and_symbols() {
        assert_eq!(sanitize_person_name("Ra.j3esh!"), "Rajesh");
    }
}
