//! Form validation that runs before anything leaves the process.

use thiserror::Error;

/// Minimum password length the sign-up form accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A form input the views refuse to submit.
///
/// Display strings are shown verbatim in the error line of the auth and
/// add-habit screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields!")]
    MissingFields,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters long!")]
    PasswordTooShort,
    #[error("Title and description are required")]
    MissingHabitFields,
}

/// Checks the auth form before the credentials are sent anywhere.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Checks the add-habit form; the repository assumes this already ran.
pub fn validate_new_habit(title: &str, description: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() || description.trim().is_empty() {
        return Err(ValidationError::MissingHabitFields);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_email() {
        assert_eq!(
            validate_credentials("", "secret1"),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            validate_credentials("   ", "secret1"),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn rejects_empty_password_before_length_check() {
        assert_eq!(
            validate_credentials("a@b.c", ""),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn rejects_short_password_at_boundary() {
        assert_eq!(
            validate_credentials("a@b.c", "12345"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_credentials("a@b.c", "123456"), Ok(()));
    }

    #[test]
    fn counts_password_chars_not_bytes() {
        // Six two-byte characters must pass.
        assert_eq!(validate_credentials("a@b.c", "éééééé"), Ok(()));
    }

    #[test]
    fn habit_form_requires_both_fields() {
        assert_eq!(
            validate_new_habit("", "desc"),
            Err(ValidationError::MissingHabitFields)
        );
        assert_eq!(
            validate_new_habit("title", "  "),
            Err(ValidationError::MissingHabitFields)
        );
        assert_eq!(validate_new_habit("title", "desc"), Ok(()));
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn password_length_gate_matches_char_count(
                password in "[a-zA-Z0-9]{0,12}"
            ) {
                let result = validate_credentials("user@example.com", &password);
                if password.is_empty() {
                    prop_assert_eq!(result, Err(ValidationError::MissingFields));
                } else if password.chars().count() < MIN_PASSWORD_LEN {
                    prop_assert_eq!(result, Err(ValidationError::PasswordTooShort));
                } else {
                    prop_assert_eq!(result, Ok(()));
                }
            }
        }
    }
}
