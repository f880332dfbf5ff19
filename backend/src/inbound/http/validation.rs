//! Request payload validation helpers.

use crate::domain::Error;

/// Reject an empty (or whitespace-only) required field.
pub fn require_non_empty(value: &str, field: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::invalid_request(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn rejects_blank_values(#[case] value: &str) {
        let error = require_non_empty(value, "name").expect_err("blank rejected");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(error.message(), "name must not be empty");
    }

    #[rstest]
    #[case("Algebra")]
    #[case("  padded  ")]
    fn accepts_non_blank_values(#[case] value: &str) {
        assert!(require_non_empty(value, "name").is_ok());
    }
}
