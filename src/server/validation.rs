use crate::server::response::ApiError;

const MAX_EMAIL_LEN: usize = 254;
const MAX_PAUSE_DAYS: i64 = 365;

/// Normalises a sign-in email, rejecting anything that cannot be an address.
pub fn validate_email(email: &str) -> Result<String, ApiError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(ApiError::bad_request("Email is required"));
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ApiError::bad_request(format!(
            "Email cannot exceed {MAX_EMAIL_LEN} characters"
        )));
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(ApiError::bad_request("Invalid email address")),
    }
}

pub fn validate_pause_duration(days: i64) -> Result<i64, ApiError> {
    if (1..=MAX_PAUSE_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(ApiError::bad_request(format!(
            "Duration must be between 1 and {MAX_PAUSE_DAYS} days"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" Ann@Example.com ").unwrap(), "ann@example.com");
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn test_validate_pause_duration() {
        assert_eq!(validate_pause_duration(7).unwrap(), 7);
        assert!(validate_pause_duration(0).is_err());
        assert!(validate_pause_duration(-3).is_err());
        assert!(validate_pause_duration(366).is_err());
    }
}
