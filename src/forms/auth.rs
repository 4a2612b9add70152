use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Credentials posted by the sign-in screen.
pub struct SignInForm {
    #[validate(email(message = "Email must be a valid email address!"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters!"))]
    pub password: String,
}

impl SignInForm {
    /// Lower-cases and trims the email before it is sent upstream.
    pub fn normalized(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldErrors;

    #[test]
    fn short_password_is_rejected() {
        let form = SignInForm {
            email: "agent@example.com".into(),
            password: "123".into(),
        };
        let errors = form.validate().unwrap_err();
        let fields = FieldErrors::from(&errors);
        assert_eq!(
            fields.get("password"),
            Some("Password must be at least 6 characters!")
        );
        assert!(!fields.contains("email"));
    }

    #[test]
    fn normalized_email_is_lowercase() {
        let form = SignInForm {
            email: "  Agent@Example.COM ".into(),
            password: "secret1".into(),
        }
        .normalized();
        assert_eq!(form.email, "agent@example.com");
        assert!(form.validate().is_ok());
    }
}
