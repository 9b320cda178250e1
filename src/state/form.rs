//! Form editing state types.
//!
//! The login and registration forms share one shape: a username, a masked
//! password, the focused field, an inline error slot and a pending flag set
//! while a submission is in flight.

use crate::api::Credentials;

/// Specifying the field of an auth form that receives input.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormField {
    Username,
    Password,
}

/// Input state of the login or registration form.
///
#[derive(Debug, Clone)]
pub struct AuthForm {
    username: String,
    password: String,
    field: FormField,
    error: String,
    pending: bool,
}

impl Default for AuthForm {
    fn default() -> Self {
        AuthForm {
            username: String::new(),
            password: String::new(),
            field: FormField::Username,
            error: String::new(),
            pending: false,
        }
    }
}

impl AuthForm {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn field(&self) -> FormField {
        self.field
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn push_char(&mut self, c: char) -> &mut Self {
        match self.field {
            FormField::Username => self.username.push(c),
            FormField::Password => self.password.push(c),
        }
        self
    }

    pub fn backspace(&mut self) -> &mut Self {
        match self.field {
            FormField::Username => self.username.pop(),
            FormField::Password => self.password.pop(),
        };
        self
    }

    /// Move focus to the other field. There are only two, so next and
    /// previous are the same move.
    ///
    pub fn toggle_field(&mut self) -> &mut Self {
        self.field = match self.field {
            FormField::Username => FormField::Password,
            FormField::Password => FormField::Username,
        };
        self
    }

    pub fn set_error(&mut self, message: impl Into<String>) -> &mut Self {
        self.error = message.into();
        self
    }

    pub fn clear_error(&mut self) -> &mut Self {
        self.error.clear();
        self
    }

    pub fn set_pending(&mut self, pending: bool) -> &mut Self {
        self.pending = pending;
        self
    }

    /// Trimmed credentials for submission.
    ///
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    /// Forget the typed password. Used once the form is left behind.
    ///
    pub fn clear_password(&mut self) -> &mut Self {
        self.password.clear();
        self.field = FormField::Username;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = AuthForm::default();
        form.push_char('a').push_char('l');
        form.toggle_field().push_char('p').push_char('w');
        form.backspace();
        assert_eq!(form.username(), "al");
        assert_eq!(form.password(), "p");
        assert_eq!(form.field(), FormField::Password);
    }

    #[test]
    fn credentials_are_trimmed() {
        let mut form = AuthForm::default();
        for c in " bob ".chars() {
            form.push_char(c);
        }
        form.toggle_field();
        for c in "hunter2 ".chars() {
            form.push_char(c);
        }
        let credentials = form.credentials();
        assert_eq!(credentials.username, "bob");
        assert_eq!(credentials.password, "hunter2");
    }

    #[test]
    fn error_slot() {
        let mut form = AuthForm::default();
        form.set_error("bad password");
        assert_eq!(form.error(), "bad password");
        form.clear_error();
        assert_eq!(form.error(), "");
    }

    #[test]
    fn clear_password_keeps_username() {
        let mut form = AuthForm::default();
        form.push_char('a').toggle_field().push_char('b');
        form.clear_password();
        assert_eq!(form.username(), "a");
        assert_eq!(form.password(), "");
        assert_eq!(form.field(), FormField::Username);
    }
}
