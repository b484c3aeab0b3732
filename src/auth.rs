use crate::models::{Session, User};

/// Scans the user collection for an exact, case-sensitive match on both
/// fields; first match wins. The caller gets no hint whether the email or the
/// password was wrong.
pub fn login(users: &[User], email: &str, password: &str) -> Option<Session> {
    users
        .iter()
        .find(|user| user.email == email && user.password == password)
        .map(|user| Session {
            name: user.name.clone(),
            role: user.role.clone(),
            email: user.email.clone(),
        })
}
