pub mod auth;
pub mod health;
pub mod messages;
pub mod users;

/// Treats an absent field and an empty string the same way.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(Some("x".into())), Some("x".to_string()));
    }
}
