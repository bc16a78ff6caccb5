//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4 rendered as a hyphenated string
pub fn generate_string() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_v4() {
        let a = generate_string();
        let b = generate_string();
        assert_ne!(a, b);
        assert_eq!(Uuid::parse_str(&a).unwrap().get_version_num(), 4);
    }
}
