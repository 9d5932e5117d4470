//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache key from an endpoint, scope and parameters.
///
/// Parameters are sorted by key (then value) so their order does not matter.
/// Every component is length-prefixed before hashing, so values containing
/// separator characters cannot make two different inputs hash the same.
pub fn cache_key(endpoint: &str, scope: Option<&str>, params: &[(&str, &str)]) -> String {
    let mut hasher = Sha256::new();

    update_field(&mut hasher, endpoint.as_bytes());

    match scope {
        Some(scope) => {
            hasher.update([1u8]);
            update_field(&mut hasher, scope.as_bytes());
        }
        None => hasher.update([0u8]),
    }

    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort();

    hasher.update((sorted_params.len() as u64).to_le_bytes());
    for (k, v) in sorted_params {
        update_field(&mut hasher, k.as_bytes());
        update_field(&mut hasher, v.as_bytes());
    }

    format!("{:x}", hasher.finalize())
}

/// Canonical storage form of a key
pub fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        let key1 = cache_key("launches", Some("PROW"), &[("page.size", "10"), ("page.page", "1")]);
        let key2 = cache_key("launches", Some("PROW"), &[("page.page", "1"), ("page.size", "10")]);

        assert_eq!(key1, key2);
        assert_eq!(key1.len(), 64);
    }

    #[test]
    fn test_cache_key_different_endpoints() {
        let key1 = cache_key("launches", Some("PROW"), &[]);
        let key2 = cache_key("failed_tests", Some("PROW"), &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_different_scopes() {
        let key1 = cache_key("launches", Some("PROW"), &[]);
        let key2 = cache_key("launches", Some("OTHER"), &[]);
        let key3 = cache_key("launches", None, &[]);

        assert_ne!(key1, key2);
        assert_ne!(key1, key3);
    }

    #[test]
    fn test_cache_key_separator_characters_do_not_collide() {
        let key1 = cache_key("launches", None, &[("filter.cnt.name", "a&b=c")]);
        let key2 = cache_key("launches", None, &[("filter.cnt.name", "a"), ("b", "c")]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_value_change() {
        let key1 = cache_key("launches", None, &[("page.page", "1")]);
        let key2 = cache_key("launches", None, &[("page.page", "2")]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("  ABCdef "), "abcdef");
    }
}
