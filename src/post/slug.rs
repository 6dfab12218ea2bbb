//! Slug generation for posts.

/// Maximum number of suffixed candidates tried before giving up.
///
/// Uniqueness is resolved by a sequential lookup loop; the bound keeps a
/// pathological title from looping forever.
pub const MAX_SLUG_ATTEMPTS: u32 = 50;

/// Derive a URL slug from a post title.
///
/// Lowercases, keeps ASCII alphanumerics, and collapses every other run of
/// characters into a single hyphen. Titles that produce nothing usable fall
/// back to "post".
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    let slug = slug.trim_matches('-').to_string();
    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}

/// Produce the nth slug candidate for a base slug.
///
/// Attempt 0 is the base itself; attempt n is "{base}-{n+1}".
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, attempt + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("My First Post!"), "my-first-post");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("  trimmed  "), "trimmed");
    }

    #[test]
    fn test_slugify_non_ascii() {
        // Non-ASCII characters are dropped, not transliterated
        assert_eq!(slugify("Café #1"), "caf-1");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify(""), "post");
        assert_eq!(slugify("!!!"), "post");
        assert_eq!(slugify("日本語"), "post");
    }

    #[test]
    fn test_slug_candidate() {
        assert_eq!(slug_candidate("hello", 0), "hello");
        assert_eq!(slug_candidate("hello", 1), "hello-2");
        assert_eq!(slug_candidate("hello", 9), "hello-10");
    }
}
