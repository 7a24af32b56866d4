use chrono::Utc;
use std::path::Path;
use uuid::Uuid;

/// `<unix-millis>-<random>-<sanitized original>`
pub fn unique_name(original: &str) -> String {
    let suffix = Uuid::new_v4().as_u128() % 1_000_000_000;
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        suffix,
        sanitize(original)
    )
}

/// Keep only the last path component and replace anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// True when `name` is a single, non-special path component.
pub fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Content type served for a stored image, from its extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories_and_odd_characters() {
        assert_eq!(sanitize("../../etc/passwd"), "passwd");
        assert_eq!(sanitize("C:\\photos\\my cat.JPG"), "my_cat.JPG");
        assert_eq!(sanitize("été.png"), "_t_.png");
        assert_eq!(sanitize(""), "upload");
        assert_eq!(sanitize(".."), "upload");
    }

    #[test]
    fn test_unique_names_differ() {
        let a = unique_name("cat.png");
        let b = unique_name("cat.png");
        assert_ne!(a, b);
        assert!(a.ends_with("-cat.png"));
        assert!(is_plain_name(&a));
    }

    #[test]
    fn test_plain_name() {
        assert!(is_plain_name("1700-1-cat.png"));
        assert!(!is_plain_name("../cat.png"));
        assert!(!is_plain_name("a\\b"));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name(""));
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("a.JPG"), "image/jpeg");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
