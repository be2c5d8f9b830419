/// Derives a URL-safe slug from an episode title: lowercase, punctuation
/// stripped, whitespace runs collapsed to single hyphens.
///
/// Slugs are advisory formatting only; uniqueness is not enforced anywhere.
#[must_use]
pub fn slugify(title: &str) -> String {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_strips_punctuation_and_hyphenates() {
        assert_eq!(slugify("Hello, World! 2"), "hello-world-2");
    }

    #[test]
    fn test_slugify_collapses_whitespace_runs() {
        assert_eq!(slugify("Release   Notes\tLive"), "release-notes-live");
    }

    #[test]
    fn test_slugify_keeps_underscores() {
        assert_eq!(slugify("snake_case title"), "snake_case-title");
    }

    #[test]
    fn test_slugify_empty_input() {
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_file_upload_extension() {
        let upload = crate::FileUpload {
            file_name: "photo.final.PNG".to_string(),
            content_type: "image/png".to_string(),
            data: String::new(),
        };
        assert_eq!(upload.extension(), Some("PNG"));

        let no_ext = crate::FileUpload {
            file_name: "photo".to_string(),
            content_type: "image/png".to_string(),
            data: String::new(),
        };
        assert_eq!(no_ext.extension(), None);
    }
}
