use std::sync::OnceLock;

use regex::Regex;

/// Whitespace-separated tokens of an annotation that start with `#`.
/// A bare `#` counts as a token, same as any other.
pub fn annotation_hashtags(annotation: &str) -> Vec<&str> {
    annotation
        .split_whitespace()
        .filter(|token| token.starts_with('#'))
        .collect()
}

/// `#word` runs inside free text such as an activity title.
pub fn title_hashtags(title: &str) -> Vec<&str> {
    static HASHTAG: OnceLock<Regex> = OnceLock::new();
    let pattern = HASHTAG.get_or_init(|| Regex::new(r"#\w+").expect("static hashtag pattern"));
    pattern.find_iter(title).map(|m| m.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_tokens_must_start_with_hash() {
        assert_eq!(
            annotation_hashtags("  #work deep #focus   notes x#y "),
            vec!["#work", "#focus"]
        );
        assert!(annotation_hashtags("").is_empty());
        assert!(annotation_hashtags("no tags here").is_empty());
    }

    #[test]
    fn title_tags_are_found_inside_words() {
        assert_eq!(
            title_hashtags("Review #rust-lang PRs for#work"),
            vec!["#rust", "#work"]
        );
        assert!(title_hashtags("Untitled Activity").is_empty());
    }
}
