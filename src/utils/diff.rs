use similar::TextDiff;

/// Build a unified diff between two texts, labelled with `file` on both sides.
///
/// Line endings are kept exactly as they appear in the inputs. Identical
/// inputs produce an empty string.
pub fn create_diff(original: &str, modified: &str, file: &str, context_lines: usize) -> String {
    TextDiff::from_lines(original, modified)
        .unified_diff()
        .context_radius(context_lines)
        .header(file, file)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn creates_diff_for_new_file() {
        let diff = create_diff("", "hello\n", "a.txt", 3);

        assert_eq!(diff, "--- a.txt\n+++ a.txt\n@@ -0,0 +1 @@\n+hello\n");
    }

    #[test]
    fn creates_diff_for_changed_line() {
        let diff = create_diff("old\n", "new\n", "a.txt", 3);

        assert_eq!(diff, "--- a.txt\n+++ a.txt\n@@ -1 +1 @@\n-old\n+new\n");
    }

    #[test]
    fn identical_content_has_empty_diff() {
        let diff = create_diff("same\n", "same\n", "a.txt", 3);

        assert!(diff.is_empty());
    }

    #[test]
    fn keeps_context_around_changes() {
        let original = "one\ntwo\nthree\nfour\nfive\n";
        let modified = "one\ntwo\nTHREE\nfour\nfive\n";

        let diff = create_diff(original, modified, "src/lib.rs", 1);

        assert_eq!(
            diff,
            "--- src/lib.rs\n+++ src/lib.rs\n@@ -2,3 +2,3 @@\n two\n-three\n+THREE\n four\n"
        );
    }

    #[test]
    fn marks_missing_trailing_newline() {
        let diff = create_diff("line\n", "line\nlast", "a.txt", 3);

        assert!(diff.contains("+last"));
        assert!(diff.contains("\\ No newline at end of file"));
    }

    #[test]
    fn preserves_crlf_line_endings() {
        let diff = create_diff("a\r\nb\r\n", "a\r\nc\r\n", "win.txt", 3);

        assert!(diff.contains("-b\r\n"));
        assert!(diff.contains("+c\r\n"));
    }
}
