//!
//! Small formatting helpers shared by log lines.
//!

///
/// Ellipsize a string in the middle when it exceeds the `threshold`.
///
/// Produces: first `head` chars, a Unicode ellipsis '…', then last `tail` chars.
/// Returns the original string if it does not exceed the threshold, or if the
/// requested head/tail slice would not shorten it.
///
#[must_use]
pub fn ellipsize_middle(s: &str, threshold: usize, head: usize, tail: usize) -> String {
    let len = s.chars().count();
    if len <= threshold || head + 1 + tail >= len {
        return s.to_string();
    }

    let prefix: String = s.chars().take(head).collect();
    let suffix: String = s.chars().skip(len - tail).collect();

    format!("{prefix}…{suffix}")
}

///
/// Fit a label into a fixed-width column: ellipsize when too long, then
/// center. Used for the role column of every log line.
///
#[must_use]
pub fn fit_column(label: &str, width: usize) -> String {
    let head = width.saturating_sub(1) / 2;
    let tail = width.saturating_sub(1) - head;
    let fitted = ellipsize_middle(label, width, head, tail);

    format!("{fitted:^width$}")
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_short_strings() {
        assert_eq!(ellipsize_middle("main", 9, 4, 4), "main");
        assert_eq!(ellipsize_middle("abcdefghi", 9, 4, 4), "abcdefghi");
    }

    #[test]
    fn ellipsizes_long_strings() {
        assert_eq!(ellipsize_middle("print-service", 9, 4, 4), "prin…vice");
        assert_eq!(ellipsize_middle("abcdefghijkl", 9, 4, 4), "abcd…ijkl");
    }

    #[test]
    fn fit_column_centers_and_bounds_width() {
        assert_eq!(fit_column("main", 9), "  main   ");
        assert_eq!(fit_column("relauncher", 9).chars().count(), 9);
        assert_eq!(fit_column("relauncher", 9), "rela…cher");
    }
}
