//! Display Formatting
//!
//! Text derived from numeric/temporal state at render time. Nothing here is
//! ever parsed back into state.

use chrono::NaiveDateTime;

/// Titles longer than this are cut in list views
pub const TITLE_DISPLAY_CHARS: usize = 26;

/// `12345` -> `"12k"`; below a thousand the number is shown as is
pub fn format_count(count: u64) -> String {
    if count >= 1000 {
        format!("{}k", count / 1000)
    } else {
        count.to_string()
    }
}

/// `YYYY-MM-DD hh:mm:ss`
pub fn format_date(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_DISPLAY_CHARS {
        let cut: String = title.chars().take(TITLE_DISPLAY_CHARS).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1k");
        assert_eq!(format_count(12_999), "12k");
        assert_eq!(format_count(150_000), "150k");
    }

    #[test]
    fn test_format_date() {
        let at = NaiveDate::from_ymd_opt(2021, 1, 5)
            .and_then(|d| d.and_hms_opt(9, 3, 7))
            .unwrap();
        assert_eq!(format_date(&at), "2021-01-05 09:03:07");
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("short"), "short");

        let exact = "a".repeat(26);
        assert_eq!(truncate_title(&exact), exact);

        let long = "b".repeat(30);
        assert_eq!(truncate_title(&long), format!("{}...", "b".repeat(26)));
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let title = "제목이 아주 길어지면 어떻게 될까요 26자가 넘어가면 잘려야 합니다";
        let truncated = truncate_title(title);
        assert_eq!(truncated.chars().count(), 26 + 3);
        assert!(truncated.starts_with("제목이 아주"));
    }
}
