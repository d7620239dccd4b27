use chrono::{DateTime, Utc};

use crate::shared::constants::{DATE_PLACEHOLDER, DISPLAY_DATE_FORMAT};

/// Render a stored timestamp for list views, `N/A` when absent
pub fn format_timestamp(value: Option<&DateTime<Utc>>) -> String {
    match value {
        Some(at) => at.format(DISPLAY_DATE_FORMAT).to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 7, 8, 59).unwrap();
        assert_eq!(format_timestamp(Some(&at)), "05/01/2024 07:08");
    }

    #[test]
    fn test_format_missing_timestamp() {
        assert_eq!(format_timestamp(None), "N/A");
    }
}
