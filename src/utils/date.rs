//! UTC date parts without timezone dependencies.
//!
//! Time-bucketed content (news, events) exposes `year`, `month` and `day`
//! URL parameters; they are derived here from unix timestamps.
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTimeUtc::from_unix(1_709_769_600);
//! assert_eq!(dt.ymd_parts(), ("2024".into(), "03".into(), "07".into()));
//! ```

const SECONDS_PER_DAY: i64 = 86_400;

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeUtc {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DateTimeUtc {
    pub const fn new(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Convert unix seconds (negative before 1970) to a UTC datetime.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix(timestamp: i64) -> Self {
        let days = timestamp.div_euclid(SECONDS_PER_DAY);
        let secs = timestamp.rem_euclid(SECONDS_PER_DAY);
        let (year, month, day) = civil_from_days(days);
        Self::new(
            year,
            month,
            day,
            (secs / 3600) as u8,
            (secs / 60 % 60) as u8,
            (secs % 60) as u8,
        )
    }

    /// Unix seconds of this datetime.
    pub fn to_unix(self) -> i64 {
        days_from_civil(self.year, self.month, self.day) * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    /// Zero-padded `(YYYY, MM, DD)` strings.
    pub fn ymd_parts(self) -> (String, String, String) {
        (
            format!("{:04}", self.year),
            format!("{:02}", self.month),
            format!("{:02}", self.day),
        )
    }

    /// Format as RFC 3339: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Days since 1970-01-01 to a proleptic Gregorian `(year, month, day)`.
#[allow(clippy::cast_possible_truncation)]
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month, day)
}

/// Inverse of [`civil_from_days`].
fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let year = i64::from(year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let yoe = year.rem_euclid(400);
    let month = i64::from(month);
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unix_epoch() {
        assert_eq!(DateTimeUtc::from_unix(0), DateTimeUtc::from_ymd(1970, 1, 1));
    }

    #[test]
    fn test_from_unix_known_date() {
        // 2024-03-07T12:30:15Z
        let dt = DateTimeUtc::from_unix(1_709_814_615);
        assert_eq!(dt, DateTimeUtc::new(2024, 3, 7, 12, 30, 15));
        assert_eq!(
            dt.ymd_parts(),
            ("2024".to_string(), "03".to_string(), "07".to_string())
        );
    }

    #[test]
    fn test_leap_day() {
        let dt = DateTimeUtc::from_ymd(2024, 2, 29);
        assert_eq!(DateTimeUtc::from_unix(dt.to_unix()), dt);
    }

    #[test]
    fn test_before_epoch() {
        let dt = DateTimeUtc::from_unix(-1);
        assert_eq!(dt, DateTimeUtc::new(1969, 12, 31, 23, 59, 59));
    }

    #[test]
    fn test_to_rfc3339() {
        let dt = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(dt.to_rfc3339(), "2024-06-15T14:30:45Z");
    }
}
