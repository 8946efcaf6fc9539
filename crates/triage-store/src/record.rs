use chrono::{Local, NaiveDateTime, Timelike};

/// Timestamp layout used in log blocks
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Line written after every block (80 dashes)
pub const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

/// One successful exchange with the generation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRecord {
    pub timestamp: NaiveDateTime,
    pub role: String,
    pub input: String,
    pub response: String,
}

impl IncidentRecord {
    pub fn new(
        timestamp: NaiveDateTime,
        role: impl Into<String>,
        input: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            role: role.into(),
            input: input.into(),
            response: response.into(),
        }
    }

    /// Create a record stamped with the current local time
    pub fn now(
        role: impl Into<String>,
        input: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self::new(Local::now().naive_local(), role, input, response)
    }

    /// Render the record as a log block.
    ///
    /// Input and response are written verbatim, without escaping.
    pub fn to_block(&self) -> String {
        format!(
            "\n[Time]: {}\n[Role]: {}\n[User Input]: {}\n[Response]: {}\n{}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.role,
            self.input,
            self.response,
            SEPARATOR
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, nanos: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_nano_opt(h, m, s, nanos)
            .unwrap()
    }

    #[test]
    fn test_block_layout_is_exact() {
        let record = IncidentRecord::new(
            at(9, 5, 7, 0),
            "SRE Expert",
            "Pods stuck in CrashLoopBackOff",
            "Check the readiness probe.",
        );

        let expected = format!(
            "\n[Time]: 2025-03-14 09:05:07\n[Role]: SRE Expert\n[User Input]: Pods stuck in CrashLoopBackOff\n[Response]: Check the readiness probe.\n{}\n",
            "-".repeat(80)
        );
        assert_eq!(record.to_block(), expected);
    }

    #[test]
    fn test_separator_is_80_dashes() {
        assert_eq!(SEPARATOR.len(), 80);
        assert!(SEPARATOR.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_timestamp_truncated_to_seconds() {
        let record = IncidentRecord::new(at(23, 59, 59, 999_999_999), "Cloud Engineer", "x", "y");
        assert_eq!(record.timestamp, at(23, 59, 59, 0));
    }

    #[test]
    fn test_multiline_values_written_verbatim() {
        let record = IncidentRecord::new(
            at(0, 0, 0, 0),
            "Linux Troubleshooter",
            "line one\nline two",
            "1. run `df -h`\n2. run `du -sh /var/log`",
        );
        let block = record.to_block();
        assert!(block.contains("[User Input]: line one\nline two\n"));
        assert!(block.contains("[Response]: 1. run `df -h`\n2. run `du -sh /var/log`\n"));
    }
}
