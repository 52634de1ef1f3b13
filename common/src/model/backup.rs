use serde::{Deserialize, Serialize};

/// An encrypted backup archive as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub id: String, // UUID
    /// ISO 8601 timestamp.
    pub created_at: String,
    pub size_bytes: u64,
    pub encrypted: bool,
    /// True when the archive was produced by the scheduler rather than manually.
    pub scheduled: bool,
}

/// Scheduled backup configuration. Retention is the number of scheduled
/// archives kept before the oldest is pruned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupSchedule {
    pub enabled: bool,
    pub interval_hours: u32,
    pub retention: u32,
}

impl Default for BackupSchedule {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_hours: 24,
            retention: DEFAULT_RETENTION,
        }
    }
}

pub const MIN_RETENTION: u32 = 1;
pub const MAX_RETENTION: u32 = 30;
pub const DEFAULT_RETENTION: u32 = 7;

/// Parses a retention count from a free-form input field: clamp to
/// `[MIN_RETENTION, MAX_RETENTION]`, default on parse failure.
pub fn parse_retention(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .map(|n| n.clamp(MIN_RETENTION, MAX_RETENTION))
        .unwrap_or(DEFAULT_RETENTION)
}

/// Human-readable archive size, used by the backup table.
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;
    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retention_is_clamped_and_defaulted() {
        assert_eq!(parse_retention("7"), 7);
        assert_eq!(parse_retention(" 12 "), 12);
        assert_eq!(parse_retention("0"), MIN_RETENTION);
        assert_eq!(parse_retention("500"), MAX_RETENTION);
        assert_eq!(parse_retention("abc"), DEFAULT_RETENTION);
        assert_eq!(parse_retention(""), DEFAULT_RETENTION);
        assert_eq!(parse_retention("-3"), DEFAULT_RETENTION);
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MiB");
    }
}
