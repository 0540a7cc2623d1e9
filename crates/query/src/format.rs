/// Format a byte count for display.
///
/// Zero is `"0 B"`; everything else carries two decimals and promotes to
/// the next unit at each 1024 boundary, up to TB.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_owned();
    }

    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.2} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.2} TB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_size(0), "0 B");
    }

    #[test]
    fn sub_kilobyte() {
        assert_eq!(format_size(10), "10.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
    }

    #[test]
    fn unit_promotion_at_each_boundary() {
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_size(1024_u64.pow(4)), "1.00 TB");
    }

    #[test]
    fn beyond_terabytes_stays_in_tb() {
        assert_eq!(format_size(1024_u64.pow(4) * 2048), "2048.00 TB");
    }
}
