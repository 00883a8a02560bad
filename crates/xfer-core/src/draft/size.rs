const BYTES_PER_MB: f64 = 1000.0 * 1000.0;

/// Format a byte count with two decimals: MB below 1000 MB, GB from there on.
pub fn format_upload_size(bytes: u64) -> String {
    let mb = bytes as f64 / BYTES_PER_MB;
    if mb < 1000.0 {
        format!("{mb:.2}MB")
    } else {
        format!("{:.2}GB", mb / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_megabytes_below_one_thousand() {
        assert_eq!(format_upload_size(0), "0.00MB");
        assert_eq!(format_upload_size(1_234_567), "1.23MB");
        assert_eq!(format_upload_size(999_990_000), "999.99MB");
    }

    #[test]
    fn switches_to_gigabytes_at_one_thousand_megabytes() {
        assert_eq!(format_upload_size(1_000_000_000), "1.00GB");
        assert_eq!(format_upload_size(2_500_000_000), "2.50GB");
    }
}
