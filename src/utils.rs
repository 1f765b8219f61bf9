//! Small formatting helpers: DNSSEC key tag, UTC timestamps, chunked text.

/// RFC 4034 Appendix B key-tag algorithm, run over a DNSKEY's canonical
/// RDATA bytes (flags/protocol/algorithm/key, in wire order).
pub fn calc_key_tag(rdata: &[u8]) -> u16 {
    let mut ac: u32 = 0;
    for (i, &byte) in rdata.iter().enumerate() {
        if i % 2 == 0 {
            ac += (byte as u32) << 8;
        } else {
            ac += byte as u32;
        }
    }
    ac += (ac >> 16) & 0xffff;
    (ac & 0xffff) as u16
}

const DAYS_PER_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Formats a Unix timestamp as `YYYYMMDDHHMMSS` in UTC.
///
/// RRSIG's inception/expiration fields are Unix timestamps; rendering them
/// in UTC (rather than the local zone) keeps the text form well-defined
/// regardless of where the codec runs.
pub fn format_timestamp_utc(unix_ts: u32) -> String {
    let mut days = unix_ts / 86400;
    let secs_of_day = unix_ts % 86400;

    let mut year = 1970u32;
    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if days < days_in_year {
            break;
        }
        days -= days_in_year;
        year += 1;
    }

    let mut month = 0usize;
    loop {
        let mut days_in_month = DAYS_PER_MONTH[month];
        if month == 1 && is_leap_year(year) {
            days_in_month += 1;
        }
        if days < days_in_month {
            break;
        }
        days -= days_in_month;
        month += 1;
    }

    let day = days + 1;
    let hour = secs_of_day / 3600;
    let minute = (secs_of_day % 3600) / 60;
    let second = secs_of_day % 60;

    format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}",
        year,
        month + 1,
        day,
        hour,
        minute,
        second
    )
}

/// Splits `s` into `size`-byte groups separated by a single space.
pub fn chunked(s: &str, size: usize) -> String {
    let bytes = s.as_bytes();
    bytes
        .chunks(size)
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `chunked` over a byte slice's hex representation, grouped every `size` hex digits.
pub fn hexchunked(bytes: &[u8], size: usize) -> String {
    chunked(&hex::encode(bytes), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_tag_is_deterministic() {
        let rdata = [0x01, 0x00, 0x03, 0x01, 0xde, 0xad, 0xbe, 0xef];
        assert_eq!(calc_key_tag(&rdata), calc_key_tag(&rdata));
    }

    #[test]
    fn formats_epoch() {
        assert_eq!(format_timestamp_utc(0), "19700101000000");
    }

    #[test]
    fn formats_known_instant() {
        // 2004-01-15T12:00:00Z
        assert_eq!(format_timestamp_utc(1_074_168_000), "20040115120000");
    }

    #[test]
    fn chunks_into_fixed_width_groups() {
        assert_eq!(chunked("abcdefgh", 3), "abc def gh");
    }
}
