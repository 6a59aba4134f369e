/// Lenient integer parse used for every numeric column of the legacy tables.
///
/// Skips leading whitespace, accepts one optional sign, then consumes digits
/// until the first non-digit. Anything unparsable yields `0`, and values that
/// overflow saturate, so `"60 "`, `"60//x"` and `"60"` all read as 60.
pub fn atoi(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

/// Parse an identifier column. Negative or oversized values read as `0`,
/// which every caller treats as "no reference".
pub fn parse_id(raw: &str) -> u32 {
    u32::try_from(atoi(raw)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoi_matches_c_semantics() {
        assert_eq!(atoi("60"), 60);
        assert_eq!(atoi("  45"), 45);
        assert_eq!(atoi("-20"), -20);
        assert_eq!(atoi("+7"), 7);
        assert_eq!(atoi("12abc"), 12);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("07"), 7);
        assert_eq!(atoi("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn parse_id_rejects_negative() {
        assert_eq!(parse_id("501"), 501);
        assert_eq!(parse_id("-1"), 0);
        assert_eq!(parse_id("x"), 0);
    }
}
