use num_traits::Num;

/// Parses an unsigned integer literal, detecting the radix from its prefix.
///
/// * `0x` or `0X` followed by at least one hex digit is hexadecimal.
/// * A leading `0` followed by more digits is octal.
/// * Anything else is decimal.
///
/// Signs, whitespace, digit separators and empty input are rejected, as are values that do not fit
/// into `T`. Returns `None` if the literal is not valid.
///
/// # Example
///
/// ```
/// use capacity_spec::parse_integer;
///
/// assert_eq!(parse_integer::<u32>("42"), Some(42));
/// assert_eq!(parse_integer::<u32>("0x2a"), Some(42));
/// assert_eq!(parse_integer::<u32>("052"), Some(42));
/// assert_eq!(parse_integer::<u32>("09"), None);
/// ```
#[must_use]
pub fn parse_integer<T>(literal: &str) -> Option<T>
where
    T: Num,
{
    let (digits, radix) = split_radix(literal);

    // `from_str_radix` tolerates a leading sign, which is not part of the literal syntax.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    T::from_str_radix(digits, radix).ok()
}

fn split_radix(literal: &str) -> (&str, u32) {
    if let Some(hex_digits) = literal
        .strip_prefix("0x")
        .or_else(|| literal.strip_prefix("0X"))
    {
        return (hex_digits, 16);
    }

    match literal.strip_prefix('0') {
        Some(octal_digits) if !octal_digits.is_empty() => (octal_digits, 8),
        _ => (literal, 10),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn decimal() {
        assert_eq!(parse_integer::<u32>("0"), Some(0));
        assert_eq!(parse_integer::<u32>("7"), Some(7));
        assert_eq!(parse_integer::<u64>("1024"), Some(1024));
        assert_eq!(parse_integer::<u32>("4294967295"), Some(u32::MAX));
    }

    #[test]
    fn hexadecimal() {
        assert_eq!(parse_integer::<u32>("0x0"), Some(0));
        assert_eq!(parse_integer::<u32>("0x400"), Some(1024));
        assert_eq!(parse_integer::<u32>("0XfF"), Some(255));
        assert_eq!(parse_integer::<u64>("0xffffffffffffffff"), Some(u64::MAX));
    }

    #[test]
    fn octal() {
        assert_eq!(parse_integer::<u32>("00"), Some(0));
        assert_eq!(parse_integer::<u32>("010"), Some(8));
        assert_eq!(parse_integer::<u32>("0777"), Some(511));
    }

    #[test]
    fn invalid_digits_for_radix() {
        assert_eq!(parse_integer::<u32>("08"), None);
        assert_eq!(parse_integer::<u32>("019"), None);
        assert_eq!(parse_integer::<u32>("0xg"), None);
        assert_eq!(parse_integer::<u32>("12a"), None);
    }

    #[test]
    fn prefix_without_digits() {
        assert_eq!(parse_integer::<u32>(""), None);
        assert_eq!(parse_integer::<u32>("0x"), None);
        assert_eq!(parse_integer::<u32>("0X"), None);
    }

    #[test]
    fn signs_and_whitespace_are_rejected() {
        assert_eq!(parse_integer::<u32>("+1"), None);
        assert_eq!(parse_integer::<u32>("-1"), None);
        assert_eq!(parse_integer::<u32>("0x+1"), None);
        assert_eq!(parse_integer::<u32>("01+1"), None);
        assert_eq!(parse_integer::<u32>(" 1"), None);
        assert_eq!(parse_integer::<u32>("1 "), None);
        assert_eq!(parse_integer::<u32>("1_000"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(parse_integer::<u32>("4294967296"), None);
        assert_eq!(parse_integer::<u32>("0x100000000"), None);
        assert_eq!(parse_integer::<u64>("18446744073709551616"), None);
    }
}
