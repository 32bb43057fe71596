use crate::error::RecordError;

pub const SEMICOLON: u8 = b';';
pub const NEWLINE: u8 = b'\n';

/// Splits one raw line into its key and value.
///
/// The key is everything before the first `;`, untrimmed, and borrows from
/// `line`. The value is everything after it with surrounding Unicode
/// whitespace removed, so a trailing `\n` or `\r\n` does not matter. Only
/// finite numbers are accepted: `nan`, `inf` and `infinity` are
/// [`RecordError::NumberFormat`].
#[inline]
pub fn parse_record(line: &[u8]) -> Result<(&[u8], f64), RecordError> {
    let Some(pos) = line.iter().position(|&b| b == SEMICOLON) else {
        return Err(RecordError::MalformedRecord);
    };
    let (key, rest) = line.split_at(pos);
    let value = parse_value(&rest[1..])?;
    Ok((key, value))
}

#[inline]
fn parse_value(raw: &[u8]) -> Result<f64, RecordError> {
    let text = std::str::from_utf8(raw)
        .map_err(|_| RecordError::NumberFormat)?
        .trim();
    if text.is_empty() {
        return Err(RecordError::NumberFormat);
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RecordError::NumberFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_delimiter() {
        let (key, value) = parse_record(b"Hamburg;12.0\n").unwrap();
        assert_eq!(key, b"Hamburg");
        assert_eq!(value, 12.0);

        // later delimiters belong to the value, which then fails to parse
        assert_eq!(parse_record(b"a;1;2\n"), Err(RecordError::NumberFormat));
    }

    #[test]
    fn key_is_not_trimmed() {
        let (key, value) = parse_record(b" St. John's ; -3.5 \r\n").unwrap();
        assert_eq!(key, b" St. John's ");
        assert_eq!(value, -3.5);
    }

    #[test]
    fn accepts_unterminated_line() {
        let (key, value) = parse_record(b"Abha;18.0").unwrap();
        assert_eq!(key, b"Abha");
        assert_eq!(value, 18.0);
    }

    #[test]
    fn accepts_exponent_and_sign() {
        assert_eq!(parse_record(b"x;1e2\n").unwrap().1, 100.0);
        assert_eq!(parse_record(b"x;+2.5E-1\n").unwrap().1, 0.25);
        assert_eq!(parse_record(b"x;-0.5\n").unwrap().1, -0.5);
        assert_eq!(parse_record(b"x;7\n").unwrap().1, 7.0);
    }

    #[test]
    fn empty_key_is_valid() {
        let (key, value) = parse_record(b";4.2\n").unwrap();
        assert!(key.is_empty());
        assert_eq!(value, 4.2);
    }

    #[test]
    fn missing_delimiter() {
        assert_eq!(
            parse_record(b"garbage-no-delimiter\n"),
            Err(RecordError::MalformedRecord)
        );
        assert_eq!(parse_record(b"\n"), Err(RecordError::MalformedRecord));
        assert_eq!(parse_record(b""), Err(RecordError::MalformedRecord));
    }

    #[test]
    fn bad_numbers() {
        assert_eq!(parse_record(b"C;abc\n"), Err(RecordError::NumberFormat));
        assert_eq!(parse_record(b"C;\n"), Err(RecordError::NumberFormat));
        assert_eq!(parse_record(b"C;   \n"), Err(RecordError::NumberFormat));
        assert_eq!(parse_record(b"C;1.2.3\n"), Err(RecordError::NumberFormat));
        assert_eq!(parse_record(b"C;\xff\xfe\n"), Err(RecordError::NumberFormat));
    }

    #[test]
    fn rejects_non_finite_values() {
        for line in [&b"x;nan\n"[..], b"x;NaN", b"x;inf\n", b"x;-Infinity\n", b"x;+infinity"] {
            assert_eq!(parse_record(line), Err(RecordError::NumberFormat), "{line:?}");
        }
        // overflows to infinity
        assert_eq!(parse_record(b"x;1e400\n"), Err(RecordError::NumberFormat));
    }

    #[test]
    fn trims_unicode_whitespace_around_value() {
        let (key, value) = parse_record("c; \u{a0}5.0\u{2003}\n".as_bytes()).unwrap();
        assert_eq!(key, b"c");
        assert_eq!(value, 5.0);
    }

    #[test]
    fn key_borrows_from_line() {
        let line = b"Oslo;1.0\n".to_vec();
        let (key, _) = parse_record(&line).unwrap();
        assert_eq!(key.as_ptr(), line.as_ptr());
    }
}
