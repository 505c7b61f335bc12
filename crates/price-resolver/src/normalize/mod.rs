//! Locale-tolerant numeric text normalization.
//!
//! Upstream price text arrives in whatever convention the provider or its
//! locale uses: `"1,234.56"`, `"1.234,56"`, `"249,20 €"`, `"$ 180.25"`,
//! sometimes padded with non-breaking spaces. [`normalize`] converts all of
//! these into a canonical `f64` or reports a classified failure.
//!
//! The function is pure - no I/O, no state - so the locale edge cases can
//! be tested exhaustively.

use crate::errors::NormalizeError;

/// Parse heterogeneous numeric/currency text into a canonical `f64`.
///
/// Separator handling:
/// - both `,` and `.` present: the last-occurring separator is the decimal
///   point, all earlier ones are thousands separators and are dropped;
/// - only `,` present: a single comma followed by 1-2 digits is a decimal
///   point, anything else is a thousands separator;
/// - only `.` present: kept as the decimal point.
///
/// Whitespace (including U+00A0 and U+202F), currency glyphs, and any other
/// non-numeric characters are stripped before parsing.
///
/// # Errors
///
/// Fails when the cleaned string is empty, still contains more than one
/// decimal point, or does not parse to a finite positive number.
///
/// # Examples
///
/// ```
/// use finboard_price_resolver::normalize::normalize;
///
/// assert_eq!(normalize("1.234,56").unwrap(), 1234.56);
/// assert_eq!(normalize("1,234.56").unwrap(), 1234.56);
/// assert_eq!(normalize("249,20 €").unwrap(), 249.20);
/// assert!(normalize("abc").is_err());
/// ```
pub fn normalize(raw: &str) -> Result<f64, NormalizeError> {
    // char::is_whitespace covers NBSP (U+00A0) and narrow NBSP (U+202F).
    let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let has_comma = stripped.contains(',');
    let has_dot = stripped.contains('.');

    let canonical: String = if has_comma && has_dot {
        // Both separators: the last one wins as the decimal point.
        let decimal_at = stripped
            .rfind(|c| c == ',' || c == '.')
            .expect("separator presence checked above");
        stripped
            .char_indices()
            .filter_map(|(i, c)| match c {
                ',' | '.' if i == decimal_at => Some('.'),
                ',' | '.' => None,
                other => Some(other),
            })
            .collect()
    } else if has_comma {
        if is_decimal_comma(&stripped) {
            stripped.replace(',', ".")
        } else {
            stripped.replace(',', "")
        }
    } else {
        stripped
    };

    let cleaned: String = canonical
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() || !cleaned.contains(|c: char| c.is_ascii_digit()) {
        return Err(NormalizeError::Empty);
    }
    if cleaned.matches('.').count() > 1 {
        return Err(NormalizeError::AmbiguousSeparators(cleaned));
    }

    let value: f64 = cleaned
        .parse()
        .map_err(|_| NormalizeError::Unparseable(cleaned.clone()))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(NormalizeError::NotPositive(cleaned));
    }

    Ok(value)
}

/// A lone comma followed by 1-2 digits is a decimal comma (`"249,20"`);
/// everything else (`"1,234"`, `"1,234,567"`) is thousands grouping.
fn is_decimal_comma(text: &str) -> bool {
    if text.matches(',').count() != 1 {
        return false;
    }
    let tail = text
        .rsplit(',')
        .next()
        .expect("comma presence checked by caller");
    let digits = tail.chars().take_while(|c| c.is_ascii_digit()).count();
    (1..=2).contains(&digits)
}
