//! Fixed-point conversion between decimal amount strings and base-unit strings.
//!
//! `encode` turns a human amount such as `"1.5"` into a base-unit count
//! (`"150000000"` at 8 decimals); `decode` goes the other way. Both work on
//! text only, so no precision is lost to floating point. Excess fractional
//! digits are truncated by `encode`, never rounded.

use std::iter;

use bitcoin::Amount;

use crate::error::CoreError;

/// Number of base-unit digits in one bitcoin (satoshi precision).
pub const BTC_DECIMALS: usize = 8;

/// Largest supported `decimal`; enough for any 256-bit base-unit count.
pub const MAX_DECIMALS: usize = 77;

/// Something that can be handed to the amount codec: decimal text or a number.
pub trait AmountText {
    /// `true` for a numeric zero, which short-circuits to `"0"`.
    fn is_numeric_zero(&self) -> bool {
        false
    }

    fn to_amount_text(&self) -> String;
}

impl AmountText for str {
    fn to_amount_text(&self) -> String {
        self.to_owned()
    }
}

impl AmountText for String {
    fn to_amount_text(&self) -> String {
        self.clone()
    }
}

impl<T: AmountText + ?Sized> AmountText for &T {
    fn is_numeric_zero(&self) -> bool {
        (**self).is_numeric_zero()
    }

    fn to_amount_text(&self) -> String {
        (**self).to_amount_text()
    }
}

macro_rules! impl_amount_text_for_numbers {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl AmountText for $ty {
                fn is_numeric_zero(&self) -> bool {
                    *self == $zero
                }

                fn to_amount_text(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_amount_text_for_numbers!(
    u32 => 0, u64 => 0, u128 => 0, usize => 0,
    i32 => 0, i64 => 0, i128 => 0,
    f32 => 0.0, f64 => 0.0,
);

/// Scale a decimal amount up to base units.
///
/// ```
/// use btcrpc_core::amount::encode;
///
/// assert_eq!(encode("1.5", 8).unwrap(), "150000000");
/// assert_eq!(encode("1.23456789123", 8).unwrap(), "123456789");
/// assert_eq!(encode(0, 8).unwrap(), "0");
/// ```
pub fn encode<A: AmountText>(amount: A, decimal: usize) -> Result<String, CoreError> {
    if amount.is_numeric_zero() {
        return Ok("0".to_owned());
    }
    let text = amount.to_amount_text();
    if text == "0" {
        return Ok(text);
    }
    check_decimals(&text, decimal)?;

    let (sign, unsigned) = split_sign(&text);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let well_formed = !(int_part.is_empty() && frac_part.is_empty())
        && int_part.bytes().all(|b| b.is_ascii_digit())
        && frac_part.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(CoreError::InvalidAmount(text));
    }

    let mut out = String::with_capacity(sign.len() + int_part.len() + decimal);
    out.push_str(sign);
    out.push_str(int_part);
    if frac_part.len() >= decimal {
        out.push_str(&frac_part[..decimal]);
    } else {
        out.push_str(frac_part);
        out.extend(iter::repeat('0').take(decimal - frac_part.len()));
    }
    Ok(out)
}

/// Scale a base-unit count down to its shortest decimal form.
///
/// ```
/// use btcrpc_core::amount::decode;
///
/// assert_eq!(decode("150000000", 8).unwrap(), "1.5");
/// assert_eq!(decode("100000000", 8).unwrap(), "1");
/// assert_eq!(decode("1", 8).unwrap(), "0.00000001");
/// ```
pub fn decode<A: AmountText>(base_units: A, decimal: usize) -> Result<String, CoreError> {
    if base_units.is_numeric_zero() {
        return Ok("0".to_owned());
    }
    let text = base_units.to_amount_text();
    if text == "0" {
        return Ok(text);
    }
    check_decimals(&text, decimal)?;

    let (sign, digits) = split_sign(&text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidAmount(text));
    }
    Ok(decode_digits(sign, digits, decimal))
}

/// Format a bitcoin amount as a decimal BTC string (`"0.0001"`).
///
/// Bitcoin Core accepts amounts as JSON strings, which avoids sending
/// floating-point values over the wire.
pub fn format_btc(amount: Amount) -> String {
    decode_digits("", &amount.to_sat().to_string(), BTC_DECIMALS)
}

/// Parse a decimal BTC string into an [`Amount`], truncating below one satoshi.
pub fn parse_btc(text: &str) -> Result<Amount, CoreError> {
    let sats = encode(text, BTC_DECIMALS)?;
    sats.parse::<u64>()
        .map(Amount::from_sat)
        .map_err(|_| CoreError::InvalidAmount(text.to_owned()))
}

fn decode_digits(sign: &str, digits: &str, decimal: usize) -> String {
    if decimal == 0 {
        return format!("{sign}{digits}");
    }

    let len = digits.len();
    let (int_part, frac_part) = if len > decimal {
        let (int_part, frac_part) = digits.split_at(len - decimal);
        (int_part, frac_part.to_owned())
    } else {
        let padded: String = iter::repeat('0')
            .take(decimal - len)
            .chain(digits.chars())
            .collect();
        ("0", padded)
    };

    // Only the fractional part is trimmed; integer zeros are significant.
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

fn check_decimals(text: &str, decimal: usize) -> Result<(), CoreError> {
    if decimal > MAX_DECIMALS {
        return Err(CoreError::InvalidAmount(format!(
            "{text} (scale {decimal} exceeds {MAX_DECIMALS} decimals)"
        )));
    }
    Ok(())
}

fn split_sign(text: &str) -> (&str, &str) {
    match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_scale_is_rejected() {
        for decimal in [MAX_DECIMALS + 1, usize::MAX] {
            assert!(matches!(encode("1.5", decimal), Err(CoreError::InvalidAmount(_))));
            assert!(matches!(decode("15", decimal), Err(CoreError::InvalidAmount(_))));
        }
        assert_eq!(encode("1", 18).expect("valid"), "1000000000000000000");
        assert_eq!(decode("1", MAX_DECIMALS).expect("valid").len(), MAX_DECIMALS + 2);
    }

    #[test]
    fn encode_scales_whole_amounts() {
        assert_eq!(encode("1", 8).expect("valid"), "100000000");
        assert_eq!(encode("21", 2).expect("valid"), "2100");
        assert_eq!(encode(3_u64, 8).expect("valid"), "300000000");
    }

    #[test]
    fn encode_pads_short_fractions() {
        assert_eq!(encode("1.5", 8).expect("valid"), "150000000");
        assert_eq!(encode("0.001", 8).expect("valid"), "000100000");
        assert_eq!(encode(".5", 8).expect("valid"), "50000000");
    }

    #[test]
    fn encode_truncates_excess_precision_without_rounding() {
        assert_eq!(encode("1.23456789123", 8).expect("valid"), "123456789");
        assert_eq!(encode("0.999999999", 8).expect("valid"), "099999999");
    }

    #[test]
    fn encode_zero_short_circuits() {
        assert_eq!(encode(0, 8).expect("valid"), "0");
        assert_eq!(encode(0.0_f64, 8).expect("valid"), "0");
        assert_eq!(encode("0", 8).expect("valid"), "0");
    }

    #[test]
    fn encode_accepts_floats() {
        assert_eq!(encode(1.5_f64, 8).expect("valid"), "150000000");
        assert_eq!(encode(0.00000001_f64, 8).expect("valid"), "000000001");
    }

    #[test]
    fn encode_output_has_no_separator() {
        for (input, int_len) in [("1.5", 1), ("12345.6789", 5), ("7", 1), ("100.000000001", 3)] {
            let out = encode(input, 8).expect("valid");
            assert!(!out.contains('.'), "{input} encoded to {out}");
            assert!(out.len() >= int_len, "{input} encoded to {out}");
        }
    }

    #[test]
    fn encode_keeps_sign() {
        assert_eq!(encode("-0.5", 8).expect("valid"), "-050000000");
    }

    #[test]
    fn encode_rejects_malformed_text() {
        for bad in ["", "-", ".", "1.2.3", "abc", "1e-8", "½"] {
            let err = encode(bad, 8).expect_err("must reject");
            assert!(matches!(err, CoreError::InvalidAmount(ref s) if s == bad));
        }
    }

    #[test]
    fn decode_splits_and_trims() {
        assert_eq!(decode("150000000", 8).expect("valid"), "1.5");
        assert_eq!(decode("100000000", 8).expect("valid"), "1");
        assert_eq!(decode("123456789", 8).expect("valid"), "1.23456789");
        assert_eq!(decode(150_000_000_u64, 8).expect("valid"), "1.5");
    }

    #[test]
    fn decode_pads_small_values() {
        assert_eq!(decode("1", 8).expect("valid"), "0.00000001");
        assert_eq!(decode("12345678", 8).expect("valid"), "0.12345678");
        assert_eq!(decode("10", 8).expect("valid"), "0.0000001");
    }

    #[test]
    fn decode_preserves_integer_zeros() {
        assert_eq!(decode("1000000000", 8).expect("valid"), "10");
        assert_eq!(decode("2100000000000000", 8).expect("valid"), "21000000");
    }

    #[test]
    fn decode_zero_short_circuits() {
        assert_eq!(decode(0, 8).expect("valid"), "0");
        assert_eq!(decode("0", 8).expect("valid"), "0");
    }

    #[test]
    fn decode_with_zero_decimals_is_identity() {
        assert_eq!(decode("4200", 0).expect("valid"), "4200");
    }

    #[test]
    fn decode_rejects_non_digits() {
        assert!(decode("1.5", 8).is_err());
        assert!(decode("", 8).is_err());
        assert!(decode("12a", 8).is_err());
    }

    #[test]
    fn decode_reverses_encode_up_to_truncation() {
        let encoded = encode("1.5", 8).expect("valid");
        assert_eq!(decode(&encoded, 8).expect("valid"), "1.5");

        let encoded = encode("1.23456789123", 8).expect("valid");
        assert_eq!(decode(&encoded, 8).expect("valid"), "1.23456789");

        let encoded = encode("-2.25", 8).expect("valid");
        assert_eq!(decode(&encoded, 8).expect("valid"), "-2.25");
    }

    #[test]
    fn btc_helpers_round_trip_through_amount() {
        let amount = parse_btc("0.0001").expect("valid");
        assert_eq!(amount, Amount::from_sat(10_000));
        assert_eq!(format_btc(amount), "0.0001");
        assert_eq!(format_btc(Amount::from_sat(0)), "0");
        assert_eq!(format_btc(Amount::ONE_BTC), "1");
    }

    #[test]
    fn parse_btc_rejects_negative() {
        assert!(parse_btc("-1").is_err());
    }
}
