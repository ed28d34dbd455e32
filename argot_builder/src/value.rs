use std::net::IpAddr;

use chrono::{NaiveDate, TimeDelta};
use thiserror::Error;
use url::Url;

const DATE_FORMAT: &str = "%Y-%m-%d";

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// A raw token could not be converted into the value's type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {kind}: {reason}.")]
pub struct InvalidValue {
    /// The raw token.
    pub token: String,
    /// The name of the target type.
    pub kind: &'static str,
    /// Why the conversion failed.
    pub reason: String,
}

impl InvalidValue {
    pub(crate) fn new(token: &str, kind: &'static str, reason: impl std::fmt::Display) -> Self {
        Self {
            token: token.to_string(),
            kind,
            reason: reason.to_string(),
        }
    }
}

/// A settable, renderable typed slot over caller owned storage.
///
/// All input arrives as a raw `&str`; each implementation owns the conversion into its type.
/// Implementations must either fully replace the referenced storage or leave it untouched.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{IntValue, Value};
///
/// let mut count: i64 = 0;
/// let mut value = IntValue::new(&mut count);
/// value.set("0x10").unwrap();
/// assert!(value.set("ten").is_err());
/// assert_eq!(value.render(), "16");
/// ```
pub trait Value {
    /// Convert `raw` and assign it onto the referenced storage.
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue>;

    /// Render the current content of the referenced storage.
    fn render(&self) -> String;

    /// The flag capability of this value, if it has one.
    fn as_flag(&self) -> Option<&dyn FlagValue> {
        None
    }
}

/// A value that may be set by the mere presence of its option (ex: `--verbose`).
pub trait FlagValue: Value {
    /// The raw value to [`Value::set`] when the option is present without a value.
    fn flag_value(&self) -> &'static str;
}

/// Boolean value; also a [`FlagValue`] which sets `true` when present.
///
/// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True`, `0`, `f`, `F`, `FALSE`, `false`, `False`.
pub struct BoolValue<'a> {
    variable: &'a mut bool,
}

impl<'a> BoolValue<'a> {
    /// Create a boolean value.
    pub fn new(variable: &'a mut bool) -> Self {
        Self { variable }
    }
}

impl<'a> Value for BoolValue<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        *self.variable = match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => return Err(InvalidValue::new(raw, "bool", "invalid syntax")),
        };
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.to_string()
    }

    fn as_flag(&self) -> Option<&dyn FlagValue> {
        Some(self)
    }
}

impl<'a> FlagValue for BoolValue<'a> {
    fn flag_value(&self) -> &'static str {
        "true"
    }
}

/// Calendar date value in `YYYY-MM-DD` format.
///
/// The input must be exactly that form: zero padded, without surrounding whitespace or a sign.
pub struct DateValue<'a> {
    variable: &'a mut NaiveDate,
}

impl<'a> DateValue<'a> {
    /// Create a date value.
    pub fn new(variable: &'a mut NaiveDate) -> Self {
        Self { variable }
    }
}

impl<'a> Value for DateValue<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|error| InvalidValue::new(raw, "date", error))?;

        // The parser tolerates padding and signs; only the canonical rendering is accepted.
        if date.format(DATE_FORMAT).to_string() != raw {
            return Err(InvalidValue::new(raw, "date", "expected YYYY-MM-DD"));
        }

        *self.variable = date;
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.format(DATE_FORMAT).to_string()
    }
}

/// Signed duration value, such as `300ms`, `-1.5h` or `2h45m`.
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
/// Every number must carry a unit, except for a bare `0`.
pub struct DurationValue<'a> {
    variable: &'a mut TimeDelta,
}

impl<'a> DurationValue<'a> {
    /// Create a duration value.
    pub fn new(variable: &'a mut TimeDelta) -> Self {
        Self { variable }
    }
}

impl<'a> Value for DurationValue<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        let nanoseconds =
            parse_duration(raw).map_err(|reason| InvalidValue::new(raw, "duration", reason))?;
        *self.variable = TimeDelta::nanoseconds(nanoseconds);
        Ok(())
    }

    fn render(&self) -> String {
        let nanoseconds = i128::from(self.variable.num_seconds()) * NANOS_PER_SECOND as i128
            + i128::from(self.variable.subsec_nanos());
        render_duration(nanoseconds)
    }
}

fn parse_duration(raw: &str) -> Result<i64, &'static str> {
    let (negative, mut rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    if rest == "0" {
        return Ok(0);
    }

    if rest.is_empty() {
        return Err("invalid duration");
    }

    // One past i64::MAX, so that i64::MIN remains reachable.
    let limit = i128::from(i64::MAX) + i128::from(negative);
    let mut total: i128 = 0;

    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        let (fraction, after) = match after.strip_prefix('.') {
            Some(after) => split_digits(after),
            None => ("", after),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err("invalid duration");
        }

        let unit_end = after
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_end);
        let scale: i128 = match unit {
            "ns" => 1,
            "us" | "µs" | "μs" => NANOS_PER_MICRO as i128,
            "ms" => NANOS_PER_MILLI as i128,
            "s" => NANOS_PER_SECOND as i128,
            "m" => NANOS_PER_MINUTE as i128,
            "h" => NANOS_PER_HOUR as i128,
            "" => return Err("missing unit in duration"),
            _ => return Err("unknown unit in duration"),
        };

        let whole: i128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| "duration out of range")?
        };
        let mut component = whole
            .checked_mul(scale)
            .ok_or("duration out of range")?;

        if !fraction.is_empty() {
            // Digits beyond nanosecond precision of the largest unit cannot contribute.
            let fraction = &fraction[..std::cmp::min(fraction.len(), 18)];
            let numerator: i128 = fraction.parse().map_err(|_| "invalid duration")?;
            let denominator = 10_i128.pow(fraction.len() as u32);
            component += numerator * scale / denominator;
        }

        total = total
            .checked_add(component)
            .filter(|total| *total <= limit)
            .ok_or("duration out of range")?;
        rest = after;
    }

    let total = if negative { -total } else { total };
    i64::try_from(total).map_err(|_| "duration out of range")
}

fn split_digits(value: &str) -> (&str, &str) {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value.split_at(end)
}

fn render_duration(nanoseconds: i128) -> String {
    if nanoseconds == 0 {
        return "0s".to_string();
    }

    let sign = if nanoseconds < 0 { "-" } else { "" };
    let magnitude = nanoseconds.unsigned_abs();

    if magnitude < NANOS_PER_SECOND {
        let (scale, unit) = if magnitude < NANOS_PER_MICRO {
            (1, "ns")
        } else if magnitude < NANOS_PER_MILLI {
            (NANOS_PER_MICRO, "µs")
        } else {
            (NANOS_PER_MILLI, "ms")
        };
        return format!("{sign}{}{unit}", render_fraction(magnitude, scale));
    }

    let hours = magnitude / NANOS_PER_HOUR;
    let minutes = (magnitude / NANOS_PER_MINUTE) % 60;
    let seconds = render_fraction(magnitude % NANOS_PER_MINUTE, NANOS_PER_SECOND);
    let mut out = sign.to_string();

    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }

    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }

    out.push_str(&format!("{seconds}s"));
    out
}

fn render_fraction(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let remainder = value % scale;

    if remainder == 0 {
        whole.to_string()
    } else {
        let width = scale.to_string().len() - 1;
        let digits = format!("{remainder:0width$}");
        format!("{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// 32-bit floating point value.
pub struct Float32Value<'a> {
    variable: &'a mut f32,
}

impl<'a> Float32Value<'a> {
    /// Create a 32-bit float value.
    pub fn new(variable: &'a mut f32) -> Self {
        Self { variable }
    }
}

impl<'a> Value for Float32Value<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        let value: f32 = raw
            .parse()
            .map_err(|error| InvalidValue::new(raw, "f32", error))?;

        if value.is_infinite() && !spells_infinity(raw) {
            return Err(InvalidValue::new(raw, "f32", "value out of range"));
        }

        *self.variable = value;
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.to_string()
    }
}

/// 64-bit floating point value.
pub struct Float64Value<'a> {
    variable: &'a mut f64,
}

impl<'a> Float64Value<'a> {
    /// Create a 64-bit float value.
    pub fn new(variable: &'a mut f64) -> Self {
        Self { variable }
    }
}

impl<'a> Value for Float64Value<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        let value: f64 = raw
            .parse()
            .map_err(|error| InvalidValue::new(raw, "f64", error))?;

        if value.is_infinite() && !spells_infinity(raw) {
            return Err(InvalidValue::new(raw, "f64", "value out of range"));
        }

        *self.variable = value;
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.to_string()
    }
}

// A literal which overflows to infinity is out of range; only an explicit `inf` / `infinity` is infinite.
fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// 64-bit signed integer value.
///
/// The base is implied by the prefix: `0x` hexadecimal, `0o` (or a bare leading `0`) octal,
/// `0b` binary, and decimal otherwise.
pub struct IntValue<'a> {
    variable: &'a mut i64,
}

impl<'a> IntValue<'a> {
    /// Create an integer value.
    pub fn new(variable: &'a mut i64) -> Self {
        Self { variable }
    }
}

impl<'a> Value for IntValue<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        let value = parse_int(raw).map_err(|reason| InvalidValue::new(raw, "i64", reason))?;
        *self.variable = value;
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.to_string()
    }
}

fn parse_int(raw: &str) -> Result<i64, &'static str> {
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let (radix, digits) = if let Some(d) = strip_base(digits, 'x') {
        (16, d)
    } else if let Some(d) = strip_base(digits, 'o') {
        (8, d)
    } else if let Some(d) = strip_base(digits, 'b') {
        (2, d)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err("invalid syntax");
    }

    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| "value out of range")?;

    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            Err("value out of range")
        } else {
            Ok((magnitude as i64).wrapping_neg())
        }
    } else {
        i64::try_from(magnitude).map_err(|_| "value out of range")
    }
}

fn strip_base(digits: &str, marker: char) -> Option<&str> {
    let rest = digits.strip_prefix('0')?;
    rest.strip_prefix(marker)
        .or_else(|| rest.strip_prefix(marker.to_ascii_uppercase()))
}

/// IP address value (v4 or v6).
pub struct IpValue<'a> {
    variable: &'a mut IpAddr,
}

impl<'a> IpValue<'a> {
    /// Create an IP address value.
    pub fn new(variable: &'a mut IpAddr) -> Self {
        Self { variable }
    }
}

impl<'a> Value for IpValue<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        let address: IpAddr = raw
            .parse()
            .map_err(|_| InvalidValue::new(raw, "IP address", "invalid IP address format"))?;
        *self.variable = address;
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.to_string()
    }
}

/// String value; accepts any input as is.
pub struct StringValue<'a> {
    variable: &'a mut String,
}

impl<'a> StringValue<'a> {
    /// Create a string value.
    pub fn new(variable: &'a mut String) -> Self {
        Self { variable }
    }
}

impl<'a> Value for StringValue<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        *self.variable = raw.to_string();
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.clone()
    }
}

/// Absolute URL value (ex: `https://example.com/path`).
///
/// Relative references such as `example.com/path` or `/path` have no base to resolve against, and are rejected.
pub struct UrlValue<'a> {
    variable: &'a mut Url,
}

impl<'a> UrlValue<'a> {
    /// Create a URL value.
    pub fn new(variable: &'a mut Url) -> Self {
        Self { variable }
    }
}

impl<'a> Value for UrlValue<'a> {
    fn set(&mut self, raw: &str) -> Result<(), InvalidValue> {
        let url = Url::parse(raw).map_err(|error| InvalidValue::new(raw, "URL", error))?;
        *self.variable = url;
        Ok(())
    }

    fn render(&self) -> String {
        self.variable.to_string()
    }
}
