use std::error::Error;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use super::query::{NUMERIC_NAN, NUMERIC_NEG, NUMERIC_NINF, NUMERIC_PINF};
use crate::error::SqlConsoleError;
use crate::types::{ConversionMode, ParamConverter, RowValues};

/// Container for Postgres parameters with lifetime tracking
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    /// Borrow a slice of `RowValues` as Postgres parameters.
    ///
    /// # Errors
    /// Currently infallible; kept fallible to match the other converters.
    pub fn convert(params: &'a [RowValues]) -> Result<Params<'a>, SqlConsoleError> {
        let references = params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        Ok(Params { references })
    }

    #[must_use]
    pub fn as_refs(&self) -> &[&(dyn ToSql + Sync)] {
        &self.references
    }
}

impl<'a> ParamConverter<'a> for Params<'a> {
    type Converted = Params<'a>;

    fn convert_sql_params(
        params: &'a [RowValues],
        _mode: ConversionMode,
    ) -> Result<Self::Converted, SqlConsoleError> {
        Self::convert(params)
    }
}

impl ToSql for RowValues {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            RowValues::Int(i) => match *ty {
                Type::INT2 => i16::try_from(*i)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*i)?.to_sql(ty, out),
                Type::INT8 => i.to_sql(ty, out),
                #[allow(clippy::cast_precision_loss)]
                Type::FLOAT4 => (*i as f32).to_sql(ty, out),
                #[allow(clippy::cast_precision_loss)]
                Type::FLOAT8 => (*i as f64).to_sql(ty, out),
                Type::NUMERIC => numeric_to_sql(&i.to_string(), out),
                _ => i.to_string().to_sql(ty, out),
            },
            RowValues::Float(f) => match *ty {
                #[allow(clippy::cast_possible_truncation)]
                Type::FLOAT4 => (*f as f32).to_sql(ty, out),
                Type::NUMERIC => float_to_numeric(*f, out),
                _ => f.to_sql(ty, out),
            },
            RowValues::Text(s) => text_to_sql(s, ty, out),
            RowValues::Bool(b) => b.to_sql(ty, out),
            RowValues::Date(d) => d.to_sql(ty, out),
            RowValues::Time(t) => t.to_sql(ty, out),
            RowValues::Timestamp(dt) => match *ty {
                Type::TIMESTAMPTZ => dt.and_utc().to_sql(ty, out),
                _ => dt.to_sql(ty, out),
            },
            RowValues::Null => Ok(IsNull::Yes),
            RowValues::JSON(jsval) => jsval.to_sql(ty, out),
            RowValues::Blob(bytes) => bytes.to_sql(ty, out),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::BPCHAR
                | Type::NAME
                | Type::BOOL
                | Type::DATE
                | Type::TIME
                | Type::TIMESTAMP
                | Type::TIMESTAMPTZ
                | Type::NUMERIC
                | Type::JSON
                | Type::JSONB
                | Type::BYTEA
        )
    }

    to_sql_checked!();
}

/// Text bound against a numeric or date/time column is parsed client-side, the way the server
/// would coerce an untyped literal.
fn text_to_sql(
    s: &str,
    ty: &Type,
    out: &mut bytes::BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    match *ty {
        Type::INT2 => s.trim().parse::<i16>()?.to_sql(ty, out),
        Type::INT4 => s.trim().parse::<i32>()?.to_sql(ty, out),
        Type::INT8 => s.trim().parse::<i64>()?.to_sql(ty, out),
        Type::FLOAT4 => s.trim().parse::<f32>()?.to_sql(ty, out),
        Type::FLOAT8 => s.trim().parse::<f64>()?.to_sql(ty, out),
        Type::DATE => NaiveDate::parse_from_str(s, "%Y-%m-%d")?.to_sql(ty, out),
        Type::TIME => NaiveTime::parse_from_str(s, "%H:%M:%S%.f")?.to_sql(ty, out),
        Type::TIMESTAMP => {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")?.to_sql(ty, out)
        }
        Type::TIMESTAMPTZ => parse_timestamptz(s)?.to_sql(ty, out),
        Type::NUMERIC => numeric_to_sql(s, out),
        _ => s.to_sql(ty, out),
    }
}

fn parse_timestamptz(s: &str) -> Result<DateTime<Utc>, Box<dyn Error + Sync + Send>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(dt.with_timezone(&Utc));
    }
    // no offset: UTC
    Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")?.and_utc())
}

const NUMERIC_POS: u16 = 0x0000;

fn float_to_numeric(
    f: f64,
    out: &mut bytes::BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    if f.is_nan() {
        write_numeric_header(out, 0, 0, NUMERIC_NAN, 0);
    } else if f.is_infinite() {
        let sign = if f > 0.0 { NUMERIC_PINF } else { NUMERIC_NINF };
        write_numeric_header(out, 0, 0, sign, 0);
    } else {
        // Display for f64 is the shortest exact decimal, never in exponent form
        return numeric_to_sql(&f.to_string(), out);
    }
    Ok(IsNull::No)
}

fn write_numeric_header(
    out: &mut bytes::BytesMut,
    ndigits: u16,
    weight: i16,
    sign: u16,
    dscale: u16,
) {
    out.extend_from_slice(&ndigits.to_be_bytes());
    out.extend_from_slice(&weight.to_be_bytes());
    out.extend_from_slice(&sign.to_be_bytes());
    out.extend_from_slice(&dscale.to_be_bytes());
}

/// Encode decimal text (`-12.50`, `.5`, `1e3`, `NaN`) as binary `numeric`: base-10000 digit
/// groups with a group weight, a sign word, and the display scale.
fn numeric_to_sql(
    text: &str,
    out: &mut bytes::BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    let text = text.trim();
    match text.to_ascii_lowercase().as_str() {
        "nan" => {
            write_numeric_header(out, 0, 0, NUMERIC_NAN, 0);
            return Ok(IsNull::No);
        }
        "infinity" | "+infinity" | "inf" => {
            write_numeric_header(out, 0, 0, NUMERIC_PINF, 0);
            return Ok(IsNull::No);
        }
        "-infinity" | "-inf" => {
            write_numeric_header(out, 0, 0, NUMERIC_NINF, 0);
            return Ok(IsNull::No);
        }
        _ => {}
    }

    let invalid =
        || -> Box<dyn Error + Sync + Send> { format!("invalid numeric value '{text}'").into() };
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => {
            let exponent = unsigned[at + 1..].parse::<i32>().map_err(|_| invalid())?;
            (&unsigned[..at], exponent)
        }
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty()
        || !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    // all digits, with the decimal point `point` places from the left
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes())
        .map(|b| b - b'0')
        .collect();
    let mut point = i32::try_from(int_part.len())?
        .checked_add(exponent)
        .ok_or_else(invalid)?;
    let dscale = i32::try_from(frac_part.len())?
        .checked_sub(exponent)
        .ok_or_else(invalid)?
        .max(0);

    // left-pad so the point sits on a group boundary, right-pad to whole groups
    let lead = point.rem_euclid(4);
    let pad_left = usize::try_from(if lead == 0 { 0 } else { 4 - lead })?;
    digits.splice(0..0, std::iter::repeat(0).take(pad_left));
    point = point
        .checked_add(i32::try_from(pad_left)?)
        .ok_or_else(invalid)?;
    while digits.len() % 4 != 0 {
        digits.push(0);
    }
    let mut groups: Vec<u16> = digits
        .chunks_exact(4)
        .map(|c| c.iter().fold(0u16, |acc, d| acc * 10 + u16::from(*d)))
        .collect();
    let mut weight = point / 4 - 1;

    let leading_zeros = groups.iter().take_while(|g| **g == 0).count();
    groups.drain(..leading_zeros);
    weight -= i32::try_from(leading_zeros)?;
    while groups.last() == Some(&0) {
        groups.pop();
    }

    let sign = if negative && !groups.is_empty() { NUMERIC_NEG } else { NUMERIC_POS };
    if groups.is_empty() {
        weight = 0;
    }
    write_numeric_header(
        out,
        u16::try_from(groups.len())?,
        i16::try_from(weight)?,
        sign,
        u16::try_from(dscale)?,
    );
    for group in groups {
        out.extend_from_slice(&group.to_be_bytes());
    }
    Ok(IsNull::No)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::postgres::query::PgNumeric;
    use tokio_postgres::types::FromSql;

    fn encode(value: &RowValues, ty: &Type) -> Result<Vec<u8>, Box<dyn Error + Sync + Send>> {
        let mut buf = bytes::BytesMut::new();
        value.to_sql_checked(ty, &mut buf)?;
        Ok(buf.to_vec())
    }

    #[test]
    fn ints_adapt_to_the_column_width() {
        assert_eq!(encode(&RowValues::Int(7), &Type::INT4).unwrap(), 7i32.to_be_bytes());
        assert_eq!(encode(&RowValues::Int(7), &Type::INT2).unwrap(), 7i16.to_be_bytes());
        assert!(encode(&RowValues::Int(i64::MAX), &Type::INT4).is_err());
    }

    #[test]
    fn text_is_coerced_for_typed_columns() {
        assert_eq!(
            encode(&RowValues::Text(" 42 ".into()), &Type::INT4).unwrap(),
            42i32.to_be_bytes()
        );
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            encode(&RowValues::Text("2025-01-31".into()), &Type::DATE).unwrap(),
            encode(&RowValues::Date(date), &Type::DATE).unwrap()
        );
        assert!(encode(&RowValues::Text("31/01/2025".into()), &Type::DATE).is_err());
        assert_eq!(encode(&RowValues::Text("F1".into()), &Type::TEXT).unwrap(), b"F1");
    }

    fn numeric_text(value: &RowValues) -> String {
        let raw = encode(value, &Type::NUMERIC).unwrap();
        PgNumeric::from_sql(&Type::NUMERIC, &raw).unwrap().0
    }

    #[test]
    fn numeric_binds_in_base_10000_groups() {
        // 325.50: one group before the point, one after, scale 2
        let raw = encode(&RowValues::Text("325.50".into()), &Type::NUMERIC).unwrap();
        assert_eq!(raw, [0, 2, 0, 0, 0, 0, 0, 2, 0x01, 0x45, 0x13, 0x88]);

        assert_eq!(numeric_text(&RowValues::Text("325.50".into())), "325.50");
        assert_eq!(numeric_text(&RowValues::Text("0.05".into())), "0.05");
        assert_eq!(numeric_text(&RowValues::Text("-7.5".into())), "-7.5");
        assert_eq!(numeric_text(&RowValues::Text(".125".into())), "0.125");
        assert_eq!(numeric_text(&RowValues::Text("1.5e-3".into())), "0.0015");
        assert_eq!(numeric_text(&RowValues::Int(10000)), "10000");
        assert_eq!(numeric_text(&RowValues::Int(-123_456_789)), "-123456789");
        assert_eq!(numeric_text(&RowValues::Int(0)), "0");
        assert_eq!(numeric_text(&RowValues::Float(300.0)), "300");
        assert_eq!(numeric_text(&RowValues::Float(199.99)), "199.99");
        assert_eq!(numeric_text(&RowValues::Float(f64::NAN)), "NaN");
        assert_eq!(numeric_text(&RowValues::Float(f64::NEG_INFINITY)), "-Infinity");
    }

    #[test]
    fn numeric_rejects_malformed_text() {
        assert!(encode(&RowValues::Text("12,50".into()), &Type::NUMERIC).is_err());
        assert!(encode(&RowValues::Text("-".into()), &Type::NUMERIC).is_err());
        assert!(encode(&RowValues::Text("1e".into()), &Type::NUMERIC).is_err());
    }

    #[test]
    fn timestamps_bind_to_timestamptz_as_utc() {
        let dt = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        let expected = encode(&RowValues::Timestamp(dt), &Type::TIMESTAMP).unwrap();
        assert_eq!(
            encode(&RowValues::Timestamp(dt), &Type::TIMESTAMPTZ).unwrap(),
            expected
        );
        assert_eq!(
            encode(&RowValues::Text("2025-06-01 08:30:00".into()), &Type::TIMESTAMPTZ).unwrap(),
            expected
        );
        assert_eq!(
            encode(&RowValues::Text("2025-06-01T10:30:00+02:00".into()), &Type::TIMESTAMPTZ)
                .unwrap(),
            expected
        );
    }

    #[test]
    fn ints_bind_to_float_columns() {
        assert_eq!(encode(&RowValues::Int(3), &Type::FLOAT8).unwrap(), 3f64.to_be_bytes());
        assert_eq!(encode(&RowValues::Int(3), &Type::FLOAT4).unwrap(), 3f32.to_be_bytes());
    }

    #[test]
    fn null_binds_as_sql_null() {
        let mut buf = bytes::BytesMut::new();
        let is_null = RowValues::Null.to_sql(&Type::TEXT, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }
}
