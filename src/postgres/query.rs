use std::error::Error;
use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;
use tokio_postgres::types::{FromSql, Kind, Type};
use tokio_postgres::{Row, SimpleQueryMessage, Statement};

use crate::error::SqlConsoleError;
use crate::results::{ExecutionMode, ExecutionOutcome, ResultSet};
use crate::types::RowValues;

/// Extracts a `RowValues` from a `tokio_postgres` Row at the given index.
///
/// # Errors
/// Returns `SqlConsoleError::ExecutionError` if the column cannot be decoded.
pub fn postgres_extract_value(row: &Row, idx: usize) -> Result<RowValues, SqlConsoleError> {
    let column = &row.columns()[idx];
    let ty = column.type_();
    let decode_err = |e: tokio_postgres::Error| {
        SqlConsoleError::ExecutionError(format!(
            "cannot read column {} of type {}: {e}",
            column.name(),
            ty.name()
        ))
    };

    let value = match *ty {
        Type::INT2 => row
            .try_get::<_, Option<i16>>(idx)
            .map(|v| v.map(|v| RowValues::Int(i64::from(v)))),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(idx)
            .map(|v| v.map(|v| RowValues::Int(i64::from(v)))),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(idx)
            .map(|v| v.map(RowValues::Int)),
        Type::FLOAT4 => row
            .try_get::<_, Option<f32>>(idx)
            .map(|v| v.map(|v| RowValues::Float(f64::from(v)))),
        Type::FLOAT8 => row
            .try_get::<_, Option<f64>>(idx)
            .map(|v| v.map(RowValues::Float)),
        Type::BOOL => row
            .try_get::<_, Option<bool>>(idx)
            .map(|v| v.map(RowValues::Bool)),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(idx)
            .map(|v| v.map(RowValues::Date)),
        Type::TIME => row
            .try_get::<_, Option<NaiveTime>>(idx)
            .map(|v| v.map(RowValues::Time)),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(idx)
            .map(|v| v.map(RowValues::Timestamp)),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)
            .map(|v| v.map(|v| RowValues::Timestamp(v.naive_utc()))),
        Type::NUMERIC => row
            .try_get::<_, Option<PgNumeric>>(idx)
            .map(|v| v.map(|v| RowValues::Text(v.0))),
        Type::JSON | Type::JSONB => row
            .try_get::<_, Option<Value>>(idx)
            .map(|v| v.map(RowValues::JSON)),
        Type::BYTEA => row
            .try_get::<_, Option<Vec<u8>>>(idx)
            .map(|v| v.map(RowValues::Blob)),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => row
            .try_get::<_, Option<String>>(idx)
            .map(|v| v.map(RowValues::Text)),
        _ => row
            .try_get::<_, Option<PgText>>(idx)
            .map(|v| v.map(|v| RowValues::Text(v.0))),
    };

    value
        .map(|v| v.unwrap_or(RowValues::Null))
        .map_err(decode_err)
}

/// Build a text result set using statement metadata for column names.
///
/// # Errors
/// Returns errors from row value extraction.
pub fn build_result_set_from_statement(
    stmt: &Statement,
    rows: &[Row],
) -> Result<ResultSet, SqlConsoleError> {
    let column_names: Vec<String> = stmt
        .columns()
        .iter()
        .map(|col| col.name().to_string())
        .collect();
    let column_count = column_names.len();

    let mut result_set = ResultSet::with_capacity(column_names, rows.len());
    for row in rows {
        let mut row_values = Vec::with_capacity(column_count);
        for idx in 0..column_count {
            row_values.push(postgres_extract_value(row, idx)?.to_text());
        }
        result_set.add_row_values(row_values)?;
    }

    Ok(result_set)
}

/// Fold the messages of a simple-protocol round trip into an outcome.
///
/// Only the first row-returning statement contributes rows; updates report the total of all
/// command completions.
///
/// # Errors
/// Returns `SqlConsoleError::ExecutionError` if a row does not match its description, or if an
/// update returns rows.
pub fn outcome_from_simple_messages(
    messages: Vec<SimpleQueryMessage>,
    mode: ExecutionMode,
) -> Result<ExecutionOutcome, SqlConsoleError> {
    let mut result_set: Option<ResultSet> = None;
    let mut first_done = false;
    let mut row_count = 0usize;
    let mut affected = 0u64;

    for message in messages {
        match message {
            SimpleQueryMessage::RowDescription(_) if mode == ExecutionMode::Update => {
                return Err(returned_rows_error());
            }
            SimpleQueryMessage::RowDescription(columns) => {
                if result_set.is_none() {
                    let names = columns.iter().map(|c| c.name().to_string()).collect();
                    result_set = Some(ResultSet::new(names));
                }
            }
            SimpleQueryMessage::Row(_) if mode == ExecutionMode::Update => {
                return Err(returned_rows_error());
            }
            SimpleQueryMessage::Row(row) => {
                if first_done {
                    continue;
                }
                row_count += 1;
                if mode != ExecutionMode::Rows {
                    continue;
                }
                let rs = result_set.get_or_insert_with(|| {
                    ResultSet::new(row.columns().iter().map(|c| c.name().to_string()).collect())
                });
                let values = (0..row.len())
                    .map(|i| row.get(i).map(str::to_string))
                    .collect();
                rs.add_row_values(values)?;
            }
            SimpleQueryMessage::CommandComplete(n) => {
                affected += n;
                if result_set.is_some() {
                    first_done = true;
                }
            }
            _ => {}
        }
    }

    Ok(match mode {
        ExecutionMode::Update => ExecutionOutcome::RowCount(usize::try_from(affected).map_err(
            |e| SqlConsoleError::ExecutionError(format!("affected rows conversion error: {e}")),
        )?),
        ExecutionMode::Count => ExecutionOutcome::RowCount(row_count),
        ExecutionMode::Rows => ExecutionOutcome::Rows(result_set.unwrap_or_default()),
    })
}

/// `numeric` decoded from the binary wire format into its exact decimal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgNumeric(pub String);

pub(super) const NUMERIC_NEG: u16 = 0x4000;
pub(super) const NUMERIC_NAN: u16 = 0xC000;
pub(super) const NUMERIC_PINF: u16 = 0xD000;
pub(super) const NUMERIC_NINF: u16 = 0xF000;

impl<'a> FromSql<'a> for PgNumeric {
    fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        let header = |at: usize| -> Result<u16, Box<dyn Error + Sync + Send>> {
            raw.get(at..at + 2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]))
                .ok_or_else(|| "numeric value too short".into())
        };
        let ndigits = usize::from(header(0)?);
        #[allow(clippy::cast_possible_wrap)]
        let weight = i32::from(header(2)? as i16);
        let sign = header(4)?;
        let dscale = usize::from(header(6)?);

        match sign {
            NUMERIC_NAN => return Ok(PgNumeric("NaN".into())),
            NUMERIC_PINF => return Ok(PgNumeric("Infinity".into())),
            NUMERIC_NINF => return Ok(PgNumeric("-Infinity".into())),
            _ => {}
        }
        if raw.len() != 8 + 2 * ndigits {
            return Err("numeric digit count does not match payload".into());
        }
        let digits: Vec<u16> = raw[8..]
            .chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .collect();
        let digit_at = |pos: i32| -> u16 {
            usize::try_from(pos)
                .ok()
                .and_then(|p| digits.get(p).copied())
                .unwrap_or(0)
        };

        let mut out = String::new();
        if sign == NUMERIC_NEG {
            out.push('-');
        }
        if weight < 0 {
            out.push('0');
        } else {
            for pos in 0..=weight {
                if pos == 0 {
                    write!(out, "{}", digit_at(pos))?;
                } else {
                    write!(out, "{:04}", digit_at(pos))?;
                }
            }
        }
        if dscale > 0 {
            let mut frac = String::with_capacity(dscale + 4);
            let mut pos = weight + 1;
            while frac.len() < dscale {
                write!(frac, "{:04}", digit_at(pos))?;
                pos += 1;
            }
            frac.truncate(dscale);
            out.push('.');
            out.push_str(&frac);
        }
        Ok(PgNumeric(out))
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::NUMERIC
    }
}

pub(super) fn returned_rows_error() -> SqlConsoleError {
    SqlConsoleError::ExecutionError("statement returned rows; run it as a query".into())
}

type DecodeResult<T> = Result<T, Box<dyn Error + Sync + Send>>;

/// Any column value rendered as text from its binary form.
///
/// Types without a known layout come back as `\x` hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgText(pub String);

impl<'a> FromSql<'a> for PgText {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> DecodeResult<Self> {
        render_binary(ty, raw).map(PgText)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

fn render_binary(ty: &Type, raw: &[u8]) -> DecodeResult<String> {
    match ty.kind() {
        Kind::Array(member) => return render_array(member, raw),
        Kind::Domain(base) => return render_binary(base, raw),
        Kind::Enum(_) => return Ok(std::str::from_utf8(raw)?.to_string()),
        _ => {}
    }

    let text = match *ty {
        Type::BOOL => RowValues::Bool(bool::from_sql(ty, raw)?).to_text(),
        Type::CHAR => Some(render_char(i8::from_sql(ty, raw)?)),
        Type::INT2 => Some(i16::from_sql(ty, raw)?.to_string()),
        Type::INT4 => Some(i32::from_sql(ty, raw)?.to_string()),
        Type::INT8 => Some(i64::from_sql(ty, raw)?.to_string()),
        Type::OID => Some(u32::from_sql(ty, raw)?.to_string()),
        Type::FLOAT4 => Some(render_float(f64::from(f32::from_sql(ty, raw)?))),
        Type::FLOAT8 => Some(render_float(f64::from_sql(ty, raw)?)),
        Type::NUMERIC => Some(PgNumeric::from_sql(ty, raw)?.0),
        Type::DATE => RowValues::Date(NaiveDate::from_sql(ty, raw)?).to_text(),
        Type::TIME => RowValues::Time(NaiveTime::from_sql(ty, raw)?).to_text(),
        Type::TIMESTAMP => RowValues::Timestamp(NaiveDateTime::from_sql(ty, raw)?).to_text(),
        Type::TIMESTAMPTZ => {
            RowValues::Timestamp(DateTime::<Utc>::from_sql(ty, raw)?.naive_utc()).to_text()
        }
        Type::JSON | Type::JSONB => Some(Value::from_sql(ty, raw)?.to_string()),
        Type::UUID => Some(render_uuid(raw)?),
        Type::INTERVAL => Some(render_interval(raw)?),
        Type::TIMETZ => Some(render_timetz(raw)?),
        _ if <&str as FromSql>::accepts(ty) => {
            Some(<&str as FromSql>::from_sql(ty, raw)?.to_string())
        }
        _ => RowValues::Blob(raw.to_vec()).to_text(),
    };
    Ok(text.unwrap_or_default())
}

fn read_i32(raw: &[u8], at: usize) -> DecodeResult<i32> {
    raw.get(at..at + 4)
        .map(|b| i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or_else(|| "value too short".into())
}

fn read_i64(raw: &[u8], at: usize) -> DecodeResult<i64> {
    raw.get(at..at + 8)
        .and_then(|b| <[u8; 8]>::try_from(b).ok())
        .map(i64::from_be_bytes)
        .ok_or_else(|| "value too short".into())
}

fn render_char(c: i8) -> String {
    #[allow(clippy::cast_sign_loss)]
    let byte = c as u8;
    match byte {
        0 => String::new(),
        b if b.is_ascii() => char::from(b).to_string(),
        b => format!("\\{b:03o}"),
    }
}

fn render_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".into()
    } else if f.is_infinite() {
        String::from(if f > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        f.to_string()
    }
}

fn render_uuid(raw: &[u8]) -> DecodeResult<String> {
    if raw.len() != 16 {
        return Err("uuid must be 16 bytes".into());
    }
    let mut out = String::with_capacity(36);
    for (i, b) in raw.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        write!(out, "{b:02x}")?;
    }
    Ok(out)
}

/// `HH:MM:SS` with the microseconds appended only when present, trailing zeros trimmed.
fn write_clock(out: &mut String, micros: i64) -> std::fmt::Result {
    let micros = micros.unsigned_abs();
    let secs = micros / 1_000_000;
    let frac = micros % 1_000_000;
    write!(out, "{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)?;
    if frac != 0 {
        let digits = format!("{frac:06}");
        write!(out, ".{}", digits.trim_end_matches('0'))?;
    }
    Ok(())
}

/// `interval` as `1 year 2 mons -3 days +04:05:06`.
fn render_interval(raw: &[u8]) -> DecodeResult<String> {
    if raw.len() != 16 {
        return Err("interval must be 16 bytes".into());
    }
    let micros = read_i64(raw, 0)?;
    let days = read_i32(raw, 8)?;
    let months = read_i32(raw, 12)?;

    let mut out = String::new();
    let mut negative_seen = false;
    for (value, unit) in [(months / 12, "year"), (months % 12, "mon"), (days, "day")] {
        if value == 0 {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        let plus = if negative_seen && value > 0 { "+" } else { "" };
        let plural = if value == 1 { "" } else { "s" };
        write!(out, "{plus}{value} {unit}{plural}")?;
        negative_seen = value < 0;
    }
    if micros != 0 || out.is_empty() {
        if !out.is_empty() {
            out.push(' ');
        }
        if micros < 0 {
            out.push('-');
        } else if negative_seen {
            out.push('+');
        }
        write_clock(&mut out, micros)?;
    }
    Ok(out)
}

/// `timetz` as `HH:MM:SS+HH[:MM[:SS]]`; the zone travels as seconds west of UTC.
fn render_timetz(raw: &[u8]) -> DecodeResult<String> {
    if raw.len() != 12 {
        return Err("timetz must be 12 bytes".into());
    }
    let micros = read_i64(raw, 0)?;
    let zone = read_i32(raw, 8)?;

    let mut out = String::new();
    write_clock(&mut out, micros)?;
    out.push(if zone <= 0 { '+' } else { '-' });
    let offset = zone.unsigned_abs();
    let (hours, minutes, seconds) = (offset / 3600, offset / 60 % 60, offset % 60);
    write!(out, "{hours:02}")?;
    if seconds != 0 {
        write!(out, ":{minutes:02}:{seconds:02}")?;
    } else if minutes != 0 {
        write!(out, ":{minutes:02}")?;
    }
    Ok(out)
}

fn quote_array_element(text: &str) -> String {
    let needs_quotes = text.is_empty()
        || text.eq_ignore_ascii_case("NULL")
        || text
            .chars()
            .any(|c| matches!(c, '"' | '\\' | '{' | '}' | ',') || c.is_whitespace());
    if !needs_quotes {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// One-dimensional arrays as `{a,b,NULL}`; deeper arrays fall back to hex.
fn render_array(member: &Type, raw: &[u8]) -> DecodeResult<String> {
    let ndim = read_i32(raw, 0)?;
    if ndim == 0 {
        return Ok("{}".into());
    }
    if ndim != 1 {
        return Ok(RowValues::Blob(raw.to_vec()).to_text().unwrap_or_default());
    }
    let len = usize::try_from(read_i32(raw, 12)?)?;
    let lower = read_i32(raw, 16)?;

    let mut out = String::new();
    if lower != 1 {
        let upper = i64::from(lower) + i64::try_from(len)? - 1;
        write!(out, "[{lower}:{upper}]=")?;
    }
    out.push('{');
    let mut at = 20;
    for i in 0..len {
        if i > 0 {
            out.push(',');
        }
        let elem_len = read_i32(raw, at)?;
        at += 4;
        if elem_len < 0 {
            out.push_str("NULL");
            continue;
        }
        let end = at + usize::try_from(elem_len)?;
        let elem = raw.get(at..end).ok_or("array element too short")?;
        out.push_str(&quote_array_element(&render_binary(member, elem)?));
        at = end;
    }
    out.push('}');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(weight: i16, sign: u16, dscale: u16, digits: &[u16]) -> Vec<u8> {
        let mut raw = Vec::new();
        raw.extend_from_slice(&u16::try_from(digits.len()).unwrap().to_be_bytes());
        raw.extend_from_slice(&weight.to_be_bytes());
        raw.extend_from_slice(&sign.to_be_bytes());
        raw.extend_from_slice(&dscale.to_be_bytes());
        for d in digits {
            raw.extend_from_slice(&d.to_be_bytes());
        }
        raw
    }

    fn decode(raw: &[u8]) -> String {
        PgNumeric::from_sql(&Type::NUMERIC, raw).unwrap().0
    }

    #[test]
    fn decodes_fractional_values() {
        assert_eq!(decode(&numeric(0, 0, 2, &[12, 3400])), "12.34");
        assert_eq!(decode(&numeric(-1, 0, 2, &[500])), "0.05");
        assert_eq!(decode(&numeric(-2, 0, 5, &[1000])), "0.00001");
    }

    #[test]
    fn decodes_integers_with_stripped_trailing_groups() {
        assert_eq!(decode(&numeric(1, 0, 0, &[1])), "10000");
        assert_eq!(decode(&numeric(0, 0, 2, &[66])), "66.00");
        assert_eq!(decode(&numeric(0, NUMERIC_NEG, 1, &[7, 5000])), "-7.5");
    }

    #[test]
    fn decodes_zero_and_special_values() {
        assert_eq!(decode(&numeric(0, 0, 0, &[])), "0");
        assert_eq!(decode(&numeric(0, NUMERIC_NAN, 0, &[])), "NaN");
        assert_eq!(decode(&numeric(0, NUMERIC_PINF, 0, &[])), "Infinity");
    }

    fn render(ty: &Type, raw: &[u8]) -> String {
        PgText::from_sql(ty, raw).unwrap().0
    }

    fn interval(micros: i64, days: i32, months: i32) -> Vec<u8> {
        let mut raw = micros.to_be_bytes().to_vec();
        raw.extend_from_slice(&days.to_be_bytes());
        raw.extend_from_slice(&months.to_be_bytes());
        raw
    }

    #[test]
    fn renders_intervals_like_the_server() {
        assert_eq!(render(&Type::INTERVAL, &interval(0, 1, 0)), "1 day");
        assert_eq!(render(&Type::INTERVAL, &interval(0, 0, 0)), "00:00:00");
        assert_eq!(
            render(&Type::INTERVAL, &interval(3_723_500_000, 2, 14)),
            "1 year 2 mons 2 days 01:02:03.5"
        );
        assert_eq!(
            render(&Type::INTERVAL, &interval(-60_000_000, -1, 0)),
            "-1 days -00:01:00"
        );
        assert_eq!(render(&Type::INTERVAL, &interval(3_600_000_000, -3, 0)), "-3 days +01:00:00");
        assert!(PgText::from_sql(&Type::INTERVAL, &[0; 8]).is_err());
    }

    #[test]
    fn renders_char_oid_and_uuid() {
        assert_eq!(render(&Type::CHAR, b"a"), "a");
        assert_eq!(render(&Type::CHAR, &[0]), "");
        assert_eq!(render(&Type::OID, &4_000_000_000u32.to_be_bytes()), "4000000000");
        let uuid: Vec<u8> = (0u8..16).collect();
        assert_eq!(render(&Type::UUID, &uuid), "00010203-0405-0607-0809-0a0b0c0d0e0f");
    }

    #[test]
    fn renders_timetz_with_its_offset() {
        let mut raw = (8 * 3600 * 1_000_000i64).to_be_bytes().to_vec();
        raw.extend_from_slice(&(-2 * 3600i32).to_be_bytes());
        assert_eq!(render(&Type::TIMETZ, &raw), "08:00:00+02");

        let mut raw = (30 * 1_000_000i64).to_be_bytes().to_vec();
        raw.extend_from_slice(&(5 * 3600 + 30 * 60i32).to_be_bytes());
        assert_eq!(render(&Type::TIMETZ, &raw), "00:00:30-05:30");
    }

    fn int4_array(lower: i32, elements: &[Option<i32>]) -> Vec<u8> {
        let mut raw = Vec::new();
        raw.extend_from_slice(&1i32.to_be_bytes());
        raw.extend_from_slice(&i32::from(elements.contains(&None)).to_be_bytes());
        raw.extend_from_slice(&Type::INT4.oid().to_be_bytes());
        raw.extend_from_slice(&i32::try_from(elements.len()).unwrap().to_be_bytes());
        raw.extend_from_slice(&lower.to_be_bytes());
        for e in elements {
            match e {
                Some(v) => {
                    raw.extend_from_slice(&4i32.to_be_bytes());
                    raw.extend_from_slice(&v.to_be_bytes());
                }
                None => raw.extend_from_slice(&(-1i32).to_be_bytes()),
            }
        }
        raw
    }

    #[test]
    fn renders_one_dimensional_arrays() {
        assert_eq!(
            render(&Type::INT4_ARRAY, &int4_array(1, &[Some(1), None, Some(3)])),
            "{1,NULL,3}"
        );
        assert_eq!(render(&Type::INT4_ARRAY, &int4_array(0, &[Some(7)])), "[0:0]={7}");
        assert_eq!(render(&Type::INT4_ARRAY, &[0; 12]), "{}");

        let mut raw = Vec::new();
        raw.extend_from_slice(&1i32.to_be_bytes());
        raw.extend_from_slice(&0i32.to_be_bytes());
        raw.extend_from_slice(&Type::TEXT.oid().to_be_bytes());
        raw.extend_from_slice(&3i32.to_be_bytes());
        raw.extend_from_slice(&1i32.to_be_bytes());
        for e in ["a b", "", "x"] {
            raw.extend_from_slice(&i32::try_from(e.len()).unwrap().to_be_bytes());
            raw.extend_from_slice(e.as_bytes());
        }
        assert_eq!(render(&Type::TEXT_ARRAY, &raw), r#"{"a b","",x}"#);
    }

    #[test]
    fn unknown_types_render_as_hex() {
        assert_eq!(render(&Type::MONEY, &1234i64.to_be_bytes()), "\\x00000000000004d2");
        assert_eq!(render(&Type::VARCHAR, b"F100"), "F100");
    }

    #[test]
    fn rejects_truncated_payloads() {
        assert!(PgNumeric::from_sql(&Type::NUMERIC, &[0, 1]).is_err());
        let mut raw = numeric(0, 0, 0, &[5]);
        raw.pop();
        assert!(PgNumeric::from_sql(&Type::NUMERIC, &raw).is_err());
    }
}
