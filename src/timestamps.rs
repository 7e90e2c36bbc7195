//! Backend timestamp decoding.
//!
//! The services emit a mix of RFC 3339 instants, offset-less date-times and bare dates.
//! Anything without an offset is read as UTC.

use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Parses a backend date string into a [`Timestamp`].
///
/// # Errors
///
/// Returns a [`jiff::Error`] when the string matches none of the accepted shapes.
pub fn parse(value: &str) -> Result<Timestamp, jiff::Error> {
    let value = value.trim();

    if let Ok(timestamp) = value.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    if let Ok(datetime) = value.parse::<DateTime>() {
        return Ok(datetime.to_zoned(TimeZone::UTC)?.timestamp());
    }

    let date = value.parse::<Date>()?;

    Ok(date.at(0, 0, 0, 0).to_zoned(TimeZone::UTC)?.timestamp())
}

/// `serde` adapter for required timestamp fields.
///
/// # Errors
///
/// Fails when the field is not a string or cannot be parsed by [`parse`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    parse(&raw).map_err(D::Error::custom)
}

/// `serde` adapter for optional timestamp fields.
///
/// # Errors
///
/// Fails when a present value cannot be parsed by [`parse`].
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| parse(&raw).map_err(D::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_rfc3339_instants() -> TestResult {
        let timestamp = parse("2025-03-01T12:30:00Z")?;

        assert_eq!(timestamp, "2025-03-01T12:30:00Z".parse::<Timestamp>()?);

        Ok(())
    }

    #[test]
    fn offset_less_datetimes_are_utc() -> TestResult {
        assert_eq!(
            parse("2025-03-01T12:30:00")?,
            "2025-03-01T12:30:00Z".parse::<Timestamp>()?
        );

        Ok(())
    }

    #[test]
    fn bare_dates_are_midnight_utc() -> TestResult {
        assert_eq!(
            parse("2025-03-01")?,
            "2025-03-01T00:00:00Z".parse::<Timestamp>()?
        );

        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("next tuesday").is_err());
    }
}
