//! Entity identifiers.
//!
//! Services disagree on whether ids are numbers or strings, so both decode into [`Id`].

use serde::{Deserialize, Deserializer};

/// Opaque entity identifier as sent by a backend service.
pub type Id = String;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl From<RawId> for Id {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Signed(number) => number.to_string(),
            RawId::Unsigned(number) => number.to_string(),
        }
    }
}

/// `serde` adapter accepting either a string or an integer id.
///
/// # Errors
///
/// Fails when the value is neither a string nor an integer.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Id, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(Id::from)
}

/// `serde` adapter for optional ids.
///
/// # Errors
///
/// Fails when a present value is neither a string nor an integer.
pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<Id>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(Id::from))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use testresult::TestResult;

    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "deserialize")]
        id: Id,
    }

    #[test]
    fn numeric_and_string_ids_decode_alike() -> TestResult {
        let numeric: Wrapper = serde_json::from_str(r#"{"id": 42}"#)?;
        let text: Wrapper = serde_json::from_str(r#"{"id": "42"}"#)?;

        assert_eq!(numeric.id, "42");
        assert_eq!(text.id, "42");

        Ok(())
    }

    #[test]
    fn floats_are_rejected() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"id": 4.2}"#).is_err());
    }
}
