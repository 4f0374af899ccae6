//! Timestamp decoding for the two wire encodings used by the API.
//!
//! The Cloud Controller transmits times in two incompatible shapes that
//! share one logical field type: a bare number of seconds since the Unix
//! epoch (app instance `since` fields), and a quoted date string in one
//! of several formats accumulated across API versions (stats usage times,
//! envelope metadata). Which shape applies is part of each endpoint's
//! wire contract, so the two decoders are separate types rather than a
//! sniffing deserializer.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{CfError, Result};

/// Date formats attempted, in order, when decoding a free-form timestamp.
///
/// The order is load-bearing: older Cloud Controller versions still emit
/// the trailing two formats, and the first successful parse wins.
pub const KNOWN_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S %Z",
];

/// Decode an epoch-seconds scalar (the raw token, quoted or not).
///
/// Sub-second precision is truncated; the wire format carries whole
/// seconds only.
///
/// # Errors
///
/// Returns [`CfError::MalformedTimestamp`] if the token is not numeric or
/// is out of range for a timestamp.
pub fn parse_epoch_seconds(raw: &str) -> Result<DateTime<Utc>> {
    let seconds: f64 = raw.trim().parse().map_err(|_| CfError::MalformedTimestamp {
        value: raw.to_string(),
    })?;
    if !seconds.is_finite() {
        return Err(CfError::MalformedTimestamp {
            value: raw.to_string(),
        });
    }
    epoch_to_utc(seconds).ok_or_else(|| CfError::MalformedTimestamp {
        value: raw.to_string(),
    })
}

fn epoch_to_utc(seconds: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds as i64, 0).single()
}

/// Decode a free-form date string against [`KNOWN_FORMATS`], in order.
///
/// # Errors
///
/// Returns [`CfError::UnrecognizedTimestampFormat`] if no format matches.
pub fn parse_free_form(value: &str) -> Result<DateTime<Utc>> {
    // The first two formats are RFC 3339 without and with fractional
    // seconds; chrono's RFC 3339 parser covers both.
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(value, KNOWN_FORMATS[2]) {
        return Ok(parsed.with_timezone(&Utc));
    }
    // `%Z` only skips the zone abbreviation during parsing; an
    // abbreviation carries no offset, so the time is taken as UTC.
    if let Ok(parsed) = NaiveDateTime::parse_from_str(value, KNOWN_FORMATS[3]) {
        return Ok(Utc.from_utc_datetime(&parsed));
    }
    Err(CfError::UnrecognizedTimestampFormat {
        value: value.to_string(),
    })
}

/// A timestamp transmitted as seconds since the Unix epoch.
///
/// Serializes back to whole epoch seconds for round-tripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochSeconds(pub DateTime<Utc>);

impl From<EpochSeconds> for DateTime<Utc> {
    fn from(value: EpochSeconds) -> Self {
        value.0
    }
}

impl From<DateTime<Utc>> for EpochSeconds {
    fn from(value: DateTime<Utc>) -> Self {
        EpochSeconds(value)
    }
}

impl Serialize for EpochSeconds {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0.timestamp())
    }
}

impl<'de> Deserialize<'de> for EpochSeconds {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        struct EpochVisitor;

        impl Visitor<'_> for EpochVisitor {
            type Value = EpochSeconds;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("seconds since the Unix epoch")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> core::result::Result<Self::Value, E> {
                epoch_to_utc(v)
                    .map(EpochSeconds)
                    .ok_or_else(|| E::custom(format!("epoch seconds out of range: {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<Self::Value, E> {
                self.visit_f64(v as f64)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<Self::Value, E> {
                self.visit_f64(v as f64)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<Self::Value, E> {
                parse_epoch_seconds(v)
                    .map(EpochSeconds)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_any(EpochVisitor)
    }
}

/// A timestamp transmitted as a free-form date string.
///
/// Decodes against [`KNOWN_FORMATS`] in order; serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FlexibleTime(pub DateTime<Utc>);

impl From<FlexibleTime> for DateTime<Utc> {
    fn from(value: FlexibleTime) -> Self {
        value.0
    }
}

impl From<DateTime<Utc>> for FlexibleTime {
    fn from(value: DateTime<Utc>) -> Self {
        FlexibleTime(value)
    }
}

impl Serialize for FlexibleTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FlexibleTime {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> core::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        parse_free_form(&value)
            .map(FlexibleTime)
            .map_err(de::Error::custom)
    }
}
