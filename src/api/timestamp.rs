//! Codec for the API's `YYYY-MM-DD HH:MM:SS +ZZZZ ZZZ` timestamps.
//!
//! The server writes timestamps like `2020-05-04 14:50:38 +0000 UTC`, which no
//! standard format covers, and uses `null` for timestamps that were never set.

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, SubsecRound, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const LAYOUT: &str = "%Y-%m-%d %H:%M:%S %z";
const NULL_LITERAL: &str = "null";

// Byte shape of the part before the zone: `9` is a digit, `+` is a sign.
const SHAPE: &[u8] = b"9999-99-99 99:99:99 +9999";

/// Unix seconds of `0001-01-01 00:00:00 UTC`, the instant reserved for "unset".
const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error("timestamp {0:?} has no zone abbreviation")]
    MissingZone(String),

    #[error("invalid zone abbreviation {0:?}")]
    InvalidZone(String),

    #[error("timestamp {0:?} does not match `YYYY-MM-DD HH:MM:SS +ZZZZ ZZZ`")]
    Malformed(String),

    #[error("timestamp is out of range: {0}")]
    Layout(#[from] chrono::ParseError),
}

/// A server timestamp with second precision, or [`Timestamp::UNSET`].
///
/// The zone abbreviation is kept as received so that a decoded value encodes
/// back to the same text. Two timestamps are equal only when instant, offset
/// and abbreviation all match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timestamp(Option<Instant>);

#[derive(Debug, Clone)]
struct Instant {
    at: DateTime<FixedOffset>,
    zone: String,
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.at.offset() == other.at.offset() && self.zone == other.zone
    }
}

impl Eq for Instant {}

impl Timestamp {
    pub const UNSET: Timestamp = Timestamp(None);

    fn from_parts(at: DateTime<FixedOffset>, zone: String) -> Self {
        if at.timestamp() == ZERO_INSTANT_SECS {
            return Self::UNSET;
        }
        Self(Some(Instant {
            at: at.trunc_subsecs(0),
            zone,
        }))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn instant(&self) -> Option<DateTime<FixedOffset>> {
        self.0.as_ref().map(|i| i.at)
    }

    pub fn zone(&self) -> Option<&str> {
        self.0.as_ref().map(|i| i.zone.as_str())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Self::from_parts(at.fixed_offset(), "UTC".to_string())
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(at: DateTime<FixedOffset>) -> Self {
        let offset = at.offset().local_minus_utc();
        // The layout has no room for offset seconds.
        if offset == 0 || offset % 60 != 0 {
            return Self::from(at.with_timezone(&Utc));
        }
        let zone = at.format("%z").to_string();
        Self::from_parts(at, zone)
    }
}

// Either an uppercase abbreviation (`UTC`, `CEST`) or a numeric offset (`+0200`).
fn is_zone_name(zone: &str) -> bool {
    let bytes = zone.as_bytes();
    match bytes.first() {
        Some(b'+') | Some(b'-') => bytes.len() == 5 && bytes[1..].iter().all(u8::is_ascii_digit),
        _ => (3..=5).contains(&bytes.len()) && bytes.iter().all(u8::is_ascii_uppercase),
    }
}

fn matches_shape(stamp: &str) -> bool {
    let bytes = stamp.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE).all(|(&b, &expected)| match expected {
            b'9' => b.is_ascii_digit(),
            b'+' => b == b'+' || b == b'-',
            _ => b == expected,
        })
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_matches('"');
        if s == NULL_LITERAL {
            return Ok(Self::UNSET);
        }

        let (stamp, zone) = s
            .rsplit_once(' ')
            .ok_or_else(|| TimestampError::MissingZone(s.to_string()))?;
        if !is_zone_name(zone) {
            return Err(TimestampError::InvalidZone(zone.to_string()));
        }

        if !matches_shape(stamp) {
            return Err(TimestampError::Malformed(s.to_string()));
        }

        let at = DateTime::parse_from_str(stamp, LAYOUT)?;
        Ok(Self::from_parts(at, zone.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(instant) => write!(f, "{} {}", instant.at.format(LAYOUT), instant.zone),
            None => f.write_str(NULL_LITERAL),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_set() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_none()
        }
    }
}

struct TimestampVisitor;

impl<'de> de::Visitor<'de> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a `YYYY-MM-DD HH:MM:SS +ZZZZ ZZZ` timestamp or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_none<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::UNSET)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Timestamp, E> {
        Ok(Timestamp::UNSET)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Timestamp, D::Error> {
        deserializer.deserialize_str(TimestampVisitor)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(TimestampVisitor)
    }
}
