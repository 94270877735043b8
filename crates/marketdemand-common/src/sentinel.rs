//! Serde helpers for `f64` fields that may hold infinity sentinels.
//!
//! `serde_json` writes non-finite floats as `null`. Score records must never
//! contain `null`, so infinities are written as the strings `"Infinity"` and
//! `"-Infinity"` and read back the same way.

use serde::{de, Deserialize, Deserializer, Serializer};

const POS_INF: &str = "Infinity";
const NEG_INF: &str = "-Infinity";

pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_infinite() {
        serializer.serialize_str(if *value > 0.0 { POS_INF } else { NEG_INF })
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Number(f64),
    Text(String),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Repr::deserialize(deserializer)? {
        Repr::Number(n) => Ok(n),
        Repr::Text(s) if s == POS_INF => Ok(f64::INFINITY),
        Repr::Text(s) if s == NEG_INF => Ok(f64::NEG_INFINITY),
        Repr::Text(s) => Err(de::Error::custom(format!("expected a number or Infinity, got '{s}'"))),
    }
}
