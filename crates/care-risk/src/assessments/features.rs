use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;

use serde::de::{self, DeserializeOwned, Unexpected, Visitor};
use serde::Deserializer;

use super::domain::AssessmentDomain;
use super::error::EvaluationError;
use crate::predictor::{FeatureSchema, FeatureVector};

/// Typed assessment record that can supply named numeric features.
pub trait AssessmentInput {
    const DOMAIN: AssessmentDomain;
    /// Every feature the record can supply, in canonical order.
    const FIELDS: &'static [&'static str];

    fn feature(&self, name: &str) -> Option<f64>;

    /// Range checks applied before a record is scored.
    fn validate(&self) -> Result<(), EvaluationError>;
}

/// Build the feature vector `schema` expects, in schema order.
///
/// A schema feature the record cannot supply is a [`EvaluationError::SchemaMismatch`]; values
/// are never defaulted.
pub fn normalize<I: AssessmentInput>(
    input: &I,
    schema: &FeatureSchema,
) -> Result<FeatureVector, EvaluationError> {
    let values = schema
        .names()
        .iter()
        .map(|name| {
            input.feature(name).ok_or_else(|| {
                EvaluationError::schema(I::DOMAIN, format!("missing required feature '{name}'"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FeatureVector::new(values))
}

/// Startup check that a predictor's schema only names features this domain can supply.
pub(crate) fn check_schema<I: AssessmentInput>(schema: &FeatureSchema) -> Result<(), EvaluationError> {
    if schema.is_empty() {
        return Err(EvaluationError::Configuration(format!(
            "{} predictor declares no features",
            I::DOMAIN
        )));
    }

    let mut seen = BTreeSet::new();
    for name in schema.names() {
        if !I::FIELDS.contains(&name.as_str()) {
            return Err(EvaluationError::Configuration(format!(
                "{} predictor expects unknown feature '{name}'",
                I::DOMAIN
            )));
        }
        if !seen.insert(name.as_str()) {
            return Err(EvaluationError::Configuration(format!(
                "{} predictor lists feature '{name}' twice",
                I::DOMAIN
            )));
        }
    }
    Ok(())
}

/// Deserialize and validate a record from loosely typed JSON.
pub fn parse_input<I>(value: serde_json::Value) -> Result<I, EvaluationError>
where
    I: AssessmentInput + DeserializeOwned,
{
    let input: I = serde_json::from_value(value)
        .map_err(|err| EvaluationError::schema(I::DOMAIN, err.to_string()))?;
    input.validate()?;
    Ok(input)
}

pub(crate) fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn ensure_range<T>(
    domain: AssessmentDomain,
    field: &str,
    value: T,
    range: RangeInclusive<T>,
) -> Result<(), EvaluationError>
where
    T: PartialOrd + fmt::Display + Copy,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(EvaluationError::schema(
            domain,
            format!(
                "{field} must be within {}..={} (found {value})",
                range.start(),
                range.end()
            ),
        ))
    }
}

/// Accepts JSON booleans as well as the 0/1 integers older clients send.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean or a 0/1 flag")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(E::invalid_value(Unexpected::Str(value), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}
