//! User account rows.
//!
//! Accounts live in `users.csv` with one row per signup. Passwords are stored
//! and compared as plaintext.

use serde::{Deserialize, Serialize};

/// A row of the user table.
///
/// Field names map to the CSV header used by the user table:
/// `Username, Password, Phone Number, Waist Measurement, Bust Measurement, Hip Measurement`.
///
/// A blank measurement cell reads as `NaN` and is written back blank, so a
/// hand-edited row never stops the rest of the table from loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Phone Number")]
    pub phone: String,
    #[serde(rename = "Waist Measurement", with = "measurement")]
    pub waist: f64,
    #[serde(rename = "Bust Measurement", with = "measurement")]
    pub bust: f64,
    #[serde(rename = "Hip Measurement", with = "measurement")]
    pub hip: f64,
}

impl UserRecord {
    /// Column names of the user table, in file order.
    pub const COLUMNS: [&'static str; 6] = [
        "Username",
        "Password",
        "Phone Number",
        "Waist Measurement",
        "Bust Measurement",
        "Hip Measurement",
    ];

    /// Returns true if the given credentials match this row exactly.
    ///
    /// Comparison is case-sensitive with no normalization.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Lenient measurement cells: blank means `NaN`.
mod measurement {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(MeasurementVisitor)
    }

    struct MeasurementVisitor;

    impl Visitor<'_> for MeasurementVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or a blank cell")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(f64::NAN);
            }
            v.parse().map_err(E::custom)
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }
    }
}

/// The six signup form fields.
///
/// No field is validated: empty strings and duplicate usernames are stored
/// as given.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SignupInput {
    pub username: String,
    pub password: String,
    pub phone: String,
    pub waist: f64,
    pub bust: f64,
    pub hip: f64,
}

impl From<SignupInput> for UserRecord {
    fn from(input: SignupInput) -> Self {
        Self {
            username: input.username,
            password: input.password,
            phone: input.phone,
            waist: input.waist,
            bust: input.bust,
            hip: input.hip,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn alice() -> UserRecord {
        UserRecord {
            username: "alice".to_string(),
            password: "pw1".to_string(),
            phone: "555-0100".to_string(),
            waist: 28.5,
            bust: 34.0,
            hip: 36.0,
        }
    }

    #[test]
    fn test_matches_exact_credentials() {
        assert!(alice().matches("alice", "pw1"));
    }

    #[test]
    fn test_matches_is_case_sensitive() {
        assert!(!alice().matches("Alice", "pw1"));
        assert!(!alice().matches("alice", "PW1"));
    }

    #[test]
    fn test_matches_does_not_trim() {
        assert!(!alice().matches("alice ", "pw1"));
    }

    #[test]
    fn test_signup_input_converts_field_for_field() {
        let input = SignupInput {
            username: String::new(),
            password: String::new(),
            phone: String::new(),
            waist: 0.0,
            bust: 0.0,
            hip: 0.0,
        };
        let record = UserRecord::from(input);
        assert_eq!(record.username, "");
        assert!(record.waist.abs() < f64::EPSILON);
    }

    #[test]
    fn test_blank_measurement_survives_session_round_trip() {
        let record = UserRecord {
            waist: f64::NAN,
            ..alice()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""Waist Measurement":"""#));

        let back: UserRecord = serde_json::from_str(&json).unwrap();
        assert!(back.waist.is_nan());
        assert!((back.bust - 34.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_measurement_accepts_numbers_and_numeric_strings() {
        let json = r#"{"Username":"a","Password":"b","Phone Number":"","Waist Measurement":28,"Bust Measurement":"34.5","Hip Measurement":null}"#;
        let record: UserRecord = serde_json::from_str(json).unwrap();
        assert!((record.waist - 28.0).abs() < f64::EPSILON);
        assert!((record.bust - 34.5).abs() < f64::EPSILON);
        assert!(record.hip.is_nan());
    }

    #[test]
    fn test_measurement_rejects_text() {
        let json = r#"{"Username":"a","Password":"b","Phone Number":"","Waist Measurement":"wide","Bust Measurement":1,"Hip Measurement":1}"#;
        assert!(serde_json::from_str::<UserRecord>(json).is_err());
    }
}
