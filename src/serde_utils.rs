use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Whole seconds on the wire, `Duration` in memory.
pub mod duration_secs {
    use super::*;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

pub mod option_duration_secs {
    use super::*;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(duration) => serializer.serialize_some(&duration.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct TestStruct {
        #[serde(with = "duration_secs")]
        expires: Duration,
        #[serde(default, with = "option_duration_secs", skip_serializing_if = "Option::is_none")]
        check_after: Option<Duration>,
    }

    #[test]
    fn test_deserialize_duration_secs() {
        let json = r#"{"expires": 86400, "check_after": 5}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();

        assert_eq!(result.expires, Duration::from_secs(86400));
        assert_eq!(result.check_after, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_missing_optional_duration() {
        let json = r#"{"expires": 60}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();

        assert_eq!(result.check_after, None);
        assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"expires":60}"#);
    }

    #[test]
    fn test_negative_seconds_rejected() {
        let json = r#"{"expires": -1}"#;
        assert!(serde_json::from_str::<TestStruct>(json).is_err());
    }
}
