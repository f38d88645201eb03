use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Integer input that also accepts floats (truncated) and numeric strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LooseInt(pub i64);

impl<'de> Deserialize<'de> for LooseInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        coerce_int(&raw)
            .map(LooseInt)
            .ok_or_else(|| de::Error::custom(format!("expected an integer, got {raw}")))
    }
}

fn coerce_int(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Startup attributes sent by the frontend for a success prediction.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PredictionRequest {
    pub founded_year: LooseInt,
    pub funding_usd: LooseInt,
    pub industry: String,
    pub country: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PredictionResponse {
    pub success_probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_are_coerced_like_the_frontend_sends_them() {
        let req: PredictionRequest = serde_json::from_value(json!({
            "founded_year": "2015",
            "funding_usd": 2500000.9,
            "industry": "IT",
            "country": "USA"
        }))
        .unwrap();
        assert_eq!(req.founded_year, LooseInt(2015));
        assert_eq!(req.funding_usd, LooseInt(2_500_000));
    }

    #[test]
    fn non_numeric_values_fail() {
        let bad = serde_json::from_value::<PredictionRequest>(json!({
            "founded_year": "soon",
            "funding_usd": 1,
            "industry": "IT",
            "country": "USA"
        }));
        assert!(bad.is_err());
        let missing = serde_json::from_value::<PredictionRequest>(json!({"industry": "IT"}));
        assert!(missing.is_err());
    }
}
