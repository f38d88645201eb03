use serde::{Deserialize, Serialize};

use crate::errors::PredictorError;

/// Maps category labels to their index in the sorted list of distinct training labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    feature: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<I, S>(feature: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { feature: feature.to_string(), classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    /// Classes must be non-empty, sorted and distinct for `transform` to be correct.
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.classes.is_empty() {
            return Err(PredictorError::InvalidModel(format!("{} encoder has no classes", self.feature)));
        }
        if let Some(pair) = self.classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(PredictorError::InvalidModel(format!(
                "{} encoder classes not sorted and distinct at {:?}",
                self.feature, pair
            )));
        }
        Ok(())
    }

    pub fn transform(&self, label: &str) -> Result<usize, PredictorError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .map_err(|_| PredictorError::UnknownLabel {
                feature: self.feature.clone(),
                label: label.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_sorted_distinct_labels() -> Result<(), PredictorError> {
        let enc = LabelEncoder::fit("industry", ["IT", "Fintech", "IT", "Agro", "Health"]);
        assert_eq!(enc.classes(), ["Agro", "Fintech", "Health", "IT"]);
        assert_eq!(enc.transform("Agro")?, 0);
        assert_eq!(enc.transform("IT")?, 3);
        Ok(())
    }

    #[test]
    fn validate_requires_sorted_distinct_classes() {
        assert!(LabelEncoder::fit("industry", ["IT", "Agro"]).validate().is_ok());
        let unsorted = LabelEncoder { feature: "industry".into(), classes: vec!["IT".into(), "Agro".into()] };
        assert!(matches!(unsorted.validate(), Err(PredictorError::InvalidModel(_))));
        let dup = LabelEncoder { feature: "country".into(), classes: vec!["UK".into(), "UK".into()] };
        assert!(dup.validate().is_err());
        assert!(LabelEncoder::default().validate().is_err());
    }

    #[test]
    fn unseen_label_is_an_error() {
        let enc = LabelEncoder::fit("country", ["USA", "India"]);
        let err = enc.transform("Mars").unwrap_err();
        assert!(matches!(err, PredictorError::UnknownLabel { ref feature, ref label } if feature == "country" && label == "Mars"));
        assert!(enc.transform("usa").is_err());
    }
}
