//! Binary random-forest classifier.
//!
//! Trees are grown on bootstrap samples with Gini impurity, splitting on
//! `row[feature] <= threshold`. Each leaf stores the fraction of positive
//! samples that reached it; the forest averages those fractions.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::errors::PredictorError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Candidate features per split; `None` means floor(sqrt(n_features)).
    pub max_features: Option<usize>,
    pub bootstrap: bool,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
            bootstrap: true,
            seed: 42,
        }
    }
}

impl From<&configs::TrainingConfig> for ForestParams {
    fn from(cfg: &configs::TrainingConfig) -> Self {
        Self {
            n_estimators: cfg.n_estimators,
            max_depth: cfg.max_depth,
            min_samples_split: cfg.min_samples_split,
            seed: cfg.seed,
            ..Self::default()
        }
    }
}

impl ForestParams {
    fn features_per_split(&self, n_features: usize) -> usize {
        let k = self
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().floor() as usize);
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split { feature: usize, threshold: f64, left: usize, right: usize },
    Leaf { positive_fraction: f64, samples: usize },
}

/// Flat node arena; node 0 is the root and children always follow their parent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], i: usize) -> usize {
            match nodes[i] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        if self.nodes.is_empty() { 0 } else { walk(&self.nodes, 0) }
    }

    fn positive_fraction(&self, row: &[f64]) -> f64 {
        let mut i = 0;
        loop {
            match &self.nodes[i] {
                Node::Leaf { positive_fraction, .. } => return *positive_fraction,
                Node::Split { feature, threshold, left, right } => {
                    i = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), PredictorError> {
        if self.nodes.is_empty() {
            return Err(PredictorError::InvalidModel("tree without nodes".into()));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, left, right, threshold } => {
                    let in_range = |c: usize| c > i && c < self.nodes.len();
                    if *feature >= n_features || !in_range(*left) || !in_range(*right) || !threshold.is_finite() {
                        return Err(PredictorError::InvalidModel(format!("malformed split node {i}")));
                    }
                }
                Node::Leaf { positive_fraction, .. } => {
                    if !(0.0..=1.0).contains(positive_fraction) {
                        return Err(PredictorError::InvalidModel(format!("leaf {i} fraction out of range")));
                    }
                }
            }
        }
        Ok(())
    }
}

struct Candidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    2.0 * p * (1.0 - p)
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f64>],
    labels: &'a [bool],
    params: &'a ForestParams,
    features_per_split: usize,
    rng: StdRng,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    fn grow(&mut self, samples: Vec<usize>, depth: usize) -> usize {
        let total = samples.len();
        let positives = samples.iter().filter(|&&i| self.labels[i]).count();
        let leaf = Node::Leaf {
            positive_fraction: if total == 0 { 0.0 } else { positives as f64 / total as f64 },
            samples: total,
        };

        let pure = positives == 0 || positives == total;
        let too_deep = self.params.max_depth.is_some_and(|d| depth >= d);
        if pure || too_deep || total < self.params.min_samples_split {
            self.nodes.push(leaf);
            return self.nodes.len() - 1;
        }

        let Some(split) = self.best_split(&samples) else {
            self.nodes.push(leaf);
            return self.nodes.len() - 1;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&i| self.rows[i][split.feature] <= split.threshold);

        let id = self.nodes.len();
        self.nodes.push(leaf);
        let left = self.grow(left, depth + 1);
        let right = self.grow(right, depth + 1);
        self.nodes[id] = Node::Split { feature: split.feature, threshold: split.threshold, left, right };
        id
    }

    /// Lowest weighted Gini over randomly ordered features. Evaluation keeps going past
    /// `features_per_split` only while no candidate has separated the samples.
    fn best_split(&mut self, samples: &[usize]) -> Option<Candidate> {
        let n_features = self.rows.first().map_or(0, Vec::len);
        let mut features: Vec<usize> = (0..n_features).collect();
        features.shuffle(&mut self.rng);

        let total = samples.len();
        let total_pos = samples.iter().filter(|&&i| self.labels[i]).count();
        let mut best: Option<Candidate> = None;
        let mut sorted = samples.to_vec();

        for (visited, &feature) in features.iter().enumerate() {
            if visited >= self.features_per_split && best.is_some() {
                break;
            }
            sorted.sort_by(|&a, &b| self.rows[a][feature].total_cmp(&self.rows[b][feature]));

            let mut left_pos = 0;
            for j in 0..total - 1 {
                if self.labels[sorted[j]] {
                    left_pos += 1;
                }
                let here = self.rows[sorted[j]][feature];
                let next = self.rows[sorted[j + 1]][feature];
                if here >= next {
                    continue;
                }
                let left_n = j + 1;
                let right_n = total - left_n;
                let impurity = (left_n as f64 * gini(left_pos, left_n)
                    + right_n as f64 * gini(total_pos - left_pos, right_n))
                    / total as f64;
                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    let mut threshold = here / 2.0 + next / 2.0;
                    if threshold >= next || !threshold.is_finite() {
                        threshold = here;
                    }
                    best = Some(Candidate { feature, threshold, impurity });
                }
            }
        }
        best
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    params: ForestParams,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Fit on `rows` (all the same width) with boolean targets.
    pub fn fit(rows: &[Vec<f64>], labels: &[bool], params: &ForestParams) -> Result<Self, PredictorError> {
        if rows.is_empty() {
            return Err(PredictorError::Dataset("cannot train on an empty dataset".into()));
        }
        if rows.len() != labels.len() {
            return Err(PredictorError::Dataset(format!(
                "{} rows but {} labels",
                rows.len(),
                labels.len()
            )));
        }
        let n_features = rows[0].len();
        if n_features == 0 {
            return Err(PredictorError::Dataset("rows have no features".into()));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != n_features) {
            return Err(PredictorError::FeatureCount { expected: n_features, got: rows[bad].len() });
        }
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(PredictorError::Dataset("feature values must be finite".into()));
        }
        if params.n_estimators == 0 {
            return Err(PredictorError::Dataset("n_estimators must be >= 1".into()));
        }

        let mut master = StdRng::seed_from_u64(params.seed);
        let features_per_split = params.features_per_split(n_features);
        let n = rows.len();
        let trees = (0..params.n_estimators)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.gen());
                let samples: Vec<usize> = if params.bootstrap {
                    (0..n).map(|_| rng.gen_range(0..n)).collect()
                } else {
                    (0..n).collect()
                };
                let mut builder = TreeBuilder {
                    rows,
                    labels,
                    params,
                    features_per_split,
                    rng,
                    nodes: Vec::new(),
                };
                builder.grow(samples, 0);
                DecisionTree { nodes: builder.nodes }
            })
            .collect();

        Ok(Self { n_features, params: params.clone(), trees })
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, row: &[f64]) -> Result<f64, PredictorError> {
        if row.len() != self.n_features {
            return Err(PredictorError::FeatureCount { expected: self.n_features, got: row.len() });
        }
        let sum: f64 = self.trees.iter().map(|t| t.positive_fraction(row)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    pub fn predict(&self, row: &[f64]) -> Result<bool, PredictorError> {
        Ok(self.predict_proba(row)? > 0.5)
    }

    /// Fraction of rows whose prediction matches the label.
    pub fn score(&self, rows: &[Vec<f64>], labels: &[bool]) -> Result<f64, PredictorError> {
        if rows.is_empty() {
            return Err(PredictorError::Dataset("cannot score an empty dataset".into()));
        }
        let mut correct = 0usize;
        for (row, &label) in rows.iter().zip(labels) {
            if self.predict(row)? == label {
                correct += 1;
            }
        }
        Ok(correct as f64 / rows.len() as f64)
    }

    /// Structural checks for artifacts loaded from disk.
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.trees.is_empty() {
            return Err(PredictorError::InvalidModel("forest has no trees".into()));
        }
        self.trees.iter().try_for_each(|t| t.validate(self.n_features))
    }
}
