/// Dense numeric representation of a sample after embedding and
/// normalization. This is what the forest consumes.
pub type FeatureVector = Vec<f64>;

/// Semantic type of a single raw input feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    Numeric,
    Categorical,
}

/// A single labeled observation. Only used transiently: the forest never
/// stores samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: FeatureVector,
    pub label: bool,
}

impl Sample {
    pub fn new(features: FeatureVector, label: bool) -> Self {
        Self { features, label }
    }
}

/// Heterogeneous input before embedding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFeatureVector {
    pub numeric: Vec<f64>,
    pub categorical: Vec<String>,
    pub feature_types: Vec<FeatureType>,
    pub original_index: Vec<usize>,
}

impl RawFeatureVector {
    pub fn from_numeric(numeric: Vec<f64>) -> Self {
        let n = numeric.len();
        Self {
            numeric,
            categorical: Vec::new(),
            feature_types: vec![FeatureType::Numeric; n],
            original_index: (0..n).collect(),
        }
    }
}
