use crate::features::{FeatureVector, RawFeatureVector};
use std::collections::BTreeMap;

/// Maps raw features to the dense vector the forest consumes.
pub trait Embedder: Send + Sync {
    fn embed(&self, raw: &RawFeatureVector) -> FeatureVector;
}

/// Assumes the numeric part of the raw input is already embedded and copies it.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityEmbedder;

impl Embedder for IdentityEmbedder {
    fn embed(&self, raw: &RawFeatureVector) -> FeatureVector {
        raw.numeric.clone()
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Encodes a categorical value as a deterministic number in `[0, 1)`.
pub fn hash_category(value: &str) -> f64 {
    // 53 high bits keep the quotient strictly below 1.0
    (fnv1a_64(value.as_bytes()) >> 11) as f64 / (1u64 << 53) as f64
}

/// Builds a dense vector from named numeric and categorical features.
///
/// Numeric values come first, in ascending key order, followed by the
/// categorical values in ascending key order, each hashed into `[0, 1)`.
/// The output is stable across calls and processes, so the same maps always
/// land on the same coordinates.
pub fn embed_features(
    numeric: &BTreeMap<String, f64>,
    categorical: &BTreeMap<String, String>,
) -> FeatureVector {
    let mut values = Vec::with_capacity(numeric.len() + categorical.len());
    values.extend(numeric.values().copied());
    values.extend(categorical.values().map(|v| hash_category(v)));
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maps() -> (BTreeMap<String, f64>, BTreeMap<String, String>) {
        let numeric = BTreeMap::from([
            ("mem_util".to_string(), 0.60),
            ("cpu_util".to_string(), 0.75),
        ]);
        let categorical = BTreeMap::from([
            ("reaction_type".to_string(), "HPA".to_string()),
            ("env".to_string(), "prod".to_string()),
        ]);
        (numeric, categorical)
    }

    #[test]
    fn numeric_then_categorical_in_key_order() {
        let (numeric, categorical) = maps();
        let fv = embed_features(&numeric, &categorical);

        assert_eq!(fv.len(), 4);
        assert_eq!(fv[0], 0.75);
        assert_eq!(fv[1], 0.60);
        assert_eq!(fv[2], hash_category("prod"));
        assert_eq!(fv[3], hash_category("HPA"));
    }

    #[test]
    fn embedding_is_deterministic() {
        let (numeric, categorical) = maps();
        assert_eq!(
            embed_features(&numeric, &categorical),
            embed_features(&numeric, &categorical)
        );
    }

    #[test]
    fn empty_maps_embed_to_empty_vector() {
        assert!(embed_features(&BTreeMap::new(), &BTreeMap::new()).is_empty());
    }

    #[test]
    fn unseen_categories_hash_into_unit_interval() {
        for value in ["", "some-new-category", "prod", "\u{1F980}"] {
            let h = hash_category(value);
            assert!((0.0..1.0).contains(&h), "{value:?} -> {h}");
        }
        assert_ne!(hash_category("prod"), hash_category("dev"));
    }

    #[test]
    fn identity_embedder_copies_numeric_part() {
        let raw = RawFeatureVector::from_numeric(vec![0.1, 0.5, 1.0]);
        assert_eq!(IdentityEmbedder.embed(&raw), vec![0.1, 0.5, 1.0]);
    }
}
