mod embedding;
mod normalization;
mod types;

pub use embedding::{Embedder, IdentityEmbedder, embed_features, hash_category};
pub use normalization::{NoOpNormalizer, Normalizer, OnlineStandardNormalizer};
pub use types::{FeatureType, FeatureVector, RawFeatureVector, Sample};
