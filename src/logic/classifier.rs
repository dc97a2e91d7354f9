//! Review Classifier - word2vec embeddings + linear SVM
//!
//! Feature layout fed to the SVM:
//!
//! ```text
//! [ rating, token_count, mean_embedding[0..dim] ]
//! ```
//!
//! Both model files are exported from the training pipeline:
//! embeddings in the word2vec text format, SVM weights as JSON.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::Prediction;

/// Rating used when the page gave none or it did not parse
pub const DEFAULT_RATING: f64 = 3.0;

/// rating + token count
const EXTRA_FEATURES: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid embeddings file at line {line}: {reason}")]
    Embeddings { line: usize, reason: String },
    #[error("Invalid SVM model: {0}")]
    Svm(#[from] serde_json::Error),
    #[error("SVM expects {expected} features but embeddings produce {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

// ============================================================================
// EMBEDDINGS
// ============================================================================

#[derive(Debug, Clone)]
pub struct WordEmbeddings {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl WordEmbeddings {
    pub fn new(dim: usize, vectors: HashMap<String, Vec<f32>>) -> Self {
        Self { dim, vectors }
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse the word2vec text format: `<count> <dim>` header, then one word per line
    pub fn from_reader(reader: impl BufRead) -> Result<Self, ModelError> {
        let mut lines = reader.lines();

        let header = lines.next().ok_or_else(|| ModelError::Embeddings {
            line: 1,
            reason: "empty file".to_string(),
        })??;
        let mut parts = header.split_whitespace();
        let declared: usize = parse_header_field(parts.next(), "word count")?;
        let dim: usize = parse_header_field(parts.next(), "vector size")?;

        let mut vectors = HashMap::with_capacity(declared);
        for (idx, line) in lines.enumerate() {
            let line = line?;
            let line_no = idx + 2;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let word = fields.next().unwrap_or_default().to_string();
            let vector = fields
                .map(|v| v.parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| ModelError::Embeddings { line: line_no, reason: e.to_string() })?;

            if vector.len() != dim {
                return Err(ModelError::Embeddings {
                    line: line_no,
                    reason: format!("expected {} values, found {}", dim, vector.len()),
                });
            }
            vectors.insert(word, vector);
        }

        if vectors.len() != declared {
            tracing::warn!(
                "Embeddings header declares {} words, loaded {}",
                declared, vectors.len()
            );
        }

        Ok(Self { dim, vectors })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    /// Mean vector of the known tokens, None if no token is known
    pub fn mean_vector<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> Option<Vec<f32>> {
        let mut sum = vec![0.0f32; self.dim];
        let mut count = 0usize;

        for vector in tokens.into_iter().filter_map(|t| self.get(t)) {
            for (acc, v) in sum.iter_mut().zip(vector) {
                *acc += v;
            }
            count += 1;
        }

        if count == 0 {
            return None;
        }
        for acc in sum.iter_mut() {
            *acc /= count as f32;
        }
        Some(sum)
    }
}

fn parse_header_field(field: Option<&str>, name: &str) -> Result<usize, ModelError> {
    field
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| ModelError::Embeddings {
            line: 1,
            reason: format!("missing or invalid {}", name),
        })
}

// ============================================================================
// LINEAR SVM
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearSvm {
    pub coef: Vec<f32>,
    pub intercept: f32,
}

impl LinearSvm {
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn decision(&self, features: &[f32]) -> f32 {
        self.coef
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum::<f32>()
            + self.intercept
    }

    pub fn predict(&self, features: &[f32]) -> u8 {
        if self.decision(features) > 0.0 { 1 } else { 0 }
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone)]
pub struct ReviewClassifier {
    embeddings: WordEmbeddings,
    svm: LinearSvm,
}

impl ReviewClassifier {
    pub fn new(embeddings: WordEmbeddings, svm: LinearSvm) -> Result<Self, ModelError> {
        let produced = EXTRA_FEATURES + embeddings.dim();
        if svm.coef.len() != produced {
            return Err(ModelError::DimensionMismatch {
                expected: svm.coef.len(),
                actual: produced,
            });
        }
        Ok(Self { embeddings, svm })
    }

    pub fn load(word2vec_path: &Path, svm_path: &Path) -> Result<Self, ModelError> {
        let embeddings = WordEmbeddings::load(word2vec_path)?;
        let svm = LinearSvm::load(svm_path)?;
        tracing::info!(
            "Loaded classifier: {} words, {} dimensions",
            embeddings.len(), embeddings.dim()
        );
        Self::new(embeddings, svm)
    }

    /// Classify already preprocessed review text
    pub fn classify(&self, preprocessed: &str, rating: f64) -> Prediction {
        let tokens: Vec<&str> = preprocessed.split_whitespace().collect();

        let Some(text_vector) = self.embeddings.mean_vector(tokens.iter().copied()) else {
            return Prediction::Real;
        };

        let mut features = Vec::with_capacity(EXTRA_FEATURES + text_vector.len());
        features.push(rating as f32);
        features.push(tokens.len() as f32);
        features.extend(text_vector);

        Prediction::from_class(self.svm.predict(&features))
    }
}

/// Numeric rating, DEFAULT_RATING when absent or unparsable
pub fn parse_rating(raw: Option<&str>) -> f64 {
    raw.and_then(|r| r.trim().parse::<f64>().ok())
        .filter(|r| r.is_finite())
        .unwrap_or(DEFAULT_RATING)
}
