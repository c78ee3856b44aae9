use serde::{Deserialize, Serialize};

/// Guard added to the cosine denominator so all-zero vectors score 0 instead of NaN.
pub const COSINE_EPSILON: f64 = 1e-10;

/// An embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.data
    }

    /// Cosine similarity against another vector.
    ///
    /// Vectors of different length are compared over the shorter prefix.
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f32 {
        cosine(&self.data, &other.data)
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

/// `dot(a, b) / (|a| * |b| + eps)` over the first `min(a.len(), b.len())` components.
///
/// Accumulates in f64 in a single pass; the result is symmetric in its arguments
/// and lies in [-1, 1] up to rounding. Inputs with non-finite components score 0.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
    for i in 0..n {
        let x = a[i] as f64;
        let y = b[i] as f64;
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    let score = dot / (na.sqrt() * nb.sqrt() + COSINE_EPSILON);
    if score.is_finite() {
        score as f32
    } else {
        0.0
    }
}
