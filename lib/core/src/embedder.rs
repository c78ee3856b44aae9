use crate::{Result, Vector};

/// Text-to-vector conversion.
///
/// Implementations wrap a local model or a remote API. The core never
/// validates dimensions beyond comparing the shorter prefix of two vectors.
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per input, in input order
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vector>>;

    /// Embed a single text
    fn embed_one(&self, text: &str) -> Result<Vector> {
        self.embed(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| crate::Error::Embedding("provider returned no vector".to_string()))
    }

    /// Output dimension of the model
    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}
