use super::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Counts calls and fails on sentences containing "fail".
#[derive(Debug, Default)]
struct CountingEmbedder {
    calls: AtomicUsize,
}

impl SentenceEmbedder for CountingEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if text.contains("fail") {
            return Err(EmbeddingError::InferenceFailed {
                reason: "forced".to_string(),
            });
        }
        Ok(vec![text.len() as f32, 1.0])
    }

    fn dimension(&self) -> usize {
        2
    }
}

mod config_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default() {
        let config = EmbedderConfig::default();
        assert_eq!(config.embedding_dim, DEFAULT_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, DEFAULT_MAX_SEQ_LEN);
        assert!(config.model_dir.is_none());
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_stub_validates_without_files() {
        assert!(EmbedderConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_from_model_dir() {
        assert!(EmbedderConfig::from_model_dir(None).testing_stub);

        let config = EmbedderConfig::from_model_dir(Some(PathBuf::from("/models/minilm").as_path()));
        assert!(!config.testing_stub);
        assert_eq!(config.model_dir, Some(PathBuf::from("/models/minilm")));
    }

    #[test]
    fn test_missing_model_dir_rejected() {
        let err = EmbedderConfig::default().validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_zero_dimension_rejected_even_for_stub() {
        let config = EmbedderConfig {
            embedding_dim: 0,
            ..EmbedderConfig::stub()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_nonexistent_dir() {
        let config = EmbedderConfig::new("/nonexistent/minilm");
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_dir_missing_weights() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.json"), "{}").unwrap();
        std::fs::write(dir.path().join("tokenizer.json"), "{}").unwrap();

        let err = EmbedderConfig::new(dir.path()).validate().unwrap_err();
        match err {
            EmbeddingError::ModelNotFound { path } => {
                assert!(path.ends_with("model.safetensors"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_fails_on_missing_model() {
        let err = MiniLmEmbedder::load(EmbedderConfig::new("/nonexistent/minilm")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/minilm"));
    }
}

mod stub_tests {
    use super::*;

    #[test]
    fn test_stub_mode() {
        let embedder = MiniLmEmbedder::stub().unwrap();
        assert!(embedder.is_stub());
        assert_eq!(embedder.dimension(), DEFAULT_EMBEDDING_DIM);
        assert!(format!("{embedder:?}").contains("Stub"));
    }

    #[test]
    fn test_stub_is_deterministic() {
        let a = MiniLmEmbedder::stub().unwrap();
        let b = MiniLmEmbedder::stub().unwrap();

        let first = a.embed("The sky is blue.").unwrap();
        assert_eq!(first, a.embed("The sky is blue.").unwrap());
        assert_eq!(first, b.embed("The sky is blue.").unwrap());
    }

    #[test]
    fn test_stub_vectors_are_unit_length() {
        let embedder = MiniLmEmbedder::stub().unwrap();
        for text in ["The sky is blue.", "", "Heute ist das Wetter sehr schön."] {
            let v = embedder.embed(text).unwrap();
            assert_eq!(v.len(), DEFAULT_EMBEDDING_DIM);
            assert!((norm(&v) - 1.0).abs() < 1e-4, "{text:?}");
        }
    }

    #[test]
    fn test_stub_distinguishes_sentences() {
        let embedder = MiniLmEmbedder::stub().unwrap();
        let a = embedder.embed("The sky is blue.").unwrap();
        let b = embedder.embed("Bananas are yellow.").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_stub_respects_configured_dimension() {
        let embedder = MiniLmEmbedder::load(EmbedderConfig {
            embedding_dim: 16,
            ..EmbedderConfig::stub()
        })
        .unwrap();
        assert_eq!(embedder.embed("short").unwrap().len(), 16);
        assert_eq!(embedder.dimension(), 16);
    }

    #[test]
    fn test_embed_batch_preserves_order() {
        let embedder = MiniLmEmbedder::stub().unwrap();
        let batch = embedder.embed_batch(&["One.", "Two.", "One."]).unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(batch[0], embedder.embed("One.").unwrap());
        assert_eq!(batch[1], embedder.embed("Two.").unwrap());
        assert_eq!(batch[0], batch[2]);
        assert!(embedder.embed_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_normalize_leaves_zero_vector() {
        assert_eq!(minilm::normalize(vec![0.0; 4]), vec![0.0; 4]);
        assert_eq!(minilm::normalize(vec![3.0, 4.0]), vec![0.6, 0.8]);
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    #[test]
    fn test_select_device_cpu_without_gpu_features() {
        assert!(matches!(device::select_device(), candle_core::Device::Cpu));
    }
}

mod cached_tests {
    use super::*;

    #[test]
    fn test_repeated_sentence_hits_cache() {
        let cached = CachedEmbedder::new(CountingEmbedder::default());

        let first = cached.embed("Hello.").unwrap();
        let second = cached.embed("Hello.").unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 1);
        assert!(cached.contains("Hello."));
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn test_distinct_sentences_miss() {
        let cached = CachedEmbedder::new(CountingEmbedder::default());

        cached.embed_batch(&["One.", "Two.", "One."]).unwrap();

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cached = CachedEmbedder::new(CountingEmbedder::default());

        assert!(cached.embed("please fail").is_err());
        assert!(cached.embed("please fail").is_err());

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
        assert!(!cached.contains("please fail"));
    }

    #[test]
    fn test_clear() {
        let cached = CachedEmbedder::new(CountingEmbedder::default());
        cached.embed("Hello.").unwrap();

        cached.clear();

        assert!(!cached.contains("Hello."));
        cached.embed("Hello.").unwrap();
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dimension_delegates() {
        let cached = CachedEmbedder::with_capacity(CountingEmbedder::default(), 8);
        assert_eq!(cached.dimension(), 2);
    }

    #[test]
    fn test_shared_embedder_through_arc() {
        let shared = std::sync::Arc::new(MiniLmEmbedder::stub().unwrap());
        let cached = CachedEmbedder::new(shared.clone());

        assert_eq!(
            cached.embed("Shared.").unwrap(),
            shared.embed("Shared.").unwrap()
        );
        assert_eq!(cached.dimension(), shared.dimension());
    }
}
