use crate::error::Error;
use crate::Result;

/// Size constraints for produced chunks, measured in characters
#[derive(Debug, Clone, Copy)]
pub struct ChunkConfig {
    /// The target size for each chunk
    pub chunk_size: usize,
    /// The amount of overlap between consecutive chunks of the same document
    pub chunk_overlap: usize,
}

impl ChunkConfig {
    /// Create a new chunk configuration.
    ///
    /// Overlap must stay strictly below the chunk size, otherwise splitting
    /// could never advance past a boundary.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_overlap >= chunk_size {
            return Err(Error::InvalidChunkConfig {
                chunk_size,
                chunk_overlap,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ChunkConfig::new(1000, 200).unwrap();
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.chunk_overlap, 200);
    }

    #[test]
    fn test_overlap_equal_to_size_rejected() {
        let err = ChunkConfig::new(100, 100).unwrap_err();
        assert!(matches!(err, Error::InvalidChunkConfig { .. }));
    }

    #[test]
    fn test_overlap_above_size_rejected() {
        let err = ChunkConfig::new(100, 150).unwrap_err();
        assert!(matches!(err, Error::InvalidChunkConfig { .. }));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(ChunkConfig::new(0, 0).is_err());
    }
}
