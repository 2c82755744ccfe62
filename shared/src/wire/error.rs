use thiserror::Error;

/// Errors that can occur while encoding or decoding envelopes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Envelope could not be serialized
    #[error("Failed to serialize envelope: {reason}")]
    SerializeFailed { reason: String },

    /// Bytes did not hold a well-formed envelope (SECURITY: untrusted input)
    #[error("Failed to deserialize envelope of {payload_size} bytes: {reason}")]
    DeserializeFailed { payload_size: usize, reason: String },

    /// Payload is larger than the configured decode limit
    #[error("Payload of {payload_size} bytes exceeds the {max_size} byte limit")]
    PayloadTooLarge { payload_size: usize, max_size: usize },

    /// Failed to create compressor with the specified configuration
    #[error("Failed to create compressor with compression level {level}")]
    CompressorCreationFailed { level: i32 },

    /// Failed to create decompressor
    #[error("Failed to create decompressor")]
    DecompressorCreationFailed,

    /// Compression operation failed
    #[error("Failed to compress payload of {payload_size} bytes")]
    CompressionFailed { payload_size: usize },

    /// Decompression operation failed (SECURITY: potentially malicious payload)
    #[error("Failed to decompress payload of {payload_size} bytes (possible malformed or malicious data)")]
    DecompressionFailed { payload_size: usize },
}
