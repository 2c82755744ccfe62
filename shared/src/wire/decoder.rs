use super::{envelope::WireEnvelope, error::CodecError};

fn deserialize(payload: &[u8]) -> Result<WireEnvelope, CodecError> {
    serde_json::from_slice(payload).map_err(|error| CodecError::DeserializeFailed {
        payload_size: payload.len(),
        reason: error.to_string(),
    })
}

fn check_size(payload_size: usize, max_size: usize) -> Result<(), CodecError> {
    if payload_size > max_size {
        return Err(CodecError::PayloadTooLarge {
            payload_size,
            max_size,
        });
    }
    Ok(())
}

cfg_if! {
    if #[cfg(feature = "zstd_support")]
    {
        use zstd::bulk::Decompressor;

        use super::compression_config::{CompressionConfig, CompressionMode};

        pub struct EnvelopeDecoder {
            decompressor: Option<Decompressor<'static>>,
            max_decoded_size: usize,
        }

        impl EnvelopeDecoder {
            /// Try to create a new EnvelopeDecoder with the specified compression settings
            pub fn try_new(config: &CompressionConfig) -> Result<Self, CodecError> {
                let decompressor = match &config.mode {
                    CompressionMode::Disabled => None,
                    CompressionMode::Default(_) => Some(
                        Decompressor::new().map_err(|_| CodecError::DecompressorCreationFailed)?,
                    ),
                    CompressionMode::Dictionary(_, dictionary) => Some(
                        Decompressor::with_dictionary(dictionary)
                            .map_err(|_| CodecError::DecompressorCreationFailed)?,
                    ),
                };

                Ok(Self {
                    decompressor,
                    max_decoded_size: config.max_decoded_size,
                })
            }

            /// Create a new EnvelopeDecoder with the specified compression settings
            ///
            /// # Panics
            /// Panics if the decompressor cannot be created with the given configuration
            pub fn new(config: &CompressionConfig) -> Self {
                Self::try_new(config).expect("Failed to create EnvelopeDecoder")
            }

            /// SECURITY: This method processes untrusted network data. Any malformed or
            /// malicious payload will return an error instead of panicking.
            pub fn decode(&mut self, payload: &[u8]) -> Result<WireEnvelope, CodecError> {
                match &mut self.decompressor {
                    Some(decompressor) => {
                        let decompressed = decompressor
                            .decompress(payload, self.max_decoded_size)
                            .map_err(|_| CodecError::DecompressionFailed {
                                payload_size: payload.len(),
                            })?;
                        deserialize(&decompressed)
                    }
                    None => {
                        check_size(payload.len(), self.max_decoded_size)?;
                        deserialize(payload)
                    }
                }
            }
        }
    }
    else
    {
        use super::compression_config::CompressionConfig;

        pub struct EnvelopeDecoder {
            max_decoded_size: usize,
        }

        impl EnvelopeDecoder {
            pub fn try_new(config: &CompressionConfig) -> Result<Self, CodecError> {
                Ok(Self {
                    max_decoded_size: config.max_decoded_size,
                })
            }

            pub fn new(config: &CompressionConfig) -> Self {
                Self::try_new(config).expect("Failed to create EnvelopeDecoder")
            }

            /// SECURITY: This method processes untrusted network data. Any malformed
            /// payload will return an error instead of panicking.
            pub fn decode(&mut self, payload: &[u8]) -> Result<WireEnvelope, CodecError> {
                check_size(payload.len(), self.max_decoded_size)?;
                deserialize(payload)
            }
        }
    }
}
