use super::{envelope::WireEnvelope, error::CodecError};

fn serialize(envelope: &WireEnvelope) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(envelope).map_err(|error| CodecError::SerializeFailed {
        reason: error.to_string(),
    })
}

cfg_if! {
    if #[cfg(feature = "zstd_support")]
    {
        use zstd::bulk::Compressor;

        use super::compression_config::{CompressionConfig, CompressionMode};

        pub struct EnvelopeEncoder {
            compressor: Option<Compressor<'static>>,
        }

        impl EnvelopeEncoder {
            /// Try to create a new EnvelopeEncoder with the specified compression settings
            pub fn try_new(config: &CompressionConfig) -> Result<Self, CodecError> {
                let compressor = match &config.mode {
                    CompressionMode::Disabled => None,
                    CompressionMode::Default(level) => Some(
                        Compressor::new(*level)
                            .map_err(|_| CodecError::CompressorCreationFailed { level: *level })?,
                    ),
                    CompressionMode::Dictionary(level, dictionary) => Some(
                        Compressor::with_dictionary(*level, dictionary)
                            .map_err(|_| CodecError::CompressorCreationFailed { level: *level })?,
                    ),
                };

                Ok(Self { compressor })
            }

            /// Create a new EnvelopeEncoder with the specified compression settings
            ///
            /// # Panics
            /// Panics if the compressor cannot be created with the given configuration
            pub fn new(config: &CompressionConfig) -> Self {
                Self::try_new(config).expect("Failed to create EnvelopeEncoder")
            }

            pub fn encode(&mut self, envelope: &WireEnvelope) -> Result<Vec<u8>, CodecError> {
                let payload = serialize(envelope)?;
                match &mut self.compressor {
                    Some(compressor) => compressor
                        .compress(&payload)
                        .map_err(|_| CodecError::CompressionFailed {
                            payload_size: payload.len(),
                        }),
                    None => Ok(payload),
                }
            }
        }
    }
    else
    {
        use log::warn;

        use super::compression_config::{CompressionConfig, CompressionMode};

        pub struct EnvelopeEncoder;

        impl EnvelopeEncoder {
            pub fn try_new(config: &CompressionConfig) -> Result<Self, CodecError> {
                if config.mode != CompressionMode::Disabled {
                    warn!("EnvelopeEncoder: compression requested but the `zstd_support` feature is disabled, sending plain JSON");
                }
                Ok(Self)
            }

            pub fn new(config: &CompressionConfig) -> Self {
                Self::try_new(config).expect("Failed to create EnvelopeEncoder")
            }

            pub fn encode(&mut self, envelope: &WireEnvelope) -> Result<Vec<u8>, CodecError> {
                serialize(envelope)
            }
        }
    }
}
