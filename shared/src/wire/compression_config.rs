/// Largest decoded envelope accepted by default
pub const DEFAULT_MAX_DECODED_SIZE: usize = 4 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompressionMode {
    /// Envelopes travel as plain JSON
    Disabled,
    /// zstd at the given compression level
    Default(i32),
    /// zstd at the given compression level, primed with a shared dictionary
    Dictionary(i32, Vec<u8>),
}

#[derive(Clone, Debug)]
pub struct CompressionConfig {
    pub mode: CompressionMode,
    /// Upper bound on the decoded size of one envelope, in bytes
    pub max_decoded_size: usize,
}

impl CompressionConfig {
    pub fn new(mode: CompressionMode) -> Self {
        Self {
            mode,
            max_decoded_size: DEFAULT_MAX_DECODED_SIZE,
        }
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self::new(CompressionMode::Disabled)
    }
}
