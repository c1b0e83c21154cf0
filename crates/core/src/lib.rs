pub mod batch;
pub mod config;
pub mod converter;
pub mod testing;
pub mod workspace;

pub use batch::{BatchRunner, BatchSummary, ConversionRecord, FailureRecord};
pub use config::{load_config, load_config_from_env, load_config_from_str, Config, ConfigError};
pub use converter::{
    ConversionJob, ConversionProgress, ConversionResult, Converter, ConverterConfig,
    ConverterError, EncoderCapabilities, EncodingProfile, FfmpegConverter, MediaInfo,
    OUTPUT_EXTENSION,
};
pub use workspace::{
    ensure_workspace, is_convertible, list_convertible_inputs, WorkspaceConfig, WorkspaceError,
    CONVERTIBLE_EXTENSIONS,
};
