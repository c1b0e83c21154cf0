use serde::{Deserialize, Serialize};

use crate::converter::ConverterConfig;
use crate::workspace::WorkspaceConfig;

/// Root configuration
///
/// Every section is optional; an empty file yields the stock setup with
/// `./input` and `./output` next to the process working directory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.workspace.input_dir, PathBuf::from("./input"));
        assert_eq!(config.workspace.output_dir, PathBuf::from("./output"));
        assert_eq!(config.converter.ffmpeg_path, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn test_deserialize_with_workspace_section() {
        let toml = r#"
[workspace]
input_dir = "/srv/media/incoming"
output_dir = "/srv/media/converted"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.workspace.input_dir,
            PathBuf::from("/srv/media/incoming")
        );
        assert_eq!(
            config.workspace.output_dir,
            PathBuf::from("/srv/media/converted")
        );
        // Untouched sections keep their defaults
        assert_eq!(config.converter.ffmpeg_log_level, "warning");
    }

    #[test]
    fn test_deserialize_with_converter_section() {
        let toml = r#"
[converter]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
ffmpeg_log_level = "error"
extra_ffmpeg_args = ["-threads", "2"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.converter.ffmpeg_path,
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
        );
        assert_eq!(config.converter.ffmpeg_log_level, "error");
        assert_eq!(config.converter.extra_ffmpeg_args, vec!["-threads", "2"]);
        assert_eq!(config.workspace.input_dir, PathBuf::from("./input"));
    }
}
