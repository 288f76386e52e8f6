//! Project configuration loaded from prevu.toml.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Configuration file structure (prevu.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub serve: ServeSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    /// Command that produces the output directory
    #[serde(default = "default_command")]
    pub command: String,
    /// Directory the build writes deployable assets into
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ServeSettings {
    #[serde(default = "default_serve_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct PreviewSettings {
    #[serde(default = "default_preview_port")]
    pub port: u16,
    /// Allow the preview server to expose dotfiles such as .env
    #[serde(default)]
    pub expose_env: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            command: default_command(),
            out_dir: default_out_dir(),
        }
    }
}

impl Default for ServeSettings {
    fn default() -> Self {
        Self {
            port: default_serve_port(),
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            port: default_preview_port(),
            expose_env: false,
        }
    }
}

fn default_command() -> String {
    "npm run build".to_string()
}
fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}
fn default_serve_port() -> u16 {
    3000
}
fn default_preview_port() -> u16 {
    8080
}

/// Load configuration from the given path if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load(Path::new("does-not-exist.toml")).unwrap();
        assert_eq!(config.build.command, "npm run build");
        assert_eq!(config.build.out_dir, PathBuf::from("dist"));
        assert_eq!(config.serve.port, 3000);
        assert_eq!(config.preview.port, 8080);
        assert!(!config.preview.expose_env);
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prevu.toml");
        fs::write(&path, "[build]\ncommand = \"pnpm build\"\n").unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.build.command, "pnpm build");
        assert_eq!(config.build.out_dir, PathBuf::from("dist"));
        assert_eq!(config.preview.port, 8080);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prevu.toml");
        fs::write(&path, "[build\ncommand = 3").unwrap();

        let err = load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn full_file_overrides_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prevu.toml");
        fs::write(
            &path,
            r#"
[build]
command = "yarn build"
out_dir = "public"

[serve]
port = 4000

[preview]
port = 9090
expose_env = true
"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.build.command, "yarn build");
        assert_eq!(config.build.out_dir, PathBuf::from("public"));
        assert_eq!(config.serve.port, 4000);
        assert_eq!(config.preview.port, 9090);
        assert!(config.preview.expose_env);
    }
}
