use serde::Deserialize;
use std::path::PathBuf;

/// Settings read from an optional TOML config file. Every field has a
/// command-line counterpart; flags win over the file.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub data: Option<PathBuf>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("reportmap.toml"));
    paths.push(PathBuf::from(".reportmap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("reportmap").join("config.toml"));
        paths.push(config_dir.join("reportmap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".reportmap.toml"));
        paths.push(home.join(".config").join("reportmap").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_parses() {
        let config: FileConfig = toml::from_str(
            r#"
            address = "1 City Hall Square, Boston"
            radius = 500.0
            "#,
        )
        .unwrap();

        assert_eq!(config.address.as_deref(), Some("1 City Hall Square, Boston"));
        assert_eq!(config.radius, Some(500.0));
        assert!(config.data.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_empty_config_parses() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.address.is_none());
        assert!(config.year.is_none());
    }
}
