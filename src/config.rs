use crate::Message;
use crate::theme::Mode;
use directories::ProjectDirs;
use iced::Task;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tokio::fs::DirBuilder;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

fn default_theme() -> String {
    "peach".to_string()
}

fn default_favorites() -> Vec<String> {
    ["❤️", "👍", "😂", "🔥", "🙏"].map(str::to_string).to_vec()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: Mode,
    /// Name of the bubble gradient theme
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Quick reactions offered by the context menu, in display order
    #[serde(default = "default_favorites")]
    pub favorite_emojis: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            theme: default_theme(),
            favorite_emojis: default_favorites(),
        }
    }
}

// Private methods for async reading and writing of config files
async fn load(config_path: PathBuf) -> io::Result<Config> {
    let config_str = tokio::fs::read_to_string(config_path).await?;
    toml::from_str(&config_str).map_err(io::Error::other)
}

async fn save(config_path: PathBuf, config: Config) -> io::Result<()> {
    let mut config_file = File::create(&config_path).await?;
    let config_str = toml::to_string(&config).map_err(io::Error::other)?;
    config_file.write_all(config_str.as_bytes()).await?;
    config_file.sync_all().await
}

async fn create(config_path: PathBuf) -> io::Result<()> {
    if let Some(parent) = config_path.parent() {
        DirBuilder::new().recursive(true).create(parent).await?;
    }
    let config_file = File::create(&config_path).await?;
    config_file.sync_all().await
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("net", "Auren", "auren-chat")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Use `save_config` to save the config to disk from the UI
pub fn save_config(config: &Config) -> Task<Message> {
    match config_path() {
        Some(config_path) => Task::perform(save(config_path.clone(), config.clone()), {
            move |result| match result {
                Ok(_) => Message::None,
                Err(e) => Message::AppError(
                    format!(
                        "Error saving config file: '{}'",
                        config_path.to_string_lossy()
                    ),
                    e.to_string(),
                ),
            }
        }),
        None => Task::none(),
    }
}

/// Use `load_config` to load the config from disk from the UI
pub fn load_config() -> Task<Message> {
    match config_path() {
        Some(config_path) => {
            if config_path.exists() {
                Task::perform(load(config_path.clone()), {
                    move |result| match result {
                        Ok(config) => Message::NewConfig(config),
                        Err(e) => Message::AppError(
                            format!(
                                "Error loading config file: '{}'",
                                config_path.to_string_lossy()
                            ),
                            e.to_string(),
                        ),
                    }
                })
            } else {
                // Create the config file so that it can be relied upon to always exist later on
                Task::perform(create(config_path.clone()), {
                    move |result| match result {
                        Ok(_) => Message::None,
                        Err(e) => Message::AppError(
                            format!(
                                "Error creating config file: '{}'",
                                config_path.to_string_lossy()
                            ),
                            e.to_string(),
                        ),
                    }
                })
            }
        }
        None => Task::none(),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Config, load, save};
    use crate::theme::Mode;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.mode, Mode::Dark);
        assert_eq!(config.theme, "peach");
        assert_eq!(config.favorite_emojis.len(), 5);
    }

    #[tokio::test]
    async fn creates_file() {
        let tempdir = tempfile::Builder::new()
            .prefix("auren-chat")
            .tempdir()
            .expect("Could not create a temp dir for test");
        save(tempdir.path().join("config.toml"), Config::default())
            .await
            .expect("Could not save config file");
        assert!(tempdir.path().join("config.toml").exists());
    }

    #[tokio::test]
    async fn loads_default() {
        let tempdir = tempfile::Builder::new()
            .prefix("auren-chat")
            .tempdir()
            .expect("Could not create a temp dir for test");
        save(tempdir.path().join("config.toml"), Config::default())
            .await
            .expect("Could not save config file");
        let returned = load(tempdir.path().join("config.toml"))
            .await
            .expect("Could not load config file");
        assert_eq!(returned.theme, "peach");
    }

    #[tokio::test]
    async fn theme_and_mode_saved() {
        let config = Config {
            mode: Mode::Light,
            theme: "midnight".to_string(),
            favorite_emojis: vec!["🎈".to_string()],
        };

        let tempdir = tempfile::Builder::new()
            .prefix("auren-chat")
            .tempdir()
            .expect("Could not create a temp dir for test");
        save(tempdir.path().join("config.toml"), config)
            .await
            .expect("Could not save config file");

        let returned = load(tempdir.path().join("config.toml"))
            .await
            .expect("Could not load config file");
        assert_eq!(returned.mode, Mode::Light);
        assert_eq!(returned.theme, "midnight");
        assert_eq!(returned.favorite_emojis, vec!["🎈".to_string()]);
    }

    #[tokio::test]
    async fn empty_file_falls_back_to_defaults() {
        let tempdir = tempfile::Builder::new()
            .prefix("auren-chat")
            .tempdir()
            .expect("Could not create a temp dir for test");
        tokio::fs::write(tempdir.path().join("config.toml"), "")
            .await
            .expect("Could not write empty config file");

        let returned = load(tempdir.path().join("config.toml"))
            .await
            .expect("Could not load config file");
        assert_eq!(returned.theme, "peach");
    }
}
