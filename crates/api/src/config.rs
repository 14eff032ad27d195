use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub upload_dir: PathBuf,
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            upload_dir: PathBuf::from("data/uploads"),
            generation: GenerationConfig {
                base_url: "https://api.openai.com/v1".to_string(),
                api_key: String::new(),
                model: extract::DEFAULT_MODEL.to_string(),
                temperature: extract::DEFAULT_TEMPERATURE,
            },
        }
    }
}

impl AppConfig {
    /// Build the config from the environment, falling back to defaults for
    /// anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.generation.base_url = url;
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.generation.api_key = key;
        }
        if let Ok(model) = std::env::var("EXTRACTION_MODEL") {
            config.generation.model = model;
        }
        if let Ok(temp) = std::env::var("EXTRACTION_TEMPERATURE") {
            match temp.parse() {
                Ok(t) => config.generation.temperature = t,
                Err(_) => {
                    tracing::warn!(value = %temp, "invalid EXTRACTION_TEMPERATURE, keeping default")
                }
            }
        }

        config
    }
}
