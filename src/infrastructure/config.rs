use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct StudioConfig {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub generation: GenerationSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

pub fn load_studio_config() -> anyhow::Result<StudioConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/studio"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_server_fields() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                "[server]\n\
                 [catalog]\nbase_url = \"http://catalog.local\"\n\
                 [generation]\nbase_url = \"http://gen.local\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let parsed: StudioConfig = settings.try_deserialize().unwrap();
        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.server.port, 8080);
        assert!(parsed.catalog.token.is_empty());
    }
}
