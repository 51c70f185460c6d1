use crate::common::*;

use crate::model::chart::style::*;
use crate::model::configs::{
    font_config::*, netdata_config::*, ping_config::*, system_config::*,
};

use crate::utils_modules::io_utils::*;

#[doc = r#"
    Whole server configuration, read once at startup from the TOML file at `SERVER_CONFIG_PATH`.

    Only `[font]` and `[netdata]` are mandatory. The remaining sections fall back to their defaults,
    so a minimal file only names the font and the metrics source.
"#]
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct TotalConfig {
    pub font: FontConfig,
    #[serde(default)]
    pub chart: ChartStyle,
    pub netdata: NetdataConfig,
    #[serde(default)]
    pub ping: PingConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

impl TotalConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        read_toml_from_file::<TotalConfig>(path).with_context(|| {
            format!("[TotalConfig->load] Failed to convert '{path}' into the TotalConfig structure.")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_gets_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            r#"
[font]
path = "/usr/share/fonts/ipaexg.ttf"

[netdata]
base_url = "http://localhost:19999"
"#,
        )
        .unwrap();

        let config: TotalConfig = TotalConfig::load(&file.path().to_string_lossy()).unwrap();

        assert_eq!(config.font().path(), "/usr/share/fonts/ipaexg.ttf");
        assert_eq!(*config.netdata().points(), 20);
        assert_eq!(*config.netdata().after_secs(), -600);
        assert_eq!(config.netdata().group(), "max");
        assert_eq!(config.netdata().default_chart(), "system.cpu");
        assert_eq!(*config.ping().default_try_count(), 3);
        assert_eq!(*config.ping().max_try_count(), 10);
        assert_eq!(*config.ping().max_hosts(), 16);
        assert_eq!(*config.system().default_width(), 640);
        assert_eq!(*config.system().default_height(), 480);
        assert_eq!(*config.chart().caption_max_font_size(), 72.0);
    }

    #[test]
    fn sections_override_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            r##"
[font]
path = "font.ttf"

[chart]
border_width = 1
font_color = "#000000"

[netdata]
base_url = "http://netdata:19999"
points = 60

[ping]
timeout_secs = 1
max_hosts = 4

[system]
default_width = 800
"##,
        )
        .unwrap();

        let config: TotalConfig = TotalConfig::load(&file.path().to_string_lossy()).unwrap();

        assert_eq!(*config.chart().border_width(), 1);
        assert_eq!(config.chart().font_color().a, 0xff);
        assert_eq!(*config.netdata().points(), 60);
        assert_eq!(*config.ping().timeout_secs(), 1);
        assert_eq!(*config.ping().default_try_count(), 3);
        assert_eq!(*config.ping().max_hosts(), 4);
        assert_eq!(*config.system().default_width(), 800);
        assert_eq!(*config.system().default_height(), 480);
    }

    #[test]
    fn missing_font_section_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "[netdata]\nbase_url = \"http://x\"\n").unwrap();
        assert!(TotalConfig::load(&file.path().to_string_lossy()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(TotalConfig::load("/nonexistent/makechart/server.toml").is_err());
    }
}
