use crate::error::{NetSizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 既定のサイズカタログ（JSON）
    pub catalog_path: Option<PathBuf>,
    /// 既定の製品ライン（door / window）
    pub product_line: String,
    /// 金額表示の通貨記号
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NetSizerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("net-sizer").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            catalog_path: None,
            product_line: "window".into(),
            currency: "INR".into(),
        }
    }

    /// 引数指定を優先してカタログのパスを決める
    pub fn resolve_catalog(&self, arg: Option<PathBuf>) -> Result<PathBuf> {
        arg.or_else(|| self.catalog_path.clone())
            .ok_or(NetSizerError::MissingCatalog)
    }

    pub fn set_catalog(&mut self, path: PathBuf) -> Result<()> {
        self.catalog_path = Some(path);
        self.save()
    }

    pub fn set_product_line(&mut self, name: String) -> Result<()> {
        self.product_line = name;
        self.save()
    }
}
