use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// 后端基础地址的环境变量，优先级高于配置文件
pub const BACKEND_URL_ENV: &str = "TAPROOT_BACKEND_URL";

fn default_backend_url() -> String {
    "http://127.0.0.1:4000".to_string()
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// 后端基础地址（不带末尾斜杠）
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// 更新成功后是否用后端回显覆盖本地标题。
    /// 默认关闭：本地标题保持旧值，直到下次重新加载。
    #[serde(default)]
    pub reconcile_updates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            reconcile_updates: false,
        }
    }
}

impl Config {
    /// 配置文件路径 (~/.config/taproot/config.toml)
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taproot").join("config.toml"))
    }

    /// 加载配置：读配置文件（缺失时用默认值），环境变量覆盖后端地址
    pub fn load() -> anyhow::Result<Self> {
        let env_url = env::var(BACKEND_URL_ENV).ok().filter(|v| !v.is_empty());
        match Self::config_path() {
            Some(path) => Self::load_from(&path, env_url),
            None => Self::from_sources(None, env_url),
        }
    }

    /// 从指定路径加载配置文件
    pub fn load_from(path: &Path, env_url: Option<String>) -> anyhow::Result<Self> {
        let content = if path.exists() {
            Some(
                fs::read_to_string(path)
                    .with_context(|| format!("读取配置文件失败: {}", path.display()))?,
            )
        } else {
            None
        };
        Self::from_sources(content.as_deref(), env_url)
    }

    /// 由配置文件内容和环境变量合成配置（纯函数，便于测试）
    pub fn from_sources(file: Option<&str>, env_url: Option<String>) -> anyhow::Result<Self> {
        let mut config: Config = match file {
            Some(content) => toml::from_str(content).context("解析配置文件失败")?,
            None => Self::default(),
        };

        if let Some(url) = env_url {
            config.backend_url = url;
        }

        // 统一去掉末尾斜杠，拼接请求路径时再补
        config.backend_url = config.backend_url.trim_end_matches('/').to_string();

        Ok(config)
    }
}
