use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::calculator::PastePolicy;
use crate::scheme::InputScheme;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 계산 세션 관련 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// 시작 시 활성 입력 방식 번호(0~5)
    pub initial_scheme: usize,
    /// 붙여넣기 시 기존 기록 처리 방식
    pub paste_policy: PastePolicy,
    /// 복사/붙여넣기 연타 방지 간격 [ms]
    pub debounce_ms: u64,
    /// 시작할 때 기준 상태를 한 번 계산해 테이블에 넣을지
    pub compute_on_start: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_scheme: 0,
            paste_policy: PastePolicy::Replace,
            debounce_ms: 500,
            compute_on_start: true,
        }
    }
}

impl SessionConfig {
    /// 범위 밖 번호는 기본 방식(P, T)으로 되돌린다.
    pub fn initial_scheme(&self) -> InputScheme {
        InputScheme::from_index(self.initial_scheme).unwrap_or_default()
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "auto", "ko", "en" 등
    pub language: String,
    /// 언어팩(<code>.toml) 디렉터리
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_pack_dir: Option<String>,
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            session: SessionConfig::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 만들어 저장한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// 명령행 인자가 없으면 작업 디렉터리의 config.toml을 쓴다.
pub fn resolve_path(cli_path: Option<PathBuf>) -> PathBuf {
    cli_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
