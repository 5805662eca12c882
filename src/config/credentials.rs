//! 后端凭据：校验、规范化与导出

use super::Settings;
use crate::error::{LaunchError, Result};
use crate::types::{
    EnvTable, REQUIRED_CREDENTIALS, SUPABASE_BUCKET, SUPABASE_KEY, SUPABASE_SERVICE_KEY,
    SUPABASE_URL,
};

/// 经过校验的凭据，三个必需值均非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub key: String,
    pub service_key: String,
    pub bucket: Option<String>,
}

impl Credentials {
    /// 校验必需凭据
    ///
    /// 值会先去掉首尾空白；仅含空白视为未设置。所有缺失项一次性报告。
    ///
    /// # Errors
    ///
    /// 任一必需变量缺失或为空时返回 `LaunchError::Configuration`。
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let value = |name: &str| {
            settings
                .get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let (url, key, service_key) = match (
            value(SUPABASE_URL),
            value(SUPABASE_KEY),
            value(SUPABASE_SERVICE_KEY),
        ) {
            (Some(url), Some(key), Some(service_key)) => (url, key, service_key),
            _ => {
                let missing = REQUIRED_CREDENTIALS
                    .into_iter()
                    .filter(|&name| value(name).is_none())
                    .map(String::from)
                    .collect();
                return Err(LaunchError::Configuration(missing));
            }
        };

        let credentials = Self {
            url: normalize_base_url(&url),
            key,
            service_key,
            bucket: value(SUPABASE_BUCKET),
        };

        if credentials.key == credentials.service_key {
            log::warn!(
                "{} 与 {} 的值相同，请确认没有误用服务角色密钥",
                SUPABASE_KEY,
                SUPABASE_SERVICE_KEY
            );
        }

        Ok(credentials)
    }

    /// 写入子进程环境
    ///
    /// 未配置存储桶时清除继承的空白值，由应用使用自己的默认桶。
    pub fn export(&self, env: &mut EnvTable) {
        env.set(SUPABASE_URL, &self.url);
        env.set(SUPABASE_KEY, &self.key);
        env.set(SUPABASE_SERVICE_KEY, &self.service_key);
        match &self.bucket {
            Some(bucket) => env.set(SUPABASE_BUCKET, bucket),
            None => {
                env.unset(SUPABASE_BUCKET);
            }
        }
    }
}

/// 补全 https:// 前缀并去掉结尾的 /
pub fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Settings {
        [
            (SUPABASE_URL, "example.supabase.co/"),
            (SUPABASE_KEY, " anon "),
            (SUPABASE_SERVICE_KEY, "service"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_valid_credentials_are_normalized() {
        let creds = Credentials::from_settings(&complete()).unwrap();
        assert_eq!(creds.url, "https://example.supabase.co");
        assert_eq!(creds.key, "anon");
        assert_eq!(creds.service_key, "service");
        assert_eq!(creds.bucket, None);
    }

    #[test]
    fn test_each_missing_credential_is_rejected() {
        for name in REQUIRED_CREDENTIALS {
            let mut settings = complete();
            settings.remove(name);
            match Credentials::from_settings(&settings) {
                Err(LaunchError::Configuration(missing)) => assert_eq!(missing, vec![name]),
                other => panic!("{} 缺失时应报错, 实际: {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_blank_credential_is_rejected() {
        for name in REQUIRED_CREDENTIALS {
            let mut settings = complete();
            settings.insert(name.to_string(), "   ".to_string());
            assert!(matches!(
                Credentials::from_settings(&settings),
                Err(LaunchError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_all_missing_reported_together() {
        match Credentials::from_settings(&Settings::new()) {
            Err(LaunchError::Configuration(missing)) => assert_eq!(missing.len(), 3),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_export_writes_env() {
        let mut settings = complete();
        settings.insert(SUPABASE_BUCKET.to_string(), "sessions".to_string());
        let creds = Credentials::from_settings(&settings).unwrap();

        let mut env = EnvTable::new();
        creds.export(&mut env);
        assert_eq!(env.get(SUPABASE_URL), Some("https://example.supabase.co"));
        assert_eq!(env.get(SUPABASE_KEY), Some("anon"));
        assert_eq!(env.get(SUPABASE_BUCKET), Some("sessions"));
    }

    #[test]
    fn test_blank_bucket_is_removed_from_env() {
        let mut settings = complete();
        settings.insert(SUPABASE_BUCKET.to_string(), "  ".to_string());
        let creds = Credentials::from_settings(&settings).unwrap();
        assert_eq!(creds.bucket, None);

        let mut env: EnvTable = [(SUPABASE_BUCKET, "  ")].into_iter().collect();
        creds.export(&mut env);
        assert!(!env.contains(SUPABASE_BUCKET));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://localhost:54321/"), "http://localhost:54321");
        assert_eq!(normalize_base_url(" https://x.supabase.co// "), "https://x.supabase.co");
        assert_eq!(normalize_base_url("x.supabase.co"), "https://x.supabase.co");
    }
}
