//! # Core Service 設定
//!
//! 環境変数から Core Service サーバーの設定を読み込む。
//!
//! 読み込み元は関数として受け取るため、テストでは環境変数を書き換えずに
//! 任意の値を与えられる。

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Core Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// 参照データの PostgreSQL 接続 URL
    pub database_url: String,
    /// メール送信設定
    pub notification: NotificationConfig,
    /// SMS 送信設定
    pub sms:          SmsConfig,
}

/// メール送信バックエンド
///
/// `NOTIFICATION_BACKEND` 環境変数で切り替える:
/// - `smtp`: SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationConfig {
    Smtp { host: String, port: u16 },
    Noop,
}

/// SMS 送信バックエンド
///
/// `SMS_BACKEND` 環境変数で切り替える:
/// - `http`: `SMS_GATEWAY_URL` の HTTP ゲートウェイへ送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsConfig {
    Http { gateway_url: String },
    Noop,
}

impl CoreConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の読み込み元から設定を組み立てる
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host:         lookup("CORE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:         parse_port("CORE_PORT", &require(&lookup, "CORE_PORT")?)?,
            database_url: require(&lookup, "DATABASE_URL")?,
            notification: NotificationConfig::from_lookup(&lookup)?,
            sms:          SmsConfig::from_lookup(&lookup)?,
        })
    }
}

impl NotificationConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = lookup("NOTIFICATION_BACKEND").unwrap_or_else(|| "noop".to_string());
        match backend.as_str() {
            "smtp" => {
                let port = lookup("SMTP_PORT").unwrap_or_else(|| "1025".to_string());
                Ok(Self::Smtp {
                    host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                    port: parse_port("SMTP_PORT", &port)?,
                })
            }
            "noop" => Ok(Self::Noop),
            _ => Err(ConfigError::Invalid {
                name:  "NOTIFICATION_BACKEND",
                value: backend,
            }),
        }
    }
}

impl SmsConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = lookup("SMS_BACKEND").unwrap_or_else(|| "noop".to_string());
        match backend.as_str() {
            "http" => Ok(Self::Http {
                gateway_url: require(lookup, "SMS_GATEWAY_URL")?,
            }),
            "noop" => Ok(Self::Noop),
            _ => Err(ConfigError::Invalid {
                name:  "SMS_BACKEND",
                value: backend,
            }),
        }
    }
}

fn require(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CoreConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CoreConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_必須項目だけでデフォルト値が設定される() {
        let config = load(&[
            ("CORE_PORT", "13001"),
            ("DATABASE_URL", "postgres://localhost/returnflow"),
        ])
        .unwrap();

        assert_eq!(
            config,
            CoreConfig {
                host:         "0.0.0.0".to_string(),
                port:         13001,
                database_url: "postgres://localhost/returnflow".to_string(),
                notification: NotificationConfig::Noop,
                sms:          SmsConfig::Noop,
            }
        );
    }

    #[test]
    fn test_smtpとhttpバックエンドを読み込める() {
        let config = load(&[
            ("CORE_PORT", "13001"),
            ("DATABASE_URL", "postgres://localhost/returnflow"),
            ("NOTIFICATION_BACKEND", "smtp"),
            ("SMTP_HOST", "mail.internal"),
            ("SMTP_PORT", "2525"),
            ("SMS_BACKEND", "http"),
            ("SMS_GATEWAY_URL", "http://sms.internal"),
        ])
        .unwrap();

        assert_eq!(
            config.notification,
            NotificationConfig::Smtp {
                host: "mail.internal".to_string(),
                port: 2525,
            }
        );
        assert_eq!(
            config.sms,
            SmsConfig::Http {
                gateway_url: "http://sms.internal".to_string(),
            }
        );
    }

    #[test]
    fn test_core_port未設定はエラーになる() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/returnflow")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("CORE_PORT"));
    }

    #[test]
    fn test_不正なポート番号はエラーになる() {
        let err = load(&[
            ("CORE_PORT", "http"),
            ("DATABASE_URL", "postgres://localhost/returnflow"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                name:  "CORE_PORT",
                value: "http".to_string(),
            }
        );
    }

    #[test]
    fn test_httpバックエンドはゲートウェイurlが必須() {
        let err = load(&[
            ("CORE_PORT", "13001"),
            ("DATABASE_URL", "postgres://localhost/returnflow"),
            ("SMS_BACKEND", "http"),
        ])
        .unwrap_err();

        assert_eq!(err, ConfigError::Missing("SMS_GATEWAY_URL"));
    }

    #[test]
    fn test_未知のバックエンドはエラーになる() {
        let err = load(&[
            ("CORE_PORT", "13001"),
            ("DATABASE_URL", "postgres://localhost/returnflow"),
            ("NOTIFICATION_BACKEND", "ses"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::Invalid {
                name:  "NOTIFICATION_BACKEND",
                value: "ses".to_string(),
            }
        );
    }
}
