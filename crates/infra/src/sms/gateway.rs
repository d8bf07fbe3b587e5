//! HTTP SMS ゲートウェイ実装
//!
//! `POST {base_url}/sms` に [`SmsMessage`] を JSON で送り、
//! `{"sent": bool, "error": string?}` 形式の応答を受け取る。

use async_trait::async_trait;
use returnflow_domain::notification::{SmsDelivery, SmsMessage};

use super::SmsSender;

/// HTTP SMS ゲートウェイクライアント
#[derive(Debug, Clone)]
pub struct HttpSmsSender {
    base_url: String,
    client:   reqwest::Client,
}

impl HttpSmsSender {
    /// 新しい HTTP SMS 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `base_url`: ゲートウェイのベース URL（例: `http://localhost:14010`）
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client:   reqwest::Client::new(),
        }
    }

    async fn post(&self, sms: &SmsMessage) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(format!("{}/sms", self.base_url))
            .json(sms)
            .send()
            .await
    }
}

/// ゲートウェイの応答を SmsDelivery に変換する
async fn handle_response(response: reqwest::Response) -> SmsDelivery {
    let status = response.status();

    if status.is_success() {
        return match response.json::<SmsDelivery>().await {
            Ok(delivery) => delivery,
            Err(e) => SmsDelivery::failed(format!("SMS ゲートウェイの応答が不正: {e}")),
        };
    }

    let body = response.text().await.unwrap_or_default();
    SmsDelivery::failed(format!("SMS ゲートウェイがステータス {status} を返しました: {body}"))
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    async fn send_sms(&self, sms: &SmsMessage) -> SmsDelivery {
        match self.post(sms).await {
            Ok(response) => handle_response(response).await,
            Err(e) => SmsDelivery::failed(format!("SMS ゲートウェイへの接続に失敗: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// テスト用の HTTP レスポンスを構築する
    fn make_response(status: u16, body: &str) -> reqwest::Response {
        let http_resp = http::Response::builder()
            .status(status)
            .header("content-type", "application/json")
            .body(body.to_string())
            .unwrap();
        reqwest::Response::from(http_resp)
    }

    #[tokio::test]
    async fn test_送信成功の応答をそのまま返す() {
        let response = make_response(200, r#"{"sent": true}"#);

        assert_eq!(handle_response(response).await, SmsDelivery::delivered());
    }

    #[tokio::test]
    async fn test_送信失敗の応答はエラーメッセージを保持する() {
        let response = make_response(200, r#"{"sent": false, "error": "carrier rejected"}"#);

        assert_eq!(
            handle_response(response).await,
            SmsDelivery::failed("carrier rejected")
        );
    }

    #[tokio::test]
    async fn test_不正なjsonは送信失敗になる() {
        let response = make_response(200, "not json");

        let delivery = handle_response(response).await;

        assert!(!delivery.sent);
        assert!(
            delivery
                .error
                .is_some_and(|e| e.starts_with("SMS ゲートウェイの応答が不正"))
        );
    }

    #[tokio::test]
    async fn test_エラーステータスは本文付きで送信失敗になる() {
        let response = make_response(503, "maintenance");

        assert_eq!(
            handle_response(response).await,
            SmsDelivery::failed("SMS ゲートウェイがステータス 503 Service Unavailable を返しました: maintenance")
        );
    }

    #[test]
    fn test_newは末尾のスラッシュを取り除く() {
        let sender = HttpSmsSender::new("http://localhost:14010/");
        assert_eq!(sender.base_url, "http://localhost:14010");
    }
}
