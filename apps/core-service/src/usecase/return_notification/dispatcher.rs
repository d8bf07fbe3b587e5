//! # 通知ディスパッチャー
//!
//! 組み立て済みのテンプレートコンテキストを 3 つのチャネルに送る。
//!
//! ## チャネル
//!
//! | チャネル | 条件 | 成功フラグ |
//! |---------|------|-----------|
//! | 従業員メール | 送信元アドレスと購読者が 1 件以上 | 送信を試みた時点で true |
//! | 顧客メール | ステータス変更で遷移先あり、送信元と顧客アドレスあり | 送信を試みた時点で true |
//! | 顧客 SMS | ステータス変更で遷移先あり、携帯番号あり | ゲートウェイの応答をそのまま記録 |
//!
//! ## 並行性
//!
//! 3 チャネルは `tokio::join!` で並行に実行し、従業員メールは宛先ごとに
//! `JoinSet` のタスクとして送る。いずれかの失敗が他の送信を止めることはなく、
//! すべての送信が完了してから結果を返す。
//!
//! 送信の問題はログに記録するだけで、呼び出し側にエラーは返さない。

use std::sync::Arc;

use returnflow_domain::{
    contractor::Contractor,
    notification::{
        EmailMessage,
        GOODS_RETURN_PERMIT,
        MessageKey,
        MessageParams,
        NotificationChannel,
        NotificationError,
        NotificationEvent,
        NotificationKind,
        NotificationResult,
        SmsMessage,
        SmsOutcome,
    },
    reseller::ResellerId,
    template::TemplateContext,
};
use returnflow_infra::{
    notification::NotificationSender,
    repository::NotificationSettingsRepository,
    sms::SmsSender,
};
use returnflow_shared::{
    event_log::{error, event},
    log_business_event,
};
use tokio::task::JoinSet;

use crate::usecase::template_renderer::MessageRenderer;

const EVENT: NotificationEvent = NotificationEvent::ChangeReturnStatus;

/// 通知ディスパッチャー
pub struct NotificationDispatcher {
    settings_repo: Arc<dyn NotificationSettingsRepository>,
    renderer:      Arc<dyn MessageRenderer>,
    email_sender:  Arc<dyn NotificationSender>,
    sms_sender:    Arc<dyn SmsSender>,
}

/// 件名と本文
struct RenderedEmail {
    subject: String,
    body:    String,
}

impl NotificationDispatcher {
    pub fn new(
        settings_repo: Arc<dyn NotificationSettingsRepository>,
        renderer: Arc<dyn MessageRenderer>,
        email_sender: Arc<dyn NotificationSender>,
        sms_sender: Arc<dyn SmsSender>,
    ) -> Self {
        Self {
            settings_repo,
            renderer,
            email_sender,
            sms_sender,
        }
    }

    /// 全チャネルに送信し、チャネルごとの結果を返す
    pub async fn dispatch(
        &self,
        reseller_id: ResellerId,
        kind: NotificationKind,
        client: &Contractor,
        context: &TemplateContext,
    ) -> NotificationResult {
        let params = context.to_params();
        let sender_email = self.sender_email(reseller_id).await;
        let target_status = kind.target_status();

        let (staff_email_sent, client_email_sent, client_sms) = tokio::join!(
            self.send_staff_emails(reseller_id, sender_email.as_deref(), &params),
            self.send_client_email(
                reseller_id,
                target_status,
                sender_email.as_deref(),
                client,
                &params
            ),
            self.send_client_sms(reseller_id, target_status, client, &params),
        );

        NotificationResult {
            staff_email_sent,
            client_email_sent,
            client_sms,
        }
    }

    /// 従業員メール
    ///
    /// 購読者ごとに 1 通ずつ送る。
    async fn send_staff_emails(
        &self,
        reseller_id: ResellerId,
        sender_email: Option<&str>,
        params: &MessageParams,
    ) -> bool {
        let channel = NotificationChannel::StaffEmail;

        let Some(from) = sender_email else {
            log_skipped(channel, reseller_id, "送信元アドレスが未設定");
            return false;
        };

        let recipients = self.subscribed_emails(reseller_id).await;
        if recipients.is_empty() {
            log_skipped(channel, reseller_id, "購読している従業員がいない");
            return false;
        }

        let Some(rendered) = self.render_email(
            channel,
            MessageKey::EmployeeEmailSubject,
            MessageKey::EmployeeEmailBody,
            params,
            reseller_id,
        ) else {
            return false;
        };

        let mut tasks = JoinSet::new();
        for to in recipients {
            let sender = Arc::clone(&self.email_sender);
            let email = EmailMessage {
                from: from.to_string(),
                to,
                subject: rendered.subject.clone(),
                body: rendered.body.clone(),
                reseller_id,
                event: EVENT,
                client_id: None,
                differences_code: None,
            };
            tasks.spawn(async move {
                let result = sender.send_email(&email).await;
                log_email_result(channel, &email, result);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::TASK_JOIN,
                    channel = %channel,
                    "従業員メール送信タスクが異常終了しました: {}",
                    e
                );
            }
        }

        true
    }

    /// 顧客メール
    async fn send_client_email(
        &self,
        reseller_id: ResellerId,
        target_status: Option<i64>,
        sender_email: Option<&str>,
        client: &Contractor,
        params: &MessageParams,
    ) -> bool {
        let channel = NotificationChannel::ClientEmail;

        let Some(to_status) = target_status else {
            log_skipped(channel, reseller_id, "ステータス変更の遷移先がない");
            return false;
        };
        let Some(from) = sender_email else {
            log_skipped(channel, reseller_id, "送信元アドレスが未設定");
            return false;
        };
        let Some(to) = client.email() else {
            log_skipped(channel, reseller_id, "顧客のメールアドレスが未設定");
            return false;
        };

        let Some(rendered) = self.render_email(
            channel,
            MessageKey::ClientEmailSubject,
            MessageKey::ClientEmailBody,
            params,
            reseller_id,
        ) else {
            return false;
        };

        let email = EmailMessage {
            from: from.to_string(),
            to: to.to_string(),
            subject: rendered.subject,
            body: rendered.body,
            reseller_id,
            event: EVENT,
            client_id: Some(client.id()),
            differences_code: Some(to_status),
        };
        let result = self.email_sender.send_email(&email).await;
        log_email_result(channel, &email, result);

        true
    }

    /// 顧客 SMS
    async fn send_client_sms(
        &self,
        reseller_id: ResellerId,
        target_status: Option<i64>,
        client: &Contractor,
        params: &MessageParams,
    ) -> SmsOutcome {
        let channel = NotificationChannel::ClientSms;

        let Some(to_status) = target_status else {
            log_skipped(channel, reseller_id, "ステータス変更の遷移先がない");
            return SmsOutcome::default();
        };
        if client.mobile().is_none() {
            log_skipped(channel, reseller_id, "顧客の携帯電話番号が未設定");
            return SmsOutcome::default();
        }

        let sms = SmsMessage {
            reseller_id,
            client_id: client.id(),
            event: EVENT,
            differences_code: to_status,
            params: params.clone(),
        };
        let delivery = self.sms_sender.send_sms(&sms).await;

        if delivery.sent {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_SENT,
                event.reseller_id = %reseller_id,
                event.result = event::result::SUCCESS,
                notification.channel = %channel,
                notification.client_id = %client.id(),
                "顧客 SMS 送信成功"
            );
        } else {
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.reseller_id = %reseller_id,
                event.result = event::result::FAILURE,
                notification.channel = %channel,
                notification.client_id = %client.id(),
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = error::kind::SMS_TRANSPORT,
                error = delivery.error.as_deref().unwrap_or_default(),
                "顧客 SMS 送信失敗"
            );
        }

        SmsOutcome::from(delivery)
    }

    /// 販売者の送信元アドレス
    ///
    /// 空白のみのアドレスと取得失敗は未設定として扱う。
    async fn sender_email(&self, reseller_id: ResellerId) -> Option<String> {
        match self.settings_repo.find_sender_email(reseller_id).await {
            Ok(email) => email.filter(|e| !e.trim().is_empty()),
            Err(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::DATABASE,
                    reseller_id = %reseller_id,
                    "送信元アドレスの取得に失敗しました: {}",
                    e
                );
                None
            }
        }
    }

    /// 返品通知を購読している従業員のアドレス
    ///
    /// 空白のみのアドレスは除外する。取得に失敗した場合は購読者なしとして扱う。
    async fn subscribed_emails(&self, reseller_id: ResellerId) -> Vec<String> {
        match self
            .settings_repo
            .find_subscribed_emails(reseller_id, GOODS_RETURN_PERMIT)
            .await
        {
            Ok(emails) => emails
                .into_iter()
                .filter(|e| !e.trim().is_empty())
                .collect(),
            Err(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::DATABASE,
                    reseller_id = %reseller_id,
                    "購読メールアドレスの取得に失敗しました: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    fn render_email(
        &self,
        channel: NotificationChannel,
        subject_key: MessageKey,
        body_key: MessageKey,
        params: &MessageParams,
        reseller_id: ResellerId,
    ) -> Option<RenderedEmail> {
        let rendered = self
            .renderer
            .render(subject_key, params, reseller_id)
            .and_then(|subject| {
                let body = self.renderer.render(body_key, params, reseller_id)?;
                Ok(RenderedEmail { subject, body })
            });

        match rendered {
            Ok(rendered) => Some(rendered),
            Err(e) => {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::TEMPLATE,
                    channel = %channel,
                    reseller_id = %reseller_id,
                    "メールのレンダリングに失敗しました: {}",
                    e
                );
                None
            }
        }
    }
}

fn log_skipped(channel: NotificationChannel, reseller_id: ResellerId, reason: &str) {
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_SKIPPED,
        event.reseller_id = %reseller_id,
        notification.channel = %channel,
        reason,
        "通知をスキップしました"
    );
}

fn log_email_result(
    channel: NotificationChannel,
    email: &EmailMessage,
    result: Result<(), NotificationError>,
) {
    match result {
        Ok(()) => log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_SENT,
            event.reseller_id = %email.reseller_id,
            event.result = event::result::SUCCESS,
            notification.channel = %channel,
            notification.recipient = %email.to,
            "通知メール送信成功"
        ),
        Err(e) => log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_FAILED,
            event.reseller_id = %email.reseller_id,
            event.result = event::result::FAILURE,
            notification.channel = %channel,
            notification.recipient = %email.to,
            error.category = error::category::EXTERNAL_SERVICE,
            error.kind = error::kind::EMAIL_TRANSPORT,
            error = %e,
            "通知メール送信失敗"
        ),
    }
}
