use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::notify::{LeaveNotification, Notifier, NotifyError};

/// EmailJS REST client (`POST /api/v1.0/email/send`).
#[derive(Clone)]
pub struct EmailJs {
    client: reqwest::Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    private_key: Option<String>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a LeaveNotification,
}

impl EmailJs {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.emailjs_endpoint.clone(),
            service_id: config.emailjs_service_id.clone(),
            template_id: config.emailjs_template_id.clone(),
            public_key: config.emailjs_public_key.clone(),
            private_key: config.emailjs_private_key.clone(),
        }
    }

    fn body<'a>(&'a self, notification: &'a LeaveNotification) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            access_token: self.private_key.as_deref(),
            template_params: notification,
        }
    }

    #[tracing::instrument(skip(self, notification), fields(to = %notification.to_email))]
    async fn deliver(&self, notification: &LeaveNotification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.body(notification))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "EmailJS request failed");
                NotifyError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("unknown error");
            let message = match response.text().await {
                Ok(body) if !body.trim().is_empty() => body,
                Ok(_) => fallback.to_string(),
                Err(e) => {
                    warn!(error = %e, "Could not read EmailJS error body");
                    fallback.to_string()
                }
            };
            error!(status = status.as_u16(), message = %message, "EmailJS rejected the email");
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!(employee = %notification.employee_name, "Leave email sent");
        Ok(())
    }
}

impl Notifier for EmailJs {
    fn send<'a>(
        &'a self,
        notification: &'a LeaveNotification,
    ) -> BoxFuture<'a, Result<(), NotifyError>> {
        self.deliver(notification).boxed()
    }
}
