//! Shared fixtures for the route tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use msg_api::app::AppState;
use msg_core::domain::value_objects::{Attachment, EmailProvider, EmailProviderConfig, Identifier};
use msg_core::errors::ChannelError;
use msg_core::services::verification::{
    select_route, BypassPolicy, ChannelResolver, DeliveryChannel, Route, VerificationService,
    VerificationServiceConfig,
};
use msg_infra::InMemoryCodeStore;

pub const JSON_LIMIT: usize = 1024 * 1024;

/// One message handed to a channel
#[derive(Debug, Clone)]
pub struct Delivered {
    pub provider: &'static str,
    pub destination: String,
    pub bcc: Option<String>,
    pub subject: String,
    pub body: String,
    pub attachments: usize,
}

pub type Outbox = Arc<Mutex<Vec<Delivered>>>;

pub struct RecordingChannel {
    name: &'static str,
    outbox: Outbox,
    fail: bool,
}

#[async_trait]
impl DeliveryChannel for RecordingChannel {
    async fn send_code(
        &self,
        destination: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), ChannelError> {
        self.send_with_attachment(destination, None, subject, message, &[])
            .await
    }

    async fn send_with_attachment(
        &self,
        destination: &str,
        bcc: Option<&str>,
        subject: &str,
        message: &str,
        attachments: &[Attachment],
    ) -> Result<(), ChannelError> {
        if self.fail {
            return Err(ChannelError::delivery(self.name, "HTTP 503"));
        }
        self.outbox.lock().unwrap().push(Delivered {
            provider: self.name,
            destination: destination.to_string(),
            bcc: bcc.map(str::to_string),
            subject: subject.to_string(),
            body: message.to_string(),
            attachments: attachments.len(),
        });
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}

/// Routes like the vendor registry but records instead of calling vendors
#[derive(Default)]
pub struct RecordingResolver {
    pub outbox: Outbox,
    pub fail: bool,
}

impl ChannelResolver for RecordingResolver {
    type Channel = RecordingChannel;

    fn resolve(
        &self,
        identifier: &Identifier,
        email_provider: Option<&EmailProviderConfig>,
    ) -> Result<RecordingChannel, ChannelError> {
        let name = match select_route(identifier, email_provider)? {
            Route::Email(config) => match config.provider() {
                EmailProvider::Postmark => "postmark",
                EmailProvider::Mailchimp => "mailchimp",
            },
            Route::Sms => "sms",
        };
        Ok(RecordingChannel {
            name,
            outbox: self.outbox.clone(),
            fail: self.fail,
        })
    }
}

pub type TestState = AppState<InMemoryCodeStore, RecordingResolver>;

pub struct Fixture {
    pub state: actix_web::web::Data<TestState>,
    pub store: Arc<InMemoryCodeStore>,
    pub outbox: Outbox,
}

pub fn fixture_with(bypass: BypassPolicy, failing_channel: bool) -> Fixture {
    let store = Arc::new(InMemoryCodeStore::new());
    let resolver = Arc::new(RecordingResolver {
        outbox: Outbox::default(),
        fail: failing_channel,
    });
    let outbox = resolver.outbox.clone();

    let config = VerificationServiceConfig {
        app_name: "Acme".to_string(),
        ..VerificationServiceConfig::default()
    };
    let service = VerificationService::new(store.clone(), resolver, bypass, config);

    Fixture {
        state: actix_web::web::Data::new(AppState::new(Arc::new(service))),
        store,
        outbox,
    }
}

pub fn fixture() -> Fixture {
    fixture_with(BypassPolicy::disabled(), false)
}

pub fn postmark_provider() -> serde_json::Value {
    serde_json::json!({
        "provider": "postmark",
        "api_key": "server-token",
        "sender": "noreply@acme.test"
    })
}
