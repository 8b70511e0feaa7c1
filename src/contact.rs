use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, TryRecvError};
use serde::Serialize;
use tracing::{error, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const PLACEHOLDER_FORM_ID: &str = "YOUR_FORM_ID";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("no relay endpoint configured")]
    ConfigurationMissing,

    #[error("network error: {0}")]
    TransportFailure(String),

    #[error("relay rejected the message with status {status}: {body}")]
    RejectedByServer { status: u16, body: String },
}

impl From<reqwest::Error> for SubmitError {
    fn from(e: reqwest::Error) -> Self {
        SubmitError::TransportFailure(e.to_string())
    }
}

/// JSON body posted to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Forwards a message to whoever delivers it as email.
pub trait Relay: Send + Sync {
    fn post(&self, message: &ContactMessage) -> Result<(), SubmitError>;
}

pub struct HttpRelay {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpRelay {
    /// Fails with `ConfigurationMissing` for an absent, empty or placeholder
    /// endpoint; callers fall back to the mail client.
    pub fn from_endpoint(endpoint: Option<&str>) -> Result<Self, SubmitError> {
        let endpoint = endpoint.map(str::trim).unwrap_or_default();
        if endpoint.is_empty() || endpoint.contains(PLACEHOLDER_FORM_ID) {
            return Err(SubmitError::ConfigurationMissing);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, endpoint: endpoint.to_string() })
    }
}

impl Relay for HttpRelay {
    fn post(&self, message: &ContactMessage) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(message)
            .send()?;
        let status = response.status().as_u16();
        // Validation errors come back as 422 with a JSON payload worth logging
        let body = if response.status().is_success() { String::new() } else { response.text().unwrap_or_default() };
        check_status(status, body)
    }
}

pub fn check_status(status: u16, body: String) -> Result<(), SubmitError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(SubmitError::RejectedByServer { status, body })
    }
}

/// `mailto:` link carrying the form content, for when no relay is configured.
pub fn mailto_uri(recipient: &str, message: &ContactMessage) -> String {
    let sender = if message.name.is_empty() { "Website visitor" } else { message.name.as_str() };
    let subject = format!("New message from {}", sender);
    let body = format!("{}\n\nFrom: {}", message.message, message.email);
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SubmitStatus {
    Idle,
    Sending,
    Success,
    Error,
}

impl SubmitStatus {
    pub fn message(self) -> Option<&'static str> {
        match self {
            SubmitStatus::Idle | SubmitStatus::Sending => None,
            SubmitStatus::Success => Some("Thank you! Your message has been sent."),
            SubmitStatus::Error => Some("Oops! Something went wrong. Please try again."),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn next(self) -> Field {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Message,
            Field::Message => Field::Name,
        }
    }
}

/// What the caller has to do after [`ContactForm::submit`].
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// A submission is already in flight.
    Ignored,
    /// Posted on a worker thread; watch [`ContactForm::poll`].
    Sending,
    /// No relay: hand this URI to the system mail client.
    OpenMailClient(String),
}

pub struct ContactForm {
    recipient: String,
    relay: Option<Arc<dyn Relay>>,
    fields: ContactMessage,
    focus: Option<Field>,
    status: SubmitStatus,
    pending: Option<Receiver<Result<(), SubmitError>>>,
}

impl ContactForm {
    pub fn new(recipient: impl Into<String>, relay: Option<Arc<dyn Relay>>) -> Self {
        Self {
            recipient: recipient.into(),
            relay,
            fields: ContactMessage::default(),
            focus: None,
            status: SubmitStatus::Idle,
            pending: None,
        }
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn fields(&self) -> &ContactMessage {
        &self.fields
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn set_focus(&mut self, field: Option<Field>) {
        self.focus = field;
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.fields.name,
            Field::Email => &self.fields.email,
            Field::Message => &self.fields.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.fields.name,
            Field::Email => &mut self.fields.email,
            Field::Message => &mut self.fields.message,
        }
    }

    pub fn set_value(&mut self, field: Field, value: &str) {
        *self.value_mut(field) = value.to_string();
    }

    /// Appends typed characters to the focused field.
    pub fn type_chars(&mut self, chars: &[char]) {
        let Some(field) = self.focus else {
            return;
        };
        let value = self.value_mut(field);
        value.extend(chars.iter().filter(|c| !c.is_control()));
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focus {
            self.value_mut(field).pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = Some(self.focus.map_or(Field::Name, Field::next));
    }

    /// Every field is required, like the browser form.
    pub fn is_complete(&self) -> bool {
        !self.fields.name.trim().is_empty()
            && self.fields.email.contains('@')
            && !self.fields.message.trim().is_empty()
    }

    pub fn is_sending(&self) -> bool {
        self.status == SubmitStatus::Sending
    }

    pub fn submit(&mut self) -> Dispatch {
        if self.is_sending() {
            return Dispatch::Ignored;
        }

        let Some(relay) = self.relay.clone() else {
            let uri = mailto_uri(&self.recipient, &self.fields);
            info!("no relay endpoint configured, handing the message to the mail client");
            self.succeed();
            return Dispatch::OpenMailClient(uri);
        };

        let message = self.fields.clone();
        let (tx, rx) = bounded(1);
        thread::spawn(move || {
            // The form may be gone by the time the relay answers
            let _ = tx.send(relay.post(&message));
        });
        self.pending = Some(rx);
        self.status = SubmitStatus::Sending;
        Dispatch::Sending
    }

    /// Picks up the outcome of an in-flight submission, if it arrived.
    pub fn poll(&mut self) -> SubmitStatus {
        let Some(rx) = self.pending.as_ref() else {
            return self.status;
        };
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return self.status,
            Err(TryRecvError::Disconnected) => Err(SubmitError::TransportFailure("relay worker exited".into())),
        };
        self.finish(outcome);
        self.status
    }

    #[cfg(test)]
    fn wait(&mut self) -> SubmitStatus {
        if let Some(rx) = self.pending.as_ref() {
            let outcome = rx
                .recv_timeout(Duration::from_secs(5))
                .unwrap_or_else(|e| Err(SubmitError::TransportFailure(e.to_string())));
            self.finish(outcome);
        }
        self.status
    }

    fn finish(&mut self, outcome: Result<(), SubmitError>) {
        self.pending = None;
        match outcome {
            Ok(()) => {
                info!("contact message delivered");
                self.succeed();
            }
            Err(e @ SubmitError::RejectedByServer { .. }) => {
                warn!("relay error: {}", e);
                self.status = SubmitStatus::Error;
            }
            Err(e) => {
                error!("contact submission failed: {}", e);
                self.status = SubmitStatus::Error;
            }
        }
    }

    fn succeed(&mut self) {
        self.status = SubmitStatus::Success;
        self.fields = ContactMessage::default();
    }
}
