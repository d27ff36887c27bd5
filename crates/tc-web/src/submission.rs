//! Customization form submission.
//!
//! A submit goes `Idle -> Validating -> Submitting -> Succeeded | Failed -> Idle`.
//! Validation failures skip `Submitting` entirely. Whatever the outcome, the
//! submit button is re-enabled and gets its original label back.
//!
//! The button being disabled is the only thing that prevents a second submit
//! while one is in flight; the pipeline itself holds no lock.

use std::cell::Cell;

use tracing::{error, info, warn};
use url::form_urlencoded;

use crate::catalog::{Color, Hardware, ModelFamily, Selection};
use crate::config::Config;
use crate::dom::{BannerHost, SubmitControl, Timer};
use crate::error::{ClipboardError, SubmitError, TransportError, ValidationError};
use crate::notifier::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Form entries in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormPayload {
    fields: Vec<(String, String)>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// `application/x-www-form-urlencoded` body.
    pub fn to_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut payload = Self::new();
        for (name, value) in iter {
            payload.push(name, value);
        }
        payload
    }
}

/// Strict check of the two required fields. Color is checked first.
pub fn validate(config: &Config, payload: &FormPayload) -> Result<Selection, ValidationError> {
    let color = payload.get(config.endpoint.color_field).unwrap_or_default();
    let color = Color::from_label(color).ok_or_else(|| ValidationError::InvalidColor(color.to_string()))?;

    let hardware = payload.get(config.endpoint.hardware_field).unwrap_or_default();
    let hardware =
        Hardware::from_label(hardware).ok_or_else(|| ValidationError::InvalidHardware(hardware.to_string()))?;

    Ok(Selection::new(color, hardware))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends the encoded form to the server.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_form(&self, url: &str, body: &FormPayload) -> Result<HttpReply, TransportError>;
}

#[allow(async_fn_in_trait)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Puts the button in its loading state and restores it on drop, so every
/// exit path of a submit (including early returns) cleans up.
struct LoadingGuard<'a, B: SubmitControl> {
    control: &'a B,
    original_label: String,
}

impl<'a, B: SubmitControl> LoadingGuard<'a, B> {
    fn engage(control: &'a B, loading_label: &str) -> Self {
        let original_label = control.label();
        control.set_disabled(true);
        control.show_loading(loading_label);
        Self { control, original_label }
    }
}

impl<B: SubmitControl> Drop for LoadingGuard<'_, B> {
    fn drop(&mut self) {
        self.control.set_disabled(false);
        self.control.set_label(&self.original_label);
    }
}

pub struct FormPipeline<T, C, H, M> {
    config: &'static Config,
    model: ModelFamily,
    transport: T,
    clipboard: C,
    notifier: Notifier<H, M>,
    state: Cell<SubmissionState>,
    observer: Option<Box<dyn Fn(SubmissionState)>>,
}

impl<T, C, H, M> FormPipeline<T, C, H, M>
where
    T: Transport,
    C: Clipboard,
    H: BannerHost,
    M: Timer,
{
    pub fn new(
        config: &'static Config,
        model: ModelFamily,
        transport: T,
        clipboard: C,
        notifier: Notifier<H, M>,
    ) -> Self {
        Self {
            config,
            model,
            transport,
            clipboard,
            notifier,
            state: Cell::new(SubmissionState::Idle),
            observer: None,
        }
    }

    /// Called on every state transition.
    pub fn with_observer(mut self, observer: impl Fn(SubmissionState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state.get()
    }

    pub fn notifier(&self) -> &Notifier<H, M> {
        &self.notifier
    }

    /// Handle one submit. Returns the copied link on success; the error has
    /// already been reported to the customer and logged.
    pub async fn submit<B: SubmitControl>(&self, control: &B, payload: FormPayload) -> Result<String, SubmitError> {
        let loading = LoadingGuard::engage(control, self.config.messages.loading);

        let result = self.run(&payload).await;
        match &result {
            Ok(link) => {
                info!(link = %link, "customization link copied");
                self.transition(SubmissionState::Succeeded);
                self.notifier.success(self.config.messages.link_copied);
            }
            Err(err) => {
                if let SubmitError::Validation(reason) = err {
                    warn!("rejected submission: {}", reason);
                } else {
                    error!("customization submit failed: {}", err);
                }
                self.transition(SubmissionState::Failed);
                self.notifier.error(err.user_message(self.config));
            }
        }

        drop(loading);
        self.transition(SubmissionState::Idle);
        result
    }

    async fn run(&self, payload: &FormPayload) -> Result<String, SubmitError> {
        self.transition(SubmissionState::Validating);
        validate(self.config, payload)?;

        self.transition(SubmissionState::Submitting);
        let url = self.config.submit_url(self.model.name(self.config));
        let reply = self.transport.post_form(&url, payload).await?;
        if !reply.is_success() {
            return Err(TransportError::Status(reply.status).into());
        }

        self.clipboard.write_text(&reply.body).await?;
        Ok(reply.body)
    }

    fn transition(&self, next: SubmissionState) {
        self.state.set(next);
        if let Some(observer) = &self.observer {
            observer(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG;
    use crate::dom::BannerKind;
    use crate::headless::{HeadlessButton, HeadlessContainer, ManualTimer, RecordingClipboard, ScriptedTransport};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tracing_test::traced_test;

    type Pipeline = FormPipeline<ScriptedTransport, RecordingClipboard, HeadlessContainer, ManualTimer>;

    struct Harness {
        pipeline: Pipeline,
        transport: ScriptedTransport,
        clipboard: RecordingClipboard,
        banners: HeadlessContainer,
        button: HeadlessButton,
        states: Rc<RefCell<Vec<SubmissionState>>>,
    }

    fn harness(transport: ScriptedTransport, clipboard: RecordingClipboard) -> Harness {
        let banners = HeadlessContainer::default();
        let notifier = Notifier::new(&CONFIG, banners.clone(), ManualTimer::default());
        let states = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&states);
        let pipeline = FormPipeline::new(
            &CONFIG,
            ModelFamily::Urbana,
            transport.clone(),
            clipboard.clone(),
            notifier,
        )
        .with_observer(move |state| recorded.borrow_mut().push(state));
        Harness {
            pipeline,
            transport,
            clipboard,
            banners,
            button: HeadlessButton::new("Generar enlace"),
            states,
        }
    }

    fn payload(color: &str, hardware: &str) -> FormPayload {
        [("color", color), ("herrajes", hardware)].into_iter().collect()
    }

    fn assert_button_restored(button: &HeadlessButton) {
        assert!(!button.is_disabled());
        assert!(!button.is_loading());
        assert_eq!(button.label(), "Generar enlace");
    }

    #[test]
    fn test_validate_accepts_known_values() {
        let selection = validate(&CONFIG, &payload("marron claro", "dorado")).unwrap();
        assert_eq!(selection, Selection::new(Color::MarronClaro, Hardware::Dorado));
    }

    #[test]
    fn test_validate_checks_color_before_hardware() {
        assert_eq!(
            validate(&CONFIG, &payload("", "")),
            Err(ValidationError::InvalidColor(String::new()))
        );
        assert_eq!(
            validate(&CONFIG, &payload("negro", "oro")),
            Err(ValidationError::InvalidHardware("oro".into()))
        );
        assert_eq!(
            validate(&CONFIG, &FormPayload::new()),
            Err(ValidationError::InvalidColor(String::new()))
        );
    }

    #[test]
    fn test_payload_urlencoding() {
        let mut body = payload("marron claro", "plata");
        body.push("nota", "a&b");
        assert_eq!(body.to_urlencoded(), "color=marron+claro&herrajes=plata&nota=a%26b");
    }

    #[test]
    fn test_http_reply_success_range() {
        let reply = |status| HttpReply {
            status,
            body: String::new(),
        };
        assert!(reply(200).is_success());
        assert!(reply(204).is_success());
        assert!(!reply(199).is_success());
        assert!(!reply(302).is_success());
        assert!(!reply(500).is_success());
    }

    #[test]
    fn test_empty_color_rejected_without_network() {
        let h = harness(ScriptedTransport::replying(200, "x"), RecordingClipboard::default());

        let result = block_on(h.pipeline.submit(&h.button, payload("", "plata")));

        assert!(matches!(result, Err(SubmitError::Validation(ValidationError::InvalidColor(_)))));
        assert_eq!(h.transport.calls(), 0);
        assert_eq!(
            h.banners.banners(),
            vec![(BannerKind::Error, "Por favor selecciona un color válido.".to_string())]
        );
        assert_eq!(
            *h.states.borrow(),
            vec![SubmissionState::Validating, SubmissionState::Failed, SubmissionState::Idle]
        );
        assert_button_restored(&h.button);
    }

    #[test]
    fn test_empty_hardware_rejected_without_network() {
        let h = harness(ScriptedTransport::replying(200, "x"), RecordingClipboard::default());

        let result = block_on(h.pipeline.submit(&h.button, payload("negro", "")));

        assert!(matches!(result, Err(SubmitError::Validation(ValidationError::InvalidHardware(_)))));
        assert_eq!(h.transport.calls(), 0);
        assert_eq!(
            h.banners.banners(),
            vec![(BannerKind::Error, "Por favor selecciona herrajes válidos.".to_string())]
        );
        assert_button_restored(&h.button);
    }

    #[test]
    #[traced_test]
    fn test_server_error_skips_clipboard() {
        let h = harness(ScriptedTransport::replying(500, "boom"), RecordingClipboard::default());

        let result = block_on(h.pipeline.submit(&h.button, payload("negro", "plata")));

        assert_eq!(result, Err(SubmitError::Transport(TransportError::Status(500))));
        assert_eq!(h.transport.calls(), 1);
        assert!(h.clipboard.attempts().is_empty());
        assert_eq!(h.banners.banners(), vec![(BannerKind::Error, CONFIG.messages.submit_failed.to_string())]);
        assert!(logs_contain("server responded with status 500"));
        assert_button_restored(&h.button);
    }

    #[test]
    #[traced_test]
    fn test_network_failure_is_generic_to_user() {
        let h = harness(
            ScriptedTransport::failing(TransportError::Network("connection reset".into())),
            RecordingClipboard::default(),
        );

        let result = block_on(h.pipeline.submit(&h.button, payload("marron", "dorado")));

        assert!(result.is_err());
        assert!(h.clipboard.attempts().is_empty());
        let banners = h.banners.banners();
        assert_eq!(banners.len(), 1);
        assert!(!banners[0].1.contains("connection reset"));
        assert!(logs_contain("connection reset"));
        assert_button_restored(&h.button);
    }

    #[test]
    fn test_success_copies_link() {
        let h = harness(
            ScriptedTransport::replying(200, "https://example.com/link123"),
            RecordingClipboard::default(),
        );

        let result = block_on(h.pipeline.submit(&h.button, payload("marron claro", "dorado")));

        assert_eq!(result, Ok("https://example.com/link123".to_string()));
        assert_eq!(h.clipboard.attempts(), vec!["https://example.com/link123"]);
        assert_eq!(
            h.banners.banners(),
            vec![(BannerKind::Success, "¡Enlace copiado al portapapeles!".to_string())]
        );
        assert_eq!(
            *h.states.borrow(),
            vec![
                SubmissionState::Validating,
                SubmissionState::Submitting,
                SubmissionState::Succeeded,
                SubmissionState::Idle,
            ]
        );
        assert_eq!(h.pipeline.state(), SubmissionState::Idle);
        assert_button_restored(&h.button);
    }

    #[test]
    fn test_request_targets_model_and_carries_form() {
        let h = harness(ScriptedTransport::replying(201, "link"), RecordingClipboard::default());
        let mut body = payload("negro", "dorado");
        body.push("nombre", "Ana");

        block_on(h.pipeline.submit(&h.button, body.clone())).unwrap();

        let (url, sent) = h.transport.last_request().unwrap();
        assert_eq!(url, "/personalizar?modelo=modelo2");
        assert_eq!(sent, body);
    }

    #[test]
    fn test_clipboard_failure_reports_generic_error() {
        let h = harness(ScriptedTransport::replying(200, "link"), RecordingClipboard::denied());

        let result = block_on(h.pipeline.submit(&h.button, payload("negro", "plata")));

        assert!(matches!(result, Err(SubmitError::Clipboard(_))));
        assert_eq!(h.clipboard.attempts().len(), 1);
        assert_eq!(h.banners.banners(), vec![(BannerKind::Error, CONFIG.messages.submit_failed.to_string())]);
        assert_eq!(
            *h.states.borrow(),
            vec![
                SubmissionState::Validating,
                SubmissionState::Submitting,
                SubmissionState::Failed,
                SubmissionState::Idle,
            ]
        );
        assert_button_restored(&h.button);
    }

    struct SpyTransport {
        button: HeadlessButton,
        seen: RefCell<Option<(bool, bool)>>,
    }

    impl Transport for SpyTransport {
        async fn post_form(&self, _url: &str, _body: &FormPayload) -> Result<HttpReply, TransportError> {
            *self.seen.borrow_mut() = Some((self.button.is_disabled(), self.button.is_loading()));
            Ok(HttpReply {
                status: 200,
                body: "link".into(),
            })
        }
    }

    #[test]
    fn test_button_disabled_while_submitting() {
        let button = HeadlessButton::new("Enviar");
        let transport = SpyTransport {
            button: button.clone(),
            seen: RefCell::new(None),
        };
        let notifier = Notifier::new(&CONFIG, HeadlessContainer::default(), ManualTimer::default());
        let pipeline = FormPipeline::new(
            &CONFIG,
            ModelFamily::Classic,
            transport,
            RecordingClipboard::default(),
            notifier,
        );

        block_on(pipeline.submit(&button, payload("negro", "plata"))).unwrap();

        assert_eq!(*pipeline.transport.seen.borrow(), Some((true, true)));
        assert!(!button.is_disabled());
        assert_eq!(button.label(), "Enviar");
    }
}
