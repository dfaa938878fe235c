use crate::config::Config;
use crate::controller::{ValidationTicket, Wizard};
use anyhow::{Context, Result};
use asnv_client::ValidationClient;
use asnv_core::models::ValidationOutcome;
use asnv_core::{ClassifiedError, SampleCategory, TemplateProvider};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

/// Drives a [`Wizard`] against a [`ValidationClient`] and a [`TemplateProvider`].
///
/// [`validate`](Self::validate) borrows the session for the whole request.
/// To navigate while a call is in flight, use
/// [`start_validation`](Self::start_validation), run the returned request
/// elsewhere, and hand its result to
/// [`finish_validation`](Self::finish_validation).
pub struct Session {
    wizard: Wizard,
    client: ValidationClient,
    templates: TemplateProvider,
    template_delay: Duration,
}

impl Session {
    pub fn new(client: ValidationClient, templates: TemplateProvider) -> Self {
        Self {
            wizard: Wizard::new(),
            client,
            templates,
            template_delay: Duration::ZERO,
        }
    }

    pub fn with_template_delay(mut self, delay: Duration) -> Self {
        self.template_delay = delay;
        self
    }

    /// Builds a session over the built-in templates
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ValidationClient::new(&config.service.base_url)
            .context("Failed to create validation client")?;
        let templates = TemplateProvider::builtin().context("Failed to load built-in templates")?;
        info!(endpoint = %client.endpoint(), "Session ready");
        Ok(Self::new(client, templates).with_template_delay(config.template_delay()))
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    pub fn client(&self) -> &ValidationClient {
        &self.client
    }

    /// Runs the validate trigger to completion.
    ///
    /// Returns true if the result changed the wizard state.
    pub async fn validate(&mut self) -> bool {
        let Some((ticket, request)) = self.start_validation() else {
            return false;
        };
        let result = request.await;
        self.finish_validation(&ticket, result)
    }

    /// Issues a ticket and returns it with a detached request future.
    ///
    /// The future owns everything it needs, so it can be spawned while the
    /// session keeps handling navigation. Leaving the preview cancels it.
    pub fn start_validation(
        &mut self,
    ) -> Option<(
        ValidationTicket,
        impl Future<Output = Result<ValidationOutcome, ClassifiedError>> + Send + 'static,
    )> {
        let ticket = self.wizard.begin_validation()?;
        let client = self.client.clone();
        let raw_text = ticket.raw_text().to_string();
        let signal = ticket.signal();
        let request = async move { client.validate_until(&raw_text, signal).await };
        Some((ticket, request))
    }

    /// Applies the result of a request from [`start_validation`](Self::start_validation)
    pub fn finish_validation(
        &mut self,
        ticket: &ValidationTicket,
        result: Result<ValidationOutcome, ClassifiedError>,
    ) -> bool {
        self.wizard.complete_validation(ticket, result)
    }

    /// Loads a random template of `category` into the input step.
    ///
    /// Returns false if a load for that category was already pending.
    pub async fn load_template(&mut self, category: SampleCategory) -> Result<bool> {
        let Some(document) = self.templates.load(category, self.template_delay).await else {
            return Ok(false);
        };
        let raw_text = document
            .to_pretty_json()
            .with_context(|| format!("Failed to render {} template", category))?;
        debug!(category = %category, vendor_id = %document.vendor_id, "Template loaded");
        self.wizard.load_template(raw_text);
        Ok(true)
    }
}
