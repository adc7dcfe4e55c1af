//! Citation controller
//!
//! Owns the citation form and everything derived from it: the rendered
//! output, the report and template error flags, the saved configuration
//! snapshot and the two confirmation timers. Every mutation re-renders.

use chrono::{DateTime, Duration, Utc};

use citegen_domain::catalog;
use citegen_domain::{
    parse_report, CitationForm, Configuration, DomainError, FormField, FormUpdate, ParsedReport,
    PersistedConfig, ReportParseError, SelectedCharge, TemplateError,
};

use crate::application::services::ConfigService;
use crate::application::timer::OneShotTimer;
use crate::ports::outbound::ClipboardError;
use crate::state::{Platform, PlatformStorageAdapter};

/// How long a reset-to-defaults request waits for confirmation
pub const RESET_CONFIRM_WINDOW: Duration = Duration::seconds(5);

/// How long the "copied" indicator stays up
pub const COPY_INDICATOR_DURATION: Duration = Duration::seconds(2);

/// Result of a reset-to-built-in-defaults request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// First request: waiting for a confirming second one
    Armed,
    /// Confirmed inside the window: configuration is now the built-in one
    Committed,
}

pub struct CitationController {
    platform: Platform,
    config: ConfigService<PlatformStorageAdapter>,
    form: CitationForm,
    charge_options: Vec<SelectedCharge>,
    persisted: PersistedConfig,
    report_text: String,
    report_error: Option<ReportParseError>,
    template_error: Option<TemplateError>,
    output: String,
    last_saved: Option<DateTime<Utc>>,
    reset_confirmation: OneShotTimer,
    copy_indicator: OneShotTimer,
}

impl CitationController {
    /// Starts with an empty citation signed with the saved configuration
    /// (built-in values for anything never saved).
    pub fn new(platform: Platform) -> Self {
        let config = ConfigService::new(platform.storage_adapter());
        let persisted = config.load();
        let form = CitationForm::new(persisted.resolve());

        let mut controller = Self {
            platform,
            config,
            form,
            charge_options: catalog::charge_options(&[]),
            persisted,
            report_text: String::new(),
            report_error: None,
            template_error: None,
            output: String::new(),
            last_saved: None,
            reset_confirmation: OneShotTimer::default(),
            copy_indicator: OneShotTimer::default(),
        };
        controller.rerender();
        controller
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn form(&self) -> &CitationForm {
        &self.form
    }

    pub fn configuration(&self) -> &Configuration {
        &self.form.configuration
    }

    pub fn persisted(&self) -> &PersistedConfig {
        &self.persisted
    }

    /// Rendered citation; empty while the template is invalid
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn report_text(&self) -> &str {
        &self.report_text
    }

    pub fn report_error(&self) -> Option<&ReportParseError> {
        self.report_error.as_ref()
    }

    pub fn template_error(&self) -> Option<&TemplateError> {
        self.template_error.as_ref()
    }

    pub fn is_report_invalid(&self) -> bool {
        self.report_error.is_some()
    }

    pub fn is_template_invalid(&self) -> bool {
        self.template_error.is_some()
    }

    /// When the configuration was last saved in this session
    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    // -------------------------------------------------------------------------
    // Charges
    // -------------------------------------------------------------------------

    /// Every option the charge picker knows about.
    ///
    /// Recomputed when charges are picked or removed, and reset with the
    /// form. Charges taken from MDW output leave it alone.
    pub fn charge_options(&self) -> &[SelectedCharge] {
        &self.charge_options
    }

    /// Options the picker lists, filtered by `query`
    pub fn selectable_options(&self, query: &str) -> Vec<SelectedCharge> {
        let selectable =
            catalog::selectable_options(&self.charge_options, &self.form.selected_charges);
        catalog::filter_options(&selectable, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Catalog fine total for the current selection
    pub fn suggested_fine(&self) -> u32 {
        catalog::suggested_fine(&self.form.selected_charges)
    }

    pub fn select_charges(&mut self, charges: Vec<SelectedCharge>) {
        self.apply(FormUpdate::Charges(charges));
    }

    /// Adds the selectable option matching an identifier or a charge name.
    ///
    /// Asking for an already selected charge picks its re-offered option, so
    /// the same charge can be cited more than once.
    pub fn add_charge(&mut self, identifier_or_name: &str) -> Result<(), DomainError> {
        let wanted = identifier_or_name.trim();
        let options = self.selectable_options("");

        let by_id = options.iter().find(|option| option.id.as_str() == wanted);
        let by_name = || {
            let label = catalog::find(wanted)?.label;
            options.iter().find(|option| option.label == label)
        };
        let option = by_id
            .or_else(by_name)
            .cloned()
            .ok_or_else(|| DomainError::validation(format!("Unknown charge: {}", wanted)))?;

        let mut charges = self.form.selected_charges.clone();
        charges.push(option);
        self.select_charges(charges);
        Ok(())
    }

    /// Drops the selection with `id`
    pub fn remove_charge(&mut self, id: &str) {
        let charges = self
            .form
            .selected_charges
            .iter()
            .filter(|charge| charge.id.as_str() != id)
            .cloned()
            .collect();
        self.select_charges(charges);
    }

    // -------------------------------------------------------------------------
    // Form updates
    // -------------------------------------------------------------------------

    /// Applies a state transition and re-renders
    pub fn apply(&mut self, update: FormUpdate) {
        let picker_changed = matches!(update, FormUpdate::Charges(_) | FormUpdate::ClearCitation);
        let form = std::mem::take(&mut self.form);
        self.form = form.apply(update);
        if picker_changed {
            self.charge_options = catalog::charge_options(&self.form.selected_charges);
        }
        self.rerender();
    }

    /// Overwrites one field from raw input
    pub fn update_field(&mut self, field: FormField, raw: &str) -> Result<(), DomainError> {
        let update = FormUpdate::from_field(field, raw)?;
        self.apply(update);
        Ok(())
    }

    /// Stores the MDW text and, when it parses, overwrites name, fine, points
    /// and charges from it. Blank text clears the report error and leaves the
    /// form alone; unparseable text sets the error and leaves the form alone.
    pub fn set_report_text(&mut self, text: &str) {
        self.report_text = text.to_string();
        match parse_report(text) {
            Ok(None) => {
                self.report_error = None;
                self.rerender();
            }
            Ok(Some(report)) => self.apply_parsed_report(report),
            Err(e) => {
                tracing::debug!("Rejected MDW output: {}", e);
                self.report_error = Some(e);
                self.rerender();
            }
        }
    }

    /// Overwrites name, fine, points and charges; configuration is untouched
    pub fn apply_parsed_report(&mut self, report: ParsedReport) {
        self.report_error = None;
        self.apply(FormUpdate::ParsedReport(report));
    }

    /// Clears the citation and the MDW text, and re-reads the saved
    /// configuration (built-in values for anything never saved).
    pub fn reset_to_defaults(&mut self) {
        self.persisted = self.config.load();
        self.form = CitationForm::new(self.persisted.resolve());
        self.charge_options = catalog::charge_options(&[]);
        self.report_text.clear();
        self.report_error = None;
        self.rerender();
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Writes the configuration fields to the store
    pub fn save_configuration(&mut self) {
        self.persisted = self.config.save(&self.form.configuration);
        self.last_saved = Some(self.platform.now());
        self.platform.log_info("Configuration saved");
        self.sync_unload_guard();
    }

    /// Two-step reset to the built-in configuration.
    ///
    /// The first call arms a five second confirmation window and changes
    /// nothing. A second call inside the window replaces the configuration
    /// with the built-in one; the store is not written until the next save.
    pub fn reset_configuration_to_built_in_defaults(&mut self) -> ResetOutcome {
        let now = self.platform.now();
        if self.reset_confirmation.is_armed_at(now) {
            self.reset_confirmation.cancel();
            self.apply(FormUpdate::ReplaceConfiguration(Configuration::built_in()));
            self.platform.log_info("Configuration reset to built-in defaults");
            ResetOutcome::Committed
        } else {
            self.reset_confirmation.arm(now, RESET_CONFIRM_WINDOW);
            ResetOutcome::Armed
        }
    }

    /// True while a reset request waits for confirmation
    pub fn is_reset_armed(&self) -> bool {
        self.reset_confirmation.is_armed_at(self.platform.now())
    }

    pub fn is_configuration_default(&self) -> bool {
        self.form.configuration.is_built_in()
    }

    pub fn is_configuration_unsaved(&self) -> bool {
        self.form.configuration.has_unsaved_changes(&self.persisted)
    }

    /// Whether leaving the page should ask for confirmation
    pub fn should_warn_before_unload(&self) -> bool {
        self.is_configuration_unsaved()
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Copies the rendered citation and shows the copied indicator
    pub fn copy_output(&mut self) -> Result<(), ClipboardError> {
        if let Err(e) = self.platform.copy_text(&self.output) {
            self.platform.log_error(&e.to_string());
            return Err(e);
        }
        self.copy_indicator
            .arm(self.platform.now(), COPY_INDICATOR_DURATION);
        Ok(())
    }

    pub fn is_copy_indicator_shown(&self) -> bool {
        self.copy_indicator.is_armed_at(self.platform.now())
    }

    /// Expires due timers. Returns true when something changed.
    pub fn tick(&mut self) -> bool {
        let now = self.platform.now();
        let reset_expired = self.reset_confirmation.expire_if_due(now);
        let copy_expired = self.copy_indicator.expire_if_due(now);
        reset_expired || copy_expired
    }

    /// Re-renders with the current time without changing the form
    pub fn refresh(&mut self) {
        self.rerender();
    }

    fn rerender(&mut self) {
        match self.form.render(self.platform.now()) {
            Ok(output) => {
                self.output = output;
                self.template_error = None;
            }
            Err(e) => {
                if self.template_error.as_ref() != Some(&e) {
                    self.platform.log_warn(&format!("Template is invalid: {}", e));
                }
                self.output.clear();
                self.template_error = Some(e);
            }
        }
        self.sync_unload_guard();
    }

    fn sync_unload_guard(&self) {
        self.platform
            .set_unload_guard(self.should_warn_before_unload());
    }
}
