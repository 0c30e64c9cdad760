//! Live form engine: widget tree ownership, the change-notification channel,
//! wizard navigation, and pure rendering.

pub mod payload;
pub mod rules;
pub mod widgets;
pub mod wizard;

use std::collections::BTreeMap;

use crate::errors::FormError;
use crate::markup::{to_class_name, Element};
use crate::placeholders::Placeholders;
use crate::schema::{FieldKind, FormDefinition};
use crate::submit::{self, SubmitOutcome};
use crate::transport::Transport;

use rules::RuleBinding;
use widgets::{build_wrapper, Control, FieldWrapper, ValidityError};
use wizard::SectionWizard;

/// Result of a wizard navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionMove {
    /// Now on the given section index.
    Moved(usize),
    /// A control in the departing pane is invalid; it is the focus target and
    /// no state changed.
    Blocked(ValidityError),
    /// No wizard, or already at the boundary.
    AtEdge,
}

/// One rendered form instance: the exclusive owner of the widget tree,
/// payload snapshot, section index, and submission tokens for its lifetime.
///
/// Every mutator re-evaluates visibility rules synchronously, preserving the
/// per-change ordering guarantee (no debouncing, no partial evaluation).
pub struct Form {
    action: String,
    csrf_token: Option<String>,
    config_token: Option<String>,
    wrappers: Vec<FieldWrapper>,
    bindings: Vec<RuleBinding>,
    wizard: Option<SectionWizard>,
    placeholders: Placeholders,
    replacement: Option<String>,
}

impl Form {
    /// Constructs the widget tree from a normalized definition, collecting
    /// rules and sections as it goes, and applies rules once.
    pub fn build(definition: FormDefinition, placeholders: Placeholders) -> Self {
        let mut wrappers = Vec::with_capacity(definition.fields.len());
        let mut bindings = Vec::new();
        for fd in &definition.fields {
            if let Some(rule) = fd.rule.clone() {
                bindings.push(RuleBinding {
                    wrapper: wrappers.len(),
                    rule,
                });
            }
            wrappers.push(build_wrapper(fd));
        }

        let mut sections: Vec<String> = Vec::new();
        for wrapper in &wrappers {
            if let Some(section) = &wrapper.section {
                if !sections.contains(section) {
                    sections.push(section.clone());
                }
            }
        }

        let mut form = Self {
            action: definition.action,
            csrf_token: definition.csrf_token,
            config_token: definition.config_token,
            wrappers,
            bindings,
            wizard: SectionWizard::from_sections(sections),
            placeholders,
            replacement: None,
        };
        form.refresh_rules();
        form
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub fn config_token(&self) -> Option<&str> {
        self.config_token.as_deref()
    }

    pub fn wrappers(&self) -> &[FieldWrapper] {
        &self.wrappers
    }

    pub fn wizard(&self) -> Option<&SectionWizard> {
        self.wizard.as_ref()
    }

    /// Confirmation markup stored after a successful submission, if any.
    pub fn replacement(&self) -> Option<&str> {
        self.replacement.as_deref()
    }

    /// Visibility of the wrapper holding the named control.
    pub fn is_hidden(&self, field: &str) -> Option<bool> {
        self.wrappers
            .iter()
            .find(|wrapper| wrapper.control.name() == Some(field))
            .map(|wrapper| wrapper.hidden)
    }

    /// Current flat payload, re-derived from control state on every call.
    pub fn payload(&self) -> BTreeMap<String, String> {
        payload::construct_payload(&self.wrappers)
    }

    /// Sets the value of a text-like control.
    pub fn set_value(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let control = self.named_control_mut(field)?;
        match control {
            Control::Input { value: slot, .. } | Control::TextArea { value: slot, .. } => {
                *slot = value.to_string();
            }
            _ => return Err(FormError::UnknownField(field.to_string())),
        }
        self.refresh_rules();
        Ok(())
    }

    /// Selects a concrete option of a select control by its value.
    pub fn select_option(&mut self, field: &str, option: &str) -> Result<(), FormError> {
        let control = self.named_control_mut(field)?;
        let Control::Select {
            options, selected, ..
        } = control
        else {
            return Err(FormError::UnknownField(field.to_string()));
        };
        let index = options.iter().position(|candidate| candidate.as_str() == option).ok_or_else(|| {
            FormError::UnknownOption {
                field: field.to_string(),
                option: option.to_string(),
            }
        })?;
        *selected = Some(index);
        self.refresh_rules();
        Ok(())
    }

    /// Checks or unchecks one option of a checkbox or radio group. Checking a
    /// radio option clears the rest of its group.
    pub fn set_checked(&mut self, field: &str, option: &str, checked: bool) -> Result<(), FormError> {
        let control = self.named_control_mut(field)?;
        let Control::Toggles { kind, options, .. } = control else {
            return Err(FormError::UnknownField(field.to_string()));
        };
        let exclusive = *kind == FieldKind::Radio;
        let index = options
            .iter()
            .position(|candidate| candidate.value == option)
            .ok_or_else(|| FormError::UnknownOption {
                field: field.to_string(),
                option: option.to_string(),
            })?;
        if exclusive && checked {
            for entry in options.iter_mut() {
                entry.checked = false;
            }
        }
        options[index].checked = checked;
        self.refresh_rules();
        Ok(())
    }

    /// Forward wizard navigation, gated on the current pane's validity.
    pub fn advance_section(&mut self) -> SectionMove {
        let current = match &self.wizard {
            Some(wizard) if wizard.has_next() => wizard.current_section().to_string(),
            _ => return SectionMove::AtEdge,
        };
        if let Some(invalid) = self.first_invalid_in(Some(current.as_str())) {
            return SectionMove::Blocked(invalid);
        }
        match &mut self.wizard {
            Some(wizard) => {
                wizard.advance();
                SectionMove::Moved(wizard.current_index())
            }
            None => SectionMove::AtEdge,
        }
    }

    /// Backward wizard navigation, unconditional.
    pub fn retreat_section(&mut self) -> SectionMove {
        match &mut self.wizard {
            Some(wizard) if wizard.has_prev() => {
                wizard.retreat();
                SectionMove::Moved(wizard.current_index())
            }
            _ => SectionMove::AtEdge,
        }
    }

    /// Native-style validity over every named control, in document order.
    pub fn check_validity(&self) -> Result<(), ValidityError> {
        match self.first_invalid_in(None) {
            Some(invalid) => Err(invalid),
            None => Ok(()),
        }
    }

    /// Terminal submit action: validity gate, one POST, and on success the
    /// redirect-and-replace step. Failures leave the form interactive.
    pub fn press_submit(&mut self, transport: &dyn Transport) -> Result<SubmitOutcome, FormError> {
        if let Some(invalid) = self.first_invalid_in(None) {
            return Ok(SubmitOutcome::Invalid(invalid));
        }
        let result = submit::submit(self, transport)?;
        if !result.success {
            tracing::debug!(status = result.status, "Submission rejected");
            return Ok(SubmitOutcome::Rejected(result));
        }
        match self.redirect_target() {
            Some(target) => {
                let html = submit::fetch_redirect(transport, &target)?;
                self.replacement = Some(html.clone());
                Ok(SubmitOutcome::Redirected { result, html })
            }
            None => Ok(SubmitOutcome::Accepted(result)),
        }
    }

    fn redirect_target(&self) -> Option<String> {
        self.wrappers.iter().find_map(|wrapper| match &wrapper.control {
            Control::Button {
                kind: FieldKind::Submit,
                redirect_target,
                ..
            } => redirect_target.clone(),
            _ => None,
        })
    }

    /// First invalid named control, restricted to one section when given.
    fn first_invalid_in(&self, section: Option<&str>) -> Option<ValidityError> {
        self.wrappers
            .iter()
            .filter(|wrapper| section.is_none() || wrapper.section.as_deref() == section)
            .find_map(|wrapper| wrapper.control.check_validity().err())
    }

    fn named_control_mut(&mut self, field: &str) -> Result<&mut Control, FormError> {
        self.wrappers
            .iter_mut()
            .map(|wrapper| &mut wrapper.control)
            .find(|control| control.name() == Some(field))
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }

    fn refresh_rules(&mut self) {
        let payload = self.payload();
        rules::apply_rules(&mut self.wrappers, &self.bindings, &payload);
    }

    /// Pure render step: the whole view is derived from current state. After
    /// a successful submission this yields the fetched confirmation content.
    pub fn render(&self) -> Element {
        if let Some(html) = &self.replacement {
            return Element::new("div").attr("class", "section").raw(html);
        }
        let mut form = Element::new("form").attr("data-action", &self.action);
        if let Some(csrf) = &self.csrf_token {
            form = form.attr("data-csrf-token", csrf);
        }
        if let Some(token) = &self.config_token {
            form = form.attr("data-config-token", token);
        }
        match &self.wizard {
            Some(wizard) => {
                form.append(wizard.render_indicator());
                for wrapper in self.wrappers.iter().filter(|w| w.section.is_none()) {
                    form.append(wrapper.render());
                }
                for index in 0..wizard.sections().len() {
                    form.append(self.render_section(wizard, index));
                }
            }
            None => {
                for wrapper in &self.wrappers {
                    form.append(wrapper.render());
                }
            }
        }
        form
    }

    fn render_section(&self, wizard: &SectionWizard, index: usize) -> Element {
        let sections = wizard.sections();
        let name = &sections[index];
        let slug = to_class_name(name);
        let mut pane = Element::new("section")
            .attr("class", &format!("form-section form-section-{slug}"))
            .attr("id", &format!("section-{slug}"));
        if index != wizard.current_index() {
            pane = pane.attr("aria-hidden", "true");
        }

        // The pane's submit wrapper hosts the navigation buttons; a pane
        // without one gets a fresh button wrapper appended.
        let mut button_home: Option<Element> = None;
        for wrapper in self
            .wrappers
            .iter()
            .filter(|w| w.section.as_deref() == Some(name.as_str()))
        {
            let rendered = wrapper.render();
            if wrapper.kind == FieldKind::Submit && button_home.is_none() {
                button_home = Some(rendered);
            } else {
                pane.append(rendered);
            }
        }
        let mut button_wrapper = button_home.unwrap_or_else(|| {
            Element::new("div").attr("class", "field-wrapper form-button-wrapper")
        });

        if index + 1 < sections.len() {
            let label = format!("{} {}", self.placeholders.form_continue(), sections[index + 1]);
            button_wrapper.append(widgets::render_button_control(
                &label,
                FieldKind::Button,
                Some("arrow-right"),
            ));
        }
        if index > 0 {
            let label = format!("{} {}", self.placeholders.form_back(), sections[index - 1]);
            button_wrapper.prepend(widgets::render_button_control(
                &label,
                FieldKind::Button,
                Some("arrow-left"),
            ));
        }
        if button_wrapper.child_count() > 1 {
            let classes = button_wrapper.attr_value("class").unwrap_or_default().to_string();
            button_wrapper.set_attr("class", &format!("{classes} form-button-multi"));
        }
        pane.append(button_wrapper);
        pane
    }
}

/// Inline error block rendered in place of a form whose schema failed to
/// load. The failure is localized to the single form instance.
pub fn render_error(message: &str) -> Element {
    Element::new("div")
        .attr("class", "form form-error")
        .child(Element::new("span").attr("class", "icon icon-error"))
        .child(Element::new("p").text(message))
}
