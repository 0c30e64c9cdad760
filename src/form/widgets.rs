//! Widget Factory: maps field definitions onto typed controls and renders
//! them.
//!
//! Each [`FieldDefinition`] becomes exactly one [`FieldWrapper`], in schema
//! order. The wrapper keeps the rule-addressable class identity, the optional
//! section tag, and the live control state; rendering derives markup from that
//! state and never stores any of its own.

use crate::markup::{to_class_name, Element};
use crate::schema::{FieldDefinition, FieldKind};

/// Native-style validity failure for a single control. The carrying field is
/// the focus/scroll target when a transition is blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityError {
    pub field: String,
    pub message: String,
}

impl ValidityError {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// One checkbox or radio option with its derived per-option identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOption {
    pub id: String,
    pub value: String,
    pub checked: bool,
}

/// Live state of a single form control.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// text, email, tel, and hidden inputs.
    Input {
        field: String,
        kind: FieldKind,
        placeholder: String,
        value: String,
        required: bool,
    },
    TextArea {
        field: String,
        placeholder: String,
        value: String,
        required: bool,
    },
    /// `selected == None` means the disabled placeholder when one exists,
    /// otherwise the implicitly selected first option.
    Select {
        field: String,
        placeholder: Option<String>,
        options: Vec<String>,
        selected: Option<usize>,
        required: bool,
    },
    /// Checkbox or radio group sharing one field identity.
    Toggles {
        field: String,
        kind: FieldKind,
        options: Vec<ToggleOption>,
    },
    Heading {
        text: String,
    },
    Copy {
        text: String,
    },
    Button {
        label: String,
        kind: FieldKind,
        icon: Option<String>,
        redirect_target: Option<String>,
    },
}

impl Control {
    /// Field identifier for named controls; decorative controls have none.
    pub fn name(&self) -> Option<&str> {
        match self {
            Control::Input { field, .. }
            | Control::TextArea { field, .. }
            | Control::Select { field, .. }
            | Control::Toggles { field, .. } => Some(field),
            Control::Heading { .. } | Control::Copy { .. } | Control::Button { .. } => None,
        }
    }

    /// Native-style per-control validity check.
    pub fn check_validity(&self) -> Result<(), ValidityError> {
        match self {
            Control::Input {
                field,
                kind,
                value,
                required,
                ..
            } => {
                if value.is_empty() {
                    if *required {
                        Err(ValidityError::new(field, "Please fill in this field."))
                    } else {
                        Ok(())
                    }
                } else if *kind == FieldKind::Email && !is_email_address(value) {
                    Err(ValidityError::new(field, "Please enter an email address."))
                } else {
                    Ok(())
                }
            }
            Control::TextArea {
                field,
                value,
                required: true,
                ..
            } => {
                if value.is_empty() {
                    Err(ValidityError::new(field, "Please fill in this field."))
                } else {
                    Ok(())
                }
            }
            Control::Select {
                field,
                placeholder,
                options,
                selected,
                required: true,
            } => {
                // With a placeholder present, no real option is selected yet.
                let chosen = selected.is_some() || (placeholder.is_none() && !options.is_empty());
                if chosen {
                    Ok(())
                } else {
                    Err(ValidityError::new(
                        field,
                        "Please select an item in the list.",
                    ))
                }
            }
            // Toggle options never carry the required constraint themselves;
            // a mandatory group only marks its label.
            _ => Ok(()),
        }
    }
}

/// A constructed field: rule-addressable class identity, optional section tag,
/// visibility flag, label, helper text, and the control itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrapper {
    pub class_id: String,
    pub kind: FieldKind,
    pub section: Option<String>,
    pub hidden: bool,
    pub label: Option<FieldLabel>,
    pub support: Option<String>,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLabel {
    pub target: String,
    pub text: String,
    pub required: bool,
}

/// Builds exactly one wrapper for a field definition.
pub(crate) fn build_wrapper(fd: &FieldDefinition) -> FieldWrapper {
    let style = fd
        .style
        .as_deref()
        .map(|style| format!(" form-{style}"))
        .unwrap_or_default();
    let class_id = format!("form-{}-wrapper{style}", fd.kind.as_str());

    let label = if fd.label.is_empty() {
        None
    } else {
        Some(FieldLabel {
            target: fd.field.clone(),
            text: fd.label.clone(),
            required: fd.mandatory,
        })
    };

    let (control, label, support) = match fd.kind {
        FieldKind::Heading => (
            Control::Heading {
                text: fd.label.clone(),
            },
            None,
            None,
        ),
        FieldKind::Copy => (
            Control::Copy {
                text: fd.label.clone(),
            },
            None,
            None,
        ),
        FieldKind::Select => (
            Control::Select {
                field: fd.field.clone(),
                placeholder: non_empty(&fd.placeholder),
                options: fd.options.clone(),
                selected: None,
                required: fd.mandatory,
            },
            label,
            non_empty(&fd.support),
        ),
        FieldKind::Checkbox | FieldKind::Radio => (
            Control::Toggles {
                field: fd.field.clone(),
                kind: fd.kind,
                options: fd
                    .options
                    .iter()
                    .map(|option| ToggleOption {
                        id: to_class_name(&format!("{} {}", fd.field, option)),
                        value: option.clone(),
                        checked: false,
                    })
                    .collect(),
            },
            label,
            None,
        ),
        FieldKind::Textarea => (
            Control::TextArea {
                field: fd.field.clone(),
                placeholder: fd.placeholder.clone(),
                value: fd.default_value.clone(),
                required: fd.mandatory,
            },
            label,
            None,
        ),
        FieldKind::Submit | FieldKind::Button => (
            Control::Button {
                label: fd.label.clone(),
                kind: fd.kind,
                icon: fd.icon.clone(),
                redirect_target: fd.redirect_target.clone(),
            },
            None,
            None,
        ),
        FieldKind::Hidden => (
            Control::Input {
                field: fd.field.clone(),
                kind: FieldKind::Hidden,
                placeholder: fd.placeholder.clone(),
                value: fd.default_value.clone(),
                required: fd.mandatory,
            },
            None,
            None,
        ),
        FieldKind::Text | FieldKind::Email | FieldKind::Tel => (
            Control::Input {
                field: fd.field.clone(),
                kind: fd.kind,
                placeholder: fd.placeholder.clone(),
                value: fd.default_value.clone(),
                required: fd.mandatory,
            },
            label,
            non_empty(&fd.support),
        ),
    };

    FieldWrapper {
        class_id,
        kind: fd.kind,
        section: fd.section.clone(),
        hidden: false,
        label,
        support,
        control,
    }
}

// Type-mismatch check for email inputs: one `@` with non-empty local and
// domain parts, matching the coarse native constraint.
fn is_email_address(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl FieldWrapper {
    pub fn render(&self) -> Element {
        let mut classes = format!("{} field-wrapper", self.class_id);
        if self.kind == FieldKind::Submit {
            classes.push_str(" form-button-wrapper");
        }
        if self.hidden {
            classes.push_str(" hidden");
        }
        let mut wrapper = Element::new("div").attr("class", &classes);
        if let Some(section) = &self.section {
            wrapper = wrapper.attr("data-section", section);
        }
        if let Some(label) = &self.label {
            wrapper.append(render_label(label));
        }
        match &self.control {
            Control::Heading { text } => wrapper.append(Element::new("h3").text(text)),
            Control::Copy { text } => wrapper.append(Element::new("p").text(text)),
            Control::Input { .. } => wrapper.append(self.render_input()),
            Control::TextArea { .. } => wrapper.append(self.render_textarea()),
            Control::Select { .. } => wrapper.append(self.render_select()),
            Control::Toggles { kind, options, .. } => {
                for (index, option) in options.iter().enumerate() {
                    wrapper.append(self.render_toggle(*kind, index, option));
                }
            }
            Control::Button { .. } => wrapper.append(self.render_button()),
        }
        if let Some(support) = &self.support {
            wrapper.append(Element::new("small").text(support));
        }
        wrapper
    }

    fn render_input(&self) -> Element {
        let Control::Input {
            field,
            kind,
            placeholder,
            value,
            required,
        } = &self.control
        else {
            unreachable!("render_input on non-input control");
        };
        let mut input = Element::new("input")
            .attr("type", kind.as_str())
            .attr("id", field)
            .attr("name", field);
        if !placeholder.is_empty() {
            input = input.attr("placeholder", placeholder);
        }
        if !value.is_empty() {
            input = input.attr("value", value);
        }
        if *required {
            input = input.flag("required");
        }
        input
    }

    fn render_textarea(&self) -> Element {
        let Control::TextArea {
            field,
            placeholder,
            value,
            required,
        } = &self.control
        else {
            unreachable!("render_textarea on non-textarea control");
        };
        let mut textarea = Element::new("textarea").attr("id", field).attr("name", field);
        if !placeholder.is_empty() {
            textarea = textarea.attr("placeholder", placeholder);
        }
        if !value.is_empty() {
            textarea = textarea.text(value);
        }
        if *required {
            textarea = textarea.flag("required");
        }
        textarea
    }

    fn render_select(&self) -> Element {
        let Control::Select {
            field,
            placeholder,
            options,
            selected,
            required,
        } = &self.control
        else {
            unreachable!("render_select on non-select control");
        };
        let mut select = Element::new("select").attr("id", field).attr("name", field);
        if let Some(placeholder) = placeholder {
            let mut option = Element::new("option").text(placeholder);
            if selected.is_none() {
                option = option.flag("selected");
            }
            select.append(option.flag("disabled"));
        }
        for (index, value) in options.iter().enumerate() {
            let mut option = Element::new("option").attr("value", value).text(value);
            if *selected == Some(index) {
                option = option.flag("selected");
            }
            select.append(option);
        }
        if *required {
            select.set_attr("required", "");
        }
        Element::new("div").attr("class", "select-wrapper").child(select)
    }

    fn render_toggle(&self, kind: FieldKind, _index: usize, option: &ToggleOption) -> Element {
        let Control::Toggles { field, .. } = &self.control else {
            unreachable!("render_toggle on non-toggle control");
        };
        let mut input = Element::new("input")
            .attr("type", kind.as_str())
            .attr("id", &option.id)
            .attr("name", field)
            .attr("value", &option.value);
        if option.checked {
            input = input.flag("checked");
        }
        let label = Element::new("label")
            .attr("for", &option.id)
            .text(&option.value);
        Element::new("div")
            .attr("class", &format!("{}-wrapper", kind.as_str()))
            .child(input)
            .child(label)
    }

    fn render_button(&self) -> Element {
        let Control::Button {
            label, kind, icon, ..
        } = &self.control
        else {
            unreachable!("render_button on non-button control");
        };
        render_button_control(label, *kind, icon.as_deref())
    }
}

fn render_label(label: &FieldLabel) -> Element {
    let mut element = Element::new("label").attr("for", &label.target).text(&label.text);
    if label.required {
        element = element.class("required");
    }
    element
}

/// Shared button renderer, also used for the wizard's navigation buttons.
/// An icon replaces the default `button` class with `has-icon`.
pub(crate) fn render_button_control(label: &str, kind: FieldKind, icon: Option<&str>) -> Element {
    let mut button = Element::new("button")
        .attr("class", "button")
        .attr("type", kind.as_str())
        .text(label);
    if let Some(icon) = icon {
        button.set_attr("class", "has-icon");
        button.append(Element::new("span").attr("class", &format!("icon icon-{icon}")));
    }
    button
}
