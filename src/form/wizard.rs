//! Section Wizard: sequential pane state machine over the section partition.

use crate::markup::{to_class_name, Element};

/// Wizard over the distinct section names, in first-seen order. The only
/// state is the current index; tab marks, pane visibility, and the progress
/// fill are all derived at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionWizard {
    sections: Vec<String>,
    current: usize,
    complete: Vec<bool>,
}

impl SectionWizard {
    /// Builds a wizard only when more than one distinct section exists;
    /// otherwise all fields render in one flat pane.
    pub(crate) fn from_sections(sections: Vec<String>) -> Option<Self> {
        if sections.len() > 1 {
            Some(Self {
                complete: vec![false; sections.len()],
                sections,
                current: 0,
            })
        } else {
            None
        }
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> &str {
        &self.sections[self.current]
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.sections.len()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    /// Continuous progress fill, proportional to `index / (n - 1)`.
    pub fn progress_fill(&self) -> f64 {
        self.current as f64 / (self.sections.len() - 1) as f64 * 100.0
    }

    /// Forward transition. Validity gating happens in the owning form before
    /// this is called; the departed tab is marked complete.
    pub(crate) fn advance(&mut self) {
        if self.has_next() {
            self.complete[self.current] = true;
            self.current += 1;
        }
    }

    /// Backward transition, unconditional.
    pub(crate) fn retreat(&mut self) {
        if self.has_prev() {
            self.complete[self.current] = true;
            self.current -= 1;
        }
    }

    /// Progress indicator: continuous fill bar plus one tab per section.
    pub(crate) fn render_indicator(&self) -> Element {
        let fill = Element::new("div")
            .attr("class", "completed")
            .attr("style", &format!("width: {}%", format_fill(self.progress_fill())));
        let mut tabs = Element::new("ol");
        for (index, section) in self.sections.iter().enumerate() {
            let mut tab = Element::new("li")
                .attr("data-sections", &self.sections.len().to_string())
                .attr("id", &format!("tab-{}", to_class_name(section)))
                .text(section);
            if index == self.current {
                tab = tab.attr("aria-current", "section");
            }
            if self.complete[index] {
                tab = tab.attr("data-complete", "true");
            }
            tabs.append(tab);
        }
        Element::new("div")
            .attr("class", "form-section-indicator")
            .child(Element::new("div").child(fill))
            .child(tabs)
    }
}

fn format_fill(percent: f64) -> String {
    // Trim float noise without losing fractional steps like 66.666…%.
    let rounded = (percent * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}
