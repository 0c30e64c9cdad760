//! Rule Engine: declarative visibility toggling driven by the payload.

use std::collections::BTreeMap;

use crate::schema::VisibilityRule;

use super::widgets::FieldWrapper;

const RULE_KIND_VISIBLE: &str = "visible";
const OPERATOR_EQ: &str = "eq";

/// Pairs a collected rule with the wrapper it was declared on.
#[derive(Debug, Clone)]
pub struct RuleBinding {
    pub wrapper: usize,
    pub rule: VisibilityRule,
}

/// Applies every binding against the given payload. Unsupported rule kinds
/// and operators leave the target wrapper untouched. Evaluation is synchronous
/// and total-order with respect to the triggering change.
pub(crate) fn apply_rules(
    wrappers: &mut [FieldWrapper],
    bindings: &[RuleBinding],
    payload: &BTreeMap<String, String>,
) {
    for binding in bindings {
        if binding.rule.kind != RULE_KIND_VISIBLE {
            continue;
        }
        let condition = &binding.rule.condition;
        if condition.operator != OPERATOR_EQ {
            continue;
        }
        let visible = payload
            .get(&condition.key)
            .is_some_and(|value| value == &condition.value);
        if let Some(wrapper) = wrappers.get_mut(binding.wrapper) {
            wrapper.hidden = !visible;
        }
    }
}
