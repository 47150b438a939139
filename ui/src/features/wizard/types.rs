// Core types for the step wizard - no dioxus imports needed here
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::sequencer::StepSequencer;

/// A single answer collected by a wizard step
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Flag(bool),
    Date(NaiveDate),
    Text(String),
    Map(BTreeMap<String, String>),
}

impl FormValue {
    /// Blank values fail `required` and are ignored by every other rule
    pub fn is_blank(&self) -> bool {
        match self {
            FormValue::Text(text) => text.trim().is_empty(),
            FormValue::Map(map) => map.is_empty(),
            FormValue::Date(_) | FormValue::Flag(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FormValue::Date(date) => Some(*date),
            FormValue::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FormValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            FormValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Flag(value)
    }
}

impl From<NaiveDate> for FormValue {
    fn from(value: NaiveDate) -> Self {
        FormValue::Date(value)
    }
}

impl From<BTreeMap<String, String>> for FormValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        FormValue::Map(value)
    }
}

/// Answers accumulated across steps, keyed by field name
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData(BTreeMap<String, FormValue>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for step candidates
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FormValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FormValue> {
        self.0.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FormValue::as_text)
    }

    /// Text value or an empty string, for binding inputs
    pub fn text_or_empty(&self, field: &str) -> String {
        self.text(field).unwrap_or_default().to_string()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite only the keys present in `update`; unrelated keys persist
    pub fn merge(&mut self, update: FormData) {
        self.0.extend(update.0);
    }

    /// Non-mutating merge used to build validation input
    pub fn merged(&self, update: &FormData) -> FormData {
        let mut combined = self.clone();
        combined.merge(update.clone());
        combined
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<FormValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

/// Field name -> human readable message
pub type FieldErrors = BTreeMap<String, String>;

// Action enum for state mutations
#[derive(Clone, Debug)]
pub enum WizardAction {
    SetFormData(FormData),
    NextStep,
    PrevStep,
    ClearFormData,
    SetErrors(FieldErrors),
    ClearErrors(Vec<String>),
    SetFormError(Option<String>),
    SetSubmitting(bool),
}

/// State of one wizard flow
#[derive(Clone, Debug)]
pub struct WizardState {
    pub sequencer: StepSequencer,
    pub form_data: FormData,
    pub errors: FieldErrors,
    // Form-level error banner (network/API failures that are not field specific)
    pub form_error: Option<String>,
    pub is_submitting: bool,
}

impl WizardState {
    pub fn new(sequencer: StepSequencer) -> Self {
        Self {
            sequencer,
            form_data: FormData::new(),
            errors: FieldErrors::new(),
            form_error: None,
            is_submitting: false,
        }
    }

    /// Reduces the state based on an action in-place (preserves Dioxus Signal reactivity)
    pub fn reduce_in_place(&mut self, action: WizardAction) {
        match action {
            WizardAction::SetFormData(update) => {
                self.form_data.merge(update);
            }
            WizardAction::NextStep => {
                let from = self.sequencer.current_index();
                let signal = self.sequencer.advance();
                crate::console_debug!("[WIZARD] NextStep from {} -> {:?}", from, signal);
            }
            WizardAction::PrevStep => {
                let from = self.sequencer.current_index();
                let signal = self.sequencer.retreat();
                crate::console_debug!("[WIZARD] PrevStep from {} -> {:?}", from, signal);
            }
            WizardAction::ClearFormData => {
                self.form_data = FormData::new();
                self.errors.clear();
                self.form_error = None;
                self.is_submitting = false;
                self.sequencer.reset();
            }
            WizardAction::SetErrors(errors) => {
                self.errors.extend(errors);
            }
            WizardAction::ClearErrors(fields) => {
                for field in fields {
                    self.errors.remove(&field);
                }
            }
            WizardAction::SetFormError(error) => {
                self.form_error = error;
            }
            WizardAction::SetSubmitting(submitting) => {
                self.is_submitting = submitting;
            }
        }
    }

    pub fn current_step_index(&self) -> usize {
        self.sequencer.current_index()
    }

    pub fn error_for(&self, field: &str) -> Option<&String> {
        self.errors.get(field)
    }
}
