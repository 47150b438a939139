use std::future::Future;

use tracing::{info, warn};

use super::errors::WizardError;
use super::sequencer::{Advance, Retreat, StepSequencer};
use super::types::{FieldErrors, FormData, WizardAction, WizardState};
use super::validation::{validate_partial, Schema};
use crate::services::navigation::{AppRoute, NavigationBridge};

/// What happened to a step submission
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Data merged and the sequencer moved to `index`
    Advanced { index: usize, route: AppRoute },
    /// Validation (or the remote call) rejected the step; nothing was merged
    Invalid(FieldErrors),
    /// Remote call failed with a form-level message; nothing was merged
    Failed(String),
    /// Final step accepted; `data` is everything collected before the reset
    Completed { data: FormData, route: AppRoute },
    /// A submission for this wizard is already in flight
    Busy,
    /// A remote step resolved after the wizard was reset or moved on
    Stale,
}

/// Why a remote step call failed, already mapped to wizard terms
#[derive(Clone, Debug, PartialEq)]
pub enum StepFailure {
    Field { field: String, message: String },
    Form(String),
}

/// Outcome of pressing "back"
#[derive(Clone, Debug, PartialEq)]
pub enum BackOutcome {
    Moved { index: usize },
    /// On the first step: ask the user before discarding their answers
    ConfirmExit,
    /// A submission is in flight; the step cannot change under it
    Blocked,
}

/// A validated step waiting for its remote call
#[derive(Clone, Debug)]
pub struct PendingStep {
    generation: u64,
    step_index: usize,
    fields: Vec<String>,
    candidate: FormData,
    /// Everything collected so far plus this step's candidate
    pub payload: FormData,
}

/// Wizard controller: validation-gated transitions over one [`WizardState`].
///
/// All mutation goes through [`WizardAction`]s. One instance exists per flow
/// and is passed explicitly to whoever drives it.
#[derive(Clone, Debug)]
pub struct Wizard {
    state: WizardState,
    schema: Schema,
    // Bumped on every reset so late remote results can be recognised
    generation: u64,
}

impl Wizard {
    pub fn new(sequencer: StepSequencer, schema: Schema) -> Self {
        Self {
            state: WizardState::new(sequencer),
            schema,
            generation: 0,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn sequencer(&self) -> &StepSequencer {
        &self.state.sequencer
    }

    pub fn form_data(&self) -> &FormData {
        &self.state.form_data
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn current_step_index(&self) -> usize {
        self.state.current_step_index()
    }

    /// Fields owned by the current step
    pub fn current_fields(&self) -> Vec<String> {
        self.state.sequencer.current_step().fields.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub fn can_skip_current(&self) -> bool {
        let sequencer = &self.state.sequencer;
        sequencer.can_skip(sequencer.current_index())
    }

    /// Inline feedback for `fields` without touching the state
    pub fn preview_errors<S: AsRef<str>>(&self, fields: &[S], candidate: &FormData) -> FieldErrors {
        let input = self.state.form_data.merged(candidate);
        validate_partial(&self.schema, &input, fields)
    }

    /// Validate `fields` against the collected data plus `candidate`, then
    /// merge and advance, or record errors and stay put.
    ///
    /// With `skip` the validation is bypassed entirely.
    pub fn submit_step<S: AsRef<str>>(
        &mut self,
        fields: &[S],
        candidate: FormData,
        skip: bool,
    ) -> Result<StepOutcome, WizardError> {
        if self.state.is_submitting {
            return Ok(StepOutcome::Busy);
        }

        if skip {
            let sequencer = &self.state.sequencer;
            if !sequencer.can_skip(sequencer.current_index()) {
                return Err(WizardError::SkipNotAllowed {
                    step: sequencer.current_step().name.clone(),
                });
            }
            info!(
                "Skipping step '{}'",
                self.state.sequencer.current_step().name
            );
            let fields = self.current_fields();
            return Ok(self.commit(&fields, candidate));
        }

        let errors = self.preview_errors(fields, &candidate);
        let field_names = owned_names(fields);
        if !errors.is_empty() {
            self.record_errors(&field_names, errors.clone());
            return Ok(StepOutcome::Invalid(errors));
        }

        Ok(self.commit(&field_names, candidate))
    }

    /// Skip the current step, writing the step's own defaults
    pub fn skip_step(&mut self) -> Result<StepOutcome, WizardError> {
        let step = self.state.sequencer.current_step();
        let fields = step.fields.clone();
        let candidate = step.skip_candidate();
        self.submit_step(&fields, candidate, true)
    }

    /// First phase of a step whose "continue" needs a network call.
    ///
    /// Validates without merging. On success the wizard is marked as
    /// submitting and further submissions answer `Busy` until
    /// [`Wizard::finish_remote_step`] runs.
    pub fn begin_remote_step<S: AsRef<str>>(
        &mut self,
        fields: &[S],
        candidate: FormData,
    ) -> Result<PendingStep, StepOutcome> {
        if self.state.is_submitting {
            return Err(StepOutcome::Busy);
        }

        let field_names = owned_names(fields);
        let errors = self.preview_errors(fields, &candidate);
        if !errors.is_empty() {
            self.record_errors(&field_names, errors.clone());
            return Err(StepOutcome::Invalid(errors));
        }

        Ok(self.mark_pending(field_names, candidate))
    }

    /// Skip a step whose "continue" needs a network call.
    ///
    /// The step's own defaults are sent without validation, like
    /// [`Wizard::skip_step`]; a step that may not be skipped fails with a
    /// form-level message.
    pub fn begin_remote_skip(&mut self) -> Result<PendingStep, StepOutcome> {
        if self.state.is_submitting {
            return Err(StepOutcome::Busy);
        }
        if !self.can_skip_current() {
            let error = WizardError::SkipNotAllowed {
                step: self.state.sequencer.current_step().name.clone(),
            };
            warn!("{}", error);
            return Err(StepOutcome::Failed(error.to_string()));
        }

        let step = self.state.sequencer.current_step();
        info!("Skipping remote step '{}'", step.name);
        let fields = step.fields.clone();
        let candidate = step.skip_candidate();
        Ok(self.mark_pending(fields, candidate))
    }

    fn mark_pending(&mut self, fields: Vec<String>, candidate: FormData) -> PendingStep {
        self.state.reduce_in_place(WizardAction::SetFormError(None));
        self.state.reduce_in_place(WizardAction::SetSubmitting(true));

        PendingStep {
            generation: self.generation,
            step_index: self.current_step_index(),
            payload: self.state.form_data.merged(&candidate),
            fields,
            candidate,
        }
    }

    /// Second phase: apply the remote result of a pending step
    pub fn finish_remote_step(
        &mut self,
        pending: PendingStep,
        result: Result<(), StepFailure>,
    ) -> StepOutcome {
        if pending.generation != self.generation || pending.step_index != self.current_step_index()
        {
            warn!(
                "Ignoring remote result for step {} issued before a reset",
                pending.step_index
            );
            return StepOutcome::Stale;
        }

        self.state.reduce_in_place(WizardAction::SetSubmitting(false));

        match result {
            Ok(()) => self.commit(&pending.fields, pending.candidate),
            Err(StepFailure::Field { field, message }) => {
                let errors: FieldErrors = [(field, message)].into();
                self.state.reduce_in_place(WizardAction::SetErrors(errors.clone()));
                StepOutcome::Invalid(errors)
            }
            Err(StepFailure::Form(message)) => {
                self.state
                    .reduce_in_place(WizardAction::SetFormError(Some(message.clone())));
                StepOutcome::Failed(message)
            }
        }
    }

    /// Both phases in one call, for owners that can hold the wizard across an await
    pub async fn submit_remote_step<S, F, Fut>(
        &mut self,
        fields: &[S],
        candidate: FormData,
        call: F,
    ) -> StepOutcome
    where
        S: AsRef<str>,
        F: FnOnce(FormData) -> Fut,
        Fut: Future<Output = Result<(), StepFailure>>,
    {
        let pending = match self.begin_remote_step(fields, candidate) {
            Ok(pending) => pending,
            Err(outcome) => return outcome,
        };
        let result = call(pending.payload.clone()).await;
        self.finish_remote_step(pending, result)
    }

    /// `submit_step` followed by the matching screen transition
    pub fn submit_and_navigate<S: AsRef<str>>(
        &mut self,
        fields: &[S],
        candidate: FormData,
        skip: bool,
        nav: &dyn NavigationBridge,
    ) -> Result<StepOutcome, WizardError> {
        let outcome = self.submit_step(fields, candidate, skip)?;
        follow(&outcome, nav);
        Ok(outcome)
    }

    /// Back button: pop one screen, or ask to confirm leaving on the first step
    pub fn go_back(&mut self, nav: &dyn NavigationBridge) -> BackOutcome {
        if self.state.is_submitting {
            return BackOutcome::Blocked;
        }
        match self.state.sequencer.clone().retreat() {
            Retreat::Moved { index } => {
                self.state.reduce_in_place(WizardAction::PrevStep);
                nav.back();
                BackOutcome::Moved { index }
            }
            Retreat::ExitRequested => BackOutcome::ConfirmExit,
        }
    }

    /// The host router is showing step `index`, e.g. after the browser's
    /// own back button.
    ///
    /// Backward moves are followed so earlier answers can be edited. Steps
    /// ahead of the current one were never validated, so a forward jump
    /// returns the route the wizard is really on.
    pub fn sync_to_step(&mut self, index: usize) -> Option<AppRoute> {
        if self.state.is_submitting || index > self.current_step_index() {
            return Some(self.state.sequencer.current_route());
        }
        while self.current_step_index() > index {
            self.state.reduce_in_place(WizardAction::PrevStep);
        }
        None
    }

    /// The user confirmed abandoning the flow: discard everything and leave
    pub fn confirm_exit(&mut self, nav: &dyn NavigationBridge) {
        info!("Wizard abandoned; discarding collected data");
        self.invalidate();
        if nav.can_go_back() {
            nav.back();
        } else {
            nav.push(AppRoute::Welcome);
        }
    }

    /// The user declined to leave; nothing changes
    pub fn cancel_exit(&self) -> usize {
        self.current_step_index()
    }

    /// Reset for reuse or unmount; pending remote steps become stale
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.state.reduce_in_place(WizardAction::ClearFormData);
    }

    fn record_errors(&mut self, fields: &[String], errors: FieldErrors) {
        self.state
            .reduce_in_place(WizardAction::ClearErrors(fields.to_vec()));
        self.state.reduce_in_place(WizardAction::SetErrors(errors));
    }

    fn commit(&mut self, fields: &[String], candidate: FormData) -> StepOutcome {
        self.state.reduce_in_place(WizardAction::SetFormData(candidate));
        self.state
            .reduce_in_place(WizardAction::ClearErrors(fields.to_vec()));
        self.state.reduce_in_place(WizardAction::SetFormError(None));

        match self.state.sequencer.clone().advance() {
            Advance::Moved { index, route } => {
                self.state.reduce_in_place(WizardAction::NextStep);
                StepOutcome::Advanced { index, route }
            }
            Advance::Completed => {
                let data = self.state.form_data.clone();
                let route = self.state.sequencer.flow().completion_route();
                info!("Wizard completed with {} fields", data.len());
                self.invalidate();
                StepOutcome::Completed { data, route }
            }
        }
    }
}

/// Turn a step outcome into the matching screen transition
pub fn follow(outcome: &StepOutcome, nav: &dyn NavigationBridge) {
    match outcome {
        StepOutcome::Advanced { route, .. } | StepOutcome::Completed { route, .. } => {
            nav.push(route.clone())
        }
        _ => {}
    }
}

fn owned_names<S: AsRef<str>>(fields: &[S]) -> Vec<String> {
    fields.iter().map(|name| name.as_ref().to_string()).collect()
}
