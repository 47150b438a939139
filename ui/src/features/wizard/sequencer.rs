use super::errors::WizardError;
use super::types::{FormData, FormValue};
use crate::services::navigation::AppRoute;

/// Which onboarding flow a sequencer drives; decides the routes it maps to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Registration,
    ProfileCreation,
}

impl Flow {
    pub fn route_for(&self, index: usize) -> AppRoute {
        match self {
            Flow::Registration => AppRoute::Registration { step: index },
            Flow::ProfileCreation => AppRoute::ProfileCreation { step: index },
        }
    }

    /// Where the user lands after the final step succeeds
    pub fn completion_route(&self) -> AppRoute {
        match self {
            Flow::Registration => AppRoute::RegistrationComplete,
            Flow::ProfileCreation => AppRoute::ProfileComplete,
        }
    }
}

/// Skip capability of a flow
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowKind {
    /// Every step is mandatory
    Linear,
    /// Steps at or after `mandatory_prefix` may be bypassed
    Skippable { mandatory_prefix: usize },
}

/// One screen's worth of fields
#[derive(Clone, Debug, PartialEq)]
pub struct StepDefinition {
    pub name: String,
    /// Fields this step owns and validates
    pub fields: Vec<String>,
    /// Values written for the owned fields when the step is skipped
    pub defaults: FormData,
}

impl StepDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            defaults: FormData::new(),
        }
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Declares an owned field together with its skip default
    pub fn field_with_default(
        mut self,
        field: impl Into<String>,
        default: impl Into<FormValue>,
    ) -> Self {
        let field = field.into();
        self.defaults.insert(field.clone(), default);
        self.fields.push(field);
        self
    }

    /// Candidate written when skipping: the step's own fields only
    pub fn skip_candidate(&self) -> FormData {
        self.fields
            .iter()
            .map(|field| {
                let value = self
                    .defaults
                    .get(field)
                    .cloned()
                    .unwrap_or_else(|| FormValue::Text(String::new()));
                (field.clone(), value)
            })
            .collect()
    }
}

/// Result of asking the sequencer to move forward
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    Moved { index: usize, route: AppRoute },
    /// Already on the last step; the caller finalises the wizard
    Completed,
}

/// Result of asking the sequencer to move back
#[derive(Clone, Debug, PartialEq)]
pub enum Retreat {
    Moved { index: usize },
    /// Already on the first step; the caller confirms before leaving
    ExitRequested,
}

/// Tracks the current step of a fixed, ordered list of steps
#[derive(Clone, Debug, PartialEq)]
pub struct StepSequencer {
    flow: Flow,
    kind: FlowKind,
    steps: Vec<StepDefinition>,
    current: usize,
}

impl StepSequencer {
    /// Strict sequencer: every step mandatory
    pub fn linear(flow: Flow, steps: Vec<StepDefinition>) -> Result<Self, WizardError> {
        Self::build(flow, FlowKind::Linear, steps)
    }

    /// Skip-capable sequencer: the first `mandatory_prefix` steps cannot be skipped
    pub fn skippable(
        flow: Flow,
        steps: Vec<StepDefinition>,
        mandatory_prefix: usize,
    ) -> Result<Self, WizardError> {
        Self::build(flow, FlowKind::Skippable { mandatory_prefix }, steps)
    }

    fn build(flow: Flow, kind: FlowKind, steps: Vec<StepDefinition>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::EmptyFlow);
        }
        Ok(Self {
            flow,
            kind,
            steps,
            current: 0,
        })
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn current_step(&self) -> &StepDefinition {
        // `current` never leaves 0..len: advance stops at the last step
        &self.steps[self.current]
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn step_name(&self, index: usize) -> Result<&str, WizardError> {
        self.steps
            .get(index)
            .map(|step| step.name.as_str())
            .ok_or(WizardError::OutOfRange {
                index,
                len: self.steps.len(),
            })
    }

    pub fn route_for(&self, index: usize) -> Result<AppRoute, WizardError> {
        if index >= self.steps.len() {
            return Err(WizardError::OutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        Ok(self.flow.route_for(index))
    }

    pub fn current_route(&self) -> AppRoute {
        self.flow.route_for(self.current)
    }

    pub fn can_skip(&self, index: usize) -> bool {
        match self.kind {
            FlowKind::Linear => false,
            FlowKind::Skippable { mandatory_prefix } => {
                index >= mandatory_prefix && index < self.steps.len()
            }
        }
    }

    pub fn advance(&mut self) -> Advance {
        if self.is_last() {
            return Advance::Completed;
        }
        self.current += 1;
        Advance::Moved {
            index: self.current,
            route: self.flow.route_for(self.current),
        }
    }

    pub fn retreat(&mut self) -> Retreat {
        if self.current == 0 {
            return Retreat::ExitRequested;
        }
        self.current -= 1;
        Retreat::Moved {
            index: self.current,
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// 1-based progress label such as "Step 2 of 6"
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.current + 1, self.steps.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(names: &[&str]) -> Vec<StepDefinition> {
        names.iter().map(|name| StepDefinition::new(*name)).collect()
    }

    #[test]
    fn test_empty_flow_rejected() {
        assert_eq!(
            StepSequencer::linear(Flow::Registration, Vec::new()),
            Err(WizardError::EmptyFlow)
        );
    }

    #[test]
    fn test_advance_stops_at_last_step() {
        let mut sequencer =
            StepSequencer::linear(Flow::Registration, steps(&["Name", "Username", "DOB"])).unwrap();

        assert_eq!(
            sequencer.advance(),
            Advance::Moved {
                index: 1,
                route: AppRoute::Registration { step: 1 }
            }
        );
        assert!(matches!(sequencer.advance(), Advance::Moved { index: 2, .. }));
        assert!(sequencer.is_last());
        assert_eq!(sequencer.advance(), Advance::Completed);
        assert_eq!(sequencer.current_index(), 2);
    }

    #[test]
    fn test_retreat_never_goes_negative() {
        let mut sequencer =
            StepSequencer::linear(Flow::Registration, steps(&["Name", "Username"])).unwrap();

        assert_eq!(sequencer.retreat(), Retreat::ExitRequested);
        assert_eq!(sequencer.current_index(), 0);

        sequencer.advance();
        assert_eq!(sequencer.retreat(), Retreat::Moved { index: 0 });
        assert_eq!(sequencer.retreat(), Retreat::ExitRequested);
        assert_eq!(sequencer.current_index(), 0);
    }

    #[test]
    fn test_step_name_lookup() {
        let sequencer =
            StepSequencer::linear(Flow::Registration, steps(&["Name", "Username"])).unwrap();
        assert_eq!(sequencer.step_name(1), Ok("Username"));
        assert_eq!(
            sequencer.step_name(2),
            Err(WizardError::OutOfRange { index: 2, len: 2 })
        );
        assert!(sequencer.route_for(5).is_err());
    }

    #[test]
    fn test_skip_capability() {
        let linear = StepSequencer::linear(Flow::Registration, steps(&["A", "B"])).unwrap();
        assert!(!linear.can_skip(0));
        assert!(!linear.can_skip(1));

        let skippable = StepSequencer::skippable(
            Flow::ProfileCreation,
            steps(&["A", "B", "C", "D", "E"]),
            3,
        )
        .unwrap();
        assert!(!skippable.can_skip(2));
        assert!(skippable.can_skip(3));
        assert!(skippable.can_skip(4));
        assert!(!skippable.can_skip(5));
    }

    #[test]
    fn test_skip_candidate_covers_only_own_fields() {
        let step = StepDefinition::new("Bio")
            .field("bio")
            .field_with_default("allowMessages", true);
        let candidate = step.skip_candidate();

        assert_eq!(candidate.text("bio"), Some(""));
        assert_eq!(candidate.get("allowMessages"), Some(&FormValue::Flag(true)));
        assert!(!candidate.contains("profilePicture"));
    }

    #[test]
    fn test_routes_follow_flow() {
        let mut sequencer =
            StepSequencer::skippable(Flow::ProfileCreation, steps(&["A", "B"]), 0).unwrap();
        assert_eq!(
            sequencer.current_route(),
            AppRoute::ProfileCreation { step: 0 }
        );
        sequencer.advance();
        assert_eq!(sequencer.progress_label(), "Step 2 of 2");
        assert_eq!(sequencer.flow().completion_route(), AppRoute::ProfileComplete);
    }
}
