//! Story log: per-step records of a journey run.
//!
//! The flow emits one [`StepRecord`] per action through a [`StoryLog`].
//! [`TracingStoryLog`] forwards them as structured `tracing` events and
//! [`RunReport`] collects them into a JSON document.

use crate::control::ControlKind;
use crate::flow::JourneyState;
use crate::result::{QuoteError, QuoteErrorKind, QuoteResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What a step did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Open the base URL
    Navigate,
    /// Read a field value from the data source
    Lookup,
    /// Check a control is displayed
    Verify,
    /// Type into a text box
    Set,
    /// Pick a list box option
    Select,
    /// Activate a button, link, check box or radio button
    Click,
}

impl StepKind {
    /// Lower-case name used in logs and plans
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Navigate => "navigate",
            Self::Lookup => "lookup",
            Self::Verify => "verify",
            Self::Set => "set",
            Self::Select => "select",
            Self::Click => "click",
        }
    }
}

/// Step result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Step passed
    Passed,
    /// Step failed and stopped the run
    Failed,
}

impl StepStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// One executed step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Journey state the step belongs to
    pub state: JourneyState,
    /// Step kind
    pub kind: StepKind,
    /// Control label, URL or column name
    pub label: String,
    /// Control type acted on, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control: Option<ControlKind>,
    /// Value typed or selected (secrets masked)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Outcome
    pub status: StepStatus,
    /// Wall time spent in the step
    pub elapsed_ms: u64,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepRecord {
    /// Create a passing record
    #[must_use]
    pub fn passed(state: JourneyState, kind: StepKind, label: impl Into<String>) -> Self {
        Self {
            state,
            kind,
            label: label.into(),
            control: None,
            value: None,
            status: StepStatus::Passed,
            elapsed_ms: 0,
            error: None,
        }
    }

    /// Create a failing record
    #[must_use]
    pub fn failed(
        state: JourneyState,
        kind: StepKind,
        label: impl Into<String>,
        error: &QuoteError,
    ) -> Self {
        Self {
            status: StepStatus::Failed,
            error: Some(error.to_string()),
            ..Self::passed(state, kind, label)
        }
    }

    /// Attach the control type
    #[must_use]
    pub const fn with_control(mut self, control: ControlKind) -> Self {
        self.control = Some(control);
        self
    }

    /// Attach the value typed or selected
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach the elapsed time
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }
}

/// Receiver of journey progress
pub trait StoryLog: Send {
    /// Called once before the first step
    fn set_story_name(&mut self, name: &str);

    /// Called after every step, passed or failed
    fn on_step(&mut self, record: &StepRecord);

    /// Called once with the state the run ended in
    fn on_finish(&mut self, state: JourneyState, error: Option<&QuoteError>);
}

/// Forwards journey progress to `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingStoryLog {
    story: String,
}

impl TracingStoryLog {
    /// Create a new log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoryLog for TracingStoryLog {
    fn set_story_name(&mut self, name: &str) {
        self.story = name.to_string();
        tracing::info!(story = %self.story, "story started");
    }

    fn on_step(&mut self, record: &StepRecord) {
        match &record.error {
            None => tracing::debug!(
                story = %self.story,
                state = %record.state,
                kind = record.kind.as_str(),
                label = %record.label,
                value = record.value.as_deref().unwrap_or(""),
                elapsed_ms = record.elapsed_ms,
                "step passed"
            ),
            Some(error) => tracing::warn!(
                story = %self.story,
                state = %record.state,
                kind = record.kind.as_str(),
                label = %record.label,
                error = %error,
                "step failed"
            ),
        }
    }

    fn on_finish(&mut self, state: JourneyState, error: Option<&QuoteError>) {
        match error {
            None => tracing::info!(story = %self.story, state = %state, "story passed"),
            Some(e) => {
                tracing::warn!(story = %self.story, state = %state, error = %e, "story failed");
            }
        }
    }
}

/// Collected outcome of one run, serialisable to JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Story name
    pub story: String,
    /// Steps in execution order
    pub steps: Vec<StepRecord>,
    /// State the run ended in
    pub final_state: Option<JourneyState>,
    /// Error that stopped the run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Kind of the stopping error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<QuoteErrorKind>,
    /// Total run time
    pub duration_ms: u64,
    /// Screenshot file written on failure, relative to the report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    /// Forwarded copy of every event
    #[serde(skip)]
    tracing: TracingStoryLog,
}

impl RunReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the run reached `Done` without error
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.error.is_none() && self.final_state == Some(JourneyState::Done)
    }

    /// Number of passed steps
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_passed()).count()
    }

    /// The step that stopped the run
    #[must_use]
    pub fn failed_step(&self) -> Option<&StepRecord> {
        self.steps.iter().find(|s| !s.status.is_passed())
    }

    /// Steps executed while in `state`
    pub fn steps_in(&self, state: JourneyState) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(move |s| s.state == state)
    }

    /// Record the total run time
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_json(&self) -> QuoteResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON report to `path`
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails
    pub fn save(&self, path: &Path) -> QuoteResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl StoryLog for RunReport {
    fn set_story_name(&mut self, name: &str) {
        self.story = name.to_string();
        self.tracing.set_story_name(name);
    }

    fn on_step(&mut self, record: &StepRecord) {
        self.tracing.on_step(record);
        self.steps.push(record.clone());
    }

    fn on_finish(&mut self, state: JourneyState, error: Option<&QuoteError>) {
        self.tracing.on_finish(state, error);
        self.final_state = Some(state);
        self.error = error.map(ToString::to_string);
        self.error_kind = error.map(QuoteError::kind);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn column_missing() -> QuoteError {
        QuoteError::ColumnNotFound {
            column: "FirstName".to_string(),
        }
    }

    mod step_record_tests {
        use super::*;

        #[test]
        fn test_passed_record() {
            let record = StepRecord::passed(JourneyState::VehicleData, StepKind::Set, "Make")
                .with_control(ControlKind::ListBox)
                .with_value("Honda")
                .with_elapsed(Duration::from_millis(12));
            assert!(record.status.is_passed());
            assert_eq!(record.value.as_deref(), Some("Honda"));
            assert_eq!(record.elapsed_ms, 12);
            assert!(record.error.is_none());
        }

        #[test]
        fn test_failed_record_keeps_message() {
            let record = StepRecord::failed(
                JourneyState::InsurantData,
                StepKind::Lookup,
                "FirstName",
                &column_missing(),
            );
            assert_eq!(record.status, StepStatus::Failed);
            assert!(record.error.unwrap().contains("FirstName"));
        }

        #[test]
        fn test_record_json_omits_empty_fields() {
            let record = StepRecord::passed(JourneyState::Home, StepKind::Verify, "Truck");
            let json = serde_json::to_string(&record).unwrap();
            assert!(json.contains("\"kind\":\"verify\""));
            assert!(!json.contains("error"));
            assert!(!json.contains("value"));
        }
    }

    mod run_report_tests {
        use super::*;

        #[test]
        fn test_collects_steps_in_order() {
            let mut report = RunReport::new();
            report.set_story_name("Purchase Vehicle");
            report.on_step(&StepRecord::passed(JourneyState::Home, StepKind::Verify, "Truck"));
            report.on_step(&StepRecord::passed(JourneyState::Home, StepKind::Click, "Automobile"));
            report.on_finish(JourneyState::Done, None);

            assert_eq!(report.story, "Purchase Vehicle");
            assert_eq!(report.passed_count(), 2);
            assert_eq!(report.steps[1].label, "Automobile");
            assert!(report.is_passed());
            assert!(report.failed_step().is_none());
        }

        #[test]
        fn test_failure_sets_error_kind() {
            let mut report = RunReport::new();
            let err = column_missing();
            report.on_step(&StepRecord::failed(
                JourneyState::InsurantData,
                StepKind::Lookup,
                "FirstName",
                &err,
            ));
            report.on_finish(JourneyState::InsurantData, Some(&err));

            assert!(!report.is_passed());
            assert_eq!(report.error_kind, Some(QuoteErrorKind::ColumnNotFound));
            assert_eq!(report.failed_step().unwrap().label, "FirstName");
            assert_eq!(report.steps_in(JourneyState::InsurantData).count(), 1);
        }

        #[test]
        fn test_unfinished_report_is_not_passed() {
            assert!(!RunReport::new().is_passed());
        }

        #[test]
        fn test_save_writes_json() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("report.json");
            let mut report = RunReport::new();
            report.set_story_name("Purchase Vehicle");
            report.on_finish(JourneyState::Done, None);
            report.set_duration(Duration::from_millis(1500));
            report.save(&path).unwrap();

            let json: serde_json::Value =
                serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
            assert_eq!(json["story"], "Purchase Vehicle");
            assert_eq!(json["final_state"], "done");
            assert_eq!(json["duration_ms"], 1500);
        }
    }
}
