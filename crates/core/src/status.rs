//! Status vocabulary shared by every requirement in the curriculum.

use serde::{Deserialize, Serialize};

/// Status of a requirement, group or milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Not started
    #[default]
    Pending,
    /// Being worked on
    #[serde(rename = "In Progress")]
    InProgress,
    /// Passed or finished
    Completed,
    /// Waived; counts as passed for aggregation
    Exempted,
    /// Attempted and not passed
    Failed,
}

impl Status {
    /// All statuses in display order.
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Exempted,
        Status::Failed,
    ];

    /// Completed or Exempted.
    pub fn is_done(self) -> bool {
        matches!(self, Status::Completed | Status::Exempted)
    }

    /// Whether any work has been recorded (InProgress, Completed or Exempted).
    pub fn is_started(self) -> bool {
        matches!(self, Status::InProgress | Status::Completed | Status::Exempted)
    }

    /// Roll a set of child statuses up into one parent status.
    ///
    /// Rules apply in order, first match wins:
    /// every child done → Completed; any Failed → Failed;
    /// any child started → InProgress; otherwise Pending.
    /// An empty set is Pending, never Completed.
    pub fn rollup<I>(statuses: I) -> Status
    where
        I: IntoIterator<Item = Status>,
    {
        let mut seen = false;
        let mut all_done = true;
        let mut any_failed = false;
        let mut any_started = false;

        for status in statuses {
            seen = true;
            all_done &= status.is_done();
            any_failed |= status == Status::Failed;
            any_started |= status.is_started();
        }

        if seen && all_done {
            Status::Completed
        } else if any_failed {
            Status::Failed
        } else if any_started {
            Status::InProgress
        } else {
            Status::Pending
        }
    }

    /// Display string, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Exempted => "Exempted",
            Status::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "pending" => Ok(Status::Pending),
            "inprogress" => Ok(Status::InProgress),
            "completed" | "done" => Ok(Status::Completed),
            "exempted" | "exempt" => Ok(Status::Exempted),
            "failed" | "fail" => Ok(Status::Failed),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

/// How the student entered the programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntryRoute {
    /// Class XII pass, starts at Foundation
    #[default]
    #[serde(rename = "Foundation Route")]
    Foundation,
    /// Graduate entry straight into Intermediate
    #[serde(rename = "Direct Entry Route")]
    DirectEntry,
}

impl EntryRoute {
    /// Whether this route sits the Foundation examination.
    pub fn requires_foundation(self) -> bool {
        self == EntryRoute::Foundation
    }

    /// Display string, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            EntryRoute::Foundation => "Foundation Route",
            EntryRoute::DirectEntry => "Direct Entry Route",
        }
    }
}

impl std::fmt::Display for EntryRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "foundation" | "foundationroute" => Ok(EntryRoute::Foundation),
            "direct" | "directentry" | "directentryroute" => Ok(EntryRoute::DirectEntry),
            other => Err(format!("unknown entry route: {other}")),
        }
    }
}

/// The three sequential examination levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseLevel {
    /// Foundation
    #[default]
    Foundation,
    /// Intermediate
    Intermediate,
    /// Final
    Final,
}

impl CourseLevel {
    /// Display string, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            CourseLevel::Foundation => "Foundation",
            CourseLevel::Intermediate => "Intermediate",
            CourseLevel::Final => "Final",
        }
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CourseLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "foundation" => Ok(CourseLevel::Foundation),
            "intermediate" | "inter" => Ok(CourseLevel::Intermediate),
            "final" => Ok(CourseLevel::Final),
            other => Err(format!("unknown course level: {other}")),
        }
    }
}
