use super::enums::RagStatus;
use super::schedule::parse_wake_time;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

/// Module that always exists and cannot be deleted
pub const HOME_MODULE: &str = "Home";

/// First hour shown in the timetable (the grid runs 04:00 through 03:00)
pub const TIMETABLE_START_HOUR: u32 = 4;

const DEFAULT_TARGET_DATE: &str = "2025-06-15";
const DEFAULT_PRIORITY: &str = "Complete Python Assignment";
const DEFAULT_WAKE_TIME: &str = "09:00";
const DEFAULT_MODULES: [&str; 4] = [HOME_MODULE, "CS101", "MATH202", "PROJECT"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerError {
    #[error("Please enter a task!")]
    EmptyTask,
    #[error("Please enter a module name")]
    EmptyModuleName,
    #[error("Module '{0}' already exists!")]
    ModuleExists(String),
    #[error("Unknown module '{0}'")]
    UnknownModule(String),
    #[error("Module '{0}' cannot be deleted")]
    ProtectedModule(String),
    #[error("No task at position {0}")]
    TaskIndexOutOfRange(usize),
    #[error("Invalid format. Use YYYY-MM-DD")]
    InvalidDate,
    #[error("Invalid time. Use HH:MM (e.g., 09:00)")]
    InvalidTime,
}

/// A to-do entry, stored on disk as a `[text, symbol]` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, RagStatus)", into = "(String, RagStatus)")]
pub struct Task {
    pub text: String,
    pub status: RagStatus,
}

impl From<(String, RagStatus)> for Task {
    fn from((text, status): (String, RagStatus)) -> Self {
        Self { text, status }
    }
}

impl From<Task> for (String, RagStatus) {
    fn from(task: Task) -> Self {
        (task.text, task.status)
    }
}

/// A named to-do list (one tab in the UI)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }
}

/// Log entry written when a task is added, closed when it first turns green
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: String,
    pub text: String,
    pub module: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
}

impl TaskRecord {
    fn new(text: &str, module: &str, now: NaiveDateTime) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            id: format!("task_{}_{}", now.and_utc().timestamp(), &suffix[..6]),
            text: text.to_string(),
            module: module.to_string(),
            created_at: iso_timestamp(now),
            completed_at: None,
            scheduled_time: Some(format!("{:02}:00", now.hour())),
        }
    }
}

fn iso_timestamp(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

/// One row of the 24-hour timetable grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableRow {
    pub hour: u32,
    /// Storage key, "HH:00"
    pub key: String,
    /// 12-hour label, e.g. "04:00 AM"
    pub label: String,
    pub text: String,
}

/// Storage key for an hour slot
pub fn timetable_key(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}

/// 12-hour clock label for an hour slot
pub fn timetable_label(hour: u32) -> String {
    let hour = hour % 24;
    let am_pm = if hour < 12 { "AM" } else { "PM" };
    let display_hour = match hour {
        0 | 12 => 12,
        h if h < 12 => h,
        h => h - 12,
    };
    format!("{:02}:00 {}", display_hour, am_pm)
}

/// Hours of the grid in display order
pub fn timetable_hours() -> impl Iterator<Item = u32> {
    (0..24).map(|h| (TIMETABLE_START_HOUR + h) % 24)
}

/// The whole planner document, persisted as one JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerDocument {
    /// Deadline as YYYY-MM-DD; kept as text so a hand-edited value survives loading
    #[serde(default = "default_target_date", deserialize_with = "target_date_or_default")]
    pub target_date: String,
    #[serde(default = "default_priority", deserialize_with = "priority_or_default")]
    pub priority: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority_rag: RagStatus,
    #[serde(default = "default_wake_time", deserialize_with = "wake_time_or_default")]
    pub wake_time: String,
    #[serde(default = "default_modules", with = "ordered_modules")]
    pub modules: Vec<Module>,
    #[serde(default = "default_timetable", deserialize_with = "timetable_slots")]
    pub timetable: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub task_history: Vec<TaskRecord>,
}

fn default_target_date() -> String {
    DEFAULT_TARGET_DATE.to_string()
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

fn default_wake_time() -> String {
    DEFAULT_WAKE_TIME.to_string()
}

fn default_modules() -> Vec<Module> {
    DEFAULT_MODULES.iter().map(|name| Module::new(*name)).collect()
}

fn default_timetable() -> BTreeMap<String, String> {
    timetable_hours().map(|h| (timetable_key(h), String::new())).collect()
}

// A `null` in a hand-edited file falls back to the default for that key only

fn or_fallback<'de, D, T>(deserializer: D, fallback: fn() -> T) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_else(fallback))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    or_fallback(deserializer, T::default)
}

fn target_date_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    or_fallback(deserializer, default_target_date)
}

fn priority_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    or_fallback(deserializer, default_priority)
}

fn wake_time_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    or_fallback(deserializer, default_wake_time)
}

/// Slots with a `null` value read as empty
fn timetable_slots<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error> {
    let Some(slots) = Option::<BTreeMap<String, Option<String>>>::deserialize(deserializer)? else {
        return Ok(default_timetable());
    };
    Ok(slots
        .into_iter()
        .map(|(key, text)| (key, text.unwrap_or_default()))
        .collect())
}

impl Default for PlannerDocument {
    fn default() -> Self {
        Self {
            target_date: default_target_date(),
            priority: default_priority(),
            priority_rag: RagStatus::Red,
            wake_time: default_wake_time(),
            modules: default_modules(),
            timetable: default_timetable(),
            task_history: Vec::new(),
        }
    }
}

impl PlannerDocument {
    /// Repair a freshly loaded document: Home must exist and come first
    pub fn normalize(&mut self) {
        match self.modules.iter().position(|m| m.name == HOME_MODULE) {
            Some(0) => {}
            Some(idx) => {
                let home = self.modules.remove(idx);
                self.modules.insert(0, home);
            }
            None => self.modules.insert(0, Module::new(HOME_MODULE)),
        }
    }

    /// Whole days from `now` until midnight of the target date, floored.
    /// None when the stored date is not a valid YYYY-MM-DD.
    pub fn days_until(&self, now: NaiveDateTime) -> Option<i64> {
        let target = NaiveDate::parse_from_str(&self.target_date, "%Y-%m-%d").ok()?;
        let delta = target.and_hms_opt(0, 0, 0)? - now;
        Some(delta.num_seconds().div_euclid(86_400))
    }

    /// Header text, e.g. "42 days until 2025-06-15"
    pub fn countdown_line(&self, now: NaiveDateTime) -> String {
        let days = self
            .days_until(now)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "???".to_string());
        format!("{} days until {}", days, self.target_date)
    }

    pub fn set_target_date(&mut self, input: &str) -> Result<(), PlannerError> {
        let input = input.trim();
        let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| PlannerError::InvalidDate)?;
        self.target_date = date.format("%Y-%m-%d").to_string();
        Ok(())
    }

    pub fn set_priority(&mut self, text: &str) {
        self.priority = text.trim().to_string();
    }

    pub fn cycle_priority_rag(&mut self) -> RagStatus {
        self.priority_rag = self.priority_rag.next();
        self.priority_rag
    }

    /// Validate and store the wake time used by the daily routine
    pub fn set_wake_time(&mut self, input: &str) -> Result<(), PlannerError> {
        let time = parse_wake_time(input).map_err(|_| PlannerError::InvalidTime)?;
        self.wake_time = time.format("%H:%M").to_string();
        Ok(())
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    fn module_mut(&mut self, name: &str) -> Result<&mut Module, PlannerError> {
        self.modules
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| PlannerError::UnknownModule(name.to_string()))
    }

    /// Append a red task to a module and log it in the history
    pub fn add_task(&mut self, module: &str, text: &str, now: NaiveDateTime) -> Result<(), PlannerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PlannerError::EmptyTask);
        }

        self.module_mut(module)?.tasks.push(Task {
            text: text.to_string(),
            status: RagStatus::Red,
        });
        self.task_history.push(TaskRecord::new(text, module, now));
        Ok(())
    }

    pub fn delete_task(&mut self, module: &str, index: usize) -> Result<Task, PlannerError> {
        let tasks = &mut self.module_mut(module)?.tasks;
        if index >= tasks.len() {
            return Err(PlannerError::TaskIndexOutOfRange(index));
        }
        Ok(tasks.remove(index))
    }

    /// Advance a task's RAG status. Turning green closes its open history record.
    pub fn cycle_task_status(&mut self, module: &str, index: usize, now: NaiveDateTime) -> Result<RagStatus, PlannerError> {
        let task = self
            .module_mut(module)?
            .tasks
            .get_mut(index)
            .ok_or(PlannerError::TaskIndexOutOfRange(index))?;

        let previous = task.status;
        task.status = previous.next();
        let (text, status) = (task.text.clone(), task.status);

        if status == RagStatus::Green && previous != RagStatus::Green {
            if let Some(record) = self
                .task_history
                .iter_mut()
                .rev()
                .find(|r| r.text == text && r.module == module && r.completed_at.is_none())
            {
                record.completed_at = Some(iso_timestamp(now));
            }
        }

        Ok(status)
    }

    pub fn add_module(&mut self, name: &str) -> Result<String, PlannerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::EmptyModuleName);
        }
        if self.module(name).is_some() {
            return Err(PlannerError::ModuleExists(name.to_string()));
        }

        self.modules.push(Module::new(name));
        Ok(name.to_string())
    }

    /// Remove a module and all its tasks (history records are kept)
    pub fn delete_module(&mut self, name: &str) -> Result<Module, PlannerError> {
        if name == HOME_MODULE {
            return Err(PlannerError::ProtectedModule(name.to_string()));
        }
        let idx = self
            .modules
            .iter()
            .position(|m| m.name == name)
            .ok_or_else(|| PlannerError::UnknownModule(name.to_string()))?;
        Ok(self.modules.remove(idx))
    }

    pub fn set_timetable_slot(&mut self, hour: u32, text: &str) {
        self.timetable.insert(timetable_key(hour), text.trim().to_string());
    }

    pub fn timetable_rows(&self) -> Vec<TimetableRow> {
        timetable_hours()
            .map(|hour| {
                let key = timetable_key(hour);
                TimetableRow {
                    hour,
                    text: self.timetable.get(&key).cloned().unwrap_or_default(),
                    label: timetable_label(hour),
                    key,
                }
            })
            .collect()
    }
}

/// Modules are stored as a JSON object keyed by name; keep file order
mod ordered_modules {
    use super::{Module, Task};
    use serde::de::{self, MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(modules: &[Module], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(modules.iter().map(|m| (&m.name, &m.tasks)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Module>, D::Error> {
        struct ModulesVisitor;
        struct NullableModules;

        impl<'de> Visitor<'de> for NullableModules {
            type Value = Vec<Module>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of module name to task list, or null")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(super::default_modules())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(super::default_modules())
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
                deserializer.deserialize_map(ModulesVisitor)
            }
        }

        impl<'de> Visitor<'de> for ModulesVisitor {
            type Value = Vec<Module>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of module name to task list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut modules = Vec::new();
                while let Some((name, tasks)) = map.next_entry::<String, Option<Vec<Task>>>()? {
                    modules.push(Module {
                        name,
                        tasks: tasks.unwrap_or_default(),
                    });
                }
                Ok(modules)
            }
        }

        deserializer.deserialize_option(NullableModules)
    }
}
