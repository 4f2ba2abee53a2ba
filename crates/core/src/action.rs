// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action records and add-time normalization
//!
//! Whatever shape an action arrives in, it is stored as
//! `{code, required?, consumed?}`:
//! - a bare command string or callable becomes `{code}`
//! - a list of strings/callables becomes `{code = list}`
//! - a table with a `code` field is validated field by field

use crate::code::Code;
use crate::condition::Condition;
use crate::error::QueueError;
use crate::host::StateResolver;
use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;

/// One schedulable unit of work
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub code: Code,
    /// Re-checked every time the action is a scheduling candidate
    pub required: Option<Condition>,
    /// Must hold before execution and is expected to clear afterwards
    pub consumed: Option<Condition>,
}

impl Action {
    pub fn new(code: impl Into<Code>) -> Self {
        Self {
            code: code.into(),
            required: None,
            consumed: None,
        }
    }

    pub fn requires(mut self, condition: impl Into<Condition>) -> Self {
        self.required = Some(condition.into());
        self
    }

    pub fn consumes(mut self, condition: impl Into<Condition>) -> Self {
        self.consumed = Some(condition.into());
        self
    }

    /// Reject shapes that can never run or never settle: empty commands,
    /// empty code lists, and gates that are empty or not state-backed.
    pub fn validate(&self) -> Result<(), QueueError> {
        validate_code(&self.code)?;
        if let Some(required) = &self.required {
            validate_gate("required", required)?;
        }
        if let Some(consumed) = &self.consumed {
            validate_gate("consumed", consumed)?;
        }
        Ok(())
    }

    /// Check `required` then `consumed`; absent gates pass.
    pub fn gates_open(&self, state: &dyn StateResolver) -> bool {
        self.required
            .as_ref()
            .map_or(true, |condition| condition.evaluate(state))
            && self
                .consumed
                .as_ref()
                .map_or(true, |condition| condition.evaluate(state))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "code={}", self.code)?;
        if let Some(required) = &self.required {
            write!(f, " required={}", required)?;
        }
        if let Some(consumed) = &self.consumed {
            write!(f, " consumed={}", consumed)?;
        }
        Ok(())
    }
}

/// Anything that can be normalized into an [`Action`]
pub trait IntoAction {
    fn into_action(self) -> Result<Action, QueueError>;
}

impl IntoAction for Action {
    fn into_action(self) -> Result<Action, QueueError> {
        self.validate()?;
        Ok(self)
    }
}

impl IntoAction for Code {
    fn into_action(self) -> Result<Action, QueueError> {
        Action::new(self).into_action()
    }
}

impl IntoAction for &str {
    fn into_action(self) -> Result<Action, QueueError> {
        Value::from(self).into_action()
    }
}

impl IntoAction for String {
    fn into_action(self) -> Result<Action, QueueError> {
        Value::from(self).into_action()
    }
}

impl IntoAction for Value {
    fn into_action(self) -> Result<Action, QueueError> {
        match self {
            Value::Nil => Err(QueueError::invalid_action("action is empty")),
            Value::Table(fields) => action_from_table(fields),
            code @ (Value::Str(_) | Value::Call(_) | Value::List(_)) => {
                Ok(Action::new(code_from_value(code)?))
            }
            other => Err(QueueError::invalid_action(format!(
                "expected a command, callable, list or table, found {}",
                other.kind()
            ))),
        }
    }
}

fn action_from_table(mut fields: BTreeMap<String, Value>) -> Result<Action, QueueError> {
    if fields.is_empty() {
        return Err(QueueError::invalid_action("action is empty"));
    }
    if let Some(unknown) = fields
        .keys()
        .find(|key| !matches!(key.as_str(), "code" | "required" | "consumed"))
    {
        return Err(QueueError::invalid_action(format!(
            "unknown action field: {unknown:?}"
        )));
    }

    let code = match fields.remove("code") {
        None | Some(Value::Nil) => {
            return Err(QueueError::invalid_action("action table has no code field"))
        }
        Some(code) => code_from_value(code)?,
    };

    Ok(Action {
        code,
        required: gate_from_field("required", fields.remove("required"))?,
        consumed: gate_from_field("consumed", fields.remove("consumed"))?,
    })
}

/// Strings, callables, or a non-empty list of them
fn code_from_value(value: Value) -> Result<Code, QueueError> {
    match value {
        Value::Str(command) if command.is_empty() => {
            Err(QueueError::invalid_action("command is empty"))
        }
        Value::Str(command) => Ok(Code::Command(command)),
        Value::Call(thunk) => Ok(Code::Call(thunk)),
        Value::List(steps) if steps.is_empty() => {
            Err(QueueError::invalid_action("code list is empty"))
        }
        Value::List(steps) => steps
            .into_iter()
            .map(|step| match step {
                Value::Str(_) | Value::Call(_) => code_from_value(step),
                other => Err(QueueError::invalid_action(format!(
                    "code list members must be commands or callables, found {}",
                    other.kind()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Code::Sequence),
        other => Err(QueueError::invalid_action(format!(
            "code must be a command, callable or list, found {}",
            other.kind()
        ))),
    }
}

/// Paths, predicates, or a non-empty list of them
fn gate_from_field(field: &str, value: Option<Value>) -> Result<Option<Condition>, QueueError> {
    let leaf = |value: Value| match value {
        Value::Str(path) if !path.is_empty() => Ok(Condition::Path(path)),
        Value::Predicate(predicate) => Ok(Condition::Predicate(predicate)),
        other => Err(QueueError::invalid_action(format!(
            "{field} must be a state path or predicate, found {}",
            describe(&other)
        ))),
    };

    match value {
        None | Some(Value::Nil) => Ok(None),
        Some(Value::List(members)) if members.is_empty() => Err(QueueError::invalid_action(
            format!("{field} list is empty"),
        )),
        Some(Value::List(members)) => members
            .into_iter()
            .map(leaf)
            .collect::<Result<Vec<_>, _>>()
            .map(|members| Some(Condition::All(members))),
        Some(single) => leaf(single).map(Some),
    }
}

fn validate_code(code: &Code) -> Result<(), QueueError> {
    match code {
        Code::Command(command) if command.is_empty() => {
            Err(QueueError::invalid_action("command is empty"))
        }
        Code::Sequence(steps) if steps.is_empty() => {
            Err(QueueError::invalid_action("code list is empty"))
        }
        Code::Sequence(steps) => steps.iter().try_for_each(validate_code),
        Code::Command(_) | Code::Call(_) => Ok(()),
    }
}

fn validate_gate(field: &str, gate: &Condition) -> Result<(), QueueError> {
    match gate {
        Condition::All(members) if members.is_empty() => Err(QueueError::invalid_action(
            format!("{field} list is empty"),
        )),
        Condition::All(members) => members
            .iter()
            .try_for_each(|member| validate_gate(field, member)),
        Condition::Path(path) if path.is_empty() => Err(QueueError::invalid_action(format!(
            "{field} must be a state path or predicate, found an empty string"
        ))),
        Condition::Literal(_) => Err(QueueError::invalid_action(format!(
            "{field} must be a state path or predicate, found a boolean"
        ))),
        Condition::Path(_) | Condition::Predicate(_) => Ok(()),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Str(_) => "an empty string".to_string(),
        other => other.kind().to_string(),
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
