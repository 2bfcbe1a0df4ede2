//! Form model plus validation rules.
//!
//! Rules address fields by their serialized name, so any `Serialize` model
//! works and the names line up with what the endpoint function will send.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

type Check = Arc<dyn Fn(&Value) -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub enum Rule {
    /// Not null, not blank, not an empty list.
    Required,
    /// Character count bounds for strings.
    Length { min: Option<usize>, max: Option<usize> },
    /// Inclusive bounds for numbers.
    Range { min: Option<f64>, max: Option<f64> },
    /// Returns the violation message, or `None` when the value is fine.
    Custom(Check),
}

impl Rule {
    pub fn custom(check: impl Fn(&Value) -> Option<String> + Send + Sync + 'static) -> Self {
        Rule::Custom(Arc::new(check))
    }

    fn check(&self, value: &Value) -> Option<String> {
        match self {
            Rule::Required => is_blank(value).then(|| "is required".to_string()),
            Rule::Length { min, max } => {
                let len = value.as_str()?.chars().count();
                if min.is_some_and(|m| len < m) || max.is_some_and(|m| len > m) {
                    Some(format!("length must be within {}", bounds(min, max)))
                } else {
                    None
                }
            }
            Rule::Range { min, max } => {
                let n = value.as_f64()?;
                if min.is_some_and(|m| n < m) || max.is_some_and(|m| n > m) {
                    Some(format!("must be within {}", bounds(min, max)))
                } else {
                    None
                }
            }
            Rule::Custom(check) => check(value),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("Required"),
            Rule::Length { min, max } => f.debug_struct("Length").field("min", min).field("max", max).finish(),
            Rule::Range { min, max } => f.debug_struct("Range").field("min", min).field("max", max).finish(),
            Rule::Custom(_) => f.write_str("Custom"),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn bounds<T: fmt::Display>(min: &Option<T>, max: &Option<T>) -> String {
    match (min, max) {
        (Some(lo), Some(hi)) => format!("[{lo}, {hi}]"),
        (Some(lo), None) => format!("[{lo}, ..)"),
        (None, Some(hi)) => format!("(.., {hi}]"),
        (None, None) => "(.., ..)".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

#[derive(Debug, Clone)]
pub struct FormState<M> {
    model: M,
    rules: Vec<(String, Rule)>,
    violations: Vec<Violation>,
}

impl<M: Serialize + Default> Default for FormState<M> {
    fn default() -> Self {
        Self::new(M::default())
    }
}

impl<M: Serialize + Default> FormState<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            rules: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn rule(mut self, field: &str, rule: Rule) -> Self {
        self.rules.push((field.to_string(), rule));
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Check every rule against the current model. Missing fields read as
    /// `null`.
    pub fn validate(&mut self) -> Result<(), Vec<Violation>> {
        let snapshot = match serde_json::to_value(&self.model) {
            Ok(value) => value,
            Err(e) => {
                self.violations = vec![Violation {
                    field: String::new(),
                    message: e.to_string(),
                }];
                return Err(self.violations.clone());
            }
        };

        self.violations = self
            .rules
            .iter()
            .filter_map(|(field, rule)| {
                let value = snapshot.get(field).unwrap_or(&Value::Null);
                rule.check(value).map(|message| Violation {
                    field: field.clone(),
                    message,
                })
            })
            .collect();

        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(self.violations.clone())
        }
    }

    /// Validate, then hand the model to `submit` only if it passed.
    pub fn submit<R>(&mut self, submit: impl FnOnce(&M) -> R) -> Result<R, Vec<Violation>> {
        self.validate()?;
        Ok(submit(&self.model))
    }

    /// Restore the default model and forget earlier violations.
    pub fn reset(&mut self) {
        self.model = M::default();
        self.violations.clear();
    }
}
