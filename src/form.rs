//! Task form state and validation
//!
//! The form holds the raw field text plus focus and per-field validation
//! messages. Validation runs on submit, before any cycle is constructed; a
//! rejected submission keeps the user's input and surfaces the messages
//! inline.

use crate::state::NewCycle;

/// Inclusive duration bounds, in minutes.
pub const MINUTES_MIN: f64 = 5.0;
pub const MINUTES_MAX: f64 = 60.0;
/// Step applied by the up/down keys on the minutes field.
pub const MINUTES_STEP: f64 = 5.0;

pub const TASK_REQUIRED_MESSAGE: &str = "Name the task you will work on";
pub const MINUTES_INVALID_MESSAGE: &str = "Enter a duration in minutes";
pub const MINUTES_RANGE_MESSAGE: &str = "Duration must be between 5 and 60 minutes";

/// Which form field currently receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Task,
    Minutes,
}

/// Per-field validation messages, rendered inline under the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub task: Option<String>,
    pub minutes: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.minutes.is_none()
    }
}

/// Editable state of the new-cycle form.
#[derive(Debug)]
pub struct NewCycleForm {
    task: String,
    minutes: String,
    focus: FormField,
    errors: FieldErrors,
    suggestions: Vec<String>,
    suggestion_cursor: Option<usize>,
}

impl NewCycleForm {
    pub fn new(suggestions: Vec<String>) -> Self {
        Self {
            task: String::new(),
            minutes: String::new(),
            focus: FormField::Task,
            errors: FieldErrors::default(),
            suggestions,
            suggestion_cursor: None,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn minutes(&self) -> &str {
        &self.minutes
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Whether the start control renders disabled. Purely visual; submitting
    /// still runs validation and surfaces the required-task message.
    pub fn start_disabled(&self) -> bool {
        self.task.is_empty()
    }

    pub fn set_task(&mut self, task: impl Into<String>) {
        self.task = task.into();
        self.suggestion_cursor = None;
    }

    pub fn set_minutes(&mut self, minutes: impl Into<String>) {
        self.minutes = minutes.into();
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            FormField::Task => FormField::Minutes,
            FormField::Minutes => FormField::Task,
        };
    }

    pub fn focus_prev(&mut self) {
        // Two fields, so previous and next coincide.
        self.focus_next();
    }

    /// Type a character into the focused field. The minutes field accepts
    /// digits and a decimal point only; range violations are left for
    /// validation so the message can point at the field.
    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::Task => {
                if !c.is_control() {
                    self.task.push(c);
                    self.suggestion_cursor = None;
                }
            }
            FormField::Minutes => {
                if c.is_ascii_digit() || c == '.' {
                    self.minutes.push(c);
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Task => {
                self.task.pop();
                self.suggestion_cursor = None;
            }
            FormField::Minutes => {
                self.minutes.pop();
            }
        }
    }

    /// Up arrow: step the minutes field, or cycle task suggestions backwards.
    pub fn step_up(&mut self) {
        match self.focus {
            FormField::Task => self.cycle_suggestion(-1),
            FormField::Minutes => self.adjust_minutes(MINUTES_STEP),
        }
    }

    /// Down arrow: step the minutes field, or cycle task suggestions forward.
    pub fn step_down(&mut self) {
        match self.focus {
            FormField::Task => self.cycle_suggestion(1),
            FormField::Minutes => self.adjust_minutes(-MINUTES_STEP),
        }
    }

    /// Validate the current field contents without mutating anything.
    pub fn validate(&self) -> Result<NewCycle, FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.task.is_empty() {
            errors.task = Some(TASK_REQUIRED_MESSAGE.to_string());
        }

        let minutes = match self.minutes.trim().parse::<f64>() {
            Ok(m) if m.is_finite() => {
                if (MINUTES_MIN..=MINUTES_MAX).contains(&m) {
                    Some(m)
                } else {
                    errors.minutes = Some(MINUTES_RANGE_MESSAGE.to_string());
                    None
                }
            }
            _ => {
                errors.minutes = Some(MINUTES_INVALID_MESSAGE.to_string());
                None
            }
        };

        match minutes {
            Some(minutes_amount) if errors.is_empty() => Ok(NewCycle {
                task: self.task.clone(),
                minutes_amount,
            }),
            _ => Err(errors),
        }
    }

    /// Run validation; on success reset the form to its defaults and hand the
    /// validated input back, on failure store the messages for rendering.
    pub fn submit(&mut self) -> Option<NewCycle> {
        match self.validate() {
            Ok(new_cycle) => {
                self.reset();
                Some(new_cycle)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Clear both fields, messages, and the suggestion cursor.
    pub fn reset(&mut self) {
        self.task.clear();
        self.minutes.clear();
        self.errors = FieldErrors::default();
        self.suggestion_cursor = None;
        self.focus = FormField::Task;
    }

    fn adjust_minutes(&mut self, delta: f64) {
        let current = self.minutes.trim().parse::<f64>().unwrap_or(0.0);
        let next = (current + delta).clamp(MINUTES_MIN, MINUTES_MAX);
        self.minutes = format!("{}", next);
    }

    fn cycle_suggestion(&mut self, step: isize) {
        if self.suggestions.is_empty() {
            return;
        }

        let len = self.suggestions.len() as isize;
        let next = match self.suggestion_cursor {
            Some(current) => (current as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        } as usize;

        self.suggestion_cursor = Some(next);
        self.task = self.suggestions[next].clone();
    }
}
