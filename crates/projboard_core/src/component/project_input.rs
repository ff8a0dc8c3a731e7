//! Project input form.
//!
//! # Responsibility
//! - Hold raw field text until submission.
//! - Validate against [`FormRules`] and ask the store to create an item.
//!
//! # Invariants
//! - A rejected submission leaves fields untouched and never reaches the store.
//! - An accepted submission clears every field.
//! - The form never talks to status lists directly.

use crate::model::item::ItemId;
use crate::state::store::Store;
use crate::validation::{validate, FieldValue, FormRules, Validatable};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-visible prefix shared by every rejection message.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again!";

/// Rejected form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    InvalidTitle,
    InvalidDescription { min_length: usize },
    InvalidPeople { min: u8, max: u8 },
}

impl FormError {
    /// Stable field name, useful for focusing the offending input.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidTitle => "title",
            Self::InvalidDescription { .. } => "description",
            Self::InvalidPeople { .. } => "people",
        }
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "{INVALID_INPUT_MESSAGE} title is required"),
            Self::InvalidDescription { min_length } => write!(
                f,
                "{INVALID_INPUT_MESSAGE} description needs at least {min_length} characters"
            ),
            Self::InvalidPeople { min, max } => write!(
                f,
                "{INVALID_INPUT_MESSAGE} people must be a number between {min} and {max}"
            ),
        }
    }
}

impl Error for FormError {}

/// Form that creates new active items.
#[derive(Debug, Clone)]
pub struct ProjectInput {
    store: Store,
    rules: FormRules,
    title: String,
    description: String,
    people: String,
}

impl ProjectInput {
    /// Creates an empty form using default rules.
    pub fn new(store: Store) -> Self {
        Self::with_rules(store, FormRules::default())
    }

    pub fn with_rules(store: Store, rules: FormRules) -> Self {
        Self {
            store,
            rules,
            title: String::new(),
            description: String::new(),
            people: String::new(),
        }
    }

    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn people(&self) -> &str {
        &self.people
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title = value.into();
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        self.description = value.into();
    }

    pub fn set_people(&mut self, value: impl Into<String>) {
        self.people = value.into();
    }

    /// Validates current fields and, when they pass, creates the item.
    ///
    /// # Errors
    /// - Returns the first failing field; the store is not called.
    pub fn submit(&mut self) -> Result<ItemId, FormError> {
        let (title, description, people) = match self.gather_input() {
            Ok(input) => input,
            Err(err) => {
                debug!(
                    "event=form_submit module=project_input status=rejected field={}",
                    err.field()
                );
                return Err(err);
            }
        };

        let id = self.store.create(title, description, people);
        self.clear();
        info!("event=form_submit module=project_input status=ok item_id={id}");
        Ok(id)
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.people.clear();
    }

    fn gather_input(&self) -> Result<(String, String, u8), FormError> {
        let title = Validatable::new(self.title.as_str()).required();
        if !validate(&title) {
            return Err(FormError::InvalidTitle);
        }

        let description = Validatable::new(self.description.as_str())
            .required()
            .min_length(self.rules.description_min_length);
        if !validate(&description) {
            return Err(FormError::InvalidDescription {
                min_length: self.rules.description_min_length,
            });
        }

        let people_error = FormError::InvalidPeople {
            min: self.rules.people_min,
            max: self.rules.people_max,
        };
        if !validate(&Validatable::new(self.people.as_str()).required()) {
            return Err(people_error);
        }
        let parsed = parse_people(&self.people);
        let people = Validatable::new(FieldValue::Number(parsed))
            .required()
            .min(f64::from(self.rules.people_min))
            .max(f64::from(self.rules.people_max));
        if !validate(&people) || parsed.fract() != 0.0 {
            return Err(people_error);
        }

        // In range [people_min, people_max] and integral, so it fits in u8.
        Ok((
            self.title.trim().to_string(),
            self.description.trim().to_string(),
            parsed as u8,
        ))
    }
}

/// Numeric reading of the raw headcount; unparseable text becomes `NaN`.
fn parse_people(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::{FormError, ProjectInput};
    use crate::state::store::Store;
    use crate::validation::FormRules;

    fn filled(store: &Store, title: &str, description: &str, people: &str) -> ProjectInput {
        let mut form = ProjectInput::new(store.clone());
        form.set_title(title);
        form.set_description(description);
        form.set_people(people);
        form
    }

    #[test]
    fn rejects_fractional_people() {
        let store = Store::new();
        let mut form = filled(&store, "Build API", "Design endpoints", "2.5");
        assert_eq!(
            form.submit(),
            Err(FormError::InvalidPeople { min: 1, max: 5 })
        );
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_non_numeric_people() {
        let store = Store::new();
        let mut form = filled(&store, "Build API", "Design endpoints", "three");
        assert!(matches!(form.submit(), Err(FormError::InvalidPeople { .. })));
    }

    #[test]
    fn trims_text_before_creating() {
        let store = Store::new();
        let mut form = filled(&store, "  Build API ", " Design endpoints ", " 2 ");
        let id = form.submit().expect("valid input");
        let item = store.get(id).expect("created item");
        assert_eq!(item.title(), "Build API");
        assert_eq!(item.description(), "Design endpoints");
        assert_eq!(item.people(), 2);
    }

    #[test]
    fn custom_rules_change_accepted_range() {
        let store = Store::new();
        let rules = FormRules {
            description_min_length: 1,
            people_min: 2,
            people_max: 8,
        };
        let mut form = ProjectInput::with_rules(store.clone(), rules);
        form.set_title("Ops");
        form.set_description("x");
        form.set_people("8");
        assert!(form.submit().is_ok());

        form.set_title("Ops");
        form.set_description("x");
        form.set_people("1");
        assert_eq!(
            form.submit(),
            Err(FormError::InvalidPeople { min: 2, max: 8 })
        );
    }

    #[test]
    fn error_message_is_user_facing() {
        let message = FormError::InvalidTitle.to_string();
        assert!(message.starts_with("Invalid input, please try again!"));
        assert_eq!(FormError::InvalidTitle.field(), "title");
    }
}
