//! Form data submitted by the goal page.

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::goal::{NewGoal, ValidationError};

/// The form data for creating a goal.
#[derive(Debug, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct GoalForm {
    pub product_name: String,
    pub target_price: f64,
    pub weekly_savings: f64,
    /// Left empty when the user has not saved anything yet.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub current_savings: Option<f64>,
}

impl GoalForm {
    /// Validate the form, defaulting an empty starting balance to zero.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] if any field is out of range.
    pub fn into_new_goal(self) -> Result<NewGoal, ValidationError> {
        NewGoal::new(&self.product_name, self.target_price, self.weekly_savings)?
            .with_current_savings(self.current_savings.unwrap_or(0.0))
    }
}

/// The form data for adding money to or removing money from a goal.
#[derive(Debug, Serialize, Deserialize)]
pub struct AmountForm {
    /// The amount to add or remove, greater than zero.
    pub amount: f64,
}

/// The form data for setting a goal's savings total directly.
#[derive(Debug, Serialize, Deserialize)]
pub struct SavingsForm {
    /// The new total, zero or more.
    pub current_savings: f64,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse::<f64>().map(Some).map_err(de::Error::custom),
    }
}
