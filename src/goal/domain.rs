//! Core savings goal domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// The reasons a goal or an amount of money can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The product name was empty or only whitespace.
    #[error("Product name cannot be empty")]
    EmptyProductName,

    /// The target price was zero or negative.
    #[error("Target price must be greater than zero, got {0}")]
    NonPositiveTargetPrice(f64),

    /// The weekly savings amount was negative.
    #[error("Weekly savings cannot be negative, got {0}")]
    NegativeWeeklySavings(f64),

    /// A current savings total was negative.
    #[error("Current savings cannot be negative, got {0}")]
    NegativeSavings(f64),

    /// An amount to add or remove was zero or negative.
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    /// A monetary field was NaN or infinite. Holds the field name.
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
}

/// A validated, non-empty product name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name from `name` with surrounding whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [ValidationError::EmptyProductName] if `name` is empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let name = name.trim();

        if name.is_empty() {
            Err(ValidationError::EmptyProductName)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a product name without validation.
    ///
    /// The caller should ensure that the string is not empty. Rows read back
    /// from the database were validated when they were written.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductName::new(s)
    }
}

impl TryFrom<String> for ProductName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ProductName::new(&value)
    }
}

impl From<ProductName> for String {
    fn from(value: ProductName) -> Self {
        value.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a savings goal, assigned by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    /// Generate a fresh random ID.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for GoalId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for GoalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tracked savings target for a single intended purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    /// Assigned by the store when the goal is created.
    pub id: GoalId,
    /// What the user is saving for.
    pub product_name: ProductName,
    /// The amount needed, always greater than zero.
    pub target_price: f64,
    /// How much the user expects to put aside each week.
    pub weekly_savings: f64,
    /// The amount saved so far, never negative.
    pub current_savings: f64,
    /// When the goal was stored. Lists are ordered by this, newest first.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the savings total last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl SavingsGoal {
    /// Check a goal loaded from storage against the rules enforced on creation.
    ///
    /// # Errors
    ///
    /// Returns the first [ValidationError] that applies to the goal's amounts.
    pub fn validate(&self) -> Result<(), ValidationError> {
        NewGoal::new(
            self.product_name.as_ref(),
            self.target_price,
            self.weekly_savings,
        )?
        .with_current_savings(self.current_savings)
        .map(|_| ())
    }
}

/// A validated request to create a savings goal.
///
/// `current_savings` defaults to zero. All checks happen in [NewGoal::new]
/// and [NewGoal::with_current_savings], so a store can persist a `NewGoal`
/// as is.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    product_name: ProductName,
    target_price: f64,
    weekly_savings: f64,
    current_savings: f64,
}

impl NewGoal {
    /// Create a goal request with no starting balance.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] if the product name is empty, the target
    /// price is not positive, the weekly savings are negative, or either
    /// amount is not finite.
    pub fn new(
        product_name: &str,
        target_price: f64,
        weekly_savings: f64,
    ) -> Result<Self, ValidationError> {
        let product_name = ProductName::new(product_name)?;

        if !target_price.is_finite() {
            return Err(ValidationError::NotFinite("Target price"));
        }

        if target_price <= 0.0 {
            return Err(ValidationError::NonPositiveTargetPrice(target_price));
        }

        if !weekly_savings.is_finite() {
            return Err(ValidationError::NotFinite("Weekly savings"));
        }

        if weekly_savings < 0.0 {
            return Err(ValidationError::NegativeWeeklySavings(weekly_savings));
        }

        Ok(Self {
            product_name,
            target_price,
            weekly_savings,
            current_savings: 0.0,
        })
    }

    /// Set the starting balance.
    ///
    /// # Errors
    ///
    /// Returns a [ValidationError] if `current_savings` is negative or not finite.
    pub fn with_current_savings(mut self, current_savings: f64) -> Result<Self, ValidationError> {
        self.current_savings = validate_savings(current_savings)?;

        Ok(self)
    }

    /// The validated product name.
    pub fn product_name(&self) -> &ProductName {
        &self.product_name
    }

    /// The validated target price, greater than zero.
    pub fn target_price(&self) -> f64 {
        self.target_price
    }

    /// The validated weekly savings, zero or more.
    pub fn weekly_savings(&self) -> f64 {
        self.weekly_savings
    }

    /// The starting balance, zero unless set.
    pub fn current_savings(&self) -> f64 {
        self.current_savings
    }

    /// Turn the request into a stored goal with the given identity and creation time.
    pub(crate) fn into_goal(self, id: GoalId, created_at: OffsetDateTime) -> SavingsGoal {
        SavingsGoal {
            id,
            product_name: self.product_name,
            target_price: self.target_price,
            weekly_savings: self.weekly_savings,
            current_savings: self.current_savings,
            created_at,
            updated_at: created_at,
        }
    }
}

/// Check that `amount` can be stored as a goal's current savings.
///
/// # Errors
///
/// Returns a [ValidationError] if `amount` is negative or not finite.
pub fn validate_savings(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite("Current savings"));
    }

    if amount < 0.0 {
        return Err(ValidationError::NegativeSavings(amount));
    }

    Ok(amount)
}

/// Check that `amount` can be added to or removed from a goal.
///
/// # Errors
///
/// Returns a [ValidationError] if `amount` is not greater than zero or not finite.
pub fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite("Amount"));
    }

    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }

    Ok(amount)
}

/// The current time in UTC, truncated to whole milliseconds so that it
/// survives a round trip through either backend unchanged.
pub(crate) fn now_utc() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}

#[cfg(test)]
mod product_name_tests {
    use crate::goal::{ProductName, ValidationError};

    #[test]
    fn new_fails_on_empty_string() {
        assert_eq!(ProductName::new(""), Err(ValidationError::EmptyProductName));
    }

    #[test]
    fn new_fails_on_just_whitespace() {
        assert_eq!(
            ProductName::new("\n\t \r"),
            Err(ValidationError::EmptyProductName)
        );
    }

    #[test]
    fn new_trims_whitespace() {
        let name = ProductName::new("  New Laptop ").unwrap();

        assert_eq!(name.as_ref(), "New Laptop");
    }

    #[test]
    fn deserialize_rejects_empty_name() {
        let result = serde_json::from_str::<ProductName>("\"   \"");

        assert!(result.is_err());
    }
}


#[cfg(test)]
mod savings_goal_validate_tests {
    use time::OffsetDateTime;

    use crate::goal::{GoalId, NewGoal, SavingsGoal, ValidationError};

    fn bike() -> SavingsGoal {
        NewGoal::new("Bike", 1000.0, 25.0)
            .unwrap()
            .into_goal(GoalId::new_random(), OffsetDateTime::UNIX_EPOCH)
    }

    #[test]
    fn accepts_valid_goal() {
        assert_eq!(bike().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_target_price() {
        let goal = SavingsGoal {
            target_price: 0.0,
            ..bike()
        };

        assert_eq!(
            goal.validate(),
            Err(ValidationError::NonPositiveTargetPrice(0.0))
        );
    }

    #[test]
    fn rejects_negative_weekly_savings() {
        let goal = SavingsGoal {
            weekly_savings: -3.0,
            ..bike()
        };

        assert_eq!(
            goal.validate(),
            Err(ValidationError::NegativeWeeklySavings(-3.0))
        );
    }

    #[test]
    fn rejects_negative_current_savings() {
        let goal = SavingsGoal {
            current_savings: -50.0,
            ..bike()
        };

        assert_eq!(
            goal.validate(),
            Err(ValidationError::NegativeSavings(-50.0))
        );
    }
}
