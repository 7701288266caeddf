//! This file defines the `CategoryName` type used to label expenses.
//! Categories are free-form short labels; the schema does not constrain them
//! to the suggested set.

use std::{fmt::Display, str::FromStr};

use serde::Serialize;

use crate::Error;

/// The categories suggested to the user when entering an expense.
///
/// This is a recommendation only, any non-empty label up to 64 characters is
/// accepted.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Travel",
    "Groceries",
    "Rent",
    "Utilities",
    "Shopping",
    "Health",
    "Education",
    "Entertainment",
    "Bills",
    "Other",
];

/// The maximum length of a category name in characters.
const MAX_CATEGORY_LENGTH: usize = 64;

/// The name of an expense category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// This function will return an [Error::EmptyCategory] if `name` is an
    /// empty string, or an [Error::CategoryTooLong] if `name` is longer than
    /// 64 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::EmptyCategory);
        }

        if name.chars().count() > MAX_CATEGORY_LENGTH {
            return Err(Error::CategoryTooLong);
        }

        Ok(Self(name.to_string()))
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty and no longer
    /// than 64 characters. This function has `_unchecked` in the name but is
    /// not `unsafe`, because a violated invariant causes incorrect behaviour
    /// but does not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod category_name_tests {
    use super::CategoryName;
    use crate::Error;

    #[test]
    fn new_trims_whitespace() {
        let name = CategoryName::new("  Food  ").unwrap();

        assert_eq!(name.as_ref(), "Food");
    }

    #[test]
    fn new_rejects_empty_string() {
        assert_eq!(CategoryName::new(""), Err(Error::EmptyCategory));
        assert_eq!(CategoryName::new("   "), Err(Error::EmptyCategory));
    }

    #[test]
    fn new_rejects_name_longer_than_64_characters() {
        let name = "x".repeat(65);

        assert_eq!(CategoryName::new(&name), Err(Error::CategoryTooLong));
    }

    #[test]
    fn new_accepts_name_of_exactly_64_characters() {
        let name = "x".repeat(64);

        assert!(CategoryName::new(&name).is_ok());
    }
}
