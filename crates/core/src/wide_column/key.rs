//! Record ids for wide-column rows.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Identity of a movie across the wide-column tables, exposed as
/// `"{title}_{year}"`. Titles may contain underscores, so parsing splits at
/// the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MovieKey {
    pub title: String,
    pub year: i32,
}

impl MovieKey {
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }
}

impl fmt::Display for MovieKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.title, self.year)
    }
}

impl FromStr for MovieKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::Validation(format!("Invalid movie id '{s}', expected title_year"));
        let (title, year) = s.rsplit_once('_').ok_or_else(invalid)?;
        if title.is_empty() {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        Ok(Self::new(title, year))
    }
}

/// Identity of a movie nomination, exposed as `"{title}_{year}|{category}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NominationKey {
    pub movie: MovieKey,
    pub category: String,
}

impl fmt::Display for NominationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.movie, self.category)
    }
}

impl FromStr for NominationKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (movie, category) = s.rsplit_once('|').ok_or_else(|| {
            CoreError::Validation(format!("Invalid nomination id '{s}', expected title_year|category"))
        })?;
        if category.is_empty() {
            return Err(CoreError::Validation(format!(
                "Invalid nomination id '{s}', category is empty"
            )));
        }
        Ok(Self {
            movie: movie.parse()?,
            category: category.to_string(),
        })
    }
}
