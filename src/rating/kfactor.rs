use std::fmt::Debug;

use chrono::NaiveDate;
use serde_json::Value;

use crate::errors::{RatingError, Result};
use crate::util::dates::{age_in_years, parse_date};

/// Everything a K-factor rule may need. Any field can be missing; a rule
/// reports the first one it needs but cannot find.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KFactorRequest {
    pub rating: Option<f64>,
    pub start: Option<NaiveDate>,
    pub dob: Option<Value>,
    pub joined: Option<Value>,
}

impl KFactorRequest {
    fn require_rating(&self) -> Result<f64> {
        self.rating.ok_or(RatingError::MissingKFactorInput("rating"))
    }

    fn require_start(&self) -> Result<NaiveDate> {
        self.start.ok_or(RatingError::MissingKFactorInput("start"))
    }

    fn require_date(value: &Option<Value>, name: &'static str) -> Result<NaiveDate> {
        match value {
            None | Some(Value::Null) => Err(RatingError::MissingKFactorInput(name)),
            Some(date) => parse_date(date),
        }
    }
}

/// Derives a rated player's K-factor from rating, age and experience.
///
/// Tournaments use [`IcuKFactorRule`] unless given another implementation.
pub trait KFactorRule: Debug {
    fn kfactor(&self, request: &KFactorRequest) -> Result<f64>;
}

/// * 16 for players rated 2100 and over, otherwise
/// * 40 for players under 21 at the start of the tournament, otherwise
/// * 32 for members of less than 8 years, otherwise
/// * 24
#[derive(Debug, Clone, Copy, Default)]
pub struct IcuKFactorRule;

impl KFactorRule for IcuKFactorRule {
    fn kfactor(&self, request: &KFactorRequest) -> Result<f64> {
        let rating = request.require_rating()?;
        let start = request.require_start()?;
        let dob = KFactorRequest::require_date(&request.dob, "dob")?;
        let joined = KFactorRequest::require_date(&request.joined, "joined")?;

        let kfactor = if rating >= 2100.0 {
            16.0
        } else if age_in_years(dob, start) < 21.0 {
            40.0
        } else if age_in_years(joined, start) < 8.0 {
            32.0
        } else {
            24.0
        };
        Ok(kfactor)
    }
}
