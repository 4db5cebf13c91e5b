pub mod dates;

pub use dates::{DateInput, age_in_years, age_today, parse_date};
