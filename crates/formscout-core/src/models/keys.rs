//! The closed vocabulary of semantic data keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A member of the fixed vocabulary a detected field can be mapped to.
///
/// The set is closed: matching never produces a key outside it, and the
/// AI-assisted reply parser rejects anything that does not round-trip
/// through [`DataKey::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKey {
    FirstName,
    LastName,
    FullName,
    Email,
    Phone,
    Address,
    City,
    State,
    Zip,
    Country,
    University,
    Degree,
    GraduationYear,
    Gpa,
    VisaStatus,
    SalaryExpectation,
    StartDate,
    Linkedin,
    Website,
    Resume,
    CoverLetter,
    Transcript,
}

impl DataKey {
    /// Every key, in vocabulary order.
    ///
    /// Pattern matching iterates this order and keeps the earliest key on a
    /// confidence tie.
    pub const ALL: [DataKey; 22] = [
        DataKey::FirstName,
        DataKey::LastName,
        DataKey::FullName,
        DataKey::Email,
        DataKey::Phone,
        DataKey::Address,
        DataKey::City,
        DataKey::State,
        DataKey::Zip,
        DataKey::Country,
        DataKey::University,
        DataKey::Degree,
        DataKey::GraduationYear,
        DataKey::Gpa,
        DataKey::VisaStatus,
        DataKey::SalaryExpectation,
        DataKey::StartDate,
        DataKey::Linkedin,
        DataKey::Website,
        DataKey::Resume,
        DataKey::CoverLetter,
        DataKey::Transcript,
    ];

    /// Snake-case name of the key as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKey::FirstName => "first_name",
            DataKey::LastName => "last_name",
            DataKey::FullName => "full_name",
            DataKey::Email => "email",
            DataKey::Phone => "phone",
            DataKey::Address => "address",
            DataKey::City => "city",
            DataKey::State => "state",
            DataKey::Zip => "zip",
            DataKey::Country => "country",
            DataKey::University => "university",
            DataKey::Degree => "degree",
            DataKey::GraduationYear => "graduation_year",
            DataKey::Gpa => "gpa",
            DataKey::VisaStatus => "visa_status",
            DataKey::SalaryExpectation => "salary_expectation",
            DataKey::StartDate => "start_date",
            DataKey::Linkedin => "linkedin",
            DataKey::Website => "website",
            DataKey::Resume => "resume",
            DataKey::CoverLetter => "cover_letter",
            DataKey::Transcript => "transcript",
        }
    }

    /// Parse a snake-case key name, returning `None` for anything outside
    /// the vocabulary.
    pub fn parse(s: &str) -> Option<DataKey> {
        DataKey::ALL.iter().copied().find(|key| key.as_str() == s)
    }
}

impl fmt::Display for DataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DataKey::parse(s).ok_or_else(|| format!("unknown data key: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trips_every_key() {
        for key in DataKey::ALL {
            assert_eq!(DataKey::parse(key.as_str()), Some(key));
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        assert_eq!(DataKey::parse("favorite_color"), None);
        assert_eq!(DataKey::parse("unknown"), None);
        assert_eq!(DataKey::parse(""), None);
        assert!("Email".parse::<DataKey>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&DataKey::FirstName).unwrap(),
            "\"first_name\""
        );
        assert_eq!(
            serde_json::from_str::<DataKey>("\"cover_letter\"").unwrap(),
            DataKey::CoverLetter
        );
    }
}
