//! Regex tables for pattern-based label matching.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::keys::DataKey;

/// Patterns too ambiguous to trust on their own.
pub const GENERIC_PATTERNS: [&str; 2] = [r"\bname\b", r"\baddress\b"];

/// Keyword lists for file-upload fields, by target key.
pub const FILE_KEYWORDS: [(DataKey, &[&str]); 3] = [
    (DataKey::Resume, &["resume", "cv", "curriculum vitae"]),
    (
        DataKey::CoverLetter,
        &["cover letter", "covering letter", "motivation"],
    ),
    (
        DataKey::Transcript,
        &["transcript", "grades", "academic record"],
    ),
];

/// Alternative patterns registered for one data key.
pub struct KeyPatterns {
    pub key: DataKey,
    pub patterns: Vec<Regex>,
}

lazy_static! {
    /// Per-key pattern alternatives, in vocabulary order.
    pub static ref FIELD_PATTERNS: Vec<KeyPatterns> = build_patterns();
}

fn build_patterns() -> Vec<KeyPatterns> {
    let table: [(DataKey, &[&str]); 19] = [
        (
            DataKey::FirstName,
            &[
                r"\bfirst\s*name\b",
                r"\bfname\b",
                r"\bgiven\s*name\b",
                r"\bforename\b",
                r"\bname\s*\(first\)",
                r"\bfirst\b",
            ],
        ),
        (
            DataKey::LastName,
            &[
                r"\blast\s*name\b",
                r"\blname\b",
                r"\bsurname\b",
                r"\bfamily\s*name\b",
                r"\bname\s*\(last\)",
                r"\blast\b",
            ],
        ),
        (
            DataKey::FullName,
            &[
                r"\bfull\s*name\b",
                r"\bname\b",
                r"\bcomplete\s*name\b",
                r"\byour\s*name\b",
                r"\bapplicant\s*name\b",
            ],
        ),
        (
            DataKey::Email,
            &[
                r"\bemail\b",
                r"\be-mail\b",
                r"\bemail\s*address\b",
                r"\bcontact\s*email\b",
                r"\bmail\b",
            ],
        ),
        (
            DataKey::Phone,
            &[
                r"\bphone\b",
                r"\btelephone\b",
                r"\bmobile\b",
                r"\bcell\b",
                r"\bphone\s*number\b",
                r"\bcontact\s*number\b",
                r"\btel\b",
            ],
        ),
        (
            DataKey::Address,
            &[
                r"\baddress\b",
                r"\bstreet\b",
                r"\bhome\s*address\b",
                r"\bmailing\s*address\b",
                r"\bresidential\s*address\b",
            ],
        ),
        (DataKey::City, &[r"\bcity\b", r"\btown\b", r"\blocality\b"]),
        (
            DataKey::State,
            &[r"\bstate\b", r"\bprovince\b", r"\bregion\b"],
        ),
        (
            DataKey::Zip,
            &[
                r"\bzip\b",
                r"\bpostal\s*code\b",
                r"\bpostcode\b",
                r"\bzip\s*code\b",
            ],
        ),
        (
            DataKey::Country,
            &[r"\bcountry\b", r"\bnation\b", r"\bnationality\b"],
        ),
        (
            DataKey::University,
            &[
                r"\buniversity\b",
                r"\bcollege\b",
                r"\bschool\b",
                r"\binstitution\b",
                r"\beducation\b",
                r"\balma\s*mater\b",
            ],
        ),
        (
            DataKey::Degree,
            &[
                r"\bdegree\b",
                r"\bqualification\b",
                r"\beducation\s*level\b",
                r"\bmajor\b",
                r"\bfield\s*of\s*study\b",
            ],
        ),
        (
            DataKey::GraduationYear,
            &[
                r"\bgraduation\b",
                r"\byear\b",
                r"\bgrad\s*year\b",
                r"\bcompletion\s*year\b",
                r"\bgraduate\s*year\b",
            ],
        ),
        (
            DataKey::Gpa,
            &[
                r"\bgpa\b",
                r"\bgrade\s*point\b",
                r"\baverage\b",
                r"\bgrading\b",
            ],
        ),
        (
            DataKey::VisaStatus,
            &[
                r"\bvisa\b",
                r"\bwork\s*authorization\b",
                r"\beligibility\b",
                r"\bstatus\b",
                r"\bsponsorship\b",
            ],
        ),
        (
            DataKey::SalaryExpectation,
            &[
                r"\bsalary\b",
                r"\bcompensation\b",
                r"\bexpectation\b",
                r"\bexpected\s*salary\b",
                r"\bpay\b",
                r"\bwage\b",
            ],
        ),
        (
            DataKey::StartDate,
            &[
                r"\bstart\s*date\b",
                r"\bavailable\b",
                r"\bbegin\b",
                r"\bcommence\b",
                r"\bstart\s*work\b",
            ],
        ),
        (
            DataKey::Linkedin,
            &[r"\blinkedin\b", r"\blinked\s*in\b", r"\bprofile\b"],
        ),
        (
            DataKey::Website,
            &[
                r"\bwebsite\b",
                r"\bportfolio\b",
                r"\burl\b",
                r"\bhomepage\b",
            ],
        ),
    ];

    table
        .iter()
        .map(|(key, patterns)| KeyPatterns {
            key: *key,
            patterns: patterns
                .iter()
                .map(|pattern| Regex::new(pattern).unwrap())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_follows_vocabulary_order() {
        let table_order: Vec<DataKey> = FIELD_PATTERNS.iter().map(|entry| entry.key).collect();
        let vocab_order: Vec<DataKey> = DataKey::ALL
            .iter()
            .copied()
            .filter(|key| table_order.contains(key))
            .collect();
        assert_eq!(table_order, vocab_order);
    }

    #[test]
    fn every_entry_has_at_least_one_pattern() {
        for entry in FIELD_PATTERNS.iter() {
            assert!(!entry.patterns.is_empty(), "{} has no patterns", entry.key);
        }
    }

    #[test]
    fn generic_patterns_exist_in_the_table() {
        for generic in GENERIC_PATTERNS {
            assert!(
                FIELD_PATTERNS
                    .iter()
                    .any(|entry| entry.patterns.iter().any(|p| p.as_str() == generic)),
                "{generic} not registered"
            );
        }
    }
}
