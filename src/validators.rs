// ✅ Field Validators - one pure parse function per field type
//
// Each validator takes the raw token exactly as it appears in the line and
// returns either the typed value or a LineError naming the field, the text
// and the rule that was broken. No trimming, no normalization.

use crate::error::{Field, LineError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::str::FromStr;

// ============================================================================
// RULES
// ============================================================================

pub const MATRICULE_RULE: &str = r"^[MTC][0-9]{5}$";
pub const NAME_RULE: &str = r"^[\p{L}\- ]*$";
pub const MANAGER_MATRICULE_RULE: &str = r"^M[0-9]{5}$";
pub const DATE_FORMAT: &str = "%d/%m/%Y";

const DATE_SHAPE: &str = r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$";
const MONEY_SHAPE: &str = r"^([0-9]+|[0-9]*\.[0-9]{1,2})$";
const INTEGER_SHAPE: &str = r"^[0-9]+$";

static MATRICULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(MATRICULE_RULE).expect("Valid regex pattern"));
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(NAME_RULE).expect("Valid regex pattern"));
static MANAGER_MATRICULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(MANAGER_MATRICULE_RULE).expect("Valid regex pattern"));
static DATE: Lazy<Regex> = Lazy::new(|| Regex::new(DATE_SHAPE).expect("Valid regex pattern"));
static MONEY: Lazy<Regex> = Lazy::new(|| Regex::new(MONEY_SHAPE).expect("Valid regex pattern"));
static INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(INTEGER_SHAPE).expect("Valid regex pattern"));

fn pattern_mismatch(field: Field, text: &str, rule: &'static str) -> LineError {
    LineError::PatternMismatch {
        field,
        value: text.to_string(),
        rule,
    }
}

// ============================================================================
// VALIDATORS
// ============================================================================

/// Employee matricule: kind letter + 5 digits
pub fn identifier(text: &str) -> Result<String, LineError> {
    if MATRICULE.is_match(text) {
        Ok(text.to_string())
    } else {
        Err(pattern_mismatch(Field::Matricule, text, MATRICULE_RULE))
    }
}

/// Last or first name: Unicode letters, hyphen, space. Empty is accepted.
pub fn person_name(field: Field, text: &str) -> Result<String, LineError> {
    if NAME.is_match(text) {
        Ok(text.to_string())
    } else {
        Err(pattern_mismatch(field, text, NAME_RULE))
    }
}

/// `dd/MM/yyyy`, exactly 2/2/4 digits, and a real calendar date
pub fn date(field: Field, text: &str) -> Result<NaiveDate, LineError> {
    let invalid = || LineError::DateFormat {
        field,
        value: text.to_string(),
    };

    // chrono alone would accept "1/1/2020" or a 5-digit year
    if !DATE.is_match(text) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())
}

/// Non-negative amount with zero, one or two fractional digits
pub fn money(field: Field, text: &str) -> Result<Decimal, LineError> {
    let invalid = || LineError::NumberFormat {
        field,
        value: text.to_string(),
        expected: "amount (digits with at most 2 decimals)",
    };

    if !MONEY.is_match(text) {
        return Err(invalid());
    }

    // ".5" has no integer part
    let digits = if text.starts_with('.') {
        Cow::Owned(format!("0{}", text))
    } else {
        Cow::Borrowed(text)
    };

    // Too many digits for a Decimal is still a malformed amount
    Decimal::from_str(&digits).map_err(|_| invalid())
}

/// Integer percentage in 0..=100, no sign, no decimal point, no leading zero
pub fn percentage(field: Field, text: &str) -> Result<u8, LineError> {
    if !INTEGER.is_match(text) {
        return Err(LineError::NumberFormat {
            field,
            value: text.to_string(),
            expected: "integer",
        });
    }

    let out_of_range = || LineError::Range {
        field,
        value: text.to_string(),
        min: 0,
        max: 100,
    };

    if text.len() > 1 && text.starts_with('0') {
        return Err(pattern_mismatch(field, text, r"^(100|[1-9]?[0-9])$"));
    }

    match text.parse::<u32>() {
        Ok(value) if value <= 100 => Ok(value as u8),
        _ => Err(out_of_range()),
    }
}

/// Grade as an integer literal. The 1..=5 range is checked when the
/// technician is built, not here.
pub fn grade_value(text: &str) -> Result<i32, LineError> {
    text.parse::<i32>().map_err(|_| LineError::NumberFormat {
        field: Field::Grade,
        value: text.to_string(),
        expected: "integer",
    })
}

/// Manager matricule referenced by a technician
pub fn manager_matricule(text: &str) -> Result<String, LineError> {
    if MANAGER_MATRICULE.is_match(text) {
        Ok(text.to_string())
    } else {
        Err(pattern_mismatch(
            Field::ManagerMatricule,
            text,
            MANAGER_MATRICULE_RULE,
        ))
    }
}
