use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::rest::dto::{ListTasksQuery, ListUsersQuery, UpdateUserReq};

/// Exactly a 4-digit block, one space, a 6-digit block.
static PASSPORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4} \d{6}$").unwrap());
/// Latin letters only, for name-like fields.
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());

const MAX_NAME_LEN: usize = 36;
const MAX_ADDRESS_LEN: usize = 256;

pub fn is_valid_passport(value: &str) -> bool {
    PASSPORT_RE.is_match(value)
}

fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value) && value.len() <= MAX_NAME_LEN
}

fn is_valid_address(value: &str) -> bool {
    value.len() <= MAX_ADDRESS_LEN
}

/// Accumulated rule violations joined into one message, or None when every
/// rule passed.
fn join(errs: Vec<&'static str>) -> Option<String> {
    if errs.is_empty() {
        None
    } else {
        Some(errs.join(", "))
    }
}

/// List filters: an empty string imposes no constraint (an empty substring
/// matches everything), so only non-empty values are format-checked.
pub fn validate_list_users(query: &ListUsersQuery) -> Option<String> {
    let mut errs = Vec::new();

    for (value, message) in [
        (&query.name, "name is invalid"),
        (&query.surname, "surname is invalid"),
        (&query.patronymic, "patronymic is invalid"),
    ] {
        if let Some(v) = value.as_deref().filter(|s| !s.is_empty()) {
            if !is_valid_name(v) {
                errs.push(message);
            }
        }
    }

    if let Some(v) = query.address.as_deref().filter(|s| !s.is_empty()) {
        if !is_valid_address(v) {
            errs.push("address too long");
        }
    }

    if let Some(v) = query.passport_number.as_deref().filter(|s| !s.is_empty()) {
        if !is_valid_passport(v) {
            errs.push("passport number is invalid");
        }
    }

    join(errs)
}

/// Update fields: a supplied value must be valid — supplying an empty string
/// is rejected rather than silently skipping the format check.
pub fn validate_update_user(req: &UpdateUserReq) -> Option<String> {
    let mut errs = Vec::new();

    for (value, message) in [
        (&req.name, "name is invalid"),
        (&req.surname, "surname is invalid"),
        (&req.patronymic, "patronymic is invalid"),
    ] {
        if let Some(v) = value.as_deref() {
            if !is_valid_name(v) {
                errs.push(message);
            }
        }
    }

    if let Some(v) = req.address.as_deref() {
        if v.is_empty() || !is_valid_address(v) {
            errs.push("address is invalid");
        }
    }

    if let Some(v) = req.passport_number.as_deref() {
        if !is_valid_passport(v) {
            errs.push("passport number is invalid");
        }
    }

    join(errs)
}

/// Task listing needs all three parameters, and an ordered range.
pub fn validate_list_tasks(query: &ListTasksQuery) -> Option<String> {
    let mut errs = Vec::new();

    if query.user_id.is_none() {
        errs.push("userId is required");
    }
    if query.date_from.is_none() {
        errs.push("dateFrom is required");
    }
    if query.date_to.is_none() {
        errs.push("dateTo is required");
    }

    if let (Some(from), Some(to)) = (query.date_from, query.date_to) {
        if from > to {
            errs.push("invalid date range");
        }
    }

    join(errs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn passport_format() {
        assert!(is_valid_passport("1234 567890"));
        assert!(!is_valid_passport("1234567890"));
        assert!(!is_valid_passport("12345 67890"));
        assert!(!is_valid_passport("1234 5678901"));
        assert!(!is_valid_passport(" 1234 567890"));
        assert!(!is_valid_passport(""));
    }

    #[test]
    fn name_rules() {
        assert!(is_valid_name("Ann"));
        assert!(is_valid_name(&"a".repeat(36)));
        assert!(!is_valid_name(&"a".repeat(37)));
        assert!(!is_valid_name("Ann1"));
        assert!(!is_valid_name("Ann Marie"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn list_users_empty_strings_impose_no_constraint() {
        let query = ListUsersQuery {
            name: Some(String::new()),
            passport_number: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(validate_list_users(&query), None);
    }

    #[test]
    fn list_users_accumulates_violations() {
        let query = ListUsersQuery {
            name: Some("bad name".into()),
            surname: Some("ok".into()),
            address: Some("x".repeat(257)),
            passport_number: Some("nope".into()),
            ..Default::default()
        };

        let msg = validate_list_users(&query).unwrap();
        assert_eq!(
            msg,
            "name is invalid, address too long, passport number is invalid"
        );
    }

    #[test]
    fn update_rejects_present_but_empty_fields() {
        let req = UpdateUserReq {
            name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(validate_update_user(&req).as_deref(), Some("name is invalid"));
    }

    #[test]
    fn update_accepts_partial_valid_input() {
        let req = UpdateUserReq {
            surname: Some("Smith".into()),
            passport_number: Some("1234 567890".into()),
            ..Default::default()
        };
        assert_eq!(validate_update_user(&req), None);
    }

    #[test]
    fn list_tasks_requires_all_params() {
        let msg = validate_list_tasks(&ListTasksQuery::default()).unwrap();
        assert_eq!(msg, "userId is required, dateFrom is required, dateTo is required");
    }

    #[test]
    fn list_tasks_rejects_inverted_range() {
        let query = ListTasksQuery {
            user_id: Some(1),
            date_from: Some(Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 0).unwrap()),
            date_to: Some(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()),
        };
        assert_eq!(validate_list_tasks(&query).as_deref(), Some("invalid date range"));
    }
}
