//! Untyped-value helpers implementing the Input Normalizer's documented
//! fallback chains (spec §4.1). Nothing here produces canonical types —
//! `normalize.rs` is the only caller.

use serde_json::Value;

/// Walk a chain of `(path, key)` candidates against a JSON object, where
/// `path` is a dotted lookup rooted at `rule` (empty = top level) and `key`
/// is the final field name. First non-empty string wins.
pub fn first_non_empty_string(rule: &Value, candidates: &[(&str, &str)]) -> Option<String> {
    for (path, key) in candidates {
        if let Some(v) = lookup(rule, path, key) {
            if let Some(s) = v.as_str() {
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            }
        }
    }
    None
}

/// Same shape, but for a list field: the chain's first non-empty array wins.
pub fn first_non_empty_list(rule: &Value, candidates: &[(&str, &str)]) -> Option<Vec<String>> {
    for (path, key) in candidates {
        if let Some(v) = lookup(rule, path, key) {
            if let Some(arr) = v.as_array() {
                let ids: Vec<String> = arr
                    .iter()
                    .filter_map(|e| e.as_str().map(str::to_string))
                    .collect();
                if !ids.is_empty() {
                    return Some(ids);
                }
            }
        }
    }
    None
}

fn lookup<'a>(root: &'a Value, path: &str, key: &str) -> Option<&'a Value> {
    let base = if path.is_empty() {
        Some(root)
    } else {
        root.get(path)
    };
    base.and_then(|v| v.get(key))
}

/// `staffId` extraction chain (spec §4.1).
pub fn staff_id_chain() -> [(&'static str, &'static str); 8] {
    [
        ("", "staffId"),
        ("", "staff_id"),
        ("ruleDefinition", "staff_id"),
        ("ruleDefinition", "staffId"),
        ("ruleConfig", "staffId"),
        ("ruleConfig", "staff_id"),
        ("preferences", "staffId"),
        ("preferences", "staff_id"),
    ]
}

/// `staffIds` extraction chain, same candidate locations.
pub fn staff_ids_chain() -> [(&'static str, &'static str); 8] {
    [
        ("", "staffIds"),
        ("", "staff_ids"),
        ("ruleDefinition", "staff_ids"),
        ("ruleDefinition", "staffIds"),
        ("ruleConfig", "staffIds"),
        ("ruleConfig", "staff_ids"),
        ("preferences", "staffIds"),
        ("preferences", "staff_ids"),
    ]
}

/// `shiftType`: top-level, then nested, lowercased, default `"off"`.
pub fn extract_shift_type(rule: &Value) -> String {
    let candidates: [(&str, &str); 3] = [
        ("", "shiftType"),
        ("ruleDefinition", "shift_type"),
        ("preferences", "shiftType"),
    ];
    for (path, key) in candidates {
        if let Some(v) = lookup(rule, path, key) {
            if let Some(s) = v.as_str() {
                if !s.is_empty() {
                    return s.to_lowercase();
                }
            }
        }
    }
    // `ruleDefinition.shiftType` (camelCase) is also accepted alongside
    // `ruleDefinition.shift_type`.
    if let Some(v) = lookup(rule, "ruleDefinition", "shiftType") {
        if let Some(s) = v.as_str() {
            if !s.is_empty() {
                return s.to_lowercase();
            }
        }
    }
    "off".to_string()
}

/// `daysOfWeek`: mixed integer (`0=Sunday..6=Saturday`) and lowercase day
/// name entries within the same array.
pub fn extract_days_of_week(rule: &Value) -> Vec<u8> {
    let arr = match rule.get("daysOfWeek").or_else(|| rule.get("days_of_week")) {
        Some(Value::Array(a)) => a,
        _ => return Vec::new(),
    };

    arr.iter().filter_map(day_of_week_value).collect()
}

fn day_of_week_value(v: &Value) -> Option<u8> {
    if let Some(n) = v.as_u64() {
        if n <= 6 {
            return Some(n as u8);
        }
        return None;
    }
    if let Some(s) = v.as_str() {
        return day_name_to_index(&s.to_lowercase());
    }
    None
}

fn day_name_to_index(name: &str) -> Option<u8> {
    match name {
        "sunday" => Some(0),
        "monday" => Some(1),
        "tuesday" => Some(2),
        "wednesday" => Some(3),
        "thursday" => Some(4),
        "friday" => Some(5),
        "saturday" => Some(6),
        _ => None,
    }
}
