use std::collections::HashMap;
use std::hash::Hash;

/// Returns every value occurring more than once, in order of first occurrence.
pub fn find_duplicates<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    let mut order = Vec::new();
    for value in values {
        let count = counts.entry(value.clone()).or_insert(0);
        if *count == 0 {
            order.push(value);
        }
        *count += 1;
    }
    order.into_iter().filter(|v| counts[v] > 1).collect()
}

pub fn is_state_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Identifier rule shared by entity and site names used in textual conditions.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_duplicates_returns_repeated_values_in_first_occurrence_order() {
        let dups = find_duplicates(["b", "a", "b", "c", "a", "b"]);
        assert_eq!(dups, vec!["b", "a"]);
    }

    #[test]
    fn find_duplicates_returns_empty_for_unique_values() {
        assert!(find_duplicates(["x", "y", "z"]).is_empty());
        assert!(find_duplicates(Vec::<u32>::new()).is_empty());
    }

    #[test]
    fn is_state_label_accepts_alphanumeric_tokens() {
        assert!(is_state_label("u"));
        assert!(is_state_label("p"));
        assert!(is_state_label("P2"));
        assert!(is_state_label("_active"));
        assert!(is_state_label("0"));
    }

    #[test]
    fn is_state_label_rejects_empty_and_punctuated_labels() {
        assert!(!is_state_label(""));
        assert!(!is_state_label("p p"));
        assert!(!is_state_label("~p"));
        assert!(!is_state_label("a!1"));
    }

    #[test]
    fn is_identifier_requires_leading_letter_or_underscore() {
        assert!(is_identifier("EGFR"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
    }
}
