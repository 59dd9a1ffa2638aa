//! Slot update primitives shared by the order and check-in state.

/// Overwrite `slot` with `value` when it is present and non-empty.
///
/// No trimming happens here: any non-empty string, whitespace included, wins.
/// Returns true when the slot was written.
pub fn set_scalar(slot: &mut Option<String>, value: Option<&str>) -> bool {
    match value {
        Some(v) if !v.is_empty() => {
            *slot = Some(v.to_string());
            true
        }
        _ => false,
    }
}

/// Split a comma separated string into trimmed, non-empty pieces.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Append every piece of `raw` not already in `list`. Matching is exact and
/// case-sensitive; first-seen order is kept. Returns the number of pieces added.
pub fn append_unique(list: &mut Vec<String>, raw: &str) -> usize {
    let mut added = 0;
    for piece in parse_list(raw) {
        if !list.contains(&piece) {
            list.push(piece);
            added += 1;
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_scalar_ignores_empty() {
        let mut slot = Some("Latte".to_string());
        assert!(!set_scalar(&mut slot, None));
        assert!(!set_scalar(&mut slot, Some("")));
        assert_eq!(slot.as_deref(), Some("Latte"));

        assert!(set_scalar(&mut slot, Some("Mocha")));
        assert_eq!(slot.as_deref(), Some("Mocha"));
    }

    #[test]
    fn test_set_scalar_keeps_whitespace_values() {
        let mut slot = None;
        assert!(set_scalar(&mut slot, Some(" ")));
        assert_eq!(slot.as_deref(), Some(" "));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list(" write report ,, walk ,"),
            vec!["write report".to_string(), "walk".to_string()]
        );
        assert!(parse_list(" , ,").is_empty());
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_append_unique_preserves_first_seen_order() {
        let mut list = Vec::new();
        assert_eq!(append_unique(&mut list, "Vanilla Syrup, Extra Shot"), 2);
        assert_eq!(append_unique(&mut list, "Extra Shot, Oat Milk"), 1);
        assert_eq!(list, vec!["Vanilla Syrup", "Extra Shot", "Oat Milk"]);
    }

    #[test]
    fn test_append_unique_is_case_sensitive() {
        let mut list = vec!["Extra Shot".to_string()];
        assert_eq!(append_unique(&mut list, "extra shot"), 1);
        assert_eq!(list, vec!["Extra Shot", "extra shot"]);
    }

    #[test]
    fn test_append_unique_dedups_within_one_call() {
        let mut list = Vec::new();
        assert_eq!(append_unique(&mut list, "Whipped Cream, Whipped Cream"), 1);
        assert_eq!(list, vec!["Whipped Cream"]);
    }
}
