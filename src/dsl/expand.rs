//! Expansion of series directives into label pairs.

use crate::circuit::Label;

use super::ast::Target;

/// Pair consecutive pins, starting at `start`, with each target in order.
///
/// The pin cursor advances once per target, including skipped ones, so
/// `1++(10,20,x,40)` yields `1-10`, `2-20`, `4-40`. An empty or all-skip
/// target list yields nothing. Pins past `u32::MAX` are dropped; the
/// classifier rejects such series before they get here.
pub fn expand_incremented(start: u32, targets: &[Target]) -> Vec<(Label, Label)> {
    let mut pairs = Vec::with_capacity(targets.len());
    let mut cursor = Some(start);
    for target in targets {
        if let (Some(pin), Target::Label(label)) = (cursor, target) {
            pairs.push((Label::pin(pin), label.clone()));
        }
        cursor = cursor.and_then(|pin| pin.checked_add(1));
    }
    pairs
}

/// Pair every adjacent label: `a-b-c-d` yields `a-b`, `b-c`, `c-d`.
pub fn expand_chain(labels: &[Label]) -> Vec<(Label, Label)> {
    labels
        .windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn l(s: &str) -> Label {
        Label::parse(s).unwrap()
    }

    fn rendered(pairs: &[(Label, Label)]) -> Vec<String> {
        pairs.iter().map(|(a, b)| format!("{}-{}", a, b)).collect()
    }

    #[test]
    fn test_incremented_skips_consume_pins() {
        let targets = vec![
            Target::Label(l("10")),
            Target::Label(l("20")),
            Target::Skip,
            Target::Label(l("40")),
        ];
        let pairs = expand_incremented(1, &targets);
        assert_eq!(rendered(&pairs), vec!["1-10", "2-20", "4-40"]);
        assert!(pairs.iter().all(|(a, b)| a.as_str() != "3" && b.as_str() != "3"));
    }

    #[test]
    fn test_incremented_empty() {
        assert!(expand_incremented(5, &[]).is_empty());
        assert!(expand_incremented(5, &[Target::Skip, Target::Skip]).is_empty());
    }

    #[test]
    fn test_incremented_at_pin_limit() {
        let pairs = expand_incremented(u32::MAX, &[Target::Label(l("gnd"))]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, Label::pin(u32::MAX));
    }

    #[test]
    fn test_chain_edge_count() {
        let labels: Vec<Label> = ["5v", "1", "2", "3", "4"].iter().map(|s| l(s)).collect();
        let pairs = expand_chain(&labels);
        assert_eq!(pairs.len(), labels.len() - 1);
        assert_eq!(rendered(&pairs), vec!["5v-1", "1-2", "2-3", "3-4"]);
    }

    #[test]
    fn test_chain_of_two_and_one() {
        assert_eq!(rendered(&expand_chain(&[l("a"), l("b")])), vec!["a-b"]);
        assert!(expand_chain(&[l("a")]).is_empty());
    }
}
