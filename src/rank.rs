//! Ranking of derived durations

use crate::derive::DurationRecord;

/// Sort records longest first and keep at most `top_n`
///
/// The sort is stable, so equal durations stay in chronological order.
pub fn rank<'a, I>(records: I, top_n: usize) -> Vec<DurationRecord<'a>>
where
    I: IntoIterator<Item = DurationRecord<'a>>,
{
    let mut ranked: Vec<_> = records.into_iter().collect();
    ranked.sort_by(|a, b| b.elapsed.cmp(&a.elapsed));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn record(label: &str, millis: u64) -> DurationRecord<'_> {
        DurationRecord {
            label,
            elapsed: Duration::from_millis(millis),
        }
    }

    fn labels<'a>(records: &[DurationRecord<'a>]) -> Vec<&'a str> {
        records.iter().map(|r| r.label).collect()
    }

    #[test]
    fn test_rank_longest_first() {
        let ranked = rank(vec![record("A", 5000), record("B", 7000)], 10);
        assert_eq!(labels(&ranked), vec!["B", "A"]);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let ranked = rank(
            vec![
                record("first", 100),
                record("slow", 900),
                record("second", 100),
                record("third", 100),
            ],
            10,
        );
        assert_eq!(labels(&ranked), vec!["slow", "first", "second", "third"]);
    }

    #[test]
    fn test_rank_truncates_to_top_n() {
        let ranked = rank(
            vec![record("a", 1), record("b", 4), record("c", 3), record("d", 2)],
            2,
        );
        assert_eq!(labels(&ranked), vec!["b", "c"]);
    }

    #[test]
    fn test_rank_top_n_larger_than_input() {
        let ranked = rank(vec![record("a", 1), record("b", 2)], 10);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_rank_zero_top_n() {
        assert!(rank(vec![record("a", 1)], 0).is_empty());
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank(Vec::new(), 10).is_empty());
    }
}
