//! Query sequence normalization and windowing

/// Uppercase and drop all whitespace
pub fn normalize(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Non-overlapping windows of exactly `k` symbols, left to right.
/// A trailing remainder shorter than `k` is dropped.
pub fn windows(sequence: &str, k: usize) -> Vec<String> {
    if k == 0 {
        return Vec::new();
    }
    let symbols: Vec<char> = sequence.chars().collect();
    symbols
        .chunks_exact(k)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Position key of window `i`: 1 for the first window, `i * k` after that.
///
/// With k = 1 the first two windows share key 1; the caller keeps whichever
/// node was recorded first under a key.
pub fn position_key(i: usize, k: usize) -> usize {
    if i == 0 {
        1
    } else {
        i * k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" ac\tgT\n"), "ACGT");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_windows_drop_remainder() {
        assert_eq!(windows("ACGTAC", 3), vec!["ACG", "TAC"]);
        assert_eq!(windows("ACGTACG", 3), vec!["ACG", "TAC"]);
        assert!(windows("AC", 3).is_empty());
        assert!(windows("ACGT", 0).is_empty());
    }

    #[test]
    fn test_position_keys() {
        let keys: Vec<usize> = (0..3).map(|i| position_key(i, 3)).collect();
        assert_eq!(keys, vec![1, 3, 6]);
        assert_eq!(position_key(0, 1), position_key(1, 1));
    }
}
