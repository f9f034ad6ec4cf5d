//! Reorder Utilities
//!
//! Single-element moves over ordered slices.

/// Move the element at `from` to `to`, shifting the elements in between by one.
///
/// Elements outside `from..=to` (or `to..=from`) keep their positions.
/// Returns false without touching the slice if either index is out of range.
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else if from > to {
        items[to..=from].rotate_right(1);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_forward() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        assert!(array_move(&mut v, 1, 3));
        assert_eq!(v, vec!['a', 'c', 'd', 'b', 'e']);
    }

    #[test]
    fn test_move_backward() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        assert!(array_move(&mut v, 4, 0));
        assert_eq!(v, vec!['e', 'a', 'b', 'c', 'd']);
    }

    #[test]
    fn test_move_to_same_index() {
        let mut v = vec![1, 2, 3];
        assert!(array_move(&mut v, 1, 1));
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut v = vec![1, 2, 3];
        assert!(!array_move(&mut v, 0, 3));
        assert!(!array_move(&mut v, 7, 0));
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_every_move_matches_remove_insert() {
        let base: Vec<u32> = (0..6).collect();
        for from in 0..base.len() {
            for to in 0..base.len() {
                let mut moved = base.clone();
                array_move(&mut moved, from, to);

                let mut expected = base.clone();
                let x = expected.remove(from);
                expected.insert(to, x);
                assert_eq!(moved, expected, "from={} to={}", from, to);
            }
        }
    }
}
