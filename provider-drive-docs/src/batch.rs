//! Work-list partitioning
//!
//! The listing query OR-combines parent ids, and the remote service caps
//! how many a single query may carry. Oversized parent sets are split into
//! near-equal chunks rather than max-sized chunks with a small remainder,
//! so parallel branches get balanced work.

/// Split `items` into balanced chunks of at most `max_batch` elements.
///
/// Returns the input unchanged (as a single chunk) when it already fits.
/// Chunk sizes differ by at most one and element order is preserved:
/// 250 items at a limit of 100 become chunks of 84, 83 and 83.
pub fn evenly_chunk<T>(items: Vec<T>, max_batch: usize) -> Vec<Vec<T>> {
    if items.len() <= max_batch {
        return vec![items];
    }

    let len = items.len();
    let chunks = len.div_ceil(max_batch);
    let base_size = len / chunks;
    let remainder = len % chunks;

    let mut result = Vec::with_capacity(chunks);
    let mut rest = items;
    for index in 0..chunks - 1 {
        // The first `remainder` chunks carry one extra element.
        let size = if index < remainder {
            base_size + 1
        } else {
            base_size
        };
        let tail = rest.split_off(size);
        result.push(rest);
        rest = tail;
    }
    result.push(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_input_returned_unchanged() {
        let chunks = evenly_chunk(vec![1, 2, 3], 100);
        assert_eq!(chunks, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_empty_input() {
        let chunks = evenly_chunk(Vec::<u32>::new(), 100);
        assert_eq!(chunks, vec![Vec::<u32>::new()]);
    }

    #[test]
    fn test_balanced_split_250_by_100() {
        let chunks = evenly_chunk((0..250).collect::<Vec<_>>(), 100);

        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![84, 83, 83]);
    }

    #[test]
    fn test_order_preserved_and_nothing_lost() {
        let chunks = evenly_chunk((0..1017).collect::<Vec<_>>(), 100);

        let flattened: Vec<u32> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, (0..1017).collect::<Vec<_>>());
    }

    #[test]
    fn test_sizes_balanced_within_one() {
        for len in [101usize, 150, 200, 250, 999, 1000, 1001] {
            let chunks = evenly_chunk((0..len).collect::<Vec<_>>(), 100);

            let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
            let max = *sizes.iter().max().unwrap();
            let min = *sizes.iter().min().unwrap();

            assert!(sizes.iter().all(|&s| s <= 100), "len={}", len);
            assert!(max - min <= 1, "len={}", len);
            assert_eq!(sizes.iter().sum::<usize>(), len);
        }
    }
}
