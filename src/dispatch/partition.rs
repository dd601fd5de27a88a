//! Assignment of rows to workers.

use std::collections::HashSet;

use log::warn;

use super::AddressRow;

/// Splits `rows` into `workers` disjoint partitions.
///
/// A row goes to partition `row_index % workers`, so with two workers even
/// rows and odd rows are processed independently. Order within a partition
/// follows the input order. The header row (index 0) and repeated row
/// indices are dropped.
pub fn partition_rows(rows: Vec<AddressRow>, workers: usize) -> Vec<Vec<AddressRow>> {
    let workers = workers.max(1);
    let mut partitions: Vec<Vec<AddressRow>> = (0..workers).map(|_| Vec::new()).collect();
    let mut seen = HashSet::with_capacity(rows.len());

    for row in rows {
        if row.row_index == 0 {
            warn!("Header row handed to the dispatcher, skipping it");
            continue;
        }
        if !seen.insert(row.row_index) {
            warn!("Row {} queued twice, keeping the first", row.row_index);
            continue;
        }
        partitions[row.row_index % workers].push(row);
    }

    partitions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(indices: &[usize]) -> Vec<AddressRow> {
        indices
            .iter()
            .map(|&i| AddressRow::new(i, format!("{i} Main St")))
            .collect()
    }

    fn indices(partition: &[AddressRow]) -> Vec<usize> {
        partition.iter().map(|r| r.row_index).collect()
    }

    #[test]
    fn test_two_workers_split_by_parity() {
        let parts = partition_rows(rows(&[1, 2, 3, 4, 5, 6, 7]), 2);
        assert_eq!(parts.len(), 2);
        assert_eq!(indices(&parts[0]), vec![2, 4, 6]);
        assert_eq!(indices(&parts[1]), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_header_never_queued() {
        let parts = partition_rows(rows(&[0, 1, 2]), 2);
        let all: Vec<usize> = parts.iter().flat_map(|p| indices(p)).collect();
        assert!(!all.contains(&0));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_every_row_in_exactly_one_partition() {
        let input: Vec<usize> = (1..=100).collect();
        for workers in 1..=7 {
            let parts = partition_rows(rows(&input), workers);
            assert_eq!(parts.len(), workers);
            let mut all: Vec<usize> = parts.iter().flat_map(|p| indices(p)).collect();
            all.sort_unstable();
            assert_eq!(all, input);
            for (w, part) in parts.iter().enumerate() {
                assert!(part.iter().all(|r| r.row_index % workers == w));
            }
        }
    }

    #[test]
    fn test_duplicates_dropped() {
        let parts = partition_rows(rows(&[3, 3, 5]), 2);
        assert_eq!(indices(&parts[1]), vec![3, 5]);
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        let parts = partition_rows(rows(&[1, 2]), 0);
        assert_eq!(parts.len(), 1);
        assert_eq!(indices(&parts[0]), vec![1, 2]);
    }

    #[test]
    fn test_order_within_partition_follows_input() {
        let parts = partition_rows(rows(&[8, 2, 6, 4]), 2);
        assert_eq!(indices(&parts[0]), vec![8, 2, 6, 4]);
    }
}
