//! Cycle partitioning and per-cycle reductions.
//!
//! Both partitioners return borrowed, contiguous sub-slices of the input in
//! their original order, so a series can be split once and reduced in as many
//! ways as needed without copying.

use thiserror::Error;

/// Invalid numeric parameters for a calculation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Normal force cannot be zero")]
    ZeroNormalForce,

    #[error("Empty list provided for RMS calculation")]
    EmptyRms,

    #[error("Number of cycles must be between 1 and {samples}, got {requested}")]
    CycleCountOutOfRange { requested: usize, samples: usize },

    #[error("Cycle size must be between 1 and {samples}, got {requested}")]
    CycleSizeOutOfRange { requested: usize, samples: usize },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, DomainError>;

/// Split `items` into exactly `num_cycles` contiguous groups.
///
/// Every group holds `items.len() / num_cycles` elements and the first
/// `items.len() % num_cycles` groups take one extra.
///
/// # Errors
///
/// [`DomainError::CycleCountOutOfRange`] unless `1 <= num_cycles <= items.len()`.
///
/// # Example
///
/// ```
/// use tribo_calc::core::transforms::partition_fixed_count;
///
/// let groups = partition_fixed_count(&[1, 2, 3, 4, 5], 2).unwrap();
/// assert_eq!(groups, vec![&[1, 2, 3][..], &[4, 5][..]]);
/// ```
pub fn partition_fixed_count<T>(items: &[T], num_cycles: usize) -> Result<Vec<&[T]>> {
    let total = items.len();
    if num_cycles < 1 || num_cycles > total {
        return Err(DomainError::CycleCountOutOfRange {
            requested: num_cycles,
            samples: total,
        });
    }

    let base = total / num_cycles;
    let remainder = total % num_cycles;

    let mut groups = Vec::with_capacity(num_cycles);
    let mut start = 0;
    for i in 0..num_cycles {
        let size = base + usize::from(i < remainder);
        groups.push(&items[start..start + size]);
        start += size;
    }

    debug_assert_eq!(start, total, "groups must cover the input");
    Ok(groups)
}

/// Split `items` into contiguous groups of `cycle_size`; the last group may be shorter.
///
/// # Errors
///
/// [`DomainError::CycleSizeOutOfRange`] unless `1 <= cycle_size <= items.len()`.
pub fn partition_fixed_size<T>(items: &[T], cycle_size: usize) -> Result<Vec<&[T]>> {
    if cycle_size < 1 || cycle_size > items.len() {
        return Err(DomainError::CycleSizeOutOfRange {
            requested: cycle_size,
            samples: items.len(),
        });
    }

    Ok(items.chunks(cycle_size).collect())
}

/// Arithmetic mean of `values`, or `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Largest absolute value in `values`; 0.0 for an empty slice.
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().map(|v| v.abs()).fold(0.0, f64::max)
}

/// Average `values` over consecutive groups of `cycle_size` points.
pub fn average_over_cycles(values: &[f64], cycle_size: usize) -> Result<Vec<f64>> {
    let groups = partition_fixed_size(values, cycle_size)?;
    // chunks() never yields an empty group
    Ok(groups.iter().filter_map(|group| mean(group)).collect())
}

/// Root mean square of `values`.
///
/// # Errors
///
/// [`DomainError::EmptyRms`] for an empty slice.
pub fn rms(values: &[f64]) -> Result<f64> {
    let mean_square = mean(&values.iter().map(|v| v * v).collect::<Vec<_>>())
        .ok_or(DomainError::EmptyRms)?;
    Ok(mean_square.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_count_sizes() {
        for total in 1..=40usize {
            let items: Vec<usize> = (0..total).collect();
            for n in 1..=total {
                let groups = partition_fixed_count(&items, n).unwrap();
                assert_eq!(groups.len(), n);

                let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
                assert_eq!(sizes.iter().sum::<usize>(), total);

                let base = total / n;
                let remainder = total % n;
                for (i, &size) in sizes.iter().enumerate() {
                    let expected = if i < remainder { base + 1 } else { base };
                    assert_eq!(size, expected, "total={} n={} group={}", total, n, i);
                }

                // contiguous and ordered
                let flattened: Vec<usize> = groups.iter().flat_map(|g| g.iter().copied()).collect();
                assert_eq!(flattened, items);
            }
        }
    }

    #[test]
    fn test_fixed_count_out_of_range() {
        let items = [1.0, 2.0, 3.0];
        assert_eq!(
            partition_fixed_count(&items, 0),
            Err(DomainError::CycleCountOutOfRange { requested: 0, samples: 3 })
        );
        assert_eq!(
            partition_fixed_count(&items, 4),
            Err(DomainError::CycleCountOutOfRange { requested: 4, samples: 3 })
        );
        assert!(partition_fixed_count::<f64>(&[], 1).is_err());
    }

    #[test]
    fn test_fixed_size_sizes() {
        for total in 1..=40usize {
            let items: Vec<usize> = (0..total).collect();
            for size in 1..=total {
                let groups = partition_fixed_size(&items, size).unwrap();
                let expected_groups = (total + size - 1) / size;
                assert_eq!(groups.len(), expected_groups);

                let (last, head) = groups.split_last().unwrap();
                assert!(head.iter().all(|g| g.len() == size));
                assert_eq!(last.len(), total - size * (expected_groups - 1));
                assert!(!last.is_empty());
            }
        }
    }

    #[test]
    fn test_fixed_size_out_of_range() {
        let items = [1.0, 2.0];
        assert!(matches!(
            partition_fixed_size(&items, 0),
            Err(DomainError::CycleSizeOutOfRange { requested: 0, samples: 2 })
        ));
        assert!(matches!(
            partition_fixed_size(&items, 3),
            Err(DomainError::CycleSizeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_average_over_cycles() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(average_over_cycles(&values, 2).unwrap(), vec![1.5, 3.5, 5.0]);
        assert_eq!(average_over_cycles(&values, 5).unwrap(), vec![3.0]);
        assert_eq!(average_over_cycles(&values, 1).unwrap(), values.to_vec());
    }

    #[test]
    fn test_max_abs() {
        assert_eq!(max_abs(&[1.0, -4.0, 3.0]), 4.0);
        assert_eq!(max_abs(&[]), 0.0);
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[3.0, -3.0]).unwrap(), 3.0);
        assert!((rms(&[1.0, 2.0, 3.0]).unwrap() - (14.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(rms(&[]), Err(DomainError::EmptyRms));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
        assert_eq!(mean(&[]), None);
    }
}
