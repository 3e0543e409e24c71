//! Dominance primitives for multi-objective search.
//!
//! Objective vectors are minimised componentwise. These helpers back the
//! Pareto archive; user-facing dominance checks live on
//! [`Fitness`](crate::chain::Fitness).

use std::cmp::Ordering;

/// Outcome of a pairwise dominance comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dominance {
    /// The left vector dominates.
    Left,
    /// The right vector dominates.
    Right,
    /// Neither vector dominates.
    Neither,
}

/// Compares two objective vectors of equal length.
pub fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len());
    let mut a_better = false;
    let mut b_better = false;
    for (x, y) in a.iter().zip(b) {
        match x.partial_cmp(y) {
            Some(Ordering::Less) => a_better = true,
            Some(Ordering::Greater) => b_better = true,
            _ => {}
        }
    }
    match (a_better, b_better) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Indices of the vectors not dominated by any other entry.
pub fn non_dominated_indices(objectives: &[Vec<f64>]) -> Vec<usize> {
    (0..objectives.len())
        .filter(|&i| {
            objectives
                .iter()
                .enumerate()
                .all(|(j, other)| j == i || dominance_cmp(other, &objectives[i]) != Dominance::Left)
        })
        .collect()
}

/// Crowding distance per vector. Boundary points along any objective get an
/// infinite distance; with two or fewer points every distance is infinite.
pub fn crowding_distance(objectives: &[Vec<f64>]) -> Vec<f64> {
    let n = objectives.len();
    if n == 0 {
        return Vec::new();
    }
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }
    let objective_count = objectives[0].len();
    let mut distance = vec![0.0; n];
    for objective in 0..objective_count {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            objectives[a][objective]
                .partial_cmp(&objectives[b][objective])
                .unwrap_or(Ordering::Equal)
        });
        distance[order[0]] = f64::INFINITY;
        distance[order[n - 1]] = f64::INFINITY;
        let span = objectives[order[n - 1]][objective] - objectives[order[0]][objective];
        if span <= f64::EPSILON {
            continue;
        }
        for w in 1..n - 1 {
            let below = objectives[order[w - 1]][objective];
            let above = objectives[order[w + 1]][objective];
            distance[order[w]] += (above - below) / span;
        }
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominance_basics() {
        assert_eq!(dominance_cmp(&[0.1, 0.2], &[0.2, 0.3]), Dominance::Left);
        assert_eq!(dominance_cmp(&[0.2, 0.3], &[0.1, 0.2]), Dominance::Right);
        assert_eq!(dominance_cmp(&[0.1, 0.4], &[0.2, 0.3]), Dominance::Neither);
        assert_eq!(dominance_cmp(&[0.1, 0.2], &[0.1, 0.2]), Dominance::Neither);
    }

    #[test]
    fn non_dominated_filters_the_interior() {
        let objectives = vec![
            vec![0.1, 0.9],
            vec![0.9, 0.1],
            vec![0.5, 0.5],
            vec![0.6, 0.6],
        ];
        assert_eq!(non_dominated_indices(&objectives), vec![0, 1, 2]);
    }

    #[test]
    fn non_dominated_keeps_duplicates() {
        let objectives = vec![vec![0.1, 0.9], vec![0.1, 0.9]];
        assert_eq!(non_dominated_indices(&objectives), vec![0, 1]);
    }

    #[test]
    fn crowding_boundaries_are_infinite() {
        let objectives = vec![
            vec![0.1, 0.9],
            vec![0.5, 0.5],
            vec![0.9, 0.1],
        ];
        let distance = crowding_distance(&objectives);
        assert_eq!(distance[0], f64::INFINITY);
        assert_eq!(distance[2], f64::INFINITY);
        assert!(distance[1].is_finite());
    }

    #[test]
    fn crowding_prefers_spread_out_points() {
        let objectives = vec![
            vec![0.0, 1.0],
            vec![0.1, 0.9],
            vec![0.5, 0.5],
            vec![1.0, 0.0],
        ];
        let distance = crowding_distance(&objectives);
        // the point at 0.5 sits in a wider gap than the point at 0.1
        assert!(distance[2] > distance[1]);
    }

    #[test]
    fn tiny_fronts_are_all_infinite() {
        assert!(crowding_distance(&[vec![0.3, 0.7]]).iter().all(|d| d.is_infinite()));
        assert!(crowding_distance(&[vec![0.3, 0.7], vec![0.7, 0.3]])
            .iter()
            .all(|d| d.is_infinite()));
        assert!(crowding_distance(&[]).is_empty());
    }
}
