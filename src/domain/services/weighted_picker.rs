//! Weighted selection among sibling candidates
//!
//! Cumulative-weight walk: draw `r` in `[0, total)` and return the first
//! candidate whose running total reaches `r`. Candidates with a non-positive
//! or non-finite weight contribute nothing and are never chosen.

use crate::domain::entities::Scenario;

/// Anything that can take part in a weighted draw
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for Scenario {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl<T: Weighted + ?Sized> Weighted for &T {
    fn weight(&self) -> f64 {
        (**self).weight()
    }
}

fn effective_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Sum of the selectable weights
pub fn total_weight<T: Weighted>(items: &[T]) -> f64 {
    items.iter().map(|item| effective_weight(item.weight())).sum()
}

/// Pick one candidate with probability proportional to its weight.
///
/// `draw` yields uniform values in `[0, 1)`. Returns `None` only for an
/// empty slice, which takes no draw.
pub fn pick<'a, T: Weighted>(items: &'a [T], draw: &mut dyn FnMut() -> f64) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let total = total_weight(items);
    let r = draw() * total;
    select_at(items, r)
}

/// Deterministic half of [`pick`]: select for an already-drawn `r`.
///
/// If no cumulative total reaches `r` (only at `r == total` under float
/// drift, or when nothing is selectable) the last candidate is returned.
pub fn select_at<T: Weighted>(items: &[T], r: f64) -> Option<&T> {
    let mut acc = 0.0;
    let mut last_selectable = None;
    for item in items {
        let weight = effective_weight(item.weight());
        if weight == 0.0 {
            continue;
        }
        acc += weight;
        if r <= acc {
            return Some(item);
        }
        last_selectable = Some(item);
    }
    last_selectable.or_else(|| items.last())
}
