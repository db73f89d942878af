use indexmap::IndexMap;
use serde::Serialize;

use super::{
    categorize::{Category, Priority},
    diff::{ClassificationResult, Status},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub category: Category,
    pub priority: Priority,
    pub total: usize,
    pub complete: usize,
    pub completion_rate: f64,
}

/// Aggregate view over one locale's classification results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletenessReport {
    pub total: usize,
    /// Every status, in declaration order, including zero counts.
    pub status_counts: IndexMap<Status, usize>,
    /// Categories with at least one key, in table order.
    pub categories: Vec<CategoryStats>,
    /// `complete / total`, `0.0` when there are no keys.
    pub completion_rate: f64,
    pub results: Vec<ClassificationResult>,
}

impl CompletenessReport {
    pub fn count(&self, status: Status) -> usize {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }

    pub fn complete(&self) -> usize {
        self.count(Status::Complete)
    }

    pub fn incomplete(&self) -> usize {
        self.total - self.complete()
    }

    pub fn is_complete(&self) -> bool {
        self.incomplete() == 0
    }

    /// Results that still need work, most urgent priority first. Ties keep
    /// key order.
    pub fn pending(&self) -> Vec<&ClassificationResult> {
        let mut pending: Vec<_> = self
            .results
            .iter()
            .filter(|r| !r.status.is_complete())
            .collect();
        pending.sort_by_key(|r| r.priority);
        pending
    }
}

fn rate(complete: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        complete as f64 / total as f64
    }
}

pub fn report(results: Vec<ClassificationResult>) -> CompletenessReport {
    let mut status_counts: IndexMap<Status, usize> =
        Status::ALL.iter().map(|status| (*status, 0)).collect();
    let mut per_category: IndexMap<Category, (usize, usize)> = IndexMap::new();

    for result in &results {
        *status_counts.entry(result.status).or_insert(0) += 1;
        let (total, complete) = per_category.entry(result.category).or_insert((0, 0));
        *total += 1;
        if result.status.is_complete() {
            *complete += 1;
        }
    }

    let categories = Category::ALL
        .iter()
        .filter_map(|category| {
            let (total, complete) = per_category.get(category).copied()?;
            Some(CategoryStats {
                category: *category,
                priority: category.priority(),
                total,
                complete,
                completion_rate: rate(complete, total),
            })
        })
        .collect();

    let total = results.len();
    let complete = status_counts.get(&Status::Complete).copied().unwrap_or(0);

    CompletenessReport {
        total,
        status_counts,
        categories,
        completion_rate: rate(complete, total),
        results,
    }
}
