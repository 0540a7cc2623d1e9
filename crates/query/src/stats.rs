use memvault_core::{Category, FileRecord};

/// Reference capacity used for the usage meter: 1 GiB.
const USAGE_CAPACITY_BYTES: u64 = 1024 * 1024 * 1024;

/// Count and byte totals for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotals {
    pub category: Category,
    pub count: usize,
    pub bytes: u64,
}

/// Aggregate statistics across all three catalogs.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageStats {
    /// Per-category totals, in [`Category::ALL`] order.
    pub per_category: [CategoryTotals; 3],
    pub total_count: usize,
    pub total_bytes: u64,
    /// Share of the 1 GiB reference capacity in use, capped at 100.
    pub usage_percent: f64,
}

impl StorageStats {
    /// Totals for one category.
    #[must_use]
    pub fn for_category(&self, category: Category) -> &CategoryTotals {
        self.per_category
            .iter()
            .find(|totals| totals.category == category)
            .expect("per_category covers every category")
    }
}

/// Compute aggregate statistics from per-category record listings.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate(listings: &[(Category, Vec<FileRecord>)]) -> StorageStats {
    let mut per_category = Category::ALL.map(|category| CategoryTotals {
        category,
        count: 0,
        bytes: 0,
    });

    for (category, records) in listings {
        let totals = per_category
            .iter_mut()
            .find(|totals| totals.category == *category)
            .expect("per_category covers every category");
        totals.count += records.len();
        totals.bytes += records.iter().map(|r| r.file_size).sum::<u64>();
    }

    let total_count = per_category.iter().map(|t| t.count).sum();
    let total_bytes = per_category.iter().map(|t| t.bytes).sum();
    let usage_percent =
        (total_bytes as f64 / USAGE_CAPACITY_BYTES as f64 * 100.0).min(100.0);

    StorageStats {
        per_category,
        total_count,
        total_bytes,
        usage_percent,
    }
}

#[cfg(test)]
mod tests {
    use memvault_core::CategoryDetails;

    use super::*;

    fn note(size: u64) -> FileRecord {
        FileRecord::new(
            None,
            None,
            "notes/x.txt".to_owned(),
            "memory://memory-vault/notes/x.txt".to_owned(),
            "x.txt".to_owned(),
            "text/plain".to_owned(),
            size,
            CategoryDetails::Notes { tags: vec![] },
        )
    }

    #[test]
    fn empty_set_yields_zero_everything() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.total_bytes, 0);
        assert_eq!(stats.usage_percent, 0.0);
        for totals in &stats.per_category {
            assert_eq!(totals.count, 0);
            assert_eq!(totals.bytes, 0);
        }
    }

    #[test]
    fn totals_accumulate_per_category() {
        let stats = aggregate(&[
            (Category::Notes, vec![note(100), note(200)]),
            (Category::Images, vec![]),
            (Category::Videos, vec![note(700)]),
        ]);
        assert_eq!(stats.for_category(Category::Notes).count, 2);
        assert_eq!(stats.for_category(Category::Notes).bytes, 300);
        assert_eq!(stats.for_category(Category::Images).count, 0);
        assert_eq!(stats.for_category(Category::Videos).bytes, 700);
        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.total_bytes, 1000);
    }

    #[test]
    fn usage_percent_scales_with_bytes() {
        // Half a GiB is 50%.
        let stats = aggregate(&[(Category::Notes, vec![note(512 * 1024 * 1024)])]);
        assert!((stats.usage_percent - 50.0).abs() < 1e-9);
    }

    #[test]
    fn usage_percent_caps_at_one_hundred() {
        // 2 GiB of content still reads as 100%.
        let stats = aggregate(&[(Category::Videos, vec![note(2 * 1024 * 1024 * 1024)])]);
        assert_eq!(stats.usage_percent, 100.0);
    }
}
