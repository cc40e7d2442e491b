//! Dataset statistics

use crate::record::{Color, Record};
use std::collections::HashSet;

/// Summary of a loaded record set
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    pub total: usize,
    /// Distinct color identities, compared in WUBRG order
    pub unique_color_identities: usize,
    pub average_mana_value: f64,
    pub colorless: usize,
    pub multicolor: usize,
    pub partner_capable: usize,
    /// Records whose identity includes each color, in WUBRG order
    pub per_color: [(Color, usize); 5],
}

impl StoreStats {
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let identities: HashSet<String> = records
            .iter()
            .map(|r| r.colors().canonical().symbols())
            .collect();
        let mana_total: u64 = records.iter().map(|r| u64::from(r.mana_value())).sum();

        #[allow(clippy::cast_precision_loss)]
        let average_mana_value = mana_total as f64 / records.len().max(1) as f64;

        Self {
            total: records.len(),
            unique_color_identities: identities.len(),
            average_mana_value,
            colorless: records.iter().filter(|r| r.colors().is_empty()).count(),
            multicolor: records.iter().filter(|r| r.colors().len() > 1).count(),
            partner_capable: records.iter().filter(|r| r.partner().is_eligible()).count(),
            per_color: Color::ALL.map(|color| {
                let count = records.iter().filter(|r| r.colors().colors().contains(&color)).count();
                (color, count)
            }),
        }
    }

    /// Average mana value with one decimal place
    #[must_use]
    pub fn formatted_average(&self) -> String {
        format!("{:.1}", self.average_mana_value)
    }

    /// Share of multicolor records, 0 for an empty set
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn multicolor_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.multicolor as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    #[test]
    fn test_stats() {
        let records = vec![
            record("Edgar Markov", "WBR", 6),
            record("Karn, Silver Golem", "", 4),
            record("Isshin, Two Heavens as One", "RWB", 3),
            record("Azusa, Lost but Seeking", "G", 3),
        ];
        let stats = StoreStats::from_records(&records);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.unique_color_identities, 3);
        assert_eq!(stats.colorless, 1);
        assert_eq!(stats.multicolor, 2);
        assert_eq!(stats.partner_capable, 0);
        assert_eq!(
            stats.per_color,
            [
                (Color::White, 2),
                (Color::Blue, 0),
                (Color::Black, 2),
                (Color::Red, 2),
                (Color::Green, 1)
            ]
        );
        assert_eq!(stats.formatted_average(), "4.0");
        assert!((stats.multicolor_percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_stats() {
        let stats = StoreStats::from_records(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.average_mana_value.abs() < f64::EPSILON);
        assert!(stats.multicolor_percentage().abs() < f64::EPSILON);
    }
}
