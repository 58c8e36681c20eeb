use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::col_type::ColType;

/// Evidence gathered for one column while sampling.
///
/// Counts live in a fixed array indexed by [`ColType::index`], so iteration
/// always follows declaration order. The most frequent type is cached and
/// updated on every insert instead of being recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStatistics {
    name: String,
    counts: [usize; ColType::COUNT],
    max_length: i64,
    max_digits: i64,
    max_integer_digits: i64,
    most_frequent: Option<ColType>,
}

impl ColumnStatistics {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counts: [0; ColType::COUNT],
            max_length: -1,
            max_digits: -1,
            max_integer_digits: -1,
            most_frequent: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records one value. The length and digit maxima are raised regardless
    /// of which type eventually wins.
    pub fn add_valid_type(&mut self, ty: ColType, length: usize, digits: u32) {
        self.counts[ty.index()] += 1;
        self.max_length = self.max_length.max(length as i64);
        self.max_digits = self.max_digits.max(i64::from(digits));

        let count = self.counts[ty.index()];
        self.most_frequent = match self.most_frequent {
            Some(current) if current == ty => Some(current),
            Some(current) => {
                let current_count = self.counts[current.index()];
                if count > current_count || (count == current_count && ty < current) {
                    Some(ty)
                } else {
                    Some(current)
                }
            }
            None => Some(ty),
        };
    }

    /// Raises the widest integer part seen for numeric values.
    pub fn add_integer_digits(&mut self, digits: u32) {
        self.max_integer_digits = self.max_integer_digits.max(i64::from(digits));
    }

    pub fn count(&self, ty: ColType) -> usize {
        self.counts[ty.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.most_frequent.is_none()
    }

    /// Observed types in declaration order.
    pub fn observed_types(&self) -> Vec<ColType> {
        ColType::ALL
            .into_iter()
            .filter(|ty| self.counts[ty.index()] > 0)
            .collect()
    }

    pub fn type_count(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    /// Highest count so far; ties go to the type declared first.
    pub fn most_frequent(&self) -> Option<ColType> {
        self.most_frequent
    }

    /// Smallest observed type in declaration order.
    pub fn first_seen(&self) -> Option<ColType> {
        ColType::ALL
            .into_iter()
            .find(|ty| self.counts[ty.index()] > 0)
    }

    /// Winning type after sampling. A column whose observed types all share
    /// the first-seen type's family resolves to the first-seen type; any
    /// other mixture is text.
    pub fn best_type(&self) -> ColType {
        let (Some(most_frequent), Some(first_seen)) = (self.most_frequent, self.first_seen())
        else {
            return ColType::String;
        };
        if self.type_count() == 1 {
            return most_frequent;
        }
        let same_family = self
            .observed_types()
            .into_iter()
            .all(|ty| ty == first_seen || ty.is_compatible_with(first_seen));
        if !same_family {
            return ColType::String;
        }
        if most_frequent == first_seen || most_frequent.is_compatible_with(first_seen) {
            return first_seen;
        }
        ColType::String
    }

    /// Longest rendered value, or -1 when nothing was recorded.
    pub fn max_length(&self) -> i64 {
        self.max_length
    }

    /// Largest decimal scale, or -1 when nothing was recorded.
    pub fn max_digits(&self) -> i64 {
        self.max_digits
    }

    /// Most digits left of the decimal point, or -1 when nothing was recorded.
    pub fn max_integer_digits(&self) -> i64 {
        self.max_integer_digits
    }
}

impl Serialize for ColumnStatistics {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let counts: BTreeMap<ColType, usize> = self
            .observed_types()
            .into_iter()
            .map(|ty| (ty, self.count(ty)))
            .collect();
        let mut state = serializer.serialize_struct("ColumnStatistics", 6)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type_counts", &counts)?;
        state.serialize_field("max_length", &self.max_length)?;
        state.serialize_field("max_digits", &self.max_digits)?;
        state.serialize_field("max_integer_digits", &self.max_integer_digits)?;
        state.serialize_field("most_frequent", &self.most_frequent)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(stats: &mut ColumnStatistics, types: &[ColType]) {
        for ty in types {
            stats.add_valid_type(*ty, 1, 0);
        }
    }

    #[test]
    fn empty_column_defaults_to_string() {
        let stats = ColumnStatistics::new("notes");
        assert!(stats.is_empty());
        assert_eq!(stats.best_type(), ColType::String);
        assert_eq!(stats.max_length(), -1);
        assert_eq!(stats.max_digits(), -1);
        assert_eq!(stats.max_integer_digits(), -1);
    }

    #[test]
    fn single_type_wins() {
        let mut stats = ColumnStatistics::new("id");
        record(&mut stats, &[ColType::Timestamp, ColType::Timestamp]);
        assert_eq!(stats.best_type(), ColType::Timestamp);
    }

    #[test]
    fn tie_goes_to_declaration_order() {
        let mut stats = ColumnStatistics::new("amount");
        record(&mut stats, &[ColType::Decimal, ColType::Integer]);
        assert_eq!(stats.most_frequent(), Some(ColType::Integer));
        assert_eq!(stats.best_type(), ColType::Integer);
    }

    #[test]
    fn compatible_pair_prefers_first_seen() {
        let mut stats = ColumnStatistics::new("amount");
        record(
            &mut stats,
            &[ColType::Integer, ColType::Decimal, ColType::Decimal],
        );
        assert_eq!(stats.most_frequent(), Some(ColType::Decimal));
        assert_eq!(stats.first_seen(), Some(ColType::Integer));
        assert_eq!(stats.best_type(), ColType::Integer);

        let mut temporal = ColumnStatistics::new("at");
        record(
            &mut temporal,
            &[ColType::Timestamp, ColType::Timestamp, ColType::Date],
        );
        assert_eq!(temporal.best_type(), ColType::Date);
    }

    #[test]
    fn incompatible_mixture_falls_back_to_string() {
        let mut stats = ColumnStatistics::new("mixed");
        record(
            &mut stats,
            &[ColType::Integer, ColType::String, ColType::Integer],
        );
        assert_eq!(stats.best_type(), ColType::String);

        let mut numeric_and_date = ColumnStatistics::new("odd");
        record(
            &mut numeric_and_date,
            &[ColType::Date, ColType::Date, ColType::Decimal],
        );
        assert_eq!(numeric_and_date.best_type(), ColType::String);
    }

    #[test]
    fn maxima_are_global_across_types() {
        let mut stats = ColumnStatistics::new("value");
        stats.add_valid_type(ColType::Decimal, 6, 3);
        stats.add_valid_type(ColType::Integer, 12, 0);
        stats.add_valid_type(ColType::Integer, 2, 0);
        stats.add_integer_digits(2);
        stats.add_integer_digits(12);
        stats.add_integer_digits(0);
        assert_eq!(stats.max_length(), 12);
        assert_eq!(stats.max_digits(), 3);
        assert_eq!(stats.max_integer_digits(), 12);
        assert_eq!(
            stats.observed_types(),
            vec![ColType::Integer, ColType::Decimal]
        );
    }

    fn col_type_strategy() -> impl Strategy<Value = ColType> {
        prop::sample::select(ColType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn cached_most_frequent_matches_full_scan(types in prop::collection::vec(col_type_strategy(), 1..64)) {
            let mut stats = ColumnStatistics::new("c");
            for ty in &types {
                stats.add_valid_type(*ty, 1, 0);
                let max = ColType::ALL.iter().map(|t| stats.count(*t)).max().unwrap();
                let expected = ColType::ALL.into_iter().find(|t| stats.count(*t) == max);
                prop_assert_eq!(stats.most_frequent(), expected);
            }
        }
    }
}
