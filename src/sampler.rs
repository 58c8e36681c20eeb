//! Sampling loop that turns raw rows into per-column statistics.
//!
//! Each value is first re-tested against the column's current most
//! frequent type (fast path). Only when that validator rejects it does the
//! full classification run (slow path). A column without evidence yet always
//! takes the slow path, so the first non-empty value of every column seeds
//! the hypothesis; there is no separate seeding pass.

use itertools::Itertools;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    classifier::ValueTypeClassifier, col_type::ColType, stats::ColumnStatistics, value::RawValue,
};

/// Integer columns longer than this many characters need a 64-bit type.
pub const INTEGER_PROMOTION_LENGTH: i64 = 9;

/// Resolved type information for one column, ready for DDL rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferredColumn {
    pub name: String,
    pub col_type: ColType,
    pub size: usize,
    pub digits: u32,
    #[serde(default)]
    pub integer_digits: u32,
    pub bigint: bool,
}

impl InferredColumn {
    pub fn from_statistics(stats: &ColumnStatistics) -> Self {
        let col_type = stats.best_type();
        Self {
            name: stats.name().to_string(),
            col_type,
            size: stats.max_length().max(0) as usize,
            digits: stats.max_digits().max(0) as u32,
            integer_digits: stats.max_integer_digits().max(0) as u32,
            bigint: col_type == ColType::Integer && stats.max_length() > INTEGER_PROMOTION_LENGTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchemaSampler {
    classifier: ValueTypeClassifier,
    columns: Vec<ColumnStatistics>,
    always_varchar: bool,
    fast_path: bool,
    rows_sampled: usize,
    fast_path_hits: usize,
    slow_path_runs: usize,
}

impl SchemaSampler {
    pub fn new<S: AsRef<str>>(names: &[S], classifier: ValueTypeClassifier) -> Self {
        Self {
            classifier,
            columns: names
                .iter()
                .map(|name| ColumnStatistics::new(name.as_ref()))
                .collect(),
            always_varchar: false,
            fast_path: true,
            rows_sampled: 0,
            fast_path_hits: 0,
            slow_path_runs: 0,
        }
    }

    /// Records every value as `String` without classifying it.
    pub fn always_varchar(mut self, enabled: bool) -> Self {
        self.always_varchar = enabled;
        self
    }

    /// Disables the single-validator shortcut; every value runs the full
    /// classification.
    pub fn without_fast_path(mut self) -> Self {
        self.fast_path = false;
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn rows_sampled(&self) -> usize {
        self.rows_sampled
    }

    pub fn fast_path_hits(&self) -> usize {
        self.fast_path_hits
    }

    pub fn slow_path_runs(&self) -> usize {
        self.slow_path_runs
    }

    pub fn statistics(&self) -> &[ColumnStatistics] {
        &self.columns
    }

    /// Missing trailing values count as null; extra values are ignored.
    pub fn add_row(&mut self, row: &[RawValue]) {
        for (idx, value) in row.iter().take(self.columns.len()).enumerate() {
            self.add_value(idx, value);
        }
        self.rows_sampled += 1;
    }

    fn add_value(&mut self, idx: usize, value: &RawValue) {
        if value.is_blank() {
            return;
        }
        let length = value.rendered_len();
        if self.always_varchar {
            self.columns[idx].add_valid_type(ColType::String, length, 0);
            return;
        }

        let hypothesis = if self.fast_path {
            self.columns[idx].most_frequent()
        } else {
            None
        };
        let ty = match hypothesis {
            Some(current) if self.classifier.matches(current, value) => {
                self.fast_path_hits += 1;
                current
            }
            _ => {
                self.slow_path_runs += 1;
                self.classifier.classify(value)
            }
        };
        let digits = self.classifier.digits(ty, value);
        let integer_digits = self.classifier.integer_digits(ty, value);
        let column = &mut self.columns[idx];
        column.add_valid_type(ty, length, digits);
        column.add_integer_digits(integer_digits);
    }

    /// Informational notes about columns without evidence or with mixed
    /// evidence. Never affects the inferred types.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut notes = Vec::new();
        for stats in &self.columns {
            match stats.type_count() {
                0 => notes.push(format!(
                    "Column '{}': no data type detected, defaulting to {}",
                    stats.name(),
                    ColType::String
                )),
                1 => {}
                _ => notes.push(format!(
                    "Column '{}': multiple types detected ({}), using {}",
                    stats.name(),
                    stats.observed_types().iter().join(", "),
                    stats.best_type()
                )),
            }
        }
        notes
    }

    pub fn inferred_columns(&self) -> Vec<InferredColumn> {
        self.columns
            .iter()
            .map(InferredColumn::from_statistics)
            .collect()
    }

    pub fn finish(self) -> SampleOutcome {
        let diagnostics = self.diagnostics();
        for note in &diagnostics {
            info!("{note}");
        }
        debug!(
            "Sampled {} row(s): {} fast-path hit(s), {} full classification(s)",
            self.rows_sampled, self.fast_path_hits, self.slow_path_runs
        );
        SampleOutcome {
            columns: self.inferred_columns(),
            diagnostics,
            rows_sampled: self.rows_sampled,
            statistics: self.columns,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SampleOutcome {
    pub columns: Vec<InferredColumn>,
    pub statistics: Vec<ColumnStatistics>,
    pub diagnostics: Vec<String>,
    pub rows_sampled: usize,
}
