//! Anchor-weekday calendar grouping.
//!
//! Each bar in a date-sorted series is assigned a monotonic group id.
//! A new group starts on every anchor bar: a bar whose weekday equals the
//! configured anchor weekday (weekly), or additionally falls in the first
//! seven days of its month (monthly, at most one anchor per calendar month).
//! Bars before the first anchor land in group 0, which never spans a full
//! period and is therefore tagged incomplete.

use crate::domain::bar::DailyBar;
use chrono::{Datelike, NaiveDate, Weekday};

/// Period length rule for the anchor predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorRule {
    Weekly,
    Monthly,
}

/// Grouping configuration, passed by value into each call.
#[derive(Debug, Clone, Copy)]
pub struct GroupConfig {
    pub anchor_weekday: Weekday,
    pub rule: AnchorRule,
}

impl GroupConfig {
    /// True when `date` starts a new period group.
    pub fn is_anchor(&self, date: NaiveDate) -> bool {
        let on_weekday = date.weekday() == self.anchor_weekday;
        match self.rule {
            AnchorRule::Weekly => on_weekday,
            AnchorRule::Monthly => on_weekday && date.day() <= 7,
        }
    }
}

/// One maximal run of bars sharing a group id. `complete` is false only for
/// the leading group 0.
#[derive(Debug, Clone, Copy)]
pub struct PeriodGroup<'a> {
    pub id: u32,
    pub bars: &'a [DailyBar],
    pub complete: bool,
}

/// Assign a group id to every bar via a running scan of the anchor
/// indicator. The counter is incremented before assignment, so an anchor
/// bar opens the group that contains it.
///
/// The output has the same length as the input and is non-decreasing.
pub fn assign_group_ids(bars: &[DailyBar], config: &GroupConfig) -> Vec<u32> {
    let mut counter: u32 = 0;
    bars.iter()
        .map(|bar| {
            if config.is_anchor(bar.date) {
                counter += 1;
            }
            counter
        })
        .collect()
}

/// Split a date-sorted series into its period groups, preserving bar order
/// within each group.
pub fn period_groups<'a>(bars: &'a [DailyBar], config: &GroupConfig) -> Vec<PeriodGroup<'a>> {
    let ids = assign_group_ids(bars, config);
    let mut groups = Vec::new();
    let mut start = 0;

    for i in 1..=bars.len() {
        if i == bars.len() || ids[i] != ids[start] {
            groups.push(PeriodGroup {
                id: ids[start],
                bars: &bars[start..i],
                complete: ids[start] > 0,
            });
            start = i;
        }
    }

    groups
}
