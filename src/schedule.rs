//! Recurrence Calendar
//!
//! Occurrences are always counted from the rule's start date, so a rule
//! starting on Jan 31 lands on Feb 28 and then Mar 31, never drifting to the 28th.

use chrono::{Days, Months, NaiveDate};

use crate::models::{Frequency, RecurringRule};
use crate::notifications::Notify;

/// Local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

impl Frequency {
    /// The `n`-th occurrence after `start` (`n = 0` is `start` itself)
    pub fn nth(&self, start: NaiveDate, n: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => start.checked_add_days(Days::new(u64::from(n))),
            Frequency::Weekly => start.checked_add_days(Days::new(7 * u64::from(n))),
            Frequency::Monthly => start.checked_add_months(Months::new(n)),
            Frequency::Yearly => start.checked_add_months(Months::new(n.checked_mul(12)?)),
        }
    }

    /// Lower bound on how many periods fit in `days`
    fn periods_in(&self, days: i64) -> u32 {
        let periods = match self {
            Frequency::Daily => days,
            Frequency::Weekly => days / 7,
            Frequency::Monthly => days / 31,
            Frequency::Yearly => days / 366,
        };
        u32::try_from(periods.max(0)).unwrap_or(u32::MAX)
    }
}

/// First occurrence on or after `from` that still falls inside the rule's range
pub fn next_occurrence(
    frequency: Frequency,
    start: NaiveDate,
    end: Option<NaiveDate>,
    from: NaiveDate,
) -> Option<NaiveDate> {
    let mut n = frequency.periods_in((from - start).num_days());
    let next = loop {
        let candidate = frequency.nth(start, n)?;
        if candidate >= from {
            break candidate;
        }
        n = n.checked_add(1)?;
    };
    match end {
        Some(end) if next > end => None,
        _ => Some(next),
    }
}

impl RecurringRule {
    /// Server's `next_date` when present, otherwise computed locally
    pub fn effective_next_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        if !self.is_active {
            return None;
        }
        self.next_date
            .or_else(|| next_occurrence(self.frequency, self.start_date, self.end_date, today))
    }

    /// True when the next occurrence is within the notify-before window
    pub fn reminder_due(&self, today: NaiveDate) -> bool {
        let (Some(days), Some(next)) = (self.notify_before, self.effective_next_date(today)) else {
            return false;
        };
        next >= today && (next - today).num_days() <= i64::from(days)
    }
}

/// Warn once about every rule inside its reminder window. Returns how many.
pub fn remind_upcoming<N: Notify>(rules: &[RecurringRule], today: NaiveDate, notify: &N) -> usize {
    let mut sent = 0;
    for rule in rules.iter().filter(|r| r.reminder_due(today)) {
        let Some(next) = rule.effective_next_date(today) else {
            continue;
        };
        let what = rule
            .description
            .clone()
            .unwrap_or_else(|| rule.kind.label().to_lowercase());
        notify.warning(format!(
            "Upcoming {} of {} on {}",
            what,
            rule.amount.normalize(),
            next.format("%Y-%m-%d")
        ));
        sent += 1;
    }
    sent
}
