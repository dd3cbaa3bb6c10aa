use chrono::{Duration, NaiveDate};

/// Separator placed between the first and last day of a merged run.
pub const RANGE_SEPARATOR: &str = " - ";

/// Inclusive number of days covered by `start..=end`.
///
/// Callers reject `end < start` before getting here; a single-day leave is 1.
pub fn day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Every day from `start` to `end`, both ends included. Empty when `start > end`.
pub fn expand_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        current += Duration::days(1);
    }
    dates
}

#[inline]
fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// true when `current` is the calendar day right after `previous`.
/// Strings that don't parse as dates are never consecutive with anything.
fn is_next_day(previous: &str, current: &str) -> bool {
    match (parse_day(previous), parse_day(current)) {
        (Some(prev), Some(cur)) => prev.succ_opt() == Some(cur),
        _ => false,
    }
}

fn render(start: &str, end: &str) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{start}{RANGE_SEPARATOR}{end}")
    }
}

/// Collapse an ordered list of leave dates into display ranges.
///
/// Runs of consecutive days become `"first - last"`, isolated days are
/// emitted alone. Input order is kept as is.
pub fn format_leave_ranges<S: AsRef<str>>(leave_dates: &[S]) -> Vec<String> {
    let mut ranges = Vec::new();
    let Some(first) = leave_dates.first() else {
        return ranges;
    };

    let mut range_start = first.as_ref();
    let mut range_end = first.as_ref();

    for pair in leave_dates.windows(2) {
        let (previous, current) = (pair[0].as_ref(), pair[1].as_ref());
        if is_next_day(previous, current) {
            range_end = current;
        } else {
            ranges.push(render(range_start, range_end));
            range_start = current;
            range_end = current;
        }
    }
    ranges.push(render(range_start, range_end));

    ranges
}
