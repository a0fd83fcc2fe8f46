//! Schedule resolution: end dates and the step in effect on a given day.
//!
//! All functions here are pure and total over in-memory schedules. A step
//! with cumulative week span `[start, end)` covers the days
//! `(7 * start, 7 * end]` after the schedule's start date, so the day a step
//! ends on still belongs to it; the start day itself belongs to the first
//! step. Steps are walked by ascending `order`, falling back to ascending
//! `id` for equal orders. Zero-duration steps own an empty span and are
//! never returned.
//!
//! The extra start day makes step lengths uneven. The first step resolves
//! on one day more than its weeks. In a finite schedule every later step
//! gets exactly its weeks and the last one ends on the end date. A loop
//! wraps day `7 * total` back to position 0, so the first step's extra day
//! is taken from the last step, which resolves on one day less per cycle.

use jiff::{Span, civil::Date};

use crate::models::{Schedule, ScheduleStep};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

const DAYS_PER_WEEK: u64 = 7;

/// Largest week count a `Span` accepts.
const MAX_SPAN_WEEKS: u64 = 1_043_497;

/// Whole days from `start` to `as_of`, negative when `as_of` lies before
/// `start`.
///
/// ```rust
/// use jiff::civil::date;
/// use regimen_core::resolver::elapsed_days;
///
/// assert_eq!(elapsed_days(date(2024, 1, 1), date(2024, 1, 15)), 14);
/// assert_eq!(elapsed_days(date(2024, 2, 28), date(2024, 3, 1)), 2);
/// assert_eq!(elapsed_days(date(2024, 1, 8), date(2024, 1, 7)), -1);
/// ```
pub fn elapsed_days(start: Date, as_of: Date) -> i64 {
    start
        .duration_until(as_of)
        .as_secs()
        .div_euclid(SECONDS_PER_DAY)
}

/// Sum of step durations in weeks.
pub fn total_weeks(steps: &[ScheduleStep]) -> u64 {
    steps.iter().map(|step| u64::from(step.duration)).sum()
}

/// Date the schedule ends, or `None` for loop schedules.
///
/// An empty schedule ends on its start date.
pub fn end_date(schedule: &Schedule) -> Option<Date> {
    if schedule.is_loop {
        return None;
    }

    Some(weeks_after(schedule.start_date, total_weeks(&schedule.steps)))
}

/// `start` moved forward by `weeks`, saturating at the largest date.
pub fn weeks_after(start: Date, weeks: u64) -> Date {
    let weeks = weeks.min(MAX_SPAN_WEEKS) as i64;
    start.saturating_add(Span::new().weeks(weeks))
}

/// The step in effect on `as_of`, if any.
///
/// Loop schedules wrap the elapsed days around their total length, which
/// makes them periodic and never exhausted. Finite schedules resolve to
/// nothing before their start and after their end date.
pub fn current_step(schedule: &Schedule, as_of: Date) -> Option<&ScheduleStep> {
    if schedule.steps.is_empty() {
        return None;
    }

    let days = elapsed_days(schedule.start_date, as_of);
    let total_days = total_weeks(&schedule.steps) * DAYS_PER_WEEK;

    let position = if schedule.is_loop {
        if total_days == 0 {
            return None;
        }
        // rem_euclid keeps the position non-negative for future start dates
        days.rem_euclid(i64::try_from(total_days).ok()?) as u64
    } else {
        if days < 0 || days as u64 > total_days {
            return None;
        }
        days as u64
    };

    step_at(&ordered_steps(&schedule.steps), position)
}

/// Steps sorted by `(order, id)`.
fn ordered_steps(steps: &[ScheduleStep]) -> Vec<&ScheduleStep> {
    let mut ordered: Vec<&ScheduleStep> = steps.iter().collect();
    ordered.sort_by_key(|step| (step.order, step.id));
    ordered
}

/// Walks the cumulative spans and returns the first non-empty step whose
/// last day is not before `position`.
fn step_at<'a>(steps: &[&'a ScheduleStep], position: u64) -> Option<&'a ScheduleStep> {
    let mut span_end = 0u64;
    for step in steps.iter().filter(|step| step.duration > 0) {
        span_end += u64::from(step.duration) * DAYS_PER_WEEK;
        if position <= span_end {
            return Some(*step);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan, civil::date};

    use super::*;

    fn step(id: u64, duration: u32, order: u32) -> ScheduleStep {
        ScheduleStep {
            id,
            schedule_id: 1,
            workout_id: id * 10,
            workout_name: format!("Workout {id}"),
            duration,
            order,
        }
    }

    fn schedule(start_date: Date, is_loop: bool, steps: Vec<ScheduleStep>) -> Schedule {
        Schedule {
            id: 1,
            user_id: 1,
            name: "Test schedule".to_string(),
            start_date,
            is_active: true,
            is_loop,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            steps,
        }
    }

    fn three_one_two() -> Vec<ScheduleStep> {
        vec![step(1, 3, 1), step(2, 1, 2), step(3, 2, 3)]
    }

    fn weeks_before(today: Date, weeks: i64) -> Date {
        today.checked_sub(weeks.weeks()).unwrap()
    }

    #[test]
    fn test_end_date_of_loop_is_none() {
        let s = schedule(date(2013, 4, 21), true, vec![step(1, 3, 0)]);
        assert_eq!(end_date(&s), None);

        let empty = schedule(date(2013, 4, 21), true, vec![]);
        assert_eq!(end_date(&empty), None);
    }

    #[test]
    fn test_end_date_sums_durations() {
        let s = schedule(
            date(2013, 4, 21),
            false,
            vec![step(1, 3, 0), step(2, 5, 1), step(3, 2, 2)],
        );
        assert_eq!(end_date(&s), Some(date(2013, 6, 30)));
    }

    #[test]
    fn test_end_date_of_empty_schedule_is_start() {
        let s = schedule(date(2013, 4, 21), false, vec![]);
        assert_eq!(end_date(&s), Some(date(2013, 4, 21)));
    }

    #[test]
    fn test_no_steps_resolves_to_none() {
        let s = schedule(date(2024, 1, 1), false, vec![]);
        assert_eq!(current_step(&s, date(2024, 1, 1)), None);

        let looped = schedule(date(2024, 1, 1), true, vec![]);
        assert_eq!(current_step(&looped, date(2024, 1, 1)), None);
    }

    #[test]
    fn test_single_step_on_start_day() {
        let today = date(2024, 5, 6);
        let s = schedule(today, false, vec![step(1, 3, 0)]);
        assert_eq!(current_step(&s, today).map(|st| st.id), Some(1));
    }

    #[test]
    fn test_started_four_weeks_ago_returns_second_step() {
        let today = date(2024, 5, 6);
        let s = schedule(weeks_before(today, 4), false, three_one_two());
        let current = current_step(&s, today).expect("a step should be active");
        assert_eq!(current.id, 2);
        assert_eq!(current.duration, 1);
    }

    #[test]
    fn test_finite_schedule_past_its_end_returns_none() {
        let today = date(2024, 5, 6);
        let s = schedule(weeks_before(today, 7), false, three_one_two());
        assert_eq!(current_step(&s, today), None);

        // The end date is still the last day of the final step
        let s = schedule(weeks_before(today, 6), false, three_one_two());
        assert_eq!(current_step(&s, today).map(|st| st.id), Some(3));

        let s = schedule(weeks_before(today, 6).yesterday().unwrap(), false, three_one_two());
        assert_eq!(current_step(&s, today), None);
    }

    #[test]
    fn test_loop_wraps_around() {
        let today = date(2024, 5, 6);
        let s = schedule(weeks_before(today, 7), true, three_one_two());
        assert_eq!(current_step(&s, today).map(|st| st.id), Some(1));
    }

    #[test]
    fn test_future_start() {
        let today = date(2024, 5, 6);
        let start = date(2024, 5, 13);

        let finite = schedule(start, false, three_one_two());
        assert_eq!(current_step(&finite, today), None);

        // days = -7, position = -7 mod 42 = 35, inside step 3
        let looped = schedule(start, true, three_one_two());
        assert_eq!(current_step(&looped, today).map(|st| st.id), Some(3));
    }

    #[test]
    fn test_boundary_day_belongs_to_ending_step() {
        let start = date(2024, 1, 1);
        let s = schedule(start, false, three_one_two());

        assert_eq!(current_step(&s, date(2024, 1, 22)).map(|st| st.id), Some(1));
        assert_eq!(current_step(&s, date(2024, 1, 23)).map(|st| st.id), Some(2));
        assert_eq!(current_step(&s, date(2024, 1, 29)).map(|st| st.id), Some(2));
        assert_eq!(current_step(&s, date(2024, 1, 30)).map(|st| st.id), Some(3));
    }

    #[test]
    fn test_next_step_starts_the_day_after_a_full_week() {
        let start = date(2024, 1, 1);
        let s = schedule(start, false, vec![step(1, 1, 0), step(2, 1, 1)]);
        assert_eq!(current_step(&s, date(2024, 1, 8)).map(|st| st.id), Some(1));
        assert_eq!(current_step(&s, date(2024, 1, 9)).map(|st| st.id), Some(2));
    }

    fn days_per_step(s: &Schedule, days: i64) -> Vec<(u64, usize)> {
        let mut counts: Vec<(u64, usize)> = Vec::new();
        for offset in 0..days {
            let day = s.start_date.checked_add(offset.days()).unwrap();
            if let Some(step) = current_step(s, day) {
                match counts.iter_mut().find(|(id, _)| *id == step.id) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((step.id, 1)),
                }
            }
        }
        counts
    }

    #[test]
    fn test_step_lengths_in_days() {
        let start = date(2024, 1, 1);

        // Start day through end date: 43 days
        let finite = schedule(start, false, three_one_two());
        assert_eq!(days_per_step(&finite, 50), vec![(1, 22), (2, 7), (3, 14)]);

        // One 42-day cycle: the last step gives its final day to the first
        let looped = schedule(start, true, three_one_two());
        assert_eq!(days_per_step(&looped, 42), vec![(1, 22), (2, 7), (3, 13)]);
    }

    #[test]
    fn test_loop_is_periodic() {
        let start = date(2023, 9, 4);
        let s = schedule(start, true, three_one_two());
        let period = i64::try_from(s.total_weeks()).unwrap();

        for offset in 0..40 {
            let day = start.checked_add((offset * 3).days()).unwrap();
            let later = day.checked_add(period.weeks()).unwrap();
            assert_eq!(
                current_step(&s, day).map(|st| st.id),
                current_step(&s, later).map(|st| st.id),
                "loop should repeat every {period} weeks (offset {offset})"
            );
        }
    }

    #[test]
    fn test_zero_duration_steps() {
        let start = date(2024, 1, 1);

        let all_zero = schedule(start, true, vec![step(1, 0, 0), step(2, 0, 1)]);
        assert_eq!(current_step(&all_zero, start), None);

        let mixed = schedule(start, false, vec![step(1, 0, 0), step(2, 2, 1)]);
        assert_eq!(current_step(&mixed, start).map(|st| st.id), Some(2));
    }

    #[test]
    fn test_steps_walk_by_order_not_storage_position() {
        let start = date(2024, 1, 1);
        let s = schedule(start, false, vec![step(1, 3, 2), step(2, 1, 0)]);
        assert_eq!(current_step(&s, start).map(|st| st.id), Some(2));
        assert_eq!(current_step(&s, date(2024, 1, 9)).map(|st| st.id), Some(1));
    }

    #[test]
    fn test_equal_orders_fall_back_to_id() {
        let start = date(2024, 1, 1);
        let s = schedule(start, false, vec![step(9, 1, 0), step(4, 1, 0)]);
        assert_eq!(current_step(&s, start).map(|st| st.id), Some(4));
    }
}
