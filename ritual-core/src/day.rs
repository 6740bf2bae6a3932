//! Local-day window that scopes "today's" completions.

use chrono::{DateTime, Local, NaiveTime, Utc};

/// Local midnight of `now`'s calendar day, expressed in UTC for the wire.
///
/// "Today" means the user's wall-clock day, not a UTC day: the boundary is
/// computed in local time and only then converted, so a completion at
/// 23:59:59 local time stops counting one second after local midnight.
pub fn start_of_day(now: DateTime<Local>) -> DateTime<Utc> {
    now.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        // midnight can be skipped or doubled on a DST transition
        .earliest()
        .unwrap_or(now)
        .with_timezone(&Utc)
}

/// [`start_of_day`] at the current instant.
pub fn start_of_today() -> DateTime<Utc> {
    start_of_day(Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // Mid-January avoids DST transitions in every populated timezone.
    fn local(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 1, day, hour, min, sec)
            .single()
            .unwrap()
    }

    #[test]
    fn same_day_times_share_a_window_start() {
        assert_eq!(start_of_day(local(15, 0, 0, 1)), start_of_day(local(15, 23, 59, 59)));
    }

    #[test]
    fn window_start_is_not_after_now() {
        let now = local(15, 12, 30, 0);
        assert!(start_of_day(now) <= now.with_timezone(&Utc));
    }

    #[test]
    fn last_second_of_yesterday_falls_outside_todays_window() {
        let completed_at = local(15, 23, 59, 59).with_timezone(&Utc);
        let window = start_of_day(local(16, 0, 0, 1));
        assert!(completed_at < window);
    }

    #[test]
    fn first_second_of_today_falls_inside_todays_window() {
        let completed_at = local(16, 0, 0, 1).with_timezone(&Utc);
        let window = start_of_day(local(16, 18, 0, 0));
        assert!(completed_at >= window);
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn window_start_has_zero_time_components(
                day in 1u32..=28,
                hour in 0u32..24,
                min in 0u32..60,
                sec in 0u32..60,
            ) {
                use chrono::Timelike;
                let start = start_of_day(local(day, hour, min, sec)).with_timezone(&Local);
                prop_assert_eq!(start.hour(), 0);
                prop_assert_eq!(start.minute(), 0);
                prop_assert_eq!(start.second(), 0);
            }

            #[test]
            fn window_start_is_monotone_in_now(
                day_a in 1u32..=28,
                day_b in 1u32..=28,
                hour in 0u32..24,
            ) {
                let (early, late) = if day_a <= day_b { (day_a, day_b) } else { (day_b, day_a) };
                prop_assert!(
                    start_of_day(local(early, hour, 0, 0)) <= start_of_day(local(late, hour, 0, 0))
                );
            }
        }
    }
}
