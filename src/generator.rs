//! Training Plan Generator
//!
//! Deterministic transformation from runner input to a dated weekly plan:
//! - week count from the race date, clamped to 8..=24
//! - weekly volume curve (fixed, or linear ramp from a baseline)
//! - long-run share rising from a race-specific base to peak by mid-plan
//! - session archetypes from a fixed canonical order
//! - per-session distances, paces and dates
//!
//! No I/O and no shared state. The only clock read is in
//! `generate_training_plan`; everything else takes `today` explicitly.

use chrono::{Duration, Local, NaiveDate};

use crate::error::PlanResult;
use crate::models::{
    DistanceGrowthMode, RaceType, RunnerInput, SessionType, TrainingPlan, TrainingSession,
    TrainingWeek,
};
use crate::pace::{duration_to_seconds, seconds_to_pace};
use crate::validation::validate_input;

pub const MIN_PLAN_WEEKS: u32 = 8;
pub const MAX_PLAN_WEEKS: u32 = 24;

/// Canonical week layout, truncated to the weekly frequency.
/// The long run only appears at 7 sessions per week.
const SESSION_ORDER: [SessionType; 7] = [
    SessionType::Easy,
    SessionType::Easy,
    SessionType::Tempo,
    SessionType::Interval,
    SessionType::Recovery,
    SessionType::Easy,
    SessionType::Long,
];

/// Distance factors for the first two slots; later slots take the even share
const FIRST_SLOT_FACTOR: f64 = 0.9;
const SECOND_SLOT_FACTOR: f64 = 1.1;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

/// Plans start the day after generation
pub fn plan_start_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(1)
}

/// Whole weeks between plan start and race day, before clamping (may be negative)
pub fn raw_weeks_until_race(today: NaiveDate, race_date: NaiveDate) -> i64 {
    (race_date - plan_start_date(today)).num_days().div_euclid(7)
}

pub fn weeks_until_race(today: NaiveDate, race_date: NaiveDate) -> u32 {
    raw_weeks_until_race(today, race_date).clamp(MIN_PLAN_WEEKS as i64, MAX_PLAN_WEEKS as i64)
        as u32
}

/// First day of a 1-based week
pub fn week_start_date(plan_start: NaiveDate, week_number: u32) -> NaiveDate {
    plan_start + Duration::days((week_number as i64 - 1) * 7)
}

// ---------------------------------------------------------------------------
// Volume Curves
// ---------------------------------------------------------------------------

/// Target volume (km) for a week before it is split into sessions
pub fn week_distance(input: &RunnerInput, week_number: u32, total_weeks: u32) -> f64 {
    match (input.distance_growth_mode, input.current_weekly_mileage) {
        // A zero baseline counts as no baseline
        (DistanceGrowthMode::Progressive, Some(current)) if current > 0.0 => {
            let growth_rate = (input.weekly_mileage - current) / total_weeks as f64;
            let distance = (current + growth_rate * week_number as f64).round();
            distance.min(input.weekly_mileage)
        }
        _ => input.weekly_mileage,
    }
}

/// Long-run share of the week, reaching peak at the plan midpoint
pub fn long_run_percentage(race_type: RaceType, week_number: u32, total_weeks: u32) -> f64 {
    let base = race_type.long_run_base_pct();
    let peak = race_type.long_run_peak_pct();
    let progress = (2.0 * week_number as f64 / total_weeks as f64).min(1.0);
    base + (peak - base) * progress
}

pub fn long_run_distance(
    week_distance: f64,
    race_type: RaceType,
    week_number: u32,
    total_weeks: u32,
) -> f64 {
    round1(week_distance * long_run_percentage(race_type, week_number, total_weeks))
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

pub fn session_types(weekly_frequency: u8) -> Vec<SessionType> {
    SESSION_ORDER
        .iter()
        .take(weekly_frequency as usize)
        .copied()
        .collect()
}

/// Target race pace in seconds per km
pub fn target_pace_seconds(input: &RunnerInput) -> PlanResult<f64> {
    let target = duration_to_seconds(&input.target_pb)?;
    Ok(target as f64 / input.race_type.distance_km())
}

pub fn session_pace(session_type: SessionType, target_pace_seconds: f64) -> PlanResult<String> {
    seconds_to_pace(target_pace_seconds * session_type.pace_multiplier())
}

/// Split a week's volume across its sessions.
///
/// A long-run slot is pinned to `long_run`; the rest of the volume is shared
/// evenly by the other slots, shaped 0.9 / 1.1 / 1.0 by position. Whatever
/// rounding leaves over goes onto the last session.
pub fn allocate_distances(week_distance: f64, types: &[SessionType], long_run: f64) -> Vec<f64> {
    let has_long = types.contains(&SessionType::Long);
    let other_slots = types.len() - usize::from(has_long);
    let remaining = if has_long {
        week_distance - long_run
    } else {
        week_distance
    };
    let base = if other_slots > 0 {
        remaining / other_slots as f64
    } else {
        0.0
    };

    let mut distances: Vec<f64> = types
        .iter()
        .enumerate()
        .map(|(index, session_type)| match (session_type, index) {
            (SessionType::Long, _) => long_run,
            (_, 0) => round1(base * FIRST_SLOT_FACTOR),
            (_, 1) => round1(base * SECOND_SLOT_FACTOR),
            _ => round1(base),
        })
        .collect();

    let assigned: f64 = distances.iter().sum();
    let difference = week_distance - assigned;
    if difference != 0.0 {
        if let Some(last) = distances.last_mut() {
            *last = round1(*last + difference);
        }
    }

    distances
}

fn generate_week(
    input: &RunnerInput,
    week_number: u32,
    total_weeks: u32,
    start_date: NaiveDate,
    target_pace: f64,
) -> PlanResult<TrainingWeek> {
    let distance = week_distance(input, week_number, total_weeks);
    let long_run = long_run_distance(distance, input.race_type, week_number, total_weeks);
    let types = session_types(input.weekly_frequency);
    let distances = allocate_distances(distance, &types, long_run);

    let sessions = types
        .iter()
        .zip(distances)
        .enumerate()
        .map(|(day, (session_type, distance))| {
            Ok(TrainingSession {
                date: start_date + Duration::days(day as i64),
                session_type: *session_type,
                distance,
                pace: session_pace(*session_type, target_pace)?,
                notes: None,
            })
        })
        .collect::<PlanResult<Vec<_>>>()?;

    let total: f64 = sessions.iter().map(|s| s.distance).sum();

    Ok(TrainingWeek {
        number: week_number,
        total_distance: total.round().max(0.0) as u32,
        sessions,
    })
}

// ---------------------------------------------------------------------------
// Plan Assembly
// ---------------------------------------------------------------------------

/// Generate a plan as if today were `today`
pub fn generate_training_plan_on(
    input: &RunnerInput,
    today: NaiveDate,
) -> PlanResult<TrainingPlan> {
    validate_input(input, today)?;

    let raw_weeks = raw_weeks_until_race(today, input.race_date);
    let total_weeks = weeks_until_race(today, input.race_date);
    if raw_weeks < MIN_PLAN_WEEKS as i64 {
        tracing::warn!(
            race_date = %input.race_date,
            weeks_available = raw_weeks,
            "Race is closer than {} weeks; plan runs past race day",
            MIN_PLAN_WEEKS
        );
    }

    let plan_start = plan_start_date(today);
    let target_pace = target_pace_seconds(input)?;

    let weeks = (1..=total_weeks)
        .map(|week_number| {
            generate_week(
                input,
                week_number,
                total_weeks,
                week_start_date(plan_start, week_number),
                target_pace,
            )
        })
        .collect::<PlanResult<Vec<_>>>()?;

    tracing::info!(
        race_type = %input.race_type,
        weeks = total_weeks,
        sessions_per_week = input.weekly_frequency,
        "Generated training plan"
    );

    Ok(TrainingPlan {
        input: input.clone(),
        weeks,
    })
}

/// Generate a plan starting tomorrow in local time
pub fn generate_training_plan(input: &RunnerInput) -> PlanResult<TrainingPlan> {
    generate_training_plan_on(input, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::test_utils::{make_runner_input, today};

    fn race_in_weeks(weeks: i64) -> NaiveDate {
        plan_start_date(today()) + Duration::weeks(weeks)
    }

    // ---------------------------------------------------------------------------
    // Week count
    // ---------------------------------------------------------------------------

    #[test]
    fn test_week_count_follows_race_date() {
        assert_eq!(weeks_until_race(today(), race_in_weeks(16)), 16);
        assert_eq!(
            weeks_until_race(today(), race_in_weeks(16) - Duration::days(1)),
            15
        );
    }

    #[test]
    fn test_week_count_clamped() {
        assert_eq!(weeks_until_race(today(), race_in_weeks(2)), MIN_PLAN_WEEKS);
        assert_eq!(weeks_until_race(today(), today() + Duration::days(1)), MIN_PLAN_WEEKS);
        assert_eq!(weeks_until_race(today(), race_in_weeks(104)), MAX_PLAN_WEEKS);
        assert_eq!(raw_weeks_until_race(today(), today() + Duration::days(1)), 0);
    }

    // ---------------------------------------------------------------------------
    // Curves
    // ---------------------------------------------------------------------------

    #[test]
    fn test_fixed_mode_constant_distance() {
        let mut input = make_runner_input(race_in_weeks(16));
        input.distance_growth_mode = DistanceGrowthMode::Fixed;
        for week in 1..=16 {
            assert_eq!(week_distance(&input, week, 16), 40.0);
        }
    }

    #[test]
    fn test_progressive_without_baseline_is_fixed() {
        let mut input = make_runner_input(race_in_weeks(16));
        input.current_weekly_mileage = None;
        assert_eq!(week_distance(&input, 1, 16), 40.0);
        input.current_weekly_mileage = Some(0.0);
        assert_eq!(week_distance(&input, 1, 16), 40.0);
    }

    #[test]
    fn test_progressive_ramp() {
        let input = make_runner_input(race_in_weeks(16));
        // 30 + 10/16 = 30.6 -> 31
        assert_eq!(week_distance(&input, 1, 16), 31.0);
        assert_eq!(week_distance(&input, 8, 16), 35.0);
        assert_eq!(week_distance(&input, 16, 16), 40.0);

        let mut previous = 0.0;
        for week in 1..=16 {
            let d = week_distance(&input, week, 16);
            assert!(d >= previous);
            assert!(d <= input.weekly_mileage);
            previous = d;
        }
    }

    #[test]
    fn test_progressive_capped_at_target() {
        let mut input = make_runner_input(race_in_weeks(10));
        input.weekly_mileage = 40.4;
        input.current_weekly_mileage = Some(30.0);
        // 40.4 rounds to 40
        assert!(week_distance(&input, 10, 10) <= 40.4);
    }

    #[test]
    fn test_long_run_percentage_curve() {
        for race_type in RaceType::ALL {
            let mut previous = 0.0;
            for week in 1..=16 {
                let pct = long_run_percentage(race_type, week, 16);
                assert!(pct >= previous);
                previous = pct;
            }
            let peak = race_type.long_run_peak_pct();
            assert!((long_run_percentage(race_type, 8, 16) - peak).abs() < 1e-9);
            assert!((long_run_percentage(race_type, 16, 16) - peak).abs() < 1e-9);
        }
        // week 1 of 16: 0.30 + 0.10 * 0.125
        assert!((long_run_percentage(RaceType::Full, 1, 16) - 0.3125).abs() < 1e-9);
    }

    #[test]
    fn test_long_run_distance_rounded() {
        assert_eq!(long_run_distance(50.0, RaceType::Full, 1, 16), 15.6);
        assert_eq!(long_run_distance(50.0, RaceType::TenK, 16, 16), 30.0);
    }

    // ---------------------------------------------------------------------------
    // Sessions
    // ---------------------------------------------------------------------------

    #[test]
    fn test_session_type_truncation() {
        assert_eq!(
            session_types(3),
            vec![SessionType::Easy, SessionType::Easy, SessionType::Tempo]
        );
        assert_eq!(
            session_types(5),
            vec![
                SessionType::Easy,
                SessionType::Easy,
                SessionType::Tempo,
                SessionType::Interval,
                SessionType::Recovery
            ]
        );
        assert!(!session_types(6).contains(&SessionType::Long));
        assert_eq!(session_types(7).last(), Some(&SessionType::Long));
    }

    #[test]
    fn test_allocation_without_long_run() {
        let types = session_types(5);
        let distances = allocate_distances(31.0, &types, 9.3);
        // base 6.2 -> 5.58, 6.82, 6.2, 6.2, 6.2
        assert_eq!(distances, vec![5.6, 6.8, 6.2, 6.2, 6.2]);
    }

    #[test]
    fn test_allocation_remainder_lands_on_last_session() {
        let types = session_types(3);
        // base 10/3: 3.0, 3.7, 3.3 -> sum 10.0
        let distances = allocate_distances(10.0, &types, 0.0);
        assert_eq!(distances, vec![3.0, 3.7, 3.3]);

        // base 11/3 = 3.667: 3.3, 4.0, 3.7 sum 11.0
        let distances = allocate_distances(11.0, &types, 0.0);
        assert_eq!(distances, vec![3.3, 4.0, 3.7]);

        // base 7/3 = 2.333: 2.1, 2.6, 2.3 sum 7.0
        let distances = allocate_distances(7.0, &types, 0.0);
        assert_eq!(distances, vec![2.1, 2.6, 2.3]);
    }

    #[test]
    fn test_allocation_with_long_run() {
        let types = session_types(7);
        let distances = allocate_distances(50.0, &types, 15.6);
        // others share 34.4 / 6 = 5.733: 5.2, 6.3, 5.7 x4 = 34.3; long absorbs +0.1
        assert_eq!(distances, vec![5.2, 6.3, 5.7, 5.7, 5.7, 5.7, 15.7]);
        let total: f64 = distances.iter().sum();
        assert!((total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_session_paces() {
        let input = make_runner_input(race_in_weeks(16));
        let target = target_pace_seconds(&input).unwrap();
        assert!((target - 341.27).abs() < 0.01);
        assert_eq!(session_pace(SessionType::Race, target).unwrap(), "5:41");
        assert_eq!(session_pace(SessionType::Tempo, target).unwrap(), "5:58");
        assert_eq!(session_pace(SessionType::Easy, target).unwrap(), "6:50");
        assert_eq!(session_pace(SessionType::Long, target).unwrap(), "6:32");
        assert_eq!(session_pace(SessionType::Interval, target).unwrap(), "5:07");
        assert_eq!(session_pace(SessionType::Recovery, target).unwrap(), "7:24");
    }

    // ---------------------------------------------------------------------------
    // Full plan
    // ---------------------------------------------------------------------------

    #[test]
    fn test_reference_marathon_plan() {
        let input = make_runner_input(race_in_weeks(16));
        let plan = generate_training_plan_on(&input, today()).unwrap();

        assert_eq!(plan.weeks.len(), 16);
        assert_eq!(plan.input, input);

        let first = &plan.weeks[0];
        assert!((30..=31).contains(&first.total_distance));
        assert_eq!(plan.weeks[15].total_distance, 40);

        for week in &plan.weeks {
            let types: Vec<SessionType> = week.sessions.iter().map(|s| s.session_type).collect();
            assert_eq!(types, session_types(5));
            assert!(week.long_run().is_none());
        }

        let tempo = first
            .sessions
            .iter()
            .find(|s| s.session_type == SessionType::Tempo)
            .unwrap();
        assert_eq!(tempo.pace, "5:58");
    }

    #[test]
    fn test_week_totals_match_sessions() {
        for race_type in RaceType::ALL {
            for frequency in 3..=7 {
                for mode in [DistanceGrowthMode::Fixed, DistanceGrowthMode::Progressive] {
                    let mut input = make_runner_input(race_in_weeks(12));
                    let (current_pb, target_pb) = match race_type {
                        RaceType::Full => ("4:30:00", "4:00:00"),
                        RaceType::Half => ("1:55:00", "1:50:00"),
                        RaceType::TenK => ("0:55:00", "0:50:00"),
                    };
                    input.race_type = race_type;
                    input.current_pb = current_pb.to_string();
                    input.target_pb = target_pb.to_string();
                    input.weekly_frequency = frequency;
                    input.distance_growth_mode = mode;
                    input.weekly_mileage = 47.0;
                    input.current_weekly_mileage = Some(23.0);

                    let plan = generate_training_plan_on(&input, today()).unwrap();
                    for week in &plan.weeks {
                        assert_eq!(week.sessions.len(), frequency as usize);
                        assert!(week.total_distance > 0);
                        let sum: f64 = week.sessions.iter().map(|s| s.distance).sum();
                        assert!((sum - week.total_distance as f64).abs() <= 1.0);

                        let target = week_distance(&input, week.number, 12);
                        assert!(
                            (sum - target).abs() < 0.05,
                            "week {} sum {} target {}",
                            week.number,
                            sum,
                            target
                        );
                        if mode == DistanceGrowthMode::Fixed {
                            assert_eq!(target, 47.0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_mileage_rejected() {
        let mut input = make_runner_input(race_in_weeks(12));
        input.distance_growth_mode = DistanceGrowthMode::Fixed;
        for mileage in [0.4, 1e12] {
            input.weekly_mileage = mileage;
            assert!(matches!(
                generate_training_plan_on(&input, today()),
                Err(PlanError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_lowest_mileage_keeps_weeks_positive() {
        let mut input = make_runner_input(race_in_weeks(12));
        input.weekly_frequency = 3;
        input.weekly_mileage = 10.0;
        input.current_weekly_mileage = Some(0.0);
        let plan = generate_training_plan_on(&input, today()).unwrap();
        assert!(plan.weeks.iter().all(|w| w.total_distance == 10));
        assert!(plan.sessions().all(|(_, s)| s.distance > 0.0));
    }

    #[test]
    fn test_session_dates() {
        let mut input = make_runner_input(race_in_weeks(10));
        input.weekly_frequency = 7;
        let plan = generate_training_plan_on(&input, today()).unwrap();

        assert_eq!(plan.first_session_date(), Some(today() + Duration::days(1)));
        for week in &plan.weeks {
            for pair in week.sessions.windows(2) {
                assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            }
        }
        for pair in plan.weeks.windows(2) {
            assert_eq!(
                pair[1].start_date().unwrap() - pair[0].start_date().unwrap(),
                Duration::days(7)
            );
        }
    }

    #[test]
    fn test_long_run_pinned_in_last_slot() {
        let mut input = make_runner_input(race_in_weeks(16));
        input.weekly_frequency = 7;
        input.distance_growth_mode = DistanceGrowthMode::Fixed;
        input.weekly_mileage = 50.0;
        let plan = generate_training_plan_on(&input, today()).unwrap();

        for week in &plan.weeks {
            let last = week.sessions.last().unwrap();
            assert_eq!(last.session_type, SessionType::Long);
            assert_eq!(last.pace, "6:32");
            let curve = long_run_distance(50.0, RaceType::Full, week.number, 16);
            assert!((last.distance - curve).abs() <= 0.5);
        }
    }

    #[test]
    fn test_near_race_still_gets_minimum_plan() {
        let input = make_runner_input(race_in_weeks(2));
        let plan = generate_training_plan_on(&input, today()).unwrap();
        assert_eq!(plan.weeks.len(), MIN_PLAN_WEEKS as usize);
        assert!(plan.extends_past_race());

        let far = make_runner_input(race_in_weeks(16));
        assert!(!generate_training_plan_on(&far, today()).unwrap().extends_past_race());
    }

    #[test]
    fn test_generation_is_deterministic() {
        let input = make_runner_input(race_in_weeks(20));
        let a = generate_training_plan_on(&input, today()).unwrap();
        let b = generate_training_plan_on(&input, today()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_input_rejected() {
        let mut input = make_runner_input(race_in_weeks(16));
        input.target_pb = "4:45:00".to_string();
        assert!(matches!(
            generate_training_plan_on(&input, today()),
            Err(PlanError::Validation(_))
        ));

        let mut input = make_runner_input(race_in_weeks(16));
        input.current_pb = "4:30:xx".to_string();
        assert!(matches!(
            generate_training_plan_on(&input, today()),
            Err(PlanError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_generate_uses_local_clock() {
        let start = Local::now().date_naive();
        let input = make_runner_input(start + Duration::weeks(12));
        let plan = generate_training_plan(&input).unwrap();
        let first = plan.first_session_date().unwrap();
        // tolerate a midnight rollover between the two clock reads
        assert!(first == start + Duration::days(1) || first == start + Duration::days(2));
    }
}
