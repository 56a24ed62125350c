//! Unit tests for cs-schedule.

use cs_core::{Category, ServerId};

use crate::{Roster, ScheduleError, ScheduleProvider, StaffingPlan};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Three domestic booths (ids 4, 1, 7 on purpose out of order) and one
/// foreign booth.
fn roster() -> Roster {
    Roster::new(vec![
        (ServerId(4), Category::Domestic),
        (ServerId(1), Category::Domestic),
        (ServerId(9), Category::Foreign),
        (ServerId(7), Category::Domestic),
    ])
    .unwrap()
}

// ── Roster ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod roster {
    use super::*;

    #[test]
    fn servers_sorted_by_id_with_ranks() {
        let r = roster();
        let ids: Vec<ServerId> = r.servers_in(Category::Domestic).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![ServerId(1), ServerId(4), ServerId(7)]);
        let ranks: Vec<u32> = r.servers_in(Category::Domestic).iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    fn capacity_per_category() {
        let r = roster();
        assert_eq!(r.capacity(Category::Domestic), 3);
        assert_eq!(r.capacity(Category::Foreign), 1);
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn categories_in_canonical_order() {
        let cats: Vec<Category> = roster().categories().collect();
        assert_eq!(cats, vec![Category::Domestic, Category::Foreign]);
    }

    #[test]
    fn duplicate_server_rejected() {
        let err = Roster::new(vec![
            (ServerId(1), Category::Domestic),
            (ServerId(1), Category::Foreign),
        ])
        .unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateServer(ServerId(1))));
    }

    #[test]
    fn missing_category_is_empty() {
        let r = Roster::new(vec![(ServerId(0), Category::Domestic)]).unwrap();
        assert!(r.servers_in(Category::Foreign).is_empty());
        assert!(!r.has(Category::Foreign));
    }
}

// ── HourWindow / WindowSchedule ───────────────────────────────────────────────

#[cfg(test)]
mod window {
    use crate::{HourWindow, WindowSchedule, check_tiling};

    use super::*;

    fn w(s: &str) -> HourWindow {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_display() {
        let win = w("6-9");
        assert_eq!(win, HourWindow { start: 6, end: 9 });
        assert_eq!(win.to_string(), "6-9");
        assert!(win.contains(6));
        assert!(win.contains(8));
        assert!(!win.contains(9));
    }

    #[test]
    fn parse_rejects_bad_windows() {
        assert!("9-6".parse::<HourWindow>().is_err());
        assert!("6-6".parse::<HourWindow>().is_err());
        assert!("20-25".parse::<HourWindow>().is_err());
        assert!("six-nine".parse::<HourWindow>().is_err());
    }

    #[test]
    fn tiling_accepts_full_day() {
        assert!(check_tiling(&[w("0-6"), w("6-12"), w("12-24")]).is_ok());
    }

    #[test]
    fn tiling_rejects_gap() {
        let err = check_tiling(&[w("0-6"), w("7-24")]).unwrap_err();
        assert!(matches!(err, ScheduleError::WindowCoverage(_)));
    }

    #[test]
    fn tiling_rejects_overlap() {
        let err = check_tiling(&[w("0-12"), w("11-24")]).unwrap_err();
        assert!(matches!(err, ScheduleError::WindowCoverage(_)));
    }

    #[test]
    fn flags_expand_to_hours() {
        let r = roster();
        let sched = WindowSchedule::new(
            vec![w("0-6"), w("6-12"), w("12-24")],
            vec![(ServerId(1), vec![false, true, false])],
        )
        .unwrap();
        let s1 = r.servers_in(Category::Domestic)[0];
        assert!(!sched.is_online(&s1, 5));
        assert!(sched.is_online(&s1, 6));
        assert!(sched.is_online(&s1, 11));
        assert!(!sched.is_online(&s1, 12));
    }

    #[test]
    fn unknown_server_is_offline() {
        let r = roster();
        let sched = WindowSchedule::new(vec![w("0-24")], vec![(ServerId(1), vec![true])]).unwrap();
        let foreign = r.servers_in(Category::Foreign)[0];
        assert!(!sched.is_online(&foreign, 10));
    }

    #[test]
    fn flag_count_mismatch_rejected() {
        let err = WindowSchedule::new(vec![w("0-24")], vec![(ServerId(1), vec![true, false])]);
        assert!(matches!(err, Err(ScheduleError::Parse(_))));
    }
}

// ── StaffingPlan ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod staffing {
    use crate::SubsectionStaffing;

    use super::*;

    #[test]
    fn at_capacity_uses_roster_max() {
        let plan = StaffingPlan::at_capacity(&roster());
        assert_eq!(plan.max_for(Category::Domestic).unwrap(), 3);
        assert_eq!(plan.servers(Category::Domestic, 0).unwrap(), 3);
        assert_eq!(plan.servers(Category::Foreign, 23).unwrap(), 1);
    }

    #[test]
    fn adjust_from_sets_later_hours_only() {
        let mut plan = StaffingPlan::at_capacity(&roster());
        plan.adjust_from(Category::Domestic, 10, 2).unwrap();
        assert_eq!(plan.servers(Category::Domestic, 9).unwrap(), 3);
        assert_eq!(plan.servers(Category::Domestic, 10).unwrap(), 2);
        assert_eq!(plan.servers(Category::Domestic, 23).unwrap(), 2);
    }

    #[test]
    fn setters_clamp_to_range() {
        let mut plan = StaffingPlan::at_capacity(&roster());
        assert_eq!(plan.set(Category::Domestic, 4, 0).unwrap(), 1);
        assert_eq!(plan.adjust_from(Category::Domestic, 5, 99).unwrap(), 3);
        assert_eq!(plan.servers(Category::Domestic, 4).unwrap(), 1);
        assert_eq!(plan.servers(Category::Domestic, 5).unwrap(), 3);
    }

    #[test]
    fn hour_past_end_of_day_errors() {
        let mut plan = StaffingPlan::at_capacity(&roster());
        plan.set(Category::Domestic, 0, 1).unwrap();
        assert!(matches!(
            plan.servers(Category::Domestic, 24),
            Err(ScheduleError::HourOutOfRange(24))
        ));
        assert!(matches!(
            plan.set(Category::Domestic, 24, 2),
            Err(ScheduleError::HourOutOfRange(24))
        ));
        assert!(matches!(
            plan.adjust_from(Category::Domestic, 30, 2),
            Err(ScheduleError::HourOutOfRange(30))
        ));
        // Hour 0 is untouched by the rejected writes.
        assert_eq!(plan.servers(Category::Domestic, 0).unwrap(), 1);
        assert_eq!(plan.servers(Category::Domestic, 23).unwrap(), 3);
    }

    #[test]
    fn unknown_subsection_errors() {
        let plan = StaffingPlan::new();
        assert!(matches!(
            plan.servers(Category::Foreign, 0),
            Err(ScheduleError::UnknownSubsection(Category::Foreign))
        ));
    }

    #[test]
    fn lowest_ranks_come_online_first() {
        let r = roster();
        let mut plan = StaffingPlan::at_capacity(&r);
        plan.set(Category::Domestic, 8, 2).unwrap();
        let online: Vec<ServerId> = r
            .servers_in(Category::Domestic)
            .iter()
            .filter(|s| plan.is_online(s, 8))
            .map(|s| s.id)
            .collect();
        assert_eq!(online, vec![ServerId(1), ServerId(4)]);
    }

    #[test]
    fn insert_rejects_out_of_range() {
        let mut plan = StaffingPlan::new();
        let mut s = SubsectionStaffing::at_max(2);
        s.hourly[3] = 5;
        assert!(plan.insert(Category::Domestic, s).is_err());
        assert!(plan.insert(Category::Domestic, SubsectionStaffing::at_max(0)).is_err());
    }

    #[test]
    fn validate_against_roster_capacity() {
        let r = roster();
        let mut plan = StaffingPlan::new();
        plan.insert(Category::Domestic, SubsectionStaffing::at_max(5)).unwrap();
        plan.insert(Category::Foreign, SubsectionStaffing::at_max(1)).unwrap();
        assert!(matches!(
            plan.validate_against(&r),
            Err(ScheduleError::Capacity { category: Category::Domestic, max: 5, available: 3 })
        ));
    }

    #[test]
    fn validate_against_missing_subsection() {
        let mut plan = StaffingPlan::new();
        plan.insert(Category::Domestic, SubsectionStaffing::at_max(3)).unwrap();
        assert!(matches!(
            plan.validate_against(&roster()),
            Err(ScheduleError::UnknownSubsection(Category::Foreign))
        ));
    }
}

// ── ArrivalTable ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod arrivals {
    use cs_core::{
        ClockTime, FixedSampler, PassengerId, ServiceTimeConfig, SimConfig, SimRng, Tick,
        TriangularSampler,
    };

    use crate::{ArrivalSource, ArrivalTable, ManifestEntry};

    use super::*;

    fn entry(id: u64, flight: &str, cat: Category, time: &str, secs: Option<u32>) -> ManifestEntry {
        ManifestEntry {
            passenger:    PassengerId(id),
            flight:       flight.to_string(),
            category:     cat,
            arrival:      time.parse::<ClockTime>().unwrap(),
            service_secs: secs,
        }
    }

    #[test]
    fn buckets_by_tick_sorted_by_passenger() {
        let cfg = SimConfig::default(); // 10 s ticks
        let entries = vec![
            entry(5, "AA1", Category::Domestic, "00:01:00", Some(60)),
            entry(2, "AA1", Category::Domestic, "00:01:05", Some(60)),
            entry(9, "BB2", Category::Foreign, "00:02:00", Some(60)),
        ];
        let table =
            ArrivalTable::build(entries, &cfg, &FixedSampler(1), &mut SimRng::new(0)).unwrap();

        let at6: Vec<PassengerId> =
            table.passengers_arriving(Tick(6)).iter().map(|r| r.passenger).collect();
        assert_eq!(at6, vec![PassengerId(2), PassengerId(5)]);
        assert_eq!(table.passengers_arriving(Tick(12)).len(), 1);
        assert!(table.passengers_arriving(Tick(7)).is_empty());
        assert_eq!(table.passenger_count(), 3);
        assert_eq!(table.flight_count(), 2);
    }

    #[test]
    fn first_of_each_category_picks_earliest() {
        let cfg = SimConfig::default();
        let entries = vec![
            entry(4, "AA1", Category::Foreign, "00:05:00", Some(60)),
            entry(3, "AA1", Category::Domestic, "00:03:00", Some(60)),
            entry(1, "BB2", Category::Foreign, "00:02:00", Some(60)),
            entry(2, "BB2", Category::Domestic, "00:03:00", Some(60)),
        ];
        let table =
            ArrivalTable::build(entries, &cfg, &FixedSampler(1), &mut SimRng::new(0)).unwrap();
        let firsts: Vec<(Category, PassengerId)> =
            table.first_of_each_category().iter().map(|r| (r.category, r.passenger)).collect();
        assert_eq!(
            firsts,
            vec![(Category::Domestic, PassengerId(2)), (Category::Foreign, PassengerId(1))]
        );
    }

    #[test]
    fn service_ticks_round_up() {
        let cfg = SimConfig::default();
        let entries = vec![
            entry(1, "F", Category::Domestic, "00:00:00", Some(25)),
            entry(2, "F", Category::Domestic, "00:00:00", Some(0)),
        ];
        let table =
            ArrivalTable::build(entries, &cfg, &FixedSampler(1), &mut SimRng::new(0)).unwrap();
        let bucket = table.passengers_arriving(Tick(0));
        assert_eq!(bucket[0].service_ticks, 3);
        assert_eq!(bucket[1].service_ticks, 1);
    }

    #[test]
    fn missing_durations_are_sampled_once_deterministically() {
        let cfg = SimConfig::default();
        let sampler = TriangularSampler::new(&ServiceTimeConfig::default()).unwrap();
        let manifest = || {
            (0..50)
                .map(|i| entry(i, "F", Category::Foreign, "01:00:00", None))
                .collect::<Vec<_>>()
        };
        let a = ArrivalTable::build(manifest(), &cfg, &sampler, &mut SimRng::new(7)).unwrap();
        let b = ArrivalTable::build(manifest(), &cfg, &sampler, &mut SimRng::new(7)).unwrap();
        let ticks_a: Vec<u64> = a.records().map(|r| r.service_ticks).collect();
        let ticks_b: Vec<u64> = b.records().map(|r| r.service_ticks).collect();
        assert_eq!(ticks_a, ticks_b);
        // Foreign bounds are 60..240 s → 6..=24 ticks.
        assert!(ticks_a.iter().all(|&t| (6..=24).contains(&t)));
    }

    #[test]
    fn duplicate_passenger_rejected() {
        let cfg = SimConfig::default();
        let entries = vec![
            entry(1, "F", Category::Domestic, "00:00:00", Some(10)),
            entry(1, "F", Category::Domestic, "00:00:10", Some(10)),
        ];
        let err = ArrivalTable::build(entries, &cfg, &FixedSampler(1), &mut SimRng::new(0));
        assert!(matches!(err, Err(ScheduleError::DuplicatePassenger(PassengerId(1)))));
    }

    #[test]
    fn flight_names_resolve() {
        let cfg = SimConfig::default();
        let entries = vec![
            entry(1, "ZZ9", Category::Domestic, "00:00:00", Some(10)),
            entry(2, "AB3", Category::Domestic, "00:00:00", Some(10)),
        ];
        let table =
            ArrivalTable::build(entries, &cfg, &FixedSampler(1), &mut SimRng::new(0)).unwrap();
        let names: Vec<&str> = table.records().filter_map(|r| table.flight_of(r)).collect();
        assert_eq!(names, vec!["ZZ9", "AB3"]);
    }

    #[test]
    fn arriving_after_horizon_counted() {
        let cfg = SimConfig { horizon_hours: 1, ..SimConfig::default() };
        let entries = vec![
            entry(1, "F", Category::Domestic, "00:30:00", Some(10)),
            entry(2, "F", Category::Domestic, "01:00:00", Some(10)),
            entry(3, "F", Category::Domestic, "01:00:10", Some(10)),
        ];
        let table =
            ArrivalTable::build(entries, &cfg, &FixedSampler(1), &mut SimRng::new(0)).unwrap();
        // end tick is 360 (01:00:00) and is still simulated.
        assert_eq!(table.arriving_after(cfg.end_tick()), 1);
    }
}

// ── CSV loaders ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use cs_core::PassengerId;

    use crate::{load_arrivals_reader, load_server_schedule_reader, load_staffing_reader};

    use super::*;

    const MANIFEST: &[u8] = b"\
passenger_id,flight,category,arrival_time,service_secs\n\
1,AA100,domestic,06:15:00,\n\
2,AA100,Foreign,06:15:00,95\n\
";

    const SERVERS: &[u8] = b"\
id,subsection,0-6,6-12,12-24\n\
0,domestic,0,1,1\n\
1,domestic,1,1,0\n\
2,foreign,1,1,1\n\
";

    fn staffing_csv(rows: &[(&str, u32, u32)]) -> String {
        let hours: Vec<String> = (0..24).map(|h| h.to_string()).collect();
        let mut out = format!("subsection,max,{}\n", hours.join(","));
        for &(sub, max, n) in rows {
            let counts: Vec<String> = (0..24).map(|_| n.to_string()).collect();
            out.push_str(&format!("{sub},{max},{}\n", counts.join(",")));
        }
        out
    }

    #[test]
    fn manifest_optional_service_secs() {
        let entries = load_arrivals_reader(Cursor::new(MANIFEST)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].passenger, PassengerId(1));
        assert_eq!(entries[0].service_secs, None);
        assert_eq!(entries[1].category, Category::Foreign);
        assert_eq!(entries[1].service_secs, Some(95));
        assert_eq!(entries[1].arrival.secs(), 6 * 3600 + 15 * 60);
    }

    #[test]
    fn manifest_without_service_column() {
        let csv = b"passenger_id,flight,category,arrival_time\n3,X,domestic,00:00:10\n";
        let entries = load_arrivals_reader(Cursor::new(csv.as_slice())).unwrap();
        assert_eq!(entries[0].service_secs, None);
    }

    #[test]
    fn manifest_bad_time_errors() {
        let csv = b"passenger_id,flight,category,arrival_time\n3,X,domestic,25:00:00\n";
        assert!(load_arrivals_reader(Cursor::new(csv.as_slice())).is_err());
    }

    #[test]
    fn server_schedule_builds_roster_and_windows() {
        let (roster, sched) = load_server_schedule_reader(Cursor::new(SERVERS)).unwrap();
        assert_eq!(roster.capacity(Category::Domestic), 2);
        assert_eq!(roster.capacity(Category::Foreign), 1);
        assert_eq!(sched.windows().len(), 3);

        let s0 = roster.servers_in(Category::Domestic)[0];
        assert!(!sched.is_online(&s0, 3));
        assert!(sched.is_online(&s0, 13));
    }

    #[test]
    fn server_schedule_gap_is_fatal() {
        let csv = b"id,subsection,0-6,7-24\n0,domestic,1,1\n";
        let err = load_server_schedule_reader(Cursor::new(csv.as_slice())).unwrap_err();
        assert!(matches!(err, ScheduleError::WindowCoverage(_)));
    }

    #[test]
    fn server_schedule_bad_flag_is_fatal() {
        let csv = b"id,subsection,0-24\n0,domestic,yes\n";
        assert!(load_server_schedule_reader(Cursor::new(csv.as_slice())).is_err());
    }

    #[test]
    fn staffing_plan_loads() {
        let csv = staffing_csv(&[("domestic", 3, 2), ("foreign", 1, 1)]);
        let plan = load_staffing_reader(Cursor::new(csv.into_bytes())).unwrap();
        assert_eq!(plan.max_for(Category::Domestic).unwrap(), 3);
        assert_eq!(plan.servers(Category::Domestic, 17).unwrap(), 2);
        assert!(plan.validate_against(&roster()).is_ok());
    }

    #[test]
    fn staffing_plan_missing_hour_column() {
        let csv = "subsection,max,0,1\ndomestic,1,1,1\n";
        let err = load_staffing_reader(Cursor::new(csv.as_bytes())).unwrap_err();
        assert!(matches!(err, ScheduleError::Parse(_)));
    }
}
