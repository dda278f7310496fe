// src/agenda.rs
//
// Weekly agenda aggregation: groups the current week's appointments and the
// recurring time-block templates by weekday label for the 7-column week view.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Appointment, TimeBlock};

/// Canonical grouping keys, Monday-first. Every mapping produced here is
/// total over these seven labels.
pub const CANONICAL_DAYS: [&str; 7] = [
    "LUNES",
    "MARTES",
    "MIERCOLES",
    "JUEVES",
    "VIERNES",
    "SABADO",
    "DOMINGO",
];

#[derive(Debug, Serialize)]
pub struct DayAgenda {
    pub label: &'static str,
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
    pub time_blocks: Vec<TimeBlock>,
}

#[derive(Debug, Serialize)]
pub struct WeekAgenda {
    pub week_start: NaiveDate,
    /// Exactly 7 entries, Monday-first. Empty days carry empty lists so the
    /// renderer can show a uniform "no items" placeholder.
    pub days: Vec<DayAgenda>,
}

impl WeekAgenda {
    #[cfg(test)]
    pub fn day(&self, label: &str) -> &DayAgenda {
        self.days.iter().find(|d| d.label == label).unwrap()
    }
}

/// Monday of the calendar week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Index into [`CANONICAL_DAYS`] for a date.
///
/// The native day number is Sunday-indexed (Sunday = 0) while the canonical
/// list starts at Monday, hence the fixed `+ 6 (mod 7)` rotation: Sunday
/// lands on index 6 (DOMINGO), Monday on index 0 (LUNES).
fn day_index(date: NaiveDate) -> usize {
    let sunday0 = date.weekday().num_days_from_sunday() as usize;
    (sunday0 + 6) % 7
}

/// Maps a date to its canonical label.
pub fn day_label(date: NaiveDate) -> &'static str {
    CANONICAL_DAYS[day_index(date)]
}

fn canonical_index(label: &str) -> Option<usize> {
    CANONICAL_DAYS.iter().position(|d| *d == label)
}

/// Builds the week view for the calendar week containing `today`.
///
/// Appointments outside `[monday, monday + 7 days)` are excluded entirely.
/// Appointment order within a day follows input order; time blocks are
/// sorted ascending by `start_time` within each day. Time blocks whose
/// `day_of_week` is not one of the canonical labels are dropped: a
/// non-canonical label is a backend data-quality problem, not something the
/// view invents a bucket for.
pub fn week_agenda(
    appointments: Vec<Appointment>,
    time_blocks: Vec<TimeBlock>,
    today: NaiveDate,
) -> WeekAgenda {
    let start = week_start(today);
    let end = start + Duration::days(7);

    let mut days: Vec<DayAgenda> = CANONICAL_DAYS
        .iter()
        .enumerate()
        .map(|(i, label)| DayAgenda {
            label,
            date: start + Duration::days(i as i64),
            appointments: Vec::new(),
            time_blocks: Vec::new(),
        })
        .collect();

    for appt in appointments {
        if appt.date < start || appt.date >= end {
            continue;
        }
        let idx = day_index(appt.date);
        days[idx].appointments.push(appt);
    }

    for block in time_blocks {
        if let Some(idx) = canonical_index(&block.day_of_week) {
            days[idx].time_blocks.push(block);
        }
    }
    for day in &mut days {
        day.time_blocks.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    }

    WeekAgenda {
        week_start: start,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use uuid::Uuid;

    fn appt(date: NaiveDate, start: &str) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            date,
            start_time: start.to_string(),
            end_time: "23:59".to_string(),
            patient_name: "Juan Pérez".to_string(),
            attention_type_name: None,
            status: AppointmentStatus::Pendiente,
            notes: None,
        }
    }

    fn block(day: &str, start: &str) -> TimeBlock {
        TimeBlock {
            id: Uuid::new_v4(),
            day_of_week: day.to_string(),
            start_time: start.to_string(),
            end_time: "18:00".to_string(),
            appointment_duration_minutes: 30,
            max_appointments_per_block: 8,
            attention_type_name: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2026-08-19 is a Wednesday; its week starts Monday 2026-08-17.
        assert_eq!(week_start(date(2026, 8, 19)), date(2026, 8, 17));
        assert_eq!(week_start(date(2026, 8, 17)), date(2026, 8, 17));
        // Sunday belongs to the week that started the previous Monday.
        assert_eq!(week_start(date(2026, 8, 23)), date(2026, 8, 17));
    }

    #[test]
    fn test_day_label_rotation_all_seven_days() {
        // Monday 2026-08-17 through Sunday 2026-08-23.
        let expected = [
            "LUNES", "MARTES", "MIERCOLES", "JUEVES", "VIERNES", "SABADO", "DOMINGO",
        ];
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(day_label(date(2026, 8, 17 + i as u32)), *want);
        }
    }

    #[test]
    fn test_mapping_is_total_over_all_labels() {
        let agenda = week_agenda(Vec::new(), Vec::new(), date(2026, 8, 19));
        assert_eq!(agenda.days.len(), 7);
        for (i, label) in CANONICAL_DAYS.iter().enumerate() {
            assert_eq!(agenda.days[i].label, *label);
            assert!(agenda.days[i].appointments.is_empty());
            assert!(agenda.days[i].time_blocks.is_empty());
        }
    }

    #[test]
    fn test_monday_and_sunday_window_boundaries() {
        let today = date(2026, 8, 19); // Wednesday
        let appts = vec![
            appt(date(2026, 8, 17), "09:00"), // Monday of this week
            appt(date(2026, 8, 23), "10:00"), // Sunday, last in-window day
            appt(date(2026, 8, 16), "11:00"), // preceding Sunday: out of window
            appt(date(2026, 8, 24), "12:00"), // next Monday: out of window
        ];
        let agenda = week_agenda(appts, Vec::new(), today);

        assert_eq!(agenda.day("LUNES").appointments.len(), 1);
        assert_eq!(agenda.day("DOMINGO").appointments.len(), 1);
        assert_eq!(agenda.day("DOMINGO").appointments[0].start_time, "10:00");

        let total: usize = agenda.days.iter().map(|d| d.appointments.len()).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_out_of_window_never_exceeds_input() {
        let today = date(2026, 8, 19);
        let in_window = vec![appt(date(2026, 8, 18), "08:00"), appt(date(2026, 8, 21), "08:30")];
        let agenda = week_agenda(in_window.clone(), Vec::new(), today);
        let total: usize = agenda.days.iter().map(|d| d.appointments.len()).sum();
        // equality holds exactly when every input is in-window
        assert_eq!(total, in_window.len());
    }

    #[test]
    fn test_appointment_input_order_preserved_within_day() {
        let today = date(2026, 8, 19);
        let appts = vec![
            appt(date(2026, 8, 18), "14:00"),
            appt(date(2026, 8, 18), "09:00"),
        ];
        let agenda = week_agenda(appts, Vec::new(), today);
        let martes = agenda.day("MARTES");
        assert_eq!(martes.appointments[0].start_time, "14:00");
        assert_eq!(martes.appointments[1].start_time, "09:00");
    }

    #[test]
    fn test_time_blocks_sorted_by_start_time_within_day() {
        let blocks = vec![block("LUNES", "14:00"), block("LUNES", "09:00")];
        let agenda = week_agenda(Vec::new(), blocks, date(2026, 8, 19));
        let lunes = agenda.day("LUNES");
        let starts: Vec<&str> = lunes.time_blocks.iter().map(|b| b.start_time.as_str()).collect();
        assert_eq!(starts, vec!["09:00", "14:00"]);
    }

    #[test]
    fn test_unknown_day_label_silently_excluded() {
        let blocks = vec![block("FERIADO", "09:00"), block("MARTES", "10:00")];
        let agenda = week_agenda(Vec::new(), blocks, date(2026, 8, 19));
        let total: usize = agenda.days.iter().map(|d| d.time_blocks.len()).sum();
        assert_eq!(total, 1);
        assert_eq!(agenda.day("MARTES").time_blocks.len(), 1);
        // no synthetic bucket exists
        assert!(agenda.days.iter().all(|d| CANONICAL_DAYS.contains(&d.label)));
    }

    #[test]
    fn test_day_dates_align_with_labels() {
        let agenda = week_agenda(Vec::new(), Vec::new(), date(2026, 8, 23));
        assert_eq!(agenda.week_start, date(2026, 8, 17));
        for day in &agenda.days {
            assert_eq!(day_label(day.date), day.label);
        }
    }
}
