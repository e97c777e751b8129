use chrono::NaiveDate;
use cra_core::{
    Config, Cra, CraError, ValidationError,
    expenses::{ExpenseKind, GeneralExpenseCategory, MissionExpenseCategory, NewExpense},
    missions::{MissionId, MissionKind, NewMission},
    timesheet::{DayAllocationLedger, FULL_DAY, TimeEntry},
};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn date(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn session() -> (Cra, MissionId, MissionId) {
    let mut config = Config::default();
    config.reference_date = date(2025, 3, 14);
    let mut cra = Cra::with_config(config);

    let client = cra.add_client("Acme").unwrap().id;
    let m1 = cra
        .add_mission(NewMission {
            name: "Audit sécurité".to_string(),
            client,
            kind: MissionKind::Regie {
                daily_rate: d("650"),
                max_days: 2,
            },
            start_date: date(2025, 3, 1),
            deadline: date(2025, 3, 31),
        })
        .unwrap()
        .id;
    let m2 = cra
        .add_mission(NewMission {
            name: "Refonte site".to_string(),
            client,
            kind: MissionKind::Forfait {
                amount: d("4000"),
            },
            start_date: date(2025, 3, 1),
            deadline: date(2025, 4, 30),
        })
        .unwrap()
        .id;
    (cra, m1, m2)
}

#[test]
fn two_missions_share_a_day() {
    let (mut cra, m1, m2) = session();
    let day = date(2025, 3, 3);

    cra.set_time(day, m1, d("0.5")).unwrap();
    cra.set_time(day, m2, d("0.5")).unwrap();
    assert_eq!(cra.timesheet().get_day_total(day, None), FULL_DAY);

    // The day is full: raising M1 leaves it where it was.
    let allocation = cra.set_time(day, m1, FULL_DAY).unwrap();
    assert_eq!(allocation.effective, d("0.5"));
    assert!(allocation.was_truncated());
    assert_eq!(cra.timesheet().get_duration(day, m1), Some(d("0.5")));
    assert_eq!(cra.timesheet().get_duration(day, m2), Some(d("0.5")));

    // Lowering M1 frees room for M2.
    cra.set_time(day, m1, d("0.25")).unwrap();
    let allocation = cra.set_time(day, m2, d("0.9")).unwrap();
    assert_eq!(allocation.effective, d("0.75"));
    assert_eq!(cra.timesheet().get_day_total(day, None), FULL_DAY);
}

#[test]
fn a_partly_booked_day_truncates_the_request() {
    let (mut cra, m1, m2) = session();
    let day = date(2025, 3, 4);

    cra.set_time(day, m1, d("0.9")).unwrap();
    let allocation = cra.set_time(day, m2, d("0.5")).unwrap();

    assert_eq!(allocation.requested, d("0.5"));
    assert_eq!(allocation.effective, d("0.1"));
    assert_eq!(cra.timesheet().get_duration(day, m2), Some(d("0.1")));
}

#[test]
fn zero_removes_the_entry() {
    let (mut cra, m1, _) = session();
    let day = date(2025, 3, 5);

    cra.set_time(day, m1, d("0.5")).unwrap();
    cra.clear(day, m1).unwrap();

    assert_eq!(cra.timesheet().get_duration(day, m1), None);
    assert_eq!(cra.timesheet().get_day_total(day, None), Decimal::ZERO);
    assert!(cra.timesheet().is_empty());
}

#[test]
fn mission_totals_add_up_over_days() {
    let (mut cra, m1, m2) = session();

    cra.enter_cell(date(2025, 3, 3), m1, "1").unwrap();
    cra.enter_cell(date(2025, 3, 4), m1, "0,5").unwrap();
    cra.press_key(date(2025, 3, 5), m1, '.').unwrap();
    cra.press_key(date(2025, 3, 5), m2, '1').unwrap();

    assert_eq!(cra.timesheet().total_for_mission(m1), d("2"));
    assert_eq!(cra.timesheet().total_for_mission(m2), d("0.5"));
    assert_eq!(cra.timesheet().total_for_mission(MissionId(42)), Decimal::ZERO);
}

#[test]
fn no_day_ever_exceeds_capacity() {
    let (mut cra, m1, m2) = session();
    let requests = ["0.3", "0.8", "1", "0.25", "0.6", "0", "0.75", "0.5"];

    for (i, request) in requests.iter().enumerate() {
        let day = date(2025, 3, 10 + (i as u32 % 3));
        let mission = if i % 2 == 0 { m1 } else { m2 };
        cra.set_time(day, mission, d(request)).unwrap();

        for check in 10..13 {
            assert!(cra.timesheet().get_day_total(date(2025, 3, check), None) <= FULL_DAY);
        }
    }
}

#[test]
fn loaded_days_never_exceed_capacity() {
    let (a, b) = (MissionId(1), MissionId(2));
    let day = date(2025, 3, 6);
    let loaded: DayAllocationLedger = [
        TimeEntry::new(a, day, FULL_DAY),
        TimeEntry::new(b, day, d("0.6")),
    ]
    .into_iter()
    .collect();
    assert_eq!(loaded.get_day_total(day, None), FULL_DAY);

    let next = loaded.set_entry(day, MissionId(3), d("0.5"));

    assert_eq!(next.get_duration(day, a), Some(FULL_DAY));
    assert_eq!(next.get_duration(day, b), None);
    assert_eq!(next.get_duration(day, MissionId(3)), None);
    assert!(next.get_day_total(day, None) <= FULL_DAY);
}

#[test]
fn month_report_prices_days_and_expenses() {
    let (mut cra, m1, m2) = session();
    for day in 3..=5 {
        cra.set_time(date(2025, 3, day), m1, FULL_DAY).unwrap();
    }
    cra.set_time(date(2025, 3, 6), m2, d("0.5")).unwrap();
    // Outside the reference month.
    cra.set_time(date(2025, 4, 1), m1, FULL_DAY).unwrap();

    cra.add_expense(NewExpense {
        date: date(2025, 3, 3),
        kind: ExpenseKind::Mission {
            mission: m1,
            category: MissionExpenseCategory::Transport,
        },
        amount: d("45.50"),
        description: "Train Paris-Lyon".to_string(),
    })
    .unwrap();
    let software = cra
        .add_expense(NewExpense {
            date: date(2025, 3, 20),
            kind: ExpenseKind::General {
                category: GeneralExpenseCategory::Logiciel,
            },
            amount: d("29.99"),
            description: String::new(),
        })
        .unwrap()
        .id;

    let report = cra.month_report();
    assert_eq!(report.from, date(2025, 3, 1));
    assert_eq!(report.to, date(2025, 3, 31));

    let audit = &report.missions[0];
    assert_eq!(audit.days, d("3"));
    assert_eq!(audit.billable, d("1950"));
    assert_eq!(audit.days_over_max, d("1"));
    assert_eq!(audit.expenses, d("45.50"));

    let site = &report.missions[1];
    assert_eq!(site.days, d("0.5"));
    assert_eq!(site.billable, d("4000"));

    assert_eq!(report.total_days(), d("3.5"));
    assert_eq!(report.total_billable(), d("5950"));
    assert_eq!(report.total_expenses(), d("75.49"));

    cra.delete_expense(software).unwrap();
    assert_eq!(cra.month_report().total_expenses(), d("45.50"));
    assert_eq!(
        cra.delete_expense(software).unwrap_err(),
        CraError::Validation(ValidationError::UnknownExpense(software))
    );
}

#[test]
fn grid_shows_every_mission_for_the_month() {
    let (mut cra, m1, m2) = session();
    let day = cra.parse_day("monday").unwrap();
    assert_eq!(day, date(2025, 3, 10));

    cra.set_time(day, m1, d("0.5")).unwrap();
    cra.set_time(day, m2, d("0.5")).unwrap();

    let grid = cra.grid();
    let column = grid.days.iter().position(|d| *d == day).unwrap();
    assert_eq!(grid.rows.len(), 2);
    assert_eq!(grid.rows[0].cells[column], Some(d("0.5")));
    assert_eq!(grid.rows[1].cells[column], Some(d("0.5")));
    assert_eq!(grid.day_totals[column], FULL_DAY);
    assert_eq!(grid.over_capacity_days().count(), 0);
    assert_eq!(grid.total(), FULL_DAY);
}
