// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use spendview::models::{NewTransaction, TxType};
use spendview::session::Session;
use spendview::storage::{
    KEY_BUDGET_ALERT_SHOWN, KEY_MIN_BALANCE_ALERT_SHOWN, KEY_NOTIFICATIONS, MemoryStore,
};
use spendview::summary::{AlertCheck, evaluate_budget_alert, evaluate_min_balance_alert, summarize};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn at(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(12, 0, 0).unwrap()
}

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

fn new_tx(amount: i64, r#type: TxType, date: NaiveDate) -> NewTransaction {
    NewTransaction {
        desc: "entry".into(),
        amount: dec(amount),
        r#type,
        category: "General".into(),
        date,
    }
}

#[test]
fn budget_alert_is_edge_triggered() {
    let first = evaluate_budget_alert(dec(600), dec(500), false);
    assert_eq!(first, AlertCheck { fired: true, shown: true });
    let again = evaluate_budget_alert(dec(600), dec(500), true);
    assert_eq!(again, AlertCheck { fired: false, shown: true });
    let cleared = evaluate_budget_alert(dec(500), dec(500), true);
    assert_eq!(cleared, AlertCheck { fired: false, shown: false });
}

#[test]
fn zero_budget_never_fires() {
    let check = evaluate_budget_alert(dec(10), Decimal::ZERO, false);
    assert!(!check.fired);
    assert!(!check.shown);
}

#[test]
fn min_balance_alert_is_edge_triggered() {
    let first = evaluate_min_balance_alert(dec(50), dec(100), false);
    assert_eq!(first, AlertCheck { fired: true, shown: true });
    let again = evaluate_min_balance_alert(dec(40), dec(100), true);
    assert_eq!(again, AlertCheck { fired: false, shown: true });
    let cleared = evaluate_min_balance_alert(dec(100), dec(100), true);
    assert_eq!(cleared, AlertCheck { fired: false, shown: false });
    let unset = evaluate_min_balance_alert(dec(-5), Decimal::ZERO, false);
    assert!(!unset.fired);
}

#[test]
fn summarize_selects_month_and_year() {
    let kv = MemoryStore::new();
    let mut session = Session::open(&kv, d(2024, 1, 15));
    session.add_transaction(new_tx(300, TxType::Income, d(2024, 1, 2))).unwrap();
    session.add_transaction(new_tx(120, TxType::Expense, d(2024, 1, 31))).unwrap();
    session.add_transaction(new_tx(999, TxType::Expense, d(2023, 1, 5))).unwrap();
    session.add_transaction(new_tx(50, TxType::Expense, d(2024, 2, 1))).unwrap();

    let s = summarize(session.store().all(), 1, 2024);
    assert_eq!(s.income, dec(300));
    assert_eq!(s.expense, dec(120));
    assert_eq!(s.balance, dec(180));
    assert_eq!(session.summary(), s);
}

#[test]
fn budget_alert_fires_once_and_logs_notification() {
    let kv = MemoryStore::new();
    let today = d(2024, 3, 20);
    let mut session = Session::open(&kv, today);
    session.set_budget(dec(500)).unwrap();
    session.add_transaction(new_tx(600, TxType::Expense, d(2024, 3, 5))).unwrap();
    session.add_transaction(new_tx(1000, TxType::Income, d(2024, 3, 1))).unwrap();

    let fired = session.check_alerts(at(today)).unwrap();
    assert_eq!(fired, vec!["Budget exceeded! Expense: ₹600, Limit: ₹500".to_string()]);
    assert_eq!(kv.raw(KEY_BUDGET_ALERT_SHOWN).as_deref(), Some("true"));
    assert_eq!(session.notifications().len(), 1);
    assert!(kv.raw(KEY_NOTIFICATIONS).unwrap().contains("Budget exceeded"));

    assert!(session.check_alerts(at(today)).unwrap().is_empty());
    assert_eq!(session.notifications().len(), 1);

    // latch survives a reload
    let mut reopened = Session::open(&kv, today);
    assert_eq!(reopened.alert_latches(), (true, false));
    assert!(reopened.check_alerts(at(today)).unwrap().is_empty());
}

#[test]
fn budget_alert_rearms_after_expense_drops() {
    let kv = MemoryStore::new();
    let today = d(2024, 3, 20);
    let mut session = Session::open(&kv, today);
    session.set_budget(dec(500)).unwrap();
    let id = session
        .add_transaction(new_tx(600, TxType::Expense, d(2024, 3, 5)))
        .unwrap();
    session.add_transaction(new_tx(2000, TxType::Income, d(2024, 3, 1))).unwrap();
    assert_eq!(session.check_alerts(at(today)).unwrap().len(), 1);

    session.remove_transaction(id).unwrap();
    assert!(session.check_alerts(at(today)).unwrap().is_empty());
    assert_eq!(kv.raw(KEY_BUDGET_ALERT_SHOWN).as_deref(), Some("false"));

    session
        .add_transaction(new_tx(700, TxType::Expense, d(2024, 3, 6)))
        .unwrap();
    assert_eq!(session.check_alerts(at(today)).unwrap().len(), 1);
    assert_eq!(session.notifications().len(), 2);
}

#[test]
fn budget_alert_skips_other_months_but_min_balance_does_not() {
    let kv = MemoryStore::new();
    let today = d(2024, 3, 20);
    let mut session = Session::open(&kv, today);
    session.set_budget(dec(100)).unwrap();
    session.set_min_balance(dec(50)).unwrap();
    session.add_transaction(new_tx(400, TxType::Expense, d(2024, 2, 10))).unwrap();

    session.step_summary(-1);
    assert_eq!(session.summary_anchor(), d(2024, 2, 20));
    let fired = session.check_alerts(at(today)).unwrap();
    assert_eq!(
        fired,
        vec!["Balance below minimum! Current: ₹-400, Minimum: ₹50".to_string()]
    );
    assert_eq!(kv.raw(KEY_BUDGET_ALERT_SHOWN), None);
    assert_eq!(kv.raw(KEY_MIN_BALANCE_ALERT_SHOWN).as_deref(), Some("true"));
}

#[test]
fn notifications_are_newest_first_and_deletable() {
    let kv = MemoryStore::new();
    let today = d(2024, 3, 20);
    let mut session = Session::open(&kv, today);
    session.push_notification("first".into(), at(today)).unwrap();
    session.push_notification("second".into(), at(today)).unwrap();
    assert_eq!(session.notifications()[0].text, "second");
    assert_eq!(session.notifications()[0].time, "2024-03-20 12:00:00");

    assert!(!session.delete_notification(5).unwrap());
    assert!(session.delete_notification(0).unwrap());
    assert_eq!(session.notifications().len(), 1);
    assert_eq!(session.notifications()[0].text, "first");
}

#[test]
fn render_builds_all_series() {
    let kv = MemoryStore::new();
    let today = d(2024, 1, 3);
    let mut session = Session::open(&kv, today);
    session.set_min_balance(dec(1000)).unwrap();
    session.add_transaction(new_tx(500, TxType::Income, d(2024, 1, 1))).unwrap();
    session.add_transaction(new_tx(20, TxType::Expense, d(2024, 1, 2))).unwrap();
    session.add_transaction(new_tx(30, TxType::Expense, d(2024, 1, 28))).unwrap();

    let dash = session.render();
    assert_eq!(dash.period, "January 2024");
    assert_eq!(dash.pie.get("General"), Some(dec(50)));
    assert_eq!(dash.bar, dash.pie);
    assert_eq!(dash.balance.labels, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    assert_eq!(dash.balance.values, vec![dec(500), dec(480), dec(480)]);
    assert_eq!(dash.total_balance, dec(450));
    assert!(dash.balance_low);
}

#[test]
fn render_saturates_instead_of_overflowing() {
    let kv = MemoryStore::new();
    let today = d(2024, 1, 3);
    let mut session = Session::open(&kv, today);
    for _ in 0..2 {
        session
            .add_transaction(NewTransaction {
                desc: "huge".into(),
                amount: Decimal::MAX,
                r#type: TxType::Expense,
                category: "General".into(),
                date: d(2024, 1, 2),
            })
            .unwrap();
    }
    session
        .add_transaction(NewTransaction {
            desc: "huge income".into(),
            amount: Decimal::MAX,
            r#type: TxType::Income,
            category: "Job".into(),
            date: d(2024, 1, 1),
        })
        .unwrap();

    let dash = session.render();
    assert_eq!(dash.pie.get("General"), Some(Decimal::MAX));
    assert_eq!(dash.summary.expense, Decimal::MAX);
    assert_eq!(dash.summary.income, Decimal::MAX);
    assert_eq!(dash.balance.len(), 31);
    assert_eq!(dash.balance.values[0], Decimal::MAX);
    assert_eq!(dash.total_balance, Decimal::ZERO);
    assert!(session.check_alerts(at(today)).is_ok());
}
