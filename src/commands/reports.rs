// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ChartKind, Granularity};
use crate::render::{chart_payload, chart_table};
use crate::session::{ChartGranularities, Session};
use crate::storage::KvStore;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

pub fn handle<S: KvStore>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    let now = Local::now().naive_local();
    match m.subcommand() {
        Some(("summary", sub)) => summary(session, sub, now)?,
        Some(("charts", sub)) => charts(session, sub)?,
        Some(("trend", sub)) => trend(session, sub)?,
        _ => {}
    }
    Ok(())
}

fn granularity(sub: &clap::ArgMatches, id: &str) -> Result<Granularity> {
    match sub.get_one::<String>(id) {
        Some(s) => s.parse(),
        None => Ok(Granularity::default()),
    }
}

fn step(sub: &clap::ArgMatches) -> i32 {
    sub.get_one::<i32>("step").copied().unwrap_or(0)
}

pub fn summary<S: KvStore>(
    session: &mut Session<S>,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    if let Some(month) = sub.get_one::<String>("month") {
        session.set_summary_month(parse_month(month)?);
    }
    session.step_summary(step(sub));

    let alerts = session
        .check_alerts(now)
        .context("Failed to save alert state")?;
    let dash = session.render();

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &dash)? {
        println!("{}", dash.summary_month);
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&dash.summary.income)],
            vec!["Expense".to_string(), fmt_money(&dash.summary.expense)],
            vec!["Balance".to_string(), fmt_money(&dash.summary.balance)],
            vec!["Budget".to_string(), fmt_money(&dash.settings.budget)],
            vec![
                "Minimum Balance".to_string(),
                fmt_money(&dash.settings.min_balance),
            ],
            vec![
                "Total Balance".to_string(),
                format!(
                    "{} ({})",
                    fmt_money(&dash.total_balance),
                    if dash.balance_low { "low" } else { "ok" }
                ),
            ],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    for alert in alerts {
        eprintln!("⚠ {}", alert);
    }
    Ok(())
}

/// Re-evaluates alerts after a change and prints any that fired.
pub fn announce_alerts<S: KvStore>(session: &mut Session<S>, now: NaiveDateTime) -> Result<()> {
    let alerts = session
        .check_alerts(now)
        .context("Failed to save alert state")?;
    for alert in alerts {
        eprintln!("⚠ {}", alert);
    }
    Ok(())
}

pub fn charts<S: KvStore>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(anchor) = sub.get_one::<String>("anchor") {
        session.set_chart_anchor(parse_date(anchor)?);
    }
    session.set_chart_granularities(ChartGranularities {
        pie: granularity(sub, "pie")?,
        bar: granularity(sub, "bar")?,
        balance: granularity(sub, "balance")?,
    });
    session.step_charts(step(sub));

    let dash = session.render();
    let payloads = vec![
        chart_payload(ChartKind::Pie, "Expenses by category", &dash.pie),
        chart_payload(ChartKind::Bar, "Expense", &dash.bar),
        chart_payload(ChartKind::Line, "Total Balance", &dash.balance),
    ];
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payloads)? {
        println!("{}", dash.period);
        for p in &payloads {
            let data = match p.kind {
                ChartKind::Pie => &dash.pie,
                ChartKind::Bar => &dash.bar,
                ChartKind::Line => &dash.balance,
            };
            println!("{}", chart_table(p.kind, p.title, data));
        }
    }
    Ok(())
}

pub fn trend<S: KvStore>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let by = granularity(sub, "by")?;
    let data = session.trend(by);
    let title = format!("{} expense", by);
    let payload = chart_payload(ChartKind::Line, &title, &data);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        println!("{}", chart_table(ChartKind::Line, &title, &data));
    }
    Ok(())
}
