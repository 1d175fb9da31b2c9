// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::announce_alerts;
use crate::models::{NewTransaction, Transaction, TransactionPatch, TxType};
use crate::session::Session;
use crate::storage::KvStore;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_date, pretty_table, required,
};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

pub fn handle<S: KvStore>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    handle_at(session, m, Local::now().naive_local())
}

/// Mutations re-check the alerts against `now`, like any other redraw.
pub fn handle_at<S: KvStore>(
    session: &mut Session<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(session, sub)?,
        Some(("edit", sub)) => edit(session, sub)?,
        Some(("rm", sub)) => remove(session, sub)?,
        Some(("list", sub)) => return list(session, sub),
        _ => return Ok(()),
    }
    announce_alerts(session, now)
}

pub fn parse_new(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    Ok(NewTransaction {
        desc: required(sub, "desc")?.trim().to_string(),
        amount: parse_amount(required(sub, "amount")?)?,
        r#type: required(sub, "type")?.parse::<TxType>()?,
        category: required(sub, "category")?.trim().to_string(),
        date: parse_date(required(sub, "date")?)?,
    })
}

pub fn parse_patch(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    let text = |id: &str| sub.get_one::<String>(id).map(|s| s.trim().to_string());
    Ok(TransactionPatch {
        desc: text("desc"),
        amount: text("amount").map(|s| parse_amount(&s)).transpose()?,
        r#type: text("type").map(|s| s.parse::<TxType>()).transpose()?,
        category: text("category"),
        date: text("date").map(|s| parse_date(&s)).transpose()?,
    })
}

fn add<S: KvStore>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let record = parse_new(sub)?;
    let summary = format!(
        "{} {} '{}' ({}) on {}",
        record.r#type,
        fmt_money(&record.amount),
        record.desc,
        record.category,
        record.date
    );
    let id = session
        .add_transaction(record)
        .context("Failed to save transactions")?;
    println!("Recorded {} [id {}]", summary, id);
    Ok(())
}

fn edit<S: KvStore>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    let patch = parse_patch(sub)?;
    if session
        .update_transaction(id, patch)
        .context("Failed to save transactions")?
    {
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn remove<S: KvStore>(session: &mut Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    if session
        .remove_transaction(id)
        .context("Failed to save transactions")?
    {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn list<S: KvStore>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data: Vec<&Transaction> = session.store().newest_first();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    t.desc.clone(),
                    t.category.clone(),
                    t.r#type.to_string(),
                    fmt_money(&t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Category", "Type", "Amount"], rows)
        );
    }
    Ok(())
}
