// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::announce_alerts;
use crate::session::Session;
use crate::storage::KvStore;
use crate::utils::{fmt_money, parse_decimal, pretty_table, required};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

pub fn handle<S: KvStore>(session: &mut Session<S>, m: &clap::ArgMatches) -> Result<()> {
    handle_at(session, m, Local::now().naive_local())
}

pub fn handle_at<S: KvStore>(
    session: &mut Session<S>,
    m: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            // negative limits are stored as given; they can never trip the alert
            let amount = parse_decimal(required(sub, "amount")?)?;
            session.set_budget(amount).context("Failed to save budget")?;
            println!("Monthly budget set to {}", fmt_money(&amount));
            announce_alerts(session, now)?;
        }
        Some(("min-balance", sub)) => {
            let amount = parse_decimal(required(sub, "amount")?)?;
            session
                .set_min_balance(amount)
                .context("Failed to save minimum balance")?;
            println!("Minimum balance set to {}", fmt_money(&amount));
            announce_alerts(session, now)?;
        }
        Some(("show", _)) => {
            let settings = session.settings();
            println!(
                "{}",
                pretty_table(
                    &["Budget", "Minimum Balance"],
                    vec![vec![
                        fmt_money(&settings.budget),
                        fmt_money(&settings.min_balance)
                    ]],
                )
            );
        }
        _ => {}
    }
    Ok(())
}
