// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::Session;
use crate::storage::KvStore;
use crate::utils::required;
use anyhow::{Context, Result, bail};
use tracing::debug;

pub fn handle<S: KvStore>(session: &Session<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(session, sub),
        _ => Ok(()),
    }
}

fn export_transactions<S: KvStore>(session: &Session<S>, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.trim().to_lowercase();
    let out = required(sub, "out")?.trim();
    let rows = session.store().all();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Failed to create {}", out))?;
            wtr.write_record(["id", "date", "desc", "amount", "type", "category"])?;
            for t in rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.to_string(),
                    t.desc.clone(),
                    t.amount.to_string(),
                    t.r#type.to_string(),
                    t.category.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(rows)?)
                .with_context(|| format!("Failed to write {}", out))?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    debug!(count = rows.len(), out, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
