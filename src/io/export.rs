use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{SplitService, Summary};
use crate::domain::{Friend, format_cents};

/// Point-in-time view of the session for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub currency: String,
    pub friends: Vec<Friend>,
    pub summary: Summary,
}

/// Exporter for rendering the ledger in machine-readable formats
pub struct Exporter<'a> {
    service: &'a SplitService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a SplitService) -> Self {
        Self { service }
    }

    /// Export balances to CSV format
    pub fn export_balances_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "name", "image", "balance", "status"])?;

        let mut count = 0;
        for friend in self.service.friends() {
            csv_writer.write_record([
                friend.id.to_string().as_str(),
                friend.name.as_str(),
                friend.image.as_str(),
                format_cents(friend.balance).as_str(),
                friend.status().as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the whole session as a JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            currency: self.service.currency().to_string(),
            friends: self.service.friends().to_vec(),
            summary: self.service.summary(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(snapshot)
    }
}
