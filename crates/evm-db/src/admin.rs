//! One-off administrative operations
//!
//! Each operation runs in its own transaction. A transaction that is dropped
//! without commit rolls back, so any error leaves the tables untouched.

use crate::{CREATE_PARTIES, Database, Result};
use log::info;
use rusqlite::params;
use serde::{Deserialize, Serialize};

/// A voter row to insert; always starts out as not voted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVoter {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

impl NewVoter {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParty {
    pub id: i64,
    pub name: String,
}

/// Rows touched by [`Database::reset_votes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub parties: usize,
    pub voters: usize,
}

impl Database {
    /// Insert one voter. A duplicate id fails with a constraint violation.
    pub fn add_voter(&mut self, voter: &NewVoter) -> Result<()> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute(
            "INSERT INTO voters (id, name, image_url, has_voted) VALUES (?1, ?2, ?3, 0)",
            params![voter.id, voter.name, voter.image_url],
        )?;
        tx.commit()?;
        info!("Added new voter: ID={}, Name={}", voter.id, voter.name);
        Ok(())
    }

    /// Insert voters, skipping ids that already exist. Returns rows inserted.
    pub fn populate_voters(&mut self, voters: &[NewVoter]) -> Result<usize> {
        let tx = self.conn_mut()?.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO voters (id, name, image_url, has_voted) VALUES (?1, ?2, ?3, 0)",
            )?;
            for voter in voters {
                inserted += stmt.execute(params![voter.id, voter.name, voter.image_url])?;
            }
        }
        tx.commit()?;
        info!(
            "{} of {} voters inserted, the rest already existed",
            inserted,
            voters.len()
        );
        Ok(inserted)
    }

    /// Create the parties table if needed and insert parties, skipping
    /// names that already exist. Returns rows inserted.
    pub fn populate_parties(&mut self, parties: &[NewParty]) -> Result<usize> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute_batch(CREATE_PARTIES)?;
        let mut inserted = 0;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO parties (id, name, votes) VALUES (?1, ?2, 0)")?;
            for party in parties {
                inserted += stmt.execute(params![party.id, party.name])?;
            }
        }
        tx.commit()?;
        info!(
            "{} of {} parties inserted, the rest already existed",
            inserted,
            parties.len()
        );
        Ok(inserted)
    }

    /// Delete every voter. Returns rows deleted.
    pub fn delete_all_voters(&mut self) -> Result<usize> {
        let tx = self.conn_mut()?.transaction()?;
        let deleted = tx.execute("DELETE FROM voters", [])?;
        tx.commit()?;
        info!("Deleted {deleted} voter(s) from the database");
        Ok(deleted)
    }

    pub fn drop_parties_table(&mut self) -> Result<()> {
        let tx = self.conn_mut()?.transaction()?;
        tx.execute_batch("DROP TABLE IF EXISTS parties")?;
        tx.commit()?;
        info!("Parties table has been deleted");
        Ok(())
    }

    /// Zero every tally and clear every has-voted flag
    pub fn reset_votes(&mut self) -> Result<ResetReport> {
        let tx = self.conn_mut()?.transaction()?;
        let parties = tx.execute("UPDATE parties SET votes = 0", [])?;
        let voters = tx.execute("UPDATE voters SET has_voted = 0", [])?;
        tx.commit()?;
        info!("Reset votes for {parties} parties");
        info!("Reset voting status for {voters} voters");
        Ok(ResetReport { parties, voters })
    }
}
