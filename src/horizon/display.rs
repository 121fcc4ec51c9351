//! # Tabular display of a parsed report
//!
//! `{}` on an [`EphemerisDocument`] prints a short summary of the header followed by a table
//! of its entries (built with [`comfy-table`]):
//!
//! `# | Epoch (UTC) | RA [deg] | DEC [deg] | Range [AU] | |r| [km]`
//!
//! Use [`EphemerisDocument::table`] to control the precision of the distance columns or to
//! only print the first rows of large reports.
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table

use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};
use itertools::Itertools;

use super::document::EphemerisDocument;
use crate::constants::Radii;

const DEFAULT_DISTANCE_PRECISION: usize = 9;

/// Display adaptor rendering the entries of an [`EphemerisDocument`] as a table.
pub struct EntriesTable<'a> {
    document: &'a EphemerisDocument,
    dist_prec: usize,
    limit: Option<usize>,
}

impl<'a> EntriesTable<'a> {
    /// Fixed-point digits of the range column.
    pub fn with_distance_precision(mut self, p: usize) -> Self {
        self.dist_prec = p;
        self
    }

    /// Only print the first `n` entries.
    pub fn head(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn build(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("#"),
            Cell::new("Epoch (UTC)"),
            Cell::new("RA [deg]"),
            Cell::new("DEC [deg]"),
            Cell::new("Range [AU]"),
            Cell::new("|r| [km]"),
        ]);

        let entries = self.document.entries();
        let shown = self.limit.unwrap_or(entries.len()).min(entries.len());
        let dp = self.dist_prec;

        for (i, entry) in entries.iter().take(shown).enumerate() {
            table.add_row(Row::from(vec![
                Cell::new(i).set_alignment(CellAlignment::Right),
                Cell::new(entry.time_utc).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.6}", entry.right_ascension.to_degrees()))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{:+.6}", entry.declination.to_degrees()))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.*}", dp, entry.range_au))
                    .set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", entry.position_km.norm()))
                    .set_alignment(CellAlignment::Right),
            ]));
        }
        table
    }
}

impl fmt::Display for EntriesTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.build())?;
        let hidden = self.document.entries().len().saturating_sub(
            self.limit.unwrap_or(usize::MAX),
        );
        if hidden > 0 {
            writeln!(f, "... {hidden} more entries")?;
        }
        Ok(())
    }
}

fn fmt_radii(radii: &Radii) -> String {
    radii.iter().map(|r| format!("{r:.3}")).join(" x ")
}

impl EphemerisDocument {
    /// Table adaptor over the entries of this document.
    pub fn table(&self) -> EntriesTable<'_> {
        EntriesTable {
            document: self,
            dist_prec: DEFAULT_DISTANCE_PRECISION,
            limit: None,
        }
    }
}

impl fmt::Display for EphemerisDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = self.header();
        writeln!(f, "Target : {}", header.target_name)?;
        writeln!(f, "Center : {}", header.center_name)?;
        writeln!(f, "Target radii [km] : {}", fmt_radii(&header.target_radii))?;
        writeln!(f, "Center radii [km] : {}", fmt_radii(&header.center_radii))?;
        if let Some(frame) = &header.reference_frame {
            writeln!(f, "Frame  : {frame}")?;
        }
        if let Some(site) = &header.observer_site {
            writeln!(
                f,
                "Site   : {}",
                site.name.as_deref().unwrap_or("unnamed")
            )?;
        }
        writeln!(f, "Rows   : {} (n={})", header.format_kind, self.entries().len())?;
        write!(f, "{}", self.table())
    }
}
