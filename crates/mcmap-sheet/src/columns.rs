//! Header resolution and the typed per-row accessor.
//!
//! The header row is resolved once into a [`ColumnMap`]; each data row is
//! then read into a [`SheetRow`] whose fields are all optional. Nothing
//! downstream looks cells up by name.

use std::collections::HashMap;

use mcmap_core::fold;
use serde::{Serialize, Serializer};

use crate::types::RawRecord;

/// Every column the dashboard understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    City,
    Region,
    Department,
    Type,
    Status,
    Revenue,
    Latitude,
    Longitude,
    Services,
    CrmLink,
    VisitScheduled,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::Name,
        Column::City,
        Column::Region,
        Column::Department,
        Column::Type,
        Column::Status,
        Column::Revenue,
        Column::Latitude,
        Column::Longitude,
        Column::Services,
        Column::CrmLink,
        Column::VisitScheduled,
    ];

    /// Header as it appears in the sheet.
    #[must_use]
    pub fn header(self) -> &'static str {
        self.aliases()[0]
    }

    /// Accepted headers, preferred spelling first.
    ///
    /// Older sheet revisions titled the name column just `Nom`.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::Name => &["Nom Établissement", "Nom"],
            Column::City => &["Ville"],
            Column::Region => &["Région"],
            Column::Department => &["Département"],
            Column::Type => &["Type"],
            Column::Status => &["Statut"],
            Column::Revenue => &["CA"],
            Column::Latitude => &["Latitude"],
            Column::Longitude => &["Longitude"],
            Column::Services => &["Services"],
            Column::CrmLink => &["Lien HubSpot"],
            Column::VisitScheduled => &["Visite prévue"],
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

impl Serialize for Column {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.header())
    }
}

/// Which header index each known column lives at.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    indices: HashMap<Column, usize>,
    headers: Vec<String>,
}

/// Columns found and missing, for troubleshooting a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnReport {
    /// Every header of the sheet, trimmed, in sheet order.
    pub detected: Vec<String>,
    /// Known columns the sheet does not provide.
    pub missing: Vec<Column>,
}

impl ColumnMap {
    /// Resolve known columns against a header row.
    ///
    /// Headers are trimmed, then compared ignoring case and accents, so
    /// `"Region "` finds [`Column::Region`]. For each column the preferred
    /// alias wins, and among equal headers the leftmost one.
    #[must_use]
    pub fn detect(headers: &[String]) -> Self {
        let folded: Vec<String> = headers.iter().map(|h| fold(h)).collect();
        let mut indices = HashMap::new();

        for column in Column::ALL {
            let found = column.aliases().iter().find_map(|alias| {
                let wanted = fold(alias);
                folded.iter().position(|h| *h == wanted)
            });
            if let Some(index) = found {
                indices.insert(column, index);
            }
        }

        Self {
            indices,
            headers: headers.iter().map(|h| h.trim().to_string()).collect(),
        }
    }

    #[must_use]
    pub fn index(&self, column: Column) -> Option<usize> {
        self.indices.get(&column).copied()
    }

    #[must_use]
    pub fn has(&self, column: Column) -> bool {
        self.indices.contains_key(&column)
    }

    #[must_use]
    pub fn report(&self) -> ColumnReport {
        ColumnReport {
            detected: self.headers.clone(),
            missing: Column::ALL
                .into_iter()
                .filter(|c| !self.has(*c))
                .collect(),
        }
    }
}

/// One data row with every known column optional.
///
/// Cells are trimmed; blank cells and absent columns are both `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetRow {
    pub name: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub department: Option<String>,
    pub establishment_type: Option<String>,
    pub status: Option<String>,
    pub revenue: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub services: Option<String>,
    pub crm_link: Option<String>,
    pub visit_scheduled: Option<String>,
}

impl SheetRow {
    #[must_use]
    pub fn from_record(map: &ColumnMap, record: &RawRecord<'_>) -> Self {
        let read = |column: Column| -> Option<String> {
            map.index(column)
                .and_then(|i| record.cell(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        Self {
            name: read(Column::Name),
            city: read(Column::City),
            region: read(Column::Region),
            department: read(Column::Department),
            establishment_type: read(Column::Type),
            status: read(Column::Status),
            revenue: read(Column::Revenue),
            latitude: read(Column::Latitude),
            longitude: read(Column::Longitude),
            services: read(Column::Services),
            crm_link: read(Column::CrmLink),
            visit_scheduled: read(Column::VisitScheduled),
        }
    }
}
