//! Workbooks: ordered collections of named tables.

use crate::table::Table;
use serde::{Deserialize, Serialize};

/// A named worksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name as it appears in the document.
    pub name: String,
    /// Parsed sheet contents.
    pub table: Table,
}

/// An ordered mapping from sheet name to [`Table`].
///
/// Sheet order follows the source document. Names are unique; inserting a
/// sheet with an existing name replaces it in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Creates an empty workbook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sheet, replacing any sheet with the same name.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        let name = name.into();
        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(sheet) => sheet.table = table,
            None => self.sheets.push(Sheet { name, table }),
        }
    }

    /// Adds a sheet, builder style.
    #[must_use]
    pub fn with_sheet(mut self, name: impl Into<String>, table: Table) -> Self {
        self.insert(name, table);
        self
    }

    /// Looks up a sheet by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.table)
    }

    /// Looks up a sheet by case-insensitive name, returning the stored name too.
    #[must_use]
    pub fn get_ignore_case(&self, name: &str) -> Option<(&str, &Table)> {
        self.sheets
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| (s.name.as_str(), &s.table))
    }

    /// Returns sheet names in document order.
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Iterates sheets in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Returns the number of sheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns true if there are no sheets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl FromIterator<(String, Table)> for Workbook {
    fn from_iter<I: IntoIterator<Item = (String, Table)>>(iter: I) -> Self {
        let mut workbook = Self::new();
        for (name, table) in iter {
            workbook.insert(name, table);
        }
        workbook
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let wb = Workbook::new()
            .with_sheet("Meta", Table::new(["Template"]))
            .with_sheet("PortfolioMaster", Table::new(["Asset Class"]));

        assert_eq!(wb.sheet_names(), vec!["Meta", "PortfolioMaster"]);
        assert!(wb.get("PortfolioMaster").is_some());
        assert!(wb.get("portfoliomaster").is_none());

        let (name, _) = wb.get_ignore_case("portfoliomaster").unwrap();
        assert_eq!(name, "PortfolioMaster");
    }

    #[test]
    fn test_insert_replaces() {
        let mut wb = Workbook::new();
        wb.insert("Policy", Table::new(["A"]));
        wb.insert("Policy", Table::new(["B"]));
        assert_eq!(wb.len(), 1);
        assert_eq!(wb.get("Policy").unwrap().columns(), &["B".to_string()]);
    }
}
