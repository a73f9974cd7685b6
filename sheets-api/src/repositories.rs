use crate::endpoints::{A1Range, SpreadsheetId, values::AppendValues};

#[derive(Default)]
pub struct ValuesRepository {
    spreadsheet_id: SpreadsheetId,
}

impl ValuesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spreadsheet<T>(mut self, spreadsheet_id: T) -> Self
    where
        T: Into<SpreadsheetId>,
    {
        self.spreadsheet_id = spreadsheet_id.into();
        self
    }

    pub fn append<R>(&self, range: R, rows: Vec<Vec<String>>) -> AppendValues
    where
        R: Into<A1Range>,
    {
        AppendValues::new(self.spreadsheet_id.clone(), range, rows)
    }
}
