use super::{A1Range, InsertDataOption, SpreadsheetId, ValueInputOption, ValueRange};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tower_api_client::{Method, Request, RequestData};

// Requests

/// `POST /spreadsheets/{id}/values/{range}:append`
#[derive(Debug, Clone, Serialize)]
pub struct AppendValues {
    #[serde(skip)]
    spreadsheet_id: SpreadsheetId,
    #[serde(skip)]
    range: A1Range,
    #[serde(skip)]
    value_input_option: ValueInputOption,
    #[serde(skip)]
    insert_data_option: InsertDataOption,
    body: ValueRange,
}

impl AppendValues {
    pub fn new<R>(spreadsheet_id: SpreadsheetId, range: R, rows: Vec<Vec<String>>) -> Self
    where
        R: Into<A1Range>,
    {
        Self {
            spreadsheet_id,
            range: range.into(),
            value_input_option: ValueInputOption::default(),
            insert_data_option: InsertDataOption::default(),
            body: ValueRange::rows(rows),
        }
    }

    pub fn value_input_option(mut self, option: ValueInputOption) -> Self {
        self.value_input_option = option;
        self
    }

    pub fn insert_data_option(mut self, option: InsertDataOption) -> Self {
        self.insert_data_option = option;
        self
    }
}

impl Request for AppendValues {
    type Data = ValueRange;
    type Response = AppendValuesResponse;
    const METHOD: Method = Method::POST;

    fn endpoint(&self) -> Cow<'_, str> {
        format!(
            "/spreadsheets/{}/values/{}:append?valueInputOption={}&insertDataOption={}",
            self.spreadsheet_id,
            self.range.encoded(),
            self.value_input_option,
            self.insert_data_option
        )
        .into()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(&self.body)
    }
}

// Responses

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppendValuesResponse {
    pub spreadsheet_id: Option<String>,
    pub table_range: Option<String>,
    pub updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateValuesResponse {
    pub spreadsheet_id: Option<String>,
    pub updated_range: Option<String>,
    pub updated_rows: Option<u32>,
    pub updated_columns: Option<u32>,
    pub updated_cells: Option<u32>,
}
