use secrecy::SecretString;
use sheets_api::{Client, Request, SheetsApiError};

#[tokio::main]
pub async fn main() -> Result<(), SheetsApiError> {
    let client = Client::new(&SecretString::from("access_token".to_string()));

    let req = Request::values()
        .with_spreadsheet("spreadsheet_id")
        .append("Sheet1!A:C", vec![vec!["Asha".into(), "9123456789".into()]]);

    let _res = client.send(req).await?;
    Ok(())
}
