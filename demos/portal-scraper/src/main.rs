//! Portal Scraper Example
//!
//! Demonstrates triage dispatching the responses of a web portal export,
//! which may come back as a CSV file, a login page, a form with validation
//! errors, or a maintenance page.

// Example-specific lint allowances
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

use std::fmt;

use bytes::Bytes;
use triage::prelude::*;

// ============================================================================
// Domain Types
// ============================================================================

/// One line of the transaction export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: String,
    pub label: String,
    pub amount_cents: i64,
}

/// Errors raised by recognized-but-unacceptable portal pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// The session expired and the portal served its login page.
    LoginRequired,
    /// The export form came back with validation messages.
    InvalidRequest(Vec<String>),
    /// The export claimed to be CSV but could not be read.
    MalformedExport(String),
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoginRequired => write!(f, "login required"),
            Self::InvalidRequest(messages) => write!(f, "invalid request: {}", messages.join("; ")),
            Self::MalformedExport(message) => write!(f, "malformed export: {message}"),
        }
    }
}

impl std::error::Error for PortalError {}

impl From<triage::Error> for PortalError {
    fn from(err: triage::Error) -> Self {
        Self::MalformedExport(err.to_string())
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Parses the `date,label,amount` CSV export.
#[derive(FromResponse)]
pub struct CsvExportHandler {
    response: Arc<Response>,
}

impl Handler for CsvExportHandler {
    type Output = Vec<Transaction>;
    type Error = PortalError;

    fn handle(&self) -> Outcome<Self::Output, Self::Error> {
        self.decline_unless(self.response.content_type().as_deref() == Some("text/csv"))?;

        let text = self.response.text().map_err(|e| self.fail(e))?;
        text.lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(|line| parse_line(line).map_err(Rejection::Failed))
            .collect()
    }
}

fn parse_line(line: &str) -> std::result::Result<Transaction, PortalError> {
    let mut fields = line.split(',');
    let (Some(date), Some(label), Some(amount), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(PortalError::MalformedExport(format!("unexpected line {line:?}")));
    };
    let amount_cents = amount
        .trim()
        .parse()
        .map_err(|_| PortalError::MalformedExport(format!("bad amount {amount:?}")))?;

    Ok(Transaction {
        date: date.trim().to_string(),
        label: label.trim().to_string(),
        amount_cents,
    })
}

#[derive(Debug, Deserialize)]
struct ExportForm {
    #[serde(default)]
    error: Vec<String>,
}

/// Recognizes the export form echoed back with validation errors.
#[derive(FromResponse)]
pub struct ExportFormHandler {
    response: Arc<Response>,
}

impl Handler for ExportFormHandler {
    type Output = Vec<Transaction>;
    type Error = PortalError;

    fn handle(&self) -> Outcome<Self::Output, Self::Error> {
        self.decline_unless(self.response.is_form())?;

        let form: ExportForm = self.response.form().map_err(|e| self.fail(e))?;
        Err(self.fail(PortalError::InvalidRequest(form.error)))
    }
}

/// Recognizes the portal login page, served whenever the session expired.
#[derive(FromResponse)]
pub struct LoginPageHandler {
    response: Arc<Response>,
}

impl Handler for LoginPageHandler {
    type Output = Vec<Transaction>;
    type Error = PortalError;

    fn handle(&self) -> Outcome<Self::Output, Self::Error> {
        self.decline_unless(self.response.is_html())?;
        let page = self.response.text().map_err(|_| Declined)?;
        self.decline_unless(page.contains(r#"name="password""#))?;

        Err(Rejection::Failed(PortalError::LoginRequired))
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

fn dispatcher() -> triage::Result<Dispatcher<Vec<Transaction>, PortalError>> {
    let mut registry = HandlerRegistry::new();
    registry
        .register::<CsvExportHandler>("portal::csv")?
        .register::<ExportFormHandler>("portal::form")?
        .register::<LoginPageHandler>("portal::login_page")?;

    let config = DispatcherConfig::builder()
        .namespace("portal")
        .default_handler("login_page")
        .build()?;

    Dispatcher::builder(Arc::new(registry))
        .config(config)
        .with_logging()
        .build()
}

fn canned(content_type: &str, body: &'static str) -> http::Result<Response> {
    let response = http::Response::builder()
        .status(200)
        .header(triage::header::CONTENT_TYPE, content_type)
        .body(Bytes::from_static(body.as_bytes()))?;

    Ok(Response::from(response))
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let dispatcher = dispatcher()?;

    let responses = [
        (
            "CSV export",
            canned(
                "text/csv; charset=utf-8",
                "date,label,amount\n2024-03-01,Coffee,-350\n2024-03-02,Salary,250000\n",
            )?,
        ),
        (
            "validation errors",
            canned(
                "application/x-www-form-urlencoded",
                "from=2024-03-01&error=end+date+is+before+start+date",
            )?,
        ),
        (
            "expired session",
            canned(
                "text/html",
                r#"<form method="post"><input name="password" type="password"></form>"#,
            )?,
        ),
        (
            "maintenance page",
            canned("text/html", "<h1>Back in 5 minutes</h1>")?,
        ),
    ];

    for (name, response) in responses {
        println!("\n=== {name} ===");
        match dispatcher.handle(response, ["csv", "form"]) {
            Ok(transactions) => {
                for transaction in transactions {
                    println!(
                        "{} {:<10} {:>8}",
                        transaction.date, transaction.label, transaction.amount_cents
                    );
                }
            }
            Err(DispatchError::Handler(err)) => println!("Portal error: {err}"),
            Err(DispatchError::Unrecognized(err)) => println!("Giving up: {err}"),
            Err(DispatchError::Config(err)) => return Err(err.into()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_export() {
        let dispatcher = dispatcher().expect("dispatcher");
        let response =
            canned("text/csv", "date,label,amount\n2024-03-01,Coffee,-350\n").expect("response");

        let transactions = dispatcher.handle(response, ["csv", "form"]).expect("transactions");

        assert_eq!(
            transactions,
            vec![Transaction {
                date: "2024-03-01".to_string(),
                label: "Coffee".to_string(),
                amount_cents: -350,
            }]
        );
    }

    #[test]
    fn test_bad_amount() {
        let dispatcher = dispatcher().expect("dispatcher");
        let response =
            canned("text/csv", "date,label,amount\n2024-03-01,Coffee,lots\n").expect("response");

        let result = dispatcher.handle(response, ["csv"]);

        assert!(matches!(
            result,
            Err(DispatchError::Handler(PortalError::MalformedExport(_)))
        ));
    }

    #[test]
    fn test_login_page_from_defaults() {
        let dispatcher = dispatcher().expect("dispatcher");
        let response = canned("text/html", r#"<input name="password">"#).expect("response");

        let result = dispatcher.handle(response, ["csv", "form"]);

        assert!(matches!(
            result,
            Err(DispatchError::Handler(PortalError::LoginRequired))
        ));
    }

    #[test]
    fn test_invalid_canned_header() {
        assert!(canned("text/\ncsv", "").is_err());
    }

    #[test]
    fn test_maintenance_page() {
        let dispatcher = dispatcher().expect("dispatcher");
        let response = canned("text/html", "<h1>Back soon</h1>").expect("response");

        let result = dispatcher.handle(response, ["csv", "form"]);

        let Err(DispatchError::Unrecognized(err)) = result else {
            panic!("expected an unrecognized response");
        };
        assert_eq!(err.response().status(), 200);
    }
}
