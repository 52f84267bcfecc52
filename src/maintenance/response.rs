//! Maintenance responses, shaped for the kind of client asking.

use serde::Serialize;

use crate::config::MaintenanceMessages;
use crate::request::Request;

/// HTTP status returned while in maintenance.
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// Error code carried by JSON maintenance responses.
pub const MAINTENANCE_JSON_CODE: u32 = 100;

/// Body format of a maintenance response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// Full setup-style HTML page.
    SetupPage,
    /// HTML fragment for the search form loaded over AJAX.
    Html,
    /// SOAP envelope for the SOAP web service.
    Soap,
    /// Plain text for AJAX calls and the REST web service.
    Text,
    /// JSON document for JSON clients.
    Json,
}

impl ResponseFormat {
    /// Pick the format a request expects. The first matching rule wins.
    pub fn select(request: &Request) -> Self {
        if request.uri_ends_with("/pages/ajax.searchform.php") {
            Self::Html
        } else if request.uri_ends_with("/webservices/soapserver.php") {
            Self::Soap
        } else if request.header("X-Combodo-Ajax").is_some()
            || request.uri_ends_with("/webservices/rest.php")
        {
            Self::Text
        } else if request.content_type() == Some("application/json") {
            Self::Json
        } else {
            Self::SetupPage
        }
    }

    /// MIME type of the body.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::SetupPage | Self::Html => "text/html; charset=utf-8",
            Self::Soap => "text/xml; charset=utf-8",
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

/// A rendered maintenance response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaintenanceResponse {
    pub status: u16,
    pub format: ResponseFormat,
    pub content_type: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl MaintenanceResponse {
    /// Render `messages` in `format`.
    pub fn render(format: ResponseFormat, messages: &MaintenanceMessages) -> Self {
        let mut headers = Vec::new();
        let body = match format {
            ResponseFormat::Text => messages.message.clone(),
            ResponseFormat::Html => format!(
                "<html><body><div>{}</div></body></html>",
                escape_html(&messages.message)
            ),
            ResponseFormat::SetupPage => setup_page(&messages.title, &messages.message),
            ResponseFormat::Soap => soap_envelope(&messages.message),
            ResponseFormat::Json => {
                headers.push(("Access-Control-Allow-Origin".to_string(), "*".to_string()));
                serde_json::json!({
                    "code": MAINTENANCE_JSON_CODE,
                    "message": messages.message,
                })
                .to_string()
            }
        };

        Self {
            status: SERVICE_UNAVAILABLE,
            format,
            content_type: format.content_type().to_string(),
            headers,
            body,
        }
    }

    /// Render the response a request expects.
    pub fn for_request(request: &Request, messages: &MaintenanceMessages) -> Self {
        Self::render(ResponseFormat::select(request), messages)
    }
}

fn setup_page(title: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<h2>{}</h2>\n</body>\n</html>\n",
        escape_html(title),
        escape_html(message)
    )
}

fn soap_envelope(message: &str) -> String {
    format!(
        r#"<SOAP-ENV:Envelope SOAP-ENV:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/" xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns1="urn:ITop" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:SOAP-ENC="http://schemas.xmlsoap.org/soap/encoding/">
   <SOAP-ENV:Body>
      <ns1:SearchObjectsResponse>
         <SearchObjectsReturn xsi:type="ns1:Result">
            <status xsi:type="xsd:boolean">false</status>
            <result SOAP-ENC:arrayType="ns1:ResultMessage[0]" xsi:type="ns1:ArrayOfResultMessage"/>
            <errors xsi:type="ns1:ResultLog">
               <messages SOAP-ENC:arrayType="ns1:LogMessage[1]" xsi:type="ns1:ArrayOfLogMessage">
                  <item xsi:type="ns1:LogMessage">
                     <text xsi:type="xsd:string">{}</text>
                  </item>
               </messages>
            </errors>
            <warnings xsi:type="ns1:ResultLog">
               <messages SOAP-ENC:arrayType="ns1:LogMessage[0]" xsi:type="ns1:ArrayOfLogMessage"/>
            </warnings>
            <infos xsi:type="ns1:ResultLog">
               <messages SOAP-ENC:arrayType="ns1:LogMessage[0]" xsi:type="ns1:ArrayOfLogMessage"/>
            </infos>
         </SearchObjectsReturn>
      </ns1:SearchObjectsResponse>
   </SOAP-ENV:Body>
</SOAP-ENV:Envelope>
"#,
        escape_html(message)
    )
}

/// Escape text for HTML and XML bodies.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
