use serde::Serialize;

/// Query string of a `QDL/BCHAIN` datatable request.
#[derive(Clone, Debug, Serialize)]
pub struct DatatableParams<'a> {
    pub code: &'a str,
    pub api_key: &'a str,
    /// Cursor of the next page, as returned in `meta.next_cursor_id`.
    #[serde(rename = "qopts.cursor_id", skip_serializing_if = "Option::is_none")]
    pub cursor_id: Option<&'a str>,
}

impl<'a> DatatableParams<'a> {
    pub fn new(code: &'a str, api_key: &'a str) -> Self {
        Self {
            code,
            api_key,
            cursor_id: None,
        }
    }

    pub fn with_cursor(mut self, cursor_id: Option<&'a str>) -> Self {
        self.cursor_id = cursor_id;
        self
    }
}
