//! JSON response envelope shared by every endpoint
//!
//! Successful responses wrap their payload in `data` next to a
//! `responseMetadata` block carrying status, CRUD row counts and pagination.
//! Failed responses may carry only the metadata block, with a human-readable
//! message at `responseMetadata.responseStatusInfo.errMsg`.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PER_PAGE};

/// Successful response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
}

/// Metadata block attached to every response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_status_info: Option<ResponseStatusInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_crud_info: Option<ResponseCrudInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_page_info: Option<ResponsePageInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStatusInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err_msg: Option<String>,
}

/// Rows touched by a create/update/delete/restore call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponseCrudInfo {
    pub inserted_rows_count: u64,
    pub updated_rows_count: u64,
    pub deleted_rows_count: u64,
    pub restored_rows_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsePageInfo {
    pub total_items: u64,
    pub total_pages: u32,
    pub page_number: u32,
    pub per_page: u32,
}

impl<T> ApiResponse<T> {
    /// Payload, if the server sent one
    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn page_info(&self) -> Option<&ResponsePageInfo> {
        self.response_metadata.response_page_info.as_ref()
    }

    pub fn crud_info(&self) -> Option<&ResponseCrudInfo> {
        self.response_metadata.response_crud_info.as_ref()
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// List payload; an absent `data` field reads as an empty list
    pub fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

/// Body of a failed response, decoded only for its error message
///
/// Only the path to `errMsg` is modelled; sibling metadata (row counts,
/// paging) is ignored so a malformed count never hides the message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    #[serde(default)]
    response_metadata: Option<ErrorMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorMetadata {
    #[serde(default)]
    response_status_info: Option<ResponseStatusInfo>,
}

impl ErrorEnvelope {
    /// Decode an error body; anything that is not the envelope shape yields
    /// `None`
    pub fn from_slice(body: &[u8]) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        serde_json::from_slice(body).ok()
    }

    /// Non-blank server-provided message
    pub fn err_msg(&self) -> Option<&str> {
        self.response_metadata
            .as_ref()?
            .response_status_info
            .as_ref()?
            .err_msg
            .as_deref()
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

crate::impl_wire_enum_conversions!(SortDirection {
    Asc => "asc",
    Desc => "desc",
});

/// Pagination and sorting for list endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<SortDirection>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PER_PAGE,
            sort_column: None,
            sort_direction: None,
        }
    }
}

impl PageRequest {
    pub fn page(page_number: u32, per_page: u32) -> Self {
        Self { page_number: page_number.max(1), per_page: per_page.max(1), ..Self::default() }
    }

    #[must_use]
    pub fn sorted_by(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_column = Some(column.into());
        self.sort_direction = Some(direction);
        self
    }

    /// Render as query parameters in the order the server documents them
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("pageNumber".to_string(), self.page_number.to_string()),
            ("perPage".to_string(), self.per_page.to_string()),
        ];
        if let Some(column) = &self.sort_column {
            query.push(("sortColumn".to_string(), column.clone()));
            query.push((
                "sortDirection".to_string(),
                self.sort_direction.unwrap_or_default().to_string(),
            ));
        }
        query
    }
}
