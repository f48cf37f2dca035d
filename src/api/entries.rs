//! Report endpoints over the last refresh

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    config::split_libraries,
    error::{AppError, AppResult},
    models::{CatalogEntry, ExtractionFailure, Holding, LibraryGroup, RefreshSummary},
    services::filters::{self, FilterOptions},
    AppState,
};

/// Entry ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntrySort {
    /// Input file order
    #[default]
    Item,
    Title,
}

/// Filter query shared by the report endpoints
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    /// Include copies that cannot be borrowed
    pub all: Option<bool>,
    /// Hide items without any remaining copy
    pub only_available: Option<bool>,
    /// Comma-separated library names to keep
    pub bib: Option<String>,
    /// Entry ordering (entries endpoint only)
    pub sort: Option<EntrySort>,
}

impl ReportQuery {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            keep_unborrowable: self.all.unwrap_or(false),
            only_available: self.only_available.unwrap_or(false),
            libraries: self
                .bib
                .as_deref()
                .map(split_libraries)
                .unwrap_or_default()
                .into_iter()
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LibraryGroupResponse {
    pub library: String,
    pub items: Vec<LibraryItemResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct LibraryItemResponse {
    pub id: String,
    pub title: Option<String>,
    pub catalog_url: Option<String>,
    pub user_description: Option<String>,
    pub holding: Holding,
}

impl From<LibraryGroup<'_>> for LibraryGroupResponse {
    fn from(group: LibraryGroup<'_>) -> Self {
        Self {
            library: group.library,
            items: group
                .items
                .into_iter()
                .map(|item| LibraryItemResponse {
                    id: item.entry.id.clone(),
                    title: item.entry.title.clone(),
                    catalog_url: item.entry.catalog_url.clone(),
                    user_description: item.entry.user_description.clone(),
                    holding: item.holding.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LibrariesResponse {
    /// Configured libraries
    pub mine: Vec<String>,
    /// Libraries seen in the last refresh, configured ones first
    pub libraries: Vec<String>,
}

fn no_report() -> AppError {
    AppError::NotFound("No report available yet, trigger a refresh first".to_string())
}

/// Filtered entries of the last refresh
#[utoipa::path(
    get,
    path = "/entries",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Filtered entries", body = Vec<CatalogEntry>),
        (status = 404, description = "No refresh has completed yet")
    )
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let options = query.filter_options();
    let mut entries = state
        .services
        .refresh
        .with_state(|s| filters::filter_entries(s.entries.iter().cloned(), &options))
        .await
        .ok_or_else(no_report)?;

    if query.sort.unwrap_or_default() == EntrySort::Title {
        filters::sort_by_title(&mut entries);
    }

    Ok(Json(entries))
}

/// Filtered holdings of the last refresh, grouped by library
#[utoipa::path(
    get,
    path = "/libraries/grouped",
    tag = "reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "Holdings grouped by library", body = Vec<LibraryGroupResponse>),
        (status = 404, description = "No refresh has completed yet")
    )
)]
pub async fn list_by_library(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<LibraryGroupResponse>>> {
    let options = query.filter_options();
    let groups = state
        .services
        .refresh
        .with_state(|s| {
            let entries = filters::filter_entries(s.entries.iter().cloned(), &options);
            filters::group_by_library(&entries)
                .into_iter()
                .map(LibraryGroupResponse::from)
                .collect::<Vec<_>>()
        })
        .await
        .ok_or_else(no_report)?;

    Ok(Json(groups))
}

/// Libraries seen in the last refresh
#[utoipa::path(
    get,
    path = "/libraries",
    tag = "reports",
    responses(
        (status = 200, description = "Library names", body = LibrariesResponse)
    )
)]
pub async fn list_libraries(State(state): State<AppState>) -> Json<LibrariesResponse> {
    Json(LibrariesResponse {
        mine: state.config.catalog.my_libraries(),
        libraries: state.services.refresh.libraries().await,
    })
}

/// Identifiers that failed in the last refresh
#[utoipa::path(
    get,
    path = "/failures",
    tag = "reports",
    responses(
        (status = 200, description = "Failed identifiers with reasons", body = Vec<ExtractionFailure>),
        (status = 404, description = "No refresh has completed yet")
    )
)]
pub async fn list_failures(State(state): State<AppState>) -> AppResult<Json<Vec<ExtractionFailure>>> {
    let failures = state
        .services
        .refresh
        .with_state(|s| s.failures.clone())
        .await
        .ok_or_else(no_report)?;
    Ok(Json(failures))
}

/// Re-extract every identifier of the input file
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "reports",
    responses(
        (status = 200, description = "Refresh completed", body = RefreshSummary),
        (status = 404, description = "Input file missing")
    )
)]
pub async fn refresh(State(state): State<AppState>) -> AppResult<Json<RefreshSummary>> {
    let summary = state.services.refresh.refresh().await?;
    Ok(Json(summary))
}
