use crate::errors::AppError;
use crate::models::{PlotQuery, QualityOptionsResponse, RecordsResponse};
use crate::plot::{build_plot, PlotSpec};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}

pub async fn get_qualities(State(state): State<AppState>) -> Json<QualityOptionsResponse> {
    let options = state.dataset.quality_options();
    Json(QualityOptionsResponse {
        default: options.first().copied(),
        options,
    })
}

pub async fn get_plot(
    State(state): State<AppState>,
    Query(query): Query<PlotQuery>,
) -> Result<Json<PlotSpec>, AppError> {
    let selection = match query.quality.as_deref().map(str::trim) {
        None | Some("") => state.dataset.default_selection(),
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| AppError::bad_request("quality must be an integer"))?,
        ),
    };

    let plot = build_plot(&state.dataset, selection);
    debug!(?selection, points = plot.points.len(), "built plot");
    Ok(Json(plot))
}

pub async fn get_records(State(state): State<AppState>) -> Json<RecordsResponse> {
    Json(RecordsResponse {
        total_rows: state.dataset.raw_count(),
        records: state.dataset.records().to_vec(),
    })
}
