use crate::dataset::AggregatedRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PlotQuery {
    pub quality: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QualityOptionsResponse {
    pub options: Vec<i64>,
    pub default: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub total_rows: usize,
    pub records: Vec<AggregatedRecord>,
}
