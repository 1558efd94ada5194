use crate::dataset::{AggregatedRecord, Dataset, OCCUPATION};
use serde::Serialize;
use std::{cmp::Ordering, collections::BTreeMap};

pub const MARKER_SIZE: u32 = 10;
pub const Y_AXIS_TITLE: &str = "Sleep Duration, h";
const EMPTY_TITLE: &str = "No data available";

/// Scatter plot description consumed by the page script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotSpec {
    pub title: String,
    pub selection: Option<i64>,
    pub x_axis: CategoryAxis,
    pub y_axis: ValueAxis,
    pub marker_size: u32,
    pub points: Vec<PlotPoint>,
    pub empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAxis {
    pub title: String,
    /// Categories in display order, most frequent first.
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxis {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: String,
    pub y: f64,
    pub hover: Hover,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hover {
    pub occupation: String,
    pub sleep_duration: f64,
    pub count: u64,
}

/// Builds the plot for one dropdown selection.
///
/// `None` means there is nothing to select (the dataset has no rows). A
/// selection that matches no record yields a plot with no points.
pub fn build_plot(dataset: &Dataset, selection: Option<i64>) -> PlotSpec {
    let Some(quality) = selection else {
        return PlotSpec {
            title: EMPTY_TITLE.to_string(),
            selection: None,
            x_axis: CategoryAxis {
                title: OCCUPATION.to_string(),
                categories: Vec::new(),
            },
            y_axis: ValueAxis {
                title: Y_AXIS_TITLE.to_string(),
            },
            marker_size: MARKER_SIZE,
            points: Vec::new(),
            empty: true,
        };
    };

    let filtered = dataset.filter(quality);
    let categories = category_order(&filtered);

    let mut ordered = filtered;
    ordered.sort_by(|a, b| {
        position(&categories, &a.occupation)
            .cmp(&position(&categories, &b.occupation))
            .then(a.sleep_duration.total_cmp(&b.sleep_duration))
    });

    let points: Vec<PlotPoint> = ordered.into_iter().map(to_point).collect();

    PlotSpec {
        title: format!("Sleep Duration for Quality of Sleep: {quality}"),
        selection: Some(quality),
        x_axis: CategoryAxis {
            title: OCCUPATION.to_string(),
            categories,
        },
        y_axis: ValueAxis {
            title: Y_AXIS_TITLE.to_string(),
        },
        marker_size: MARKER_SIZE,
        empty: points.is_empty(),
        points,
    }
}

/// Occupations ordered by number of points, descending. Ties sort alphabetically.
fn category_order(records: &[&AggregatedRecord]) -> Vec<String> {
    let mut frequency: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *frequency.entry(record.occupation.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = frequency.into_iter().collect();
    ranked.sort_by(|a, b| match b.1.cmp(&a.1) {
        Ordering::Equal => a.0.cmp(b.0),
        other => other,
    });
    ranked.into_iter().map(|(name, _)| name.to_string()).collect()
}

fn position(categories: &[String], occupation: &str) -> usize {
    categories
        .iter()
        .position(|c| c == occupation)
        .unwrap_or(categories.len())
}

fn to_point(record: &AggregatedRecord) -> PlotPoint {
    PlotPoint {
        x: record.occupation.clone(),
        y: record.sleep_duration,
        hover: Hover {
            occupation: record.occupation.clone(),
            sleep_duration: record.sleep_duration,
            count: record.count,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawRecord;

    fn sample() -> Dataset {
        Dataset::from_raw(vec![
            RawRecord::new("Doctor", 7, 7.5),
            RawRecord::new("Doctor", 7, 7.5),
            RawRecord::new("Nurse", 7, 6.0),
            RawRecord::new("Doctor", 8, 8.0),
        ])
    }

    #[test]
    fn selection_filters_and_titles() {
        let plot = build_plot(&sample(), Some(7));
        assert_eq!(plot.title, "Sleep Duration for Quality of Sleep: 7");
        assert!(!plot.empty);
        assert_eq!(plot.points.len(), 2);

        let doctor = plot.points.iter().find(|p| p.x == "Doctor").unwrap();
        assert_eq!(doctor.y, 7.5);
        assert_eq!(doctor.hover.count, 2);
        let nurse = plot.points.iter().find(|p| p.x == "Nurse").unwrap();
        assert_eq!(nurse.hover.sleep_duration, 6.0);
        assert_eq!(nurse.hover.count, 1);
        assert_eq!(plot.y_axis.title, "Sleep Duration, h");
        assert_eq!(plot.marker_size, 10);
    }

    #[test]
    fn unknown_selection_is_empty_plot() {
        let plot = build_plot(&sample(), Some(42));
        assert!(plot.empty);
        assert!(plot.points.is_empty());
        assert!(plot.x_axis.categories.is_empty());
        assert!(plot.title.contains("42"));
    }

    #[test]
    fn no_selection_is_empty_plot() {
        let plot = build_plot(&Dataset::default(), None);
        assert!(plot.empty);
        assert_eq!(plot.selection, None);
        assert_eq!(plot.title, "No data available");
    }

    #[test]
    fn categories_by_descending_frequency_then_name() {
        let dataset = Dataset::from_raw(vec![
            RawRecord::new("Teacher", 6, 6.2),
            RawRecord::new("Nurse", 6, 6.0),
            RawRecord::new("Nurse", 6, 6.1),
            RawRecord::new("Nurse", 6, 6.3),
            RawRecord::new("Accountant", 6, 7.0),
            RawRecord::new("Doctor", 6, 6.5),
            RawRecord::new("Doctor", 6, 6.6),
        ]);
        let plot = build_plot(&dataset, Some(6));
        assert_eq!(
            plot.x_axis.categories,
            vec!["Nurse", "Doctor", "Accountant", "Teacher"]
        );
        let xs: Vec<&str> = plot.points.iter().map(|p| p.x.as_str()).collect();
        assert_eq!(
            xs,
            vec!["Nurse", "Nurse", "Nurse", "Doctor", "Doctor", "Accountant", "Teacher"]
        );
    }

    #[test]
    fn repeated_rows_count_once_toward_frequency() {
        let dataset = Dataset::from_raw(vec![
            RawRecord::new("Doctor", 7, 7.5),
            RawRecord::new("Doctor", 7, 7.5),
            RawRecord::new("Doctor", 7, 7.5),
            RawRecord::new("Nurse", 7, 6.0),
            RawRecord::new("Nurse", 7, 6.5),
        ]);
        let plot = build_plot(&dataset, Some(7));
        assert_eq!(plot.x_axis.categories, vec!["Nurse", "Doctor"]);
    }

    #[test]
    fn same_selection_same_plot() {
        let dataset = sample();
        assert_eq!(build_plot(&dataset, Some(7)), build_plot(&dataset, Some(7)));
        assert_eq!(build_plot(&dataset, Some(1)), build_plot(&dataset, Some(1)));
    }
}
