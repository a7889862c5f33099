use std::path::PathBuf;

use congrats_dash::charts::style::SERIES_BLUE;
use congrats_dash::charts::{ChartTheme, render_time_series};
use congrats_dash::error::{DashError, DecodeLayer};
use congrats_dash::generators::{TimeSeries, TimeSeriesPoint};
use congrats_dash::render::{NullRenderer, Renderer};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/time_series")
        .join(name)
}

#[test]
fn double_encoded_fixture_yields_the_exact_series() {
    let chart = render_time_series(fixture("two_points_double.json")).expect("load");

    assert_eq!(
        chart.series.points(),
        &[
            TimeSeriesPoint {
                date: "2021-01-01".to_owned(),
                downloads: 5.0,
            },
            TimeSeriesPoint {
                date: "2021-01-02".to_owned(),
                downloads: 9.0,
            },
        ]
    );
}

#[test]
fn single_encoded_file_is_rejected_at_the_outer_layer() {
    let err = TimeSeries::load(fixture("two_points_single.json")).expect_err("must fail");
    assert!(
        matches!(
            err,
            DashError::DataEncoding {
                layer: DecodeLayer::Outer,
                ..
            }
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn missing_data_field_is_rejected_at_the_inner_layer() {
    let err = TimeSeries::load(fixture("missing_data_field.json")).expect_err("must fail");
    assert!(matches!(
        err,
        DashError::DataEncoding {
            layer: DecodeLayer::Inner,
            ..
        }
    ));
    assert!(err.to_string().contains("data"));
}

#[test]
fn truncated_inner_document_is_rejected() {
    let err = TimeSeries::load(fixture("truncated_inner.json")).expect_err("must fail");
    assert!(matches!(
        err,
        DashError::DataEncoding {
            layer: DecodeLayer::Inner,
            ..
        }
    ));
}

#[test]
fn missing_file_is_fatal() {
    let err = render_time_series(fixture("does_not_exist.json")).expect_err("must fail");
    assert!(matches!(err, DashError::DataFile { .. }));
}

#[test]
fn calendar_dates_are_ordered_chronologically() {
    let series = TimeSeries::load(fixture("unordered_double.json")).expect("load");
    let dates: Vec<&str> = series
        .points()
        .iter()
        .map(|point| point.date.as_str())
        .collect();
    assert_eq!(dates, vec!["2021-01-01", "2021-02-01", "2021-03-01"]);
    assert!(series.has_calendar_dates());
}

#[test]
fn free_form_dates_keep_file_order() {
    let series = TimeSeries::new(vec![
        TimeSeriesPoint {
            date: "week 2".to_owned(),
            downloads: 2.0,
        },
        TimeSeriesPoint {
            date: "week 1".to_owned(),
            downloads: 1.0,
        },
    ]);
    assert_eq!(series.points()[0].date, "week 2");
    assert_eq!(series.x_positions(), vec![0.0, 1.0]);
    assert!(!series.has_calendar_dates());
}

#[test]
fn line_chart_draws_one_segment_per_gap() {
    let chart = render_time_series(fixture("unordered_double.json")).expect("load");
    let frame = chart.to_frame(&ChartTheme::default()).expect("frame");

    let series_lines = frame
        .lines
        .iter()
        .filter(|line| line.color == SERIES_BLUE)
        .count();
    assert_eq!(series_lines, 2);
    assert!(frame.texts.iter().any(|text| text.text == "date"));
    assert!(frame.texts.iter().any(|text| text.text == "downloads"));

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("valid frame");
}

#[test]
fn line_chart_rises_with_downloads() {
    let chart = render_time_series(fixture("two_points_double.json")).expect("load");
    let frame = chart.to_frame(&ChartTheme::default()).expect("frame");
    let segment = frame
        .lines
        .iter()
        .find(|line| line.color == SERIES_BLUE)
        .expect("series segment");

    assert!(segment.x2 > segment.x1);
    assert!(segment.y2 < segment.y1, "9 downloads must plot above 5");
}

#[test]
fn bundled_data_file_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/data.json");
    let chart = render_time_series(path).expect("bundled data");
    assert!(chart.series.len() > 2);
    assert!(chart.series.has_calendar_dates());
}
