use labor_stats::analyzers::aggregate::{aggregate, aggregate_by_industry};
use labor_stats::analyzers::extremum::extremum;
use labor_stats::analyzers::report::summarize;
use labor_stats::analyzers::types::{Direction, GroupKey, Metric};
use labor_stats::dataset::Dataset;
use labor_stats::filter::{QueryMode, TimeQuery, filter};
use labor_stats::quarter::Quarter;

fn load_fixture() -> Dataset {
    let bytes = include_bytes!("fixtures/labour.csv");
    Dataset::from_csv_reader(&bytes[..]).expect("Failed to load fixture dataset")
}

fn range_query(start_year: i32, end_year: i32) -> TimeQuery {
    TimeQuery {
        start_year,
        end_year,
        start_quarter: None,
        end_quarter: None,
        industries: vec!["manufacturing".to_string(), "construction".to_string()],
        mode: QueryMode::Range,
    }
}

#[test]
fn test_full_range_pipeline() {
    let dataset = load_fixture();
    assert_eq!(dataset.min_year(), Some(2018));
    assert_eq!(dataset.max_year(), Some(2020));

    let subset = filter(&dataset, &range_query(2018, 2020));
    assert_eq!(subset.len(), dataset.len());

    let rows = aggregate(&subset, false);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].group, GroupKey::Year(2018));
    assert_eq!(rows[2].group, GroupKey::Year(2020));

    // 2020 had the deepest hiring slump in the fixture.
    let lowest = extremum(&subset, Metric::RecruitmentRate, Direction::Lowest, false).unwrap();
    assert_eq!(lowest.keys, ["2020"]);

    let highest = extremum(&subset, Metric::Retrenchment, Direction::Highest, false).unwrap();
    assert_eq!(highest.keys, ["2020"]);
}

#[test]
fn test_quarter_window_pipeline() {
    let dataset = load_fixture();
    let mut query = range_query(2019, 2019);
    query.start_quarter = Some(Quarter::Q1);
    query.end_quarter = Some(Quarter::Q2);
    query.industries = vec!["manufacturing".to_string()];

    let subset = filter(&dataset, &query);
    assert_eq!(subset.len(), 2);

    let rows = aggregate(&subset, true);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].group, GroupKey::YearQuarter(2019, Quarter::Q1));
    assert_eq!(rows[0].recruitment_rate, 5.0);
    assert_eq!(rows[1].group, GroupKey::YearQuarter(2019, Quarter::Q2));
    assert_eq!(rows[1].recruitment_rate, 7.0);

    let result = extremum(&subset, Metric::RecruitmentRate, Direction::Highest, true).unwrap();
    assert_eq!(result.value, 7.0);
    assert_eq!(result.keys, ["2019 Q2"]);
}

#[test]
fn test_comparison_pipeline_by_industry() {
    let dataset = load_fixture();
    let mut query = range_query(2018, 2020);
    query.mode = QueryMode::Comparison;
    query.start_quarter = Some(Quarter::Q1);
    query.end_quarter = Some(Quarter::Q1);

    let subset = filter(&dataset, &query);
    assert_eq!(subset.len(), 4); // two industries at each endpoint
    assert!(subset.iter().all(|r| r.year == 2018 || r.year == 2020));

    let rows = aggregate_by_industry(&subset);
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0].group,
        GroupKey::Industry("manufacturing".to_string())
    );
    // mean of 4.8 and 3.2
    assert_eq!(rows[0].recruitment_rate, 4.0);
    assert_eq!(rows[1].group, GroupKey::Industry("construction".to_string()));
    // mean of 5.2 and 3.0
    assert_eq!(rows[1].recruitment_rate, 4.1);
}

#[test]
fn test_out_of_range_window_is_empty_not_an_error() {
    let dataset = load_fixture();
    let subset = filter(&dataset, &range_query(2015, 2019));
    assert!(subset.is_empty());
}

#[test]
fn test_sentinel_rows_aggregate_as_zero() {
    let dataset = load_fixture();
    let mut query = range_query(2018, 2018);
    query.start_quarter = Some(Quarter::Q3);
    query.end_quarter = Some(Quarter::Q3);
    query.industries = vec!["manufacturing".to_string()];

    let subset = filter(&dataset, &query);
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].retrenchment, 0.0);

    let rows = aggregate(&subset, true);
    assert_eq!(rows[0].retrenchment, 0.0);
}

#[test]
fn test_summary_payload_over_fixture() {
    let dataset = load_fixture();
    let subset = filter(&dataset, &range_query(2018, 2020));
    let summary = summarize(&subset, false).unwrap();

    assert!(!summary.by_quarter);
    assert_eq!(summary.time_rows.len(), 3);
    assert_eq!(summary.industry_rows.len(), 2);
    assert_eq!(summary.extremes.len(), 3);

    let retrenchment = summary
        .extremes
        .iter()
        .find(|e| e.metric == "retrenchment")
        .unwrap();
    assert_eq!(retrenchment.highest.keys, ["2020"]);
}
