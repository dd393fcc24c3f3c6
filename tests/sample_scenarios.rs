use movie_insights::source::RowSource;
use movie_insights::{
    DashboardConfig, DashboardState, FilterSpec, MovieRecord, SampleSource, build_aggregates,
    filter_records, normalize, summarize, to_millions, top_n,
};

fn sample_records() -> Vec<MovieRecord> {
    SampleSource
        .read_rows()
        .unwrap()
        .iter()
        .filter_map(normalize)
        .collect()
}

fn titles(records: &[MovieRecord]) -> Vec<&str> {
    records.iter().map(|r| r.title.as_str()).collect()
}

#[test]
fn sample_normalizes_every_row() {
    let records = sample_records();
    assert_eq!(records.len(), 28);
    let godfather = &records[1];
    assert_eq!(godfather.title, "The Godfather");
    assert_eq!(godfather.year, Some(1972.0));
    assert_eq!(godfather.genres, vec!["Crime".to_string(), "Drama".to_string()]);
    assert_eq!(godfather.votes, Some(1_900_000.0));
    assert_eq!(godfather.runtime, Some(175.0));
}

#[test]
fn full_sample_summary() {
    let summary = summarize(&sample_records());
    assert_eq!(summary.count, 28);
    // Sum of the 28 listed ratings is 234.0.
    assert!((summary.mean_rating - 234.0 / 28.0).abs() < 1e-9);
    assert!((summary.mean_runtime - 4493.0 / 28.0).abs() < 1e-9);
    assert!(summary.mean_revenue_millions > 190.0 && summary.mean_revenue_millions < 196.0);
}

#[test]
fn bollywood_filter_and_top_three() {
    let records = sample_records();
    let spec = FilterSpec::default().with_genre("Bollywood");
    let filtered = filter_records(&records, &spec);
    assert_eq!(
        titles(&filtered),
        vec![
            "3 Idiots",
            "Dangal",
            "PK",
            "Bajrangi Bhaijaan",
            "Gully Boy",
            "Andhadhun",
            "Lagaan",
            "Taare Zameen Par",
            "Drishyam",
        ]
    );

    let top = top_n(&filtered, 3);
    assert_eq!(titles(&top), vec!["3 Idiots", "Dangal", "Taare Zameen Par"]);
    assert_eq!(top[0].rating, Some(8.4));
    assert_eq!(top[1].rating, Some(8.4));
    assert_eq!(top[2].rating, Some(8.3));
}

#[test]
fn revenue_scale_rule_on_sample_values() {
    let records = sample_records();
    let shawshank = &records[0];
    let revenue = shawshank.revenue.expect("revenue");
    assert!((to_millions(revenue) - 28.34).abs() < 0.01);
    assert_eq!(to_millions(45.0), 45.0);
}

#[test]
fn sample_runtime_histogram_covers_all_runtimes() {
    let aggregates = build_aggregates(&sample_records(), 10);
    let histogram = &aggregates.runtime_histogram;
    assert_eq!(histogram.labels.first().map(String::as_str), Some("96-109"));
    assert_eq!(histogram.counts.len(), 10);
    assert_eq!(histogram.counts.iter().sum::<usize>(), 28);
    assert_eq!(aggregates.revenue_rating.len(), 28);
    assert_eq!(aggregates.year_rating.labels.first(), Some(&1957.0));
    assert_eq!(aggregates.genre_rating.labels.first().map(String::as_str), Some("Action"));
}

#[test]
fn dashboard_state_over_sample_matches_pure_pipeline() {
    let mut state = DashboardState::new(DashboardConfig::default()).unwrap();
    let report = state.ingest_from(&SampleSource).unwrap();
    assert_eq!(report.records_kept, 28);
    assert_eq!(report.rows_dropped, 0);
    assert_eq!(state.filter().year_min, Some(1957.0));
    assert_eq!(state.filter().year_max, Some(2022.0));
    assert!(state.dataset().genre_universe().contains("Tollywood"));

    assert!(state.toggle_genre("Bollywood"));
    state.set_top_n(3);
    let view = state.view();
    assert_eq!(view.summary.count, 9);
    assert_eq!(titles(&view.top), vec!["3 Idiots", "Dangal", "Taare Zameen Par"]);

    // Genre chips stay available even when filtered out of the results.
    assert!(state.dataset().genre_universe().contains("Tollywood"));
    assert!(view.aggregates.genre_rating.labels.iter().all(|g| g != "Tollywood"));
}
