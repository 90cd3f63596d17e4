#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{setup_test_app, setup_test_app_state, write_country_csv};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::{EvolutionView, ExportPayload, Figure, QuarterOptions, TableDto, ValueRange};
    use model::Country;

    #[tokio::test]
    async fn test_health_check() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.cached_countries, 0);
    }

    #[tokio::test]
    async fn test_get_countries() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.success);
        assert_eq!(body.data.len(), 6);
        let defaults: Vec<&serde_json::Value> =
            body.data.iter().filter(|c| c["is_default"] == true).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0]["code"], "ez");
        assert_eq!(defaults[0]["name"], "Euro area");
    }

    #[tokio::test]
    async fn test_get_table_from_file() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/ez/table").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<TableDto> = response.json();
        assert!(body.success);
        assert!(!body.data.origin.is_synthetic());
        assert_eq!(body.data.horizons, vec![1, 2, 4]);
        assert_eq!(body.data.rows.len(), 8);
        assert_eq!(body.data.rows[0].quarter_label, "1999Q1");
        assert_eq!(body.data.rows[2].values, vec![Some(1.6), Some(1.7), None]);
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_synthetic() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/FR/table").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<TableDto> = response.json();
        assert!(body.data.origin.is_synthetic());
        assert_eq!(body.data.country, "fr");
        assert_eq!(body.data.rows.len(), 145);
        assert_eq!(body.data.horizons.len(), 40);
    }

    #[tokio::test]
    async fn test_unknown_country() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/xx/curves").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "UNKNOWN_COUNTRY");
    }

    #[tokio::test]
    async fn test_get_curves() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/ez/curves").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 8);
        assert_eq!(body.data[7]["quarter_label"], "2000Q4");
        assert_eq!(body.data[7]["horizons"], serde_json::json!([1, 2, 4]));
        assert!(body.data[2]["values"][2].is_null());
    }

    #[tokio::test]
    async fn test_get_quarters() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/ez/quarters").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<QuarterOptions> = response.json();
        assert_eq!(body.data.labels.len(), 8);
        assert_eq!(body.data.default_comparison, vec!["2000Q2", "2000Q3", "2000Q4"]);
        assert_eq!(body.data.default_evolution_index, 7);
    }

    #[tokio::test]
    async fn test_get_value_range() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/ez/range").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ValueRange> = response.json();
        assert!((body.data.lower - 1.3).abs() < 1e-9);
        assert!((body.data.upper - 2.25).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_overview_chart() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/ez/charts/overview").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let traces = body.data["data"].as_array().unwrap();
        assert_eq!(traces.len(), 3);
        assert_eq!(traces[0]["type"], "scatter");
        assert_eq!(traces[0]["mode"], "lines");
        assert_eq!(traces[0]["x"][0], "1999-03-31");
        assert_eq!(body.data["layout"]["hovermode"], "x unified");
        assert_eq!(body.data["layout"]["height"], 600);
    }

    #[tokio::test]
    async fn test_comparison_chart_with_selection() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/countries/ez/charts/comparison")
            .add_query_param("quarters", "1999Q1,2000Q4")
            .add_query_param("fixed_scale", "true")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Figure> = response.json();
        let figure = body.data;
        assert_eq!(figure.data.len(), 2);
        assert_eq!(figure.data[0].name, "1999Q1");
        assert_eq!(figure.data[1].name, "2000Q4");
        assert!(figure.data.iter().all(|trace| trace.len() == 3));
        assert!(figure.layout.yaxis.range.is_some());
    }

    #[tokio::test]
    async fn test_comparison_chart_defaults_and_empty_selection() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/ez/charts/comparison").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Figure> = response.json();
        let names: Vec<String> = body.data.data.iter().map(|t| t.name.clone()).collect();
        assert_eq!(names, vec!["2000Q2", "2000Q3", "2000Q4"]);
        assert!(body.data.layout.yaxis.range.is_none());

        let response = server
            .get("/api/v1/countries/ez/charts/comparison")
            .add_query_param("quarters", "")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Figure> = response.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_comparison_chart_unknown_quarter() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/countries/ez/charts/comparison")
            .add_query_param("quarters", "1999Q1,1985Q1")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "UNKNOWN_QUARTER");
    }

    #[tokio::test]
    async fn test_evolution_chart() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/countries/ez/charts/evolution")
            .add_query_param("quarter", "1999q3")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<EvolutionView> = response.json();
        let view = body.data;
        assert_eq!(view.index, 2);
        assert_eq!(view.figure.data[0].name, "Term structure 1999Q3");
        assert_eq!(view.metrics.quarter_label, "1999Q3");
        assert_eq!(view.metrics.short_term.value, Some(1.6));
        // Curve has three horizons, so medium and long term use the last one
        assert_eq!(view.metrics.long_term.horizon, 4);
        assert_eq!(view.metrics.long_term.value, None);
    }

    #[tokio::test]
    async fn test_evolution_chart_defaults_to_latest() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/countries/ez/charts/evolution")
            .add_query_param("fixed_scale", "true")
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<EvolutionView> = response.json();
        assert_eq!(body.data.index, 7);
        assert_eq!(body.data.metrics.quarter_label, "2000Q4");
        assert!(body.data.figure.layout.yaxis.range.is_some());
    }

    #[tokio::test]
    async fn test_export_full_and_selection() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/countries/ez/export").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ExportPayload> = response.json();
        assert_eq!(body.data.file_name, "inflation_expectations.csv");
        assert_eq!(body.data.row_count, 8);
        assert!(body.data.data_uri.starts_with("data:text/csv;base64,"));

        let response = server
            .get("/api/v1/countries/ez/export")
            .add_query_param("quarters", "2000Q4,1999Q1")
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<ExportPayload> = response.json();
        assert_eq!(body.data.file_name, "selected_quarters.csv");
        assert_eq!(body.data.row_count, 2);
    }

    #[tokio::test]
    async fn test_export_csv_download() {
        let (app, _data_dir) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/countries/ez/export.csv")
            .add_query_param("quarters", "1999Q3")
            .await;

        response.assert_status(StatusCode::OK);
        let content_type = response.header("content-type");
        assert!(content_type.to_str().unwrap().starts_with("text/csv"));
        let disposition = response.header("content-disposition");
        assert!(disposition.to_str().unwrap().contains("selected_quarters.csv"));

        let text = response.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Time,pi_1q,pi_2q,pi_4q");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("1999-09-30,"));
        assert!(lines[1].ends_with(','));
    }

    #[tokio::test]
    async fn test_cache_reuse_and_clear() {
        let data_dir = tempfile::tempdir().unwrap();
        write_country_csv(data_dir.path(), Country::De, "Time,pi_1q\n2020-03-31,1.0\n");
        let state = setup_test_app_state(data_dir.path());
        let server = TestServer::new(crate::router::create_router(state.clone())).unwrap();

        let response = server.get("/api/v1/countries/de/table").await;
        let body: ApiResponse<TableDto> = response.json();
        assert_eq!(body.data.rows.len(), 1);
        assert_eq!(state.source.cache_size(), 1);

        // Replaced file is not seen until the cache is cleared
        write_country_csv(
            data_dir.path(),
            Country::De,
            "Time,pi_1q\n2020-03-31,1.0\n2020-06-30,1.1\n",
        );
        let response = server.get("/api/v1/countries/de/table").await;
        let body: ApiResponse<TableDto> = response.json();
        assert_eq!(body.data.rows.len(), 1);

        let response = server.post("/api/v1/cache/clear").await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["cleared"], 1);
        assert_eq!(state.source.cache_size(), 0);

        let response = server.get("/api/v1/countries/de/table").await;
        let body: ApiResponse<TableDto> = response.json();
        assert_eq!(body.data.rows.len(), 2);
    }
}
