use anyhow::Result;
use output_predictor::{
    api::PredictorServer,
    config::ServerSettings,
    ml::{MachineParameters, PerformanceBand, PredictionEngine, PARAMETER_CATALOG},
};
use warp::test::request;

fn readings(temperature: f64, pressure: f64, experience: f64) -> MachineParameters {
    MachineParameters {
        injection_temperature: temperature,
        injection_pressure: pressure,
        operator_experience: experience,
        ..MachineParameters::default()
    }
}

/// Prediction engine behavior
mod prediction_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(180.0, 80.0, 1.0, 8.62, PerformanceBand::Low ; "default readings")]
    #[test_case(300.0, 200.0, 240.0, 21.8, PerformanceBand::Moderate ; "all maxed")]
    #[test_case(300.0, 200.0, 0.0, 17.0, PerformanceBand::Low ; "no experience")]
    #[test_case(0.0, 200.0, 0.0, 8.0, PerformanceBand::Low ; "pressure only")]
    #[test_case(300.0, 150.0, 100.0, 17.0, PerformanceBand::Low ; "mixed readings")]
    fn test_reference_scenarios(
        temperature: f64,
        pressure: f64,
        experience: f64,
        expected_output: f64,
        expected_band: PerformanceBand,
    ) {
        let engine = PredictionEngine::new();
        let result = engine.predict(&readings(temperature, pressure, experience));

        assert_eq!(result.predicted_output, expected_output);
        assert_eq!(result.band, expected_band);
    }

    #[test_case(0.0, 500.0, 0.0, 20.0, PerformanceBand::Moderate ; "exactly twenty")]
    #[test_case(0.0, 0.0, 999.5, 19.99, PerformanceBand::Low ; "just below twenty")]
    #[test_case(0.0, 1250.0, 0.0, 50.0, PerformanceBand::High ; "exactly fifty")]
    #[test_case(0.0, 0.0, 2499.5, 49.99, PerformanceBand::Moderate ; "just below fifty")]
    fn test_band_boundaries(
        temperature: f64,
        pressure: f64,
        experience: f64,
        expected_output: f64,
        expected_band: PerformanceBand,
    ) {
        let result = PredictionEngine::new().predict(&readings(temperature, pressure, experience));

        assert_eq!(result.predicted_output, expected_output);
        assert_eq!(result.band, expected_band);
    }

    #[test]
    fn test_unused_readings_have_no_effect() {
        let engine = PredictionEngine::new();
        let baseline = engine.predict(&readings(300.0, 150.0, 100.0));

        let varied = MachineParameters {
            cycle_time: 60.0,
            cooling_time: 0.0,
            viscosity: 500.0,
            ambient_temperature: 50.0,
            machine_age: 20.0,
            maintenance_hours: 1000.0,
            ..readings(300.0, 150.0, 100.0)
        };

        assert_eq!(engine.predict(&varied), baseline);
    }

    #[test]
    fn test_formula_matches_weights() {
        let engine = PredictionEngine::new();

        for t in [0.0_f64, 37.5, 150.0, 299.0] {
            for p in [0.0_f64, 12.25, 100.0, 200.0] {
                for o in [0.0_f64, 6.0, 120.0, 240.0] {
                    let expected = ((t * 0.3 + p * 0.4 + o * 0.2) / 10.0 * 100.0).round() / 100.0;
                    let result = engine.predict(&readings(t, p, o));
                    assert_eq!(result.predicted_output, expected, "T={} P={} O={}", t, p, o);
                }
            }
        }
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let engine = PredictionEngine::new();
        let params = readings(212.0, 133.0, 18.0);

        assert_eq!(engine.predict(&params), engine.predict(&params));
    }
}

/// HTTP surface
mod server_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn server() -> PredictorServer {
        PredictorServer::new(ServerSettings::default(), PredictionEngine::new())
    }

    #[tokio::test]
    async fn test_dashboard_form_prediction() -> Result<()> {
        let routes = server().routes();

        let resp = request()
            .method("POST")
            .path("/predict")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("injection_temperature=300&injection_pressure=200&operator_experience=240")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), 200);
        let body = String::from_utf8(resp.body().to_vec())?;
        assert!(body.contains("Predicted Equipment Output: 21.80 units/hour"));
        assert!(body.contains("Performance: Moderate"));
        assert!(body.contains("value=\"240\""));

        Ok(())
    }

    #[tokio::test]
    async fn test_dashboard_form_rejects_out_of_range() -> Result<()> {
        let routes = server().routes();

        let resp = request()
            .method("POST")
            .path("/predict")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("injection_pressure=250&viscosity=abc")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), 400);
        let body = String::from_utf8(resp.body().to_vec())?;
        assert!(body.contains("injection_pressure: 250 is outside the allowed range [0, 200]"));
        assert!(body.contains("viscosity: &#x27;abc&#x27; is not a valid number"));
        assert!(!body.contains("Predicted Equipment Output"));

        Ok(())
    }

    #[tokio::test]
    async fn test_json_prediction() -> Result<()> {
        let routes = server().routes();

        let resp = request()
            .method("POST")
            .path("/api/predict")
            .json(&serde_json::json!({
                "injection_temperature": 300.0,
                "injection_pressure": 200.0,
                "operator_experience": 0.0
            }))
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(resp.body())?;
        assert_eq!(body["predicted_output"], 17.0);
        assert_eq!(body["band"], "Low");
        assert_eq!(body["parameters"]["viscosity"], 100.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_json_prediction_rejects_out_of_range() -> Result<()> {
        let routes = server().routes();

        let resp = request()
            .method("POST")
            .path("/api/predict")
            .json(&serde_json::json!({ "machine_age": 25.0 }))
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = serde_json::from_slice(resp.body())?;
        assert_eq!(body["error"], "Invalid machine parameters");
        assert_eq!(body["details"].as_array().map(Vec::len), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn test_json_prediction_rejects_malformed_body() {
        let routes = server().routes();

        let resp = request()
            .method("POST")
            .path("/api/predict")
            .header("content-type", "application/json")
            .body(r#"{"injection_temperature": "hot"}"#)
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn test_parameter_catalog_route() -> Result<()> {
        let routes = server().routes();

        let resp = request().method("GET").path("/api/parameters").reply(&routes).await;

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = serde_json::from_slice(resp.body())?;
        let entries = body.as_array().cloned().unwrap_or_default();
        assert_eq!(entries.len(), PARAMETER_CATALOG.len());
        assert_eq!(entries[0]["name"], "injection_temperature");
        assert_eq!(entries[0]["max"], 300.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_contact_form() -> Result<()> {
        let routes = server().routes();

        let resp = request().method("GET").path("/contact").reply(&routes).await;
        assert_eq!(resp.status(), 200);

        let resp = request()
            .method("POST")
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Grace&email=grace%40example.com&message=Line+3+is+down")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), 200);
        let body = String::from_utf8(resp.body().to_vec())?;
        assert!(body.contains("Hello Grace! Your message has been received."));

        Ok(())
    }

    #[tokio::test]
    async fn test_contact_form_requires_fields() -> Result<()> {
        let routes = server().routes();

        let resp = request()
            .method("POST")
            .path("/submit")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("name=Grace")
            .reply(&routes)
            .await;

        assert_eq!(resp.status(), 400);
        let body = String::from_utf8(resp.body().to_vec())?;
        assert!(body.contains("email is required"));
        assert!(body.contains("message is required"));

        Ok(())
    }
}
