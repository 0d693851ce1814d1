//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::sim::types::HOURS_PER_DAY;

use super::AppState;
use super::types::{CurvePoint, CurveQuery, ErrorResponse, SummaryResponse};

/// Returns run parameters and the full demand summary.
///
/// `GET /summary` → 200 + `SummaryResponse` JSON
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        params: state.params.clone(),
        summary: state.summary.clone(),
    })
}

/// Returns the hourly demand curve, optionally filtered by hour range.
///
/// `GET /curve` → 200 + `Vec<CurvePoint>` JSON
/// `GET /curve?from=N&to=M` → filtered range (inclusive)
/// `GET /curve?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_curve(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CurveQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(HOURS_PER_DAY - 1);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let points: Vec<CurvePoint> = (from..=to.min(HOURS_PER_DAY - 1))
        .map(|h| CurvePoint::from_summary(&state.summary, h))
        .collect();

    Ok(Json(points))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::sim::types::{DemandSummary, ScheduleSummary, SimParams, TrajectorySummary};

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            params: SimParams::new(100, 0.0, 42),
            summary: DemandSummary {
                schedule: ScheduleSummary {
                    hourly_fraction: [0.5; HOURS_PER_DAY],
                    mean_plug_in_hour: 19,
                    mean_plug_out_hour: 31,
                },
                soc: TrajectorySummary {
                    mean: [0.6; HOURS_PER_DAY],
                    p5: [0.4; HOURS_PER_DAY],
                    p95: [0.8; HOURS_PER_DAY],
                },
                drivers_simulated: 100,
            },
        })
    }

    async fn get(path: &str) -> (StatusCode, String) {
        let app = router(make_test_state());
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn summary_returns_params_and_curves() {
        let (status, body) = get("/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"drivers_simulated\":100"));
        assert!(body.contains("\"population_size\":100"));
    }

    #[tokio::test]
    async fn curve_returns_all_hours_by_default() {
        let (status, body) = get("/curve").await;
        assert_eq!(status, StatusCode::OK);
        let points: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(points.len(), HOURS_PER_DAY);
    }

    #[tokio::test]
    async fn curve_range_filter_is_inclusive() {
        let (status, body) = get("/curve?from=5&to=7").await;
        assert_eq!(status, StatusCode::OK);
        let points: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0]["hour"], 5);
    }

    #[tokio::test]
    async fn inverted_curve_range_is_rejected() {
        let (status, body) = get("/curve?from=10&to=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("must be <="));
    }
}
