use super::PlanService;
use crate::config::Config;
use crate::error::ClientError;
use crate::plan::{GoalRequest, PlanResponse};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Live client for `POST /create-plan`
pub struct HttpPlanClient {
    client: Client,
    url: String,
}

impl HttpPlanClient {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Build)?;

        Ok(Self {
            client,
            url: config.plan_url(),
        })
    }
}

#[async_trait]
impl PlanService for HttpPlanClient {
    async fn create_plan(&self, goal: &str) -> Result<PlanResponse, ClientError> {
        debug!(url = %self.url, "POST plan request");

        let response = self
            .client
            .post(&self.url)
            .json(&GoalRequest {
                goal: goal.to_string(),
            })
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(ClientError::Transport)?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> Config {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Config {
            server_url: format!("http://{}", addr),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_posts_goal_and_decodes_plan() {
        let router = Router::new().route(
            "/create-plan",
            post(|Json(body): Json<Value>| async move {
                Json(json!({
                    "project_name": body["goal"],
                    "tasks": [{
                        "task_id": 1,
                        "task_name": "Design",
                        "description": "Create mockups",
                        "timeline_days": 3,
                        "dependencies": []
                    }]
                }))
            }),
        );
        let config = serve(router).await;
        let client = HttpPlanClient::new(&config).unwrap();

        let response = client.create_plan("Launch website").await.unwrap();
        let plan = response.into_plan().unwrap();
        assert_eq!(plan.project_name, "Launch website");
        assert_eq!(plan.tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_server_error_field_passes_through() {
        let router = Router::new().route(
            "/create-plan",
            post(|| async { Json(json!({"error": "model unavailable"})) }),
        );
        let config = serve(router).await;
        let client = HttpPlanClient::new(&config).unwrap();

        let response = client.create_plan("anything").await.unwrap();
        assert_eq!(response.error.as_deref(), Some("model unavailable"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let router = Router::new().route(
            "/create-plan",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let config = serve(router).await;
        let client = HttpPlanClient::new(&config).unwrap();

        let err = client.create_plan("anything").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_invalid_body_is_decode_error() {
        let router = Router::new().route("/create-plan", post(|| async { "<html>" }));
        let config = serve(router).await;
        let client = HttpPlanClient::new(&config).unwrap();

        let err = client.create_plan("anything").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = Config {
            server_url: format!("http://{}", addr),
            ..Default::default()
        };
        let client = HttpPlanClient::new(&config).unwrap();

        let err = client.create_plan("anything").await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
