mod http;

pub use http::HttpPlanClient;

use crate::error::ClientError;
use crate::plan::PlanResponse;
use async_trait::async_trait;

/// Outbound seam to the plan-generation service
#[async_trait]
pub trait PlanService: Send + Sync {
    async fn create_plan(&self, goal: &str) -> Result<PlanResponse, ClientError>;
}
