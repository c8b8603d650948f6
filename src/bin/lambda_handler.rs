//! AWS Lambda handler for planning client records
//!
//! Accepts one or more client records as JSON and returns the full financial
//! plan for each, along with a summary line per client.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::LambdaFunctionUrlRequest;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sg_planner::{
    input::ReferenceMonth,
    planner::PlanSummary,
    ClientRecord, FinancialPlan, PlanInputs, Planner,
};

/// Input for a planning request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Client records to plan
    #[serde(default)]
    pub clients: Vec<ClientRecord>,

    /// A single client record, planned after `clients`
    #[serde(default)]
    pub client: Option<ClientRecord>,

    /// Reference year for records without their own (default: current)
    #[serde(default)]
    pub reference_year: Option<i32>,

    /// Reference month, 0-based (default: current)
    #[serde(default)]
    pub reference_month: Option<u32>,

    /// Include full plans or only summaries
    #[serde(default = "default_detailed")]
    pub detailed: bool,
}

fn default_detailed() -> bool { true }

impl PlanRequest {
    fn today(&self) -> ReferenceMonth {
        let now = ReferenceMonth::today();
        ReferenceMonth::new(
            self.reference_year.unwrap_or(now.year),
            self.reference_month.filter(|m| *m < 12).unwrap_or(now.month0),
        )
    }
}

/// Output from a planning request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub client_count: usize,
    pub summaries: Vec<PlanSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<FinancialPlan>>,
}

fn cors_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "POST, OPTIONS",
        "Access-Control-Allow-Headers": "Content-Type",
    })
}

fn error_response(status: u16, message: &str) -> Value {
    json!({
        "statusCode": status,
        "headers": cors_headers(),
        "body": json!({ "error": message }).to_string(),
    })
}

fn json_response(body: &PlanResponse) -> Value {
    match serde_json::to_string(body) {
        Ok(text) => json!({
            "statusCode": 200,
            "headers": cors_headers(),
            "body": text,
        }),
        Err(e) => error_response(500, &format!("Failed to serialize plans: {}", e)),
    }
}

async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<Value, Error> {
    let request = event.payload;

    // CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(json!({ "statusCode": 200, "headers": cors_headers(), "body": "" }));
    }

    if request.is_base64_encoded {
        return Ok(error_response(400, "Base64-encoded bodies are not supported"));
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let mut plan_request: PlanRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => return Ok(error_response(400, &format!("Invalid request: {}", e))),
    };

    if let Some(client) = plan_request.client.take() {
        plan_request.clients.push(client);
    }
    if plan_request.clients.is_empty() {
        return Ok(error_response(400, "No clients in request"));
    }

    let today = plan_request.today();
    let inputs: Vec<PlanInputs> = plan_request
        .clients
        .iter()
        .map(|record| PlanInputs::from_record(record, today))
        .collect();

    log::info!("Planning {} client(s) for {}-{:02}", inputs.len(), today.year, today.month0 + 1);

    let plans = Planner::new().plan_batch(&inputs);
    let response = PlanResponse {
        client_count: plans.len(),
        summaries: plans.iter().map(FinancialPlan::summary).collect(),
        plans: plan_request.detailed.then_some(plans),
    };

    Ok(json_response(&response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
