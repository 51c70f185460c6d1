use crate::common::*;

use crate::dto::{bin_response::*, generate_request::*, http_event::*, inspect_query::*};
use crate::errors::chart_error::*;
use crate::model::chart::chart_request::*;
use crate::traits::service_traits::{chart_service::*, inspect_service::*};

pub const INSPECT_PATH: &str = "/makechart-inspect";
pub const GENERATE_PATH: &str = "/makechart-generate";

#[derive(Debug, new)]
pub struct MainController<C: ChartService, I: InspectService> {
    chart_service: C,
    inspect_service: I,
    defaults: InspectDefaults,
}

#[doc = "400 for anything the caller got wrong, 500 when rendering itself broke."]
fn chart_error_response(err: &ChartError) -> BinResponse {
    let status_code: u16 = if err.is_client_error() { 400 } else { 500 };
    BinResponse::error(status_code, err.to_string())
}

impl<C: ChartService, I: InspectService> MainController<C, I> {
    #[doc = r#"
        Reads one Lambda-proxy event per stdin line and answers each with one JSON response
        line on stdout, until stdin closes. A malformed event gets a 400 and the loop goes on.
    "#]
    pub async fn main_task(&self) -> anyhow::Result<()> {
        let mut lines = AsyncBufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines
            .next_line()
            .await
            .context("[MainController->main_task] failed to read stdin")?
        {
            if line.trim().is_empty() {
                continue;
            }

            let response: BinResponse = match serde_json::from_str::<HttpEvent>(&line) {
                Ok(event) => self.handle(&event).await,
                Err(e) => {
                    warn!("[MainController->main_task] malformed event: {:?}", e);
                    BinResponse::error(400, format!("malformed event: {}", e))
                }
            };

            let mut output: String = serde_json::to_string(&response)
                .context("[MainController->main_task] failed to serialize response")?;
            output.push('\n');

            stdout.write_all(output.as_bytes()).await?;
            stdout.flush().await?;
        }

        info!("[MainController->main_task] stdin closed, shutting down");

        Ok(())
    }

    #[doc = "Routes one event to its handler and always produces a response."]
    pub async fn handle(&self, event: &HttpEvent) -> BinResponse {
        let response: BinResponse = match event.path().as_str() {
            INSPECT_PATH => self.inspect(event).await,
            GENERATE_PATH => self.generate(event).await,
            other => BinResponse::error(404, format!("unknown path: {}", other)),
        };

        info!(
            "[MainController->handle] {} -> {}",
            event.path(),
            response.status_code()
        );

        response
    }

    async fn inspect(&self, event: &HttpEvent) -> BinResponse {
        let query: InspectQuery = match InspectQuery::from_event(event, &self.defaults) {
            Ok(query) => query,
            Err(e) => {
                warn!("{:?}", e);
                return BinResponse::error(400, e.to_string());
            }
        };

        let request: ChartRequest = match self.inspect_service.inspect_request(&query).await {
            Ok(request) => request,
            Err(e) => match e.downcast::<ChartError>() {
                Ok(chart_err) => {
                    warn!("[MainController->inspect] {} request rejected: {}", query.name(), chart_err);
                    return chart_error_response(&chart_err);
                }
                Err(e) => {
                    error!("[MainController->inspect] {} source failed: {:?}", query.name(), e);
                    return BinResponse::error(502, format!("{} source failed: {:#}", query.name(), e));
                }
            },
        };

        self.render(request).await
    }

    async fn generate(&self, event: &HttpEvent) -> BinResponse {
        let body: GenerateRequestBody = match event
            .decoded_body()
            .and_then(|raw| serde_json::from_str::<GenerateRequestBody>(&raw).map_err(anyhow::Error::from))
        {
            Ok(body) => body,
            Err(e) => {
                warn!("[MainController->generate] bad body: {:?}", e);
                return BinResponse::error(400, format!("invalid request body: {:#}", e));
            }
        };

        match body.into_chart_request() {
            Ok(request) => self.render(request).await,
            Err(e) => {
                warn!("[MainController->generate] {}", e);
                chart_error_response(&e)
            }
        }
    }

    async fn render(&self, request: ChartRequest) -> BinResponse {
        match self.chart_service.generate_chart_image(request).await {
            Ok(png) => BinResponse::png(&png),
            Err(e) => chart_error_response(&e),
        }
    }
}
