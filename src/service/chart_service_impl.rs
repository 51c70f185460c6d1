use crate::common::*;

use crate::dto::caption_layout::*;
use crate::errors::chart_error::*;
use crate::model::chart::{chart_request::*, render_config::*, style::*};
use crate::service::{caption_layout::*, chart_synthesizer::*, compositor::*};
use crate::traits::render_traits::{chart_renderer::*, text_shaper::*};
use crate::traits::service_traits::chart_service::*;
use crate::utils_modules::io_utils::*;

#[doc = r#"
    Synchronous core of the chart pipeline, independent of any runtime.
    Nothing is returned until every stage has succeeded.
"#]
pub fn build_chart_image(
    renderer: &dyn ChartRenderer,
    shaper: &dyn TextShaper,
    style: &ChartStyle,
    request: &ChartRequest,
) -> Result<Vec<u8>, ChartError> {
    request.validate()?;

    let width: u32 = *request.width();
    let height: u32 = *request.height();

    let config: ChartConfig = synthesize(request.params(), style)?;

    match convert_json_from_struct(&config) {
        Ok(json) => debug!("[build_chart_image] {} config: {}", request.kind(), json),
        Err(e) => warn!("[build_chart_image] {:?}", e),
    }

    let chart: RgbaImage = renderer.render(&config, width, height)?;

    let caption: Option<CaptionLayout> = request
        .caption()
        .as_deref()
        .map(|caption| layout_caption(shaper, style, width, height, caption))
        .transpose()?;

    composite(width, height, chart, caption.as_ref(), *request.background_color())
}

#[derive(Debug, new)]
pub struct ChartServiceImpl<R: ChartRenderer, T: TextShaper> {
    renderer: Arc<R>,
    shaper: Arc<T>,
    style: Arc<ChartStyle>,
}

#[async_trait]
impl<R, T> ChartService for ChartServiceImpl<R, T>
where
    R: ChartRenderer + 'static,
    T: TextShaper + 'static,
{
    async fn generate_chart_image(&self, request: ChartRequest) -> Result<Vec<u8>, ChartError> {
        let renderer: Arc<R> = Arc::clone(&self.renderer);
        let shaper: Arc<T> = Arc::clone(&self.shaper);
        let style: Arc<ChartStyle> = Arc::clone(&self.style);
        let kind: String = request.kind().to_string();

        let handle: tokio::task::JoinHandle<Result<Vec<u8>, ChartError>> =
            tokio::task::spawn_blocking(move || {
                build_chart_image(renderer.as_ref(), shaper.as_ref(), &style, &request)
            });

        let result: Result<Vec<u8>, ChartError> = handle.await.map_err(|e| {
            ChartError::RenderFailure(format!(
                "[ChartServiceImpl->generate_chart_image] blocking task join failed (panic/cancelled): {}",
                e
            ))
        })?;

        match &result {
            Ok(png) => info!(
                "[ChartServiceImpl->generate_chart_image] {} chart generated ({} bytes)",
                kind,
                png.len()
            ),
            Err(e) if e.is_client_error() => {
                warn!("[ChartServiceImpl->generate_chart_image] {} rejected: {}", kind, e)
            }
            Err(e) => error!("[ChartServiceImpl->generate_chart_image] {} failed: {}", kind, e),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::color::*;
    use crate::utils_modules::test_fixtures::*;

    const CHART_COLOR: RgbaColor = RgbaColor::rgba(10, 200, 10, 200);

    fn request(kind: &str, params: Value, caption: Option<&str>, bgcolor: Option<&str>) -> ChartRequest {
        ChartRequest::from_parts(640, 480, kind, params, caption.map(str::to_string), bgcolor).unwrap()
    }

    fn bar_params() -> Value {
        json!({ "datum": [1, 2, 3, 5, 2], "labels": ["1", "2", "3", "4", "5"] })
    }

    fn decode(bytes: &[u8]) -> RgbaImage {
        image::load_from_memory(bytes).unwrap().to_rgba8()
    }

    fn service() -> ChartServiceImpl<SolidChartRenderer, FixedTextShaper> {
        ChartServiceImpl::new(
            Arc::new(SolidChartRenderer::new(CHART_COLOR)),
            Arc::new(FixedTextShaper),
            Arc::new(ChartStyle::default()),
        )
    }

    #[test]
    fn every_kind_yields_png_of_requested_size() {
        let style: ChartStyle = ChartStyle::default();
        let cases: Vec<(&str, Value)> = vec![
            ("doughnut", json!({ "value": 10, "range": { "max": 50 } })),
            ("gauge", json!({ "value": 42, "range": { "min": 0, "max": 100 } })),
            ("line", json!({ "datum": [[1, null, 3]], "labels": ["a", "b", "c"] })),
            ("pie", json!({ "datum": [3, 1], "legends": ["OK", "NG"] })),
            ("stackbar", json!({ "datum": [[1, 4], [5, 0]], "labels": ["a", "b"], "legends": ["OK", "NG"] })),
            ("bar", bar_params()),
        ];

        for (kind, params) in cases {
            let png: Vec<u8> = build_chart_image(
                &SolidChartRenderer::new(CHART_COLOR),
                &FixedTextShaper,
                &style,
                &request(kind, params, Some("42%"), None),
            )
            .unwrap();

            assert!(!png.is_empty());
            assert_eq!(decode(&png).dimensions(), (640, 480), "{kind}");
        }
    }

    #[test]
    fn background_and_caption_change_the_output() {
        let style: ChartStyle = ChartStyle::default();
        let renderer = SolidChartRenderer::new(CHART_COLOR);

        let plain: Vec<u8> =
            build_chart_image(&renderer, &FixedTextShaper, &style, &request("bar", bar_params(), None, None))
                .unwrap();
        let dressed: Vec<u8> = build_chart_image(
            &renderer,
            &FixedTextShaper,
            &style,
            &request("bar", bar_params(), Some("X"), Some("#ffffff")),
        )
        .unwrap();

        assert_ne!(plain, dressed);

        let decoded: RgbaImage = decode(&dressed);
        let corner: [u8; 4] = decoded.get_pixel(0, 0).0;
        let center: [u8; 4] = decoded.get_pixel(320, 240).0;

        /* opaque base, and the dark caption block covers the center on top of the chart */
        assert_eq!(corner[3], 255);
        assert_eq!(center[3], 255);
        assert!(center[1] < corner[1]);
        assert_eq!(decode(&plain).get_pixel(0, 0).0[3], CHART_COLOR.a);
    }

    #[test]
    fn render_failure_is_propagated() {
        let err: ChartError = build_chart_image(
            &FailingChartRenderer,
            &FixedTextShaper,
            &ChartStyle::default(),
            &request("bar", bar_params(), None, None),
        )
        .unwrap_err();

        assert!(matches!(err, ChartError::RenderFailure(_)));
    }

    #[test]
    fn oversized_caption_yields_no_image() {
        let mut tiny: ChartRequest = request("bar", bar_params(), None, None);
        /* 80% of one pixel is below every step of the search */
        tiny.height = 1;
        tiny.caption = Some("X".to_string());

        let err: ChartError = build_chart_image(
            &SolidChartRenderer::new(CHART_COLOR),
            &FixedTextShaper,
            &ChartStyle::default(),
            &tiny,
        )
        .unwrap_err();

        assert!(matches!(err, ChartError::CaptionTooLarge { .. }));
    }

    #[tokio::test]
    async fn service_runs_pipeline_on_blocking_pool() {
        let png: Vec<u8> = service()
            .generate_chart_image(request("pie", json!({ "datum": [1], "legends": ["a"] }), None, None))
            .await
            .unwrap();

        assert_eq!(decode(&png).dimensions(), (640, 480));
    }

    #[test]
    fn unknown_kind_never_reaches_the_service() {
        let err: ChartError =
            ChartRequest::from_parts(640, 480, "scatter", json!({}), None, None).unwrap_err();
        assert!(matches!(err, ChartError::UnsupportedChartKind(ref kind) if kind == "scatter"));
    }
}
