/*
Description : Chart image generator. Reads Lambda-proxy style events (one JSON per stdin line),
              renders the requested chart to PNG and answers with base64 binary responses.

History     : [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod errors;

mod enums;

mod dto;
use dto::inspect_query::*;

mod env_configuration;
use env_configuration::env_config::*;

mod model;
use model::{chart::style::*, configs::total_config::*};

mod utils_modules;
use utils_modules::{io_utils::*, logger_utils::*};

mod traits;

mod renderer;
use renderer::{glyph_text_shaper::*, plotters_renderer::*};

mod repository;
use repository::{meminfo_repository_impl::*, netdata_repository_impl::*, ping_repository_impl::*};

mod service;
use service::{chart_service_impl::*, inspect_service_impl::*};

mod controller;
use controller::main_controller::*;

#[tokio::main]
async fn main() {
    /* global logger and .env */
    dotenv().ok();
    let _logger: LoggerHandle = set_global_logger();

    info!("makechart api start!");

    let config: TotalConfig = TotalConfig::load(&SERVER_CONFIG_PATH).unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while loading the server config.";
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    let font_bytes: Vec<u8> = read_bytes_from_file(config.font().path()).unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while reading the chart font.";
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    let style: Arc<ChartStyle> = Arc::new(config.chart().clone());

    let renderer: PlottersChartRenderer = PlottersChartRenderer::new(Arc::clone(&style), &font_bytes)
        .unwrap_or_else(|e| {
            let err_msg: &str = "[main] An issue occurred while initializing the chart renderer.";
            error!("{} {:?}", err_msg, e);
            panic!("{} {:?}", err_msg, e)
        });

    let shaper: GlyphTextShaper = GlyphTextShaper::new(font_bytes).unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while initializing the caption shaper.";
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    let netdata_repository: NetdataRepositoryImpl = NetdataRepositoryImpl::new(config.netdata())
        .unwrap_or_else(|e| {
            let err_msg: &str = "[main] An issue occurred while initializing the netdata client.";
            error!("{} {:?}", err_msg, e);
            panic!("{} {:?}", err_msg, e)
        });

    /* dependency injection */
    let chart_service: ChartServiceImpl<PlottersChartRenderer, GlyphTextShaper> =
        ChartServiceImpl::new(Arc::new(renderer), Arc::new(shaper), style);

    let inspect_service: InspectServiceImpl<
        NetdataRepositoryImpl,
        PingRepositoryImpl,
        MemInfoRepositoryImpl,
    > = InspectServiceImpl::new(
        Arc::new(netdata_repository),
        Arc::new(PingRepositoryImpl::new(*config.ping().timeout_secs())),
        Arc::new(MemInfoRepositoryImpl::default()),
    );

    let defaults: InspectDefaults = InspectDefaults::new(
        *config.system().default_width(),
        *config.system().default_height(),
        config.netdata().default_chart().clone(),
        *config.ping().default_try_count(),
        *config.ping().max_try_count(),
        *config.ping().max_hosts(),
    );

    let main_controller: MainController<
        ChartServiceImpl<PlottersChartRenderer, GlyphTextShaper>,
        InspectServiceImpl<NetdataRepositoryImpl, PingRepositoryImpl, MemInfoRepositoryImpl>,
    > = MainController::new(chart_service, inspect_service, defaults);

    main_controller.main_task().await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}
