//! Server-side rendering for Spin/WASI.

use leptos::{config::get_configuration, task::Executor as LeptosExecutor};
use leptos_wasi::{
    handler::HandlerError,
    prelude::{IncomingRequest, ResponseOutparam, WasiExecutor},
};
use shopfront_observability::StructuredLogger;
use wasi::exports::http::incoming_handler::Guest;
use wasi::http::proxy::export;

use crate::api::{CartSubmit, GetProduct};
use crate::app::{shell, App};

struct ShopfrontServer;

impl Guest for ShopfrontServer {
    fn handle(request: IncomingRequest, response_out: ResponseOutparam) {
        let logger = StructuredLogger::for_route("ssr");
        let executor = WasiExecutor::new(leptos_wasi::executor::Mode::Stalled);
        if let Err(e) = LeptosExecutor::init_local_custom_executor(executor.clone()) {
            logger
                .error_builder("executor init failed")
                .field("error", format!("{e:?}"))
                .emit();
            return;
        }
        executor.run_until(async {
            if let Err(e) = handle_request(request, response_out).await {
                logger
                    .error_builder("request failed")
                    .field("error", format!("{e:?}"))
                    .emit();
            }
        })
    }
}

async fn handle_request(
    request: IncomingRequest,
    response_out: ResponseOutparam,
) -> Result<(), HandlerError> {
    use leptos_wasi::prelude::Handler;

    let leptos_options = match get_configuration(None) {
        Ok(conf) => conf.leptos_options,
        Err(e) => {
            StructuredLogger::for_route("ssr")
                .error_builder("leptos configuration unavailable")
                .field("error", e.to_string())
                .emit();
            leptos::config::LeptosOptions::builder()
                .output_name("shopfront_storefront")
                .build()
        }
    };

    Handler::build(request, response_out)?
        .with_server_fn::<GetProduct>()
        .with_server_fn::<CartSubmit>()
        .generate_routes(App)
        .handle_with_context(move || shell(leptos_options.clone()), || {})
        .await?;

    Ok(())
}

export!(ShopfrontServer with_types_in wasi);
