// Module declarations
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub use worker::console_log;

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {
        println!($($arg)*);
    };
}

#[cfg(target_arch = "wasm32")]
use worker::{event, Context, Env, Method, Request, Response, Result};

#[cfg(target_arch = "wasm32")]
#[event(start)]
fn start() {
    console_error_panic_hook::set_once();
}

#[cfg(target_arch = "wasm32")]
#[event(fetch)]
pub async fn main(mut req: Request, env: Env, _ctx: Context) -> Result<Response> {
    use handlers::{unreadable_body, SubmissionHandler};
    use services::telegram::TelegramConfig;
    use utils::{init_logger, Logger};

    let lookup = |key: &str| env.var(key).ok().map(|v| v.to_string());
    init_logger(Logger::from_lookup(lookup));

    let method = req.method();
    let body = if method == Method::Post {
        req.text().await.map_err(unreadable_body)
    } else {
        Ok(String::new())
    };

    let handler = SubmissionHandler::from_config(TelegramConfig::from_lookup(lookup));
    let reply = handler.handle_read(&method.to_string(), body).await;

    middleware::add_cors_headers(into_worker_response(reply)?)
}

#[cfg(target_arch = "wasm32")]
fn into_worker_response(reply: responses::EndpointResponse) -> Result<Response> {
    let response = match reply.body {
        Some(body) => Response::from_json(&body)?,
        None => Response::empty()?,
    };
    Ok(response.with_status(reply.status))
}
