// src/middleware/cors.rs

/// Permissive CORS headers sent with every response.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// Add CORS headers to response
#[cfg(target_arch = "wasm32")]
pub fn add_cors_headers(mut response: worker::Response) -> worker::Result<worker::Response> {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.set(name, value)?;
    }

    Ok(response)
}
