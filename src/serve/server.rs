// src/serve/server.rs

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, anyhow};
use serde::Serialize;
use tiny_http::{Header, Request, Response, Server};
use tracing::{debug, info, warn};

use crate::config::model::ServeConfig;
use crate::serve::reload::ReloadHub;

/// How long a `/__livereload` poll may hang before answering unchanged.
const POLL_TIMEOUT: Duration = Duration::from_secs(25);

/// Script injected into served HTML; it long-polls the reload endpoint and
/// refreshes the page when the generation advances.
const RELOAD_SCRIPT: &str = "<script>\n\
(function () {\n\
  var since = null;\n\
  function poll() {\n\
    fetch('/__livereload?since=' + (since === null ? 0 : since))\n\
      .then(function (res) { return res.json(); })\n\
      .then(function (body) {\n\
        if (since !== null && body.generation > since) { location.reload(); return; }\n\
        since = body.generation;\n\
        poll();\n\
      })\n\
      .catch(function () { setTimeout(poll, 1000); });\n\
  }\n\
  poll();\n\
})();\n\
</script>\n";

#[derive(Serialize)]
struct ReloadPayload {
    generation: u64,
}

/// Handle for the preview server. The accept loop runs on a detached OS
/// thread for the lifetime of the process.
#[derive(Debug)]
pub struct ServerHandle {
    pub addr: String,
}

/// Start the preview server rooted at `root`.
pub fn spawn_server(root: PathBuf, config: &ServeConfig, reload: ReloadHub) -> Result<ServerHandle> {
    let addr = format!("{}:{}", config.host, config.port);
    let server = Server::http(&addr)
        .map_err(|err| anyhow!("binding preview server on {addr}: {err}"))?;

    info!("preview server listening on http://{addr}/");

    std::thread::spawn(move || serve_loop(server, root, reload));

    Ok(ServerHandle { addr })
}

fn serve_loop(server: Server, root: PathBuf, reload: ReloadHub) {
    for request in server.incoming_requests() {
        let url = request.url().to_string();

        if let Some(rest) = url.strip_prefix("/__livereload") {
            let since = parse_since(rest);
            let hub = reload.clone();
            // Long polls block; each gets its own short-lived thread so the
            // accept loop keeps serving static files.
            std::thread::spawn(move || {
                let generation = hub.wait_past(since, POLL_TIMEOUT);
                respond_json(request, ReloadPayload { generation });
            });
            continue;
        }

        respond_static(request, &root, &url);
    }

    debug!("preview server loop ended");
}

/// Extract `since=N` from the query-string tail of the reload URL.
fn parse_since(rest: &str) -> u64 {
    rest.strip_prefix("?")
        .into_iter()
        .flat_map(|query| query.split('&'))
        .find_map(|pair| pair.strip_prefix("since="))
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

fn respond_json(request: Request, payload: ReloadPayload) {
    let response = match serde_json::to_vec(&payload) {
        Ok(body) => with_content_type(Response::from_data(body), "application/json"),
        Err(err) => {
            warn!("serializing reload payload: {err}");
            Response::from_data(Vec::new()).with_status_code(500)
        }
    };
    if let Err(err) = request.respond(response) {
        debug!("reload poller went away: {err}");
    }
}

fn respond_static(request: Request, root: &Path, url: &str) {
    let rel = url.split('?').next().unwrap_or(url).trim_start_matches('/');
    let rel = Path::new(rel);

    // Reject anything that climbs out of the served root.
    if rel
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        respond_not_found(request, url);
        return;
    }

    let mut path = root.join(rel);
    if path.is_dir() {
        path = path.join("index.html");
    }

    match fs::read(&path) {
        Ok(bytes) => {
            let mime = content_type_for(&path);
            let body = if mime == "text/html" {
                inject_reload_script(bytes)
            } else {
                bytes
            };
            let response = with_content_type(Response::from_data(body), mime);
            if let Err(err) = request.respond(response) {
                debug!("client went away: {err}");
            }
        }
        Err(err) => {
            debug!(url = %url, "not serving: {err}");
            respond_not_found(request, url);
        }
    }
}

fn respond_not_found(request: Request, url: &str) {
    let body = format!("404 not found: {url}\n");
    let response =
        with_content_type(Response::from_data(body.into_bytes()), "text/plain").with_status_code(404);
    if let Err(err) = request.respond(response) {
        debug!("client went away: {err}");
    }
}

fn with_content_type(
    response: Response<std::io::Cursor<Vec<u8>>>,
    mime: &str,
) -> Response<std::io::Cursor<Vec<u8>>> {
    match Header::from_bytes(&b"Content-Type"[..], mime.as_bytes()) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

/// Place the reload script before `</body>` when present, else append it.
fn inject_reload_script(mut body: Vec<u8>) -> Vec<u8> {
    let needle = b"</body>";
    if let Some(pos) = body
        .windows(needle.len())
        .position(|window| window == needle)
    {
        body.splice(pos..pos, RELOAD_SCRIPT.bytes());
    } else {
        body.extend_from_slice(RELOAD_SCRIPT.as_bytes());
    }
    body
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") | Some("map") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        Some("xml") => "application/xml",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}
