use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use http_body_util::{combinators::BoxBody, BodyExt, Full};
use hyper::{
    body::Bytes,
    header::{self, HeaderValue},
    server::conn::http1,
    service::service_fn,
    Method, Request, Response, StatusCode,
};
use hyper_util::rt::TokioIo;
use log::{debug, error, info};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::{
    error::WonderError,
    journal::Journal,
    page::{render_error, render_index, render_not_found, render_wonder},
};

#[derive(Error, Debug)]
pub(crate) enum ServeError {
    #[error("async IO error: {0}")]
    AsyncIo(#[from] tokio::io::Error),
}

fn full<T: Into<Bytes>>(chunk: T) -> BoxBody<Bytes, hyper::Error> {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}

/// Status and HTML body for one request. Reads the journal from disk.
pub(crate) fn respond(journal: &Journal, method: &Method, path: &str) -> (StatusCode, String) {
    if *method != Method::GET {
        return (StatusCode::NOT_FOUND, render_not_found(path));
    }

    if path == "/" {
        let wonders = journal.list_all();
        return (StatusCode::OK, render_index(&wonders, journal.root()));
    }

    let Some(slug) = path.strip_prefix("/wonder/") else {
        return (StatusCode::NOT_FOUND, render_not_found(path));
    };
    let slug = slug.strip_suffix('/').unwrap_or(slug);
    let Ok(slug) = urlencoding::decode(slug) else {
        return (StatusCode::NOT_FOUND, render_not_found(slug));
    };

    match journal.get_by_slug(&slug) {
        Ok(wonder) => (StatusCode::OK, render_wonder(&wonder)),
        Err(WonderError::InvalidSlug { .. } | WonderError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, render_not_found(&slug))
        }
        Err(err) => {
            error!("Failed to load {slug:?}: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, render_error())
        }
    }
}

async fn handle_request(
    journal: Arc<Journal>,
    req: Request<hyper::body::Incoming>,
) -> Result<Response<BoxBody<Bytes, hyper::Error>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    debug!("{method} {path}");

    let (status, body) =
        match tokio::task::spawn_blocking(move || respond(&journal, &method, &path)).await {
            Ok(reply) => reply,
            Err(err) => {
                error!("Request handler panicked: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, render_error())
            }
        };

    let mut response = Response::new(full(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    Ok(response)
}

pub(crate) async fn serve(journal: Journal, addr: SocketAddr) -> Result<(), ServeError> {
    let listener = TcpListener::bind(addr).await?;
    info!("Serving {:?} on http://{addr}", journal.root());

    let journal = Arc::new(journal);
    loop {
        let (stream, _) = listener.accept().await?;

        let io = TokioIo::new(stream);
        let journal = Arc::clone(&journal);

        tokio::task::spawn(async move {
            let service = service_fn(move |req| handle_request(Arc::clone(&journal), req));
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                error!("Error serving connection: {err:?}");
            }
        });
    }
}
