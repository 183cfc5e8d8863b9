//! Request-body echo.
//!
//! The body is forwarded frame by frame as it arrives, never collected.
//! Frames larger than the configured chunk size are split so no single
//! write exceeds it. A read error mid-body is passed through to the
//! response stream, which makes hyper abort the connection instead of
//! sending a truncated body that looks complete.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, Request},
    response::{IntoResponse, Response},
};
use futures_util::{stream, Stream, StreamExt};

use crate::fixtures::FixtureState;
use crate::observability::metrics;

/// Echo handler: responds with the request body, byte for byte.
pub async fn echo_body(State(state): State<FixtureState>, request: Request<Body>) -> Response {
    let content_length = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    tracing::debug!(
        method = %request.method(),
        content_length = ?content_length,
        chunk_size = state.echo_chunk_size,
        "Echoing request body"
    );

    let frames = request.into_body().into_data_stream();
    let chunks = rechunk(frames, state.echo_chunk_size).inspect(|chunk| {
        if let Ok(bytes) = chunk {
            metrics::record_echo_bytes(bytes.len());
        }
    });

    Body::from_stream(chunks).into_response()
}

/// Split every frame of a byte stream into pieces of at most `chunk_size` bytes.
///
/// Empty frames are dropped and errors pass through unchanged. The stream
/// ends when the input ends, whatever the size of the last piece. A zero
/// chunk size is treated as one.
pub fn rechunk<S, E>(input: S, chunk_size: usize) -> impl Stream<Item = Result<Bytes, E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let chunk_size = chunk_size.max(1);

    input.flat_map(move |frame| {
        let pieces = match frame {
            Ok(mut bytes) => {
                let mut pieces = Vec::with_capacity(bytes.len().div_ceil(chunk_size));
                while !bytes.is_empty() {
                    let take = bytes.len().min(chunk_size);
                    pieces.push(Ok(bytes.split_to(take)));
                }
                pieces
            }
            Err(e) => vec![Err(e)],
        };
        stream::iter(pieces)
    })
}
