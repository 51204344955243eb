// Poster spooling
// Upstream bytes go to a per-request temporary file; the file lives exactly as
// long as the response body that streams it

use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::io::SeekFrom;
use std::pin::Pin;
use std::task::{Context, Poll};
use tempfile::TempPath;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio_util::io::ReaderStream;

use crate::error::ApiError;

use super::provider::PosterStream;

/// A fully downloaded poster on disk, rewound for reading
pub struct SpooledPoster {
    file: File,
    len: u64,
    path: TempPath,
}

/// Drain `stream` into a fresh temporary file. On any error the file is
/// removed before returning.
pub async fn spool(mut stream: PosterStream) -> Result<SpooledPoster, ApiError> {
    let (file, path) = tempfile::Builder::new()
        .prefix("poster-")
        .suffix(".jpg")
        .tempfile()?
        .into_parts();
    let mut file = File::from_std(file);
    let mut len = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ApiError::Fetch(e.to_string()))?;
        file.write_all(&chunk).await?;
        len += chunk.len() as u64;
    }

    file.flush().await?;
    file.seek(SeekFrom::Start(0)).await?;

    tracing::debug!("Spooled {} poster bytes to {}", len, path.display());

    Ok(SpooledPoster { file, len, path })
}

impl SpooledPoster {
    pub fn len(&self) -> u64 {
        self.len
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn into_stream(self) -> TempFileStream {
        TempFileStream {
            inner: ReaderStream::new(self.file),
            _path: self.path,
        }
    }
}

/// Byte stream over a temporary file; dropping it deletes the file
pub struct TempFileStream {
    inner: ReaderStream<File>,
    _path: TempPath,
}

impl Stream for TempFileStream {
    type Item = std::io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
