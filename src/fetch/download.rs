use crate::error::{IoContext, Result};
use crate::fetch::progress::ProgressSink;
use crate::utils::{AtomicFile, CacheDir};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

const CHUNK_SIZE: usize = 64 * 1024;

/// An opened bulk document: its declared length and the body stream
pub struct Download {
    pub content_length: Option<u64>,
    pub body: Box<dyn Read + Send>,
}

/// Where the bulk document comes from
pub trait RegistrySource {
    fn open(&self) -> Result<Download>;
}

/// Streaming GET against the registry's bulk listing endpoint
pub struct HttpRegistry {
    agent: ureq::Agent,
    url: String,
}

impl HttpRegistry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .user_agent(concat!("npm-locate/", env!("CARGO_PKG_VERSION")))
                .build(),
            url: url.into(),
        }
    }
}

impl RegistrySource for HttpRegistry {
    fn open(&self) -> Result<Download> {
        info!("Fetching {}", self.url);
        let response = self.agent.get(&self.url).call()?;

        let content_length = response
            .header("Content-Length")
            .and_then(|v| v.trim().parse::<u64>().ok());
        debug!(?content_length, status = response.status(), "response headers");

        Ok(Download {
            content_length,
            body: Box::new(response.into_reader()),
        })
    }
}

/// Download the bulk document and install it as the cache's source document.
///
/// The body is streamed to `index.json.1` and renamed over `index.json` only
/// once fully written; on any failure the installed copy is left alone.
pub fn fetch(
    source: &dyn RegistrySource,
    cache: &CacheDir,
    progress: &mut dyn ProgressSink,
) -> Result<PathBuf> {
    let target = cache.source_document();
    let mut out = AtomicFile::create(&target)?;
    let temp = out.temp_path().to_path_buf();

    let Download {
        content_length,
        mut body,
    } = source.open()?;
    let total = content_length.filter(|&n| n > 0).unwrap_or(1);

    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).at(&temp),
        };
        out.write_all(&buf[..n]).at(&temp)?;
        progress.update(out.bytes_written(), total);
    }

    let written = out.bytes_written();
    out.flush().at(&temp)?;
    progress.finish(written, total);

    let installed = out.commit()?;
    info!("Downloaded {} bytes to {}", written, installed.display());
    Ok(installed)
}
