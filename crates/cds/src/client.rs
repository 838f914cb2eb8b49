//! Submit, poll and download against the archive's task API.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::credentials::Credentials;
use crate::error::CdsError;
use crate::request::RetrieveRequest;

/// Factor the poll interval grows by after every unfinished reply.
const POLL_GROWTH: f64 = 1.5;

// ---------------------------------------------------------------------------
// Retrieve
// ---------------------------------------------------------------------------

/// Something that can turn a retrieve request into a file on disk.
pub trait Retrieve {
    /// Fetches `request` for `product` and writes the result to `target`.
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError`] on any transport, archive or filesystem
    /// failure.
    fn retrieve(
        &self,
        product: &str,
        request: &RetrieveRequest,
        target: &Path,
    ) -> Result<u64, CdsError>;
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Timeouts and polling behaviour of [`CdsClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    timeout: Duration,
    poll_initial: Duration,
    poll_max: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3600),
            poll_initial: Duration::from_secs(1),
            poll_max: Duration::from_secs(120),
        }
    }
}

impl ClientConfig {
    /// Per-request HTTP timeout, downloads included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// First sleep between status polls.
    pub fn with_poll_initial(mut self, interval: Duration) -> Self {
        self.poll_initial = interval;
        self
    }

    /// Upper bound on the sleep between status polls.
    pub fn with_poll_max(mut self, interval: Duration) -> Self {
        self.poll_max = interval;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError::InvalidRequest`] for a zero timeout or a poll
    /// cap below the initial interval.
    pub fn validate(&self) -> Result<(), CdsError> {
        if self.timeout.is_zero() {
            return Err(CdsError::InvalidRequest {
                reason: "timeout must be positive".to_string(),
            });
        }
        if self.poll_max < self.poll_initial {
            return Err(CdsError::InvalidRequest {
                reason: format!(
                    "poll cap {:?} is below the initial interval {:?}",
                    self.poll_max, self.poll_initial
                ),
            });
        }
        Ok(())
    }
}

/// Next poll interval: grow by [`POLL_GROWTH`], capped at `max`.
fn next_interval(current: Duration, max: Duration) -> Duration {
    current.mul_f64(POLL_GROWTH).min(max)
}

// ---------------------------------------------------------------------------
// Task replies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TaskState {
    Queued,
    Running,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct TaskReply {
    state: TaskState,
    request_id: Option<String>,
    location: Option<String>,
    content_length: Option<u64>,
    error: Option<TaskErrorReply>,
}

#[derive(Debug, Deserialize)]
struct TaskErrorReply {
    message: Option<String>,
    reason: Option<String>,
}

/// What to do after a reply.
#[derive(Debug, PartialEq)]
enum Step {
    Wait { request_id: String },
    Download {
        request_id: String,
        location: String,
        length: Option<u64>,
    },
}

fn interpret(reply: TaskReply) -> Result<Step, CdsError> {
    let request_id = reply.request_id.unwrap_or_default();
    match reply.state {
        TaskState::Queued | TaskState::Running => {
            if request_id.is_empty() {
                return Err(CdsError::UnexpectedReply {
                    reason: "unfinished task without a request_id".to_string(),
                });
            }
            Ok(Step::Wait { request_id })
        }
        TaskState::Completed => {
            let location = reply.location.ok_or_else(|| CdsError::UnexpectedReply {
                reason: "completed task without a location".to_string(),
            })?;
            Ok(Step::Download {
                request_id,
                location,
                length: reply.content_length,
            })
        }
        TaskState::Failed => {
            let message = reply
                .error
                .and_then(|e| e.message.or(e.reason))
                .unwrap_or_else(|| "no reason given".to_string());
            Err(CdsError::TaskFailed {
                request_id,
                message,
            })
        }
        TaskState::Unknown => Err(CdsError::UnexpectedReply {
            reason: "unknown task state".to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// CdsClient
// ---------------------------------------------------------------------------

/// Blocking client for the archive's retrieve API.
///
/// A retrieve submits the request, polls the task with a growing interval
/// until the archive reports it completed or failed, and streams the
/// result to disk. Nothing is retried.
#[derive(Debug)]
pub struct CdsClient {
    http: reqwest::blocking::Client,
    credentials: Credentials,
    config: ClientConfig,
}

impl CdsClient {
    /// Builds a client.
    ///
    /// # Errors
    ///
    /// Returns [`CdsError`] if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self, CdsError> {
        config.validate()?;
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            credentials,
            config,
        })
    }

    fn submit(&self, product: &str, request: &RetrieveRequest) -> Result<TaskReply, CdsError> {
        let url = format!("{}/resources/{product}", self.credentials.url());
        debug!(%url, "submitting request");
        let reply = self
            .http
            .post(&url)
            .basic_auth(self.credentials.user(), Some(self.credentials.secret()))
            .json(request)
            .send()?
            .error_for_status()?
            .json()?;
        Ok(reply)
    }

    fn status(&self, request_id: &str) -> Result<TaskReply, CdsError> {
        let url = format!("{}/tasks/{request_id}", self.credentials.url());
        let reply = self
            .http
            .get(&url)
            .basic_auth(self.credentials.user(), Some(self.credentials.secret()))
            .send()?
            .error_for_status()?
            .json()?;
        Ok(reply)
    }

    fn release(&self, request_id: &str) {
        let url = format!("{}/tasks/{request_id}", self.credentials.url());
        let result = self
            .http
            .delete(&url)
            .basic_auth(self.credentials.user(), Some(self.credentials.secret()))
            .send()
            .and_then(|r| r.error_for_status());
        if let Err(e) = result {
            warn!(request_id, error = %e, "could not release task");
        }
    }

    fn download(&self, location: &str, length: Option<u64>, target: &Path) -> Result<u64, CdsError> {
        info!(%location, bytes = ?length, target = %target.display(), "downloading");
        let mut response = self.http.get(location).send()?.error_for_status()?;
        save_body(&mut response, length, target)
    }
}

/// Streams `body` into `target` and checks the byte count against
/// `length` when the archive announced one.
///
/// A partial file is removed before the error is returned.
fn save_body<R: Read>(body: &mut R, length: Option<u64>, target: &Path) -> Result<u64, CdsError> {
    let io_error = |action: &'static str| {
        move |source: io::Error| CdsError::Io {
            action,
            path: target.to_path_buf(),
            source,
        }
    };

    let mut file = File::create(target).map_err(io_error("creating"))?;
    let result = io::copy(body, &mut file)
        .map_err(io_error("writing"))
        .and_then(|written| match length {
            Some(expected) if written != expected => Err(CdsError::IncompleteDownload {
                expected,
                got: written,
            }),
            _ => Ok(written),
        });
    drop(file);

    if result.is_err()
        && let Err(e) = fs::remove_file(target)
    {
        warn!(path = %target.display(), error = %e, "could not remove partial download");
    }
    result
}

/// Releases the task whatever the download outcome, then hands the
/// outcome back.
fn settle<T>(
    request_id: &str,
    outcome: Result<T, CdsError>,
    release: impl FnOnce(&str),
) -> Result<T, CdsError> {
    if !request_id.is_empty() {
        release(request_id);
    }
    outcome
}

impl Retrieve for CdsClient {
    #[tracing::instrument(skip(self, request), fields(target = %target.display()))]
    fn retrieve(
        &self,
        product: &str,
        request: &RetrieveRequest,
        target: &Path,
    ) -> Result<u64, CdsError> {
        request.validate()?;
        let started = Instant::now();
        let mut interval = self.config.poll_initial;
        let mut reply = self.submit(product, request)?;

        let (request_id, location, length) = loop {
            match interpret(reply)? {
                Step::Wait { request_id } => {
                    debug!(%request_id, sleep = ?interval, "task not finished");
                    thread::sleep(interval);
                    interval = next_interval(interval, self.config.poll_max);
                    reply = self.status(&request_id)?;
                }
                Step::Download {
                    request_id,
                    location,
                    length,
                } => break (request_id, location, length),
            }
        };

        let outcome = self.download(&location, length, target);
        let written = settle(&request_id, outcome, |id| self.release(id))?;
        info!(bytes = written, elapsed = ?started.elapsed(), "retrieved");
        Ok(written)
    }
}
