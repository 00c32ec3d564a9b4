use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};

use crate::error::FetchError;

const BROWSER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared client. The timeout of the first caller wins for the whole process.
pub fn http_client(timeout: Duration) -> Result<&'static Client, FetchError> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::from)
    })
}

pub fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let resp = client
        .get(url)
        .header(USER_AGENT, BROWSER_AGENT)
        .header(ACCEPT_LANGUAGE, "en-GB,en;q=0.9")
        .send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(resp.text()?)
}

/// Enforces a minimum gap between request start times across threads.
#[derive(Debug)]
pub struct RequestLimiter {
    min_interval: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RequestLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(None),
        }
    }

    pub fn wait(&self) {
        let delay = {
            let mut guard = self
                .next_slot
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let now = Instant::now();
            let slot = match *guard {
                Some(next) if next > now => next,
                _ => now,
            };
            *guard = Some(slot + self.min_interval);
            slot.saturating_duration_since(now)
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}
