use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use tracing::info;

use crate::error::{Error, Result};
use crate::settings::Settings;

/// Fetches raw pages from the wiki. No retries: a failed request is reported
/// as is.
pub struct Fetcher {
    client: Client,
    base_url: String,
    random_url: String,
}

impl Fetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Fetcher {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            random_url: settings.random_url.clone(),
        })
    }

    /// Article URL, or the URL of a past revision when `oldid` is given.
    pub fn page_url(&self, title: &str, oldid: Option<u64>) -> String {
        let title = title.trim().replace(' ', "_");
        match oldid {
            Some(oldid) => format!("{}/w/index.php?title={}&oldid={}", self.base_url, title, oldid),
            None => format!("{}/wiki/{}", self.base_url, title),
        }
    }

    pub fn random_url(&self, lang_code: &str) -> String {
        format!("{}?langue={}", self.random_url, lang_code)
    }

    pub fn page(&self, title: &str, oldid: Option<u64>) -> Result<String> {
        self.get(&self.page_url(title, oldid))
    }

    /// A random page with an entry in the given language.
    pub fn random(&self, lang_code: &str) -> Result<String> {
        self.get(&self.random_url(lang_code))
    }

    fn get(&self, url: &str) -> Result<String> {
        let start = Instant::now();
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        info!(
            url,
            bytes = body.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "page fetched"
        );
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> Fetcher {
        Fetcher::new(&Settings {
            base_url: "https://fr.wiktionary.org/".into(),
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn article_urls() {
        let f = fetcher();
        assert_eq!(f.page_url("chat", None), "https://fr.wiktionary.org/wiki/chat");
        assert_eq!(
            f.page_url("pomme de terre", None),
            "https://fr.wiktionary.org/wiki/pomme_de_terre"
        );
        assert_eq!(
            f.page_url("chat", Some(123456)),
            "https://fr.wiktionary.org/w/index.php?title=chat&oldid=123456"
        );
    }

    #[test]
    fn random_url_carries_code() {
        assert_eq!(
            fetcher().random_url("en"),
            "https://tools.wmflabs.org/anagrimes/hasard.php?langue=en"
        );
    }
}
