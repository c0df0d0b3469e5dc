use crate::domain::ports::DescriptionGenerator;
use std::collections::VecDeque;

pub const DEFAULT_HISTORY: usize = 10;
pub const DESCRIPTION_PLACEHOLDER: &str = "Description unavailable";

/// Feeds the generator a rolling window of its own recent output so
/// consecutive descriptions do not repeat each other.
pub struct DescriptionWriter<'a> {
    generator: &'a dyn DescriptionGenerator,
    recent: VecDeque<String>,
    capacity: usize,
}

impl<'a> DescriptionWriter<'a> {
    pub fn new(generator: &'a dyn DescriptionGenerator, capacity: usize) -> Self {
        Self {
            generator,
            recent: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn recent(&self) -> Vec<String> {
        self.recent.iter().cloned().collect()
    }

    /// Never fails: a generator error yields the placeholder, which is not
    /// added to the history.
    pub async fn describe(&mut self, game: &str, promo: Option<&str>, time: Option<&str>) -> String {
        let recent = self.recent();
        match self.generator.generate(promo, time, &recent).await {
            Ok(text) => {
                let text = text.trim().to_string();
                if self.capacity > 0 {
                    if self.recent.len() == self.capacity {
                        self.recent.pop_front();
                    }
                    self.recent.push_back(text.clone());
                }
                text
            }
            Err(e) => {
                tracing::warn!("⚠️ Description failed for {}: {}", game, e);
                DESCRIPTION_PLACEHOLDER.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{EtlError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes a counter and remembers the history it was shown.
    struct Recorder {
        calls: Mutex<Vec<Vec<String>>>,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl DescriptionGenerator for Recorder {
        async fn generate(&self, _promo: Option<&str>, _time: Option<&str>, recent: &[String]) -> Result<String> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(recent.to_vec());
            let n = calls.len();
            if Some(n) == self.fail_on {
                return Err(EtlError::DescriptionError {
                    message: "rate limited".to_string(),
                });
            }
            Ok(format!(" text {} ", n))
        }
    }

    #[tokio::test]
    async fn test_history_is_bounded_and_oldest_first() {
        let recorder = Recorder {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        };
        let mut writer = DescriptionWriter::new(&recorder, 3);

        for _ in 0..5 {
            writer.describe("game", None, Some("7:05 PM")).await;
        }

        assert_eq!(writer.recent(), vec!["text 3", "text 4", "text 5"]);
        let calls = recorder.calls.lock().unwrap();
        assert_eq!(calls[0], Vec::<String>::new());
        assert_eq!(calls[4], vec!["text 2", "text 3", "text 4"]);
    }

    #[tokio::test]
    async fn test_failure_returns_placeholder_without_touching_history() {
        let recorder = Recorder {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(2),
        };
        let mut writer = DescriptionWriter::new(&recorder, DEFAULT_HISTORY);

        assert_eq!(writer.describe("a", None, None).await, "text 1");
        assert_eq!(writer.describe("b", Some("Bobblehead"), None).await, DESCRIPTION_PLACEHOLDER);
        assert_eq!(writer.describe("c", None, None).await, "text 3");
        assert_eq!(writer.recent(), vec!["text 1", "text 3"]);
    }
}
