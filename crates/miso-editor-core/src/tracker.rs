//! The editor status tracker.
//!
//! A set of transformations over the current region snapshot, called by the
//! platform layer on input, focus, blur and submit. It holds configuration
//! only, no document state.

use chrono::{Local, NaiveTime};

use crate::config::EditorConfig;
use crate::platform::{ArticleForm, EditableRegion};
use crate::sanitize::Sanitizer;
use crate::status::StatusSnapshot;
use crate::submit::{SubmitError, SubmitOutcome};
use crate::text_helpers::trimmed_len;

#[derive(Clone, Debug, Default)]
pub struct EditorStatusTracker {
    config: EditorConfig,
    sanitizer: Sanitizer,
}

impl EditorStatusTracker {
    pub fn new(config: EditorConfig) -> Self {
        let sanitizer = config.sanitizer();
        Self { config, sanitizer }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    fn shows_placeholder(&self, text: &str) -> bool {
        text == self.config.placeholder
    }

    /// Status of the region, stamped with the current local time.
    pub fn compute_status<R: EditableRegion + ?Sized>(&self, region: &R) -> StatusSnapshot {
        self.compute_status_at(region, Local::now().time())
    }

    /// Status of the region at a given time.
    ///
    /// A region showing the placeholder reports zero counts.
    pub fn compute_status_at<R: EditableRegion + ?Sized>(
        &self,
        region: &R,
        now: NaiveTime,
    ) -> StatusSnapshot {
        let text = region.text();
        if self.shows_placeholder(&text) {
            return StatusSnapshot::placeholder(now);
        }
        let snapshot = StatusSnapshot::measure(&text, now);
        tracing::trace!(
            words = snapshot.word_count,
            chars = snapshot.char_count,
            "status recomputed"
        );
        snapshot
    }

    /// Empty the region if it only shows the placeholder. Called on focus.
    pub fn clear_placeholder<R: EditableRegion + ?Sized>(&self, region: &mut R) -> bool {
        if self.shows_placeholder(&region.text()) {
            region.set_text("");
            true
        } else {
            false
        }
    }

    /// Put the placeholder back if the region is blank. Called on blur and load.
    pub fn restore_placeholder_if_empty<R: EditableRegion + ?Sized>(&self, region: &mut R) -> bool {
        if region.text().trim().is_empty() {
            region.set_text(&self.config.placeholder);
            true
        } else {
            false
        }
    }

    /// Sanitize markup with the configured allow list and strip mode.
    pub fn sanitize(&self, markup: &str) -> String {
        self.sanitizer.sanitize(markup)
    }

    /// Validate the region before the form is submitted.
    ///
    /// Checks run in order: content length (the placeholder counts as empty),
    /// then category. Only when both pass is the sanitized markup written
    /// into the form's hidden content field.
    pub fn on_submit<R, F>(&self, region: &R, form: &mut F) -> Result<SubmitOutcome, SubmitError>
    where
        R: EditableRegion + ?Sized,
        F: ArticleForm + ?Sized,
    {
        let text = region.text();
        let len = if self.shows_placeholder(&text) {
            0
        } else {
            trimmed_len(&text)
        };
        let min = self.config.min_content_chars;
        if len < min {
            tracing::debug!(len, min, "submission blocked, content too short");
            return Err(SubmitError::TooShort { len, min });
        }

        let category = form
            .category()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                tracing::debug!("submission blocked, no category");
                SubmitError::MissingCategory
            })?;

        let content = self.sanitize(&region.html());
        form.set_content(&content)?;

        Ok(SubmitOutcome { content, category })
    }
}
