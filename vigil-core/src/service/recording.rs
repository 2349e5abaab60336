//! Recording catalog search
//!
//! Validates the requested window, dispatches on the recording source and
//! normalizes both vendor response shapes into [`RecordingPage`].

use std::collections::HashSet;
use std::sync::Arc;

use vigil_providers::platform::{
    CloudFile, CloudRecordData, CloudRecordRequest, LocalRecord, LocalRecordData,
    LocalRecordRequest,
};
use vigil_providers::VideoPlatform;

use crate::error::QueryError;
use crate::models::{Credential, RecordingItem, RecordingPage, RecordingQuery, RecordingSource};
use crate::validation::TimeRangeValidator;

/// Cloud searches use storage selector 1
const CLOUD_REC_TYPE: u8 = 1;

/// Recording query engine
#[derive(Clone)]
pub struct RecordingQueryEngine {
    platform: Arc<dyn VideoPlatform>,
    validator: TimeRangeValidator,
    default_page_size: u32,
}

impl std::fmt::Debug for RecordingQueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingQueryEngine")
            .field("platform", &self.platform.endpoint())
            .field("default_page_size", &self.default_page_size)
            .finish_non_exhaustive()
    }
}

impl RecordingQueryEngine {
    /// Default page size when neither the request nor the config sets one
    pub const DEFAULT_PAGE_SIZE: u32 = 100;

    #[must_use]
    pub fn new(platform: Arc<dyn VideoPlatform>) -> Self {
        Self {
            platform,
            validator: TimeRangeValidator::default(),
            default_page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_validator(mut self, validator: TimeRangeValidator) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn with_default_page_size(mut self, page_size: u32) -> Self {
        self.default_page_size = page_size;
        self
    }

    /// Search one page of recordings.
    ///
    /// An invalid window fails with [`QueryError::InvalidTimeRange`] before
    /// any request is sent. No matching recordings is an empty page, not an
    /// error.
    pub async fn query(
        &self,
        credential: &Credential,
        req: &RecordingQuery,
    ) -> Result<RecordingPage, QueryError> {
        self.validator.validate(req.source, req.start, req.end)?;

        let page_size = req.page_size.unwrap_or(self.default_page_size);
        tracing::debug!(
            device = %req.device_id,
            channel = req.channel,
            source = %req.source,
            start = %req.start,
            end = %req.end,
            "Searching recordings"
        );

        let page = match req.source {
            RecordingSource::Local => {
                let request = LocalRecordRequest {
                    access_token: credential.token().to_string(),
                    device_serial: req.device_id.clone(),
                    local_index: req.channel,
                    start_time: RecordingSource::Local.encode_instant(&req.start),
                    end_time: RecordingSource::Local.encode_instant(&req.end),
                    page_size,
                    record_type: req.record_kind.map(|k| k.as_local_param().to_string()),
                };
                local_page(self.platform.local_records(&request).await?)
            }
            RecordingSource::Cloud => {
                if req.record_kind.is_some() {
                    tracing::debug!("Record kind filter does not apply to cloud searches");
                }
                let request = CloudRecordRequest {
                    access_token: credential.token().to_string(),
                    device_serial: req.device_id.clone(),
                    channel_no: req.channel,
                    start_time: RecordingSource::Cloud.encode_instant(&req.start),
                    end_time: RecordingSource::Cloud.encode_instant(&req.end),
                    rec_type: CLOUD_REC_TYPE,
                    page_size: Some(page_size),
                };
                cloud_page(self.platform.cloud_records(&request).await?)
            }
        };

        tracing::debug!(
            items = page.items.len(),
            has_more = page.has_more,
            "Recording search complete"
        );
        Ok(page)
    }

    /// Follow continuation until the catalog is complete or `max_pages`
    /// pages were fetched.
    ///
    /// Items repeated on a page boundary are kept once. The returned page has
    /// `has_more` cleared only when the last fetched page reported the
    /// catalog complete; a walk cut short by the page limit, or one with no
    /// point to advance to, keeps it set.
    pub async fn query_all(
        &self,
        credential: &Credential,
        req: &RecordingQuery,
        max_pages: usize,
    ) -> Result<RecordingPage, QueryError> {
        let mut seen = HashSet::new();
        let mut result = RecordingPage::default();
        let mut next = Some(req.clone());
        let mut fetched = 0;

        while let Some(current) = next.take() {
            if fetched >= max_pages {
                tracing::warn!(max_pages, "Recording search stopped at page limit");
                result.has_more = true;
                break;
            }

            let page = self.query(credential, &current).await?;
            fetched += 1;

            next = current.next_page(&page);
            if next.is_none() && page.has_more {
                tracing::warn!(
                    pages = fetched,
                    "Recording search has more results but no point to continue from"
                );
            }

            result.has_more = page.has_more;
            result.continuation_token = page.continuation_token.clone();
            result
                .items
                .extend(page.items.into_iter().filter(|item| seen.insert((item.start, item.end))));
        }

        if !result.has_more {
            result.continuation_token = None;
        }

        Ok(result)
    }
}

fn local_page(data: LocalRecordData) -> RecordingPage {
    let items = data
        .records
        .into_iter()
        .filter_map(|record| {
            let LocalRecord {
                start_time,
                end_time,
                record_type,
                file_size,
            } = record;
            normalize(RecordingSource::Local, start_time, end_time, file_size, record_type, None)
        })
        .collect();

    RecordingPage {
        items,
        has_more: data.has_more,
        continuation_token: data.next_file_time.map(|t| t.to_string()),
    }
}

fn cloud_page(data: Option<CloudRecordData>) -> RecordingPage {
    let (files, has_more, next_file_time) = match data {
        None => return RecordingPage::default(),
        Some(CloudRecordData::Flat(files)) => (files, false, None),
        Some(CloudRecordData::Paged(envelope)) => {
            (envelope.files, !envelope.is_all, envelope.next_file_time)
        }
    };

    let items = files
        .into_iter()
        .filter_map(|file| {
            let CloudFile {
                start_time,
                end_time,
                file_size,
                file_id,
            } = file;
            normalize(RecordingSource::Cloud, start_time, end_time, file_size, None, file_id)
        })
        .collect();

    RecordingPage {
        items,
        has_more,
        continuation_token: next_file_time.map(|t| t.to_string()),
    }
}

/// Build a catalog entry from raw wire timestamps in `source`'s unit.
///
/// Entries with undecodable timestamps or an end before their start are
/// dropped.
fn normalize(
    source: RecordingSource,
    start_raw: i64,
    end_raw: i64,
    size: Option<u64>,
    kind: Option<String>,
    continuation_key: Option<String>,
) -> Option<RecordingItem> {
    let (Some(start), Some(end)) = (source.decode_instant(start_raw), source.decode_instant(end_raw))
    else {
        tracing::warn!(%source, start_raw, end_raw, "Dropping recording with invalid timestamps");
        return None;
    };

    let Ok(elapsed) = u64::try_from(end_raw - start_raw) else {
        tracing::warn!(%source, start_raw, end_raw, "Dropping recording that ends before it starts");
        return None;
    };

    let duration_seconds = match source {
        RecordingSource::Local => elapsed,
        RecordingSource::Cloud => elapsed / 1000,
    };

    Some(RecordingItem {
        start,
        end,
        size_bytes: size.unwrap_or(0),
        duration_seconds,
        source,
        kind,
        continuation_key,
    })
}
