use std::collections::HashMap;

use reelscout_core::{CandidateSource, CandidateVideo, SearchQuery};

use crate::client::YoutubeClient;
use crate::error::YoutubeError;

impl CandidateSource for YoutubeClient {
    type Error = YoutubeError;

    fn is_configured(&self) -> bool {
        self.has_api_key()
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<String>, YoutubeError> {
        self.search_video_ids(query).await
    }

    async fn fetch_details(&self, ids: &[String]) -> Result<Vec<CandidateVideo>, YoutubeError> {
        self.fetch_videos(ids).await
    }

    async fn fetch_channel_subscribers(
        &self,
        channel_ids: &[String],
    ) -> Result<HashMap<String, u64>, YoutubeError> {
        self.fetch_subscriber_counts(channel_ids).await
    }
}
