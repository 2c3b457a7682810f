pub mod recommendation;
pub mod search;
pub mod video;

pub use recommendation::{round4, Recommendation, ScoreBreakdown};
pub use search::{DurationPreference, SearchRequest, SearchResponse, SkillLevel, VideoResponse};
pub use video::{
    ContentDetails, RawVideoRecord, SearchHit, SearchHitId, Snippet, Statistics, Thumbnail,
    Thumbnails, UNRANKED_SEARCH_RANK,
};
