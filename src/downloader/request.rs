// Request builder - fixed H.264 / AAC / MP4 policy for every download

use super::models::DownloadRequest;

/// Build the request for one URL.
///
/// Pure: no I/O, accepts any string including the empty one. A playlist URL
/// gets `skip_playlist_expansion` so only the referenced video is fetched.
pub fn build(url: &str, is_playlist: bool) -> DownloadRequest {
    DownloadRequest::new(url.to_string(), is_playlist)
}
