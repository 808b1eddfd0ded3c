use std::sync::Arc;

use crate::ports::catalog::{ArtistRef, Candidate, CatalogClient, MockCatalogClient};

pub fn candidate(video_id: &str, title: &str, artists: &[&str]) -> Candidate {
    Candidate {
        video_id: video_id.to_string(),
        title: title.to_string(),
        artists: artists
            .iter()
            .map(|name| ArtistRef {
                name: name.to_string(),
                id: None,
            })
            .collect(),
        ..Default::default()
    }
}

pub fn candidate_of_type(video_id: &str, title: &str, result_type: &str) -> Candidate {
    Candidate {
        result_type: Some(result_type.to_string()),
        ..candidate(video_id, title, &[])
    }
}

/// A catalog mock answering every strategy with the same candidates.
pub fn catalog_returning(candidates: Vec<Candidate>) -> Arc<dyn CatalogClient> {
    let mut client = MockCatalogClient::new();
    client
        .expect_search()
        .returning(move |_, _, _| Ok(candidates.clone()));
    Arc::new(client)
}

/// A catalog mock that fails the test if it is ever called.
pub fn catalog_never_called() -> Arc<dyn CatalogClient> {
    let mut client = MockCatalogClient::new();
    client.expect_search().never();
    Arc::new(client)
}
