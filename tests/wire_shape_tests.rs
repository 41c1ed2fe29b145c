//! Wire shape compatibility with the webview bindings
//!
//! The JSON these types produce is the contract the TypeScript side was
//! written against; field spellings here are load-bearing.
use serde_json::json;

use manga_desk::application::Route;
use manga_desk::domain::{
    Chapter, ChapterFeed, ChapterQuery, DownloadRequest, MangaView, page_window,
};
use manga_desk::infrastructure::BackendError;

#[test]
fn manga_view_round_trips_camel_case() {
    let wire = json!({
        "id": "11aa",
        "title": "Moon Knight Errant",
        "status": "ongoing",
        "coverUrl": "https://covers.example/11aa.jpg",
        "langCodes": ["en", "fr"]
    });

    let view: MangaView = serde_json::from_value(wire.clone()).unwrap();
    assert_eq!(view.cover_url.as_deref(), Some("https://covers.example/11aa.jpg"));
    assert_eq!(view.lang_codes, vec!["en".to_owned(), "fr".to_owned()]);

    assert_eq!(serde_json::to_value(&view).unwrap(), wire);
}

#[test]
fn chapter_missing_optionals_serialize_as_null() {
    let chapter = Chapter {
        id: "c1".to_owned(),
        chapter: "Oneshot".to_owned(),
        volume: None,
        title: None,
        scan_group: None,
        pages: 32,
    };

    let wire = serde_json::to_value(&chapter).unwrap();
    assert_eq!(
        wire,
        json!({
            "id": "c1",
            "chapter": "Oneshot",
            "volume": null,
            "title": null,
            "scanGroup": null,
            "pages": 32
        })
    );
}

#[test]
fn chapter_feed_envelope_keeps_backend_field_names() {
    let wire = json!({
        "chapters": [{
            "id": "c1",
            "chapter": "1",
            "volume": "1",
            "title": "Beginnings",
            "scanGroup": { "id": "g1", "name": "night shift" },
            "pages": 20
        }],
        "limit": 10,
        "offset": 0,
        "total": 118
    });

    let feed: ChapterFeed = serde_json::from_value(wire).unwrap();
    assert_eq!(feed.chapters.len(), 1);
    assert_eq!(feed.chapters[0].scan_group.as_ref().unwrap().name, "night shift");
    assert_eq!(feed.pager().page_count(), 12);
}

#[test]
fn chapter_query_matches_the_invoke_arguments() {
    let query = ChapterQuery::first_page("11aa", "en", 10);

    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "mangaId": "11aa",
            "lang": "en",
            "limit": 10,
            "offset": 0
        })
    );
}

#[test]
fn download_request_lists_chapter_ids() {
    let request = DownloadRequest {
        chapter_ids: vec!["c1".to_owned(), "c9".to_owned()],
    };

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "chapterIds": ["c1", "c9"] })
    );
}

#[test]
fn page_window_serializes_for_the_navigation_strip() {
    let window = page_window(27, 30);

    assert_eq!(
        serde_json::to_value(&window).unwrap(),
        json!({
            "leadingJump": 1,
            "window": [25, 26, 27, 28, 29, 30],
            "trailingJump": null
        })
    );
}

#[test]
fn backend_errors_tag_their_kind() {
    let wire = serde_json::to_value(BackendError::EmptyQuery).unwrap();
    assert_eq!(wire, json!({ "kind": "emptyQuery" }));

    let wire = serde_json::to_value(BackendError::Api {
        status: 429,
        message: "slow down".to_owned(),
    })
    .unwrap();
    assert_eq!(
        wire,
        json!({
            "kind": "api",
            "detail": { "status": 429, "message": "slow down" }
        })
    );

    let parsed: BackendError =
        serde_json::from_value(json!({ "kind": "internal", "detail": "boom" })).unwrap();
    assert_eq!(parsed, BackendError::Internal("boom".to_owned()));
}

#[test]
fn routes_serialize_as_view_names() {
    assert_eq!(serde_json::to_value(Route::Search).unwrap(), json!("search"));
    assert_eq!(serde_json::to_value(Route::Title).unwrap(), json!("title"));
}
