//! End-to-end dispatch tests against a stubbed platform.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use reqwest::StatusCode;

use owobot::bot::Bot;
use owobot::error::PlatformError;
use owobot::owo::{MAX_POST_CHARS, Owoifier};
use owobot::platform::{Platform, Status, User};
use owobot::thread::resolve_root;

const MONITORED: &str = "77";
const BOT: &str = "88";

// ── Stub platform ───────────────────────────────────────────────────

/// Canned statuses and timeline, with captured publishes.
struct StubPlatform {
    statuses: Vec<Status>,
    timeline: Vec<Status>,
    published: Arc<Mutex<Vec<(String, Option<String>)>>>,
    fail_fetches: bool,
}

impl StubPlatform {
    fn new(statuses: Vec<Status>, timeline: Vec<Status>) -> (Self, Published) {
        let published = Arc::new(Mutex::new(Vec::new()));
        let stub = Self {
            statuses,
            timeline,
            published: Arc::clone(&published),
            fail_fetches: false,
        };
        (stub, published)
    }
}

type Published = Arc<Mutex<Vec<(String, Option<String>)>>>;

fn stub_error(endpoint: &str) -> PlatformError {
    PlatformError::Api {
        endpoint: endpoint.into(),
        status: StatusCode::NOT_FOUND,
        body: "stub: no such status".into(),
    }
}

#[async_trait]
impl Platform for StubPlatform {
    async fn status(&self, id: &str) -> Result<Status, PlatformError> {
        if self.fail_fetches {
            return Err(stub_error("statuses/show.json"));
        }
        self.statuses
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| stub_error("statuses/show.json"))
    }

    async fn user_timeline(
        &self,
        _user_id: &str,
        count: usize,
    ) -> Result<Vec<Status>, PlatformError> {
        if self.fail_fetches {
            return Err(stub_error("statuses/user_timeline.json"));
        }
        Ok(self.timeline.iter().take(count).cloned().collect())
    }

    async fn publish(&self, text: &str, in_reply_to: Option<&str>) -> Result<(), PlatformError> {
        self.published
            .lock()
            .unwrap()
            .push((text.to_string(), in_reply_to.map(String::from)));
        Ok(())
    }
}

// ── Status builders ─────────────────────────────────────────────────

fn plain(id: &str, author_id: &str, screen_name: &str, text: &str) -> Status {
    Status {
        id: id.into(),
        user: User {
            id: author_id.into(),
            screen_name: screen_name.into(),
        },
        extended_tweet: None,
        full_text: None,
        text: Some(text.into()),
        in_reply_to_status_id: None,
        in_reply_to_user_id: None,
        in_reply_to_screen_name: None,
        retweeted_status: None,
    }
}

fn reply(id: &str, author_id: &str, text: &str, to_status: &str, to_user: &str) -> Status {
    let mut status = plain(id, author_id, "ben", text);
    status.in_reply_to_status_id = Some(to_status.into());
    status.in_reply_to_user_id = Some(to_user.into());
    status.in_reply_to_screen_name = Some("ben".into());
    status
}

fn textless(id: &str, author_id: &str) -> Status {
    let mut status = plain(id, author_id, "owobot", "");
    status.text = None;
    status
}

fn make_bot(stub: StubPlatform, seed: u64) -> Bot<StubPlatform, StdRng> {
    Bot::new(
        stub,
        Owoifier::new(),
        StdRng::seed_from_u64(seed),
        MONITORED,
        BOT,
    )
}

// ── Dispatch ────────────────────────────────────────────────────────

#[tokio::test]
async fn plain_post_is_transformed_and_published() {
    let (stub, published) = StubPlatform::new(vec![], vec![]);
    let mut bot = make_bot(stub, 1);

    bot.handle(&plain("1", MONITORED, "ben", "you has the cat"))
        .await;

    let posts = published.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let (text, reply_to) = &posts[0];
    assert!(text.contains("uu haz da cat"), "got: {text}");
    assert!(text.contains("https://twitter.com/ben/status/1"));
    assert!(text.chars().count() <= MAX_POST_CHARS);
    assert!(reply_to.is_none());
}

#[tokio::test]
async fn self_thread_reply_is_threaded_to_the_posted_root() {
    let root_candidate = plain("10", MONITORED, "ben", "you has the cat");
    let posted_root = plain(
        "55",
        BOT,
        "owobot",
        "OWO uu haz da cat :3 https://twitter.com/ben/status/10",
    );
    let newer_noise = plain("56", BOT, "owobot", "something else entirely");

    let (stub, published) = StubPlatform::new(
        vec![root_candidate],
        vec![newer_noise, posted_root], // most recent first
    );
    let mut bot = make_bot(stub, 2);

    bot.handle(&reply(
        "11",
        MONITORED,
        "and another thing about that cat",
        "10",
        MONITORED,
    ))
    .await;

    let posts = published.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let (text, reply_to) = &posts[0];
    assert_eq!(reply_to.as_deref(), Some("55"));
    assert!(text.chars().count() <= MAX_POST_CHARS);
}

#[tokio::test]
async fn unresolved_root_drops_the_reply() {
    let root_candidate = plain("10", MONITORED, "ben", "you has the cat");
    let unrelated = plain("55", BOT, "owobot", "nothing to see here");

    let (stub, published) = StubPlatform::new(vec![root_candidate], vec![unrelated]);
    let mut bot = make_bot(stub, 3);

    bot.handle(&reply("11", MONITORED, "thread goes on", "10", MONITORED))
        .await;

    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn ignored_statuses_publish_nothing() {
    let (stub, published) = StubPlatform::new(vec![], vec![]);
    let mut bot = make_bot(stub, 4);

    // Foreign reply
    bot.handle(&reply("20", MONITORED, "well actually", "19", "12345"))
        .await;

    // Reshare
    let mut reshare = plain("21", MONITORED, "ben", "RT @fan: nice");
    reshare.retweeted_status = Some(Box::new(plain("5", "9", "fan", "nice")));
    bot.handle(&reshare).await;

    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn fetch_failure_is_contained_to_the_message() {
    let (mut stub, published) = StubPlatform::new(vec![], vec![]);
    stub.fail_fetches = true;
    let mut bot = make_bot(stub, 5);

    bot.handle(&reply("30", MONITORED, "thread", "29", MONITORED))
        .await;

    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_text_is_contained_to_the_message() {
    let (stub, published) = StubPlatform::new(vec![], vec![]);
    let mut bot = make_bot(stub, 6);

    bot.handle(&textless("40", MONITORED)).await;

    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn attribution_link_is_dropped_when_over_budget() {
    let (stub, published) = StubPlatform::new(vec![], vec![]);
    let mut bot = make_bot(stub, 7);

    let long = "x".repeat(270);
    bot.handle(&plain("50", MONITORED, "ben", &long)).await;

    let posts = published.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let (text, _) = &posts[0];
    assert!(!text.contains("twitter.com"));
    assert!(text.chars().count() <= MAX_POST_CHARS);
}

// ── Resolution ──────────────────────────────────────────────────────

#[tokio::test]
async fn first_containing_match_wins() {
    let (stub, _published) = StubPlatform::new(
        vec![plain("10", MONITORED, "ben", "you has the cat")],
        vec![
            plain("60", BOT, "owobot", "UwU uu haz da cat.."),
            plain("55", BOT, "owobot", "OWO uu haz da cat :3"),
        ],
    );

    let incoming = reply("11", MONITORED, "more", "10", MONITORED);
    let root = resolve_root(&stub, &Owoifier::new(), BOT, &incoming)
        .await
        .unwrap();

    assert_eq!(root.unwrap().id, "60");
}

#[tokio::test]
async fn resolution_miss_is_none_not_error() {
    let (stub, _published) = StubPlatform::new(
        vec![plain("10", MONITORED, "ben", "you has the cat")],
        vec![plain("55", BOT, "owobot", "unrelated")],
    );

    let incoming = reply("11", MONITORED, "more", "10", MONITORED);
    let root = resolve_root(&stub, &Owoifier::new(), BOT, &incoming)
        .await
        .unwrap();

    assert!(root.is_none());
}

#[tokio::test]
async fn textless_history_posts_are_skipped() {
    let (stub, _published) = StubPlatform::new(
        vec![plain("10", MONITORED, "ben", "you has the cat")],
        vec![
            textless("61", BOT),
            plain("55", BOT, "owobot", "OWO uu haz da cat :3"),
        ],
    );

    let incoming = reply("11", MONITORED, "more", "10", MONITORED);
    let root = resolve_root(&stub, &Owoifier::new(), BOT, &incoming)
        .await
        .unwrap();

    assert_eq!(root.unwrap().id, "55");
}

#[tokio::test]
async fn resolution_matches_entity_escaped_history() {
    // The posted transform comes back entity-escaped; decoding must
    // happen before containment is checked
    let (stub, _published) = StubPlatform::new(
        vec![plain("10", MONITORED, "ben", "cats > dogs & birds")],
        vec![plain("55", BOT, "owobot", "OwO cats &gt; dogs &amp; biwds x3")],
    );

    let incoming = reply("11", MONITORED, "more", "10", MONITORED);
    let root = resolve_root(&stub, &Owoifier::new(), BOT, &incoming)
        .await
        .unwrap();

    assert_eq!(root.unwrap().id, "55");
}
