//! Shared test site.
//!
//! ```text
//! example.com (.html)                 example.de (/de, .html)
//! ├── about            2              └── ueber-uns      21
//! │     └ article "team"
//! ├── news             3
//! ├── go               4  forward → about
//! ├── start            5  forward → first child
//! │   ├── start/draft  16 unpublished
//! │   └── start/welcome 6
//! ├── news/{year}/{alias}   7  news reader, archive 1
//! ├── broken           8  forward → missing page
//! ├── old-site         9  redirect → https://contao.org
//! ├── loop-a / loop-b  10/11  forwarding to each other
//! ├── not-found        12 error_404
//! ├── items/{id}-{alias}    13 news reader, archives 1 and 2
//! ├── events/{alias}   14 event reader
//! ├── faq/{alias}      15 faq reader
//! └── newsletter/{alias}    17 newsletter reader
//! ```

use std::sync::Arc;

use crate::config::RoutingConfig;
use crate::content::{Collaborators, Content, ContentLoader, ContentType, MemoryStore, PageModel};
use crate::engine::RoutingEngine;

pub const ABOUT: u64 = 2;
pub const NEWS_LIST: u64 = 3;
pub const FORWARD: u64 = 4;
pub const FORWARD_TO_CHILD: u64 = 5;
pub const FORWARD_CHILD: u64 = 6;
pub const NEWS_READER: u64 = 7;
pub const BROKEN_FORWARD: u64 = 8;
pub const REDIRECT: u64 = 9;
pub const LOOP_A: u64 = 10;
pub const NEWS_BY_ID_AND_ALIAS: u64 = 13;
pub const EVENT_READER: u64 = 14;
pub const FAQ_READER: u64 = 15;
pub const NEWSLETTER_READER: u64 = 17;
pub const GERMAN_ABOUT: u64 = 21;

pub const NEWS_ARCHIVE: u64 = 1;
pub const PRESS_ARCHIVE: u64 = 2;
pub const NEWS_ID: u64 = 42;
pub const NEWS_INTERNAL_ID: u64 = 43;
pub const NEWS_EXTERNAL_ID: u64 = 44;
pub const PRESS_NEWS_ID: u64 = 50;
pub const ARTICLE_ID: u64 = 5;
pub const EVENT_ID: u64 = 30;
pub const FAQ_ID: u64 = 60;
pub const NEWSLETTER_ID: u64 = 70;

const CONFIG: &str = r#"
[request]
base_url = "https://example.com"

[[page_types]]
type = "news_reader"
content_types = ["news"]

[[page_types]]
type = "event_reader"
content_types = ["calendar_event"]

[[page_types]]
type = "faq_reader"
content_types = ["faq"]

[[page_types]]
type = "newsletter_reader"
content_types = ["newsletter"]

[insert_tags]
"env::url" = "https://example.com"
"#;

const SITE: &str = r#"
# example.com

[[pages]]
id = 1
type = "root"
title = "Example"
domain = "example.com"
url_suffix = ".html"
published = true

[[pages]]
id = 2
pid = 1
type = "regular"
title = "About"
alias = "about"
published = true
sorting = 10

[[pages]]
id = 3
pid = 1
type = "regular"
title = "News"
alias = "news"
published = true
sorting = 20

[[pages]]
id = 4
pid = 1
type = "forward"
alias = "go"
jump_to = 2
published = true

[[pages]]
id = 5
pid = 1
type = "forward"
alias = "start"
published = true

[[pages]]
id = 16
pid = 5
type = "regular"
alias = "start/draft"
sorting = 5

[[pages]]
id = 6
pid = 5
type = "regular"
alias = "start/welcome"
published = true
sorting = 10

[[pages]]
id = 7
pid = 3
type = "news_reader"
alias = "news/{year}/{alias}"
archives = [1]
published = true

[[pages]]
id = 8
pid = 1
type = "forward"
alias = "broken"
jump_to = 404404
published = true

[[pages]]
id = 9
pid = 1
type = "redirect"
alias = "old-site"
url = "https://contao.org"
published = true

[[pages]]
id = 10
pid = 1
type = "forward"
alias = "loop-a"
jump_to = 11
published = true

[[pages]]
id = 11
pid = 1
type = "forward"
alias = "loop-b"
jump_to = 10
published = true

[[pages]]
id = 12
pid = 1
type = "error_404"
alias = "not-found"
published = true

[[pages]]
id = 13
pid = 3
type = "news_reader"
alias = "items/{id}-{alias}"
archives = [1, 2]
published = true

[[pages]]
id = 14
pid = 1
type = "event_reader"
alias = "events/{alias}"
archives = [1]
published = true

[[pages]]
id = 15
pid = 1
type = "faq_reader"
alias = "faq/{alias}"
archives = [1]
published = true

[[pages]]
id = 17
pid = 1
type = "newsletter_reader"
alias = "newsletter/{alias}"
archives = [1]
published = true

# example.de

[[pages]]
id = 20
type = "root"
title = "Beispiel"
domain = "example.de"
url_prefix = "de"
url_suffix = ".html"
published = true

[[pages]]
id = 21
pid = 20
type = "regular"
title = "Über uns"
alias = "ueber-uns"
published = true

# content

[[articles]]
id = 5
pid = 2
alias = "team"
title = "Our Team"
published = true

[[news_archives]]
id = 1
title = "Blog"
jump_to = 7

[[news_archives]]
id = 2
title = "Press"
jump_to = 13

[[news]]
id = 42
pid = 1
alias = "hello-world"
headline = "Hello World"
time = 1_709_814_615
published = true

[[news]]
id = 43
pid = 1
alias = "see-about"
headline = "See About"
time = 1_709_814_615
published = true
source = "internal"
jump_to = 2

[[news]]
id = 44
pid = 1
alias = "press-release"
headline = "Press Release"
time = 1_709_814_615
published = true
source = "external"
url = "{{env::url}}/press/release"

[[news]]
id = 45
pid = 1
alias = "unpublished-draft"
headline = "Draft"

[[news]]
id = 50
pid = 2
alias = "elsewhere"
headline = "Elsewhere"
time = 1_709_814_615
published = true

[[calendars]]
id = 1
title = "Events"
jump_to = 14

[[events]]
id = 30
pid = 1
alias = "summer-party"
title = "Summer Party 2024"
start_time = 1_719_792_000
published = true

[[faq_categories]]
id = 1
title = "Help"
jump_to = 15

[[faqs]]
id = 60
pid = 1
alias = "reset-password"
question = "How do I reset my password?"
published = true

[[newsletter_channels]]
id = 1
title = "Updates"
jump_to = 17

[[newsletters]]
id = 70
pid = 1
alias = "march-update"
subject = "March Update"
date = 1_710_460_800
sent = true

[[newsletters]]
id = 71
pid = 1
alias = "april-draft"
subject = "April Draft"
date = 1_712_000_000
"#;

/// Engine over the shared test site.
pub struct World {
    pub engine: RoutingEngine,
    pub store: Arc<MemoryStore>,
    pub collaborators: Collaborators,
}

impl World {
    /// Page `id`, loaded with details.
    pub fn page(&self, id: u64) -> Arc<PageModel> {
        self.store
            .find_page_with_details(id)
            .unwrap_or_else(|| panic!("fixture page {id}"))
    }

    pub fn content(&self, kind: ContentType, id: u64) -> Content {
        self.store
            .find_by_id(kind, id)
            .unwrap_or_else(|| panic!("fixture {kind} {id}"))
    }
}

pub fn world() -> World {
    let config = RoutingConfig::from_str(CONFIG).unwrap();
    let store = Arc::new(MemoryStore::from_toml_str(SITE).unwrap());
    let engine = RoutingEngine::build(&config, Arc::clone(&store) as Arc<dyn ContentLoader>).unwrap();
    let collaborators = engine.collaborators().clone();
    World {
        engine,
        store,
        collaborators,
    }
}
