use crate::model::{Card, User};
use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};

pub type SharedStore = Arc<dyn Store + Send + Sync>;

// Remote collection gateway. Every operation resolves asynchronously with the
// server's authoritative echo; failures are opaque string diagnostics.
pub trait Store {
    fn fetch_current_user(&self) -> BoxFuture<'static, Result<User, String>>;
    fn fetch_cards(&self) -> BoxFuture<'static, Result<Vec<Card>, String>>;
    fn update_profile(&self, name: String, about: String)
    -> BoxFuture<'static, Result<User, String>>;
    fn update_avatar(&self, avatar: String) -> BoxFuture<'static, Result<User, String>>;
    fn create_card(&self, name: String, link: String) -> BoxFuture<'static, Result<Card, String>>;
    fn delete_card(&self, id: String) -> BoxFuture<'static, Result<(), String>>;
    // already_liked steers the direction: true removes the like, false adds it.
    // The echoed card carries the replacement like list.
    fn set_like(&self, id: String, already_liked: bool)
    -> BoxFuture<'static, Result<Card, String>>;
}

struct Inner {
    me: User,
    cards: Vec<Card>,
    next_id: u64,
}

// Bundled backend standing in for the remote service: owns the authoritative
// collection, assigns ids, and echoes normalized records the way a server
// would. The HTTP transport itself is outside this crate.
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

// seed collection in the remote wire shape
const SEED: &str = r#"{
  "user": {
    "_id": "u-owner",
    "name": "Marnie Levin",
    "about": "Field photographer",
    "avatar": "https://pictures.example.test/avatars/marnie.jpg"
  },
  "others": [
    { "_id": "u-kira", "name": "Kira Holt", "about": "Climber", "avatar": "https://pictures.example.test/avatars/kira.jpg" },
    { "_id": "u-tomas", "name": "Tomas Reyes", "about": "Pilot", "avatar": "https://pictures.example.test/avatars/tomas.jpg" }
  ],
  "cards": [
    {
      "_id": "c-1",
      "name": "Yosemite Valley",
      "link": "https://pictures.example.test/places/yosemite.jpg",
      "owner": { "_id": "u-kira", "name": "Kira Holt", "about": "Climber", "avatar": "https://pictures.example.test/avatars/kira.jpg" },
      "likes": [
        { "_id": "u-tomas", "name": "Tomas Reyes", "about": "Pilot", "avatar": "https://pictures.example.test/avatars/tomas.jpg" },
        { "_id": "u-owner", "name": "Marnie Levin", "about": "Field photographer", "avatar": "https://pictures.example.test/avatars/marnie.jpg" }
      ]
    },
    {
      "_id": "c-2",
      "name": "Lake Louise",
      "link": "https://pictures.example.test/places/louise.jpg",
      "owner": { "_id": "u-owner", "name": "Marnie Levin", "about": "Field photographer", "avatar": "https://pictures.example.test/avatars/marnie.jpg" },
      "likes": [
        { "_id": "u-tomas", "name": "Tomas Reyes", "about": "Pilot", "avatar": "https://pictures.example.test/avatars/tomas.jpg" }
      ]
    },
    {
      "_id": "c-3",
      "name": "Black Sand Beach",
      "link": "https://pictures.example.test/places/blacksand.jpg",
      "owner": { "_id": "u-tomas", "name": "Tomas Reyes", "about": "Pilot", "avatar": "https://pictures.example.test/avatars/tomas.jpg" },
      "likes": []
    }
  ]
}"#;

impl MemoryStore {
    pub fn new(me: User, cards: Vec<Card>) -> Self {
        let next_id = (cards.len() as u64) + 1;
        MemoryStore {
            inner: Arc::new(Mutex::new(Inner { me, cards, next_id })),
        }
    }

    pub fn demo() -> Result<Self, String> {
        let v: serde_json::Value =
            serde_json::from_str(SEED).map_err(|e| format!("failed to parse seed JSON: {e}"))?;
        let me: User = serde_json::from_value(v["user"].clone())
            .map_err(|e| format!("failed to parse seed user: {e}"))?;
        let cards: Vec<Card> = serde_json::from_value(v["cards"].clone())
            .map_err(|e| format!("failed to parse seed cards: {e}"))?;
        Ok(MemoryStore::new(me, cards))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // a poisoned lock means a panicked test thread; propagate the data as-is
        match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

fn ready<T: Send + 'static>(res: Result<T, String>) -> BoxFuture<'static, Result<T, String>> {
    Box::pin(async move { res })
}

impl Store for MemoryStore {
    fn fetch_current_user(&self) -> BoxFuture<'static, Result<User, String>> {
        let me = self.lock().me.clone();
        ready(Ok(me))
    }

    fn fetch_cards(&self) -> BoxFuture<'static, Result<Vec<Card>, String>> {
        let cards = self.lock().cards.clone();
        ready(Ok(cards))
    }

    fn update_profile(
        &self,
        name: String,
        about: String,
    ) -> BoxFuture<'static, Result<User, String>> {
        let mut inner = self.lock();
        // server-side normalization: stored and echoed values are trimmed
        inner.me.name = name.trim().to_string();
        inner.me.about = about.trim().to_string();
        ready(Ok(inner.me.clone()))
    }

    fn update_avatar(&self, avatar: String) -> BoxFuture<'static, Result<User, String>> {
        let mut inner = self.lock();
        inner.me.avatar = avatar.trim().to_string();
        ready(Ok(inner.me.clone()))
    }

    fn create_card(&self, name: String, link: String) -> BoxFuture<'static, Result<Card, String>> {
        let mut inner = self.lock();
        let id = format!("c-{}", inner.next_id);
        inner.next_id += 1;
        let card = Card {
            id,
            name: name.trim().to_string(),
            link: link.trim().to_string(),
            owner: inner.me.clone(),
            likes: vec![],
        };
        inner.cards.insert(0, card.clone());
        ready(Ok(card))
    }

    fn delete_card(&self, id: String) -> BoxFuture<'static, Result<(), String>> {
        let mut inner = self.lock();
        let me_id = inner.me.id.clone();
        let res = match inner.cards.iter().position(|c| c.id == id) {
            None => Err(format!("delete failed: no card with id {id}")),
            Some(pos) => {
                if inner.cards[pos].owner.id != me_id {
                    Err(format!("delete failed: card {id} belongs to another user"))
                } else {
                    inner.cards.remove(pos);
                    Ok(())
                }
            }
        };
        ready(res)
    }

    fn set_like(
        &self,
        id: String,
        already_liked: bool,
    ) -> BoxFuture<'static, Result<Card, String>> {
        let mut inner = self.lock();
        let me = inner.me.clone();
        let res = match inner.cards.iter_mut().find(|c| c.id == id) {
            None => Err(format!("like failed: no card with id {id}")),
            Some(card) => {
                if already_liked {
                    card.likes.retain(|u| u.id != me.id);
                } else if !card.is_liked_by(&me.id) {
                    card.likes.push(me);
                }
                Ok(card.clone())
            }
        };
        ready(res)
    }
}
