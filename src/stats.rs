use crate::model::{Card, User};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PopularCard {
    pub name: String,
    pub likes: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub total_users: usize,
    pub total_likes: usize,
    pub max_likes_from_single_user: usize,
    pub champion: Option<User>,
    pub popular: Vec<PopularCard>,
}

fn note_user(seen: &mut Vec<String>, id: &str) {
    if !seen.iter().any(|s| s == id) {
        seen.push(id.to_string());
    }
}

// Collection-wide metrics over the card set as received from the store.
// Iteration order (cards, then each card's likes) is significant: the
// champion tie-break keeps the earlier-encountered liker, so callers must
// not feed this from an unordered container.
pub fn aggregate(cards: &[Card]) -> Stats {
    let mut seen: Vec<String> = Vec::new();
    let mut tallies: Vec<(User, usize)> = Vec::new();
    let mut total_likes = 0usize;

    for card in cards {
        note_user(&mut seen, &card.owner.id);
        for liker in &card.likes {
            note_user(&mut seen, &liker.id);
            total_likes += 1;
            match tallies.iter_mut().find(|(u, _)| u.id == liker.id) {
                Some(entry) => entry.1 += 1,
                None => tallies.push((liker.clone(), 1)),
            }
        }
    }

    // strictly-greater updates only: ties keep the first-seen liker
    let mut max_likes = 0usize;
    let mut champion: Option<User> = None;
    for (u, n) in &tallies {
        if *n > max_likes {
            max_likes = *n;
            champion = Some(u.clone());
        }
    }

    let mut ranked: Vec<&Card> = cards.iter().collect();
    ranked.sort_by(|a, b| b.likes.len().cmp(&a.likes.len()));
    let popular = ranked
        .into_iter()
        .take(3)
        .map(|c| PopularCard {
            name: c.name.clone(),
            likes: c.likes.len(),
        })
        .collect();

    Stats {
        total_users: seen.len(),
        total_likes,
        max_likes_from_single_user: max_likes,
        champion,
        popular,
    }
}
