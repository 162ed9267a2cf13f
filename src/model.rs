use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub about: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub link: String,
    pub owner: User,
    #[serde(default)]
    pub likes: Vec<User>,
}

impl Card {
    // membership is by user id; the like list never holds duplicates
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|u| u.id == user_id)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner.id == user_id
    }
}
